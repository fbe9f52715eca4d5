//! Seeded force-directed placement of a [`RelationGraph`].

use force_graph::{EdgeData, ForceGraph, NodeData, SimulationParameters};
use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::graph::RelationGraph;

/// Seed used when the caller does not pick one.
pub const DEFAULT_SEED: u64 = 42;

/// Node coordinates indexed like [`RelationGraph::nodes`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Positions(Vec<(f64, f64)>);

impl Positions {
	/// Position of node `idx`.
	pub fn get(&self, idx: usize) -> Option<(f64, f64)> {
		self.0.get(idx).copied()
	}

	/// Number of placed nodes.
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// Whether no node was placed.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Positions in node order.
	pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
		self.0.iter().copied()
	}

	/// Centre on the origin and scale so the largest coordinate is 1.
	fn rescale(&mut self) {
		if self.0.is_empty() {
			return;
		}
		let n = self.0.len() as f64;
		let (cx, cy) = self
			.0
			.iter()
			.fold((0.0, 0.0), |(sx, sy), &(x, y)| (sx + x / n, sy + y / n));
		let extent = self
			.0
			.iter()
			.map(|&(x, y)| (x - cx).abs().max((y - cy).abs()))
			.fold(0.0, f64::max);
		let scale = if extent > 0.0 { 1.0 / extent } else { 1.0 };
		for p in &mut self.0 {
			*p = ((p.0 - cx) * scale, (p.1 - cy) * scale);
		}
	}
}

impl FromIterator<(f64, f64)> for Positions {
	fn from_iter<I: IntoIterator<Item = (f64, f64)>>(iter: I) -> Self {
		Self(iter.into_iter().collect())
	}
}

/// Places graph nodes in 2-D. Same graph and seed must give the same result.
pub trait Layout {
	/// One position per node of `graph`, in node order.
	fn layout(&self, graph: &RelationGraph, seed: u64) -> Positions;
}

/// Spring/charge simulation run for a fixed number of steps.
#[derive(Clone, Debug, PartialEq)]
pub struct ForceLayout {
	/// Simulation steps to run.
	pub iterations: usize,
	/// Seconds advanced per step.
	pub time_step: f32,
	/// Repulsion between all node pairs.
	pub force_charge: f32,
	/// Attraction along edges.
	pub force_spring: f32,
	/// Upper bound on any single force.
	pub force_max: f32,
	/// Velocity scale.
	pub node_speed: f32,
	/// Fraction of velocity kept per step.
	pub damping_factor: f32,
	/// Mass of every node.
	pub node_mass: f32,
}

impl Default for ForceLayout {
	fn default() -> Self {
		Self {
			iterations: 500,
			time_step: 0.016,
			force_charge: 150.0,
			force_spring: 0.05,
			force_max: 100.0,
			node_speed: 3000.0,
			damping_factor: 0.9,
			node_mass: 10.0,
		}
	}
}

impl ForceLayout {
	fn parameters(&self) -> SimulationParameters {
		SimulationParameters {
			force_charge: self.force_charge,
			force_spring: self.force_spring,
			force_max: self.force_max,
			node_speed: self.node_speed,
			damping_factor: self.damping_factor,
		}
	}
}

impl Layout for ForceLayout {
	fn layout(&self, graph: &RelationGraph, seed: u64) -> Positions {
		let n = graph.node_count();
		if n == 0 {
			return Positions::default();
		}

		let mut rng = StdRng::seed_from_u64(seed);
		let spread = 50.0 * (n as f32).sqrt();
		let mut sim: ForceGraph<usize, ()> = ForceGraph::new(self.parameters());
		let indices: Vec<_> = (0..n)
			.map(|i| {
				sim.add_node(NodeData {
					x: rng.gen_range(-spread..spread),
					y: rng.gen_range(-spread..spread),
					mass: self.node_mass,
					is_anchor: false,
					user_data: i,
				})
			})
			.collect();
		for (a, b) in graph.edges() {
			sim.add_edge(indices[a], indices[b], EdgeData::default());
		}

		for _ in 0..self.iterations {
			sim.update(self.time_step);
		}

		let mut coords = vec![(0.0, 0.0); n];
		sim.visit_nodes(|node| {
			let (x, y) = (node.x() as f64, node.y() as f64);
			if x.is_finite() && y.is_finite() {
				coords[node.data.user_data] = (x, y);
			}
		});
		let mut positions = Positions(coords);
		positions.rescale();
		debug!(
			"laid out {n} nodes, {} edges, seed {seed}",
			graph.edge_count()
		);
		positions
	}
}
