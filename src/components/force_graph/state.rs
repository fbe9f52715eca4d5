use std::collections::HashSet;

use crate::analysis::Figure;

pub const NODE_RADIUS: f64 = 6.0;
pub const HIT_RADIUS: f64 = 12.0;

/// Share of the shorter canvas side used by the unit layout box.
const FILL: f64 = 0.42;

#[derive(Clone, Debug, Default)]
pub struct CanvasNode {
	pub x: f64,
	pub y: f64,
	pub label: String,
	pub color: String,
}

#[derive(Clone, Debug, Default)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub node_idx: Option<usize>,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start_x: f64,
	pub node_start_y: f64,
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

#[derive(Clone, Debug, Default)]
pub struct HoverState {
	pub node: Option<usize>,
	pub neighbors: HashSet<usize>,
	pub highlight_t: f64,
	pub prev_node: Option<usize>,
	pub prev_neighbors: HashSet<usize>,
	delay_t: f64,
}

/// A laid-out figure plus the view and pointer state of the canvas showing it.
pub struct ForceGraphState {
	pub nodes: Vec<CanvasNode>,
	pub edges: Vec<(usize, usize)>,
	pub title: String,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub hover: HoverState,
	pub width: f64,
	pub height: f64,
	adjacency: Vec<Vec<usize>>,
}

impl ForceGraphState {
	pub fn new(figure: &Figure, width: f64, height: f64) -> Self {
		let extent = width.min(height) * FILL;
		let nodes: Vec<CanvasNode> = figure
			.nodes
			.iter()
			.map(|n| CanvasNode {
				x: n.x * extent,
				// layout y grows upwards, canvas y grows downwards
				y: -n.y * extent,
				label: n.label.clone(),
				color: n.color.clone(),
			})
			.collect();

		let mut adjacency = vec![Vec::new(); nodes.len()];
		let edges: Vec<_> = figure
			.edges
			.iter()
			.filter(|e| e.source < nodes.len() && e.target < nodes.len())
			.map(|e| (e.source, e.target))
			.collect();
		for &(a, b) in &edges {
			adjacency[a].push(b);
			adjacency[b].push(a);
		}

		Self {
			nodes,
			edges,
			title: figure.title.clone(),
			transform: ViewTransform {
				x: width / 2.0,
				y: height / 2.0,
				k: 1.0,
			},
			drag: DragState::default(),
			pan: PanState::default(),
			hover: HoverState::default(),
			width,
			height,
			adjacency,
		}
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	/// Topmost node under a screen position.
	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<usize> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		// HIT_RADIUS is in world-space, scales with zoom like nodes
		self.nodes.iter().rposition(|node| {
			let (dx, dy) = (node.x - gx, node.y - gy);
			(dx * dx + dy * dy).sqrt() < HIT_RADIUS
		})
	}

	pub fn move_node(&mut self, idx: usize, x: f64, y: f64) {
		if let Some(node) = self.nodes.get_mut(idx) {
			node.x = x;
			node.y = y;
		}
	}

	pub fn set_hover(&mut self, node: Option<usize>) {
		if self.hover.node == node {
			return;
		}
		let was_hovering = self.hover.node.is_some();

		// keep the previous highlight around while it fades out
		if was_hovering && node.is_none() {
			self.hover.prev_node = self.hover.node.take();
			self.hover.prev_neighbors = std::mem::take(&mut self.hover.neighbors);
		} else {
			self.hover.prev_node = None;
			self.hover.prev_neighbors.clear();
		}

		self.hover.node = node;
		self.hover.neighbors.clear();

		if let Some(idx) = node {
			if !was_hovering {
				self.hover.delay_t = 0.0;
			}
			if let Some(adjacent) = self.adjacency.get(idx) {
				self.hover.neighbors.extend(adjacent.iter().copied());
			}
		}
	}

	pub fn is_highlighted(&self, idx: usize) -> bool {
		self.hover.node == Some(idx)
			|| self.hover.neighbors.contains(&idx)
			|| self.hover.prev_node == Some(idx)
			|| self.hover.prev_neighbors.contains(&idx)
	}

	pub fn is_hovered(&self, idx: usize) -> bool {
		self.hover.node == Some(idx) || self.hover.prev_node == Some(idx)
	}

	pub fn has_active_highlight(&self) -> bool {
		self.hover.node.is_some() || self.hover.prev_node.is_some()
	}

	/// Advance the hover highlight animation.
	pub fn tick(&mut self, dt: f64) {
		let (target, delay, speed) = if self.hover.node.is_some() {
			(1.0, 0.08, 1.8)
		} else {
			(0.0, 0.0, 1.26)
		};

		if self.hover.node.is_some() {
			self.hover.delay_t = (self.hover.delay_t + dt).min(delay);
			if self.hover.delay_t >= delay {
				self.hover.highlight_t += (target - self.hover.highlight_t) * speed * dt;
			}
		} else {
			self.hover.highlight_t += (target - self.hover.highlight_t) * speed * dt;
			if self.hover.highlight_t < 0.01 {
				self.hover.highlight_t = 0.0;
				self.hover.prev_node = None;
				self.hover.prev_neighbors.clear();
			}
		}
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.transform.x += (width - self.width) / 2.0;
		self.transform.y += (height - self.height) / 2.0;
		self.width = width;
		self.height = height;
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::analysis::{Category, FigureEdge, FigureNode};

	fn figure() -> Figure {
		let node = |label: &str, x, y| FigureNode {
			label: label.into(),
			category: Category::Person,
			color: "gold".into(),
			x,
			y,
		};
		Figure {
			title: "t".into(),
			nodes: vec![node("a", -1.0, 0.0), node("b", 0.0, 1.0), node("c", 1.0, 0.0)],
			edges: vec![
				FigureEdge { source: 0, target: 1 },
				FigureEdge { source: 1, target: 2 },
			],
		}
	}

	#[test]
	fn maps_unit_layout_onto_canvas() {
		let state = ForceGraphState::new(&figure(), 200.0, 100.0);
		// shorter side 100 * 0.42
		assert!((state.nodes[0].x + 42.0).abs() < 1e-9);
		assert!((state.nodes[1].y + 42.0).abs() < 1e-9);
		assert_eq!((state.transform.x, state.transform.y), (100.0, 50.0));
	}

	#[test]
	fn hit_testing_uses_view_transform() {
		let state = ForceGraphState::new(&figure(), 200.0, 100.0);
		assert_eq!(state.node_at_position(100.0 - 42.0, 50.0), Some(0));
		assert_eq!(state.node_at_position(100.0, 50.0), None);
	}

	#[test]
	fn hover_highlights_neighbors_then_fades() {
		let mut state = ForceGraphState::new(&figure(), 200.0, 100.0);
		state.set_hover(Some(1));
		assert!(state.is_highlighted(0) && state.is_highlighted(2));

		state.set_hover(Some(0));
		assert!(state.is_highlighted(1));
		assert!(!state.is_highlighted(2));

		state.set_hover(None);
		assert!(state.is_hovered(0));
		for _ in 0..600 {
			state.tick(0.016);
		}
		assert!(!state.has_active_highlight());
	}
}
