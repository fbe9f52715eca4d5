//! Filter, assemble, lay out and draw in one call.

use log::info;

use super::figure::{Figure, Palette};
use super::filter::RowFilter;
use super::graph::{GraphStats, RelationGraph};
use super::layout::{DEFAULT_SEED, ForceLayout, Layout, Positions};
use super::normalize::NormalizedRow;

/// Layout and colouring settings for one run.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutConfig {
	/// Seed for the initial node positions.
	pub seed: u64,
	/// Simulation parameters.
	pub force: ForceLayout,
	/// Node colours.
	pub palette: Palette,
}

impl Default for LayoutConfig {
	fn default() -> Self {
		Self {
			seed: DEFAULT_SEED,
			force: ForceLayout::default(),
			palette: Palette::default(),
		}
	}
}

/// Result of one filter → assemble → layout → figure run.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Analysis {
	/// Rows that passed the filter.
	pub matched_rows: usize,
	/// Graph assembled from the matched rows.
	pub graph: RelationGraph,
	/// Layout of `graph`.
	pub positions: Positions,
	/// Drawable figure.
	pub figure: Figure,
}

impl Analysis {
	/// Shorthand for the graph statistics.
	pub fn stats(&self) -> GraphStats {
		self.graph.stats()
	}
}

/// Build a fresh [`Analysis`] from normalized rows.
pub fn analyze(rows: &[NormalizedRow], filter: &RowFilter, config: &LayoutConfig) -> Analysis {
	let kept = filter.apply(rows);
	let graph = RelationGraph::from_rows(kept.iter().copied());
	let positions = config.force.layout(&graph, config.seed);
	let figure = Figure::build(&graph, &positions, &config.palette);
	info!(
		"analysis: {} of {} rows matched, {} nodes, {} edges",
		kept.len(),
		rows.len(),
		graph.node_count(),
		graph.edge_count()
	);
	Analysis {
		matched_rows: kept.len(),
		graph,
		positions,
		figure,
	}
}
