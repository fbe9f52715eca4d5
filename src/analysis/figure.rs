//! Scatter-plot ready node and edge coordinates.

use serde::Serialize;

use super::graph::{Category, RelationGraph};
use super::layout::Positions;

/// Chart title used by [`Figure::build`].
pub const DEFAULT_TITLE: &str = "People, organizations and themes (filtered)";

/// Display colour per node category.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Palette {
	/// CSS colour of person nodes.
	pub person: String,
	/// CSS colour of organization nodes.
	pub organization: String,
	/// CSS colour of theme nodes.
	pub theme: String,
}

impl Default for Palette {
	fn default() -> Self {
		Self {
			person: "gold".into(),
			organization: "lightblue".into(),
			theme: "lightgreen".into(),
		}
	}
}

impl Palette {
	/// Colour for `category`.
	pub fn color(&self, category: Category) -> &str {
		match category {
			Category::Person => &self.person,
			Category::Organization => &self.organization,
			Category::Theme => &self.theme,
		}
	}
}

/// A positioned, coloured node.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FigureNode {
	/// Node identifier, shown above the marker.
	pub label: String,
	/// Category the node was first seen with.
	pub category: Category,
	/// Marker colour from the palette.
	pub color: String,
	/// Horizontal position.
	pub x: f64,
	/// Vertical position.
	pub y: f64,
}

/// A link between two nodes of the figure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct FigureEdge {
	/// Index into [`Figure::nodes`].
	pub source: usize,
	/// Index into [`Figure::nodes`].
	pub target: usize,
}

/// Everything needed to draw one analysis result.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Figure {
	/// Chart title.
	pub title: String,
	/// Positioned nodes, in graph order.
	pub nodes: Vec<FigureNode>,
	/// Undirected links between nodes.
	pub edges: Vec<FigureEdge>,
}

impl Figure {
	/// Pair each graph node with its position and colour.
	///
	/// Nodes without a position are placed at the origin.
	pub fn build(graph: &RelationGraph, positions: &Positions, palette: &Palette) -> Self {
		let nodes = graph
			.nodes()
			.enumerate()
			.map(|(i, (label, category))| {
				let (x, y) = positions.get(i).unwrap_or_default();
				FigureNode {
					label: label.to_owned(),
					category,
					color: palette.color(category).to_owned(),
					x,
					y,
				}
			})
			.collect();
		let edges = graph
			.edges()
			.map(|(source, target)| FigureEdge { source, target })
			.collect();
		Self {
			title: DEFAULT_TITLE.into(),
			nodes,
			edges,
		}
	}

	/// Whether there is nothing to draw.
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	/// Edge polylines as `x0, x1, None, ...` / `y0, y1, None, ...` series.
	pub fn edge_segments(&self) -> (Vec<Option<f64>>, Vec<Option<f64>>) {
		let mut xs = Vec::with_capacity(self.edges.len() * 3);
		let mut ys = Vec::with_capacity(self.edges.len() * 3);
		for edge in &self.edges {
			let (Some(a), Some(b)) = (self.nodes.get(edge.source), self.nodes.get(edge.target))
			else {
				continue;
			};
			xs.extend([Some(a.x), Some(b.x), None]);
			ys.extend([Some(a.y), Some(b.y), None]);
		}
		(xs, ys)
	}

	/// Coordinate bounds `(min_x, min_y, max_x, max_y)`, or `None` when empty.
	pub fn bounds(&self) -> Option<(f64, f64, f64, f64)> {
		self.nodes.iter().fold(None, |acc, n| {
			Some(match acc {
				None => (n.x, n.y, n.x, n.y),
				Some((x0, y0, x1, y1)) => (x0.min(n.x), y0.min(n.y), x1.max(n.x), y1.max(n.y)),
			})
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn graph() -> RelationGraph {
		let mut g = RelationGraph::new();
		g.add_node("田中", Category::Person);
		g.add_node("A社", Category::Organization);
		g.add_node("AI", Category::Theme);
		g.add_edge("田中", "A社");
		g.add_edge("A社", "AI");
		g
	}

	fn positions() -> Positions {
		[(-1.0, 0.0), (0.0, 0.5), (1.0, -0.5)].into_iter().collect()
	}

	#[test]
	fn colors_follow_category() {
		let figure = Figure::build(&graph(), &positions(), &Palette::default());
		let colors: Vec<_> = figure.nodes.iter().map(|n| n.color.as_str()).collect();
		assert_eq!(colors, ["gold", "lightblue", "lightgreen"]);
		assert_eq!(figure.nodes[1].label, "A社");
		assert_eq!((figure.nodes[2].x, figure.nodes[2].y), (1.0, -0.5));
	}

	#[test]
	fn edge_segments_are_separated_by_gaps() {
		let figure = Figure::build(&graph(), &positions(), &Palette::default());
		let (xs, ys) = figure.edge_segments();
		assert_eq!(xs, [Some(-1.0), Some(0.0), None, Some(0.0), Some(1.0), None]);
		assert_eq!(ys, [Some(0.0), Some(0.5), None, Some(0.5), Some(-0.5), None]);
	}

	#[test]
	fn bounds_cover_all_nodes() {
		let figure = Figure::build(&graph(), &positions(), &Palette::default());
		assert_eq!(figure.bounds(), Some((-1.0, -0.5, 1.0, 0.5)));
		assert_eq!(Figure::default().bounds(), None);
	}

	#[test]
	fn serializes_for_charting() {
		let figure = Figure::build(&graph(), &positions(), &Palette::default());
		let json = serde_json::to_value(&figure).unwrap();
		assert_eq!(json["nodes"][0]["category"], "person");
		assert_eq!(json["nodes"][0]["label"], "田中");
		assert_eq!(json["edges"][1]["source"], 1);
		assert_eq!(json["edges"][1]["target"], 2);
	}
}
