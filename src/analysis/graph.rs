//! Tripartite person / organization / theme graph.
//!
//! Nodes are keyed by their token text alone, so a name used both as a person
//! and as an organization is one node. Its category is whichever was seen
//! first; reordering rows can therefore change categories when names collide
//! across columns.

use std::fmt;

use indexmap::{IndexMap, IndexSet};
use serde::Serialize;

use super::normalize::NormalizedRow;

/// Which column a node came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
	/// From the person column.
	Person,
	/// From the organization column.
	Organization,
	/// From the theme column.
	Theme,
}

impl Category {
	/// Every category, in legend order.
	pub const ALL: [Self; 3] = [Self::Person, Self::Organization, Self::Theme];

	/// Lowercase name used in legends and serialized output.
	pub fn key(self) -> &'static str {
		match self {
			Self::Person => "person",
			Self::Organization => "organization",
			Self::Theme => "theme",
		}
	}
}

impl fmt::Display for Category {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.key())
	}
}

/// Undirected, unweighted graph with insertion-ordered nodes and edges.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RelationGraph {
	nodes: IndexMap<String, Category>,
	/// Node index pairs, smaller index first.
	edges: IndexSet<(usize, usize)>,
}

impl RelationGraph {
	/// An empty graph.
	pub fn new() -> Self {
		Self::default()
	}

	/// Build the graph from filtered rows.
	///
	/// Each person links to every organization and theme of the row, and every
	/// organization links to every theme of the row.
	pub fn from_rows<'a>(rows: impl IntoIterator<Item = &'a NormalizedRow>) -> Self {
		let mut graph = Self::new();
		for row in rows {
			for person in &row.people {
				graph.add_node(person, Category::Person);
				for org in &row.orgs {
					graph.add_node(org, Category::Organization);
					graph.add_edge(person, org);
				}
				for theme in &row.themes {
					graph.add_node(theme, Category::Theme);
					graph.add_edge(person, theme);
				}
			}
			for org in &row.orgs {
				for theme in &row.themes {
					graph.add_node(org, Category::Organization);
					graph.add_node(theme, Category::Theme);
					graph.add_edge(org, theme);
				}
			}
		}
		graph
	}

	/// Insert a node unless it exists; an existing node keeps its category.
	pub fn add_node(&mut self, id: &str, category: Category) -> usize {
		if let Some(idx) = self.nodes.get_index_of(id) {
			return idx;
		}
		self.nodes.insert_full(id.to_owned(), category).0
	}

	/// Connect two existing nodes. Self-loops and repeats are ignored.
	///
	/// Returns whether a new edge was stored.
	pub fn add_edge(&mut self, a: &str, b: &str) -> bool {
		let (Some(a), Some(b)) = (self.nodes.get_index_of(a), self.nodes.get_index_of(b)) else {
			return false;
		};
		if a == b {
			return false;
		}
		self.edges.insert((a.min(b), a.max(b)))
	}

	/// Number of distinct nodes.
	pub fn node_count(&self) -> usize {
		self.nodes.len()
	}

	/// Number of distinct undirected edges.
	pub fn edge_count(&self) -> usize {
		self.edges.len()
	}

	/// Whether the graph has no nodes.
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	/// Category of node `id`, if present.
	pub fn category(&self, id: &str) -> Option<Category> {
		self.nodes.get(id).copied()
	}

	/// Nodes in insertion order; the position is the node index.
	pub fn nodes(&self) -> impl ExactSizeIterator<Item = (&str, Category)> {
		self.nodes.iter().map(|(id, cat)| (id.as_str(), *cat))
	}

	/// Edges as node index pairs in insertion order.
	pub fn edges(&self) -> impl ExactSizeIterator<Item = (usize, usize)> + '_ {
		self.edges.iter().copied()
	}

	/// Whether `a` and `b` are linked, in either order.
	pub fn has_edge(&self, a: &str, b: &str) -> bool {
		match (self.nodes.get_index_of(a), self.nodes.get_index_of(b)) {
			(Some(a), Some(b)) => self.edges.contains(&(a.min(b), a.max(b))),
			_ => false,
		}
	}

	/// Nodes linked to `id`, in edge order.
	pub fn neighbors(&self, id: &str) -> Vec<&str> {
		let Some(idx) = self.nodes.get_index_of(id) else {
			return Vec::new();
		};
		self.edges
			.iter()
			.filter_map(|&(a, b)| match (a == idx, b == idx) {
				(true, _) => Some(b),
				(_, true) => Some(a),
				_ => None,
			})
			.filter_map(|i| self.nodes.get_index(i).map(|(id, _)| id.as_str()))
			.collect()
	}

	/// Node counts per category and the edge count.
	pub fn stats(&self) -> GraphStats {
		let count = |c: Category| self.nodes.values().filter(|&&v| v == c).count();
		GraphStats {
			people: count(Category::Person),
			organizations: count(Category::Organization),
			themes: count(Category::Theme),
			edges: self.edges.len(),
		}
	}
}

/// Node counts per category plus edge count.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct GraphStats {
	/// Person nodes.
	pub people: usize,
	/// Organization nodes.
	pub organizations: usize,
	/// Theme nodes.
	pub themes: usize,
	/// Undirected edges.
	pub edges: usize,
}

impl GraphStats {
	/// Total node count.
	pub fn nodes(&self) -> usize {
		self.people + self.organizations + self.themes
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::table::Cell;

	fn row(people: &str, orgs: &str, themes: &str) -> NormalizedRow {
		NormalizedRow::new(Cell::text(people), Cell::text(orgs), Cell::text(themes))
	}

	#[test]
	fn single_row_builds_full_tripartite_links() {
		let rows = [row("田中, 鈴木", "A社", "AI")];
		let graph = RelationGraph::from_rows(&rows);

		assert_eq!(graph.node_count(), 4);
		assert_eq!(graph.edge_count(), 5);
		for (a, b) in [
			("田中", "A社"),
			("田中", "AI"),
			("鈴木", "A社"),
			("鈴木", "AI"),
			("A社", "AI"),
		] {
			assert!(graph.has_edge(a, b), "{a} - {b}");
			assert!(graph.has_edge(b, a), "{b} - {a}");
		}
		assert!(!graph.has_edge("田中", "鈴木"));
		assert_eq!(graph.category("田中"), Some(Category::Person));
		assert_eq!(graph.category("A社"), Some(Category::Organization));
		assert_eq!(graph.category("AI"), Some(Category::Theme));
	}

	#[test]
	fn shared_organization_links_people_of_both_rows() {
		let rows = [row("田中", "A社", "AI"), row("佐藤", "A社", "AI")];
		let graph = RelationGraph::from_rows(&rows);

		let mut neighbors = graph.neighbors("A社");
		neighbors.sort();
		assert_eq!(neighbors, ["AI", "佐藤", "田中"]);
		// A社 - AI appears in both rows but is stored once
		assert_eq!(graph.edge_count(), 5);
	}

	#[test]
	fn org_theme_edges_do_not_need_a_person() {
		let rows = [row(" ; ", "A社, B大学", "AI")];
		let graph = RelationGraph::from_rows(&rows);
		assert_eq!(graph.node_count(), 3);
		assert!(graph.has_edge("A社", "AI"));
		assert!(graph.has_edge("B大学", "AI"));
		assert!(!graph.has_edge("A社", "B大学"));
	}

	#[test]
	fn never_creates_self_loops() {
		let rows = [row("Kyoto", "Kyoto", "Kyoto"), row("X", "X, Y", "Y")];
		let graph = RelationGraph::from_rows(&rows);
		assert!(graph.edges().all(|(a, b)| a != b));
		assert!(!graph.has_edge("Kyoto", "Kyoto"));
		assert!(graph.has_edge("X", "Y"));
	}

	#[test]
	fn first_category_wins_on_collision() {
		let forward = RelationGraph::from_rows(&[row("Mori", "Acme", "AI"), row("Sato", "Mori", "AI")]);
		assert_eq!(forward.category("Mori"), Some(Category::Person));

		// Not stable under reordering when a name collides across columns.
		let reversed = RelationGraph::from_rows(&[row("Sato", "Mori", "AI"), row("Mori", "Acme", "AI")]);
		assert_eq!(reversed.category("Mori"), Some(Category::Organization));
	}

	#[test]
	fn categories_are_stable_under_reordering_without_collisions() {
		let a = row("田中", "A社", "AI");
		let b = row("佐藤", "B大学", "IoT");
		let one = RelationGraph::from_rows(&[a.clone(), b.clone()]);
		let two = RelationGraph::from_rows(&[b, a]);
		for (id, cat) in one.nodes() {
			assert_eq!(two.category(id), Some(cat));
		}
	}

	#[test]
	fn edge_insertion_is_idempotent() {
		let mut graph = RelationGraph::new();
		graph.add_node("a", Category::Person);
		graph.add_node("b", Category::Theme);
		assert!(graph.add_edge("a", "b"));
		assert!(!graph.add_edge("b", "a"));
		assert!(!graph.add_edge("a", "missing"));
		assert_eq!(graph.edge_count(), 1);
	}

	#[test]
	fn empty_input_gives_empty_graph() {
		let graph = RelationGraph::from_rows(std::iter::empty());
		assert!(graph.is_empty());
		assert_eq!(graph.stats(), GraphStats::default());
	}

	#[test]
	fn stats_count_categories() {
		let graph = RelationGraph::from_rows(&[row("田中, 鈴木", "A社", "AI, IoT")]);
		let stats = graph.stats();
		assert_eq!((stats.people, stats.organizations, stats.themes), (2, 1, 2));
		assert_eq!(stats.nodes(), graph.node_count());
		assert_eq!(stats.edges, graph.edge_count());
	}
}
