//! People and organization allow-lists over normalized rows.

use std::collections::BTreeSet;

use super::normalize::NormalizedRow;

/// Allow-lists chosen in the people and organization pickers.
///
/// An empty list does not restrict anything.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RowFilter {
	/// Allowed people; empty allows all.
	pub people: Vec<String>,
	/// Allowed organizations; empty allows all.
	pub orgs: Vec<String>,
}

impl RowFilter {
	/// Filter from the two allow-lists.
	pub fn new(people: Vec<String>, orgs: Vec<String>) -> Self {
		Self { people, orgs }
	}

	/// Whether neither list restricts anything.
	pub fn is_empty(&self) -> bool {
		self.people.is_empty() && self.orgs.is_empty()
	}

	/// Themes are never filtered.
	pub fn matches(&self, row: &NormalizedRow) -> bool {
		allows(&self.people, &row.people) && allows(&self.orgs, &row.orgs)
	}

	/// Matching rows, in their original order.
	pub fn apply<'a>(&self, rows: &'a [NormalizedRow]) -> Vec<&'a NormalizedRow> {
		rows.iter().filter(|row| self.matches(row)).collect()
	}
}

fn allows(selected: &[String], tokens: &[String]) -> bool {
	selected.is_empty() || tokens.iter().any(|t| selected.contains(t))
}

/// Distinct people and organizations, sorted, for populating the pickers.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterOptions {
	/// Distinct people, sorted.
	pub people: Vec<String>,
	/// Distinct organizations, sorted.
	pub orgs: Vec<String>,
}

impl FilterOptions {
	/// Collect the options offered for `rows`.
	pub fn from_rows(rows: &[NormalizedRow]) -> Self {
		let people: BTreeSet<_> = rows.iter().flat_map(|r| r.people.iter()).collect();
		let orgs: BTreeSet<_> = rows.iter().flat_map(|r| r.orgs.iter()).collect();
		Self {
			people: people.into_iter().cloned().collect(),
			orgs: orgs.into_iter().cloned().collect(),
		}
	}

	/// Drop selections that are no longer offered.
	pub fn retain_known(&self, filter: &RowFilter) -> RowFilter {
		let keep = |selected: &[String], offered: &[String]| -> Vec<String> {
			selected
				.iter()
				.filter(|s| offered.binary_search(*s).is_ok())
				.cloned()
				.collect()
		};
		RowFilter {
			people: keep(&filter.people, &self.people),
			orgs: keep(&filter.orgs, &self.orgs),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::table::Cell;

	fn row(people: &str, orgs: &str, themes: &str) -> NormalizedRow {
		NormalizedRow::new(Cell::text(people), Cell::text(orgs), Cell::text(themes))
	}

	fn rows() -> Vec<NormalizedRow> {
		vec![
			row("田中, 鈴木", "A社", "AI"),
			row("佐藤", "B大学", "IoT"),
			row("鈴木", "B大学; C研究所", "AI"),
		]
	}

	fn strings(items: &[&str]) -> Vec<String> {
		items.iter().map(|s| s.to_string()).collect()
	}

	#[test]
	fn empty_filter_keeps_every_row_once() {
		let rows = rows();
		let kept = RowFilter::default().apply(&rows);
		assert_eq!(kept.len(), rows.len());
		for (kept, original) in kept.iter().zip(&rows) {
			assert!(std::ptr::eq(*kept, original));
		}
	}

	#[test]
	fn people_filter_matches_any_token() {
		let rows = rows();
		let filter = RowFilter::new(strings(&["鈴木"]), vec![]);
		let kept = filter.apply(&rows);
		assert_eq!(kept.len(), 2);
		assert_eq!(kept[1].orgs, ["B大学", "C研究所"]);
	}

	#[test]
	fn people_and_org_filters_are_conjunctive() {
		let rows = rows();
		let filter = RowFilter::new(strings(&["鈴木"]), strings(&["C研究所"]));
		let kept = filter.apply(&rows);
		assert_eq!(kept.len(), 1);
		assert_eq!(kept[0].themes, ["AI"]);
	}

	#[test]
	fn matching_is_exact() {
		let rows = vec![row("Tanaka", "Acme", "AI")];
		assert!(RowFilter::new(strings(&["tanaka"]), vec![]).apply(&rows).is_empty());
		assert!(RowFilter::new(strings(&["Tana"]), vec![]).apply(&rows).is_empty());
	}

	#[test]
	fn unknown_selection_matches_nothing() {
		let rows = rows();
		assert!(RowFilter::new(strings(&["山田"]), vec![]).apply(&rows).is_empty());
	}

	#[test]
	fn stale_selections_are_dropped_when_options_change() {
		let filter = RowFilter::new(strings(&["田中", "佐藤"]), strings(&["Z社"]));
		let options = FilterOptions::from_rows(&[row("佐藤", "A社", "AI")]);
		let kept = options.retain_known(&filter);
		assert_eq!(kept.people, ["佐藤"]);
		assert!(kept.orgs.is_empty());

		// a selection that vanished from the pickers must not empty the result
		let rows = vec![row("佐藤", "A社", "AI")];
		assert!(filter.apply(&rows).is_empty());
		assert_eq!(kept.apply(&rows).len(), 1);
	}

	#[test]
	fn retain_known_keeps_empty_filter_empty() {
		let options = FilterOptions::from_rows(&rows());
		assert!(options.retain_known(&RowFilter::default()).is_empty());
	}

	#[test]
	fn options_are_sorted_and_distinct() {
		let options = FilterOptions::from_rows(&rows());
		assert_eq!(options.people, ["佐藤", "田中", "鈴木"]);
		assert_eq!(options.orgs, ["A社", "B大学", "C研究所"]);
	}
}
