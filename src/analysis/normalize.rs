//! Splitting multi-value cells into person, organization and theme tokens.

use log::debug;

use crate::error::AnalysisError;
use crate::table::{Cell, Table};

/// Separators between items in a multi-value cell.
pub const DELIMITERS: [char; 3] = [',', ';', '、'];

/// Which table columns hold people, organizations and themes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ColumnSelection {
	/// Person column name.
	pub person: String,
	/// Organization column name.
	pub organization: String,
	/// Theme column name.
	pub theme: String,
}

impl ColumnSelection {
	/// First three columns in table order, or `None` if there are fewer.
	pub fn first_three(table: &Table) -> Option<Self> {
		match table.columns() {
			[person, organization, theme, ..] => Some(Self {
				person: person.clone(),
				organization: organization.clone(),
				theme: theme.clone(),
			}),
			_ => None,
		}
	}
}

/// A record whose three designated cells are all present, with its tokens.
#[derive(Clone, Debug, PartialEq)]
pub struct NormalizedRow {
	/// Raw person cell.
	pub person_cell: Cell,
	/// Raw organization cell.
	pub org_cell: Cell,
	/// Raw theme cell.
	pub theme_cell: Cell,
	/// Person tokens.
	pub people: Vec<String>,
	/// Organization tokens.
	pub orgs: Vec<String>,
	/// Theme tokens.
	pub themes: Vec<String>,
}

impl NormalizedRow {
	/// Tokenize the three cells of one row.
	pub fn new(person_cell: Cell, org_cell: Cell, theme_cell: Cell) -> Self {
		Self {
			people: split_items(&person_cell),
			orgs: split_items(&org_cell),
			themes: split_items(&theme_cell),
			person_cell,
			org_cell,
			theme_cell,
		}
	}
}

/// Split a multi-value cell into trimmed, non-empty items.
///
/// Anything but a text cell yields no items.
pub fn split_items(cell: &Cell) -> Vec<String> {
	let Some(text) = cell.as_text() else {
		return Vec::new();
	};
	text.split(DELIMITERS)
		.map(str::trim)
		.filter(|item| !item.is_empty())
		.map(str::to_owned)
		.collect()
}

/// Tokenize the selected columns, dropping rows with a missing value in any of them.
pub fn normalize(
	table: &Table,
	selection: &ColumnSelection,
) -> Result<Vec<NormalizedRow>, AnalysisError> {
	let index = |name: &str| {
		table
			.column_index(name)
			.ok_or_else(|| AnalysisError::UnknownColumn(name.to_owned()))
	};
	let (p, o, t) = (
		index(&selection.person)?,
		index(&selection.organization)?,
		index(&selection.theme)?,
	);

	let rows: Vec<_> = table
		.rows()
		.iter()
		.filter(|row| !(row[p].is_missing() || row[o].is_missing() || row[t].is_missing()))
		.map(|row| NormalizedRow::new(row[p].clone(), row[o].clone(), row[t].clone()))
		.collect();
	debug!(
		"normalized {} of {} rows ({} dropped for missing values)",
		rows.len(),
		table.len(),
		table.len() - rows.len()
	);
	Ok(rows)
}

#[cfg(test)]
mod tests {
	use super::*;

	fn table() -> Table {
		Table::new(
			vec!["name".into(), "org".into(), "theme".into(), "memo".into()],
			vec![
				vec![
					Cell::text("田中, 鈴木"),
					Cell::text("A社"),
					Cell::text("AI"),
					Cell::Empty,
				],
				vec![Cell::text("佐藤"), Cell::Empty, Cell::text("IoT"), Cell::Empty],
				vec![
					Cell::Number(7.0),
					Cell::text("B大学"),
					Cell::text(" ,、; "),
					Cell::Empty,
				],
			],
		)
	}

	fn selection() -> ColumnSelection {
		ColumnSelection {
			person: "name".into(),
			organization: "org".into(),
			theme: "theme".into(),
		}
	}

	#[test]
	fn splits_on_every_delimiter() {
		let cell = Cell::text(" 田中 ,鈴木;佐藤、 高橋 ");
		assert_eq!(split_items(&cell), ["田中", "鈴木", "佐藤", "高橋"]);
	}

	#[test]
	fn preserves_case_and_order() {
		let cell = Cell::text("beta, Alpha, ALPHA");
		assert_eq!(split_items(&cell), ["beta", "Alpha", "ALPHA"]);
	}

	#[test]
	fn non_text_cells_have_no_items() {
		assert!(split_items(&Cell::Empty).is_empty());
		assert!(split_items(&Cell::Number(3.0)).is_empty());
		assert!(split_items(&Cell::Bool(true)).is_empty());
		assert!(split_items(&Cell::Other("2024-01-01".into())).is_empty());
	}

	#[test]
	fn delimiter_only_text_has_no_items() {
		for s in [",", " ; ", "、、", " ,;、 \t", "   "] {
			assert!(split_items(&Cell::text(s)).is_empty(), "{s:?}");
		}
	}

	#[test]
	fn tokenizing_is_idempotent() {
		for s in ["a, b;c", " 田中 、鈴木,, ", "x", ";;"] {
			let once = split_items(&Cell::text(s));
			let twice = split_items(&Cell::text(once.join(",")));
			assert_eq!(once, twice);
		}
	}

	#[test]
	fn drops_rows_with_missing_designated_cells() {
		let rows = normalize(&table(), &selection()).unwrap();
		assert_eq!(rows.len(), 2);
		assert_eq!(rows[0].people, ["田中", "鈴木"]);
		assert_eq!(rows[0].orgs, ["A社"]);
		assert_eq!(rows[0].themes, ["AI"]);
		// present but untokenizable cells survive with empty lists
		assert!(rows[1].people.is_empty());
		assert!(rows[1].themes.is_empty());
		assert_eq!(rows[1].orgs, ["B大学"]);
	}

	#[test]
	fn unknown_column_is_an_error() {
		let mut sel = selection();
		sel.theme = "topic".into();
		assert_eq!(
			normalize(&table(), &sel).unwrap_err(),
			AnalysisError::UnknownColumn("topic".into())
		);
	}

	#[test]
	fn default_selection_takes_first_three_columns() {
		let sel = ColumnSelection::first_three(&table()).unwrap();
		assert_eq!(sel, selection());
		assert!(ColumnSelection::first_three(&Table::default()).is_none());
	}
}
