//! In-memory spreadsheet model and the loaders that fill it.

mod cell;
mod loader;

pub use cell::Cell;
pub use loader::{MIN_COLUMNS, load_table};

/// A rectangular table with unique column names.
///
/// Every row has exactly `columns.len()` cells.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Table {
	columns: Vec<String>,
	rows: Vec<Vec<Cell>>,
}

impl Table {
	/// Build a table, padding short rows with [`Cell::Empty`] and cutting long ones.
	pub fn new(columns: Vec<String>, rows: Vec<Vec<Cell>>) -> Self {
		let width = columns.len();
		let rows = rows
			.into_iter()
			.map(|mut row| {
				row.resize(width, Cell::Empty);
				row
			})
			.collect();
		Self { columns, rows }
	}

	/// Column names in table order.
	pub fn columns(&self) -> &[String] {
		&self.columns
	}

	/// Data rows, without the header.
	pub fn rows(&self) -> &[Vec<Cell>] {
		&self.rows
	}

	/// Position of the column called `name`.
	pub fn column_index(&self, name: &str) -> Option<usize> {
		self.columns.iter().position(|c| c == name)
	}

	/// Number of data rows.
	pub fn len(&self) -> usize {
		self.rows.len()
	}

	/// Whether there are no data rows.
	pub fn is_empty(&self) -> bool {
		self.rows.is_empty()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn new_pads_and_truncates_rows() {
		let table = Table::new(
			vec!["a".into(), "b".into()],
			vec![
				vec![Cell::text("1")],
				vec![Cell::text("1"), Cell::text("2"), Cell::text("3")],
			],
		);
		assert_eq!(table.rows()[0], vec![Cell::text("1"), Cell::Empty]);
		assert_eq!(table.rows()[1].len(), 2);
		assert_eq!(table.column_index("b"), Some(1));
		assert_eq!(table.column_index("c"), None);
	}
}
