use std::collections::HashSet;
use std::io::Cursor;

use calamine::{Reader, Xlsx, open_workbook_from_rs};
use log::{debug, info};

use super::{Cell, Table};
use crate::error::LoadError;

/// Person, organization and theme each need their own column.
pub const MIN_COLUMNS: usize = 3;

const ZIP_MAGIC: &[u8] = b"PK\x03\x04";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Format {
	Workbook,
	Csv,
}

impl Format {
	fn detect(file_name: &str, bytes: &[u8]) -> Self {
		let ext = file_name
			.rsplit_once('.')
			.map(|(_, ext)| ext.to_ascii_lowercase())
			.unwrap_or_default();
		match ext.as_str() {
			"xlsx" | "xlsm" => Self::Workbook,
			"csv" | "txt" => Self::Csv,
			_ if bytes.starts_with(ZIP_MAGIC) => Self::Workbook,
			_ => Self::Csv,
		}
	}
}

/// Parse an uploaded file into a [`Table`], taking the first row as header.
pub fn load_table(file_name: &str, bytes: &[u8]) -> Result<Table, LoadError> {
	let format = Format::detect(file_name, bytes);
	debug!("loading {file_name} ({} bytes) as {format:?}", bytes.len());

	let (header, rows) = match format {
		Format::Workbook => read_workbook(bytes)?,
		Format::Csv => read_csv(bytes)?,
	};
	if header.len() < MIN_COLUMNS {
		return Err(LoadError::TooFewColumns(header.len()));
	}

	let table = Table::new(unique_column_names(header), rows);
	info!(
		"loaded {file_name}: {} rows x {} columns",
		table.len(),
		table.columns().len()
	);
	Ok(table)
}

type RawSheet = (Vec<String>, Vec<Vec<Cell>>);

fn read_workbook(bytes: &[u8]) -> Result<RawSheet, LoadError> {
	let mut workbook: Xlsx<_> = open_workbook_from_rs(Cursor::new(bytes))?;
	let range = workbook.worksheet_range_at(0).ok_or(LoadError::Empty)??;

	let mut rows = range.rows();
	let header = rows
		.next()
		.ok_or(LoadError::Empty)?
		.iter()
		.map(|d| Cell::from(d).to_string())
		.collect();
	let rows = rows
		.map(|row| row.iter().map(Cell::from).collect())
		.collect();
	Ok((header, rows))
}

fn read_csv(bytes: &[u8]) -> Result<RawSheet, LoadError> {
	let mut reader = csv::ReaderBuilder::new()
		.has_headers(false)
		.flexible(true)
		.from_reader(bytes);
	let mut records = reader.records();

	let header: Vec<String> = records
		.next()
		.ok_or(LoadError::Empty)??
		.iter()
		.enumerate()
		.map(|(i, name)| {
			if i == 0 {
				name.trim_start_matches('\u{feff}').to_string()
			} else {
				name.to_string()
			}
		})
		.collect();

	let mut rows = Vec::new();
	for record in records {
		let record = record?;
		rows.push(record.iter().map(Cell::from_raw).collect::<Vec<_>>());
	}
	infer_numeric_columns(header.len(), &mut rows);
	Ok((header, rows))
}

/// Turn CSV columns whose every present value is numeric into number cells.
fn infer_numeric_columns(width: usize, rows: &mut [Vec<Cell>]) {
	for col in 0..width {
		let mut present = rows
			.iter()
			.filter_map(|row| row.get(col))
			.filter(|cell| !cell.is_missing())
			.peekable();
		if present.peek().is_none() || !present.all(|cell| parse_number(cell).is_some()) {
			continue;
		}
		for cell in rows.iter_mut().filter_map(|row| row.get_mut(col)) {
			if let Some(n) = parse_number(cell) {
				*cell = Cell::Number(n);
			}
		}
	}
}

fn parse_number(cell: &Cell) -> Option<f64> {
	let s = cell.as_text()?.trim();
	if !s.bytes().any(|b| b.is_ascii_digit()) {
		return None;
	}
	s.parse().ok()
}

/// Blank names become `Unnamed: <i>`; repeats get `.1`, `.2`, ... suffixes.
fn unique_column_names(header: Vec<String>) -> Vec<String> {
	let mut seen = HashSet::new();
	header
		.into_iter()
		.enumerate()
		.map(|(i, name)| {
			let base = if name.trim().is_empty() {
				format!("Unnamed: {i}")
			} else {
				name
			};
			let mut candidate = base.clone();
			let mut n = 0;
			while !seen.insert(candidate.clone()) {
				n += 1;
				candidate = format!("{base}.{n}");
			}
			candidate
		})
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn loads_csv_with_header() {
		let csv = "名前,所属,テーマ\n田中,A社,AI\n鈴木,,IoT\n";
		let table = load_table("records.csv", csv.as_bytes()).unwrap();
		assert_eq!(table.columns(), ["名前", "所属", "テーマ"]);
		assert_eq!(table.len(), 2);
		assert_eq!(table.rows()[0][0], Cell::Text("田中".into()));
		assert_eq!(table.rows()[1][1], Cell::Empty);
	}

	#[test]
	fn strips_bom_and_pads_ragged_rows() {
		let csv = "\u{feff}person,org,theme,note\nA,B,C\n";
		let table = load_table("x.csv", csv.as_bytes()).unwrap();
		assert_eq!(table.columns()[0], "person");
		assert_eq!(table.rows()[0][3], Cell::Empty);
	}

	#[test]
	fn numeric_columns_become_numbers() {
		let csv = "id,person,org,theme\n1,A,B,C\n,D,E,F\n3.5,G,7,H\n";
		let table = load_table("x.csv", csv.as_bytes()).unwrap();
		assert_eq!(table.rows()[0][0], Cell::Number(1.0));
		assert_eq!(table.rows()[1][0], Cell::Empty);
		assert_eq!(table.rows()[2][0], Cell::Number(3.5));
		// mixed column stays text
		assert_eq!(table.rows()[2][2], Cell::Text("7".into()));
	}

	#[test]
	fn too_few_columns_is_rejected() {
		let err = load_table("x.csv", b"a,b\n1,2\n").unwrap_err();
		assert_eq!(err, LoadError::TooFewColumns(2));
	}

	#[test]
	fn empty_file_is_rejected() {
		assert_eq!(load_table("x.csv", b"").unwrap_err(), LoadError::Empty);
	}

	#[test]
	fn garbage_workbook_is_a_load_error() {
		let err = load_table("book.xlsx", b"not a zip archive").unwrap_err();
		assert!(matches!(err, LoadError::Workbook(_)));
	}

	#[test]
	fn header_names_are_made_unique() {
		let names = unique_column_names(vec!["a".into(), "".into(), "a".into(), "a".into()]);
		assert_eq!(names, ["a", "Unnamed: 1", "a.1", "a.2"]);
	}

	#[test]
	fn format_detection() {
		assert_eq!(Format::detect("Book.XLSX", b""), Format::Workbook);
		assert_eq!(Format::detect("data.csv", ZIP_MAGIC), Format::Csv);
		assert_eq!(Format::detect("upload", b"PK\x03\x04rest"), Format::Workbook);
		assert_eq!(Format::detect("upload", b"a,b,c"), Format::Csv);
	}
}
