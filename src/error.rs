//! Error types for loading spreadsheets and running an analysis.

use thiserror::Error;

/// Failure while turning an uploaded file into a [`Table`](crate::table::Table).
///
/// Library errors are kept as rendered messages so the error can be cloned
/// into a signal and shown on the page.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LoadError {
	/// The browser could not hand over the file contents.
	#[error("could not read file: {0}")]
	Read(String),

	/// The workbook container or sheet XML is malformed.
	#[error("could not parse workbook: {0}")]
	Workbook(String),

	/// The CSV payload is malformed (bad quoting, invalid UTF-8, ...).
	#[error("could not parse CSV: {0}")]
	Csv(String),

	/// The workbook has no worksheet, or the sheet has no header row.
	#[error("the file contains no data")]
	Empty,

	/// Three designated columns are required.
	#[error("expected at least 3 columns, found {0}")]
	TooFewColumns(usize),
}

impl From<csv::Error> for LoadError {
	fn from(err: csv::Error) -> Self {
		Self::Csv(err.to_string())
	}
}

impl From<calamine::XlsxError> for LoadError {
	fn from(err: calamine::XlsxError) -> Self {
		Self::Workbook(err.to_string())
	}
}

/// Failure while preparing rows for the graph.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
	/// A column picker names a column the table does not have.
	#[error("column not found: {0}")]
	UnknownColumn(String),
}
