use std::fmt;

/// Strings a spreadsheet reader treats as a missing value.
const NA_MARKERS: &[&str] = &[
	"#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN", "<NA>",
	"N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// A single spreadsheet value.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Cell {
	/// Missing value (blank cell, empty CSV field).
	#[default]
	Empty,
	/// Non-empty text.
	Text(String),
	/// Integer or floating point value.
	Number(f64),
	/// Boolean value.
	Bool(bool),
	/// Dates, durations, formula errors and anything else, as rendered by the reader.
	Other(String),
}

impl Cell {
	/// Text cell, or [`Cell::Empty`] for the empty string.
	pub fn text(s: impl Into<String>) -> Self {
		let s = s.into();
		if s.is_empty() { Self::Empty } else { Self::Text(s) }
	}

	/// Text as read from a file: empty strings and NA markers become [`Cell::Empty`].
	pub fn from_raw(s: &str) -> Self {
		if NA_MARKERS.contains(&s) { Self::Empty } else { Self::text(s) }
	}

	/// Whether the cell counts as a missing value.
	pub fn is_missing(&self) -> bool {
		matches!(self, Self::Empty)
	}

	/// The text of a [`Cell::Text`], `None` for every other kind.
	pub fn as_text(&self) -> Option<&str> {
		match self {
			Self::Text(s) => Some(s),
			_ => None,
		}
	}
}

impl fmt::Display for Cell {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Empty => Ok(()),
			Self::Text(s) | Self::Other(s) => f.write_str(s),
			Self::Number(n) => write!(f, "{n}"),
			Self::Bool(b) => write!(f, "{b}"),
		}
	}
}

impl From<&calamine::Data> for Cell {
	fn from(value: &calamine::Data) -> Self {
		use calamine::{CellErrorType, Data};
		match value {
			Data::Empty => Self::Empty,
			Data::String(s) => Self::from_raw(s),
			Data::Int(i) => Self::Number(*i as f64),
			Data::Float(x) => Self::Number(*x),
			Data::Bool(b) => Self::Bool(*b),
			Data::Error(CellErrorType::NA) => Self::Empty,
			other => Self::Other(other.to_string()),
		}
	}
}
