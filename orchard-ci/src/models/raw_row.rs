//! Raw tabular input rows
//!
//! A row is an ordered mapping from column label to a loosely-typed cell
//! value, exactly as read from a delimited file or spreadsheet export.
//! Column order is preserved so audit output can mirror the source layout.

use serde::ser::{Serialize, SerializeMap, Serializer};

/// A single cell value as read from the source.
///
/// Spreadsheet exports may carry numbers where text is expected; keeping
/// the distinction lets the validator flag miscoded cells.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
}

impl CellValue {
    /// Borrow the cell as text, if it is text
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            CellValue::Number(_) => None,
        }
    }

    /// True for text cells that are empty after trimming
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Text(s) => s.trim().is_empty(),
            CellValue::Number(_) => false,
        }
    }

    /// Render the cell for display or tabular output.
    ///
    /// Whole numbers render without a trailing `.0` so an accession that a
    /// spreadsheet coerced to numeric round-trips as "1234", not "1234.0".
    pub fn to_display(&self) -> String {
        match self {
            CellValue::Text(s) => s.clone(),
            CellValue::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    format!("{}", *n as i64)
                } else {
                    format!("{}", n)
                }
            }
        }
    }
}

impl Serialize for CellValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            CellValue::Text(s) => serializer.serialize_str(s),
            CellValue::Number(n) => serializer.serialize_f64(*n),
        }
    }
}

/// One raw input row: column label → cell value, in source order.
/// Absent cells are simply not present in the mapping.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRow {
    cells: Vec<(String, CellValue)>,
}

impl RawRow {
    pub fn new() -> Self {
        Self { cells: Vec::new() }
    }

    /// Insert a cell, replacing any existing cell with the same label
    pub fn insert(&mut self, label: impl Into<String>, value: CellValue) {
        let label = label.into();
        if let Some(existing) = self.cells.iter_mut().find(|(l, _)| *l == label) {
            existing.1 = value;
        } else {
            self.cells.push((label, value));
        }
    }

    /// Look up a cell by exact label
    pub fn get(&self, label: &str) -> Option<&CellValue> {
        self.cells.iter().find(|(l, _)| l == label).map(|(_, v)| v)
    }

    /// First present, non-blank cell among the given labels
    pub fn get_first(&self, labels: &[String]) -> Option<&CellValue> {
        labels
            .iter()
            .filter_map(|label| self.get(label))
            .find(|v| !v.is_blank())
    }

    /// Column labels in source order
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|(l, _)| l.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CellValue)> {
        self.cells.iter().map(|(l, v)| (l.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Trimmed text of a cell, with blank collapsed to None.
    /// Numeric cells render via [`CellValue::to_display`].
    pub fn text(&self, label: &str) -> Option<String> {
        let value = self.get(label)?;
        let rendered = value.to_display();
        let trimmed = rendered.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }
}

impl Serialize for RawRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.cells.len()))?;
        for (label, value) in &self.cells {
            map.serialize_entry(label, value)?;
        }
        map.end()
    }
}

/// Convenience constructor for tests and callers building rows by hand
impl<S: Into<String>> FromIterator<(S, CellValue)> for RawRow {
    fn from_iter<T: IntoIterator<Item = (S, CellValue)>>(iter: T) -> Self {
        let mut row = RawRow::new();
        for (label, value) in iter {
            row.insert(label, value);
        }
        row
    }
}
