//! Format-agnostic raw table produced by the spreadsheet readers.

use crate::model::employee::number_to_text;

/// One spreadsheet cell as read from the source file.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Text rendering used when a cell lands in a text field.
    pub fn to_text(&self) -> Option<String> {
        match self {
            Self::Empty => None,
            Self::Text(text) => Some(text.clone()),
            Self::Number(number) => Some(number_to_text(*number)),
            Self::Bool(value) => Some(value.to_string()),
        }
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i64> for Cell {
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

/// Header row plus data rows, as read from the first sheet of a file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl RawTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<Cell>>) -> Self {
        Self { headers, rows }
    }

    /// True when there is no header or no data row.
    pub fn is_empty(&self) -> bool {
        self.headers.is_empty() || self.rows.is_empty()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Index of the first column whose label matches exactly.
    pub fn column_index(&self, label: &str) -> Option<usize> {
        self.headers.iter().position(|header| header == label)
    }

    pub fn has_column(&self, label: &str) -> bool {
        self.column_index(label).is_some()
    }

    /// Cell at `row`/`column`; short rows read as empty cells.
    pub fn cell(&self, row: usize, column: usize) -> &Cell {
        const EMPTY: &Cell = &Cell::Empty;
        self.rows
            .get(row)
            .and_then(|cells| cells.get(column))
            .unwrap_or(EMPTY)
    }
}

#[cfg(test)]
mod tests {
    use super::{Cell, RawTable};

    #[test]
    fn header_only_table_is_empty() {
        let table = RawTable::new(vec!["Nom".to_string()], Vec::new());
        assert!(table.is_empty());
        assert!(RawTable::default().is_empty());
    }

    #[test]
    fn column_lookup_is_case_sensitive() {
        let table = RawTable::new(vec!["Nom".to_string(), "Email".to_string()], Vec::new());
        assert_eq!(table.column_index("Email"), Some(1));
        assert_eq!(table.column_index("email"), None);
    }

    #[test]
    fn short_rows_read_as_empty() {
        let table = RawTable::new(
            vec!["Nom".to_string(), "Email".to_string()],
            vec![vec![Cell::from("Awa")]],
        );
        assert_eq!(table.cell(0, 0), &Cell::from("Awa"));
        assert!(table.cell(0, 1).is_empty());
        assert!(table.cell(5, 0).is_empty());
    }

    #[test]
    fn whole_numbers_render_without_fraction() {
        assert_eq!(Cell::Number(77123456.0).to_text().as_deref(), Some("77123456"));
        assert_eq!(Cell::Empty.to_text(), None);
    }
}
