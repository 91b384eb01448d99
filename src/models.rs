use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// A single scalar cell as handed over by the decoder or a JSON client.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Number(f64),
    Text(String),
    #[default]
    Empty,
}

impl CellValue {
    /// True for absent cells and text that is empty once trimmed.
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.trim().is_empty(),
            CellValue::Number(_) => false,
        }
    }

    /// String coercion used for value identity and group labels.
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            CellValue::Number(n) => Cow::Owned(n.to_string()),
            CellValue::Text(s) => Cow::Borrowed(s.as_str()),
            CellValue::Empty => Cow::Borrowed(""),
        }
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

pub type Row = IndexMap<String, CellValue>;

static EMPTY_CELL: CellValue = CellValue::Empty;

/// Reads one cell from a row; a missing column reads as `Empty`.
pub fn cell<'a>(row: &'a Row, column: &str) -> &'a CellValue {
    row.get(column).unwrap_or(&EMPTY_CELL)
}

/// An in-memory table: ordered, unique column names plus the rows.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
}

impl Dataset {
    pub fn new(name: Option<String>, columns: Vec<String>, rows: Vec<Row>) -> Self {
        Self { name, columns, rows }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    /// Iterates one column top to bottom; missing cells read as `Empty`.
    pub fn column_values<'a>(&'a self, column: &'a str) -> impl Iterator<Item = &'a CellValue> + 'a {
        self.rows.iter().map(move |row| cell(row, column))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_mixed_scalars() {
        let row: Row = serde_json::from_str(r#"{"a": 1.5, "b": "x", "c": null, "d": ""}"#).unwrap();
        assert_eq!(row["a"], CellValue::Number(1.5));
        assert_eq!(row["b"], CellValue::Text("x".into()));
        assert_eq!(row["c"], CellValue::Empty);
        assert!(row["d"].is_blank());
        assert_eq!(row.keys().collect::<Vec<_>>(), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn whitespace_only_text_is_blank() {
        assert!(CellValue::from(" ").is_blank());
        assert!(CellValue::from("\t\n").is_blank());
        assert!(CellValue::default().is_blank());
        assert!(!CellValue::from(" 5 ").is_blank());
        assert!(!CellValue::Number(0.0).is_blank());
    }

    #[test]
    fn coerces_numbers_to_text() {
        assert_eq!(CellValue::Number(5.0).as_text(), "5");
        assert_eq!(CellValue::Number(2.5).as_text(), "2.5");
        assert_eq!(CellValue::Empty.as_text(), "");
    }

    #[test]
    fn missing_cells_read_as_empty() {
        let mut row = Row::new();
        row.insert("a".into(), CellValue::Number(1.0));
        let dataset = Dataset::new(None, vec!["a".into(), "b".into()], vec![row]);
        let values: Vec<_> = dataset.column_values("b").collect();
        assert_eq!(values, vec![&CellValue::Empty]);
    }
}
