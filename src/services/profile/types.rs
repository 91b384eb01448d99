use indexmap::IndexMap;
use serde::Serialize;

use crate::models::Row;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    Numeric,
    Date,
    Categorical,
}

/// Summary for one column. Numeric columns fill `min`/`max`/`avg`,
/// categorical columns fill `unique_values`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnStatistics {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unique_values: Option<usize>,
}

impl ColumnStatistics {
    /// `avg` is `None` when the running sum overflowed.
    pub fn numeric(min: f64, max: f64, avg: Option<f64>) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
            avg,
            unique_values: None,
        }
    }

    pub fn categorical(unique_values: usize) -> Self {
        Self {
            min: None,
            max: None,
            avg: None,
            unique_values: Some(unique_values),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnProfile {
    pub kind: ColumnKind,
    pub statistics: Option<ColumnStatistics>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetProfile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub columns: Vec<String>,
    pub row_count: usize,
    pub statistics: IndexMap<String, ColumnStatistics>,
    pub numeric_columns: Vec<String>,
    pub categorical_columns: Vec<String>,
    pub date_columns: Vec<String>,
    pub classifications: IndexMap<String, ColumnKind>,
    pub preview: Vec<Row>,
}

impl DatasetProfile {
    pub fn kind_of(&self, column: &str) -> Option<ColumnKind> {
        self.classifications.get(column).copied()
    }
}
