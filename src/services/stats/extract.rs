use crate::error::AppError;
use crate::models::Dataset;
use crate::services::profile::parse::parse_number;

/// Numeric values of one column paired with the labels of another.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnPair {
    pub values: Vec<f64>,
    pub labels: Vec<String>,
    /// Rows dropped because the numeric cell did not parse.
    pub skipped: usize,
}

/// Pulls `numeric_column` and `group_column` out of `dataset`, row by row.
///
/// Rows whose numeric cell does not parse are dropped from both sides so the
/// two vectors stay aligned. Blank labels become `""`.
pub fn extract_columns(
    dataset: &Dataset,
    numeric_column: &str,
    group_column: &str,
) -> Result<ColumnPair, AppError> {
    for column in [numeric_column, group_column] {
        if !dataset.has_column(column) {
            return Err(AppError::ColumnNotFound(column.to_string()));
        }
    }

    let mut pair = ColumnPair::default();
    let cells = dataset
        .column_values(numeric_column)
        .zip(dataset.column_values(group_column));
    for (numeric, label) in cells {
        match parse_number(numeric) {
            Some(value) => {
                pair.values.push(value);
                pair.labels.push(label.as_text().into_owned());
            }
            None => pair.skipped += 1,
        }
    }

    if pair.skipped > 0 {
        tracing::debug!(
            "Skipped {} rows without a numeric {} value",
            pair.skipped,
            numeric_column
        );
    }

    Ok(pair)
}
