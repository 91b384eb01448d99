use super::utils::unique_column_names;
use crate::error::AppError;
use crate::models::{CellValue, Dataset, Row};

/// Reads CSV text with a header record. Every non-empty field stays text;
/// typing is left to the profiler.
pub fn decode_csv(name: Option<String>, input: &[u8]) -> Result<Dataset, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(input);

    let headers = reader.headers()?.clone();
    let columns = unique_column_names(headers.iter());
    if columns.is_empty() {
        return Err(AppError::EmptyDataset("CSV has no header row".to_string()));
    }

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        if record.iter().all(|field| field.trim().is_empty()) {
            continue;
        }

        let row: Row = columns
            .iter()
            .enumerate()
            .map(|(idx, column)| {
                let value = match record.get(idx) {
                    Some(field) if !field.is_empty() => CellValue::Text(field.to_string()),
                    _ => CellValue::Empty,
                };
                (column.clone(), value)
            })
            .collect();
        rows.push(row);
    }

    if rows.is_empty() {
        return Err(AppError::EmptyDataset("No data found in CSV".to_string()));
    }

    tracing::info!("CSV decoded: {} rows, {} columns", rows.len(), columns.len());
    Ok(Dataset::new(name, columns, rows))
}
