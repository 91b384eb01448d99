use std::io::Cursor;
use calamine::{open_workbook_from_rs, Data, DataType, Reader, Xlsx};
use chrono::Timelike;

use super::utils::unique_column_names;
use crate::error::AppError;
use crate::models::{CellValue, Dataset, Row};

/// Reads the first worksheet of an XLSX workbook; its first row is the header.
pub fn decode_xlsx(name: Option<String>, input: &[u8]) -> Result<Dataset, AppError> {
    let start = std::time::Instant::now();
    let cursor = Cursor::new(input);

    let mut workbook: Xlsx<_> = open_workbook_from_rs(cursor)
        .map_err(|e| {
            tracing::error!("Failed to open Excel file: {}", e);
            AppError::FileProcessingError(format!("Failed to open Excel file: {}", e))
        })?;

    let sheet_names = workbook.sheet_names().to_vec();
    tracing::info!("Found {} sheets: {:?}", sheet_names.len(), sheet_names);

    let sheet_name = sheet_names
        .first()
        .ok_or_else(|| AppError::EmptyDataset("Excel file contains no sheets".to_string()))?;

    let range = workbook
        .worksheet_range(sheet_name)
        .map_err(|e| AppError::FileProcessingError(format!("Failed to read worksheet {}: {}", sheet_name, e)))?;

    let mut sheet_rows = range.rows();
    let header_cells: Vec<String> = sheet_rows
        .next()
        .map(|row| row.iter().map(header_text).collect())
        .unwrap_or_default();
    let columns = unique_column_names(header_cells.iter().map(String::as_str));

    if columns.is_empty() {
        return Err(AppError::EmptyDataset(format!("Sheet {} is empty", sheet_name)));
    }

    let rows: Vec<Row> = sheet_rows
        .filter(|cells| cells.iter().any(|c| !matches!(c, Data::Empty)))
        .map(|cells| {
            columns
                .iter()
                .enumerate()
                .map(|(idx, column)| {
                    let value = cells.get(idx).map(cell_value).unwrap_or(CellValue::Empty);
                    (column.clone(), value)
                })
                .collect()
        })
        .collect();

    if rows.is_empty() {
        return Err(AppError::EmptyDataset(format!("No data found in sheet {}", sheet_name)));
    }

    tracing::info!(
        "Sheet {} decoded in {:?}: {} rows, {} columns",
        sheet_name,
        start.elapsed(),
        rows.len(),
        columns.len()
    );
    Ok(Dataset::new(name, columns, rows))
}

fn header_text(cell: &Data) -> String {
    match cell {
        Data::Empty | Data::Error(_) => String::new(),
        other => other.to_string(),
    }
}

fn cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Float(f) => CellValue::Number(*f),
        Data::String(s) if s.is_empty() => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Bool(b) => CellValue::Text(b.to_string()),
        Data::DateTime(_) => match cell.as_datetime() {
            Some(dt) if dt.time().num_seconds_from_midnight() == 0 => {
                CellValue::Text(dt.format("%Y-%m-%d").to_string())
            }
            Some(dt) => CellValue::Text(dt.format("%Y-%m-%d %H:%M:%S").to_string()),
            None => CellValue::Empty,
        },
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::Error(_) | Data::Empty => CellValue::Empty,
    }
}
