use indexmap::IndexMap;
use rayon::prelude::*;
use std::collections::HashSet;

use super::parse::{is_date_value, parse_number};
use super::types::*;
use crate::error::AppError;
use crate::models::{cell, CellValue, Dataset, Row};

/// Turns an in-memory table into a [`DatasetProfile`].
///
/// Each column is classified from its first non-blank value only; the
/// rest of the column is then filtered against that classification. A
/// column of mixed representations is therefore typed by whatever shows
/// up first.
pub struct DatasetProfiler {
    preview_rows: usize,
}

impl DatasetProfiler {
    pub fn new(preview_rows: usize) -> Self {
        Self { preview_rows }
    }

    pub fn profile(&self, dataset: &Dataset) -> Result<DatasetProfile, AppError> {
        let start = std::time::Instant::now();
        let mut profile = infer_profile(&dataset.rows, &dataset.columns)?;
        profile.name = dataset.name.clone();
        profile.preview = dataset.rows.iter().take(self.preview_rows).cloned().collect();

        tracing::info!(
            "Profiled {} rows x {} columns in {:?} ({} numeric, {} categorical, {} date)",
            profile.row_count,
            profile.columns.len(),
            start.elapsed(),
            profile.numeric_columns.len(),
            profile.categorical_columns.len(),
            profile.date_columns.len()
        );
        Ok(profile)
    }
}

/// Classifies and summarizes every column of `rows`, in `columns` order.
pub fn infer_profile(rows: &[Row], columns: &[String]) -> Result<DatasetProfile, AppError> {
    if columns.is_empty() {
        return Err(AppError::EmptyDataset("dataset has no columns".to_string()));
    }
    if rows.is_empty() {
        return Err(AppError::EmptyDataset("dataset has no rows".to_string()));
    }

    // Parallel over columns; collect keeps column order.
    let column_profiles: Vec<ColumnProfile> = columns
        .par_iter()
        .map(|column| {
            let values: Vec<&CellValue> = rows
                .iter()
                .map(|row| cell(row, column))
                .collect();
            profile_column(&values)
        })
        .collect();

    let mut statistics = IndexMap::new();
    let mut classifications = IndexMap::new();
    let mut numeric_columns = Vec::new();
    let mut categorical_columns = Vec::new();
    let mut date_columns = Vec::new();

    for (name, column_profile) in columns.iter().zip(column_profiles) {
        tracing::debug!("Column {} classified as {:?}", name, column_profile.kind);
        match column_profile.kind {
            ColumnKind::Numeric => numeric_columns.push(name.clone()),
            ColumnKind::Date => date_columns.push(name.clone()),
            ColumnKind::Categorical => categorical_columns.push(name.clone()),
        }
        classifications.insert(name.clone(), column_profile.kind);
        if let Some(stats) = column_profile.statistics {
            statistics.insert(name.clone(), stats);
        }
    }

    Ok(DatasetProfile {
        name: None,
        columns: columns.to_vec(),
        row_count: rows.len(),
        statistics,
        numeric_columns,
        categorical_columns,
        date_columns,
        classifications,
        preview: Vec::new(),
    })
}

pub fn profile_column(values: &[&CellValue]) -> ColumnProfile {
    let Some(sample) = values.iter().copied().find(|v| !v.is_blank()) else {
        return ColumnProfile {
            kind: ColumnKind::Categorical,
            statistics: Some(ColumnStatistics::categorical(0)),
        };
    };

    if parse_number(sample).is_some() {
        return ColumnProfile {
            kind: ColumnKind::Numeric,
            statistics: numeric_summary(values),
        };
    }

    if is_date_value(sample) {
        return ColumnProfile {
            kind: ColumnKind::Date,
            statistics: None,
        };
    }

    let distinct: HashSet<_> = values
        .iter()
        .filter(|v| !v.is_blank())
        .map(|v| v.as_text())
        .collect();

    ColumnProfile {
        kind: ColumnKind::Categorical,
        statistics: Some(ColumnStatistics::categorical(distinct.len())),
    }
}

/// Min/max/avg over the parseable values; `None` when nothing parses.
fn numeric_summary(values: &[&CellValue]) -> Option<ColumnStatistics> {
    let (count, sum, min, max) = values
        .iter()
        .filter_map(|v| parse_number(v))
        .fold(
            (0usize, 0.0f64, f64::INFINITY, f64::NEG_INFINITY),
            |(count, sum, min, max), n| (count + 1, sum + n, min.min(n), max.max(n)),
        );

    if count == 0 {
        return None;
    }

    let avg = sum / count as f64;
    Some(ColumnStatistics::numeric(min, max, avg.is_finite().then_some(avg)))
}
