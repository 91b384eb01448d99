//! File decoding in front of the profiler: raw upload bytes in, [`Dataset`] out.

pub mod delimited;
pub mod utils;
pub mod workbook;

pub use utils::load_file_from_url;

use crate::error::AppError;
use crate::models::Dataset;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Csv,
    Xlsx,
}

impl FileFormat {
    /// Picks a format from the file name, falling back to a MIME/type hint.
    pub fn detect(file_name: &str, type_hint: Option<&str>) -> Result<Self, AppError> {
        let lower = file_name.to_lowercase();
        if lower.ends_with(".csv") {
            return Ok(FileFormat::Csv);
        }
        if lower.ends_with(".xlsx") || lower.ends_with(".xlsm") {
            return Ok(FileFormat::Xlsx);
        }

        match type_hint.map(str::to_lowercase) {
            Some(hint) if hint.contains("csv") => Ok(FileFormat::Csv),
            Some(hint) if hint.contains("xlsx") || hint.contains("spreadsheetml") => {
                Ok(FileFormat::Xlsx)
            }
            _ => Err(AppError::UnsupportedFormat(format!(
                "{} (only CSV and XLSX files are supported)",
                file_name
            ))),
        }
    }
}

pub fn decode(file_name: &str, type_hint: Option<&str>, input: &[u8]) -> Result<Dataset, AppError> {
    let format = FileFormat::detect(file_name, type_hint)?;
    tracing::info!("Decoding {} as {:?} ({}KB)", file_name, format, input.len() / 1024);

    let name = Some(file_name.to_string());
    match format {
        FileFormat::Csv => delimited::decode_csv(name, input),
        FileFormat::Xlsx => workbook::decode_xlsx(name, input),
    }
}
