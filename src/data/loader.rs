//! CSV Data Loader Module
//! Reads the region table with Polars and turns each row into a `Record`.

use crate::data::record::parse_number;
use crate::data::{Metric, Record};
use polars::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

/// Column holding the region abbreviation (drawn inside each circle)
pub const ABBR_COLUMN: &str = "abbr";
/// Column holding the region display name (tooltip title)
pub const STATE_COLUMN: &str = "state";

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to load CSV: {0}")]
    CsvError(#[from] PolarsError),
    #[error("Missing required column '{0}'")]
    MissingColumn(&'static str),
    #[error("No data loaded")]
    NoData,
}

/// Handles CSV file loading with Polars.
pub struct DataLoader {
    records: Vec<Record>,
    file_path: Option<PathBuf>,
}

impl Default for DataLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl DataLoader {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            file_path: None,
        }
    }

    /// Load a CSV file and keep its records.
    pub fn load_csv(&mut self, file_path: &Path) -> Result<&[Record], LoaderError> {
        let records = Self::read_records(file_path)?;
        if records.is_empty() {
            return Err(LoaderError::NoData);
        }
        self.file_path = Some(file_path.to_path_buf());
        self.records = records;
        Ok(&self.records)
    }

    /// Read every row of `file_path` as a record.
    ///
    /// All columns are read as text so that every metric goes through the
    /// same parse-as-number rule; a malformed cell becomes NaN.
    pub fn read_records(file_path: &Path) -> Result<Vec<Record>, LoaderError> {
        let df = LazyCsvReader::new(file_path)
            .with_infer_schema_length(Some(0))
            .with_has_header(true)
            .finish()?
            .collect()?;

        let records = Self::records_from_frame(&df)?;
        info!(
            "Loaded {} records from {}",
            records.len(),
            file_path.display()
        );
        Ok(records)
    }

    /// Convert a text DataFrame into records.
    pub fn records_from_frame(df: &DataFrame) -> Result<Vec<Record>, LoaderError> {
        let abbr = Self::text_column(df, ABBR_COLUMN)?
            .ok_or(LoaderError::MissingColumn(ABBR_COLUMN))?;
        let state = Self::text_column(df, STATE_COLUMN)?
            .ok_or(LoaderError::MissingColumn(STATE_COLUMN))?;

        let mut records: Vec<Record> = abbr
            .into_iter()
            .zip(state)
            .map(|(a, s)| Record::new(a.unwrap_or_default(), s.unwrap_or_default()))
            .collect();

        for metric in Metric::ALL {
            let Some(cells) = Self::text_column(df, metric.column())? else {
                warn!(
                    "Column '{}' not found; every {} value will be NaN",
                    metric.column(),
                    metric
                );
                continue;
            };
            for (record, cell) in records.iter_mut().zip(cells) {
                record.set(metric, parse_number(cell.as_deref()));
            }
        }

        Ok(records)
    }

    /// Cells of a column as optional strings, or `None` if the column is absent.
    fn text_column(df: &DataFrame, name: &str) -> Result<Option<Vec<Option<String>>>, LoaderError> {
        let Ok(column) = df.column(name) else {
            return Ok(None);
        };
        let as_text = column.cast(&DataType::String)?;
        let cells = as_text
            .str()?
            .into_iter()
            .map(|v| v.map(|s| s.trim_matches('"').to_string()))
            .collect();
        Ok(Some(cells))
    }

    /// Get the loaded records.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Get the number of loaded records.
    pub fn get_row_count(&self) -> usize {
        self.records.len()
    }

    /// Get file path.
    pub fn get_file_path(&self) -> Option<&PathBuf> {
        self.file_path.as_ref()
    }

    /// Set records directly (used for async loading)
    pub fn set_records(&mut self, path: PathBuf, records: Vec<Record>) {
        self.file_path = Some(path);
        self.records = records;
    }
}
