//! CSV Data Loader Module
//! Reads the demographic CSV with Polars and converts rows into typed records.

use crate::data::{Dataset, Metric, Record};
use polars::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

const LABEL_COLUMN: &str = "state";
const ABBR_COLUMN: &str = "abbr";

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to load CSV: {0}")]
    CsvError(#[from] PolarsError),
    #[error("Missing column: {0}")]
    MissingColumn(String),
    #[error("No data loaded")]
    NoData,
}

/// Loads the dataset file once and keeps its origin for later exports.
pub struct DataLoader {
    dataset: Option<Dataset>,
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
            dataset: None,
            file_path: None,
        }
    }

    /// Read a CSV file into a [`Dataset`].
    ///
    /// Cells that do not parse as numbers become `NaN`. A zero-length file
    /// or a header without rows is [`LoaderError::NoData`].
    pub fn read_dataset(file_path: &Path) -> Result<Dataset, LoaderError> {
        if std::fs::metadata(file_path).is_ok_and(|m| m.len() == 0) {
            return Err(LoaderError::NoData);
        }
        let df = LazyCsvReader::new(file_path)
            .with_infer_schema_length(Some(10000))
            .with_ignore_errors(true)
            .finish()?
            .collect()?;
        debug!(rows = df.height(), path = %file_path.display(), "csv parsed");

        Self::records_from_frame(&df)
    }

    /// Convert a parsed frame into records. Extra columns are ignored.
    pub fn records_from_frame(df: &DataFrame) -> Result<Dataset, LoaderError> {
        let labels = Self::text_column(df, LABEL_COLUMN)?;
        let abbrs = Self::text_column(df, ABBR_COLUMN)?;

        let mut metrics: Vec<Vec<f64>> = Vec::with_capacity(Metric::ALL.len());
        for metric in Metric::ALL {
            metrics.push(Self::numeric_column(df, metric.column())?);
        }

        let records: Vec<Record> = (0..df.height())
            .map(|i| Record {
                state: labels[i].clone(),
                abbr: abbrs[i].clone(),
                poverty: metrics[0][i],
                age: metrics[1][i],
                income: metrics[2][i],
                healthcare: metrics[3][i],
                obesity: metrics[4][i],
                smokes: metrics[5][i],
            })
            .collect();

        Dataset::new(records).ok_or(LoaderError::NoData)
    }

    fn column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Column, LoaderError> {
        df.column(name)
            .map_err(|_| LoaderError::MissingColumn(name.to_string()))
    }

    fn text_column(df: &DataFrame, name: &str) -> Result<Vec<String>, LoaderError> {
        let as_str = Self::column(df, name)?.cast(&DataType::String)?;
        let ca = as_str.str()?;
        Ok((0..df.height())
            .map(|i| ca.get(i).unwrap_or_default().to_string())
            .collect())
    }

    fn numeric_column(df: &DataFrame, name: &str) -> Result<Vec<f64>, LoaderError> {
        let as_f64 = Self::column(df, name)?.cast(&DataType::Float64)?;
        let ca = as_f64.f64()?;
        Ok((0..df.height())
            .map(|i| ca.get(i).unwrap_or(f64::NAN))
            .collect())
    }

    pub fn get_dataset(&self) -> Option<&Dataset> {
        self.dataset.as_ref()
    }

    /// Path of the loaded dataset; exports are written next to it.
    pub fn get_file_path(&self) -> Option<&PathBuf> {
        self.file_path.as_ref()
    }

    /// Set dataset directly (used for async loading)
    pub fn set_dataset(&mut self, path: PathBuf, dataset: Dataset) {
        self.file_path = Some(path);
        self.dataset = Some(dataset);
    }
}
