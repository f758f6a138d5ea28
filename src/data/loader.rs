//! CSV loading for the sales dataset.
//!
//! The dataset is read once and held immutable for the lifetime of the
//! process. There is no implicit module-level cache: callers create a
//! [`Dataset`] explicitly and pass its frame around; reloading means
//! constructing a new `Dataset`.

use polars::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// Relative path the dashboard binary reads from.
pub const DEFAULT_DATA_PATH: &str = "data/cleaned_data.csv";

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("failed to load {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: PolarsError,
    },
}

/// The loaded sales table. Read-only after construction.
#[derive(Debug)]
pub struct Dataset {
    df: DataFrame,
    path: Option<PathBuf>,
}

impl Dataset {
    /// Load a CSV with schema inference. Malformed cells in otherwise
    /// numeric columns are tolerated and surface as nulls.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref().to_path_buf();

        let df = LazyCsvReader::new(path.clone())
            .with_infer_schema_length(Some(10000))
            .with_ignore_errors(true)
            .finish()
            .and_then(|lazy| lazy.collect())
            .map_err(|source| LoadError::Csv {
                path: path.clone(),
                source,
            })?;

        info!(
            rows = df.height(),
            columns = df.width(),
            path = %path.display(),
            "loaded sales dataset"
        );

        Ok(Self {
            df,
            path: Some(path),
        })
    }

    /// Wrap an already-built frame. Used by tests and by callers that
    /// source their table elsewhere.
    pub fn from_frame(df: DataFrame) -> Self {
        Self { df, path: None }
    }

    pub fn frame(&self) -> &DataFrame {
        &self.df
    }

    pub fn path(&self) -> Option<&PathBuf> {
        self.path.as_ref()
    }

    pub fn row_count(&self) -> usize {
        self.df.height()
    }

    /// All column names, in table order.
    pub fn columns(&self) -> Vec<String> {
        self.df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    /// Names of columns with a numeric dtype after inference.
    pub fn numeric_columns(&self) -> Vec<String> {
        self.df
            .get_columns()
            .iter()
            .filter(|col| {
                matches!(
                    col.dtype(),
                    DataType::Float32
                        | DataType::Float64
                        | DataType::Int8
                        | DataType::Int16
                        | DataType::Int32
                        | DataType::Int64
                        | DataType::UInt8
                        | DataType::UInt16
                        | DataType::UInt32
                        | DataType::UInt64
                )
            })
            .map(|col| col.name().to_string())
            .collect()
    }
}
