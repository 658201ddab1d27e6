//! Nemenyi critical-value table and the critical-difference computation.
//!
//! The table holds the Studentized range statistic for infinite degrees of
//! freedom divided by sqrt(2), one row per model count up to 100, one column
//! per supported significance level. It is loaded once — from a caller-
//! supplied CSV or the embedded copy — and read-only afterwards; callers
//! construct it at startup and pass it by reference into the pipeline.

use std::collections::BTreeMap;
use std::io::Read;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Largest comparison the table supports.
pub const MAX_MODELS: usize = 100;

/// Significance levels with a column in the table.
pub const SUPPORTED_LEVELS: [f64; 3] = [0.01, 0.05, 0.10];

static BUILTIN_TABLE: &str = include_str!("../assets/nemenyi.csv");

/// Errors from loading or querying the table.
#[derive(Debug, Error)]
pub enum TableError {
    #[error("a comparison between more than {MAX_MODELS} models is not supported (got {requested})")]
    TooManyModels { requested: usize },

    #[error("the significance level '{formatted}' is not supported (use 0.01, 0.05 or 0.10)")]
    UnsupportedLevel { formatted: String },

    #[error("the critical-value table has no row for {models} models")]
    MissingRow { models: usize },

    #[error("reading critical-value table {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parsing critical-value table: {0}")]
    Csv(#[from] csv::Error),
}

#[derive(Debug, Deserialize)]
struct TableRow {
    #[serde(rename = "# models")]
    models: usize,
    #[serde(rename = "Nemenyi 0.01")]
    q01: f64,
    #[serde(rename = "Nemenyi 0.05")]
    q05: f64,
    #[serde(rename = "Nemenyi 0.10")]
    q10: f64,
}

/// `(model count, level) → critical value`, immutable once built.
#[derive(Debug, Clone)]
pub struct CriticalValueTable {
    rows: BTreeMap<usize, [f64; 3]>,
}

impl CriticalValueTable {
    /// The embedded reference table (model counts 1..=100).
    pub fn builtin() -> Self {
        Self::from_reader(BUILTIN_TABLE.as_bytes())
            .expect("embedded critical-value table is well-formed")
    }

    /// Load a table from a CSV file with the reference column layout.
    pub fn load(path: &Path) -> Result<Self, TableError> {
        let file = std::fs::File::open(path).map_err(|source| TableError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(file)
    }

    /// Parse a table from any reader producing the reference CSV layout.
    pub fn from_reader(reader: impl Read) -> Result<Self, TableError> {
        let mut rows = BTreeMap::new();
        let mut csv_reader = csv::Reader::from_reader(reader);
        for row in csv_reader.deserialize::<TableRow>() {
            let row = row?;
            rows.insert(row.models, [row.q01, row.q05, row.q10]);
        }
        Ok(CriticalValueTable { rows })
    }

    /// The critical value for a comparison between `models` competitors at
    /// `level`. Fails on model counts beyond the table's domain and on
    /// levels other than the three supported ones (matched after formatting
    /// to two decimal places).
    pub fn lookup(&self, models: usize, level: f64) -> Result<f64, TableError> {
        if models > MAX_MODELS {
            return Err(TableError::TooManyModels { requested: models });
        }
        let formatted = format!("{level:.2}");
        let column = match formatted.as_str() {
            "0.01" => 0,
            "0.05" => 1,
            "0.10" => 2,
            _ => return Err(TableError::UnsupportedLevel { formatted }),
        };
        let row = self
            .rows
            .get(&models)
            .ok_or(TableError::MissingRow { models })?;
        Ok(row[column])
    }

    /// Critical difference for `models` competitors over sample vectors of
    /// length `sample_len`: `q * sqrt(k (k+1) / (6 n))`.
    pub fn critical_difference(
        &self,
        models: usize,
        sample_len: usize,
        level: f64,
    ) -> Result<f64, TableError> {
        let q = self.lookup(models, level)?;
        let k = models as f64;
        let n = sample_len as f64;
        Ok(q * (k * (k + 1.0) / (6.0 * n)).sqrt())
    }
}
