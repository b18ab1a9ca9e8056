use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::model::{SalesDataset, SalesRecord};

// ---------------------------------------------------------------------------
// Column names (the source report's header row)
// ---------------------------------------------------------------------------

pub const COL_DATE: &str = "Date";
pub const COL_STATE: &str = "State";
pub const COL_CATEGORY: &str = "Category";
pub const COL_AMOUNT: &str = "Sale Amount";

pub const REQUIRED_COLUMNS: [&str; 4] = [COL_DATE, COL_STATE, COL_CATEGORY, COL_AMOUNT];

/// Date layouts accepted on input. Export always writes the first one.
const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%m/%d/%Y", "%m-%d-%y"];

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Fatal load failures. Surfaced to the user as-is; nothing is retried and no
/// row is ever silently dropped.
#[derive(Debug, Error)]
pub enum DataLoadError {
    #[error("failed to open {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),

    #[error("row {row}: unparsable date '{value}'")]
    BadDate { row: usize, value: String },

    #[error("row {row}: unparsable amount '{value}'")]
    BadAmount { row: usize, value: String },
}

// ---------------------------------------------------------------------------
// CSV parsing
// ---------------------------------------------------------------------------

/// One CSV row as it appears on the wire. Date and amount stay text here so
/// parse failures can report the row number and offending value.
#[derive(Debug, Serialize, Deserialize)]
pub struct RawRow {
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "State")]
    pub state: String,
    #[serde(rename = "Category")]
    pub category: String,
    #[serde(rename = "Sale Amount")]
    pub amount: String,
}

/// Load a sales dataset from a CSV file.
pub fn load_csv(path: &Path) -> Result<SalesDataset, DataLoadError> {
    let file = std::fs::File::open(path).map_err(|source| DataLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    read_csv(file)
}

/// Parse a sales dataset from any reader. Header row required.
pub fn read_csv<R: io::Read>(reader: R) -> Result<SalesDataset, DataLoadError> {
    let mut csv_reader = csv::Reader::from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    for col in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == col) {
            return Err(DataLoadError::MissingColumn(col));
        }
    }

    let mut records = Vec::new();
    for (row_no, result) in csv_reader.deserialize::<RawRow>().enumerate() {
        let raw = result?;

        let order_date = parse_date(&raw.date).ok_or_else(|| DataLoadError::BadDate {
            row: row_no,
            value: raw.date.clone(),
        })?;
        let amount: f64 = raw
            .amount
            .trim()
            .parse()
            .map_err(|_| DataLoadError::BadAmount {
                row: row_no,
                value: raw.amount.clone(),
            })?;

        records.push(SalesRecord::new(order_date, raw.state, raw.category, amount));
    }

    Ok(SalesDataset::from_records(records))
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
}

// ---------------------------------------------------------------------------
// DatasetCache – memoized loader
// ---------------------------------------------------------------------------

/// Memoizes the last loaded file so repeated loads of the same path within a
/// session return the in-memory table without touching storage.
/// Single-threaded use; the UI shell serializes interactions.
#[derive(Debug, Default)]
pub struct DatasetCache {
    entry: Option<(PathBuf, Arc<SalesDataset>)>,
}

impl DatasetCache {
    /// Load `path`, reusing the cached dataset when the path matches the
    /// previous load.
    pub fn load(&mut self, path: &Path) -> Result<Arc<SalesDataset>, DataLoadError> {
        if let Some((cached_path, dataset)) = &self.entry {
            if cached_path == path {
                log::debug!("cache hit for {}", path.display());
                return Ok(Arc::clone(dataset));
            }
        }

        let dataset = Arc::new(load_csv(path)?);
        self.entry = Some((path.to_path_buf(), Arc::clone(&dataset)));
        Ok(dataset)
    }

    /// Drop the cached dataset; the next `load` re-reads storage.
    pub fn invalidate(&mut self) {
        self.entry = None;
    }
}
