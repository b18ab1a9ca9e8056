use std::collections::BTreeSet;
use std::fmt;

use chrono::{Datelike, NaiveDate};

// ---------------------------------------------------------------------------
// Filterable dimensions
// ---------------------------------------------------------------------------

/// Dimension key for the shipping-state column.
pub const DIM_STATE: &str = "state";
/// Dimension key for the product-category column.
pub const DIM_CATEGORY: &str = "category";

/// The filterable dimensions, in the order the UI presents them.
pub const DIMENSIONS: [&str; 2] = [DIM_STATE, DIM_CATEGORY];

// ---------------------------------------------------------------------------
// MonthBucket – (year, month) grouping key
// ---------------------------------------------------------------------------

/// Calendar month a record falls in, day-of-month ignored.
/// `Ord` is chronological (year first, then month), so a `BTreeMap` keyed by
/// `MonthBucket` iterates in time order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthBucket {
    pub year: i32,
    pub month: u32,
}

impl MonthBucket {
    pub fn from_date(date: NaiveDate) -> Self {
        MonthBucket {
            year: date.year(),
            month: date.month(),
        }
    }
}

impl fmt::Display for MonthBucket {
    /// Human-readable `YYYY-MM` label.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

// ---------------------------------------------------------------------------
// SalesRecord – one row of the source table
// ---------------------------------------------------------------------------

/// A single order (one row of the source CSV).
#[derive(Debug, Clone, PartialEq)]
pub struct SalesRecord {
    pub order_date: NaiveDate,
    pub state: String,
    pub category: String,
    /// Sale amount in currency units; zero or negative for refunds.
    pub amount: f64,
    /// Derived from `order_date` at load time, used only for grouping.
    pub month: MonthBucket,
}

impl SalesRecord {
    pub fn new(order_date: NaiveDate, state: String, category: String, amount: f64) -> Self {
        SalesRecord {
            month: MonthBucket::from_date(order_date),
            order_date,
            state,
            category,
            amount,
        }
    }

    /// Look up this record's value for a named dimension.
    /// Unknown dimension names yield `None`.
    pub fn dimension_value(&self, dimension: &str) -> Option<&str> {
        match dimension {
            DIM_STATE => Some(&self.state),
            DIM_CATEGORY => Some(&self.category),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// SalesDataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full parsed dataset with pre-computed unique-value indices.
/// Immutable once built; filtering works on row indices into `records`.
#[derive(Debug, Clone)]
pub struct SalesDataset {
    /// All orders, in file order.
    pub records: Vec<SalesRecord>,
    /// Sorted unique shipping states.
    pub states: BTreeSet<String>,
    /// Sorted unique product categories.
    pub categories: BTreeSet<String>,
}

impl SalesDataset {
    /// Build the unique-value indices from the loaded records.
    pub fn from_records(records: Vec<SalesRecord>) -> Self {
        let mut states = BTreeSet::new();
        let mut categories = BTreeSet::new();
        for rec in &records {
            states.insert(rec.state.clone());
            categories.insert(rec.category.clone());
        }
        SalesDataset {
            records,
            states,
            categories,
        }
    }

    /// Unique values for a named dimension, `None` for unknown names.
    pub fn unique_values(&self, dimension: &str) -> Option<&BTreeSet<String>> {
        match dimension {
            DIM_STATE => Some(&self.states),
            DIM_CATEGORY => Some(&self.categories),
            _ => None,
        }
    }

    /// Number of orders.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
