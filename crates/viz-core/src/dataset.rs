// File: crates/viz-core/src/dataset.rs
// Summary: Raw scalar values and the immutable in-memory dataset shared by all charts.

use std::sync::atomic::{AtomicU64, Ordering};

/// A raw cell value as delivered by the ingestion collaborator.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Number(f64),
    Text(String),
    Empty,
}

impl Value {
    /// Parse this value as a finite float. Text is trimmed before parsing;
    /// non-finite numbers and unparseable text yield `None`.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) if n.is_finite() => Some(*n),
            Value::Number(_) => None,
            Value::Text(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
            Value::Empty => None,
        }
    }

    /// Label string for display. Empty values render as an empty string.
    pub fn display(&self) -> String {
        match self {
            Value::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    format!("{}", *n as i64)
                } else {
                    format!("{n}")
                }
            }
            Value::Text(s) => s.clone(),
            Value::Empty => String::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Value::Empty => true,
            Value::Text(s) => s.is_empty(),
            Value::Number(_) => false,
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self { Value::Number(n) }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        if s.is_empty() { Value::Empty } else { Value::Text(s.to_string()) }
    }
}

static NEXT_DATASET_ID: AtomicU64 = AtomicU64::new(1);

/// An ordered sequence of rows for one analysis session. Immutable once built;
/// row order is the canonical order used by every truncation/limit policy.
pub struct Dataset {
    id: u64,
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl Dataset {
    /// Build a dataset from column names and row-major values. Each dataset
    /// gets a fresh identity used by cache keys.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Self {
        Self {
            id: NEXT_DATASET_ID.fetch_add(1, Ordering::Relaxed),
            columns,
            rows,
        }
    }

    /// Identity of this dataset; distinct for every constructed instance.
    pub fn id(&self) -> u64 { self.id }

    pub fn columns(&self) -> &[String] { &self.columns }

    pub fn row_count(&self) -> usize { self.rows.len() }

    pub fn is_empty(&self) -> bool { self.rows.is_empty() }

    /// Index of a column by name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Cell at (row, column index). Short rows read as `Empty`.
    pub fn cell(&self, row: usize, col: usize) -> &Value {
        static EMPTY: Value = Value::Empty;
        self.rows.get(row).and_then(|r| r.get(col)).unwrap_or(&EMPTY)
    }

    /// Iterate a column's values in row order.
    pub fn column_values<'a>(&'a self, col: usize) -> impl Iterator<Item = &'a Value> + 'a {
        (0..self.rows.len()).map(move |r| self.cell(r, col))
    }
}
