// File: crates/viz-core/src/profile.rs
// Summary: One-shot column classification (numeric / text / mixed) driving default bindings.

use crate::dataset::Dataset;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ProfileError {
    #[error("dataset has no rows to profile")]
    EmptyDataset,
}

/// Statistical classification of a column. A `Numeric` column may still
/// contain unparseable cells; per-value handling happens downstream.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnKind {
    Numeric,
    Text,
    Mixed,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ColumnProfile {
    pub name: String,
    pub kind: ColumnKind,
}

/// Profiles for every column of one dataset, in column order.
#[derive(Clone, Debug, Default)]
pub struct ColumnProfiles {
    profiles: Vec<ColumnProfile>,
}

/// Fraction of finite-parsing values above which a column counts as numeric.
const NUMERIC_FRACTION: f64 = 0.5;

impl ColumnProfiles {
    /// Classify every column of `dataset`. Runs once per dataset identity;
    /// callers hold onto the result for the session.
    pub fn profile(dataset: &Dataset) -> Result<Self, ProfileError> {
        if dataset.is_empty() {
            return Err(ProfileError::EmptyDataset);
        }
        let total = dataset.row_count() as f64;
        let profiles = dataset
            .columns()
            .iter()
            .enumerate()
            .map(|(idx, name)| {
                let numeric = dataset
                    .column_values(idx)
                    .filter(|v| v.as_number().is_some())
                    .count() as f64;
                let kind = if numeric / total > NUMERIC_FRACTION {
                    ColumnKind::Numeric
                } else {
                    match dataset.column_values(idx).find(|v| !v.is_empty()) {
                        Some(crate::dataset::Value::Text(_)) => ColumnKind::Text,
                        _ => ColumnKind::Mixed,
                    }
                };
                ColumnProfile { name: name.clone(), kind }
            })
            .collect();
        Ok(Self { profiles })
    }

    pub fn iter(&self) -> impl Iterator<Item = &ColumnProfile> {
        self.profiles.iter()
    }

    pub fn kind_of(&self, column: &str) -> Option<ColumnKind> {
        self.profiles.iter().find(|p| p.name == column).map(|p| p.kind)
    }

    /// First column name, regardless of kind.
    pub fn first_column(&self) -> Option<&str> {
        self.profiles.first().map(|p| p.name.as_str())
    }

    /// `i`-th numeric column (0-based among numeric columns only).
    pub fn nth_numeric(&self, i: usize) -> Option<&str> {
        self.profiles
            .iter()
            .filter(|p| p.kind == ColumnKind::Numeric)
            .nth(i)
            .map(|p| p.name.as_str())
    }

    pub fn first_numeric(&self) -> Option<&str> {
        self.nth_numeric(0)
    }

    pub fn first_text(&self) -> Option<&str> {
        self.profiles
            .iter()
            .find(|p| p.kind == ColumnKind::Text)
            .map(|p| p.name.as_str())
    }
}
