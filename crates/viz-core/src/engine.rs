// File: crates/viz-core/src/engine.rs
// Summary: Pure type-dispatched aggregation: (Dataset, ChartSpec, GlobalParams) -> AggregateResult.

use std::collections::HashMap;

use crate::dataset::Dataset;
use crate::profile::{ColumnKind, ColumnProfiles};
use crate::spec::{effective, ChartKind, ChartSpec, GlobalParams};
use crate::stats;
use thiserror::Error;

/// Word clouds keep at most this many entries after sorting by frequency.
const TOP_WORDS: usize = 50;
/// Sample count for the density overlay across [min, max].
const DENSITY_SAMPLES: usize = 64;
/// Minimum valid values required for a quartile summary.
const MIN_QUARTILE_SAMPLES: usize = 5;

/// Broad class of an aggregation failure, for the presentation layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorCategory {
    /// A binding is unset or points at an unusable column; the user must fix it.
    Configuration,
    /// The dataset cannot satisfy the algorithm (empty, too few valid values).
    Data,
}

#[derive(Clone, Debug, Error, PartialEq)]
pub enum AggregateError {
    #[error("dataset has no rows")]
    EmptyDataset,
    #[error("chart requires a {role} column binding")]
    MissingBinding { role: &'static str },
    #[error("unknown column '{column}'")]
    UnknownColumn { column: String },
    #[error("column '{column}' is not {expected}")]
    InvalidColumn { column: String, expected: &'static str },
    #[error("column '{column}' has no numeric values")]
    NoNumericValues { column: String },
    #[error("need at least {needed} numeric values, found {found}")]
    InsufficientData { needed: usize, found: usize },
}

impl AggregateError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            AggregateError::MissingBinding { .. }
            | AggregateError::UnknownColumn { .. }
            | AggregateError::InvalidColumn { .. } => ErrorCategory::Configuration,
            AggregateError::EmptyDataset
            | AggregateError::NoNumericValues { .. }
            | AggregateError::InsufficientData { .. } => ErrorCategory::Data,
        }
    }
}

/// Numeric or categorical descriptive statistics for a single column.
#[derive(Clone, Debug, PartialEq)]
pub enum ColumnStats {
    Numeric {
        count: usize,
        mean: f64,
        median: f64,
        std_dev: f64,
        min: f64,
        max: f64,
        sum: f64,
    },
    Categorical {
        total: usize,
        distinct: usize,
        top_value: String,
        top_count: u32,
    },
}

/// Chart-ready aggregate; exactly one variant per chart kind.
#[derive(Clone, Debug, PartialEq)]
pub enum AggregateResult {
    CategorySeries {
        labels: Vec<String>,
        values: Vec<f64>,
    },
    Histogram {
        /// bin_edges.len() == counts.len() + 1
        bin_edges: Vec<f64>,
        counts: Vec<u32>,
        /// (x, scaled density) samples; present only when requested and
        /// the value range is non-degenerate.
        density: Option<Vec<(f64, f64)>>,
    },
    WordFrequency {
        /// (token, count) sorted by count descending, ties first-seen.
        entries: Vec<(String, u32)>,
    },
    QuartileSummary {
        min: f64,
        q1: f64,
        median: f64,
        q3: f64,
        max: f64,
    },
    DescriptiveStats(ColumnStats),
}

/// Compute the aggregate for one chart. Pure: identical inputs yield
/// identical results, and no numerical degenerate case escapes as a panic.
pub fn aggregate(
    dataset: &Dataset,
    profiles: &ColumnProfiles,
    spec: &ChartSpec,
    globals: &GlobalParams,
) -> Result<AggregateResult, AggregateError> {
    if dataset.is_empty() {
        return Err(AggregateError::EmptyDataset);
    }
    match spec.kind {
        ChartKind::Bar | ChartKind::Line | ChartKind::Pie | ChartKind::Scatter => {
            category_series(dataset, spec, globals)
        }
        ChartKind::WordCloud => word_frequency(dataset, profiles, spec, globals),
        ChartKind::Distribution => histogram(dataset, spec, globals),
        ChartKind::BoxPlot => quartile_summary(dataset, spec),
        ChartKind::Stats => descriptive_stats(dataset, spec),
    }
}

fn require<'a>(
    binding: &'a Option<String>,
    role: &'static str,
) -> Result<&'a str, AggregateError> {
    binding
        .as_deref()
        .filter(|s| !s.is_empty())
        .ok_or(AggregateError::MissingBinding { role })
}

fn column_index(dataset: &Dataset, name: &str) -> Result<usize, AggregateError> {
    dataset
        .column_index(name)
        .ok_or_else(|| AggregateError::UnknownColumn { column: name.to_string() })
}

/// Finite parses of a column, in row order. Unparseable cells are dropped.
fn finite_values(dataset: &Dataset, col: usize) -> Vec<f64> {
    dataset
        .column_values(col)
        .filter_map(|v| v.as_number())
        .collect()
}

fn category_series(
    dataset: &Dataset,
    spec: &ChartSpec,
    globals: &GlobalParams,
) -> Result<AggregateResult, AggregateError> {
    let x_col = column_index(dataset, require(&spec.x, "category")?)?;
    let y_col = column_index(dataset, require(&spec.y, "value")?)?;
    let eff = effective(spec, globals);
    let take = dataset.row_count().min(eff.row_limit);
    let mut labels = Vec::with_capacity(take);
    let mut values = Vec::with_capacity(take);
    for i in 0..take {
        let x = dataset.cell(i, x_col);
        labels.push(if x.is_empty() {
            format!("Row {}", i + 1)
        } else {
            x.display()
        });
        // Parse failures become 0.0 so labels and values stay row-aligned.
        values.push(dataset.cell(i, y_col).as_number().unwrap_or(0.0));
    }
    Ok(AggregateResult::CategorySeries { labels, values })
}

fn histogram(
    dataset: &Dataset,
    spec: &ChartSpec,
    globals: &GlobalParams,
) -> Result<AggregateResult, AggregateError> {
    let name = require(&spec.y, "value")?;
    let col = column_index(dataset, name)?;
    let values = finite_values(dataset, col);
    if values.is_empty() {
        return Err(AggregateError::NoNumericValues { column: name.to_string() });
    }
    let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let eff = effective(spec, globals);
    let bins = eff.bin_count as usize;
    let width = (max - min) / bins as f64;

    let mut counts = vec![0u32; bins];
    for &v in &values {
        // Degenerate range (min == max) puts everything in bin 0; a value
        // equal to max clamps into the last bin instead of overflowing.
        let idx = if width > 0.0 {
            (((v - min) / width).floor() as usize).min(bins - 1)
        } else {
            0
        };
        counts[idx] += 1;
    }

    let density = if eff.show_density && width > 0.0 {
        let bw = stats::silverman_bandwidth(&values);
        if bw > 0.0 {
            let scale = values.len() as f64 * width;
            Some(
                stats::linspace(min, max, DENSITY_SAMPLES)
                    .into_iter()
                    .map(|x| (x, stats::gaussian_kde(&values, bw, x) * scale))
                    .collect(),
            )
        } else {
            None
        }
    } else {
        None
    };

    Ok(AggregateResult::Histogram {
        bin_edges: stats::linspace(min, max, bins + 1),
        counts,
        density,
    })
}

fn word_frequency(
    dataset: &Dataset,
    profiles: &ColumnProfiles,
    spec: &ChartSpec,
    globals: &GlobalParams,
) -> Result<AggregateResult, AggregateError> {
    let name = require(&spec.text, "text")?;
    match profiles.kind_of(name) {
        Some(ColumnKind::Text) => {}
        Some(_) => {
            return Err(AggregateError::InvalidColumn {
                column: name.to_string(),
                expected: "a text column",
            })
        }
        None => {
            return Err(AggregateError::UnknownColumn { column: name.to_string() })
        }
    }
    let col = column_index(dataset, name)?;
    let eff = effective(spec, globals);
    let take = dataset.row_count().min(eff.word_limit);

    // Insertion-ordered counts so equal frequencies keep first-seen order.
    let mut order: Vec<(String, u32)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    for row in 0..take {
        let cell = dataset.cell(row, col).display();
        for raw in cell.split_whitespace() {
            let token: String = raw
                .chars()
                .filter(|c| c.is_ascii_alphanumeric())
                .map(|c| c.to_ascii_lowercase())
                .collect();
            if token.len() < eff.min_word_length {
                continue;
            }
            match index.get(&token) {
                Some(&i) => order[i].1 += 1,
                None => {
                    index.insert(token.clone(), order.len());
                    order.push((token, 1));
                }
            }
        }
    }
    // Stable sort: ties keep insertion order.
    order.sort_by(|a, b| b.1.cmp(&a.1));
    order.truncate(TOP_WORDS);
    Ok(AggregateResult::WordFrequency { entries: order })
}

fn quartile_summary(
    dataset: &Dataset,
    spec: &ChartSpec,
) -> Result<AggregateResult, AggregateError> {
    let name = require(&spec.y, "value")?;
    let col = column_index(dataset, name)?;
    let mut values = finite_values(dataset, col);
    if values.len() < MIN_QUARTILE_SAMPLES {
        return Err(AggregateError::InsufficientData {
            needed: MIN_QUARTILE_SAMPLES,
            found: values.len(),
        });
    }
    values.sort_unstable_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    Ok(AggregateResult::QuartileSummary {
        min: values[0],
        q1: stats::quantile_linear(&values, 0.25),
        median: stats::quantile_linear(&values, 0.5),
        q3: stats::quantile_linear(&values, 0.75),
        max: values[values.len() - 1],
    })
}

fn descriptive_stats(
    dataset: &Dataset,
    spec: &ChartSpec,
) -> Result<AggregateResult, AggregateError> {
    let name = require(&spec.y, "value")?;
    let col = column_index(dataset, name)?;
    let total = dataset.row_count();
    let mut numeric = finite_values(dataset, col);

    let summary = if numeric.len() as f64 / total as f64 > 0.5 {
        numeric.sort_unstable_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        ColumnStats::Numeric {
            count: numeric.len(),
            mean: stats::mean(&numeric),
            median: stats::quantile_linear(&numeric, 0.5),
            std_dev: stats::sample_std_dev(&numeric),
            min: numeric[0],
            max: numeric[numeric.len() - 1],
            sum: numeric.iter().sum(),
        }
    } else {
        // Insertion-ordered counts; the mode keeps first-seen order on ties.
        let mut order: Vec<(String, u32)> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();
        for v in dataset.column_values(col) {
            if v.is_empty() {
                continue;
            }
            let s = v.display();
            match index.get(&s) {
                Some(&i) => order[i].1 += 1,
                None => {
                    index.insert(s.clone(), order.len());
                    order.push((s, 1));
                }
            }
        }
        let mut top_value = String::new();
        let mut top_count = 0u32;
        for (s, c) in &order {
            // Strict comparison keeps the first-seen value on ties.
            if *c > top_count {
                top_value = s.clone();
                top_count = *c;
            }
        }
        ColumnStats::Categorical {
            total,
            distinct: order.len(),
            top_value,
            top_count,
        }
    };
    Ok(AggregateResult::DescriptiveStats(summary))
}
