// File: crates/viz-core/src/spec.rs
// Summary: Chart configuration model: chart kinds, per-chart specs, global parameters.

use crate::profile::ColumnProfiles;
use serde::{Deserialize, Serialize};

/// Closed set of chart kinds. The aggregation engine matches exhaustively,
/// so adding a kind is a compile-time-checked change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChartKind {
    Bar,
    Line,
    Pie,
    Scatter,
    WordCloud,
    Distribution,
    BoxPlot,
    Stats,
}

impl ChartKind {
    pub fn label(&self) -> &'static str {
        match self {
            ChartKind::Bar => "bar",
            ChartKind::Line => "line",
            ChartKind::Pie => "pie",
            ChartKind::Scatter => "scatter",
            ChartKind::WordCloud => "wordcloud",
            ChartKind::Distribution => "distribution",
            ChartKind::BoxPlot => "boxplot",
            ChartKind::Stats => "stats",
        }
    }
}

/// Stable identity of one chart instance within a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ChartId(pub u32);

/// Which binding slot a partial update targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BindingField {
    X,
    Y,
    Text,
}

/// Which per-chart parameter a partial update targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParamField {
    BinCount(u32),
    WordLimit(usize),
    MinWordLength(usize),
    ShowDensity(bool),
}

/// Per-chart parameter overrides. `None` falls through to the global value.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChartParams {
    pub bin_count: Option<u32>,
    pub word_limit: Option<usize>,
    pub min_word_length: Option<usize>,
    pub show_density: Option<bool>,
}

/// Full configuration for one displayed chart.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChartSpec {
    pub id: ChartId,
    pub kind: ChartKind,
    /// Category / x-axis binding (bar, line, pie, scatter).
    pub x: Option<String>,
    /// Value binding; also the single column for distribution/boxplot/stats.
    pub y: Option<String>,
    /// Text binding for word clouds.
    pub text: Option<String>,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub params: ChartParams,
}

impl ChartSpec {
    pub fn new(id: ChartId, kind: ChartKind) -> Self {
        Self {
            id,
            kind,
            x: None,
            y: None,
            text: None,
            title: String::new(),
            x_label: String::new(),
            y_label: String::new(),
            params: ChartParams::default(),
        }
    }

    /// Reset bindings and labels to the type-appropriate defaults for the
    /// profiled columns. Unresolvable bindings are left unset.
    pub fn apply_defaults(&mut self, profiles: &ColumnProfiles) {
        let first = profiles.first_column().map(str::to_string);
        let num0 = profiles.nth_numeric(0).map(str::to_string);
        let num1 = profiles.nth_numeric(1).map(str::to_string);
        match self.kind {
            ChartKind::Bar | ChartKind::Line | ChartKind::Scatter => {
                self.x = num0.clone().or_else(|| first.clone());
                self.y = num1.or(num0).or(first);
            }
            ChartKind::Pie => {
                self.x = first.clone();
                self.y = num0.or(first);
            }
            ChartKind::WordCloud => {
                self.text = profiles.first_text().map(str::to_string).or(first);
            }
            ChartKind::Distribution | ChartKind::BoxPlot | ChartKind::Stats => {
                self.y = num0.or(first);
            }
        }
        self.x_label = self.x.clone().unwrap_or_default();
        self.y_label = self.y.clone().unwrap_or_default();
        self.title = match self.kind {
            ChartKind::WordCloud => {
                format!("Word Cloud: {}", self.text.as_deref().unwrap_or(""))
            }
            ChartKind::Distribution => {
                format!("Distribution: {}", self.y.as_deref().unwrap_or(""))
            }
            ChartKind::BoxPlot | ChartKind::Stats => {
                self.y.clone().unwrap_or_default()
            }
            _ => format!(
                "{} by {}",
                self.y.as_deref().unwrap_or(""),
                self.x.as_deref().unwrap_or("")
            ),
        };
    }

    pub fn set_binding(&mut self, field: BindingField, value: Option<String>) {
        match field {
            BindingField::X => self.x = value,
            BindingField::Y => self.y = value,
            BindingField::Text => self.text = value,
        }
    }

    pub fn set_param(&mut self, field: ParamField) {
        match field {
            ParamField::BinCount(n) => self.params.bin_count = Some(n),
            ParamField::WordLimit(n) => self.params.word_limit = Some(n),
            ParamField::MinWordLength(n) => self.params.min_word_length = Some(n),
            ParamField::ShowDensity(b) => self.params.show_density = Some(b),
        }
    }
}

/// Parameters shared across every applicable chart instance.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GlobalParams {
    /// Rows consumed by category-series charts.
    pub row_limit: usize,
    /// Rows consumed by word clouds.
    pub word_cloud_limit: usize,
    /// Tokens shorter than this are discarded.
    pub min_word_length: usize,
    /// Histogram bin count.
    pub bin_count: u32,
    /// Palette selector; display-only, never affects aggregation.
    pub high_contrast: bool,
    /// Gaussian density overlay on distributions.
    pub show_density: bool,
}

impl Default for GlobalParams {
    fn default() -> Self {
        Self {
            row_limit: 100,
            word_cloud_limit: 100,
            min_word_length: 3,
            bin_count: 10,
            high_contrast: false,
            show_density: false,
        }
    }
}

/// Effective parameters for one chart: per-chart overrides over globals.
pub(crate) struct Effective {
    pub row_limit: usize,
    pub word_limit: usize,
    pub min_word_length: usize,
    pub bin_count: u32,
    pub show_density: bool,
}

pub(crate) fn effective(spec: &ChartSpec, globals: &GlobalParams) -> Effective {
    Effective {
        row_limit: globals.row_limit,
        word_limit: spec.params.word_limit.unwrap_or(globals.word_cloud_limit),
        min_word_length: spec
            .params
            .min_word_length
            .unwrap_or(globals.min_word_length),
        bin_count: spec.params.bin_count.unwrap_or(globals.bin_count).max(1),
        show_density: spec.params.show_density.unwrap_or(globals.show_density),
    }
}
