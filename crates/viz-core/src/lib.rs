// File: crates/viz-core/src/lib.rs
// Summary: Core library entry point; exports the aggregation and chart-configuration API.

pub mod dataset;
pub mod profile;
pub mod spec;
pub mod store;
pub mod stats;
pub mod engine;
pub mod cache;
pub mod palette;
pub mod export;
pub mod session;

pub use dataset::{Dataset, Value};
pub use profile::{ColumnKind, ColumnProfile, ColumnProfiles, ProfileError};
pub use spec::{BindingField, ChartId, ChartKind, ChartParams, ChartSpec, GlobalParams, ParamField};
pub use store::{ChartStore, Preset};
pub use engine::{aggregate, AggregateError, AggregateResult, ColumnStats, ErrorCategory};
pub use cache::{CacheStats, ResultCache};
pub use palette::{series_color, DisplayOptions, Rgba};
pub use export::{ChartExporter, ExportError, ExportFormat};
pub use session::Session;
