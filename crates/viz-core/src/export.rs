// File: crates/viz-core/src/export.rs
// Summary: Export boundary trait; implemented by the rendering collaborator.

use thiserror::Error;

/// Encoded output format for a chart snapshot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    /// Raster image bytes (PNG).
    Raster,
    /// Paginated document bytes (PDF).
    Document,
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("rendering surface unavailable")]
    SurfaceUnavailable,
    #[error("encoding failed: {0}")]
    Encoding(String),
}

/// Implemented by an already-rendered visual surface. The core never
/// computes pixels; it only invokes export after rendering has occurred.
/// A failed export produces no partial output.
pub trait ChartExporter {
    fn export(&self, format: ExportFormat) -> Result<Vec<u8>, ExportError>;
}
