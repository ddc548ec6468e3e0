// File: crates/demo/src/main.rs
// Summary: Demo loads a CSV, builds a session with one chart per kind, renders PNGs and a PDF.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use viz_core::{ChartExporter, ChartKind, Dataset, ExportFormat, Session, Value};
use viz_render_skia::{render, RenderOptions};

fn main() -> Result<()> {
    env_logger::init();

    let raw = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "sample.csv".to_string());
    let path = PathBuf::from(&raw);
    let dataset = load_csv(&path)
        .with_context(|| format!("failed to load CSV '{}'", path.display()))?;
    println!(
        "Loaded {} rows, {} columns from {}",
        dataset.row_count(),
        dataset.columns().len(),
        path.display()
    );

    let mut session = Session::new(dataset).context("profiling failed")?;
    for p in session.profiles().iter() {
        println!("  column '{}': {:?}", p.name, p.kind);
    }

    let kinds = [
        ChartKind::Bar,
        ChartKind::Line,
        ChartKind::Pie,
        ChartKind::Scatter,
        ChartKind::WordCloud,
        ChartKind::Distribution,
        ChartKind::BoxPlot,
        ChartKind::Stats,
    ];
    let ids: Vec<_> = kinds.iter().map(|&k| (k, session.add_chart(k))).collect();

    session.globals_mut().show_density = true;

    let opts = RenderOptions::default();
    let mut exported_pdf = false;
    for (kind, id) in ids {
        let display = session
            .display_options(id)
            .context("chart disappeared from store")?;
        let outcome = session.result(id).map(Clone::clone);
        match outcome {
            Some(Ok(result)) => {
                let surface = render(kind, &result, &display, &opts)?;
                let png = surface
                    .export(ExportFormat::Raster)
                    .context("PNG export failed")?;
                let out = out_name(&path, kind.label(), "png");
                std::fs::write(&out, png)?;
                println!("Wrote {}", out.display());

                if !exported_pdf {
                    let pdf = surface
                        .export(ExportFormat::Document)
                        .context("PDF export failed")?;
                    let out = out_name(&path, kind.label(), "pdf");
                    std::fs::write(&out, pdf)?;
                    println!("Wrote {}", out.display());
                    exported_pdf = true;
                }
            }
            Some(Err(reason)) => {
                println!("Skipping {} chart: {reason}", kind.label());
            }
            None => println!("No chart with id {id:?}"),
        }
    }

    Ok(())
}

/// Produce output file name like target/out/chart_<stem>_<suffix>.<ext>
fn out_name(input: &Path, suffix: &str, ext: &str) -> PathBuf {
    let stem = input.file_stem().and_then(|s| s.to_str()).unwrap_or("chart");
    let mut out = PathBuf::from("target/out");
    std::fs::create_dir_all(&out).ok();
    out.push(format!("chart_{}_{}.{}", stem, suffix, ext));
    out
}

/// Load a headered CSV into a Dataset. Cells that parse as finite floats
/// become numbers, blanks become Empty, everything else stays text.
fn load_csv(path: &Path) -> Result<Dataset> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;

    let columns: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();
    let mut rows = Vec::new();
    for record in rdr.records() {
        let record = record?;
        let row = record
            .iter()
            .map(|cell| {
                let trimmed = cell.trim();
                if trimmed.is_empty() {
                    Value::Empty
                } else if let Ok(n) = trimmed.parse::<f64>() {
                    if n.is_finite() {
                        Value::Number(n)
                    } else {
                        Value::Text(cell.to_string())
                    }
                } else {
                    Value::Text(cell.to_string())
                }
            })
            .collect();
        rows.push(row);
    }
    Ok(Dataset::new(columns, rows))
}
