// File: crates/viz-render-skia/src/lib.rs
// Summary: Draws AggregateResult values onto Skia CPU raster surfaces; PNG/PDF export.

use anyhow::Result;
use skia_safe as skia;

use viz_core::engine::{AggregateResult, ColumnStats};
use viz_core::export::{ChartExporter, ExportError, ExportFormat};
use viz_core::palette::{series_color, DisplayOptions, Rgba};
use viz_core::spec::ChartKind;

/// Default surface width in pixels.
pub const WIDTH: i32 = 1024;
/// Default surface height in pixels.
pub const HEIGHT: i32 = 640;

/// Screen margins, in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Insets {
    pub left: u32,
    pub right: u32,
    pub top: u32,
    pub bottom: u32,
}

impl Insets {
    pub const fn new(left: u32, right: u32, top: u32, bottom: u32) -> Self {
        Self { left, right, top, bottom }
    }
}

impl Default for Insets {
    fn default() -> Self {
        Self::new(72, 24, 40, 56)
    }
}

pub struct RenderOptions {
    pub width: i32,
    pub height: i32,
    pub insets: Insets,
    pub draw_labels: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: WIDTH,
            height: HEIGHT,
            insets: Insets::default(),
            draw_labels: true,
        }
    }
}

struct Colors {
    background: skia::Color,
    grid: skia::Color,
    axis: skia::Color,
    text: skia::Color,
}

fn colors(high_contrast: bool) -> Colors {
    if high_contrast {
        Colors {
            background: skia::Color::from_argb(255, 0, 0, 0),
            grid: skia::Color::from_argb(255, 0x22, 0x22, 0x22),
            axis: skia::Color::from_argb(255, 0xff, 0xff, 0xff),
            text: skia::Color::from_argb(255, 0xff, 0xff, 0xff),
        }
    } else {
        Colors {
            background: skia::Color::from_argb(255, 250, 250, 252),
            grid: skia::Color::from_argb(255, 230, 230, 235),
            axis: skia::Color::from_argb(255, 60, 60, 70),
            text: skia::Color::from_argb(255, 20, 20, 30),
        }
    }
}

fn to_skia(c: Rgba) -> skia::Color {
    skia::Color::from_argb(c.a, c.r, c.g, c.b)
}

/// A rendered chart: the finished raster image plus its dimensions.
/// Implements the core's export boundary.
pub struct ChartSurface {
    image: skia::Image,
    width: i32,
    height: i32,
}

impl ChartExporter for ChartSurface {
    fn export(&self, format: ExportFormat) -> Result<Vec<u8>, ExportError> {
        match format {
            ExportFormat::Raster => {
                #[allow(deprecated)]
                let data = self
                    .image
                    .encode_to_data(skia::EncodedImageFormat::PNG)
                    .ok_or_else(|| ExportError::Encoding("PNG encode failed".into()))?;
                Ok(data.as_bytes().to_vec())
            }
            ExportFormat::Document => {
                let mut bytes: Vec<u8> = Vec::new();
                {
                    let document = skia::pdf::new_document(&mut bytes, None);
                    let mut page = document
                        .begin_page((self.width as f32, self.height as f32), None);
                    page.canvas().draw_image(&self.image, (0, 0), None);
                    page.end_page().close();
                }
                if bytes.is_empty() {
                    return Err(ExportError::Encoding("PDF document was empty".into()));
                }
                Ok(bytes)
            }
        }
    }
}

/// Render one aggregate to a finished surface. The chart kind selects the
/// mark type for category series (bars, line, pie slices, points).
pub fn render(
    kind: ChartKind,
    result: &AggregateResult,
    display: &DisplayOptions,
    opts: &RenderOptions,
) -> Result<ChartSurface> {
    let mut surface = skia::surfaces::raster_n32_premul((opts.width, opts.height))
        .ok_or_else(|| anyhow::anyhow!("failed to create raster surface"))?;
    let canvas = surface.canvas();
    let c = colors(display.high_contrast);
    canvas.clear(c.background);

    let l = opts.insets.left as i32;
    let r = opts.width - opts.insets.right as i32;
    let t = opts.insets.top as i32;
    let b = opts.height - opts.insets.bottom as i32;

    match result {
        AggregateResult::CategorySeries { labels, values } => {
            draw_grid(canvas, l, t, r, b, &c);
            draw_axes(canvas, l, t, r, b, &c);
            match kind {
                ChartKind::Pie => draw_pie(canvas, l, t, r, b, values, display.high_contrast),
                ChartKind::Line => {
                    draw_line(canvas, l, t, r, b, values, display.high_contrast)
                }
                ChartKind::Scatter => {
                    draw_scatter(canvas, l, t, r, b, values, display.high_contrast)
                }
                _ => draw_bars(canvas, l, t, r, b, values, display.high_contrast),
            }
            let _ = labels; // category labels are drawn only in expanded views
        }
        AggregateResult::Histogram { bin_edges, counts, density } => {
            draw_grid(canvas, l, t, r, b, &c);
            draw_axes(canvas, l, t, r, b, &c);
            draw_histogram(canvas, l, t, r, b, bin_edges, counts, display.high_contrast);
            if let Some(curve) = density {
                draw_density(canvas, l, t, r, b, bin_edges, counts, curve, display.high_contrast);
            }
        }
        AggregateResult::WordFrequency { entries } => {
            draw_word_cloud(canvas, l, t, r, b, entries, display.high_contrast);
        }
        AggregateResult::QuartileSummary { min, q1, median, q3, max } => {
            draw_grid(canvas, l, t, r, b, &c);
            draw_axes(canvas, l, t, r, b, &c);
            draw_box_plot(canvas, l, t, r, b, *min, *q1, *median, *q3, *max, display.high_contrast);
        }
        AggregateResult::DescriptiveStats(stats) => {
            draw_stats_panel(canvas, l, t, stats, &c);
        }
    }

    if opts.draw_labels {
        draw_titles(canvas, l, t, r, b, display, &c);
    }

    let image = surface.image_snapshot();
    Ok(ChartSurface {
        image,
        width: opts.width,
        height: opts.height,
    })
}

// ---- helpers ----------------------------------------------------------------

fn draw_grid(canvas: &skia::Canvas, l: i32, t: i32, r: i32, b: i32, c: &Colors) {
    let mut paint = skia::Paint::default();
    paint.set_color(c.grid);
    paint.set_anti_alias(true);
    paint.set_stroke_width(1.0);

    for i in 0..=10 {
        let x = l as f32 + (r - l) as f32 * i as f32 / 10.0;
        canvas.draw_line((x, t as f32), (x, b as f32), &paint);
    }
    for i in 0..=6 {
        let y = t as f32 + (b - t) as f32 * i as f32 / 6.0;
        canvas.draw_line((l as f32, y), (r as f32, y), &paint);
    }
}

fn draw_axes(canvas: &skia::Canvas, l: i32, t: i32, r: i32, b: i32, c: &Colors) {
    let mut paint = skia::Paint::default();
    paint.set_color(c.axis);
    paint.set_anti_alias(true);
    paint.set_stroke_width(1.5);
    canvas.draw_line((l as f32, b as f32), (r as f32, b as f32), &paint);
    canvas.draw_line((l as f32, t as f32), (l as f32, b as f32), &paint);
}

fn draw_titles(
    canvas: &skia::Canvas,
    l: i32,
    t: i32,
    r: i32,
    b: i32,
    display: &DisplayOptions,
    c: &Colors,
) {
    let mut paint = skia::Paint::default();
    paint.set_color(c.text);
    let mut font = skia::Font::default();
    font.set_size(16.0);
    canvas.draw_str(&display.title, (l as f32, t as f32 - 14.0), &font, &paint);
    font.set_size(13.0);
    canvas.draw_str(&display.x_label, (r as f32 - 80.0, b as f32 + 24.0), &font, &paint);
    canvas.draw_str(&display.y_label, (l as f32 - 56.0, t as f32 + 14.0), &font, &paint);
}

/// Y range covering the values and the zero baseline.
fn value_range(values: &[f64]) -> (f64, f64) {
    let mut lo = 0.0f64;
    let mut hi = 0.0f64;
    for &v in values {
        lo = lo.min(v);
        hi = hi.max(v);
    }
    if (hi - lo).abs() < 1e-9 {
        hi = lo + 1.0;
    }
    (lo, hi)
}

fn draw_bars(
    canvas: &skia::Canvas,
    l: i32,
    t: i32,
    r: i32,
    b: i32,
    values: &[f64],
    high_contrast: bool,
) {
    if values.is_empty() {
        return;
    }
    let (lo, hi) = value_range(values);
    let span = (hi - lo).max(1e-9);
    let n = values.len() as f32;
    let slot = (r - l) as f32 / n;
    let bar = (slot * 0.8).max(1.0);

    let mut paint = skia::Paint::default();
    paint.set_anti_alias(true);
    paint.set_style(skia::paint::Style::Fill);
    paint.set_color(to_skia(series_color(0, high_contrast).with_alpha(200)));

    let sy = |v: f64| -> f32 { b as f32 - ((v - lo) / span) as f32 * (b - t) as f32 };
    let base = sy(0.0f64.clamp(lo, hi));
    for (i, &v) in values.iter().enumerate() {
        let x = l as f32 + slot * i as f32 + (slot - bar) * 0.5;
        let y = sy(v);
        let rect = skia::Rect::from_ltrb(x, y.min(base), x + bar, y.max(base));
        canvas.draw_rect(rect, &paint);
    }
}

fn draw_line(
    canvas: &skia::Canvas,
    l: i32,
    t: i32,
    r: i32,
    b: i32,
    values: &[f64],
    high_contrast: bool,
) {
    if values.len() < 2 {
        draw_scatter(canvas, l, t, r, b, values, high_contrast);
        return;
    }
    let (lo, hi) = value_range(values);
    let span = (hi - lo).max(1e-9);
    let step = (r - l) as f32 / (values.len() - 1) as f32;
    let sy = |v: f64| -> f32 { b as f32 - ((v - lo) / span) as f32 * (b - t) as f32 };

    let mut path = skia::Path::new();
    path.move_to((l as f32, sy(values[0])));
    for (i, &v) in values.iter().enumerate().skip(1) {
        path.line_to((l as f32 + step * i as f32, sy(v)));
    }

    let mut stroke = skia::Paint::default();
    stroke.set_anti_alias(true);
    stroke.set_style(skia::paint::Style::Stroke);
    stroke.set_stroke_width(2.0);
    stroke.set_color(to_skia(series_color(0, high_contrast)));
    canvas.draw_path(&path, &stroke);
}

fn draw_scatter(
    canvas: &skia::Canvas,
    l: i32,
    t: i32,
    r: i32,
    b: i32,
    values: &[f64],
    high_contrast: bool,
) {
    if values.is_empty() {
        return;
    }
    let (lo, hi) = value_range(values);
    let span = (hi - lo).max(1e-9);
    let n = values.len().max(1) as f32;
    let slot = (r - l) as f32 / n;
    let sy = |v: f64| -> f32 { b as f32 - ((v - lo) / span) as f32 * (b - t) as f32 };

    let mut paint = skia::Paint::default();
    paint.set_anti_alias(true);
    paint.set_style(skia::paint::Style::Fill);
    paint.set_color(to_skia(series_color(0, high_contrast)));
    for (i, &v) in values.iter().enumerate() {
        let x = l as f32 + slot * (i as f32 + 0.5);
        canvas.draw_circle((x, sy(v)), 3.5, &paint);
    }
}

fn draw_pie(
    canvas: &skia::Canvas,
    l: i32,
    t: i32,
    r: i32,
    b: i32,
    values: &[f64],
    high_contrast: bool,
) {
    // Slices use non-negative magnitudes; a pie of zeros draws nothing.
    let total: f64 = values.iter().map(|v| v.max(0.0)).sum();
    if total <= 0.0 {
        return;
    }
    let cx = (l + r) as f32 * 0.5;
    let cy = (t + b) as f32 * 0.5;
    let radius = ((r - l).min(b - t) as f32 * 0.42).max(8.0);
    let oval = skia::Rect::from_ltrb(cx - radius, cy - radius, cx + radius, cy + radius);

    let mut paint = skia::Paint::default();
    paint.set_anti_alias(true);
    paint.set_style(skia::paint::Style::Fill);

    let mut start = -90.0f32;
    for (i, &v) in values.iter().enumerate() {
        let sweep = (v.max(0.0) / total) as f32 * 360.0;
        if sweep <= 0.0 {
            continue;
        }
        paint.set_color(to_skia(series_color(i, high_contrast).with_alpha(220)));
        canvas.draw_arc(oval, start, sweep, true, &paint);
        start += sweep;
    }
}

fn draw_histogram(
    canvas: &skia::Canvas,
    l: i32,
    t: i32,
    r: i32,
    b: i32,
    bin_edges: &[f64],
    counts: &[u32],
    high_contrast: bool,
) {
    if counts.is_empty() {
        return;
    }
    let peak = counts.iter().copied().max().unwrap_or(1).max(1) as f64;
    let slot = (r - l) as f32 / counts.len() as f32;

    let mut paint = skia::Paint::default();
    paint.set_anti_alias(true);
    paint.set_style(skia::paint::Style::Fill);
    paint.set_color(to_skia(series_color(0, high_contrast).with_alpha(180)));

    for (i, &count) in counts.iter().enumerate() {
        let x = l as f32 + slot * i as f32 + 1.0;
        let h = (count as f64 / peak) as f32 * (b - t) as f32;
        let rect = skia::Rect::from_ltrb(x, b as f32 - h, x + slot - 2.0, b as f32);
        canvas.draw_rect(rect, &paint);
    }
    let _ = bin_edges; // edge labels are left to interactive frontends
}

#[allow(clippy::too_many_arguments)]
fn draw_density(
    canvas: &skia::Canvas,
    l: i32,
    t: i32,
    r: i32,
    b: i32,
    bin_edges: &[f64],
    counts: &[u32],
    curve: &[(f64, f64)],
    high_contrast: bool,
) {
    if curve.len() < 2 || bin_edges.len() < 2 {
        return;
    }
    let x_min = bin_edges[0];
    let x_span = (bin_edges[bin_edges.len() - 1] - x_min).max(1e-9);
    // The curve shares the histogram's count scale (it is pre-scaled by
    // n * bin_width), so both use the peak count for the Y range.
    let peak = counts.iter().copied().max().unwrap_or(1).max(1) as f64;

    let sx = |x: f64| -> f32 { l as f32 + ((x - x_min) / x_span) as f32 * (r - l) as f32 };
    let sy = |y: f64| -> f32 { b as f32 - (y / peak).min(1.0) as f32 * (b - t) as f32 };

    let mut path = skia::Path::new();
    path.move_to((sx(curve[0].0), sy(curve[0].1)));
    for &(x, y) in curve.iter().skip(1) {
        path.line_to((sx(x), sy(y)));
    }

    let mut stroke = skia::Paint::default();
    stroke.set_anti_alias(true);
    stroke.set_style(skia::paint::Style::Stroke);
    stroke.set_stroke_width(2.0);
    stroke.set_color(to_skia(series_color(1, high_contrast)));
    canvas.draw_path(&path, &stroke);
}

fn draw_word_cloud(
    canvas: &skia::Canvas,
    l: i32,
    t: i32,
    r: i32,
    b: i32,
    entries: &[(String, u32)],
    high_contrast: bool,
) {
    if entries.is_empty() {
        return;
    }
    let max = entries.iter().map(|e| e.1).max().unwrap_or(1) as f32;
    let min = entries.iter().map(|e| e.1).min().unwrap_or(1) as f32;
    let spread = (max - min).max(1.0);

    let mut paint = skia::Paint::default();
    paint.set_anti_alias(true);
    let mut font = skia::Font::default();

    // Simple flow layout: left to right, wrapping within the plot rect.
    let mut x = l as f32;
    let mut y = t as f32 + 48.0;
    let mut row_height = 0.0f32;
    for (i, (word, count)) in entries.iter().enumerate() {
        // Font size 12..48 scaled by relative frequency.
        let size = 12.0 + (*count as f32 - min) / spread * 36.0;
        font.set_size(size);
        paint.set_color(to_skia(series_color(i, high_contrast)));
        let (advance, _) = font.measure_str(word, Some(&paint));
        if x + advance > r as f32 && x > l as f32 {
            x = l as f32;
            y += row_height + 8.0;
            row_height = 0.0;
        }
        if y > b as f32 {
            break;
        }
        canvas.draw_str(word, (x, y), &font, &paint);
        x += advance + 12.0;
        row_height = row_height.max(size);
    }
}

#[allow(clippy::too_many_arguments)]
fn draw_box_plot(
    canvas: &skia::Canvas,
    l: i32,
    t: i32,
    r: i32,
    b: i32,
    min: f64,
    q1: f64,
    median: f64,
    q3: f64,
    max: f64,
    high_contrast: bool,
) {
    let span = (max - min).max(1e-9);
    let sy = |v: f64| -> f32 { b as f32 - ((v - min) / span) as f32 * (b - t) as f32 * 0.9 };
    let cx = (l + r) as f32 * 0.5;
    let half = ((r - l) as f32 * 0.12).max(12.0);

    let color = to_skia(series_color(0, high_contrast));
    let mut stroke = skia::Paint::default();
    stroke.set_anti_alias(true);
    stroke.set_style(skia::paint::Style::Stroke);
    stroke.set_stroke_width(2.0);
    stroke.set_color(color);

    let mut fill = skia::Paint::default();
    fill.set_anti_alias(true);
    fill.set_style(skia::paint::Style::Fill);
    fill.set_color(to_skia(series_color(0, high_contrast).with_alpha(90)));

    // Whisker stem and caps.
    canvas.draw_line((cx, sy(min)), (cx, sy(max)), &stroke);
    canvas.draw_line((cx - half * 0.5, sy(min)), (cx + half * 0.5, sy(min)), &stroke);
    canvas.draw_line((cx - half * 0.5, sy(max)), (cx + half * 0.5, sy(max)), &stroke);

    // Interquartile box with median line.
    let rect = skia::Rect::from_ltrb(cx - half, sy(q3), cx + half, sy(q1));
    canvas.draw_rect(rect, &fill);
    canvas.draw_rect(rect, &stroke);
    canvas.draw_line((cx - half, sy(median)), (cx + half, sy(median)), &stroke);
}

fn draw_stats_panel(canvas: &skia::Canvas, l: i32, t: i32, stats: &ColumnStats, c: &Colors) {
    let lines: Vec<String> = match stats {
        ColumnStats::Numeric { count, mean, median, std_dev, min, max, sum } => vec![
            format!("count   {count}"),
            format!("mean    {mean:.4}"),
            format!("median  {median:.4}"),
            format!("std dev {std_dev:.4}"),
            format!("min     {min:.4}"),
            format!("max     {max:.4}"),
            format!("sum     {sum:.4}"),
        ],
        ColumnStats::Categorical { total, distinct, top_value, top_count } => vec![
            format!("rows      {total}"),
            format!("distinct  {distinct}"),
            format!("top value {top_value} ({top_count})"),
        ],
    };

    let mut paint = skia::Paint::default();
    paint.set_color(c.text);
    let mut font = skia::Font::default();
    font.set_size(18.0);
    let mut y = t as f32 + 32.0;
    for line in lines {
        canvas.draw_str(&line, (l as f32, y), &font, &paint);
        y += 28.0;
    }
}
