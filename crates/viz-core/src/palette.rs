// File: crates/viz-core/src/palette.rs
// Summary: Fixed series palettes (standard / high-contrast) and per-chart display options.

/// Renderer-agnostic RGBA color.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }
}

/// Standard series palette, indexed positionally with wraparound.
pub const STANDARD: [Rgba; 5] = [
    Rgba::opaque(0x3b, 0x82, 0xf6), // blue
    Rgba::opaque(0xef, 0x44, 0x44), // red
    Rgba::opaque(0x10, 0xb9, 0x81), // green
    Rgba::opaque(0xf5, 0x9e, 0x0b), // amber
    Rgba::opaque(0x8b, 0x5c, 0xf6), // violet
];

/// High-contrast palette for accessibility mode.
pub const HIGH_CONTRAST: [Rgba; 5] = [
    Rgba::opaque(0x00, 0xff, 0xff), // cyan
    Rgba::opaque(0xff, 0xff, 0x00), // yellow
    Rgba::opaque(0xff, 0x00, 0xff), // magenta
    Rgba::opaque(0x00, 0xff, 0x00), // green
    Rgba::opaque(0xff, 0xff, 0xff), // white
];

/// Color for the `index`-th series under the chosen palette.
pub fn series_color(index: usize, high_contrast: bool) -> Rgba {
    let palette = if high_contrast { &HIGH_CONTRAST } else { &STANDARD };
    palette[index % palette.len()]
}

/// Everything the rendering collaborator needs besides the aggregate itself.
#[derive(Clone, Debug)]
pub struct DisplayOptions {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub high_contrast: bool,
}
