//! Viewport geometry in logical units.

use serde::{Deserialize, Serialize};

/// Size of one terminal cell in logical units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CellScale {
    pub width: f64,
    pub height: f64,
}

impl Default for CellScale {
    fn default() -> Self {
        // Roughly the pixel size of a monospace cell, which keeps the
        // field's aspect ratio close to what a browser would show.
        Self {
            width: 8.0,
            height: 16.0,
        }
    }
}

/// Drawable area the particle field lives in.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    /// Create a viewport of the given size.
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Viewport covering `cols` x `rows` terminal cells.
    pub fn from_cells(cols: u16, rows: u16, scale: CellScale) -> Self {
        Self {
            width: f64::from(cols) * scale.width,
            height: f64::from(rows) * scale.height,
        }
    }

    /// True when nothing can be placed or drawn in this viewport.
    pub fn is_empty(&self) -> bool {
        !(self.width.is_finite() && self.height.is_finite())
            || self.width <= 0.0
            || self.height <= 0.0
    }

    /// Whether the point lies inside `[0, width] x [0, height]`.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        (0.0..=self.width).contains(&x) && (0.0..=self.height).contains(&y)
    }
}
