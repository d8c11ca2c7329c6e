//! Drawing surface abstraction.

use emergent_core::Viewport;

/// Something a particle field can be drawn onto.
///
/// Coordinates are logical units with the origin in the top-left corner and
/// y growing downwards. Opacity is in `[0, 1]`.
pub trait Surface {
    /// Start a new frame covering `viewport`, discarding the previous one.
    fn begin(&mut self, viewport: Viewport);

    /// Draw a straight line between two points.
    fn line(&mut self, from: (f64, f64), to: (f64, f64), opacity: f64);

    /// Draw a filled dot.
    fn dot(&mut self, center: (f64, f64), radius: f64, opacity: f64);
}

/// A single recorded drawing command.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Stroke {
    Line {
        from: (f64, f64),
        to: (f64, f64),
        opacity: f64,
    },
    Dot {
        center: (f64, f64),
        radius: f64,
        opacity: f64,
    },
}

/// Surface that records the strokes of the latest frame.
#[derive(Debug, Clone, Default)]
pub struct DisplayList {
    viewport: Viewport,
    strokes: Vec<Stroke>,
    frames: u64,
}

impl DisplayList {
    /// An empty list with no frames begun.
    pub fn new() -> Self {
        Self::default()
    }

    /// Viewport of the recorded frame.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Strokes in paint order: lines first, then dots.
    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    /// Connection lines of the recorded frame.
    pub fn lines(&self) -> impl Iterator<Item = &Stroke> {
        self.strokes
            .iter()
            .filter(|s| matches!(s, Stroke::Line { .. }))
    }

    /// Particle dots of the recorded frame.
    pub fn dots(&self) -> impl Iterator<Item = &Stroke> {
        self.strokes.iter().filter(|s| matches!(s, Stroke::Dot { .. }))
    }

    /// Whether the recorded frame has no strokes.
    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }

    /// Number of frames begun on this list.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Forget the recorded frame.
    pub fn clear(&mut self) {
        self.strokes.clear();
        self.viewport = Viewport::default();
    }
}

impl Surface for DisplayList {
    fn begin(&mut self, viewport: Viewport) {
        self.strokes.clear();
        self.viewport = viewport;
        self.frames += 1;
    }

    fn line(&mut self, from: (f64, f64), to: (f64, f64), opacity: f64) {
        self.strokes.push(Stroke::Line { from, to, opacity });
    }

    fn dot(&mut self, center: (f64, f64), radius: f64, opacity: f64) {
        self.strokes.push(Stroke::Dot {
            center,
            radius,
            opacity,
        });
    }
}
