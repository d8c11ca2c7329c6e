//! Terminal rendering of a recorded particle frame.

use emergent_core::ColorTheme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    symbols::Marker,
    widgets::{
        Widget,
        canvas::{Canvas, Line, Points},
    },
};

use crate::color::fade;
use crate::surface::{DisplayList, Stroke};

/// Widget that paints a [`DisplayList`] with Braille dots.
///
/// The canvas is stretched over the whole render area, so the recorded
/// viewport only sets the coordinate system, not the on-screen size.
#[derive(Debug, Clone, Copy)]
pub struct ParticleCanvas<'a> {
    frame: &'a DisplayList,
    theme: ColorTheme,
}

impl<'a> ParticleCanvas<'a> {
    /// Paint `frame` using the colors of `theme`.
    pub fn new(frame: &'a DisplayList, theme: ColorTheme) -> Self {
        Self { frame, theme }
    }
}

impl Widget for ParticleCanvas<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let viewport = self.frame.viewport();
        if viewport.is_empty() || area.is_empty() || self.frame.is_empty() {
            return;
        }

        let height = viewport.height;
        // Canvas y grows upwards, the field's y grows downwards.
        let flip = |(x, y): (f64, f64)| (x, height - y);
        let line_color = self.theme.line_color();
        let particle_color = self.theme.particle_color();

        Canvas::default()
            .marker(Marker::Braille)
            .x_bounds([0.0, viewport.width])
            .y_bounds([0.0, height])
            .paint(|ctx| {
                for stroke in self.frame.strokes() {
                    match *stroke {
                        Stroke::Line { from, to, opacity } => {
                            let (x1, y1) = flip(from);
                            let (x2, y2) = flip(to);
                            ctx.draw(&Line::new(x1, y1, x2, y2, fade(line_color, opacity)));
                        }
                        // Radii are far below one Braille dot, so every
                        // particle is a single point.
                        Stroke::Dot {
                            center, opacity, ..
                        } => {
                            ctx.draw(&Points {
                                coords: &[flip(center)],
                                color: fade(particle_color, opacity),
                            });
                        }
                    }
                }
            })
            .render(area, buf);
    }
}
