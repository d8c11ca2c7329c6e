//! Color helpers for drawing on terminals without alpha blending.

use ratatui::style::Color;

/// Blend an RGB color toward black to approximate `opacity`.
///
/// Non-RGB colors carry no channel values to scale and are returned as-is.
pub fn fade(color: Color, opacity: f64) -> Color {
    let opacity = if opacity.is_nan() {
        0.0
    } else {
        opacity.clamp(0.0, 1.0)
    };
    match color {
        Color::Rgb(r, g, b) => Color::Rgb(scale(r, opacity), scale(g, opacity), scale(b, opacity)),
        other => other,
    }
}

fn scale(channel: u8, factor: f64) -> u8 {
    (f64::from(channel) * factor).round() as u8
}
