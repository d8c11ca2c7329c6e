//! Color themes for particles and their connecting lines.

use std::fmt;
use std::str::FromStr;

use ratatui::style::Color;
use serde::{Deserialize, Serialize};

/// Available color themes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColorTheme {
    /// Blue particles joined by violet lines, matching the brand gradient.
    #[default]
    Emergent,
    Cyan,
    Ocean,
    Violet,
    Ember,
    Mono,
}

impl ColorTheme {
    pub const ALL: [ColorTheme; 6] = [
        ColorTheme::Emergent,
        ColorTheme::Cyan,
        ColorTheme::Ocean,
        ColorTheme::Violet,
        ColorTheme::Ember,
        ColorTheme::Mono,
    ];

    /// Color of particle dots at full opacity.
    pub fn particle_color(self) -> Color {
        match self {
            ColorTheme::Emergent => Color::Rgb(96, 165, 250),
            ColorTheme::Cyan => Color::Rgb(100, 255, 218),
            ColorTheme::Ocean => Color::Rgb(56, 189, 248),
            ColorTheme::Violet => Color::Rgb(192, 132, 252),
            ColorTheme::Ember => Color::Rgb(251, 146, 60),
            ColorTheme::Mono => Color::Rgb(229, 231, 235),
        }
    }

    /// Color of connecting lines at full opacity.
    pub fn line_color(self) -> Color {
        match self {
            ColorTheme::Emergent => Color::Rgb(147, 51, 234),
            ColorTheme::Cyan => Color::Rgb(100, 255, 218),
            ColorTheme::Ocean => Color::Rgb(37, 99, 235),
            ColorTheme::Violet => Color::Rgb(168, 85, 247),
            ColorTheme::Ember => Color::Rgb(239, 68, 68),
            ColorTheme::Mono => Color::Rgb(156, 163, 175),
        }
    }

    /// Color used for text drawn over the field.
    pub fn accent_color(self) -> Color {
        self.particle_color()
    }

    /// Cycle to the next theme.
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|t| *t == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn name(self) -> &'static str {
        match self {
            ColorTheme::Emergent => "emergent",
            ColorTheme::Cyan => "cyan",
            ColorTheme::Ocean => "ocean",
            ColorTheme::Violet => "violet",
            ColorTheme::Ember => "ember",
            ColorTheme::Mono => "mono",
        }
    }
}

impl fmt::Display for ColorTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ColorTheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|t| t.name() == wanted)
            .ok_or_else(|| {
                let names: Vec<&str> = Self::ALL.iter().map(|t| t.name()).collect();
                format!("unknown theme '{s}', expected one of: {}", names.join(", "))
            })
    }
}
