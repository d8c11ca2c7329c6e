use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Global animation speed applied on top of each particle's velocity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AnimationSpeed {
    Slow,
    #[default]
    Medium,
    Fast,
}

impl AnimationSpeed {
    pub const ALL: [AnimationSpeed; 3] = [
        AnimationSpeed::Slow,
        AnimationSpeed::Medium,
        AnimationSpeed::Fast,
    ];

    /// Largest multiplier of any speed. Bounds how far a particle can
    /// overshoot an edge in one frame.
    pub fn fastest_multiplier() -> f64 {
        Self::ALL
            .iter()
            .map(|speed| speed.multiplier())
            .fold(0.0, f64::max)
    }

    /// Factor the per-frame displacement is multiplied by.
    pub fn multiplier(self) -> f64 {
        match self {
            AnimationSpeed::Slow => 0.5,
            AnimationSpeed::Medium => 1.0,
            AnimationSpeed::Fast => 2.0,
        }
    }

    /// Cycle to the next speed.
    pub fn next(self) -> Self {
        match self {
            AnimationSpeed::Slow => AnimationSpeed::Medium,
            AnimationSpeed::Medium => AnimationSpeed::Fast,
            AnimationSpeed::Fast => AnimationSpeed::Slow,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            AnimationSpeed::Slow => "slow",
            AnimationSpeed::Medium => "medium",
            AnimationSpeed::Fast => "fast",
        }
    }
}

impl fmt::Display for AnimationSpeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AnimationSpeed {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "slow" => Ok(AnimationSpeed::Slow),
            "medium" => Ok(AnimationSpeed::Medium),
            "fast" => Ok(AnimationSpeed::Fast),
            other => Err(format!(
                "unknown speed '{other}', expected one of: slow, medium, fast"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_returns_to_start() {
        let start = AnimationSpeed::default();
        assert_eq!(start.next().next().next(), start);
    }

    #[test]
    fn test_fastest_multiplier() {
        assert_eq!(AnimationSpeed::fastest_multiplier(), AnimationSpeed::Fast.multiplier());
    }

    #[test]
    fn test_parse() {
        assert_eq!("FAST".parse::<AnimationSpeed>(), Ok(AnimationSpeed::Fast));
        assert!("warp".parse::<AnimationSpeed>().is_err());
    }
}
