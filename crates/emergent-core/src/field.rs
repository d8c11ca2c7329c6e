//! Particle field parameters.

use serde::{Deserialize, Serialize};

/// Slowest and fastest supported frame rates.
pub const MIN_FPS: u32 = 1;
pub const MAX_FPS: u32 = 240;

/// What happens to the particle set when the viewport changes size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResizePolicy {
    /// Throw the whole set away and spawn a fresh one.
    #[default]
    Reinitialize,
    /// Keep particles that still fit, respawn the rest.
    Resample,
}

/// Parameters for spawning and connecting particles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FieldConfig {
    /// Number of particles kept alive between resizes.
    pub particle_count: usize,
    /// Particles closer than this are joined by a line.
    pub connection_threshold: f64,
    /// Line opacity at distance zero.
    pub max_line_opacity: f64,
    /// Upper bound of each velocity component, in units per frame.
    pub max_speed: f64,
    pub radius_min: f64,
    pub radius_max: f64,
    pub opacity_min: f64,
    pub opacity_max: f64,
    pub resize_policy: ResizePolicy,
    /// Fixed RNG seed; entropy-seeded when absent.
    pub seed: Option<u64>,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            particle_count: 50,
            connection_threshold: 100.0,
            max_line_opacity: 0.5,
            max_speed: 0.25,
            radius_min: 0.5,
            radius_max: 2.0,
            opacity_min: 0.2,
            opacity_max: 0.7,
            resize_policy: ResizePolicy::Reinitialize,
            seed: None,
        }
    }
}
