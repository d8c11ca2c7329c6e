//! A single drifting particle.

use emergent_core::{FieldConfig, Viewport};
use rand::Rng;

/// Point with constant speed that bounces off the viewport edges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    /// Horizontal position in logical units.
    pub x: f64,
    /// Vertical position in logical units, growing downwards.
    pub y: f64,
    /// Horizontal displacement per frame at medium speed.
    pub vx: f64,
    /// Vertical displacement per frame at medium speed.
    pub vy: f64,
    /// Dot radius, fixed at spawn.
    pub radius: f64,
    /// Dot opacity in (0, 1], fixed at spawn.
    pub opacity: f64,
}

/// Axes whose velocity component was inverted during a step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Reflection {
    /// Horizontal velocity was inverted.
    pub x: bool,
    /// Vertical velocity was inverted.
    pub y: bool,
}

impl Particle {
    /// Create a particle with explicit state.
    pub const fn new(x: f64, y: f64, vx: f64, vy: f64, radius: f64, opacity: f64) -> Self {
        Self {
            x,
            y,
            vx,
            vy,
            radius,
            opacity,
        }
    }

    /// Spawn a particle uniformly inside a non-empty viewport.
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, viewport: Viewport, config: &FieldConfig) -> Self {
        let speed = config.max_speed.abs();
        Self {
            x: uniform(rng, 0.0, viewport.width),
            y: uniform(rng, 0.0, viewport.height),
            vx: uniform(rng, -speed, speed),
            vy: uniform(rng, -speed, speed),
            radius: uniform(rng, config.radius_min, config.radius_max).max(f64::MIN_POSITIVE),
            opacity: uniform(rng, config.opacity_min, config.opacity_max)
                .clamp(f64::MIN_POSITIVE, 1.0),
        }
    }

    /// Move by one frame and reflect off the viewport edges.
    ///
    /// A component is inverted only while it still points out of the
    /// viewport, so a particle that overshot an edge turns around once and
    /// comes back on the next frame instead of jittering.
    pub fn step(&mut self, viewport: Viewport, scale: f64) -> Reflection {
        self.x += self.vx * scale;
        self.y += self.vy * scale;

        let mut reflection = Reflection::default();
        if (self.x < 0.0 && self.vx < 0.0) || (self.x > viewport.width && self.vx > 0.0) {
            self.vx = -self.vx;
            reflection.x = true;
        }
        if (self.y < 0.0 && self.vy < 0.0) || (self.y > viewport.height && self.vy > 0.0) {
            self.vy = -self.vy;
            reflection.y = true;
        }
        reflection
    }

    /// Current `(x, y)` position.
    pub fn position(&self) -> (f64, f64) {
        (self.x, self.y)
    }

    /// Euclidean distance between the two particle centers.
    pub fn distance_to(&self, other: &Particle) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Uniform sample in `[low, high)`.
///
/// Collapses to `low` for an empty range and to the midpoint when the span
/// is too wide to represent.
fn uniform<R: Rng + ?Sized>(rng: &mut R, low: f64, high: f64) -> f64 {
    let span = high - low;
    if span > 0.0 && span.is_finite() {
        low + rng.r#gen::<f64>() * span
    } else if span > 0.0 {
        low / 2.0 + high / 2.0
    } else {
        low
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const VIEWPORT: Viewport = Viewport::new(800.0, 600.0);

    #[test]
    fn test_spawn_respects_ranges() {
        let config = FieldConfig::default();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let p = Particle::spawn(&mut rng, VIEWPORT, &config);
            assert!(VIEWPORT.contains(p.x, p.y));
            assert!(p.vx.abs() <= config.max_speed);
            assert!(p.vy.abs() <= config.max_speed);
            assert!((config.radius_min..=config.radius_max).contains(&p.radius));
            assert!((config.opacity_min..=config.opacity_max).contains(&p.opacity));
        }
    }

    #[test]
    fn test_spawn_with_inverted_ranges_uses_lower_bound() {
        let config = FieldConfig {
            radius_min: 3.0,
            radius_max: 1.0,
            opacity_min: 0.9,
            opacity_max: 0.1,
            max_speed: 0.0,
            ..FieldConfig::default()
        };
        let mut rng = StdRng::seed_from_u64(1);
        let p = Particle::spawn(&mut rng, VIEWPORT, &config);
        assert_eq!(p.radius, 3.0);
        assert_eq!(p.opacity, 0.9);
        assert_eq!((p.vx, p.vy), (0.0, 0.0));
    }

    #[test]
    fn test_spawn_with_huge_speed_stays_finite() {
        let config = FieldConfig {
            max_speed: f64::MAX,
            ..FieldConfig::default()
        };
        let mut rng = StdRng::seed_from_u64(3);
        let mut p = Particle::spawn(&mut rng, VIEWPORT, &config);
        assert_eq!((p.vx, p.vy), (0.0, 0.0));
        p.step(VIEWPORT, 2.0);
        assert!(p.x.is_finite() && p.y.is_finite());
    }

    #[test]
    fn test_uniform_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..1000 {
            let v = uniform(&mut rng, -0.25, 0.25);
            assert!((-0.25..0.25).contains(&v));
        }
        assert_eq!(uniform(&mut rng, 1.0, 1.0), 1.0);
        assert_eq!(uniform(&mut rng, f64::MIN, f64::MAX), 0.0);
    }

    #[test]
    fn test_step_inside_bounds_does_not_reflect() {
        let mut p = Particle::new(400.0, 300.0, 0.25, -0.25, 1.0, 0.5);
        let reflection = p.step(VIEWPORT, 1.0);
        assert_eq!(reflection, Reflection::default());
        assert_eq!(p.position(), (400.25, 299.75));
        assert_eq!((p.vx, p.vy), (0.25, -0.25));
    }

    #[test]
    fn test_step_reflects_once_per_crossing() {
        let mut p = Particle::new(0.1, 300.0, -0.25, 0.0, 1.0, 0.5);

        let first = p.step(VIEWPORT, 1.0);
        assert_eq!(first, Reflection { x: true, y: false });
        assert!(p.x < 0.0);
        assert_eq!(p.vx, 0.25);

        // Still heading back in, so no second flip.
        let second = p.step(VIEWPORT, 1.0);
        assert_eq!(second, Reflection::default());
        assert!(p.x >= 0.0);
        assert_eq!(p.vx, 0.25);
    }

    #[test]
    fn test_step_reflects_both_axes_in_corner() {
        let mut p = Particle::new(799.9, 599.9, 0.25, 0.25, 1.0, 0.5);
        let reflection = p.step(VIEWPORT, 1.0);
        assert_eq!(reflection, Reflection { x: true, y: true });
        assert_eq!((p.vx, p.vy), (-0.25, -0.25));
    }

    #[test]
    fn test_distance() {
        let a = Particle::new(0.0, 0.0, 0.0, 0.0, 1.0, 1.0);
        let b = Particle::new(3.0, 4.0, 0.0, 0.0, 1.0, 1.0);
        assert_eq!(a.distance_to(&b), 5.0);
        assert_eq!(b.distance_to(&a), 5.0);
    }
}
