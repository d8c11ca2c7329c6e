//! Particle field state.

use emergent_core::{AnimationSpeed, FieldConfig, ResizePolicy, Viewport};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::debug;

use crate::grid::SpatialGrid;
use crate::particle::Particle;
use crate::surface::Surface;

/// Above this many particles connections are found through a spatial grid
/// instead of comparing every pair.
const GRID_MIN_PARTICLES: usize = 256;

/// A line between two particles closer than the connection threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Connection {
    /// Index of the first particle, always lower than `b`.
    pub a: usize,
    pub b: usize,
    pub distance: f64,
    pub opacity: f64,
}

/// Opacity of a connection line, or `None` when the particles are too far
/// apart. Fades linearly from `max_opacity` at distance zero to nothing at
/// the threshold, which is itself excluded.
pub fn connection_opacity(distance: f64, threshold: f64, max_opacity: f64) -> Option<f64> {
    (threshold > 0.0 && distance < threshold).then(|| max_opacity * (1.0 - distance / threshold))
}

/// Fixed-size set of particles owned by one animator.
#[derive(Debug)]
pub struct ParticleField {
    particles: Vec<Particle>,
    viewport: Viewport,
    config: FieldConfig,
    rng: StdRng,
}

impl ParticleField {
    /// Create an empty field. Call [`ParticleField::initialize`] to populate it.
    pub fn new(config: FieldConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            particles: Vec::new(),
            viewport: Viewport::default(),
            config,
            rng,
        }
    }

    /// Create a field from already placed particles.
    pub fn with_particles(config: FieldConfig, viewport: Viewport, particles: Vec<Particle>) -> Self {
        let mut field = Self::new(config);
        field.viewport = viewport;
        field.particles = particles;
        field
    }

    /// Replace the particle set with `particle_count` fresh particles.
    ///
    /// An empty viewport leaves the field without particles.
    pub fn initialize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        if viewport.is_empty() {
            self.particles = Vec::new();
            return;
        }
        self.particles = (0..self.config.particle_count)
            .map(|_| Particle::spawn(&mut self.rng, viewport, &self.config))
            .collect();
    }

    /// Move every particle by one frame, reflecting off the edges.
    pub fn step(&mut self, speed: AnimationSpeed) {
        if self.viewport.is_empty() {
            return;
        }
        let scale = speed.multiplier();
        for particle in &mut self.particles {
            particle.step(self.viewport, scale);
        }
    }

    /// Draw connections first and particles on top of them.
    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        if self.viewport.is_empty() {
            return;
        }
        surface.begin(self.viewport);
        for conn in self.connections() {
            let a = &self.particles[conn.a];
            let b = &self.particles[conn.b];
            surface.line(a.position(), b.position(), conn.opacity);
        }
        for p in &self.particles {
            surface.dot(p.position(), p.radius, p.opacity);
        }
    }

    /// Advance the simulation by one frame and draw the result.
    pub fn advance_frame<S: Surface + ?Sized>(&mut self, surface: &mut S, speed: AnimationSpeed) {
        self.step(speed);
        self.draw(surface);
    }

    /// Rebuild the particle set for a new viewport size.
    pub fn on_resize(&mut self, viewport: Viewport) {
        let previous = self.viewport;
        match self.config.resize_policy {
            ResizePolicy::Resample if !viewport.is_empty() && !self.particles.is_empty() => {
                self.resample(viewport)
            }
            _ => self.initialize(viewport),
        }
        debug!(
            from.width = previous.width,
            from.height = previous.height,
            to.width = viewport.width,
            to.height = viewport.height,
            particles = self.particles.len(),
            "particle field resized"
        );
    }

    /// Keep the particles that still fit and respawn the others.
    fn resample(&mut self, viewport: Viewport) {
        let count = self.config.particle_count;
        let mut particles: Vec<Particle> = self
            .particles
            .iter()
            .copied()
            .filter(|p| viewport.contains(p.x, p.y))
            .take(count)
            .collect();
        let missing = count - particles.len();
        particles
            .extend((0..missing).map(|_| Particle::spawn(&mut self.rng, viewport, &self.config)));
        self.particles = particles;
        self.viewport = viewport;
    }

    /// Change the fixed particle count and repopulate.
    pub fn set_particle_count(&mut self, count: usize) {
        self.config.particle_count = count;
        self.initialize(self.viewport);
    }

    /// Repopulate the current viewport with fresh random particles.
    pub fn reseed(&mut self) {
        self.initialize(self.viewport);
        debug!(particles = self.particles.len(), "particle field reseeded");
    }

    /// Drop every particle and forget the viewport.
    pub fn clear(&mut self) {
        self.particles = Vec::new();
        self.viewport = Viewport::default();
    }

    /// Every pair of particles closer than the connection threshold, ordered
    /// by `(a, b)`.
    pub fn connections(&self) -> Vec<Connection> {
        if self.particles.len() > GRID_MIN_PARTICLES {
            self.connections_grid()
        } else {
            self.connections_pairwise()
        }
    }

    fn connection(&self, a: usize, b: usize) -> Option<Connection> {
        let (a, b) = (a.min(b), a.max(b));
        let distance = self.particles[a].distance_to(&self.particles[b]);
        connection_opacity(
            distance,
            self.config.connection_threshold,
            self.config.max_line_opacity,
        )
        .map(|opacity| Connection {
            a,
            b,
            distance,
            opacity,
        })
    }

    pub(crate) fn connections_pairwise(&self) -> Vec<Connection> {
        let n = self.particles.len();
        let mut out = Vec::new();
        for a in 0..n {
            for b in a + 1..n {
                out.extend(self.connection(a, b));
            }
        }
        out
    }

    pub(crate) fn connections_grid(&self) -> Vec<Connection> {
        let threshold = self.config.connection_threshold;
        if threshold <= 0.0 || self.viewport.is_empty() {
            return Vec::new();
        }
        let grid = SpatialGrid::build(&self.particles, self.viewport, threshold);
        let mut out = Vec::new();
        grid.for_each_candidate_pair(|a, b| out.extend(self.connection(a, b)));
        out.sort_unstable_by_key(|c| (c.a, c.b));
        out
    }

    /// Current particle set, in spawn order.
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Number of live particles.
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// Whether the field holds no particles.
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Bounds the particles move within.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Settings the field was built with.
    pub fn config(&self) -> &FieldConfig {
        &self.config
    }
}
