//! Particle field animation for the emergent hero background.
//!
//! A fixed number of particles drift across the viewport, bounce off its
//! edges, and are joined by fading lines whenever two of them come closer
//! than the connection threshold. Drawing goes through the [`Surface`]
//! trait; [`ParticleCanvas`] paints a recorded frame onto a ratatui buffer.

mod animator;
mod canvas;
mod color;
mod field;
mod grid;
mod particle;
mod schedule;
mod surface;

pub use animator::Animator;
pub use canvas::ParticleCanvas;
pub use color::fade;
pub use field::{Connection, ParticleField, connection_opacity};
pub use particle::{Particle, Reflection};
pub use schedule::FrameSchedule;
pub use surface::{DisplayList, Stroke, Surface};
