//! Core types shared by the emergent particle field crates.

mod field;
mod speed;
mod theme;
mod viewport;

pub use field::{FieldConfig, MAX_FPS, MIN_FPS, ResizePolicy};
pub use speed::AnimationSpeed;
pub use theme::ColorTheme;
pub use viewport::{CellScale, Viewport};
