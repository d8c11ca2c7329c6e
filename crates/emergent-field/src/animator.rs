//! Animator lifecycle: mount, frames, resize, teardown.

use std::time::{Duration, Instant};

use emergent_core::{AnimationSpeed, ColorTheme, FieldConfig, Viewport};
use ratatui::Frame;
use tracing::{debug, info};

use crate::canvas::ParticleCanvas;
use crate::field::ParticleField;
use crate::schedule::FrameSchedule;
use crate::surface::DisplayList;

/// Owns one particle field for the lifetime of the view hosting it.
///
/// The animator is built on mount and torn down on unmount. Once torn down
/// it never advances, draws or reacts to resizes again, even if the host
/// keeps calling into it.
#[derive(Debug)]
pub struct Animator {
    field: ParticleField,
    /// Strokes of the most recent frame.
    display: DisplayList,
    /// `None` once torn down.
    schedule: Option<FrameSchedule>,
    speed: AnimationSpeed,
    paused: bool,
}

impl Animator {
    /// Build the field for `viewport` and schedule the first frame at `now`.
    pub fn mount(config: FieldConfig, viewport: Viewport, fps: u32, now: Instant) -> Self {
        let mut field = ParticleField::new(config);
        field.initialize(viewport);
        info!(
            width = viewport.width,
            height = viewport.height,
            particles = field.len(),
            fps,
            "particle animator mounted"
        );
        Self {
            field,
            display: DisplayList::new(),
            schedule: Some(FrameSchedule::new(fps, now)),
            speed: AnimationSpeed::default(),
            paused: false,
        }
    }

    /// Whether the frame schedule is still active.
    pub fn is_running(&self) -> bool {
        self.schedule.is_some()
    }

    /// Whether a frame should be drawn at `now`.
    pub fn frame_due(&self, now: Instant) -> bool {
        self.schedule.as_ref().is_some_and(|s| s.is_due(now))
    }

    /// Time until the next frame, or `None` after teardown.
    pub fn time_until_next_frame(&self, now: Instant) -> Option<Duration> {
        self.schedule.as_ref().map(|s| s.time_until_due(now))
    }

    /// Advance and record one frame. Returns `false` after teardown.
    pub fn advance_frame(&mut self, now: Instant) -> bool {
        let Some(schedule) = self.schedule.as_mut() else {
            return false;
        };
        if self.paused {
            self.field.draw(&mut self.display);
        } else {
            self.field.advance_frame(&mut self.display, self.speed);
        }
        schedule.frame_done(now);
        true
    }

    /// Paint the most recent frame over the whole terminal.
    pub fn render(&self, frame: &mut Frame, theme: ColorTheme) {
        if !self.is_running() {
            return;
        }
        frame.render_widget(ParticleCanvas::new(&self.display, theme), frame.area());
    }

    /// Rebuild the field for a new viewport. Ignored after teardown.
    pub fn on_resize(&mut self, viewport: Viewport) {
        if !self.is_running() {
            return;
        }
        self.field.on_resize(viewport);
        self.redraw();
    }

    /// Stop the frame schedule and drop the particle set.
    pub fn teardown(&mut self) {
        if self.schedule.take().is_none() {
            return;
        }
        self.field.clear();
        self.display.clear();
        info!(frames = self.display.frames(), "particle animator torn down");
    }

    /// Keep drawing frames without moving particles.
    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Let particles move again.
    pub fn resume(&mut self) {
        self.paused = false;
    }

    /// Flip between paused and running.
    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
        debug!(paused = self.paused, "animation pause toggled");
    }

    /// Whether frames currently skip movement.
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Speed applied to each frame's displacement.
    pub fn speed(&self) -> AnimationSpeed {
        self.speed
    }

    /// Change the speed used by later frames.
    pub fn set_speed(&mut self, speed: AnimationSpeed) {
        self.speed = speed;
    }

    /// Change the target frame rate; the next deadline keeps its place.
    pub fn set_fps(&mut self, fps: u32) {
        if let Some(schedule) = self.schedule.as_mut() {
            schedule.set_fps(fps);
        }
    }

    /// Target frame rate, or `None` after teardown.
    pub fn fps(&self) -> Option<u32> {
        self.schedule.as_ref().map(FrameSchedule::fps)
    }

    /// Change the particle count and repopulate the field.
    pub fn set_particle_count(&mut self, count: usize) {
        if !self.is_running() {
            return;
        }
        self.field.set_particle_count(count);
        self.redraw();
    }

    /// Repopulate the field with fresh random particles.
    pub fn reseed(&mut self) {
        if !self.is_running() {
            return;
        }
        self.field.reseed();
        self.redraw();
    }

    /// The particle field being animated.
    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    /// Strokes of the most recent frame.
    pub fn display(&self) -> &DisplayList {
        &self.display
    }

    /// Re-record the current state without moving anything, so a resize
    /// never shows strokes laid out for the old viewport.
    fn redraw(&mut self) {
        self.display.clear();
        self.field.draw(&mut self.display);
    }
}

impl Drop for Animator {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mount(now: Instant) -> Animator {
        let config = FieldConfig {
            seed: Some(17),
            ..FieldConfig::default()
        };
        Animator::mount(config, Viewport::new(800.0, 600.0), 30, now)
    }

    #[test]
    fn test_mount_populates_field() {
        let animator = mount(Instant::now());
        assert!(animator.is_running());
        assert_eq!(animator.field().len(), 50);
        assert!(animator.display().is_empty());
    }

    #[test]
    fn test_advance_frame_records_strokes_and_reschedules() {
        let now = Instant::now();
        let mut animator = mount(now);
        assert!(animator.frame_due(now));
        assert!(animator.advance_frame(now));
        assert_eq!(animator.display().dots().count(), 50);
        assert!(!animator.frame_due(now));
        assert!(animator.time_until_next_frame(now).is_some_and(|d| d > Duration::ZERO));
    }

    #[test]
    fn test_paused_frames_do_not_move_particles() {
        let now = Instant::now();
        let mut animator = mount(now);
        animator.pause();
        let before = animator.field().particles().to_vec();
        animator.advance_frame(now);
        assert_eq!(animator.field().particles(), before.as_slice());
        assert_eq!(animator.display().dots().count(), 50);

        animator.resume();
        animator.advance_frame(now);
        assert_ne!(animator.field().particles(), before.as_slice());
    }

    #[test]
    fn test_resize_redraws_for_new_viewport() {
        let now = Instant::now();
        let mut animator = mount(now);
        animator.advance_frame(now);

        let small = Viewport::new(320.0, 200.0);
        animator.on_resize(small);
        assert_eq!(animator.field().len(), 50);
        assert_eq!(animator.display().viewport(), small);

        animator.on_resize(Viewport::new(0.0, 0.0));
        assert!(animator.field().is_empty());
        assert!(animator.display().is_empty());
    }

    #[test]
    fn test_teardown_stops_everything() {
        let now = Instant::now();
        let mut animator = mount(now);
        animator.advance_frame(now);
        animator.teardown();

        assert!(!animator.is_running());
        assert!(!animator.frame_due(now + Duration::from_secs(1)));
        assert_eq!(animator.time_until_next_frame(now), None);
        assert!(!animator.advance_frame(now + Duration::from_secs(1)));
        assert!(animator.display().is_empty());

        animator.on_resize(Viewport::new(800.0, 600.0));
        animator.reseed();
        animator.set_particle_count(10);
        assert!(animator.field().is_empty());
        assert!(animator.display().is_empty());
    }

    #[test]
    fn test_set_fps_after_teardown_is_ignored() {
        let mut animator = mount(Instant::now());
        animator.set_fps(60);
        assert_eq!(animator.fps(), Some(60));
        animator.teardown();
        animator.set_fps(10);
        assert_eq!(animator.fps(), None);
    }

    #[test]
    fn test_teardown_is_idempotent() {
        let mut animator = mount(Instant::now());
        animator.teardown();
        animator.teardown();
        assert!(!animator.is_running());
    }

    #[test]
    fn test_set_particle_count() {
        let mut animator = mount(Instant::now());
        animator.set_particle_count(12);
        assert_eq!(animator.field().len(), 12);
        assert_eq!(animator.display().dots().count(), 12);
        animator.on_resize(Viewport::new(1024.0, 768.0));
        assert_eq!(animator.field().len(), 12);
    }
}
