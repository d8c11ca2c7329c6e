//! Fixed-rate frame scheduling.

use std::time::{Duration, Instant};

use emergent_core::{MAX_FPS, MIN_FPS};

/// Decides when the next frame is due.
///
/// Frames never overlap: the host asks whether a frame is due, draws it,
/// then calls [`FrameSchedule::frame_done`] before the next one is scheduled.
#[derive(Debug, Clone)]
pub struct FrameSchedule {
    interval: Duration,
    next_due: Instant,
}

impl FrameSchedule {
    /// Schedule frames at `fps`, with the first one due at `now`.
    pub fn new(fps: u32, now: Instant) -> Self {
        Self {
            interval: interval_for(fps),
            next_due: now,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn fps(&self) -> u32 {
        (Duration::from_secs(1).as_nanos() / self.interval.as_nanos().max(1)) as u32
    }

    pub fn set_fps(&mut self, fps: u32) {
        self.interval = interval_for(fps);
    }

    pub fn is_due(&self, now: Instant) -> bool {
        now >= self.next_due
    }

    /// How long the host may block before the next frame is due.
    pub fn time_until_due(&self, now: Instant) -> Duration {
        self.next_due.saturating_duration_since(now)
    }

    /// Record that a frame finished at `now` and schedule the next one.
    ///
    /// A host that fell more than a frame behind skips the missed frames
    /// rather than drawing them back to back.
    pub fn frame_done(&mut self, now: Instant) {
        let next = self.next_due + self.interval;
        self.next_due = if next <= now { now + self.interval } else { next };
    }
}

fn interval_for(fps: u32) -> Duration {
    Duration::from_secs(1) / fps.clamp(MIN_FPS, MAX_FPS)
}
