//! Cyclic auto-advancing slide controller.
//!
//! A [`CarouselController`] owns the current slide index of one carousel and
//! the two timers that drive it: the autoplay interval and the resume-after-
//! interaction timeout. It never reads the clock itself; the host event loop
//! passes `now` into every time-dependent call and calls [`CarouselController::poll`]
//! on each step so due timers can fire.

pub mod timer;
pub mod window;

use std::num::NonZeroUsize;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::error::CarouselError;
use timer::{Interval, Timeout};

pub use window::SlideWindow;

/// Autoplay period of the hero carousel
pub const HERO_INTERVAL: Duration = Duration::from_millis(8000);
/// Autoplay period of the hot-deals strip
pub const DEALS_INTERVAL: Duration = Duration::from_millis(3000);
/// Quiet period after manual navigation before autoplay resumes
pub const RESUME_DELAY: Duration = Duration::from_millis(15000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CarouselConfig {
    pub autoplay_interval: Duration,
    pub resume_delay: Duration,
    /// Extra wait before the first autoplay tick after `start`
    pub start_delay: Duration,
}

impl CarouselConfig {
    pub fn new(autoplay_interval: Duration, resume_delay: Duration) -> Self {
        Self {
            autoplay_interval,
            resume_delay,
            start_delay: Duration::ZERO,
        }
    }

    pub fn with_start_delay(mut self, start_delay: Duration) -> Self {
        self.start_delay = start_delay;
        self
    }
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self::new(HERO_INTERVAL, RESUME_DELAY)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum ChangeCause {
    #[strum(serialize = "autoplay")]
    Autoplay,
    #[strum(serialize = "manual")]
    Manual,
}

/// A change of the current slide, handed to the render surface so it can
/// start a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlideChange {
    pub from: usize,
    pub to: usize,
    pub cause: ChangeCause,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarouselEvent {
    Advanced(SlideChange),
    /// The resume timeout elapsed and autoplay is allowed again
    Resumed,
}

#[derive(Debug)]
pub struct CarouselController {
    label: String,
    len: NonZeroUsize,
    current: usize,
    paused: bool,
    hovered: bool,
    transitioning: bool,
    config: CarouselConfig,
    autoplay: Interval,
    resume: Timeout,
}

#[allow(clippy::len_without_is_empty)]
impl CarouselController {
    pub fn new(label: impl Into<String>, len: NonZeroUsize, config: CarouselConfig) -> Self {
        Self {
            label: label.into(),
            len,
            current: 0,
            paused: false,
            hovered: false,
            transitioning: false,
            autoplay: Interval::new(config.autoplay_interval),
            resume: Timeout::new(),
            config,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn len(&self) -> usize {
        self.len.get()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    pub fn is_transitioning(&self) -> bool {
        self.transitioning
    }

    /// True while the autoplay interval is armed
    pub fn is_running(&self) -> bool {
        self.autoplay.is_armed()
    }

    pub fn next_tick_at(&self) -> Option<Instant> {
        self.autoplay.next_fire()
    }

    pub fn resume_deadline(&self) -> Option<Instant> {
        self.resume.deadline()
    }

    /// Time until a pending resume timeout fires
    pub fn resume_in(&self, now: Instant) -> Option<Duration> {
        self.resume.remaining(now)
    }

    /// Arm the autoplay interval. Calling it again restarts the schedule
    /// rather than adding a second interval.
    pub fn start(&mut self, now: Instant) {
        let first = now + self.config.start_delay + self.config.autoplay_interval;
        self.autoplay.arm_at(first);
        info!(
            carousel = %self.label,
            slides = self.len.get(),
            interval_ms = self.config.autoplay_interval.as_millis() as u64,
            "carousel autoplay started"
        );
    }

    /// Clear both timers. The controller keeps its index and can be started again.
    pub fn stop(&mut self) {
        let had_autoplay = self.autoplay.cancel();
        let had_resume = self.resume.cancel();
        if had_autoplay || had_resume {
            info!(carousel = %self.label, "carousel timers cleared");
        }
    }

    /// Fire whatever timers are due at `now`.
    pub fn poll(&mut self, now: Instant) -> Vec<CarouselEvent> {
        let mut events = Vec::new();

        if self.resume.fire_if_due(now) {
            if self.hovered {
                debug!(carousel = %self.label, "resume timeout elapsed while hovered");
            } else {
                self.paused = false;
                debug!(carousel = %self.label, "autoplay resumed");
                events.push(CarouselEvent::Resumed);
            }
        }

        if self.autoplay.fire_if_due(now) {
            if self.paused || self.transitioning {
                debug!(
                    carousel = %self.label,
                    paused = self.paused,
                    transitioning = self.transitioning,
                    "autoplay tick skipped"
                );
            } else if self.len.get() > 1 {
                let change = self.move_to(self.wrap_forward(), ChangeCause::Autoplay);
                events.push(CarouselEvent::Advanced(change));
            }
        }

        events
    }

    /// Jump to `index`. Out-of-range indices are rejected, never clamped.
    /// Returns `Ok(None)` when a transition is in flight or the slide is
    /// already current.
    pub fn go_to_slide(
        &mut self,
        index: usize,
        now: Instant,
    ) -> Result<Option<SlideChange>, CarouselError> {
        if index >= self.len.get() {
            warn!(carousel = %self.label, index, len = self.len.get(), "slide index out of range");
            return Err(CarouselError::OutOfRange {
                index,
                len: self.len.get(),
            });
        }
        if self.transitioning || index == self.current {
            return Ok(None);
        }

        let change = self.move_to(index, ChangeCause::Manual);
        self.paused = true;
        if self.resume.arm(now, self.config.resume_delay) {
            debug!(carousel = %self.label, "pending resume timeout replaced");
        }
        Ok(Some(change))
    }

    pub fn next(&mut self, now: Instant) -> Option<SlideChange> {
        let target = self.wrap_forward();
        self.go_to_slide(target, now).ok().flatten()
    }

    pub fn previous(&mut self, now: Instant) -> Option<SlideChange> {
        let len = self.len.get();
        let target = (self.current + len - 1) % len;
        self.go_to_slide(target, now).ok().flatten()
    }

    pub fn pause_on_hover_enter(&mut self) {
        self.hovered = true;
        self.paused = true;
        if self.resume.cancel() {
            debug!(carousel = %self.label, "hover cancelled pending resume timeout");
        }
    }

    pub fn pause_on_hover_leave(&mut self) {
        self.hovered = false;
        self.paused = false;
        self.resume.cancel();
    }

    pub fn on_transition_start(&mut self) {
        self.transitioning = true;
    }

    pub fn on_transition_complete(&mut self) {
        self.transitioning = false;
    }

    fn wrap_forward(&self) -> usize {
        (self.current + 1) % self.len.get()
    }

    fn move_to(&mut self, to: usize, cause: ChangeCause) -> SlideChange {
        let change = SlideChange {
            from: self.current,
            to,
            cause,
        };
        self.current = to;
        debug!(carousel = %self.label, from = change.from, to, %cause, "slide changed");
        change
    }
}

impl Drop for CarouselController {
    fn drop(&mut self) {
        self.stop();
    }
}
