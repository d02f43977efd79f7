use std::time::{Duration, Instant};

use crate::carousel::{CarouselController, SlideChange};

/// One in-flight slide animation on the render surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlideTransition {
    pub change: SlideChange,
    started: Instant,
    duration: Duration,
}

impl SlideTransition {
    /// Linear progress in `0.0..=1.0`
    pub fn progress(&self, now: Instant) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.started).as_secs_f64();
        (elapsed / self.duration.as_secs_f64()).clamp(0.0, 1.0)
    }

    pub fn is_done(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.started) >= self.duration
    }
}

/// Owns the animation timing for one carousel and reports its start and end
/// to the controller.
#[derive(Debug, Clone)]
pub struct TransitionDriver {
    duration: Duration,
    active: Option<SlideTransition>,
}

impl TransitionDriver {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            active: None,
        }
    }

    pub fn active(&self) -> Option<&SlideTransition> {
        self.active.as_ref()
    }

    pub fn begin(&mut self, change: SlideChange, now: Instant, carousel: &mut CarouselController) {
        carousel.on_transition_start();
        self.active = Some(SlideTransition {
            change,
            started: now,
            duration: self.duration,
        });
        if self.duration.is_zero() {
            self.finish(carousel);
        }
    }

    /// Completes the running animation once its duration has elapsed.
    /// Returns true while an animation is still running, so callers know to redraw.
    pub fn update(&mut self, now: Instant, carousel: &mut CarouselController) -> bool {
        match self.active {
            Some(t) if t.is_done(now) => {
                self.finish(carousel);
                true
            }
            Some(_) => true,
            None => false,
        }
    }

    fn finish(&mut self, carousel: &mut CarouselController) {
        self.active = None;
        carousel.on_transition_complete();
    }
}
