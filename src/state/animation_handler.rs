use std::time::Duration;

use crate::clock::Timestamp;

/// Tracks the sprite an entity shows and rate-limits how often it may
/// change frame, in wall time rather than ticks.
#[derive(Clone, Debug)]
pub struct AnimationHandler<T> {
    state: T,
    min_interval: Duration,
    last_frame_at: Timestamp,
}

impl<T: PartialEq + Copy> AnimationHandler<T> {
    pub fn new(initial_state: T, min_interval: Duration) -> Self {
        AnimationHandler {
            state: initial_state,
            min_interval,
            last_frame_at: Timestamp::ZERO,
        }
    }

    pub fn current_state(&self) -> T {
        self.state
    }

    pub fn set_state(&mut self, new_state: T) {
        if self.state != new_state {
            self.state = new_state;
        }
    }

    /// True at most once per `min_interval`; re-stamps when it fires.
    pub fn frame_due(&mut self, now: Timestamp) -> bool {
        if now.since(self.last_frame_at) >= self.min_interval {
            self.last_frame_at = now;
            true
        } else {
            false
        }
    }

    pub fn reset(&mut self, state: T) {
        self.state = state;
        self.last_frame_at = Timestamp::ZERO;
    }
}

/// The walk cycle is driven by a counter owned by the caller so that every
/// enemy blinks in step. The still frame shows when the counter is an exact
/// multiple of 0.5.
pub fn is_still_frame(counter: f64) -> bool {
    counter % 0.5 == 0.0
}
