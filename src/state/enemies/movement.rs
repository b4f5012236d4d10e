use std::time::Duration;

use crate::clock::{Timestamp, interval_ratio};
use crate::state::enemies::params::FloatParams;

/// Timer for catch-up movement.
///
/// The first tick after a (re)start only stamps the clock. Afterwards a step
/// fires once `interval` has passed, scaled by how many intervals actually
/// elapsed, so late ticks move proportionally further and the average speed
/// does not depend on the tick rate.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CatchUp {
    last_at: Option<Timestamp>,
}

impl CatchUp {
    pub fn clear(&mut self) {
        self.last_at = None;
    }

    pub fn is_started(&self) -> bool {
        self.last_at.is_some()
    }

    pub fn restart(&mut self, now: Timestamp) {
        self.last_at = Some(now);
    }

    /// Multiplier for the nominal step, or `None` when no step is due yet.
    pub fn tick(&mut self, now: Timestamp, interval: Duration) -> Option<f32> {
        let started = *self.last_at.get_or_insert(now);
        let elapsed = now.since(started);
        if elapsed < interval || elapsed.is_zero() {
            return None;
        }
        self.last_at = Some(now);
        Some(interval_ratio(elapsed, interval))
    }
}

/// Vertical bobbing around an origin captured at (re)spawn.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FloatEffect {
    origin_y: f32,
    rising: bool,
    timer: CatchUp,
}

impl FloatEffect {
    pub fn new(origin_y: f32) -> Self {
        FloatEffect {
            origin_y,
            rising: true,
            timer: CatchUp::default(),
        }
    }

    pub fn origin_y(&self) -> f32 {
        self.origin_y
    }

    pub fn pause(&mut self) {
        self.timer.clear();
    }

    /// Vertical delta to apply this tick.
    pub fn step(&mut self, now: Timestamp, y: f32, params: &FloatParams, scale_y: f32) -> f32 {
        let reach = params.amplitude * scale_y;
        if y > self.origin_y + reach {
            self.rising = false;
        } else if y < self.origin_y - reach {
            self.rising = true;
        }

        match self.timer.tick(now, params.interval) {
            Some(ratio) => {
                let dy = params.step * scale_y * ratio;
                if self.rising { dy } else { -dy }
            }
            None => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const T: Duration = Duration::from_millis(12);

    #[test]
    fn first_tick_only_stamps() {
        let mut timer = CatchUp::default();
        assert_eq!(timer.tick(Timestamp::from_millis(500), T), None);
        assert!(timer.is_started());
        assert_eq!(timer.tick(Timestamp::from_millis(511), T), None);
        assert_eq!(timer.tick(Timestamp::from_millis(512), T), Some(1.0));
    }

    #[test]
    fn late_tick_catches_up() {
        let mut timer = CatchUp::default();
        timer.restart(Timestamp::ZERO);
        assert_eq!(timer.tick(Timestamp::from_millis(24), T), Some(2.0));
        assert_eq!(timer.tick(Timestamp::from_millis(42), T), Some(1.5));
    }

    #[test]
    fn displacement_is_independent_of_tick_spacing() {
        let step = 0.6;
        let total = 120;

        let mut uniform = CatchUp::default();
        uniform.restart(Timestamp::ZERO);
        let mut moved_uniform = 0.0;
        for ms in (12..=total).step_by(12) {
            moved_uniform += uniform.tick(Timestamp::from_millis(ms), T).unwrap_or(0.0) * step;
        }

        let mut delayed = CatchUp::default();
        delayed.restart(Timestamp::ZERO);
        let moved_delayed = delayed.tick(Timestamp::from_millis(total), T).unwrap_or(0.0) * step;

        let mut ragged = CatchUp::default();
        ragged.restart(Timestamp::ZERO);
        let mut moved_ragged = 0.0;
        for ms in [5, 13, 20, 31, 50, 51, 77, 90, 101, 120] {
            moved_ragged += ragged.tick(Timestamp::from_millis(ms), T).unwrap_or(0.0) * step;
        }

        let expected = step * total as f32 / 12.0;
        assert!((moved_uniform - expected).abs() < 1e-4);
        assert!((moved_delayed - expected).abs() < 1e-4);
        assert!((moved_ragged - expected).abs() < 1e-4);
    }

    #[test]
    fn float_reverses_past_amplitude() {
        let params = FloatParams {
            interval: Duration::from_micros(7_500),
            step: 0.5,
            amplitude: 50.0,
        };
        let mut float = FloatEffect::new(100.0);
        float.step(Timestamp::ZERO, 100.0, &params, 1.0);
        let up = float.step(Timestamp::from_micros(7_500), 100.0, &params, 1.0);
        assert_eq!(up, 0.5);

        let down = float.step(Timestamp::from_micros(15_000), 150.5, &params, 1.0);
        assert_eq!(down, -0.5);
        assert_eq!(float.origin_y(), 100.0);
    }
}
