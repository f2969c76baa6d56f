//! Fixed-step simulation clock.
//!
//! Hosts report variable frame times; the clock accumulates them and hands
//! back whole fixed steps. Leftover time stays in the accumulator for the
//! next frame, so the simulated time never drifts from host time except when
//! catch-up is capped.

use std::time::Duration;

#[derive(Debug, Clone)]
pub struct FixedStepClock {
    step: Duration,
    max_steps: u32,
    accumulator: Duration,
    elapsed: Duration,
    ticks: u64,
}

impl FixedStepClock {
    /// A zero `step` falls back to one millisecond.
    pub fn new(step: Duration, max_steps: u32) -> Self {
        Self {
            step: if step.is_zero() {
                Duration::from_millis(1)
            } else {
                step
            },
            max_steps: max_steps.max(1),
            accumulator: Duration::ZERO,
            elapsed: Duration::ZERO,
            ticks: 0,
        }
    }

    pub fn step(&self) -> Duration {
        self.step
    }

    /// Simulated time so far.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Time waiting for the next whole step.
    pub fn pending(&self) -> Duration {
        self.accumulator
    }

    /// Adds frame time and returns how many fixed steps to run now.
    pub fn advance(&mut self, frame: Duration) -> u32 {
        self.accumulator += frame;

        let mut steps = 0;
        while self.accumulator >= self.step && steps < self.max_steps {
            self.accumulator -= self.step;
            steps += 1;
        }

        if self.accumulator >= self.step {
            let step_nanos = self.step.as_nanos();
            let remainder = self.accumulator.as_nanos() % step_nanos;
            let dropped = (self.accumulator.as_nanos() - remainder) / step_nanos;
            tracing::warn!(
                "Frame of {:?} exceeded catch-up limit, dropping {} steps",
                frame,
                dropped
            );
            self.accumulator = Duration::from_nanos(u64::try_from(remainder).unwrap_or(0));
        }

        self.elapsed += self.step * steps;
        self.ticks += u64::from(steps);
        steps
    }

    pub fn reset(&mut self) {
        self.accumulator = Duration::ZERO;
        self.elapsed = Duration::ZERO;
        self.ticks = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    #[test]
    fn accumulates_partial_frames() {
        let mut clock = FixedStepClock::new(ms(50), 8);

        assert_eq!(clock.advance(ms(30)), 0);
        assert_eq!(clock.advance(ms(30)), 1);
        assert_eq!(clock.pending(), ms(10));
        assert_eq!(clock.advance(ms(90)), 2);
        assert_eq!(clock.pending(), ms(0));
        assert_eq!(clock.elapsed(), ms(150));
        assert_eq!(clock.ticks(), 3);
    }

    #[test]
    fn caps_catch_up() {
        let mut clock = FixedStepClock::new(ms(10), 4);

        assert_eq!(clock.advance(ms(1_005)), 4);
        assert_eq!(clock.pending(), ms(5));
        assert_eq!(clock.elapsed(), ms(40));
    }

    #[test]
    fn zero_step_is_replaced() {
        let clock = FixedStepClock::new(Duration::ZERO, 0);
        assert_eq!(clock.step(), ms(1));
    }
}
