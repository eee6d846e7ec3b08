//! Frame-to-step mapping for the fixed-step integrators.

use serde::{Deserialize, Serialize};

/// How rendered frames map onto integration steps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum StepPolicy {
    /// One step of each integrator per frame. Simulated speed follows the
    /// frame rate.
    #[default]
    PerFrame,
    /// Sub-step each integrator to the real elapsed time, at most
    /// `max_steps_per_frame` steps per frame.
    RealTime { max_steps_per_frame: u32 },
}

/// Accumulates real time and hands out whole fixed steps.
#[derive(Debug, Clone)]
pub struct FixedStepper {
    dt: f32,
    accumulator: f32,
    step_count: u64,
}

impl FixedStepper {
    pub fn new(dt: f32) -> Self {
        Self { dt, accumulator: 0.0, step_count: 0 }
    }

    pub fn dt(&self) -> f32 {
        self.dt
    }

    pub fn step_count(&self) -> u64 {
        self.step_count
    }

    /// Add `elapsed` seconds and return how many steps are due, capped at
    /// `max_steps`. Time beyond the cap is dropped.
    pub fn steps_for(&mut self, elapsed: f32, max_steps: u32) -> u32 {
        if self.dt.is_nan() || self.dt <= 0.0 || !elapsed.is_finite() || elapsed <= 0.0 {
            return 0;
        }
        self.accumulator += elapsed;
        let due = (self.accumulator / self.dt).floor();
        let steps = if due >= max_steps as f32 { max_steps } else { due as u32 };
        self.accumulator -= steps as f32 * self.dt;
        if steps == max_steps {
            self.accumulator = self.accumulator.min(self.dt);
        }
        self.step_count += u64::from(steps);
        steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn carries_remainder_between_frames() {
        let mut s = FixedStepper::new(0.05);
        // Seven 60 Hz frames cover two 0.05 s steps
        let steps: u32 = (0..7).map(|_| s.steps_for(1.0 / 60.0, 8)).sum();
        assert_eq!(steps, 2);
        assert_eq!(s.step_count(), 2);
    }

    #[test]
    fn caps_long_frames() {
        let mut s = FixedStepper::new(0.01);
        assert_eq!(s.steps_for(1.0, 5), 5);
        // Backlog beyond one step was dropped
        assert!(s.steps_for(0.0001, 5) <= 1);
    }

    #[test]
    fn ignores_non_positive_elapsed() {
        let mut s = FixedStepper::new(0.01);
        assert_eq!(s.steps_for(0.0, 5), 0);
        assert_eq!(s.steps_for(-1.0, 5), 0);
        assert_eq!(s.steps_for(f32::NAN, 5), 0);
    }
}
