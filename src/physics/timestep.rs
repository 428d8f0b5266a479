//! Fixed-timestep accumulation.

/// Turns variable frame times into a whole number of fixed-size simulation steps.
///
/// Frame times are clamped before being accumulated so that a slow frame cannot
/// snowball into ever more steps. Whatever is left over after draining the
/// accumulator is carried into the next frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedTimestep {
    step: f32,
    max_frame_time: f32,
    accumulator: f32,
}

impl FixedTimestep {
    pub fn new(step: f32, max_frame_time: f32) -> Self {
        debug_assert!(step > 0.0, "time step must be positive");
        Self {
            step,
            max_frame_time,
            accumulator: 0.0,
        }
    }

    /// Accumulates `dt` and returns how many fixed steps are now due.
    pub fn advance(&mut self, dt: f32) -> u32 {
        // NaN and negative deltas contribute nothing.
        let frame_time = if dt.is_finite() { dt.clamp(0.0, self.max_frame_time) } else { 0.0 };
        self.accumulator += frame_time;

        let mut steps = 0;
        while self.accumulator >= self.step {
            self.accumulator -= self.step;
            steps += 1;
        }
        steps
    }

    /// Time carried over to the next frame, always below one step.
    pub fn accumulator(&self) -> f32 {
        self.accumulator
    }

    pub fn step(&self) -> f32 {
        self.step
    }

    pub fn max_frame_time(&self) -> f32 {
        self.max_frame_time
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_deltas_accumulate_until_a_step_is_due() {
        let mut timestep = FixedTimestep::new(0.1, 0.25);
        assert_eq!(timestep.advance(0.04), 0);
        assert_eq!(timestep.advance(0.04), 0);
        assert_eq!(timestep.advance(0.04), 1);
        assert!((timestep.accumulator() - 0.02).abs() < 1e-6);
    }

    #[test]
    fn test_large_delta_is_clamped() {
        let mut timestep = FixedTimestep::new(0.1, 0.25);
        assert_eq!(timestep.advance(10.0), 2);
        assert!((timestep.accumulator() - 0.05).abs() < 1e-6);
    }

    #[test]
    fn test_invalid_deltas_are_ignored() {
        let mut timestep = FixedTimestep::new(0.1, 0.25);
        assert_eq!(timestep.advance(-1.0), 0);
        assert_eq!(timestep.advance(f32::NAN), 0);
        assert_eq!(timestep.advance(f32::INFINITY), 0);
        assert_eq!(timestep.accumulator(), 0.0);
    }
}
