//! # Simulated Time
//!
//! Mining and processing "take time" by blocking the single control
//! thread - a pacing mechanism, not concurrency. Library users and tests
//! run with [`Pacing::Off`] (delays computed but never slept); the
//! interactive front-end opts into real sleeps.

use std::thread;
use std::time::Duration;

/// How simulated delays are applied.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Pacing {
    /// Compute durations but never block. Default.
    Off,
    /// Block the calling thread, scaling every delay by the factor
    /// (`1.0` reproduces real time, `0.1` runs ten times faster).
    Scaled(f64),
}

impl Default for Pacing {
    fn default() -> Self {
        Self::Off
    }
}

impl Pacing {
    /// Real-time pacing.
    #[must_use]
    pub const fn real_time() -> Self {
        Self::Scaled(1.0)
    }

    /// Applies a delay of `seconds` and returns the duration charged.
    ///
    /// Negative or non-finite inputs are treated as zero.
    pub fn delay(self, seconds: f64) -> Duration {
        let seconds = if seconds.is_finite() { seconds.max(0.0) } else { 0.0 };
        let duration = Duration::from_secs_f64(seconds);
        match self {
            Self::Off => duration,
            Self::Scaled(scale) => {
                let scale = if scale.is_finite() { scale.max(0.0) } else { 0.0 };
                thread::sleep(duration.mul_f64(scale));
                duration
            }
        }
    }
}
