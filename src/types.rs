//! Observation data types.

use serde::{Deserialize, Serialize};

/// Single sample of a time series.
///
/// Observations may be supplied in any order; they are never required to be sorted by time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Time of the sample.
    pub time: f64,
    /// Measured value (e.g. flux) at `time`.
    pub value: f64,
}

impl Observation {
    /// Create a new observation.
    pub fn new(time: f64, value: f64) -> Self {
        Self { time, value }
    }

    /// Fold the observation modulo `period`.
    ///
    /// Uses the floating-point remainder, so the phase keeps the sign of the time
    /// and is `NaN` when `period` is zero.
    pub fn fold(&self, period: f64) -> PhasedObservation {
        PhasedObservation {
            phase: self.time % period,
            value: self.value,
        }
    }
}

impl From<(f64, f64)> for Observation {
    fn from((time, value): (f64, f64)) -> Self {
        Self::new(time, value)
    }
}

/// Observation folded at a particular period.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhasedObservation {
    pub phase: f64,
    pub value: f64,
}
