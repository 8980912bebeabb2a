//! Phase dispersion of unevenly sampled time series.
//!
//! The core operation is [`compute_dispersion`]: fold the observations at each candidate
//! period, order them by phase and sum the absolute differences between phase-adjacent
//! values. The remaining modules drive it from files in a run directory.

pub mod config;
pub mod data;
pub mod dispersion;
pub mod error;
pub mod manager;
pub mod signal;
pub mod types;

pub use dispersion::{PhaseFolder, compute_dispersion, naive_dispersion, phase_dispersion};
pub use error::DispersionError;
pub use types::{Observation, PhasedObservation};
