use thiserror::Error;

/// Errors raised at the array boundary before any dispersion is computed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DispersionError {
    #[error("time and flux lengths differ: {time} != {flux}")]
    DimensionMismatch { time: usize, flux: usize },
}
