use thiserror::Error;

/// An error type for the calibration module.
#[derive(Debug, Error, PartialEq)]
pub enum CalibrationError {
    /// A calibration buffer is missing or does not hold the values of its matrix.
    #[error("Invalid calibration: `{key}` expects {expected} values, got {actual}")]
    InvalidCalibration {
        /// Name of the calibration entry.
        key: String,
        /// Number of values the matrix needs.
        expected: usize,
        /// Number of values found.
        actual: usize,
    },
}

impl CalibrationError {
    pub(crate) fn invalid(key: &str, expected: usize, actual: usize) -> Self {
        Self::InvalidCalibration {
            key: key.to_string(),
            expected,
            actual,
        }
    }
}
