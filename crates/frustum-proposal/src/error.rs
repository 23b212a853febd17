use frustum_calib::CalibrationError;
use thiserror::Error;

/// An error type for the frustum proposals.
#[derive(Debug, Error)]
pub enum FrustumError {
    /// The calibration could not be built.
    #[error(transparent)]
    Calibration(#[from] CalibrationError),

    /// The extraction parameters could not be parsed.
    #[error("Invalid frustum config: {0}")]
    InvalidConfig(String),
}
