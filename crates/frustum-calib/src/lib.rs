#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Calibration matrices and frame-to-frame projections.
pub mod calibration;

/// Error types for the calibration module.
pub mod error;

/// Fixed-size linear algebra helpers.
pub mod linalg;

pub use calibration::{Calibration, CalibrationMap};
pub use error::CalibrationError;
