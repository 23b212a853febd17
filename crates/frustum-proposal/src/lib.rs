#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Extraction parameters.
pub mod config;

/// Error types for the frustum proposals.
pub mod error;

/// Field of view filtering of point clouds.
pub mod fov;

/// Per box frustum extraction.
pub mod frustum;

/// Bounding boxes and image shapes.
pub mod types;

pub use config::FrustumConfig;
pub use error::FrustumError;
pub use frustum::{get_frustum_proposals, FrustumProposal, FrustumProposals};
pub use types::{BoundingBox2d, ImageShape};

pub use frustum_calib as calib;
