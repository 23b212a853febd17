use serde::{Deserialize, Serialize};

use crate::error::FrustumError;

/// Minimum forward distance in meters for a point to be projected.
pub const DEFAULT_CLIP_DISTANCE: f64 = 2.0;

/// Parameters of the frustum extraction.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct FrustumConfig {
    /// Points with a forward (velodyne `x`) distance not strictly greater than
    /// this value are dropped before the box test.
    pub clip_distance: f64,
    /// Process the boxes in parallel.
    pub parallel: bool,
}

impl Default for FrustumConfig {
    fn default() -> Self {
        Self {
            clip_distance: DEFAULT_CLIP_DISTANCE,
            parallel: false,
        }
    }
}

impl FrustumConfig {
    /// Set the clip distance.
    pub fn with_clip_distance(mut self, clip_distance: f64) -> Self {
        self.clip_distance = clip_distance;
        self
    }

    /// Enable or disable the parallel per box extraction.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Parse a config from a JSON string. Missing fields take their default value.
    ///
    /// Example:
    ///
    /// ```
    /// use frustum_proposal::FrustumConfig;
    ///
    /// let config = FrustumConfig::from_json_str(r#"{ "clip_distance": 5.0 }"#).unwrap();
    /// assert_eq!(config.clip_distance, 5.0);
    /// assert!(!config.parallel);
    /// ```
    pub fn from_json_str(json: &str) -> Result<Self, FrustumError> {
        serde_json::from_str(json).map_err(|e| FrustumError::InvalidConfig(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let config = FrustumConfig::default();
        assert_eq!(config.clip_distance, 2.0);
        assert!(!config.parallel);
    }

    #[test]
    fn test_builder() {
        let config = FrustumConfig::default()
            .with_clip_distance(0.5)
            .with_parallel(true);
        assert_eq!(config.clip_distance, 0.5);
        assert!(config.parallel);
    }

    #[test]
    fn test_from_json_str() -> Result<(), FrustumError> {
        let config = FrustumConfig::from_json_str(r#"{ "parallel": true }"#)?;
        assert_eq!(config, FrustumConfig::default().with_parallel(true));

        let config = FrustumConfig::from_json_str("{}")?;
        assert_eq!(config, FrustumConfig::default());
        Ok(())
    }

    #[test]
    fn test_from_json_str_invalid() {
        let res = FrustumConfig::from_json_str(r#"{ "clip_distance": "far" }"#);
        assert!(matches!(res, Err(FrustumError::InvalidConfig(_))));
    }
}
