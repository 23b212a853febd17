use std::collections::HashMap;

use glam::{DAffine3, DMat3, DMat4, DVec3, DVec4};
use serde::{Deserialize, Serialize};

use crate::error::CalibrationError;
use crate::linalg;

/// Key of the camera projection matrix in a calibration mapping.
pub const KEY_P: &str = "P";
/// Key of the velodyne to reference camera transform in a calibration mapping.
pub const KEY_TR_VELO_TO_CAM: &str = "Tr_velo_to_cam";
/// Key of the rectification matrix in a calibration mapping.
pub const KEY_R0_RECT: &str = "R0_rect";

/// Flattened calibration buffers as handed over by a calibration reader.
///
/// All matrices are stored row-major. Missing entries deserialize to empty
/// buffers and are rejected when converting into a [`Calibration`].
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct CalibrationMap {
    /// Camera projection matrix, 3x4.
    #[serde(rename = "P", default)]
    pub p: Vec<f64>,
    /// Rigid transform from velodyne to reference camera, 3x4.
    #[serde(rename = "Tr_velo_to_cam", default)]
    pub tr_velo_to_cam: Vec<f64>,
    /// Rectification rotation of the reference camera, 3x3.
    #[serde(rename = "R0_rect", default)]
    pub r0_rect: Vec<f64>,
}

impl TryFrom<CalibrationMap> for Calibration {
    type Error = CalibrationError;

    fn try_from(map: CalibrationMap) -> Result<Self, Self::Error> {
        Calibration::new(&map.p, &map.tr_velo_to_cam, &map.r0_rect)
    }
}

/// Camera-lidar calibration of a KITTI-style rig.
///
/// Holds the projection matrix `P`, the rigid transform `V2C` from the
/// velodyne frame to the reference camera frame, its inverse `C2V` and the
/// rectification rotation `R0`. Frames:
///
/// * velo: range sensor frame, `x` forward.
/// * ref: reference (unrectified) camera frame.
/// * rect: rectified camera frame, `z` is the depth.
/// * image: pixel coordinates `(u, v)`.
///
/// All projections take an ordered set of points and return a new set in the
/// same order. Points at zero depth project to non-finite pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct Calibration {
    p: DAffine3,
    v2c: DAffine3,
    c2v: DAffine3,
    r0: DMat3,
}

impl Calibration {
    /// Create a calibration from row-major buffers.
    ///
    /// # Arguments
    ///
    /// * `p` - The 3x4 projection matrix (12 values).
    /// * `tr_velo_to_cam` - The 3x4 velodyne to camera rigid transform (12 values).
    /// * `r0_rect` - The 3x3 rectification matrix (9 values).
    ///
    /// # Errors
    ///
    /// Returns [`CalibrationError::InvalidCalibration`] if a buffer has the wrong length.
    ///
    /// Example:
    ///
    /// ```
    /// use frustum_calib::Calibration;
    ///
    /// let p = [1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0];
    /// let r0 = [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0];
    /// let calib = Calibration::new(&p, &p, &r0).unwrap();
    /// assert_eq!(calib.project_velo_to_ref(&[[1.0, 2.0, 3.0]]), vec![[1.0, 2.0, 3.0]]);
    /// ```
    pub fn new(
        p: &[f64],
        tr_velo_to_cam: &[f64],
        r0_rect: &[f64],
    ) -> Result<Self, CalibrationError> {
        let p = <&[f64; 12]>::try_from(p)
            .map_err(|_| CalibrationError::invalid(KEY_P, 12, p.len()))?;
        let v2c = <&[f64; 12]>::try_from(tr_velo_to_cam)
            .map_err(|_| CalibrationError::invalid(KEY_TR_VELO_TO_CAM, 12, tr_velo_to_cam.len()))?;
        let r0 = <&[f64; 9]>::try_from(r0_rect)
            .map_err(|_| CalibrationError::invalid(KEY_R0_RECT, 9, r0_rect.len()))?;

        let v2c = linalg::affine_from_row_major(v2c);

        Ok(Self {
            p: linalg::affine_from_row_major(p),
            c2v: linalg::inverse_rigid_transform(&v2c),
            v2c,
            r0: linalg::mat3_from_row_major(r0),
        })
    }

    /// Create a calibration from a key to values mapping.
    ///
    /// Reads the `P`, `Tr_velo_to_cam` and `R0_rect` entries. Other entries are
    /// ignored. A missing entry is reported as a buffer with zero values.
    pub fn from_map(map: &HashMap<String, Vec<f64>>) -> Result<Self, CalibrationError> {
        let get = |key: &str| map.get(key).map(Vec::as_slice).unwrap_or(&[]);
        Self::new(get(KEY_P), get(KEY_TR_VELO_TO_CAM), get(KEY_R0_RECT))
    }

    /// The projection matrix as row-major rows.
    pub fn p(&self) -> [[f64; 4]; 3] {
        linalg::affine_to_rows(&self.p)
    }

    /// The velodyne to reference camera transform as row-major rows.
    pub fn v2c(&self) -> [[f64; 4]; 3] {
        linalg::affine_to_rows(&self.v2c)
    }

    /// The reference camera to velodyne transform as row-major rows.
    pub fn c2v(&self) -> [[f64; 4]; 3] {
        linalg::affine_to_rows(&self.c2v)
    }

    /// The rectification matrix as row-major rows.
    pub fn r0(&self) -> [[f64; 3]; 3] {
        linalg::mat3_to_rows(&self.r0)
    }

    /// Project points from the velodyne frame to the reference camera frame.
    pub fn project_velo_to_ref(&self, points_velo: &[[f64; 3]]) -> Vec<[f64; 3]> {
        apply_homogeneous(&self.v2c, points_velo)
    }

    /// Project points from the reference camera frame to the velodyne frame.
    pub fn project_ref_to_velo(&self, points_ref: &[[f64; 3]]) -> Vec<[f64; 3]> {
        apply_homogeneous(&self.c2v, points_ref)
    }

    /// Project points from the reference camera frame to the rectified camera frame.
    pub fn project_ref_to_rect(&self, points_ref: &[[f64; 3]]) -> Vec<[f64; 3]> {
        apply_linear(&self.r0, points_ref)
    }

    /// Project points from the rectified camera frame to the reference camera frame.
    ///
    /// The inverse of `R0` is computed on every call. A singular `R0` yields
    /// non-finite coordinates.
    pub fn project_rect_to_ref(&self, points_rect: &[[f64; 3]]) -> Vec<[f64; 3]> {
        apply_linear(&self.r0.inverse(), points_rect)
    }

    /// Project points from the rectified camera frame to the velodyne frame.
    pub fn project_rect_to_velo(&self, points_rect: &[[f64; 3]]) -> Vec<[f64; 3]> {
        let points_ref = self.project_rect_to_ref(points_rect);
        self.project_ref_to_velo(&points_ref)
    }

    /// Project points from the velodyne frame to the rectified camera frame.
    pub fn project_velo_to_rect(&self, points_velo: &[[f64; 3]]) -> Vec<[f64; 3]> {
        let points_ref = self.project_velo_to_ref(points_velo);
        self.project_ref_to_rect(&points_ref)
    }

    /// Project points from the rectified camera frame to pixel coordinates.
    ///
    /// # Arguments
    ///
    /// * `points_rect` - Points in the rectified camera frame.
    ///
    /// # Returns
    ///
    /// The `[u, v]` pixel of every point, after dividing by the depth.
    pub fn project_rect_to_image(&self, points_rect: &[[f64; 3]]) -> Vec<[f64; 2]> {
        let p = DMat4::from(self.p);
        linalg::to_homogeneous(points_rect)
            .into_iter()
            .map(|point_hom| {
                let uvw = (p * DVec4::from_array(point_hom)).truncate();
                [uvw.x / uvw.z, uvw.y / uvw.z]
            })
            .collect()
    }

    /// Project points from the velodyne frame to pixel coordinates.
    pub fn project_velo_to_image(&self, points_velo: &[[f64; 3]]) -> Vec<[f64; 2]> {
        let points_rect = self.project_velo_to_rect(points_velo);
        self.project_rect_to_image(&points_rect)
    }
}

// right-multiply homogeneous points by the transpose of a 3x4 matrix
fn apply_homogeneous(transform: &DAffine3, points: &[[f64; 3]]) -> Vec<[f64; 3]> {
    let transform = DMat4::from(*transform);
    linalg::to_homogeneous(points)
        .into_iter()
        .map(|point_hom| {
            (transform * DVec4::from_array(point_hom))
                .truncate()
                .to_array()
        })
        .collect()
}

fn apply_linear(mat: &DMat3, points: &[[f64; 3]]) -> Vec<[f64; 3]> {
    points
        .iter()
        .map(|&point| (*mat * DVec3::from_array(point)).to_array())
        .collect()
}
