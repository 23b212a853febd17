use frustum_calib::Calibration;
use rayon::prelude::*;

use crate::config::FrustumConfig;
use crate::error::FrustumError;
use crate::fov::lidar_in_image_fov_with_projections;
use crate::types::{BoundingBox2d, ImageShape};

/// Frustum point sets, one entry per input box in input order.
///
/// `rect[i]` and `velo[i]` hold the same points, in the same order, expressed
/// in the rectified camera frame and in the velodyne frame. The fourth value
/// of every point is the reflectance, carried over unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrustumProposals {
    /// Points in the rectified camera frame.
    pub rect: Vec<Vec<[f64; 4]>>,
    /// Points in the velodyne frame.
    pub velo: Vec<Vec<[f64; 4]>>,
}

impl FrustumProposals {
    /// Number of proposals, equal to the number of input boxes.
    pub fn len(&self) -> usize {
        self.rect.len()
    }

    /// Check if there are no proposals.
    pub fn is_empty(&self) -> bool {
        self.rect.is_empty()
    }

    /// Iterate over the `(rect, velo)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&Vec<[f64; 4]>, &Vec<[f64; 4]>)> {
        self.rect.iter().zip(self.velo.iter())
    }
}

/// Extracts frustum point sets from a point cloud given 2D boxes.
///
/// Example:
///
/// ```
/// use frustum_proposal::{calib::Calibration, BoundingBox2d, FrustumConfig, FrustumProposal};
///
/// let p = [1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0];
/// let v2c = [0.0, -1.0, 0.0, 0.0, 0.0, 0.0, -1.0, 0.0, 1.0, 0.0, 0.0, 0.0];
/// let r0 = [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0];
/// let calib = Calibration::new(&p, &v2c, &r0).unwrap();
///
/// let extractor = FrustumProposal::new(calib, FrustumConfig::default());
/// let proposals = extractor.get_frustum_proposals(
///     (100, 100, 3).into(),
///     &[BoundingBox2d::new(0.0, 0.0, 50.0, 50.0)],
///     &[[5.0, 0.0, 0.0, 1.0]],
/// );
/// assert_eq!(proposals.velo[0], vec![[5.0, 0.0, 0.0, 1.0]]);
/// ```
#[derive(Debug, Clone)]
pub struct FrustumProposal {
    calib: Calibration,
    config: FrustumConfig,
}

impl FrustumProposal {
    /// Create a new extractor.
    pub fn new(calib: Calibration, config: FrustumConfig) -> Self {
        Self { calib, config }
    }

    /// Create a new extractor from row-major calibration buffers.
    pub fn from_buffers(
        p: &[f64],
        tr_velo_to_cam: &[f64],
        r0_rect: &[f64],
        config: FrustumConfig,
    ) -> Result<Self, FrustumError> {
        let calib = Calibration::new(p, tr_velo_to_cam, r0_rect)?;
        Ok(Self::new(calib, config))
    }

    /// The calibration used by the extractor.
    pub fn calibration(&self) -> &Calibration {
        &self.calib
    }

    /// The extraction parameters.
    pub fn config(&self) -> &FrustumConfig {
        &self.config
    }

    /// Extract the frustum point set of every box.
    ///
    /// See [`get_frustum_proposals`].
    pub fn get_frustum_proposals(
        &self,
        image_shape: ImageShape,
        boxes2d: &[BoundingBox2d],
        pc_velo: &[[f64; 4]],
    ) -> FrustumProposals {
        get_frustum_proposals(&self.calib, image_shape, boxes2d, pc_velo, &self.config)
    }
}

/// Extract the frustum point set of every box.
///
/// The cloud is projected once into the image. Points outside the image or
/// not farther than the clip distance are dropped. Each box then gathers the
/// remaining points whose pixel falls in the box, in cloud order.
///
/// # Arguments
///
/// * `calib` - The rig calibration.
/// * `image_shape` - The image size, used to clip the cloud to the field of view.
/// * `boxes2d` - The 2D detections.
/// * `pc_velo` - The cloud as `[x, y, z, reflectance]` in the velodyne frame.
/// * `config` - Extraction parameters.
///
/// # Returns
///
/// One point set per box, in the rectified camera frame and in the velodyne frame.
pub fn get_frustum_proposals(
    calib: &Calibration,
    image_shape: ImageShape,
    boxes2d: &[BoundingBox2d],
    pc_velo: &[[f64; 4]],
    config: &FrustumConfig,
) -> FrustumProposals {
    log::debug!("image_shape: {:?}", image_shape);
    log::debug!("boxes2d: {:?}", boxes2d);
    log::debug!("pc_velo: #{} points", pc_velo.len());

    let points_velo = pc_velo
        .iter()
        .map(|&[x, y, z, _]| [x, y, z])
        .collect::<Vec<_>>();

    let fov = lidar_in_image_fov_with_projections(
        calib,
        &points_velo,
        &image_shape.bbox(),
        config.clip_distance,
    );
    log::debug!("image fov: #{} points", fov.points.len());

    let pc_rect = calib
        .project_velo_to_rect(&points_velo)
        .into_iter()
        .zip(pc_velo.iter())
        .map(|([x, y, z], point)| [x, y, z, point[3]])
        .collect::<Vec<_>>();

    let extract = |bbox: &BoundingBox2d| {
        extract_box(calib, bbox, &fov.projections, &fov.mask, &pc_rect)
    };

    let (rect, velo): (Vec<_>, Vec<_>) = if config.parallel {
        boxes2d.par_iter().map(extract).unzip()
    } else {
        boxes2d.iter().map(extract).unzip()
    };

    log::info!("Propose {} frustum proposals", rect.len());

    FrustumProposals { rect, velo }
}

// gather the points of a single box and bring them back to the velodyne frame
fn extract_box(
    calib: &Calibration,
    bbox: &BoundingBox2d,
    projections: &[[f64; 2]],
    fov_mask: &[bool],
    pc_rect: &[[f64; 4]],
) -> (Vec<[f64; 4]>, Vec<[f64; 4]>) {
    let pc_in_box = projections
        .iter()
        .zip(fov_mask.iter())
        .zip(pc_rect.iter())
        .filter_map(|((pixel, &in_fov), point)| {
            (in_fov && bbox.contains(pixel)).then_some(*point)
        })
        .collect::<Vec<_>>();

    let points_rect = pc_in_box
        .iter()
        .map(|&[x, y, z, _]| [x, y, z])
        .collect::<Vec<_>>();

    let pc_in_box_velo = calib
        .project_rect_to_velo(&points_rect)
        .into_iter()
        .zip(pc_in_box.iter())
        .map(|([x, y, z], point)| [x, y, z, point[3]])
        .collect();

    (pc_in_box, pc_in_box_velo)
}
