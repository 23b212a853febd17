use frustum_calib::Calibration;

use crate::types::BoundingBox2d;

/// Output of [`lidar_in_image_fov_with_projections`].
#[derive(Debug, Clone, PartialEq)]
pub struct FovResult {
    /// The points kept by the filter, in input order.
    pub points: Vec<[f64; 3]>,
    /// The pixel of every input point, kept or not.
    pub projections: Vec<[f64; 2]>,
    /// Whether each input point was kept.
    pub mask: Vec<bool>,
}

/// Compute which pixels fall in a box, upper bounds excluded.
///
/// # Arguments
///
/// * `projections` - Pixel coordinates `[u, v]`.
/// * `bbox` - The box to test against.
///
/// # Returns
///
/// One flag per pixel, in input order.
pub fn box_mask(projections: &[[f64; 2]], bbox: &BoundingBox2d) -> Vec<bool> {
    projections.iter().map(|pixel| bbox.contains(pixel)).collect()
}

/// Filter velodyne points, keeping those that project into a box of the image.
///
/// A point is kept if its pixel lies in `[xmin, xmax) x [ymin, ymax)` and its
/// forward coordinate is strictly greater than `clip_distance`.
///
/// # Arguments
///
/// * `calib` - The rig calibration.
/// * `points_velo` - Points in the velodyne frame.
/// * `bbox` - The pixel region to keep.
/// * `clip_distance` - Minimum forward distance, exclusive.
///
/// # Returns
///
/// The kept points, the pixels of all the input points and the keep mask.
pub fn lidar_in_image_fov_with_projections(
    calib: &Calibration,
    points_velo: &[[f64; 3]],
    bbox: &BoundingBox2d,
    clip_distance: f64,
) -> FovResult {
    let projections = calib.project_velo_to_image(points_velo);

    let mask = box_mask(&projections, bbox)
        .into_iter()
        .zip(points_velo.iter())
        .map(|(in_box, point)| in_box && point[0] > clip_distance)
        .collect::<Vec<_>>();

    let points = points_velo
        .iter()
        .zip(mask.iter())
        .filter_map(|(point, &keep)| keep.then_some(*point))
        .collect();

    FovResult {
        points,
        projections,
        mask,
    }
}

/// Filter velodyne points, keeping those that project into a box of the image.
///
/// Same as [`lidar_in_image_fov_with_projections`] but only returns the kept points.
pub fn lidar_in_image_fov(
    calib: &Calibration,
    points_velo: &[[f64; 3]],
    bbox: &BoundingBox2d,
    clip_distance: f64,
) -> Vec<[f64; 3]> {
    lidar_in_image_fov_with_projections(calib, points_velo, bbox, clip_distance).points
}
