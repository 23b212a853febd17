use glam::{DAffine3, DMat3, DVec3};

/// Convert a set of cartesian points to homogeneous coordinates by appending a one.
///
/// # Arguments
///
/// * `points` - A set of 3D points.
///
/// # Returns
///
/// The points as `[x, y, z, 1]`.
///
/// Example:
///
/// ```
/// use frustum_calib::linalg::to_homogeneous;
///
/// let points_hom = to_homogeneous(&[[1.0, 2.0, 3.0]]);
/// assert_eq!(points_hom, vec![[1.0, 2.0, 3.0, 1.0]]);
/// ```
pub fn to_homogeneous(points: &[[f64; 3]]) -> Vec<[f64; 4]> {
    points.iter().map(|&[x, y, z]| [x, y, z, 1.0]).collect()
}

/// Build a 3x4 matrix `[M|t]` from 12 row-major values.
///
/// # Arguments
///
/// * `values` - The matrix values, first row first.
///
/// # Returns
///
/// The matrix as an affine transform where `matrix3` holds `M` and `translation` holds `t`.
pub fn affine_from_row_major(values: &[f64; 12]) -> DAffine3 {
    let matrix3 = DMat3::from_cols_array(&[
        values[0], values[4], values[8], //
        values[1], values[5], values[9], //
        values[2], values[6], values[10],
    ]);
    let translation = DVec3::new(values[3], values[7], values[11]);
    DAffine3::from_mat3_translation(matrix3, translation)
}

/// Build a 3x3 matrix from 9 row-major values.
pub fn mat3_from_row_major(values: &[f64; 9]) -> DMat3 {
    DMat3::from_cols_array(values).transpose()
}

/// Convert a 3x4 affine matrix back to row-major rows.
pub fn affine_to_rows(affine: &DAffine3) -> [[f64; 4]; 3] {
    let m = affine.matrix3.transpose().to_cols_array_2d();
    let t = affine.translation;
    [
        [m[0][0], m[0][1], m[0][2], t.x],
        [m[1][0], m[1][1], m[1][2], t.y],
        [m[2][0], m[2][1], m[2][2], t.z],
    ]
}

/// Convert a 3x3 matrix back to row-major rows.
pub fn mat3_to_rows(mat: &DMat3) -> [[f64; 3]; 3] {
    mat.transpose().to_cols_array_2d()
}

/// Invert a rigid body transform `[R|t]`.
///
/// The inverse is `[R^T | -R^T t]`. Only a transpose and a matrix-vector
/// product are involved, so the operation never fails.
///
/// # Arguments
///
/// * `transform` - The rigid transform to invert.
///
/// # Returns
///
/// The inverse rigid transform.
///
/// PRECONDITION: the linear part of `transform` is a rotation.
pub fn inverse_rigid_transform(transform: &DAffine3) -> DAffine3 {
    let rotation_inv = transform.matrix3.transpose();
    let translation_inv = -(rotation_inv * transform.translation);
    DAffine3::from_mat3_translation(rotation_inv, translation_inv)
}
