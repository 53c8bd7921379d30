use crate::core::HvError;

/// Calculate the volume of the hyper-rectangle between a `point` and the `reference_point` using
/// their first `dimensions` coordinates. The reference point must be dominated by the point
/// (i.e. each coordinate must be larger or equal), otherwise the volume is meaningless. With
/// `dimensions` set to `0`, this returns `1.0`.
///
/// # Arguments
///
/// * `point`: The point.
/// * `reference_point`: The reference point.
/// * `dimensions`: The number of leading coordinates to use.
///
/// returns: `f64`
///
/// # Example
/// ```
/// use optivolume::utils::volume_between;
///
/// assert_eq!(volume_between(&[1.0, 2.0, 0.0], &[3.0, 3.0, 3.0], 2), 2.0);
/// ```
pub fn volume_between(point: &[f64], reference_point: &[f64], dimensions: usize) -> f64 {
    point[..dimensions]
        .iter()
        .zip(&reference_point[..dimensions])
        .map(|(p, r)| r - p)
        .product()
}

/// Calculate the vector minimum value.
///
/// # Arguments
///
/// * `v`: The vector.
///
/// returns: `Result<f64, HvError>`
pub fn vector_min(v: &[f64]) -> Result<f64, HvError> {
    Ok(*v
        .iter()
        .min_by(|a, b| a.total_cmp(b))
        .ok_or(HvError::Generic(
            "Cannot calculate vector min value".to_string(),
        ))?)
}

/// Calculate the vector maximum value.
///
/// # Arguments
///
/// * `v`: The vector.
///
/// returns: `Result<f64, HvError>`
pub fn vector_max(v: &[f64]) -> Result<f64, HvError> {
    Ok(*v
        .iter()
        .max_by(|a, b| a.total_cmp(b))
        .ok_or(HvError::Generic(
            "Cannot calculate vector max value".to_string(),
        ))?)
}
