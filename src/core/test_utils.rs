use float_cmp::{approx_eq, F64Margin};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::utils::volume_between;

/// Get a seeded random number generator so that the generated points are reproducible.
///
/// # Arguments
///
/// * `seed`: The seed number.
///
/// returns: `ChaCha8Rng`
pub(crate) fn seeded_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Generate `n` random points with `d` coordinates in the `[0, 1)` range. The points are not
/// necessarily mutually non-dominated.
///
/// # Arguments
///
/// * `rng`: The random number generator.
/// * `n`: The number of points.
/// * `d`: The number of coordinates (objectives).
///
/// returns: `Vec<Vec<f64>>`
pub(crate) fn random_points(rng: &mut ChaCha8Rng, n: usize, d: usize) -> Vec<Vec<f64>> {
    (0..n)
        .map(|_| (0..d).map(|_| rng.gen::<f64>()).collect())
        .collect()
}

/// Generate `n` mutually non-dominated points lying on the positive orthant of the unit
/// hyper-sphere with `d` coordinates (i.e. a concave DTLZ2-like front).
///
/// # Arguments
///
/// * `rng`: The random number generator.
/// * `n`: The number of points.
/// * `d`: The number of coordinates (objectives).
///
/// returns: `Vec<Vec<f64>>`
pub(crate) fn random_front(rng: &mut ChaCha8Rng, n: usize, d: usize) -> Vec<Vec<f64>> {
    (0..n)
        .map(|_| {
            let raw: Vec<f64> = (0..d).map(|_| rng.gen_range(0.01..1.0)).collect();
            let norm = raw.iter().map(|v| v * v).sum::<f64>().sqrt();
            raw.iter().map(|v| v / norm).collect()
        })
        .collect()
}

/// Calculate the hyper-volume with the inclusion-exclusion principle over all the point
/// subsets. This is exponential in the number of points and is only used to validate the other
/// algorithms on small sets.
///
/// # Arguments
///
/// * `points`: The points.
/// * `reference_point`: The reference point.
///
/// returns: `f64`
pub(crate) fn brute_force_hv(points: &[Vec<f64>], reference_point: &[f64]) -> f64 {
    let n = points.len();
    let d = reference_point.len();
    let mut volume = 0.0;
    for mask in 1..(1_usize << n) {
        let mut corner = vec![f64::NEG_INFINITY; d];
        for (p_idx, point) in points.iter().enumerate() {
            if mask & (1 << p_idx) != 0 {
                for (c, v) in corner.iter_mut().zip(point) {
                    *c = c.max(*v);
                }
            }
        }
        let sign = if mask.count_ones() % 2 == 1 { 1.0 } else { -1.0 };
        volume += sign * volume_between(&corner, reference_point, d);
    }
    volume
}

/// Assert that two hyper-volume values are equal within a relative tolerance of `1e-9`.
///
/// # Arguments
///
/// * `calculated`: The calculated value.
/// * `expected`: The expected value.
///
/// returns: `()`
pub(crate) fn assert_hv_eq(calculated: f64, expected: f64) {
    let margin = F64Margin {
        epsilon: 1e-9 * expected.abs().max(1.0),
        ulps: 4,
    };
    if !approx_eq!(f64, calculated, expected, margin) {
        panic!(
            r#"assertion failed: `(left approx_eq right)`
                    left: `{calculated:?}`,
                    right: `{expected:?}`"#,
        )
    }
}
