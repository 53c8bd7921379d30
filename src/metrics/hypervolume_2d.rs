use crate::core::HvError;
use crate::metrics::hypervolume::{check_args, check_ref_point, HyperVolumeAlgorithm};
use crate::utils::volume_between;

/// Calculate the hyper-volume for a two-objective problem by summing the areas of the
/// rectangles between the Pareto front and the chosen reference point.
///
/// **IMPLEMENTATION NOTES**:
/// 1) The reference point must be dominated by all the points.
/// 2) Points are sorted by their second objective and swept in ascending order. The width of
///    each horizontal strip is the largest distance between the first objective and the reference
///    point seen so far; dominated points never widen a strip and are therefore skipped. This
///    runs in `O(n log n)`.
#[derive(Debug, Default, Clone)]
pub struct HyperVolume2D;

impl HyperVolume2D {
    /// Create the 2D algorithm.
    ///
    /// returns: `HyperVolume2D`
    pub fn new() -> Self {
        Self
    }

    /// Sweep the points and calculate their hyper-volume. The points are sorted in place; only
    /// their first two coordinates are read.
    ///
    /// # Arguments
    ///
    /// * `points`: The points to sort and measure.
    /// * `reference_point`: The reference point. Only the first two coordinates are used.
    ///
    /// returns: `f64`
    pub(crate) fn sweep(points: &mut [Vec<f64>], reference_point: &[f64]) -> f64 {
        match points.len() {
            0 => return 0.0,
            1 => return volume_between(&points[0], reference_point, 2),
            _ => {}
        }

        points.sort_unstable_by(|a, b| a[1].total_cmp(&b[1]));

        let mut width = reference_point[0] - points[0][0];
        let mut volume = 0.0;
        for pair in points.windows(2) {
            volume += (pair[1][1] - pair[0][1]) * width;
            width = width.max(reference_point[0] - pair[1][0]);
        }

        // last strip is between the largest y and the reference point
        let last = &points[points.len() - 1];
        volume + (reference_point[1] - last[1]) * width
    }
}

impl HyperVolumeAlgorithm for HyperVolume2D {
    fn name(&self) -> &'static str {
        "2D Hyper-volume"
    }

    fn verify_before_compute(
        &self,
        points: &[Vec<f64>],
        reference_point: &[f64],
    ) -> Result<(), HvError> {
        check_args(points, reference_point)?;
        if reference_point.len() != 2 {
            return Err(HvError::Metric(
                self.name().to_string(),
                format!(
                    "This can only be used on a 2-objective problem, but the reference point has {} coordinates",
                    reference_point.len()
                ),
            ));
        }
        check_ref_point(points, reference_point)
    }

    fn compute(&mut self, points: &[Vec<f64>], reference_point: &[f64]) -> Result<f64, HvError> {
        self.verify_before_compute(points, reference_point)?;
        let mut points = points.to_vec();
        Ok(Self::sweep(&mut points, reference_point))
    }
}

#[cfg(test)]
/// Test the hyper-volume calculation in 2D. Expected values were manually calculated.
mod test {
    use float_cmp::assert_approx_eq;

    use crate::core::test_utils::{assert_hv_eq, brute_force_hv, random_points, seeded_rng};
    use crate::core::HvError;
    use crate::metrics::{HyperVolume2D, HyperVolumeAlgorithm};

    fn hv_2d(points: &[Vec<f64>], reference_point: &[f64]) -> f64 {
        let mut hv = HyperVolume2D::new();
        hv.verify_before_compute(points, reference_point).unwrap();
        hv.compute(points, reference_point).unwrap()
    }

    #[test]
    /// Two overlapping rectangles
    fn test_overlapping_points() {
        let points = vec![vec![1.0, 1.0], vec![2.0, 0.5]];
        assert_eq!(hv_2d(&points, &[3.0, 3.0]), 4.5);
    }

    #[test]
    // All non-dominated solutions
    fn test_non_dominated_solutions() {
        let points = vec![vec![1.0, 2.0], vec![0.5, 4.0], vec![0.0, 6.0]];
        assert_eq!(hv_2d(&points, &[10.0, 10.0]), 77.0);
    }

    #[test]
    /// One solution is dominated
    fn test_dominated_solutions() {
        let points = vec![vec![1.0, 2.0], vec![3.0, 4.0], vec![0.0, 6.0]];
        assert_eq!(hv_2d(&points, &[10.0, 10.0]), 76.0);
    }

    #[test]
    /// Two solutions are dominated - this returns the area of the rectangle between the reference
    /// point and the dominating point
    fn test_two_dominated_solutions() {
        let points = vec![vec![-1.0, 2.0], vec![0.5, 4.0], vec![0.0, 6.0]];
        assert_eq!(hv_2d(&points, &[10.0, 10.0]), 88.0);
    }

    #[test]
    fn test_single_and_empty() {
        assert_eq!(hv_2d(&[vec![-1.0, -2.0]], &[10.0, 10.0]), 132.0);
        assert_eq!(hv_2d(&[], &[10.0, 10.0]), 0.0);
    }

    #[test]
    /// Duplicated points with ties on the sorting coordinate
    fn test_duplicated_points() {
        let points = vec![
            vec![1.0, 2.0],
            vec![1.0, 2.0],
            vec![3.0, 2.0],
            vec![0.5, 4.0],
        ];
        assert_eq!(hv_2d(&points, &[10.0, 10.0]), 75.0);
    }

    #[test]
    fn test_input_is_not_sorted_in_place() {
        let points = vec![vec![0.0, 6.0], vec![1.0, 2.0], vec![0.5, 4.0]];
        let copy = points.clone();
        hv_2d(&points, &[10.0, 10.0]);
        assert_eq!(points, copy);
    }

    #[test]
    fn test_wrong_dimensions() {
        let hv = HyperVolume2D::new();
        let err = hv
            .verify_before_compute(&[vec![1.0, 1.0, 1.0]], &[2.0, 2.0, 2.0])
            .unwrap_err()
            .to_string();
        assert!(err.contains("This can only be used on a 2-objective problem"), "{}", err);
    }

    #[test]
    fn test_compute_validates_arguments() {
        let mut hv = HyperVolume2D::new();
        let points = vec![vec![1.0, 2.0], vec![3.0, 0.5]];
        assert_eq!(
            hv.compute(&points, &[1.0, 1.0]),
            Err(HvError::DominanceViolation(0, 1, 2.0, 1.0))
        );
        assert_eq!(
            hv.compute(&[vec![1.0, 2.0], vec![1.0]], &[3.0, 3.0]),
            Err(HvError::DimensionMismatch(1, 1, 2))
        );
        assert_eq!(
            hv.compute(&[vec![1.0, 2.0]], &[f64::NAN, 3.0]),
            Err(HvError::NaN("reference point coordinate".to_string(), 0))
        );
        assert!(matches!(
            hv.compute(&[vec![1.0, 1.0, 1.0]], &[2.0, 2.0, 2.0]),
            Err(HvError::Metric(..))
        ));
        assert_eq!(hv.compute(&points, &[4.0, 4.0]), Ok(7.5));
    }

    #[test]
    fn test_against_brute_force() {
        let mut rng = seeded_rng(7);
        for n in 1..10 {
            let points = random_points(&mut rng, n, 2);
            let reference_point = [1.0, 1.0];
            assert_hv_eq(
                hv_2d(&points, &reference_point),
                brute_force_hv(&points, &reference_point),
            );
        }
    }

    #[test]
    fn test_large_front() {
        // points on the line x + y = 1
        let n = 1000;
        let points: Vec<Vec<f64>> = (0..n)
            .map(|i| {
                let x = i as f64 / (n - 1) as f64;
                vec![x, 1.0 - x]
            })
            .collect();
        // triangle above the line minus the staircase between the points
        let step = 1.0 / (n - 1) as f64;
        let expected = 0.5 - 0.5 * step;
        assert_approx_eq!(f64, hv_2d(&points, &[1.0, 1.0]), expected, epsilon = 1e-9);
    }
}
