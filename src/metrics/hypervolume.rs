use log::{debug, warn};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::core::{HvError, ObjectiveDirection, Population};
use crate::metrics::{HyperVolume2D, Wfg};
use crate::utils::vector_max;

/// Check the input arguments of the hyper-volume functions: the reference point must have at
/// least one coordinate, all the points must have the same number of coordinates as the reference
/// point and no coordinate can be NaN.
///
/// # Arguments
///
/// * `points`: The points to use in the calculation.
/// * `reference_point`: The reference or anti-optimal point to use in the calculation.
///
/// returns: `Result<(), HvError>`
pub(crate) fn check_args(points: &[Vec<f64>], reference_point: &[f64]) -> Result<(), HvError> {
    if reference_point.is_empty() {
        return Err(HvError::NoDimensions);
    }
    if let Some(c_idx) = reference_point.iter().position(|v| v.is_nan()) {
        return Err(HvError::NaN("reference point coordinate".to_string(), c_idx));
    }

    for (p_idx, point) in points.iter().enumerate() {
        if point.len() != reference_point.len() {
            return Err(HvError::DimensionMismatch(
                p_idx,
                point.len(),
                reference_point.len(),
            ));
        }
        if point.iter().any(|v| v.is_nan()) {
            return Err(HvError::NaN("point".to_string(), p_idx));
        }
    }

    Ok(())
}

/// Check that the reference point is dominated by (i.e. it is worse or equal than) all the
/// points, assuming all objectives are minimised. This is essential to ensure that the
/// hyper-volume is properly calculated.
///
/// # Arguments
///
/// * `points`: The points to use in the calculation.
/// * `reference_point`: The reference or anti-optimal point to use in the calculation.
///
/// returns: `Result<(), HvError>`
pub(crate) fn check_ref_point(points: &[Vec<f64>], reference_point: &[f64]) -> Result<(), HvError> {
    let mut points_on_boundary = 0;
    for (p_idx, point) in points.iter().enumerate() {
        for (c_idx, (value, ref_value)) in point.iter().zip(reference_point).enumerate() {
            if value > ref_value {
                return Err(HvError::DominanceViolation(
                    p_idx, c_idx, *value, *ref_value,
                ));
            }
        }
        if point.iter().zip(reference_point).any(|(v, r)| v == r) {
            points_on_boundary += 1;
        }
    }

    if points_on_boundary > 0 {
        warn!(
            "{} points lie on the boundary of the reference point and do not contribute to the hyper-volume",
            points_on_boundary
        );
    }
    Ok(())
}

/// A method to calculate the exact hyper-volume of a set of points, assuming all objectives are
/// minimised.
pub trait HyperVolumeAlgorithm {
    /// The name of the method.
    ///
    /// returns: `&'static str`
    fn name(&self) -> &'static str;

    /// Check the arguments and whether the method can be used on the points and the reference
    /// point. This is called by [`HyperVolumeAlgorithm::compute`].
    ///
    /// # Arguments
    ///
    /// * `points`: The points. Each point must have the same size as the reference point.
    /// * `reference_point`: The reference point.
    ///
    /// returns: `Result<(), HvError>`
    fn verify_before_compute(
        &self,
        points: &[Vec<f64>],
        reference_point: &[f64],
    ) -> Result<(), HvError>;

    /// Validate the arguments and calculate the hyper-volume. The points are not modified.
    ///
    /// # Arguments
    ///
    /// * `points`: The points.
    /// * `reference_point`: The reference point.
    ///
    /// returns: `Result<f64, HvError>`
    fn compute(&mut self, points: &[Vec<f64>], reference_point: &[f64]) -> Result<f64, HvError>;
}

/// The method used by [`HyperVolume`] to calculate the metric.
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum HyperVolumeMethod {
    /// Use [`HyperVolume2D`] with two objectives and [`Wfg`] (with stop dimension `2`) otherwise.
    #[default]
    Auto,
    /// Always use [`HyperVolume2D`]. This only works with two objectives.
    TwoDimensional,
    /// Always use [`Wfg`] with the given stop dimension.
    Wfg {
        /// The number of objectives at which the WFG recursion stops. This must be at least `2`.
        stop_dimension: usize,
    },
}

/// Struct with methods to calculate the exact hyper-volume metric. Depending on the number of
/// objectives `d` and the chosen [`HyperVolumeMethod`], a different algorithm is used to ensure
/// a correct and fast calculation:
///
/// - with `2` objectives: by sweeping the points sorted by their second objective in
///   [`HyperVolume2D`].
/// - with `1` or `3` or more objectives: by using the algorithm proposed by [While et al. (2012)](http://dx.doi.org/10.1109/TEVC.2010.2077298)
///   in [`Wfg`].
///
/// All objectives are assumed to be minimised and the reference point must be dominated by all
/// the points. The inputs are validated once, before any calculation is carried out. The
/// algorithm buffers are kept between calls: reuse the same instance to calculate the metric
/// many times (for example at each generation of an optimisation algorithm).
///
/// # Example
/// ```
/// use optivolume::metrics::HyperVolume;
///
/// let points = vec![vec![1.0, 1.0, 1.0], vec![0.5, 1.5, 1.0]];
/// let mut hv = HyperVolume::default();
/// let value = hv.compute(&points, &[2.0, 2.0, 2.0]).unwrap();
/// assert_eq!(value, 1.25);
///
/// // the point at index 0 is the one that contributes the most
/// assert_eq!(hv.greatest_contributor(&points, &[2.0, 2.0, 2.0]).unwrap(), 0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct HyperVolume {
    /// The method to use.
    method: HyperVolumeMethod,
    /// The WFG algorithm.
    wfg: Wfg,
    /// The 2D algorithm.
    hv_2d: HyperVolume2D,
}

impl HyperVolume {
    /// Initialise the hyper-volume calculator with a method.
    ///
    /// # Arguments
    ///
    /// * `method`: The method to use.
    ///
    /// returns: `Result<HyperVolume, HvError>`. This returns an error if the WFG stop dimension
    /// is smaller than `2`.
    pub fn new(method: HyperVolumeMethod) -> Result<Self, HvError> {
        let wfg = match method {
            HyperVolumeMethod::Wfg { stop_dimension } => Wfg::new(stop_dimension)?,
            _ => Wfg::default(),
        };
        Ok(Self {
            method,
            wfg,
            hv_2d: HyperVolume2D::new(),
        })
    }

    /// Get the method used to calculate the metric.
    ///
    /// returns: `HyperVolumeMethod`
    pub fn method(&self) -> HyperVolumeMethod {
        self.method
    }

    /// Select the algorithm for the given number of objectives.
    ///
    /// # Arguments
    ///
    /// * `dimensions`: The number of objectives.
    ///
    /// returns: `&mut dyn HyperVolumeAlgorithm`
    fn algorithm(&mut self, dimensions: usize) -> &mut dyn HyperVolumeAlgorithm {
        match self.method {
            HyperVolumeMethod::Auto if dimensions == 2 => &mut self.hv_2d,
            HyperVolumeMethod::TwoDimensional => &mut self.hv_2d,
            HyperVolumeMethod::Auto | HyperVolumeMethod::Wfg { .. } => &mut self.wfg,
        }
    }

    /// Calculate the exact hyper-volume metric for the objective values of a set of points.
    ///
    /// # Arguments
    ///
    /// * `points`: The points; each nested vector contains the objective values of one solution.
    ///   An empty set has a zero hyper-volume.
    /// * `reference_point`: The reference or anti-optimal point to use in the calculation. If you
    ///   are not sure about the point to use you could pick the worst value of each objective
    ///   using [`HyperVolume::estimate_reference_point`].
    ///
    /// returns: `Result<f64, HvError>`. This returns an error if the sizes of the points and the
    /// reference point do not match, a coordinate is NaN or the reference point is not dominated
    /// by all the points.
    pub fn compute(&mut self, points: &[Vec<f64>], reference_point: &[f64]) -> Result<f64, HvError> {
        let algorithm = self.algorithm(reference_point.len());
        let value = algorithm.compute(points, reference_point)?;
        debug!(
            "Hyper-volume of {} points with {} objectives calculated using '{}': {}",
            points.len(),
            reference_point.len(),
            algorithm.name(),
            value
        );
        Ok(value)
    }

    /// Calculate the exact hyper-volume with the default method. See [`HyperVolume::compute`].
    ///
    /// # Arguments
    ///
    /// * `points`: The points.
    /// * `reference_point`: The reference point.
    ///
    /// returns: `Result<f64, HvError>`
    pub fn from_values(points: &[Vec<f64>], reference_point: &[f64]) -> Result<f64, HvError> {
        HyperVolume::default().compute(points, reference_point)
    }

    /// Calculate the exact hyper-volume of the fitness vectors of a population with the default
    /// method.
    ///
    /// # Arguments
    ///
    /// * `population`: The population.
    /// * `reference_point`: The reference point.
    ///
    /// returns: `Result<f64, HvError>`
    pub fn from_population<P: Population + ?Sized>(
        population: &P,
        reference_point: &[f64],
    ) -> Result<f64, HvError> {
        HyperVolume::from_values(&population.fitness_vectors(), reference_point)
    }

    /// Calculate the exact hyper-volume when some objectives are maximised. The coordinates of the
    /// maximised objectives are multiplied by -1 in the points and the reference point, so that
    /// the reference point must be smaller or equal than all the values of a maximised objective.
    ///
    /// # Arguments
    ///
    /// * `points`: The points.
    /// * `reference_point`: The reference point.
    /// * `directions`: The direction of each objective. This must have the same size as the
    ///   reference point.
    ///
    /// returns: `Result<f64, HvError>`
    pub fn from_values_with_directions(
        points: &[Vec<f64>],
        reference_point: &[f64],
        directions: &[ObjectiveDirection],
    ) -> Result<f64, HvError> {
        let metric_name = "Hyper-volume".to_string();
        if directions.len() != reference_point.len() {
            return Err(HvError::Metric(
                metric_name,
                format!(
                    "The number of objective directions ({}) must match the number of coordinates of the reference point ({})",
                    directions.len(),
                    reference_point.len()
                ),
            ));
        }
        check_args(points, reference_point)?;

        let to_minimise = |values: &[f64]| -> Vec<f64> {
            values
                .iter()
                .zip(directions)
                .map(|(v, d)| v * d.sign())
                .collect()
        };
        let points: Vec<Vec<f64>> = points.iter().map(|p| to_minimise(p.as_slice())).collect();
        let reference_point = to_minimise(reference_point);

        HyperVolume::from_values(&points, &reference_point).map_err(|e| match e {
            HvError::DominanceViolation(p_idx, c_idx, value, ref_value)
                if directions[c_idx] == ObjectiveDirection::Maximise =>
            {
                HvError::Metric(
                    metric_name,
                    format!(
                        "The coordinate #{} of point #{} ({}) is smaller than the coordinate of the reference point ({}) for the maximised objective. The reference point must be dominated by all the points",
                        c_idx, p_idx, -value, -ref_value
                    ),
                )
            }
            e => e,
        })
    }

    /// Calculate the hyper-volume exclusively dominated by one point, i.e. the hyper-volume of
    /// all the points minus the hyper-volume of the set without the point.
    ///
    /// # Arguments
    ///
    /// * `point_index`: The index of the point in `points`.
    /// * `points`: The points.
    /// * `reference_point`: The reference point.
    ///
    /// returns: `Result<f64, HvError>`
    pub fn exclusive(
        &mut self,
        point_index: usize,
        points: &[Vec<f64>],
        reference_point: &[f64],
    ) -> Result<f64, HvError> {
        if point_index >= points.len() {
            return Err(HvError::NonExistingIndex("point".to_string(), point_index));
        }
        let total = self.compute(points, reference_point)?;
        let others = without_point(points, point_index);
        Ok(total - self.compute(&others, reference_point)?)
    }

    /// Calculate the exclusive hyper-volume of each point (see [`HyperVolume::exclusive`]). The
    /// contributions are calculated in parallel, using a new calculator with the same method for
    /// each point.
    ///
    /// # Arguments
    ///
    /// * `points`: The points.
    /// * `reference_point`: The reference point.
    ///
    /// returns: `Result<Vec<f64>, HvError>`. A vector with the contribution of each point.
    pub fn contributions(
        &mut self,
        points: &[Vec<f64>],
        reference_point: &[f64],
    ) -> Result<Vec<f64>, HvError> {
        let total = self.compute(points, reference_point)?;
        let method = self.method;
        (0..points.len())
            .into_par_iter()
            .map(|p_idx| -> Result<f64, HvError> {
                let mut hv = HyperVolume::new(method)?;
                let others = without_point(points, p_idx);
                Ok(total - hv.compute(&others, reference_point)?)
            })
            .collect()
    }

    /// Get the index of the point with the smallest exclusive hyper-volume. On ties, the smallest
    /// index is returned.
    ///
    /// # Arguments
    ///
    /// * `points`: The points.
    /// * `reference_point`: The reference point.
    ///
    /// returns: `Result<usize, HvError>`. This returns an error if `points` is empty.
    pub fn least_contributor(
        &mut self,
        points: &[Vec<f64>],
        reference_point: &[f64],
    ) -> Result<usize, HvError> {
        self.contributions(points, reference_point)?
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| a.total_cmp(b))
            .map(|(p_idx, _)| p_idx)
            .ok_or(HvError::Metric(
                "Least contributor".to_string(),
                "There are no points in the array".to_string(),
            ))
    }

    /// Get the index of the point with the largest exclusive hyper-volume. On ties, the smallest
    /// index is returned.
    ///
    /// # Arguments
    ///
    /// * `points`: The points.
    /// * `reference_point`: The reference point.
    ///
    /// returns: `Result<usize, HvError>`. This returns an error if `points` is empty.
    pub fn greatest_contributor(
        &mut self,
        points: &[Vec<f64>],
        reference_point: &[f64],
    ) -> Result<usize, HvError> {
        self.contributions(points, reference_point)?
            .iter()
            .enumerate()
            .max_by(|(i, a), (j, b)| a.total_cmp(b).then(j.cmp(i)))
            .map(|(p_idx, _)| p_idx)
            .ok_or(HvError::Metric(
                "Greatest contributor".to_string(),
                "There are no points in the array".to_string(),
            ))
    }

    /// Calculates a reference point by taking the maximum of each objective from the points, so
    /// that the reference point is dominated by all of them. An optional offset for each
    /// objective can be added to enforce strict dominance, so that points with the worst value
    /// of an objective still contribute to the hyper-volume.
    ///
    /// # Arguments
    ///
    /// * `points`: The points.
    /// * `offset`: The offset for each objective to add to the calculated reference point. This
    ///    must have a size equal to the number of objectives.
    ///
    /// returns: `Result<Vec<f64>, HvError>` The reference point. This returns an error if there
    /// are no points, the points have different sizes or the size of the offset does not match
    /// the number of objectives.
    pub fn estimate_reference_point(
        points: &[Vec<f64>],
        offset: Option<Vec<f64>>,
    ) -> Result<Vec<f64>, HvError> {
        let metric_name = "reference_point".to_string();
        let number_of_objectives = points
            .first()
            .ok_or(HvError::Metric(
                metric_name.clone(),
                "There are no points in the array".to_string(),
            ))?
            .len();

        if let Some((p_idx, point)) = points
            .iter()
            .enumerate()
            .find(|(_, p)| p.len() != number_of_objectives)
        {
            return Err(HvError::Metric(
                metric_name,
                format!(
                    "The point #{} has {} coordinates, but the first point has {}",
                    p_idx,
                    point.len(),
                    number_of_objectives
                ),
            ));
        }
        if let Some(ref offset) = offset {
            if offset.len() != number_of_objectives {
                return Err(HvError::Metric(
                    metric_name,
                    format!(
                        "The offset size ({}) must match the number of objectives ({})",
                        offset.len(),
                        number_of_objectives
                    ),
                ));
            }
        }

        let mut ref_point = (0..number_of_objectives)
            .map(|obj_idx| {
                let values: Vec<f64> = points.iter().map(|p| p[obj_idx]).collect();
                vector_max(&values)
            })
            .collect::<Result<Vec<f64>, HvError>>()?;

        if let Some(offset) = offset {
            for (coordinate, delta) in ref_point.iter_mut().zip(offset) {
                *coordinate += delta;
            }
        }

        Ok(ref_point)
    }
}

/// Copy all the points except the one at `index`.
fn without_point(points: &[Vec<f64>], index: usize) -> Vec<Vec<f64>> {
    points
        .iter()
        .enumerate()
        .filter(|(p_idx, _)| *p_idx != index)
        .map(|(_, p)| p.clone())
        .collect()
}
