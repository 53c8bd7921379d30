use std::cmp::Ordering;

use log::trace;

use crate::core::HvError;
use crate::metrics::hypervolume::{check_args, check_ref_point, HyperVolumeAlgorithm};
use crate::metrics::HyperVolume2D;
use crate::utils::{dominance_compare, volume_between, Dominance};

/// A buffer with the points processed at one recursion depth. Rows are never freed: they are
/// overwritten on each call and only the first `size` are valid.
#[derive(Clone, Debug, Default)]
struct Frame {
    /// The point rows. A row may be longer than the number of coordinates in use.
    points: Vec<Vec<f64>>,
    /// The number of valid points.
    size: usize,
    /// The dominance relationship between the candidate point and each kept point, reused by
    /// the limit set.
    relations: Vec<Dominance>,
}

impl Frame {
    /// Copy the points into the frame rows.
    ///
    /// # Arguments
    ///
    /// * `points`: The points to copy.
    ///
    /// returns: `()`
    fn load(&mut self, points: &[Vec<f64>]) {
        for (p_idx, point) in points.iter().enumerate() {
            match self.points.get_mut(p_idx) {
                Some(row) => {
                    row.clear();
                    row.extend_from_slice(point);
                }
                None => self.points.push(point.clone()),
            }
        }
        self.size = points.len();
    }

    /// Make sure that the row at `index` exists and can store `dimensions` coordinates.
    ///
    /// # Arguments
    ///
    /// * `index`: The row index.
    /// * `dimensions`: The number of coordinates.
    ///
    /// returns: `()`
    fn ensure_row(&mut self, index: usize, dimensions: usize) {
        if index >= self.points.len() {
            self.points.push(vec![0.0; dimensions]);
        } else if self.points[index].len() < dimensions {
            self.points[index].resize(dimensions, 0.0);
        }
    }
}

/// Order two points by descending coordinates, starting from the last coordinate in the slice
/// and moving backwards on ties.
///
/// # Arguments
///
/// * `a`: The first point.
/// * `b`: The second point.
/// * `slice`: The number of leading coordinates in use.
///
/// returns: `Ordering`
fn descending_order(a: &[f64], b: &[f64], slice: usize) -> Ordering {
    for i in (0..slice).rev() {
        if a[i] > b[i] {
            return Ordering::Less;
        } else if a[i] < b[i] {
            return Ordering::Greater;
        }
    }
    Ordering::Equal
}

/// This struct implements the algorithm by While et al. (2012) to calculate the exact
/// hyper-volume of a set of points, assuming all objectives are minimised.
///
/// > Lyndon While, Lucas Bradstreet, and Luigi Barone. A Fast Way of Calculating Exact
/// > Hypervolumes. IEEE Transactions on Evolutionary Computation 16(1), 2012.
///
/// **IMPLEMENTATION NOTES**:
/// 1) The objective space is sliced from the last objective: at each recursion level the
///    points are sorted by descending value of the last objective in the slice and the
///    hyper-volume is the sum of the slab heights multiplied by the exclusive hyper-volume of
///    each point in the remaining objectives.
/// 2) The exclusive hyper-volume of a point is calculated against the "limited" set, made of the
///    component-wise worst values between the point and all the following points, after removing
///    dominated and duplicated points.
/// 3) Once the slice reaches `stop_dimension` objectives, the recursion stops and a direct
///    method is used instead: the 2D sweep when the stop dimension is `2` or an inner `Wfg`
///    with stop dimension `2` otherwise. The inner instance is created once and kept.
/// 4) The buffers used at each recursion depth (the frames) are kept and reused in the following
///    calls. A `Wfg` instance is therefore mutably borrowed by [`HyperVolumeAlgorithm::compute`];
///    use one instance per thread.
///
/// # Example
/// ```
/// use optivolume::metrics::{HyperVolumeAlgorithm, Wfg};
///
/// let mut wfg = Wfg::new(2).unwrap();
/// let points = vec![vec![1.0, 1.0, 1.0]];
/// assert_eq!(wfg.compute(&points, &[2.0, 2.0, 2.0]).unwrap(), 1.0);
/// ```
#[derive(Clone, Debug)]
pub struct Wfg {
    /// The number of objectives at which the recursion stops.
    stop_dimension: usize,
    /// The buffers indexed by recursion depth. Frame `0` stores a copy of the input points.
    frames: Vec<Frame>,
    /// The engine used once the slice reaches a stop dimension larger than `2`.
    inner: Option<Box<Wfg>>,
}

impl Default for Wfg {
    fn default() -> Self {
        Self {
            stop_dimension: 2,
            frames: Vec::new(),
            inner: None,
        }
    }
}

impl Wfg {
    /// Initialise the `Wfg` algorithm.
    ///
    /// # Arguments
    ///
    /// * `stop_dimension`: The number of objectives at which the recursion stops and a direct
    ///    method is used. This must be at least `2`.
    ///
    /// returns: `Result<Wfg, HvError>`
    pub fn new(stop_dimension: usize) -> Result<Self, HvError> {
        if stop_dimension < 2 {
            return Err(HvError::InvalidStopDimension(stop_dimension));
        }
        Ok(Self {
            stop_dimension,
            frames: Vec::new(),
            inner: None,
        })
    }

    /// Get the number of objectives at which the recursion stops.
    ///
    /// returns: `usize`
    pub fn stop_dimension(&self) -> usize {
        self.stop_dimension
    }

    /// Calculate the hyper-volume without validating the points.
    ///
    /// # Arguments
    ///
    /// * `points`: The points. They must all be dominated by the reference point.
    /// * `reference_point`: The reference point.
    ///
    /// returns: `f64`
    pub(crate) fn calculate(&mut self, points: &[Vec<f64>], reference_point: &[f64]) -> f64 {
        if points.is_empty() {
            return 0.0;
        }
        if self.frames.is_empty() {
            self.frames.push(Frame::default());
        }
        self.frames[0].load(points);
        self.compute_hv(reference_point, 0, points.len(), reference_point.len())
    }

    /// Calculate the hyper-volume of the first `n` points of the frame at `depth` using their
    /// first `slice` coordinates.
    ///
    /// # Arguments
    ///
    /// * `reference_point`: The reference point.
    /// * `depth`: The index of the frame with the points.
    /// * `n`: The number of points.
    /// * `slice`: The number of leading coordinates in use.
    ///
    /// returns: `f64`
    fn compute_hv(&mut self, reference_point: &[f64], depth: usize, n: usize, slice: usize) -> f64 {
        let stop_dimension = self.stop_dimension;
        let points = &mut self.frames[depth].points;

        // inclusion-exclusion for one and two points
        if n == 1 {
            return volume_between(&points[0], reference_point, slice);
        } else if n == 2 {
            let intersection: f64 = (0..slice)
                .map(|i| reference_point[i] - points[0][i].max(points[1][i]))
                .product();
            return volume_between(&points[0], reference_point, slice)
                + volume_between(&points[1], reference_point, slice)
                - intersection;
        }

        if slice == stop_dimension {
            return if stop_dimension == 2 {
                HyperVolume2D::sweep(&mut points[..n], reference_point)
            } else {
                // rows may be longer than the slice; the inner engine only reads `slice` coordinates
                self.inner
                    .get_or_insert_with(Box::default)
                    .calculate(&points[..n], &reference_point[..slice])
            };
        }

        points[..n].sort_unstable_by(|a, b| descending_order(a, b, slice));

        let slice = slice - 1;
        let mut volume = 0.0;
        for p_idx in 0..n {
            let height = self.frames[depth].points[p_idx][slice] - reference_point[slice];
            let exclusive = self.exclusive_hv(reference_point, depth, n, p_idx, slice);
            volume += (height * exclusive).abs();
        }
        volume
    }

    /// Calculate the hyper-volume exclusively dominated by the point at `p_idx` in the frame at
    /// `depth`, i.e. the part not dominated by the points after it.
    ///
    /// # Arguments
    ///
    /// * `reference_point`: The reference point.
    /// * `depth`: The index of the frame with the points.
    /// * `n`: The number of points in the frame.
    /// * `p_idx`: The index of the point.
    /// * `slice`: The number of leading coordinates in use.
    ///
    /// returns: `f64`
    fn exclusive_hv(
        &mut self,
        reference_point: &[f64],
        depth: usize,
        n: usize,
        p_idx: usize,
        slice: usize,
    ) -> f64 {
        if depth + 1 >= self.frames.len() {
            trace!("Allocating WFG frame at depth {}", depth + 1);
            self.frames.push(Frame::default());
        }
        self.limit_set(depth, n, p_idx, slice);

        let mut volume = volume_between(&self.frames[depth].points[p_idx], reference_point, slice);
        let limited_size = self.frames[depth + 1].size;
        match limited_size {
            0 => {}
            1 => {
                volume -= volume_between(&self.frames[depth + 1].points[0], reference_point, slice)
            }
            size => volume -= self.compute_hv(reference_point, depth + 1, size, slice),
        }
        volume
    }

    /// Build the non-dominated set limited by the point at `p_idx` in the frame at `depth` and
    /// store it in the frame at `depth + 1`. Each point after `p_idx` is replaced by its
    /// component-wise maximum with the point at `p_idx`; points dominated by or equal to another
    /// limited point are then removed, so that exactly one copy of duplicated points is kept.
    ///
    /// # Arguments
    ///
    /// * `depth`: The index of the frame with the points.
    /// * `n`: The number of points in the frame.
    /// * `p_idx`: The index of the limiting point.
    /// * `slice`: The number of leading coordinates in use.
    ///
    /// returns: `()`
    fn limit_set(&mut self, depth: usize, n: usize, p_idx: usize, slice: usize) {
        let (head, tail) = self.frames.split_at_mut(depth + 1);
        let source = &head[depth].points;
        let frame = &mut tail[0];
        let pivot = &source[p_idx];

        let mut size = 0;
        for point in &source[p_idx + 1..n] {
            // the candidate is stored after the kept points
            frame.ensure_row(size, slice);
            for (c, (a, b)) in frame.points[size][..slice]
                .iter_mut()
                .zip(pivot.iter().zip(point))
            {
                *c = a.max(*b);
            }

            frame.relations.clear();
            let mut keep_candidate = true;
            for q_idx in 0..size {
                let relation = dominance_compare(&frame.points[size], &frame.points[q_idx], slice);
                if relation == Dominance::SecondDominates {
                    keep_candidate = false;
                    break;
                }
                frame.relations.push(relation);
            }
            if !keep_candidate {
                continue;
            }

            // remove the points dominated by or equal to the candidate
            let mut kept = 0;
            for q_idx in 0..size {
                match frame.relations[q_idx] {
                    Dominance::FirstDominates | Dominance::Equal => {}
                    _ => {
                        frame.points.swap(kept, q_idx);
                        kept += 1;
                    }
                }
            }
            frame.points.swap(kept, size);
            size = kept + 1;
        }
        frame.size = size;
    }
}

impl HyperVolumeAlgorithm for Wfg {
    fn name(&self) -> &'static str {
        "Hyper-volume While et al. (2012)"
    }

    fn verify_before_compute(
        &self,
        points: &[Vec<f64>],
        reference_point: &[f64],
    ) -> Result<(), HvError> {
        check_args(points, reference_point)?;
        check_ref_point(points, reference_point)
    }

    fn compute(&mut self, points: &[Vec<f64>], reference_point: &[f64]) -> Result<f64, HvError> {
        self.verify_before_compute(points, reference_point)?;
        Ok(self.calculate(points, reference_point))
    }
}
