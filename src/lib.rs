//! Exact hyper-volume indicator for multi-objective optimisation.
//!
//! The crate computes the volume of the objective space dominated by a set of points and bounded
//! by a reference point. All objectives are assumed to be minimised; maximised objectives can be
//! handled with [`metrics::HyperVolume::from_values_with_directions`].
//!
//! Depending on the number of objectives, a different algorithm is used:
//! - with `2` objectives: a sweep over the points sorted by their second coordinate
//!   ([`metrics::HyperVolume2D`]);
//! - with `1` or `3+` objectives: the WFG algorithm proposed by
//!   [While et al. (2012)](http://dx.doi.org/10.1109/TEVC.2010.2077298) ([`metrics::Wfg`]).
//!
//! # Example
//! ```
//! use optivolume::metrics::HyperVolume;
//!
//! let points = vec![vec![1.0, 1.0], vec![2.0, 0.5]];
//! let hv = HyperVolume::from_values(&points, &[3.0, 3.0]).unwrap();
//! assert_eq!(hv, 4.5);
//! ```
pub mod core;
pub mod metrics;
pub mod utils;
