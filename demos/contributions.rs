use log::info;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use optivolume::core::HvError;
use optivolume::metrics::{HyperVolume, HyperVolumeMethod};

/// This example shows how to reduce a set of non-dominated points by iteratively removing the
/// point that contributes the least to the hyper-volume, as done by archive-based algorithms
/// (for example SMS-EMOA) when the archive is full.
///
/// The points lie on the concave front of the DTLZ2 problem with 4 objectives. The reference
/// point is estimated from the worst value of each objective plus an offset, so that all the
/// points contribute to the metric.
///
/// Set the `RUST_LOG` environment variable to `debug` to see which algorithm is used:
///
/// `RUST_LOG=debug cargo run --example contributions --release`
fn main() -> Result<(), HvError> {
    env_logger::init();

    let number_of_objectives = 4;
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let mut points: Vec<Vec<f64>> = (0..60)
        .map(|_| {
            let raw: Vec<f64> = (0..number_of_objectives)
                .map(|_| rng.gen_range(0.01..1.0))
                .collect();
            let norm = raw.iter().map(|v| v * v).sum::<f64>().sqrt();
            raw.iter().map(|v| v / norm).collect()
        })
        .collect();

    let reference_point =
        HyperVolume::estimate_reference_point(&points, Some(vec![0.1; number_of_objectives]))?;
    info!("Using reference point {:?}", reference_point);

    let mut hv = HyperVolume::new(HyperVolumeMethod::Wfg { stop_dimension: 2 })?;
    info!(
        "Hyper-volume of {} points is {}",
        points.len(),
        hv.compute(&points, &reference_point)?
    );

    while points.len() > 40 {
        let index = hv.least_contributor(&points, &reference_point)?;
        let contribution = hv.exclusive(index, &points, &reference_point)?;
        points.remove(index);
        info!(
            "Removed point #{} with contribution {:.6}; hyper-volume of {} points is {:.6}",
            index,
            contribution,
            points.len(),
            hv.compute(&points, &reference_point)?
        );
    }

    Ok(())
}
