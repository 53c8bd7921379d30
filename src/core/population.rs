use crate::core::HvError;
use crate::utils::vector_min;

/// A collection of evaluated solutions whose objective (fitness) vectors can be measured with a
/// hyper-volume. This is the only coupling between an optimisation algorithm and the metrics:
/// the algorithm exposes the current fitness vectors and receives back a scalar indicator.
pub trait Population {
    /// Get the fitness vector of each solution. Every vector must have the same size, equal to
    /// the number of objectives.
    ///
    /// returns: `Vec<Vec<f64>>`
    fn fitness_vectors(&self) -> Vec<Vec<f64>>;

    /// Get the ideal point, made of the best (smallest) value of each objective across the
    /// solutions. This returns an error if the population is empty or the fitness vectors have
    /// different sizes.
    ///
    /// returns: `Result<Vec<f64>, HvError>`
    fn ideal_point(&self) -> Result<Vec<f64>, HvError> {
        let vectors = self.fitness_vectors();
        let number_of_objectives = vectors
            .first()
            .ok_or(HvError::Generic(
                "Cannot calculate the ideal point of an empty population".to_string(),
            ))?
            .len();

        if let Some((idx, vector)) = vectors
            .iter()
            .enumerate()
            .find(|(_, v)| v.len() != number_of_objectives)
        {
            return Err(HvError::Metric(
                "ideal_point".to_string(),
                format!(
                    "The fitness vector #{} has {} objectives, but the first vector has {}",
                    idx,
                    vector.len(),
                    number_of_objectives
                ),
            ));
        }

        (0..number_of_objectives)
            .map(|obj_idx| {
                let values: Vec<f64> = vectors.iter().map(|v| v[obj_idx]).collect();
                vector_min(&values)
            })
            .collect()
    }
}

macro_rules! impl_population {
    ( $($type:ty),* $(,)? ) => {
        $(
            impl Population for $type {
                fn fitness_vectors(&self) -> Vec<Vec<f64>> {
                    self.to_vec()
                }
            }
        )*
    };
}

impl_population!([Vec<f64>], Vec<Vec<f64>>);

#[cfg(test)]
mod test {
    use crate::core::{HvError, Population};

    #[test]
    fn test_ideal_point() {
        let points = vec![vec![1.0, 5.0, 2.0], vec![3.0, 0.5, 4.0], vec![2.0, 2.0, -1.0]];
        assert_eq!(points.ideal_point().unwrap(), vec![1.0, 0.5, -1.0]);
        assert_eq!(points.as_slice().fitness_vectors(), points);
    }

    #[test]
    fn test_empty_population() {
        let points: Vec<Vec<f64>> = vec![];
        assert!(points
            .ideal_point()
            .unwrap_err()
            .to_string()
            .contains("empty population"));
    }

    #[test]
    fn test_fitness_vectors_with_different_sizes() {
        let points = vec![vec![1.0, 2.0], vec![0.0]];
        let err = points.ideal_point().unwrap_err();
        assert!(matches!(err, HvError::Metric(..)));
        assert!(
            err.to_string()
                .contains("The fitness vector #1 has 1 objectives, but the first vector has 2"),
            "{}",
            err
        );

        // a longer vector is also rejected
        let points = vec![vec![1.0, 2.0], vec![0.0, 1.0, 3.0]];
        assert!(points.ideal_point().is_err());
    }
}
