use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
/// Errors raised by the library.
pub enum HvError {
    #[error("The following error occurred: {0}")]
    Generic(String),
    #[error("The stop dimension for WFG must be greater than or equal to 2, but {0} was given")]
    InvalidStopDimension(usize),
    #[error("The reference point must have at least one coordinate")]
    NoDimensions,
    #[error("The point #{0} has {1} coordinates, but the reference point has {2}")]
    DimensionMismatch(usize, usize, usize),
    #[error("NaN detected in {0} #{1}")]
    NaN(String, usize),
    #[error("The coordinate #{1} of point #{0} ({2}) is larger than the reference point coordinate ({3}). The reference point must be dominated by all the points")]
    DominanceViolation(usize, usize, f64, f64),
    #[error("The {0} index {1} does not exist")]
    NonExistingIndex(String, usize),
    #[error("An error occurred in the calculation of the '{0}' metric: {1}")]
    Metric(String, String),
}
