pub use error::HvError;
pub use objective::ObjectiveDirection;
pub use population::Population;

mod error;
mod objective;
mod population;
#[cfg(test)]
pub(crate) mod test_utils;
