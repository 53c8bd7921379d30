use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Whether the objective should be minimised or maximised. Default is minimise.
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObjectiveDirection {
    #[default]
    /// Minimise an objective.
    Minimise,
    /// Maximise an objective.
    Maximise,
}

impl ObjectiveDirection {
    /// The factor that converts a value of an objective with this direction into a value to
    /// minimise.
    ///
    /// returns: `f64`
    pub fn sign(&self) -> f64 {
        match self {
            ObjectiveDirection::Minimise => 1.0,
            ObjectiveDirection::Maximise => -1.0,
        }
    }
}

impl Display for ObjectiveDirection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ObjectiveDirection::Minimise => f.write_str("minimised"),
            ObjectiveDirection::Maximise => f.write_str("maximised"),
        }
    }
}
