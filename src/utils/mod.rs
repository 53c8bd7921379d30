pub use dominance::{dominance_compare, Dominance};
pub use vectors::{vector_max, vector_min, volume_between};

mod dominance;
mod vectors;
