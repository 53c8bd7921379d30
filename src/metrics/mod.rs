pub use hv_wfg::Wfg;
pub use hypervolume::{HyperVolume, HyperVolumeAlgorithm, HyperVolumeMethod};
pub use hypervolume_2d::HyperVolume2D;

mod hv_wfg;
pub mod hypervolume;
pub mod hypervolume_2d;
