use crate::error::DownsampleError;
use crate::pointcloud::cloud::Element;

pub mod advisor;
pub mod downsampler;
pub mod importance;
pub mod options;
pub mod random;

pub use advisor::{format_count, suggest_ratio};
pub use downsampler::{downsample, select_indices};
pub use importance::{importance_scores, ImportanceSelector};
pub use options::{DownsampleOptions, Method};
pub use random::{Lcg, RandomSelector};

pub trait PointSelector {
    /// Picks `target` distinct point indices of `element`, sorted ascending.
    fn select(&self, element: &Element, target: usize) -> Result<Vec<usize>, DownsampleError>;
}
