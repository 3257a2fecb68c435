pub mod model;
pub mod normalize;
mod raw;

pub use model::*;
pub use normalize::{normalize, NormalizeOutput};
