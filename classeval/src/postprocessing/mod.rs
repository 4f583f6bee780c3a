mod error;
mod softmax;
mod top_k;

pub use error::PostprocessError;
pub use softmax::{SoftmaxMode, softmax};
pub use top_k::{RankedClass, top_k};
