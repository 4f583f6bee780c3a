#[cfg(test)]
#[macro_use]
extern crate is_close;

pub mod backend;
pub mod config;
pub mod dataset;
pub mod evaluator;
pub mod postprocessing;
pub mod preprocessing;
pub mod raster;
pub mod sink;

pub use backend::{BackendError, InferenceBackend};
pub use config::EvaluationConfig;
pub use evaluator::{EvaluationError, EvaluationReport, Evaluator};
pub use raster::{Image, InputShape, InputTensor};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
