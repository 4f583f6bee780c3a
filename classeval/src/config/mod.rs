mod error;
mod evaluation_config;

pub use error::ConfigError;
pub use evaluation_config::{EvaluationConfig, FailurePolicy};
