use std::time::Duration;

use thiserror::Error;

use crate::raster::InputShape;

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("Input of shape {actual:?} does not match network input {expected:?}")]
    InputShapeMismatch {
        expected: InputShape,
        actual: InputShape,
    },
    #[error("Backend returned {actual} scores, expected {expected}")]
    OutputSizeMismatch {
        expected: usize,
        actual: usize,
    },
    #[error("No recorded output left for inference call {0}")]
    Exhausted(usize),
    #[error("Inference did not finish within {0:?}")]
    Timeout(Duration),
    #[error("Backend is unusable after an earlier timeout")]
    Poisoned,
    #[error("Inference worker stopped")]
    WorkerStopped,
    #[error("Recorded output on line {line} is not a list of numbers")]
    MalformedRecord {
        line: usize,
    },
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Custom(String),
}
