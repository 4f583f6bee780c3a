use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PostprocessError {
    #[error("Output scores are empty")]
    EmptyScores,
    #[error("Cannot take top {k} out of {size} classes")]
    InvalidK {
        k: usize,
        size: usize,
    },
    #[error("Probability of class {class_id} is not finite")]
    NonFiniteProbability {
        class_id: usize,
    },
    #[error("Exponentiated scores do not sum to a finite positive value")]
    DegenerateDistribution,
}
