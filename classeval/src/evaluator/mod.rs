mod error;
mod evaluator;
mod metrics;
mod record;
mod state;

pub use error::EvaluationError;
pub use evaluator::{Evaluator, TOP_K};
pub use metrics::{LatencySummary, RunningMetrics};
pub use record::{EvaluationReport, ImageRecord, SkippedImage, StepOutcome};
pub use state::EvaluatorState;
