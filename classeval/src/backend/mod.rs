mod backend;
mod deadline;
mod error;
mod replay;

pub use backend::InferenceBackend;
pub use deadline::DeadlineBackend;
pub use error::BackendError;
pub use replay::ReplayBackend;
