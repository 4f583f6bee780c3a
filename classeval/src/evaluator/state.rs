use std::fmt;

/// Lifecycle of one evaluation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvaluatorState {
    Idle,
    Loading,
    Streaming,
    Finalized,
}

impl fmt::Display for EvaluatorState {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let name = match self {
            EvaluatorState::Idle => "idle",
            EvaluatorState::Loading => "loading",
            EvaluatorState::Streaming => "streaming",
            EvaluatorState::Finalized => "finalized",
        };
        f.write_str(name)
    }
}
