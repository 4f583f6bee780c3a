mod eval;

pub use eval::{EvalArgs, handle_eval};
