//! Evaluation module - confusion matrix and accuracy
//!
//! Re-exports only. All logic in submodules.

mod confusion;
mod evaluator;
mod live;
mod running;

pub use confusion::{CellKind, ConfusionMatrix, ConfusionTable};
pub use evaluator::{evaluate, evaluate_with_progress, EvalStep, EvaluationReport};
pub use live::{LiveResult, LiveTester};
pub use running::RunningAccuracy;
