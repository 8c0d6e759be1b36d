//! Session module - per-page pipeline state
//!
//! Re-exports only. All logic in submodules.

mod capture;
mod frame_gate;
mod report;
mod state;

pub use capture::TrainingCapture;
pub use frame_gate::FrameGate;
pub use report::{DecisionReport, FrameReport};
pub use state::{FrameOutcome, SessionState};
