//! Gesture module - debounced decisions from ranked predictions
//!
//! Re-exports only. All logic in submodules.

mod decision;
mod state;

pub use decision::{Decision, GestureAction, GestureEngine, HintSignal};
pub use state::GestureState;
