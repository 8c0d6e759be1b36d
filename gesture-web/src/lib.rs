//! Gesture Web - hand-gesture slide control
//!
//! Entry point for WASM module. Contains:
//! - Module declarations
//! - The `start` hook (panic hook + console logging)
//!
//! Pure pipeline logic lives in the domain modules and runs natively in
//! tests; `bridge` holds every JS-facing entry point.

use wasm_bindgen::prelude::*;

// ============================================================================
// CONSOLE LOGGING
// ============================================================================

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console)]
    pub(crate) fn log(s: &str);
}

macro_rules! console_log {
    ($($t:tt)*) => ($crate::log(&format_args!($($t)*).to_string()))
}

pub mod classifier;
pub mod config;
pub mod dataset;
pub mod error;
pub mod evaluation;
pub mod gesture;
pub mod pose;
pub mod presentation;
pub mod session;

mod bridge;

pub use bridge::*;
pub use error::{GestureError, Result};

// ============================================================================
// WASM ENTRY POINTS
// ============================================================================

/// Called automatically when WASM module loads
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if let Err(e) = init_logging("info") {
        console_log!("⚠️ Logging unavailable: {}", e);
    }
}
