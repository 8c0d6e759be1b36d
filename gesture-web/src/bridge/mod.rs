//! Bridge module - JS ↔ Rust communication
//!
//! All #[wasm_bindgen] entry points live here.
//! Re-exports only in mod.rs, logic in submodules.

mod classifier_integration;
mod fetch;
mod logging;
mod presentation;
mod settings;
mod testing;
mod tracking;
mod training;

pub use classifier_integration::{
    // WASM entry points
    init_classifier,
    is_classifier_ready,
    load_model,
    save_model,
    // Internal API
    JsClassifier,
    NeuralNetwork,
};

pub use logging::{init_logging, set_log_level};

pub use presentation::{embed_url, set_presentation};

pub use settings::{configure, current_config, test_interval_ms};

pub use testing::{fetch_test_data, fill_table, test_tick, toggle_testing};

pub use tracking::{is_tracking, process_hand_landmarks, toggle_tracking, toggle_training};

pub use training::{import_data, recorded_sample_count};
