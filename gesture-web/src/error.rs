//! Error types for gesture-web

use thiserror::Error;
use wasm_bindgen::JsValue;

/// Failures surfaced by the gesture pipeline
///
/// A frame without a detected hand is not an error: extraction simply
/// yields no pose and the frame is skipped.
#[derive(Error, Debug)]
pub enum GestureError {
    /// Dataset fetch or parse failure. Terminal for the operation, never retried.
    #[error("Dataset unavailable: {0}")]
    DataUnavailable(String),

    /// Classification attempted before load/train completed
    #[error("Classifier not ready")]
    ClassifierNotReady,

    /// Webcam permission denied or unsupported
    #[error("Media unavailable: {0}")]
    MediaUnavailable(String),

    /// The JS-side network rejected a call
    #[error("Classifier error: {0}")]
    Classifier(String),

    #[error("Invalid pose: expected {expected} values, got {actual}")]
    InvalidPose { expected: usize, actual: usize },

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Presentation id is empty")]
    EmptyPresentationId,

    #[error("Training label is empty")]
    EmptyLabel,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GestureError>;

impl From<GestureError> for JsValue {
    fn from(err: GestureError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}
