//! Classifier capability boundary
//!
//! The learning algorithm lives outside this crate (ml5 in the browser).
//! Callers check `is_ready()` before `classify`; implementations reject
//! early calls with `ClassifierNotReady` instead of returning garbage.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::prediction::Prediction;
use crate::error::Result;
use crate::pose::Pose;

/// Locations of a saved model's three files
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ModelDescriptor {
    pub model: String,
    pub metadata: String,
    pub weights: String,
}

impl Default for ModelDescriptor {
    fn default() -> Self {
        Self {
            model: "model/model.json".to_string(),
            metadata: "model/model_meta.json".to_string(),
            weights: "model/model.weights.bin".to_string(),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct TrainOptions {
    pub epochs: u32,
}

/// Lifecycle of the wrapped model
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ModelStatus {
    #[default]
    Empty,
    Loading,
    Training,
    Ready,
}

impl ModelStatus {
    pub fn is_ready(&self) -> bool {
        matches!(self, ModelStatus::Ready)
    }

    /// Status after a load or train attempt: ready only if it succeeded
    pub fn settled<T>(outcome: &Result<T>) -> Self {
        match outcome {
            Ok(_) => ModelStatus::Ready,
            Err(_) => ModelStatus::Empty,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ModelStatus::Empty => "empty",
            ModelStatus::Loading => "loading",
            ModelStatus::Training => "training",
            ModelStatus::Ready => "ready",
        }
    }
}

/// Pose classifier
///
/// Single-threaded: futures are not `Send`.
#[async_trait(?Send)]
pub trait Classifier {
    fn status(&self) -> ModelStatus;

    fn is_ready(&self) -> bool {
        self.status().is_ready()
    }

    /// Load a previously saved model. Resolves once the model is usable.
    async fn load(&mut self, model: &ModelDescriptor) -> Result<()>;

    /// Queue an example for the next `train` call
    fn add_training_sample(&mut self, pose: &Pose, label: &str);

    /// Train on everything queued so far. Resolves once, on completion.
    async fn train(&mut self, options: TrainOptions) -> Result<()>;

    /// Ranked labels for one pose. Never empty when `Ok`.
    async fn classify(&self, pose: &Pose) -> Result<Prediction>;

    async fn save(&self, name: &str) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GestureError;

    #[test]
    fn test_failed_attempt_is_not_ready() {
        let failed: Result<()> = Err(GestureError::Classifier("model load failed: 404".to_string()));
        assert_eq!(ModelStatus::settled(&failed), ModelStatus::Empty);
        assert!(!ModelStatus::settled(&failed).is_ready());
    }

    #[test]
    fn test_successful_attempt_is_ready() {
        assert_eq!(ModelStatus::settled(&Ok(())), ModelStatus::Ready);
    }
}
