//! Test double: answers from a fixed pose-to-label table

use async_trait::async_trait;

use super::model::{Classifier, ModelDescriptor, ModelStatus, TrainOptions};
use super::prediction::{LabelConfidence, Prediction};
use crate::error::{GestureError, Result};
use crate::pose::{Pose, POSE_LEN};

/// Pose whose every value is `value`
pub(crate) fn flat_pose(value: f32) -> Pose {
    Pose::new(vec![value; POSE_LEN]).unwrap()
}

/// Predicts `table[i].1` with confidence 0.9 for poses whose first value
/// equals `table[i].0`; everything else gets `fallback`.
pub(crate) struct ScriptedClassifier {
    pub table: Vec<(f32, String)>,
    pub fallback: String,
    pub status: ModelStatus,
}

impl ScriptedClassifier {
    pub fn ready(table: Vec<(f32, &str)>, fallback: &str) -> Self {
        Self {
            table: table.into_iter().map(|(v, l)| (v, l.to_string())).collect(),
            fallback: fallback.to_string(),
            status: ModelStatus::Ready,
        }
    }
}

#[async_trait(?Send)]
impl Classifier for ScriptedClassifier {
    fn status(&self) -> ModelStatus {
        self.status
    }

    async fn load(&mut self, _model: &ModelDescriptor) -> Result<()> {
        self.status = ModelStatus::Ready;
        Ok(())
    }

    fn add_training_sample(&mut self, _pose: &Pose, _label: &str) {}

    async fn train(&mut self, _options: TrainOptions) -> Result<()> {
        self.status = ModelStatus::Ready;
        Ok(())
    }

    async fn classify(&self, pose: &Pose) -> Result<Prediction> {
        if !self.status.is_ready() {
            return Err(GestureError::ClassifierNotReady);
        }
        let first = pose.as_slice()[0];
        let label = self
            .table
            .iter()
            .find(|(v, _)| *v == first)
            .map(|(_, l)| l.clone())
            .unwrap_or_else(|| self.fallback.clone());
        Ok(Prediction::new(vec![
            LabelConfidence::new("other", 0.1),
            LabelConfidence::new(label, 0.9),
        ]))
    }

    async fn save(&self, _name: &str) -> Result<()> {
        Ok(())
    }
}
