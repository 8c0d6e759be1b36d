//! Nearest-centroid classifier
//!
//! Small in-crate classifier for offline tooling and tests. One mean pose
//! per label; confidence is normalized inverse distance, so the ranked
//! confidences sum to 1.

use std::cell::RefCell;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::model::{Classifier, ModelDescriptor, ModelStatus, TrainOptions};
use super::prediction::{LabelConfidence, Prediction};
use crate::dataset::KeyValueStore;
use crate::error::{GestureError, Result};
use crate::pose::{Pose, POSE_LEN};

/// Keeps exact matches from dividing by zero
const DISTANCE_EPSILON: f32 = 1e-6;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
struct Centroid {
    label: String,
    mean: Vec<f32>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
struct CentroidModel {
    centroids: Vec<Centroid>,
}

pub struct CentroidClassifier<S: KeyValueStore> {
    pending: Vec<(Pose, String)>,
    model: CentroidModel,
    status: ModelStatus,
    store: RefCell<S>,
}

impl<S: KeyValueStore> CentroidClassifier<S> {
    /// `store` receives saved models and serves `load`
    pub fn new(store: S) -> Self {
        Self {
            pending: Vec::new(),
            model: CentroidModel::default(),
            status: ModelStatus::Empty,
            store: RefCell::new(store),
        }
    }

    pub fn labels(&self) -> Vec<&str> {
        self.model.centroids.iter().map(|c| c.label.as_str()).collect()
    }
}

fn distance(a: &[f32], b: &[f32]) -> f32 {
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f32>()
        .sqrt()
}

#[async_trait(?Send)]
impl<S: KeyValueStore> Classifier for CentroidClassifier<S> {
    fn status(&self) -> ModelStatus {
        self.status
    }

    async fn load(&mut self, model: &ModelDescriptor) -> Result<()> {
        self.status = ModelStatus::Loading;
        let text = self.store.borrow().read(&model.model)?;
        let Some(text) = text else {
            self.status = ModelStatus::Empty;
            return Err(GestureError::DataUnavailable(format!("no model saved at {}", model.model)));
        };
        let parsed: CentroidModel = match serde_json::from_str(&text) {
            Ok(parsed) => parsed,
            Err(e) => {
                self.status = ModelStatus::Empty;
                return Err(GestureError::DataUnavailable(e.to_string()));
            }
        };
        if parsed.centroids.is_empty() {
            self.status = ModelStatus::Empty;
            return Err(GestureError::DataUnavailable("saved model has no labels".to_string()));
        }
        self.model = parsed;
        self.status = ModelStatus::Ready;
        info!(labels = self.model.centroids.len(), "centroid model loaded");
        Ok(())
    }

    fn add_training_sample(&mut self, pose: &Pose, label: &str) {
        self.pending.push((pose.clone(), label.to_string()));
    }

    async fn train(&mut self, options: TrainOptions) -> Result<()> {
        if self.pending.is_empty() {
            return Err(GestureError::DataUnavailable("no training samples".to_string()));
        }
        self.status = ModelStatus::Training;

        // Closed form: epochs do not change the result
        let mut sums: Vec<(String, Vec<f32>, usize)> = Vec::new();
        for (pose, label) in &self.pending {
            let idx = match sums.iter().position(|(l, _, _)| l == label) {
                Some(idx) => idx,
                None => {
                    sums.push((label.clone(), vec![0.0; POSE_LEN], 0));
                    sums.len() - 1
                }
            };
            let entry = &mut sums[idx];
            for (acc, v) in entry.1.iter_mut().zip(pose.as_slice()) {
                *acc += v;
            }
            entry.2 += 1;
        }

        self.model.centroids = sums
            .into_iter()
            .map(|(label, sum, count)| Centroid {
                label,
                mean: sum.into_iter().map(|v| v / count as f32).collect(),
            })
            .collect();
        self.status = ModelStatus::Ready;

        debug!(
            epochs = options.epochs,
            samples = self.pending.len(),
            labels = self.model.centroids.len(),
            "centroid training done"
        );
        Ok(())
    }

    async fn classify(&self, pose: &Pose) -> Result<Prediction> {
        if !self.status.is_ready() {
            return Err(GestureError::ClassifierNotReady);
        }

        let scores: Vec<(String, f32)> = self
            .model
            .centroids
            .iter()
            .map(|c| {
                let d = distance(pose.as_slice(), &c.mean);
                (c.label.clone(), 1.0 / (d + DISTANCE_EPSILON))
            })
            .collect();
        let total: f32 = scores.iter().map(|(_, s)| s).sum();

        Ok(Prediction::new(
            scores
                .into_iter()
                .map(|(label, score)| LabelConfidence::new(label, score / total))
                .collect(),
        ))
    }

    async fn save(&self, name: &str) -> Result<()> {
        if !self.status.is_ready() {
            return Err(GestureError::ClassifierNotReady);
        }
        let json = serde_json::to_string(&self.model)?;
        self.store.borrow_mut().write(name, &json)?;
        info!(name, "centroid model saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::MemoryStore;
    use futures::executor::block_on;

    fn pose(value: f32) -> Pose {
        Pose::new(vec![value; POSE_LEN]).unwrap()
    }

    fn trained() -> CentroidClassifier<MemoryStore> {
        let mut nn = CentroidClassifier::new(MemoryStore::new());
        nn.add_training_sample(&pose(0.1), "okay");
        nn.add_training_sample(&pose(0.2), "okay");
        nn.add_training_sample(&pose(0.9), "open");
        block_on(nn.train(TrainOptions { epochs: 20 })).unwrap();
        nn
    }

    #[test]
    fn test_classify_before_train_rejected() {
        let nn = CentroidClassifier::new(MemoryStore::new());
        let err = block_on(nn.classify(&pose(0.1))).unwrap_err();
        assert!(matches!(err, GestureError::ClassifierNotReady));
    }

    #[test]
    fn test_classify_nearest() {
        let nn = trained();
        assert!(nn.is_ready());
        let prediction = block_on(nn.classify(&pose(0.12))).unwrap();
        assert_eq!(prediction.top_label(), Some("okay"));
        assert_eq!(prediction.len(), 2);

        let sum: f32 = prediction.ranked().iter().map(|p| p.confidence).sum();
        assert!((sum - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_added_samples_need_retrain() {
        let mut nn = trained();
        nn.add_training_sample(&pose(0.5), "fist");
        assert_eq!(nn.labels(), vec!["okay", "open"]);

        block_on(nn.train(TrainOptions { epochs: 1 })).unwrap();
        assert_eq!(nn.labels(), vec!["okay", "open", "fist"]);
    }

    #[test]
    fn test_train_without_samples() {
        let mut nn = CentroidClassifier::new(MemoryStore::new());
        assert!(block_on(nn.train(TrainOptions { epochs: 1 })).is_err());
        assert!(!nn.is_ready());
    }

    #[test]
    fn test_save_then_load() {
        let nn = trained();
        block_on(nn.save("model/model.json")).unwrap();
        let store = nn.store.into_inner();

        let mut restored = CentroidClassifier::new(store);
        block_on(restored.load(&ModelDescriptor::default())).unwrap();
        assert!(restored.is_ready());
        let prediction = block_on(restored.classify(&pose(0.95))).unwrap();
        assert_eq!(prediction.top_label(), Some("open"));
    }

    #[test]
    fn test_load_missing_model() {
        let mut nn = CentroidClassifier::new(MemoryStore::new());
        assert!(block_on(nn.load(&ModelDescriptor::default())).is_err());
        assert_eq!(nn.status(), ModelStatus::Empty);
    }
}
