//! Samples and datasets
//!
//! On-disk format is a JSON array of `{ "pose": [63 floats], "label": "..." }`.

use serde::{Deserialize, Serialize};

use crate::error::{GestureError, Result};
use crate::pose::Pose;

/// One labeled training/evaluation example
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub pose: Pose,
    pub label: String,
}

impl Sample {
    pub fn new(pose: Pose, label: impl Into<String>) -> Self {
        Self {
            pose,
            label: label.into(),
        }
    }
}

/// Ordered collection of samples
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dataset {
    samples: Vec<Sample>,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_samples(samples: Vec<Sample>) -> Self {
        Self { samples }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Sample> {
        self.samples.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Sample> {
        self.samples.get(index)
    }

    pub(crate) fn push(&mut self, sample: Sample) {
        self.samples.push(sample);
    }

    pub(crate) fn samples_mut(&mut self) -> &mut Vec<Sample> {
        &mut self.samples
    }

    pub fn unique_labels(&self) -> Vec<String> {
        unique_labels(&self.samples)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Sample;
    type IntoIter = std::slice::Iter<'a, Sample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}

/// Parse a dataset document
///
/// Any parse problem (bad JSON, missing `pose`/`label`, wrong pose length)
/// fails the whole load. There is no partial dataset.
pub fn load_json(text: &str) -> Result<Dataset> {
    serde_json::from_str(text).map_err(|e| GestureError::DataUnavailable(e.to_string()))
}

/// Distinct labels in first-seen order
pub fn unique_labels(samples: &[Sample]) -> Vec<String> {
    let mut labels: Vec<String> = Vec::new();
    for sample in samples {
        if !labels.iter().any(|l| *l == sample.label) {
            labels.push(sample.label.clone());
        }
    }
    labels
}
