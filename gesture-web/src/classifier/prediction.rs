//! Ranked classifier output

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::error::{GestureError, Result};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LabelConfidence {
    pub label: String,
    pub confidence: f32,
}

impl LabelConfidence {
    pub fn new(label: impl Into<String>, confidence: f32) -> Self {
        Self {
            label: label.into(),
            confidence,
        }
    }
}

/// (label, confidence) pairs, highest confidence first
///
/// Built with a single stable descending sort, so equal confidences keep
/// the order the classifier reported them in.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<LabelConfidence>", into = "Vec<LabelConfidence>")]
pub struct Prediction {
    ranked: Vec<LabelConfidence>,
}

impl Prediction {
    pub fn new(mut entries: Vec<LabelConfidence>) -> Self {
        entries.sort_by(|a, b| {
            b.confidence
                .partial_cmp(&a.confidence)
                .unwrap_or(Ordering::Equal)
        });
        Self { ranked: entries }
    }

    /// Parse the JSON array a JS classifier resolves with
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(GestureError::from)
    }

    pub fn top(&self) -> Option<&LabelConfidence> {
        self.ranked.first()
    }

    pub fn top_label(&self) -> Option<&str> {
        self.top().map(|p| p.label.as_str())
    }

    pub fn ranked(&self) -> &[LabelConfidence] {
        &self.ranked
    }

    pub fn len(&self) -> usize {
        self.ranked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranked.is_empty()
    }

    /// `label: confidence` lines for the predictions panel
    pub fn display_lines(&self) -> Vec<String> {
        self.ranked
            .iter()
            .map(|p| format!("{}: {}", p.label, p.confidence))
            .collect()
    }
}

impl From<Vec<LabelConfidence>> for Prediction {
    fn from(entries: Vec<LabelConfidence>) -> Self {
        Prediction::new(entries)
    }
}

impl From<Prediction> for Vec<LabelConfidence> {
    fn from(prediction: Prediction) -> Self {
        prediction.ranked
    }
}
