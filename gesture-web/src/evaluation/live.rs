//! Live test mode - one random sample per tick
//!
//! The page calls in every `test_interval_ms`. Stopping is a flag checked
//! between ticks; a classification still in flight when the flag drops is
//! discarded by `finish`.

use rand::Rng;
use serde::Serialize;

use super::running::RunningAccuracy;
use crate::classifier::{Classifier, Prediction};
use crate::dataset::{Dataset, Sample};
use crate::error::{GestureError, Result};

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LiveResult {
    pub predicted: String,
    pub expected: String,
    pub correct: bool,
    /// NaN is serialized as null
    pub accuracy: f64,
    /// Poses evaluated so far
    pub evaluated: u32,
}

#[derive(Debug, Default)]
pub struct LiveTester {
    running: RunningAccuracy,
    active: bool,
}

impl LiveTester {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Flip between running and stopped, returning the new state
    pub fn toggle(&mut self) -> bool {
        self.active = !self.active;
        self.active
    }

    pub fn stop(&mut self) {
        self.active = false;
    }

    pub fn running(&self) -> &RunningAccuracy {
        &self.running
    }

    /// Pick this tick's sample
    pub fn pick<'a, R: Rng + ?Sized>(&self, dataset: &'a Dataset, rng: &mut R) -> Result<&'a Sample> {
        if dataset.is_empty() {
            return Err(GestureError::DataUnavailable("training data not fetched yet".to_string()));
        }
        let index = rng.gen_range(0..dataset.len());
        Ok(&dataset.samples()[index])
    }

    /// Score a prediction for `sample`. None if stopped or the prediction is empty.
    pub fn finish(&mut self, sample: &Sample, prediction: &Prediction) -> Option<LiveResult> {
        if !self.active {
            return None;
        }
        let predicted = prediction.top_label()?.to_string();
        let correct = predicted == sample.label;
        let accuracy = self.running.record(correct);

        Some(LiveResult {
            predicted,
            expected: sample.label.clone(),
            correct,
            accuracy,
            evaluated: self.running.total(),
        })
    }

    /// pick + classify + finish, for callers that own the tester across the await
    pub async fn tick<C, R>(&mut self, dataset: &Dataset, classifier: &C, rng: &mut R) -> Result<Option<LiveResult>>
    where
        C: Classifier + ?Sized,
        R: Rng + ?Sized,
    {
        if !self.active {
            return Ok(None);
        }
        let sample = self.pick(dataset, rng)?;
        let prediction = classifier.classify(&sample.pose).await?;
        Ok(self.finish(sample, &prediction))
    }
}
