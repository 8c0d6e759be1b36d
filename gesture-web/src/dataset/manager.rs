//! Dataset manager - owns the session's dataset, its split and its storage
//!
//! `record` is the only mutation in normal operation. It appends, rewrites
//! the whole dataset under the storage key, and drops any previous split.
//! The write is not atomic: a crash mid-write can lose the last append.

use rand::Rng;
use serde::Serialize;
use tracing::{debug, info};

use super::sample::{load_json, Dataset, Sample};
use super::split::{shuffle, shuffle_and_split, Split};
use super::store::KeyValueStore;
use crate::error::Result;

/// Sizes of a fresh split, as shown next to the test controls
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SplitSummary {
    pub samples: usize,
    pub train: usize,
    pub test: usize,
    pub labels: Vec<String>,
}

pub struct DatasetManager<S: KeyValueStore> {
    dataset: Dataset,
    split: Option<Split>,
    store: S,
    storage_key: String,
}

impl<S: KeyValueStore> DatasetManager<S> {
    pub fn new(store: S, storage_key: impl Into<String>) -> Self {
        Self {
            dataset: Dataset::new(),
            split: None,
            store,
            storage_key: storage_key.into(),
        }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn split(&self) -> Option<&Split> {
        self.split.as_ref()
    }

    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    /// Replace the dataset with a parsed JSON document
    ///
    /// On failure the previous dataset is left untouched.
    pub fn load(&mut self, text: &str) -> Result<&Dataset> {
        let dataset = load_json(text)?;
        info!(samples = dataset.len(), "dataset loaded");
        self.dataset = dataset;
        self.split = None;
        Ok(&self.dataset)
    }

    /// Shuffle the dataset in place (import order for training)
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        shuffle(&mut self.dataset, rng);
        self.split = None;
    }

    pub fn shuffle_and_split<R: Rng + ?Sized>(&mut self, train_fraction: f64, rng: &mut R) -> &Split {
        self.split.insert(shuffle_and_split(&self.dataset, train_fraction, rng))
    }

    /// Shuffle, split, and report the resulting sizes
    pub fn split_summary<R: Rng + ?Sized>(&mut self, train_fraction: f64, rng: &mut R) -> SplitSummary {
        let samples = self.dataset.len();
        let labels = self.dataset.unique_labels();
        let split = self.shuffle_and_split(train_fraction, rng);
        SplitSummary {
            samples,
            train: split.train.len(),
            test: split.test.len(),
            labels,
        }
    }

    /// Append a sample and persist the full dataset under the storage key
    pub fn record(&mut self, sample: Sample) -> Result<()> {
        debug!(label = %sample.label, "recording sample");
        self.dataset.push(sample);
        self.split = None;
        let json = self.dataset.to_json()?;
        self.store.write(&self.storage_key, &json)
    }

    /// Read back whatever is persisted under the storage key
    pub fn reload_persisted(&self) -> Result<Dataset> {
        match self.store.read(&self.storage_key)? {
            Some(text) => load_json(&text),
            None => Ok(Dataset::new()),
        }
    }

    pub fn unique_labels(&self) -> Vec<String> {
        self.dataset.unique_labels()
    }
}
