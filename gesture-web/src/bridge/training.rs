//! Training entry points: live capture and Import Data & Train

use std::cell::RefCell;

use wasm_bindgen::prelude::*;

use super::classifier_integration::classifier;
use super::fetch::fetch_text;
use super::settings::current_config;
use crate::classifier::{Classifier, TrainOptions};
use crate::dataset::{load_json, shuffle, DatasetManager, LocalStorageStore};
use crate::error::Result;
use crate::pose::Pose;
use crate::session::SessionState;

thread_local! {
    static RECORDER: RefCell<Option<DatasetManager<LocalStorageStore>>> = RefCell::new(None);
}

/// Record `poses` under the active capture label, persisting to localStorage
pub fn record_poses(session: &SessionState, poses: &[Pose]) -> Result<usize> {
    if !session.capture.is_active() {
        return Ok(0);
    }
    RECORDER.with(|r| {
        let mut recorder = r.borrow_mut();
        if recorder.is_none() {
            let store = LocalStorageStore::from_window()?;
            *recorder = Some(DatasetManager::new(store, current_config().storage_key));
        }
        match recorder.as_mut() {
            Some(manager) => session.capture_poses(poses, manager),
            None => Ok(0),
        }
    })
}

/// Samples captured this session
#[wasm_bindgen]
pub fn recorded_sample_count() -> usize {
    RECORDER.with(|r| r.borrow().as_ref().map(|m| m.dataset().len()).unwrap_or(0))
}

/// Fetch the dataset, feed it to the network and train
///
/// Resolves once training completes; the classifier reports ready from then on.
#[wasm_bindgen]
pub async fn import_data() -> std::result::Result<usize, JsValue> {
    let config = current_config();
    let mut nn = classifier()?;

    let text = fetch_text(&config.dataset_url).await?;
    let mut dataset = load_json(&text)?;
    shuffle(&mut dataset, &mut rand::thread_rng());

    for sample in dataset.iter() {
        nn.add_training_sample(&sample.pose, &sample.label);
    }
    console_log!("ℹ️ Training on {} samples for {} epochs", dataset.len(), config.epochs);

    nn.train(TrainOptions { epochs: config.epochs }).await?;
    console_log!("✅ Training complete");
    Ok(dataset.len())
}
