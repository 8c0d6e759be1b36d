//! Testing entry points: live test ticks and the confusion table

use std::cell::RefCell;

use serde::Serialize;
use wasm_bindgen::prelude::*;

use super::classifier_integration::{classifier, ready_classifier};
use super::fetch::fetch_text;
use super::settings::current_config;
use crate::classifier::Classifier;
use crate::dataset::{DatasetManager, MemoryStore, Sample};
use crate::error::GestureError;
use crate::evaluation::{evaluate, LiveTester};

#[derive(Default)]
struct Testing {
    data: Option<DatasetManager<MemoryStore>>,
    tester: LiveTester,
}

thread_local! {
    static TESTING: RefCell<Testing> = RefCell::new(Testing::default());
}

fn to_json<T: Serialize>(value: &T) -> Result<String, JsValue> {
    Ok(serde_json::to_string(value).map_err(GestureError::from)?)
}

/// Fetch the test dataset and split it. Returns JSON split sizes.
#[wasm_bindgen]
pub async fn fetch_test_data() -> Result<String, JsValue> {
    let config = current_config();
    let text = fetch_text(&config.dataset_url).await?;

    let mut manager = DatasetManager::new(MemoryStore::new(), config.storage_key.clone());
    manager.load(&text)?;
    let sizes = manager.split_summary(config.train_fraction, &mut rand::thread_rng());

    TESTING.with(|t| t.borrow_mut().data = Some(manager));
    console_log!("✅ Test data ready: {} samples", sizes.samples);
    to_json(&sizes)
}

/// Start/Stop Testing button
#[wasm_bindgen]
pub fn toggle_testing() -> bool {
    TESTING.with(|t| t.borrow_mut().tester.toggle())
}

fn pick_sample() -> Result<Option<Sample>, GestureError> {
    TESTING.with(|t| {
        let testing = t.borrow();
        if !testing.tester.is_active() {
            return Ok(None);
        }
        let data = testing
            .data
            .as_ref()
            .ok_or_else(|| GestureError::DataUnavailable("test data not fetched yet".to_string()))?;
        let sample = testing.tester.pick(data.dataset(), &mut rand::thread_rng())?;
        Ok(Some(sample.clone()))
    })
}

/// One live test step. Returns a JSON `LiveResult`, or null while stopped.
#[wasm_bindgen]
pub async fn test_tick() -> Result<Option<String>, JsValue> {
    let Some(sample) = pick_sample()? else {
        return Ok(None);
    };
    let nn = ready_classifier().ok_or(GestureError::ClassifierNotReady)?;
    let prediction = nn.classify(&sample.pose).await?;

    let result = TESTING.with(|t| t.borrow_mut().tester.finish(&sample, &prediction));
    match result {
        Some(result) => Ok(Some(to_json(&result)?)),
        None => Ok(None),
    }
}

/// Evaluate every fetched sample and return the JSON confusion table
#[wasm_bindgen]
pub async fn fill_table() -> Result<String, JsValue> {
    let dataset = TESTING.with(|t| {
        t.borrow()
            .data
            .as_ref()
            .map(|data| data.dataset().clone())
            .ok_or_else(|| GestureError::DataUnavailable("test data not fetched yet".to_string()))
    })?;
    let nn = classifier()?;

    let report = evaluate(&dataset, &nn).await?;
    to_json(&report.matrix.table())
}
