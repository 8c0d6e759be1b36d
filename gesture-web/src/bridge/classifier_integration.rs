//! Classifier integration - ml5 neural network behind the `Classifier` trait
//!
//! The network object is created in JavaScript
//! (`ml5.neuralNetwork({task: 'classification'})`) and handed over once via
//! `init_classifier`. Its callback-style `load`/`train`/`save` become awaited
//! promises here; readiness is tracked on the Rust side.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use async_trait::async_trait;
use js_sys::{Array, Function, Object, Promise, Reflect};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

use super::settings::current_config;
use crate::classifier::{Classifier, ModelDescriptor, ModelStatus, Prediction, TrainOptions};
use crate::error::{GestureError, Result};
use crate::pose::Pose;

#[wasm_bindgen]
extern "C" {
    /// ml5 classification network
    #[derive(Clone, Debug)]
    pub type NeuralNetwork;

    #[wasm_bindgen(method, catch)]
    fn load(this: &NeuralNetwork, details: &JsValue, callback: &Function) -> std::result::Result<JsValue, JsValue>;

    #[wasm_bindgen(method, js_name = addData)]
    fn add_data(this: &NeuralNetwork, inputs: &JsValue, outputs: &JsValue);

    #[wasm_bindgen(method, js_name = normalizeData)]
    fn normalize_data(this: &NeuralNetwork);

    #[wasm_bindgen(method, catch)]
    fn train(this: &NeuralNetwork, options: &JsValue, callback: &Function) -> std::result::Result<JsValue, JsValue>;

    #[wasm_bindgen(method, catch)]
    fn classify(this: &NeuralNetwork, input: &JsValue) -> std::result::Result<Promise, JsValue>;

    #[wasm_bindgen(method, catch)]
    fn save(this: &NeuralNetwork, name: &str, callback: &Function) -> std::result::Result<JsValue, JsValue>;
}

/// Settle on ml5's error-first callback
///
/// `register` hands the callback to an ml5 method. A synchronous throw from
/// that method rejects too, so the future never waits on a callback that
/// will not come.
fn completion(
    register: impl FnOnce(&Function) -> std::result::Result<JsValue, JsValue>,
) -> JsFuture {
    let mut register = Some(register);
    let promise = Promise::new(&mut |resolve: Function, reject: Function| {
        let Some(register) = register.take() else {
            return;
        };
        let settle = reject.clone();
        let callback = Closure::once_into_js(move |err: JsValue, result: JsValue| {
            let _ = if err.is_undefined() || err.is_null() {
                resolve.call1(&JsValue::NULL, &result)
            } else {
                settle.call1(&JsValue::NULL, &err)
            };
        });
        if let Err(thrown) = register(callback.unchecked_ref()) {
            let _ = reject.call1(&JsValue::NULL, &thrown);
        }
    });
    JsFuture::from(promise)
}

fn js_object(entries: &[(&str, JsValue)]) -> JsValue {
    let object = Object::new();
    for (key, value) in entries {
        let _ = Reflect::set(&object, &JsValue::from_str(key), value);
    }
    object.into()
}

fn pose_array(pose: &Pose) -> JsValue {
    pose.as_slice()
        .iter()
        .map(|v| JsValue::from_f64(*v as f64))
        .collect::<Array>()
        .into()
}

fn classifier_error(context: &str, err: JsValue) -> GestureError {
    GestureError::Classifier(format!("{}: {:?}", context, err))
}

/// Shared handle: clones see the same network and the same status
#[derive(Clone)]
pub struct JsClassifier {
    nn: NeuralNetwork,
    status: Rc<Cell<ModelStatus>>,
}

impl JsClassifier {
    pub fn new(nn: NeuralNetwork) -> Self {
        Self {
            nn,
            status: Rc::new(Cell::new(ModelStatus::Empty)),
        }
    }
}

#[async_trait(?Send)]
impl Classifier for JsClassifier {
    fn status(&self) -> ModelStatus {
        self.status.get()
    }

    async fn load(&mut self, model: &ModelDescriptor) -> Result<()> {
        self.status.set(ModelStatus::Loading);
        let details = js_object(&[
            ("model", JsValue::from_str(&model.model)),
            ("metadata", JsValue::from_str(&model.metadata)),
            ("weights", JsValue::from_str(&model.weights)),
        ]);
        let loaded = completion(|callback| self.nn.load(&details, callback))
            .await
            .map(|_| ())
            .map_err(|e| classifier_error("model load failed", e));
        self.status.set(ModelStatus::settled(&loaded));
        loaded
    }

    fn add_training_sample(&mut self, pose: &Pose, label: &str) {
        let outputs = js_object(&[("label", JsValue::from_str(label))]);
        self.nn.add_data(&pose_array(pose), &outputs);
    }

    async fn train(&mut self, options: TrainOptions) -> Result<()> {
        self.status.set(ModelStatus::Training);
        self.nn.normalize_data();
        let options = js_object(&[("epochs", JsValue::from(options.epochs))]);
        let trained = completion(|callback| self.nn.train(&options, callback))
            .await
            .map(|_| ())
            .map_err(|e| classifier_error("training failed", e));
        self.status.set(ModelStatus::settled(&trained));
        trained
    }

    async fn classify(&self, pose: &Pose) -> Result<Prediction> {
        if !self.is_ready() {
            return Err(GestureError::ClassifierNotReady);
        }
        let promise = self
            .nn
            .classify(&pose_array(pose))
            .map_err(|e| classifier_error("classify rejected", e))?;
        let results = JsFuture::from(promise)
            .await
            .map_err(|e| classifier_error("classify failed", e))?;
        let json = js_sys::JSON::stringify(&results)
            .map_err(|e| classifier_error("unreadable classify result", e))?;
        Prediction::from_json(&String::from(json))
    }

    async fn save(&self, name: &str) -> Result<()> {
        completion(|callback| self.nn.save(name, callback))
            .await
            .map_err(|e| classifier_error("model save failed", e))?;
        Ok(())
    }
}

thread_local! {
    static CLASSIFIER: RefCell<Option<JsClassifier>> = RefCell::new(None);
}

/// Hand the page's ml5 network to Rust
#[wasm_bindgen]
pub fn init_classifier(nn: NeuralNetwork) {
    CLASSIFIER.with(|c| *c.borrow_mut() = Some(JsClassifier::new(nn)));
    console_log!("ℹ️ Neural network registered");
}

#[wasm_bindgen]
pub fn is_classifier_ready() -> bool {
    CLASSIFIER.with(|c| c.borrow().as_ref().map(|nn| nn.is_ready()).unwrap_or(false))
}

/// Load the configured saved model
#[wasm_bindgen]
pub async fn load_model() -> std::result::Result<(), JsValue> {
    let mut nn = classifier()?;
    let model = current_config().model;
    nn.load(&model).await?;
    console_log!("✅ Model loaded from {}", model.model);
    Ok(())
}

/// Save Model button
#[wasm_bindgen]
pub async fn save_model() -> std::result::Result<(), JsValue> {
    let nn = classifier()?;
    nn.save(&current_config().model_save_name).await?;
    console_log!("✅ Model saved");
    Ok(())
}

/// Registered network, ready or not
pub fn classifier() -> Result<JsClassifier> {
    CLASSIFIER
        .with(|c| c.borrow().clone())
        .ok_or(GestureError::ClassifierNotReady)
}

/// Registered network, only once it can classify
pub fn ready_classifier() -> Option<JsClassifier> {
    CLASSIFIER.with(|c| c.borrow().clone().filter(|nn| nn.is_ready()))
}
