//! Classifier module - pose classification boundary
//!
//! Note: in the browser, the neural network runs in JavaScript (ml5).
//! Rust owns the contract, readiness tracking and prediction ranking.

mod centroid;
mod model;
mod prediction;

pub use centroid::CentroidClassifier;
pub use model::{Classifier, ModelDescriptor, ModelStatus, TrainOptions};
pub use prediction::{LabelConfidence, Prediction};

#[cfg(test)]
pub(crate) mod scripted;
