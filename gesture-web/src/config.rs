//! Page configuration
//!
//! Passed from JavaScript as a JSON string. Every field is optional and
//! falls back to the values the presentation page ships with.

use serde::Deserialize;

use crate::classifier::ModelDescriptor;
use crate::error::{GestureError, Result};

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AppConfig {
    /// Label that advances the deck by one slide
    #[serde(default = "default_confirm_label")]
    pub confirm_label: String,
    /// Label that shows the hand hint overlay
    #[serde(default = "default_hint_label")]
    pub hint_label: String,
    /// Fraction of the shuffled dataset used for training
    #[serde(default = "default_train_fraction")]
    pub train_fraction: f64,
    #[serde(default = "default_epochs")]
    pub epochs: u32,
    /// localStorage key holding recorded samples
    #[serde(default = "default_storage_key")]
    pub storage_key: String,
    #[serde(default = "default_dataset_url")]
    pub dataset_url: String,
    #[serde(default)]
    pub model: ModelDescriptor,
    #[serde(default = "default_model_save_name")]
    pub model_save_name: String,
    /// Live test tick period
    #[serde(default = "default_test_interval_ms")]
    pub test_interval_ms: u32,
    #[serde(default = "default_embed_base")]
    pub embed_base: String,
    #[serde(default = "default_embed_params")]
    pub embed_params: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_confirm_label() -> String { "okay".to_string() }
fn default_hint_label() -> String { "open".to_string() }
fn default_train_fraction() -> f64 { 0.8 }
fn default_epochs() -> u32 { 20 }
fn default_storage_key() -> String { "training".to_string() }
fn default_dataset_url() -> String { "trainingData.json".to_string() }
fn default_model_save_name() -> String { "model".to_string() }
fn default_test_interval_ms() -> u32 { 50 }
fn default_embed_base() -> String { "https://docs.google.com/presentation/d/e".to_string() }
fn default_embed_params() -> String { "start=true&loop=false&delayms=300000".to_string() }
fn default_log_level() -> String { "info".to_string() }

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            confirm_label: default_confirm_label(),
            hint_label: default_hint_label(),
            train_fraction: default_train_fraction(),
            epochs: default_epochs(),
            storage_key: default_storage_key(),
            dataset_url: default_dataset_url(),
            model: ModelDescriptor::default(),
            model_save_name: default_model_save_name(),
            test_interval_ms: default_test_interval_ms(),
            embed_base: default_embed_base(),
            embed_params: default_embed_params(),
            log_level: default_log_level(),
        }
    }
}

impl AppConfig {
    /// Parse and validate a JSON config object
    pub fn from_json(json: &str) -> Result<Self> {
        let config: AppConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.train_fraction > 0.0 && self.train_fraction <= 1.0) {
            return Err(GestureError::Config(format!(
                "train_fraction must be in (0, 1], got {}",
                self.train_fraction
            )));
        }
        if self.storage_key.is_empty() {
            return Err(GestureError::Config("storage_key must not be empty".to_string()));
        }
        Ok(())
    }
}
