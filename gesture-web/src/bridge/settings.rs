//! Page configuration store

use std::cell::RefCell;

use wasm_bindgen::prelude::*;

use super::logging;
use super::tracking;
use crate::config::AppConfig;

thread_local! {
    static CONFIG: RefCell<AppConfig> = RefCell::new(AppConfig::default());
}

/// Apply a JSON config object. Unset fields keep their defaults.
#[wasm_bindgen]
pub fn configure(json: &str) -> Result<(), JsValue> {
    let config = AppConfig::from_json(json)?;
    logging::set_log_level(&config.log_level)?;
    tracking::apply_config(&config);
    CONFIG.with(|c| *c.borrow_mut() = config);
    Ok(())
}

/// Period for the JS `setInterval` driving `test_tick`
#[wasm_bindgen]
pub fn test_interval_ms() -> u32 {
    CONFIG.with(|c| c.borrow().test_interval_ms)
}

pub fn current_config() -> AppConfig {
    CONFIG.with(|c| c.borrow().clone())
}
