//! `window.fetch` for dataset documents

use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::Response;

use crate::error::{GestureError, Result};

fn unavailable(url: &str, err: wasm_bindgen::JsValue) -> GestureError {
    GestureError::DataUnavailable(format!("Failed to fetch {}: {:?}", url, err))
}

/// Fetch `url` as text. Any failure is `DataUnavailable`; nothing retries.
pub async fn fetch_text(url: &str) -> Result<String> {
    let window = web_sys::window()
        .ok_or_else(|| GestureError::DataUnavailable("No window found".to_string()))?;

    let response = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(|e| unavailable(url, e))?;
    let response: Response = response
        .dyn_into()
        .map_err(|e| unavailable(url, e))?;

    if !response.ok() {
        return Err(GestureError::DataUnavailable(format!(
            "Failed to fetch {}: HTTP {}",
            url,
            response.status()
        )));
    }

    let text = JsFuture::from(response.text().map_err(|e| unavailable(url, e))?)
        .await
        .map_err(|e| unavailable(url, e))?;

    text.as_string()
        .ok_or_else(|| GestureError::DataUnavailable(format!("{} did not return text", url)))
}
