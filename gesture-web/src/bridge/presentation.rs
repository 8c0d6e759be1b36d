//! Presentation link form

use std::cell::RefCell;

use wasm_bindgen::prelude::*;

use super::settings::current_config;
use crate::presentation::SlideDeck;

thread_local! {
    static DECK: RefCell<Option<SlideDeck>> = RefCell::new(None);
}

/// Submit a published deck id. Returns the embed URL of slide 0.
#[wasm_bindgen]
pub fn set_presentation(id: &str) -> Result<String, JsValue> {
    let deck = SlideDeck::new(id, &current_config())?;
    let url = deck.embed_url(0);
    console_log!("ℹ️ Presentation set: {}", deck.id());
    DECK.with(|d| *d.borrow_mut() = Some(deck));
    Ok(url)
}

/// Embed URL for `slide`, once a deck is set
#[wasm_bindgen]
pub fn embed_url(slide: u32) -> Option<String> {
    DECK.with(|d| d.borrow().as_ref().map(|deck| deck.embed_url(slide)))
}

/// Linked deck, if any
pub fn current_deck() -> Option<SlideDeck> {
    DECK.with(|d| d.borrow().clone())
}
