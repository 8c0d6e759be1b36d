//! Slide deck embed URLs
//!
//! Shape: `{base}/{id}/embed?{params}&slide={index}`

use crate::config::AppConfig;
use crate::error::{GestureError, Result};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SlideDeck {
    id: String,
    base: String,
    params: String,
}

impl SlideDeck {
    pub fn new(id: &str, config: &AppConfig) -> Result<Self> {
        let id = id.trim();
        if id.is_empty() {
            return Err(GestureError::EmptyPresentationId);
        }
        Ok(Self {
            id: id.to_string(),
            base: config.embed_base.trim_end_matches('/').to_string(),
            params: config.embed_params.clone(),
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn embed_url(&self, slide: u32) -> String {
        format!("{}/{}/embed?{}&slide={}", self.base, self.id, self.params, slide)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embed_url_shape() {
        let deck = SlideDeck::new("2PACX-abc", &AppConfig::default()).unwrap();
        assert_eq!(
            deck.embed_url(3),
            "https://docs.google.com/presentation/d/e/2PACX-abc/embed?start=true&loop=false&delayms=300000&slide=3"
        );
    }

    #[test]
    fn test_empty_id_rejected() {
        assert!(matches!(
            SlideDeck::new("   ", &AppConfig::default()),
            Err(GestureError::EmptyPresentationId)
        ));
    }
}
