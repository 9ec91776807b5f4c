//! Entity recognition boundary.
//!
//! The recognizer itself is an external model; this crate only consumes its
//! output through [`EntityExtractor`].

use crate::domain::ExtractedEntity;

/// Turns raw user text into labeled entities.
pub trait EntityExtractor {
    /// Extract entities from `text`, in order of appearance.
    fn extract(&self, text: &str) -> Vec<ExtractedEntity>;
}

impl<F> EntityExtractor for F
where
    F: Fn(&str) -> Vec<ExtractedEntity>,
{
    fn extract(&self, text: &str) -> Vec<ExtractedEntity> {
        self(text)
    }
}

/// An extractor that returns a fixed list, whatever the input.
#[derive(Debug, Clone, Default)]
pub struct StaticExtractor {
    entities: Vec<ExtractedEntity>,
}

impl StaticExtractor {
    pub fn new(entities: Vec<ExtractedEntity>) -> Self {
        Self { entities }
    }
}

impl EntityExtractor for StaticExtractor {
    fn extract(&self, _text: &str) -> Vec<ExtractedEntity> {
        self.entities.clone()
    }
}
