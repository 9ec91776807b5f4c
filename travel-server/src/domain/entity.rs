//! Labeled spans produced by the entity recognizer.

use serde::{Deserialize, Serialize};

/// Slot a recognized span fills in a travel order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EntityLabel {
    Departure,
    Destination,
    Time,
}

/// A labeled substring of the user's request.
///
/// Offsets are kept as provenance only; resolution never reads them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedEntity {
    pub text: String,
    pub label: EntityLabel,
    #[serde(rename = "start", default)]
    pub start_offset: usize,
    #[serde(rename = "end", default)]
    pub end_offset: usize,
}

impl ExtractedEntity {
    /// Create an entity without offset information.
    pub fn new(label: EntityLabel, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            label,
            start_offset: 0,
            end_offset: 0,
        }
    }

    /// Attach the character span this entity was found at.
    pub fn with_span(mut self, start: usize, end: usize) -> Self {
        self.start_offset = start;
        self.end_offset = end;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_entity() {
        let json = r#"{"text": "Paris", "label": "DEPARTURE", "start": 12, "end": 17}"#;
        let entity: ExtractedEntity = serde_json::from_str(json).unwrap();
        assert_eq!(
            entity,
            ExtractedEntity::new(EntityLabel::Departure, "Paris").with_span(12, 17)
        );
    }

    #[test]
    fn offsets_are_optional() {
        let json = r#"{"text": "demain", "label": "TIME"}"#;
        let entity: ExtractedEntity = serde_json::from_str(json).unwrap();
        assert_eq!(entity, ExtractedEntity::new(EntityLabel::Time, "demain"));
    }

    #[test]
    fn unknown_label_rejected() {
        let json = r#"{"text": "x", "label": "PRICE"}"#;
        assert!(serde_json::from_str::<ExtractedEntity>(json).is_err());
    }
}
