//! The card data model
//!
//! Only the fields the query engine reads are modeled. Everything else in a
//! record rides along in `extra` and comes back verbatim from lookups, so
//! callers can reach image URIs, links, prices, and whatever else the
//! source document carried without the engine knowing about any of it.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One catalog entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    /// Display name. Multifaced cards join both names with " // ".
    pub name: String,

    /// The type line, e.g. "Creature — Goblin Scout". Absent on some layouts.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub type_line: String,

    /// Rules text, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oracle_text: Option<String>,

    /// Faces of a multifaced card
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub card_faces: Vec<CardFace>,

    /// Every other key of the record, preserved for retrieval
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One face of a multifaced card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardFace {
    /// The name of this particular face
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_line: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub oracle_text: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Card {
    /// The card's name followed by each face's name
    pub fn names(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.name.as_str())
            .chain(self.card_faces.iter().map(|face| face.name.as_str()))
    }

    /// The card's type line followed by each face's type line
    pub fn type_lines(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.type_line.as_str()).chain(
            self.card_faces
                .iter()
                .filter_map(|face| face.type_line.as_deref()),
        )
    }

    /// The card's rules text followed by each face's rules text
    pub fn oracle_texts(&self) -> impl Iterator<Item = &str> {
        self.oracle_text.as_deref().into_iter().chain(
            self.card_faces
                .iter()
                .filter_map(|face| face.oracle_text.as_deref()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_minimal_card() {
        let card: Card = serde_json::from_str(r#"{"name": "Goblin Guide"}"#).unwrap();
        assert_eq!(card.name, "Goblin Guide");
        assert_eq!(card.type_line, "");
        assert!(card.oracle_text.is_none());
        assert!(card.card_faces.is_empty());
    }

    #[test]
    fn test_missing_name_fails_decode() {
        let result: Result<Card, _> = serde_json::from_str(r#"{"type_line": "Instant"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_keys_round_trip() {
        let raw = r#"{
            "name": "Lightning Bolt",
            "type_line": "Instant",
            "oracle_text": "Lightning Bolt deals 3 damage to any target.",
            "set": "lea",
            "image_uris": {"normal": "https://example.invalid/bolt.jpg"}
        }"#;
        let card: Card = serde_json::from_str(raw).unwrap();
        assert_eq!(card.extra["set"], "lea");

        let output = serde_json::to_value(&card).unwrap();
        let input: serde_json::Value = serde_json::from_str(raw).unwrap();
        assert_eq!(output, input);
    }

    #[test]
    fn test_face_texts_are_visible() {
        let raw = r#"{
            "name": "Fire // Ice",
            "card_faces": [
                {"name": "Fire", "type_line": "Instant", "oracle_text": "Fire deals 2 damage."},
                {"name": "Ice", "type_line": "Instant", "oracle_text": "Tap target permanent."}
            ]
        }"#;
        let card: Card = serde_json::from_str(raw).unwrap();
        let names: Vec<&str> = card.names().collect();
        assert_eq!(names, vec!["Fire // Ice", "Fire", "Ice"]);

        let texts: Vec<&str> = card.oracle_texts().collect();
        assert_eq!(texts, vec!["Fire deals 2 damage.", "Tap target permanent."]);
    }
}
