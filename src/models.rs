//! Label data models
//!
//! Labels are owned by the data service; the store only holds copies.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Unique identifier for a label
pub type LabelId = String;

/// A user-defined tag attachable to items
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Label {
    /// Unique identifier for the label
    pub id: LabelId,
    /// Display name of the label
    pub name: String,
    /// Hex color string (e.g. `#FF8800`), may be empty
    pub color: String,
    /// Optional free-form description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// When the label was created, if the service reports it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Label {
    /// Create a label with no description or timestamp
    pub fn new(id: impl Into<LabelId>, name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            color: color.into(),
            description: None,
            created_at: None,
        }
    }

    /// Attach a description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// An object (e.g. a saved article) that labels are attached to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Unique identifier for the item
    pub id: String,
    /// Labels currently assigned, in display order
    #[serde(default)]
    pub labels: Vec<Label>,
}

impl Item {
    /// Create an item with the given labels
    pub fn new(id: impl Into<String>, labels: Vec<Label>) -> Self {
        Self {
            id: id.into(),
            labels,
        }
    }

    /// Whether a label with this ID is assigned to the item
    pub fn has_label(&self, label_id: &str) -> bool {
        self.labels.iter().any(|label| label.id == label_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_deserialization_without_optionals() {
        let json = r##"{"id":"l1","name":"Reading","color":"#FF0000"}"##;
        let label: Label = serde_json::from_str(json).unwrap();

        assert_eq!(label, Label::new("l1", "Reading", "#FF0000"));
    }

    #[test]
    fn test_label_serialization_uses_camel_case() {
        let mut label = Label::new("l1", "Reading", "#FF0000").with_description("later");
        label.created_at = Some("2024-01-02T03:04:05Z".parse().unwrap());

        let json = serde_json::to_value(&label).unwrap();
        assert_eq!(json["createdAt"], "2024-01-02T03:04:05Z");
        assert_eq!(json["description"], "later");
    }

    #[test]
    fn test_label_serialization_skips_missing_description() {
        let json = serde_json::to_value(Label::new("l1", "Reading", "")).unwrap();
        assert!(!json.as_object().unwrap().contains_key("description"));
    }

    #[test]
    fn test_item_has_label() {
        let item = Item::new("item-1", vec![Label::new("a", "A", "")]);
        assert!(item.has_label("a"));
        assert!(!item.has_label("b"));
    }
}
