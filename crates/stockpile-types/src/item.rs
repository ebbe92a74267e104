//! Item types

use serde::{Deserialize, Serialize};

/// Identifier value meaning "not yet assigned by a store".
pub const UNASSIGNED_ID: i64 = 0;

/// The single stored entity.
///
/// `id` is assigned by the store on creation and never changes afterwards.
/// `name` and `description` carry no constraints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
}

impl Item {
    /// Build an item that has not been stored yet.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: UNASSIGNED_ID,
            name: name.into(),
            description: description.into(),
        }
    }

    /// Copy of this item carrying `id`.
    pub fn with_id(self, id: i64) -> Self {
        Self { id, ..self }
    }
}

/// Request body for creating or replacing an item.
///
/// Every field is optional; missing or `null` strings become empty. A
/// client-supplied `id` is accepted so that echoing a fetched item back
/// works, but it is never honoured.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemPayload {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl From<ItemPayload> for Item {
    fn from(payload: ItemPayload) -> Self {
        Item::new(
            payload.name.unwrap_or_default(),
            payload.description.unwrap_or_default(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_description_is_omitted() {
        let item = Item::new("foo", "").with_id(3);
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json, serde_json::json!({"id": 3, "name": "foo"}));
    }

    #[test]
    fn test_description_is_serialized_when_present() {
        let item = Item::new("foo", "bar").with_id(1);
        let json = serde_json::to_string(&item).unwrap();
        assert_eq!(json, r#"{"id":1,"name":"foo","description":"bar"}"#);
    }

    #[test]
    fn test_missing_fields_default_to_zero_values() {
        let item: Item = serde_json::from_str(r#"{"name":"only"}"#).unwrap();
        assert_eq!(item.id, UNASSIGNED_ID);
        assert_eq!(item.description, "");
    }

    #[test]
    fn test_payload_drops_client_id() {
        let payload: ItemPayload =
            serde_json::from_str(r#"{"id":99,"name":"foo","description":"bar"}"#).unwrap();
        assert_eq!(payload.id, Some(99));

        let item = Item::from(payload);
        assert_eq!(item, Item::new("foo", "bar"));
    }

    #[test]
    fn test_payload_null_strings_become_empty() {
        let payload: ItemPayload =
            serde_json::from_str(r#"{"name":null,"description":"bar"}"#).unwrap();
        assert_eq!(Item::from(payload), Item::new("", "bar"));

        let payload: ItemPayload = serde_json::from_str("{}").unwrap();
        assert_eq!(Item::from(payload), Item::new("", ""));
    }

    #[test]
    fn test_payload_rejects_wrong_types() {
        let result = serde_json::from_str::<ItemPayload>(r#"{"name":42}"#);
        assert!(result.is_err());
    }
}
