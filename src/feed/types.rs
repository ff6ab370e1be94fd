//! Telegraph feed types for telewatch.

use serde::{Deserialize, Deserializer, Serialize};

/// One published entry from the telegraph newswire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelegraphItem {
    /// Opaque stable identifier. The upstream serializes this as either a
    /// JSON number or a string; both are accepted and normalized to a string.
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    /// Publication time in seconds since the Unix epoch.
    pub ctime: i64,
    /// Item title. Absent or empty for most telegraph flashes.
    #[serde(default)]
    pub title: Option<String>,
    /// Item body text.
    pub content: String,
    /// Category label.
    pub category_name: String,
    /// Importance label. Absent for ordinary items.
    #[serde(default)]
    pub level: Option<String>,
}

impl TelegraphItem {
    /// Title, treating an empty string the same as absent.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref().filter(|t| !t.is_empty())
    }

    /// Importance level, treating an empty string the same as absent.
    pub fn level(&self) -> Option<&str> {
        self.level.as_deref().filter(|l| !l.is_empty())
    }
}

fn deserialize_id<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Number(i64),
        Text(String),
    }

    match RawId::deserialize(deserializer)? {
        RawId::Number(n) => Ok(n.to_string()),
        RawId::Text(s) => Ok(s),
    }
}

/// The ordered set of items returned by a single poll.
///
/// Items keep the upstream ordering, newest first: index 0 is the most
/// recently published item. The snapshot is never re-sorted.
#[derive(Debug, Clone, Default)]
pub struct TelegraphSnapshot {
    items: Vec<TelegraphItem>,
}

impl TelegraphSnapshot {
    /// Create a snapshot from items already in upstream (newest-first) order.
    pub fn new(items: Vec<TelegraphItem>) -> Self {
        Self { items }
    }

    /// The most recently published item, if any.
    pub fn latest(&self) -> Option<&TelegraphItem> {
        self.items.first()
    }

    /// All items in upstream order.
    pub fn items(&self) -> &[TelegraphItem] {
        &self.items
    }

    /// Number of items in the snapshot.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the snapshot contains no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_item(id: &str) -> TelegraphItem {
        TelegraphItem {
            id: id.to_string(),
            ctime: 1700000000,
            title: None,
            content: "X".to_string(),
            category_name: "Macro".to_string(),
            level: None,
        }
    }

    #[test]
    fn test_deserialize_item_with_string_id() {
        let item: TelegraphItem = serde_json::from_str(
            r#"{"id": "1001", "ctime": 1700000000, "content": "X", "category_name": "Macro"}"#,
        )
        .unwrap();
        assert_eq!(item.id, "1001");
        assert_eq!(item.ctime, 1700000000);
        assert!(item.title.is_none());
        assert!(item.level.is_none());
    }

    #[test]
    fn test_deserialize_item_with_numeric_id() {
        let item: TelegraphItem = serde_json::from_str(
            r#"{"id": 1001, "ctime": 1700000000, "content": "X", "category_name": "Macro"}"#,
        )
        .unwrap();
        assert_eq!(item.id, "1001");
    }

    #[test]
    fn test_deserialize_item_missing_content() {
        let result: std::result::Result<TelegraphItem, _> = serde_json::from_str(
            r#"{"id": "1001", "ctime": 1700000000, "category_name": "Macro"}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_title_helper_filters_empty() {
        let mut item = sample_item("1");
        assert!(item.title().is_none());

        item.title = Some(String::new());
        assert!(item.title().is_none());

        item.title = Some("Breaking".to_string());
        assert_eq!(item.title(), Some("Breaking"));
    }

    #[test]
    fn test_level_helper_filters_empty() {
        let mut item = sample_item("1");
        assert!(item.level().is_none());

        item.level = Some(String::new());
        assert!(item.level().is_none());

        item.level = Some("B".to_string());
        assert_eq!(item.level(), Some("B"));
    }

    #[test]
    fn test_snapshot_latest_is_first() {
        let snapshot = TelegraphSnapshot::new(vec![sample_item("3"), sample_item("2")]);
        assert_eq!(snapshot.latest().unwrap().id, "3");
        assert_eq!(snapshot.len(), 2);
        assert!(!snapshot.is_empty());
    }

    #[test]
    fn test_snapshot_preserves_order() {
        let snapshot =
            TelegraphSnapshot::new(vec![sample_item("9"), sample_item("5"), sample_item("7")]);
        let ids: Vec<&str> = snapshot.items().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, ["9", "5", "7"]);
    }

    #[test]
    fn test_empty_snapshot() {
        let snapshot = TelegraphSnapshot::default();
        assert!(snapshot.is_empty());
        assert!(snapshot.latest().is_none());
        assert_eq!(snapshot.len(), 0);
    }
}
