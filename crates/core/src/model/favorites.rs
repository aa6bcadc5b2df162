use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::concept::concept_id;
use super::ids::RecordId;

/// A bookmarked page. Unique by route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bookmark {
    pub id: RecordId,
    pub route: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub added_at: DateTime<Utc>,
}

/// A favorited concept. Unique by `topic#anchor`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConceptFavorite {
    pub id: String,
    pub topic: String,
    pub anchor: String,
    pub title: String,
    pub added_at: DateTime<Utc>,
}

impl ConceptFavorite {
    #[must_use]
    pub fn new(topic: &str, anchor: &str, title: &str, added_at: DateTime<Utc>) -> Self {
        Self {
            id: concept_id(topic, anchor),
            topic: topic.to_string(),
            anchor: anchor.to_string(),
            title: title.to_string(),
            added_at,
        }
    }
}
