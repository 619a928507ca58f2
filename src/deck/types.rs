use chrono::Utc;
use serde::{Deserialize, Serialize};

/// A saved draft: the set it came from and the picks in order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedDeck {
    pub set: String,
    #[serde(default)]
    pub cards: Vec<String>,
    /// RFC 3339 save time. Older files may omit it or carry a naive timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

impl SavedDeck {
    /// New deck stamped with the current time
    pub fn new(set: impl Into<String>, cards: Vec<String>) -> Self {
        Self {
            set: set.into(),
            cards,
            date: Some(Utc::now().to_rfc3339()),
        }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}
