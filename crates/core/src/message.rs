//! Room messages.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::{Id, Timestamp};

/// A message in a room's conversation thread.
///
/// `id` is `None` and `local_tag` is `Some` only for the provisional
/// local-echo record appended right after sending, before the
/// authoritative refetch replaces the whole collection. Wire data never
/// carries a tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    #[serde(default)]
    pub id: Option<Id>,
    pub room_id: Id,
    pub author: String,
    pub body: String,
    pub created_at: Timestamp,
    #[serde(skip)]
    pub local_tag: Option<Uuid>,
}

impl Message {
    /// Whether this is a provisional local echo (not yet server-confirmed).
    pub fn is_provisional(&self) -> bool {
        self.local_tag.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn wire_messages_are_not_provisional() {
        let msg: Message = serde_json::from_value(serde_json::json!({
            "id": 5,
            "room_id": 1,
            "author": "ops@example.com",
            "body": "Fenders confirmed",
            "created_at": Utc::now(),
        }))
        .unwrap();
        assert!(!msg.is_provisional());
        assert_eq!(msg.id, Some(5));
    }

    #[test]
    fn local_tag_marks_provisional() {
        let msg = Message {
            id: None,
            room_id: 1,
            author: "ops@example.com".into(),
            body: "Sending now".into(),
            created_at: Utc::now(),
            local_tag: Some(Uuid::new_v4()),
        };
        assert!(msg.is_provisional());
    }
}
