//! Room activity feed entries.

use serde::{Deserialize, Serialize};

use crate::types::{Id, Timestamp};

/// One audit-style entry in a room's activity feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub id: Id,
    pub room_id: Id,
    pub actor: String,
    pub description: String,
    pub created_at: Timestamp,
}
