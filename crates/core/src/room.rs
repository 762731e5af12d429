//! Clearance rooms.
//!
//! A room is one ship-to-ship transfer clearance case and the scoping unit
//! for every fetched resource: summary, vessels, documents, messages, and
//! activity are all read against the currently selected room.

use serde::{Deserialize, Serialize};

use crate::types::{Id, Timestamp};

/// One STS transfer clearance case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub id: Id,
    pub title: String,
    /// Transfer location (a coastal country from the fixed list).
    pub location: String,
    pub starts_at: Timestamp,
    pub ends_at: Option<Timestamp>,
}
