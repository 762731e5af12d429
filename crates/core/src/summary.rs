//! Cockpit summary snapshot for a clearance room.
//!
//! The summary is an aggregate view owned by the backend: the client
//! replaces it wholesale on each successful fetch and keeps the stale copy
//! when a fetch fails. Collection fields default to empty so that partial
//! payloads from older backends still deserialize.

use serde::{Deserialize, Serialize};

use crate::types::{Id, Timestamp};

/// A document referenced from the summary (blocking or expiring lists).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryDocument {
    pub id: Id,
    pub name: String,
    pub expires_at: Option<Timestamp>,
}

/// An approval awaiting action in this room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingApproval {
    pub document_id: Id,
    pub document_name: String,
    pub requested_by: String,
}

/// Aggregate clearance status for one room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomSummary {
    pub room_id: Id,
    /// Overall clearance progress, 0.0–100.0. Absent while the backend is
    /// still computing it.
    pub progress_percent: Option<f64>,
    #[serde(default)]
    pub blocking_documents: Vec<SummaryDocument>,
    #[serde(default)]
    pub expiring_documents: Vec<SummaryDocument>,
    #[serde(default)]
    pub pending_approvals: Vec<PendingApproval>,
    #[serde(default)]
    pub unread_messages: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_partial_payload() {
        let summary: RoomSummary =
            serde_json::from_value(serde_json::json!({ "room_id": 7 })).unwrap();
        assert_eq!(summary.room_id, 7);
        assert!(summary.progress_percent.is_none());
        assert!(summary.blocking_documents.is_empty());
        assert!(summary.pending_approvals.is_empty());
        assert!(summary.unread_messages.is_none());
    }

    #[test]
    fn deserializes_full_payload() {
        let summary: RoomSummary = serde_json::from_value(serde_json::json!({
            "room_id": 7,
            "progress_percent": 62.5,
            "blocking_documents": [{ "id": 1, "name": "Q88", "expires_at": null }],
            "expiring_documents": [],
            "pending_approvals": [{
                "document_id": 1,
                "document_name": "Q88",
                "requested_by": "ops@example.com"
            }],
            "unread_messages": 4
        }))
        .unwrap();
        assert_eq!(summary.progress_percent, Some(62.5));
        assert_eq!(summary.blocking_documents.len(), 1);
        assert_eq!(summary.pending_approvals[0].document_name, "Q88");
    }
}
