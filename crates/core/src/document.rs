//! Documents and the missing-documents listing.
//!
//! Documents are server-owned: the client never computes status
//! transitions locally, it mutates via the API and re-fetches.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{Id, Timestamp};

/// Lifecycle status of a clearance document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentStatus {
    Draft,
    Submitted,
    Approved,
    Rejected,
    Expired,
}

impl DocumentStatus {
    pub fn from_str_wire(s: &str) -> Result<Self, CoreError> {
        match s {
            "draft" => Ok(Self::Draft),
            "submitted" => Ok(Self::Submitted),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            "expired" => Ok(Self::Expired),
            _ => Err(CoreError::Validation(format!(
                "Invalid document status '{s}'. Must be one of: draft, submitted, approved, rejected, expired"
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Submitted => "submitted",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Expired => "expired",
        }
    }
}

/// A clearance document attached to a room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: Id,
    pub room_id: Id,
    pub name: String,
    pub status: DocumentStatus,
    pub uploaded_by: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Option<Timestamp>,
    pub expires_at: Option<Timestamp>,
}

/// A required document a room is still missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissingDocument {
    pub room_id: Id,
    pub name: String,
    /// Which vessel the requirement applies to, when vessel-scoped.
    pub vessel_id: Option<Id>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_roundtrip() {
        for status in [
            DocumentStatus::Draft,
            DocumentStatus::Submitted,
            DocumentStatus::Approved,
            DocumentStatus::Rejected,
            DocumentStatus::Expired,
        ] {
            assert_eq!(
                DocumentStatus::from_str_wire(status.as_str()).unwrap(),
                status
            );
        }
    }

    #[test]
    fn status_rejects_unknown() {
        assert!(DocumentStatus::from_str_wire("archived").is_err());
    }
}
