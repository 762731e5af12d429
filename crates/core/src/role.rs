//! User roles.
//!
//! The role set is closed: every party on an STS clearance case acts under
//! exactly one of these roles, and the tab-access tables in [`crate::tabs`]
//! match on them exhaustively.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Role of a session user within a clearance room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Broker,
    Owner,
    Charterer,
    Seller,
    Buyer,
    Viewer,
}

/// All roles, in display order.
pub const ALL_ROLES: [Role; 7] = [
    Role::Admin,
    Role::Broker,
    Role::Owner,
    Role::Charterer,
    Role::Seller,
    Role::Buyer,
    Role::Viewer,
];

impl Role {
    /// Parse a role string as sent by the backend.
    pub fn from_str_wire(s: &str) -> Result<Self, CoreError> {
        match s {
            "admin" => Ok(Self::Admin),
            "broker" => Ok(Self::Broker),
            "owner" => Ok(Self::Owner),
            "charterer" => Ok(Self::Charterer),
            "seller" => Ok(Self::Seller),
            "buyer" => Ok(Self::Buyer),
            "viewer" => Ok(Self::Viewer),
            _ => Err(CoreError::Validation(format!(
                "Invalid role '{s}'. Must be one of: admin, broker, owner, charterer, seller, buyer, viewer"
            ))),
        }
    }

    /// Convert to the wire string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Broker => "broker",
            Self::Owner => "owner",
            Self::Charterer => "charterer",
            Self::Seller => "seller",
            Self::Buyer => "buyer",
            Self::Viewer => "viewer",
        }
    }

    /// Human-readable label for navigation and participant lists.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Admin => "Administrator",
            Self::Broker => "Broker",
            Self::Owner => "Shipowner",
            Self::Charterer => "Charterer",
            Self::Seller => "Seller",
            Self::Buyer => "Buyer",
            Self::Viewer => "Viewer",
        }
    }
}
