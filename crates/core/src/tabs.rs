//! Role-based tab navigation and access tables.
//!
//! Two fixed lookup tables drive the whole UI surface: a role→tabs table
//! used to build navigation, and a tab→allowed-roles table used to gate
//! rendered content. Both are plain exhaustive matches so that adding a
//! role or a tab without updating the tables is a compile error, and both
//! are queried, never mutated, at runtime.
//!
//! Access checks run even for tabs that are not shown in navigation, so a
//! deep link to a hidden tab is still denied.

use serde::{Deserialize, Serialize};

use crate::role::{Role, ALL_ROLES};
use crate::summary::RoomSummary;

// ---------------------------------------------------------------------------
// Tab identifiers
// ---------------------------------------------------------------------------

/// The closed set of navigation tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TabId {
    Overview,
    Cockpit,
    Documents,
    Vessels,
    Messages,
    Activity,
    Approvals,
    History,
    Admin,
}

/// All tabs, in canonical navigation order.
pub const ALL_TABS: [TabId; 9] = [
    TabId::Overview,
    TabId::Cockpit,
    TabId::Documents,
    TabId::Vessels,
    TabId::Messages,
    TabId::Activity,
    TabId::Approvals,
    TabId::History,
    TabId::Admin,
];

impl TabId {
    /// Human-readable tab label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Overview => "Overview",
            Self::Cockpit => "Cockpit",
            Self::Documents => "Documents",
            Self::Vessels => "Vessels",
            Self::Messages => "Messages",
            Self::Activity => "Activity",
            Self::Approvals => "Approvals",
            Self::History => "History",
            Self::Admin => "Admin",
        }
    }
}

// ---------------------------------------------------------------------------
// Access tables
// ---------------------------------------------------------------------------

/// Role-specific tabs appended after the base [`TabId::Overview`] entry.
fn role_tabs(role: Role) -> &'static [TabId] {
    match role {
        Role::Admin => &[
            TabId::Cockpit,
            TabId::Documents,
            TabId::Vessels,
            TabId::Messages,
            TabId::Activity,
            TabId::Approvals,
            TabId::History,
            TabId::Admin,
        ],
        Role::Broker => &[
            TabId::Cockpit,
            TabId::Documents,
            TabId::Vessels,
            TabId::Messages,
            TabId::Activity,
        ],
        Role::Owner | Role::Charterer => &[
            TabId::Cockpit,
            TabId::Documents,
            TabId::Vessels,
            TabId::Messages,
            TabId::Activity,
            TabId::Approvals,
        ],
        Role::Seller | Role::Buyer => &[
            TabId::Documents,
            TabId::Vessels,
            TabId::Messages,
            TabId::Activity,
        ],
        Role::Viewer => &[],
    }
}

/// Roles allowed to view a tab.
///
/// Must stay consistent with [`role_tabs`]; the `tables_agree` test below
/// asserts the two tables describe the same relation.
fn allowed_roles(tab: TabId) -> &'static [Role] {
    match tab {
        TabId::Overview => &ALL_ROLES,
        TabId::Cockpit => &[Role::Admin, Role::Broker, Role::Owner, Role::Charterer],
        TabId::Documents | TabId::Vessels | TabId::Messages | TabId::Activity => &[
            Role::Admin,
            Role::Broker,
            Role::Owner,
            Role::Charterer,
            Role::Seller,
            Role::Buyer,
        ],
        TabId::Approvals => &[Role::Admin, Role::Owner, Role::Charterer],
        TabId::History | TabId::Admin => &[Role::Admin],
    }
}

/// Check whether a role may view a tab.
///
/// A missing role (no authenticated session) is denied everything --
/// deny-by-default is the contract for any pair not in the table.
pub fn can_access_tab(role: Option<Role>, tab: TabId) -> bool {
    match role {
        Some(role) => allowed_roles(tab).contains(&role),
        None => false,
    }
}

// ---------------------------------------------------------------------------
// Navigation building
// ---------------------------------------------------------------------------

/// One navigation entry with its advisory badge count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tab {
    pub id: TabId,
    pub label: &'static str,
    pub badge: u32,
}

/// Build the ordered tab list for a role.
///
/// Always starts with the base [`TabId::Overview`] entry; a missing role
/// yields only that entry. Badge counts come from the (possibly absent)
/// cockpit summary and degrade to zero rather than fail -- badges are
/// advisory and must never take down navigation.
pub fn tabs_for_role(role: Option<Role>, summary: Option<&RoomSummary>) -> Vec<Tab> {
    let mut tabs = vec![Tab {
        id: TabId::Overview,
        label: TabId::Overview.label(),
        badge: 0,
    }];

    if let Some(role) = role {
        tabs.extend(role_tabs(role).iter().map(|&id| Tab {
            id,
            label: id.label(),
            badge: badge_count(id, summary),
        }));
    }

    tabs
}

/// Badge count for a tab, guarded against missing or malformed data.
pub fn badge_count(tab: TabId, summary: Option<&RoomSummary>) -> u32 {
    let Some(summary) = summary else {
        return 0;
    };

    match tab {
        TabId::Documents => summary.blocking_documents.len() as u32,
        TabId::Cockpit => summary.expiring_documents.len() as u32,
        TabId::Approvals => summary.pending_approvals.len() as u32,
        // Backends may omit the unread count or send garbage; clamp.
        TabId::Messages => summary
            .unread_messages
            .filter(|&n| n >= 0)
            .map(|n| n as u32)
            .unwrap_or(0),
        _ => 0,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
