//! Session user identity.

use serde::{Deserialize, Serialize};

use crate::role::Role;
use crate::types::Id;

/// The authenticated user for the lifetime of a session.
///
/// Created at login and dropped at logout. `vessel_ids` limits which
/// vessels the user is entitled to see; `None` means unrestricted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: Id,
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(default)]
    pub vessel_ids: Option<Vec<Id>>,
}

impl SessionUser {
    /// Whether this user may see the given vessel.
    pub fn can_see_vessel(&self, vessel_id: Id) -> bool {
        match &self.vessel_ids {
            Some(ids) => ids.contains(&vessel_id),
            None => true,
        }
    }
}
