//! Vessels and their transfer roles.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::Id;

/// Required length of an IMO number.
pub const IMO_LENGTH: usize = 7;

/// Transfer role of a vessel within an operation.
///
/// Exactly one of the two roles is assigned per vessel; the wizard's vessel
/// step enforces the exclusivity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VesselRole {
    MotherVessel,
    DaughterVessel,
}

impl VesselRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MotherVessel => "mother_vessel",
            Self::DaughterVessel => "daughter_vessel",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::MotherVessel => "Mother Vessel",
            Self::DaughterVessel => "Daughter Vessel",
        }
    }
}

/// Per-vessel approval entry as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VesselApproval {
    pub role: String,
    pub approved: bool,
}

/// A vessel attached to a clearance room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vessel {
    pub id: Id,
    pub name: String,
    pub imo: String,
    pub mmsi: Option<String>,
    pub vessel_type: Option<String>,
    pub flag: Option<String>,
    pub role: VesselRole,
    #[serde(default)]
    pub approvals: Vec<VesselApproval>,
}

/// Validate an IMO number: exactly [`IMO_LENGTH`] characters.
pub fn validate_imo(imo: &str) -> Result<(), CoreError> {
    if imo.chars().count() != IMO_LENGTH {
        return Err(CoreError::Validation(format!(
            "IMO number must be exactly {IMO_LENGTH} characters, got '{imo}'"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn imo_of_seven_characters_passes() {
        assert!(validate_imo("1234567").is_ok());
    }

    #[test]
    fn imo_of_six_characters_fails() {
        assert!(validate_imo("123456").is_err());
    }

    #[test]
    fn imo_of_eight_characters_fails() {
        assert!(validate_imo("12345678").is_err());
    }

    #[test]
    fn empty_imo_fails() {
        assert!(validate_imo("").is_err());
    }

    #[test]
    fn vessel_role_wire_strings() {
        assert_eq!(VesselRole::MotherVessel.as_str(), "mother_vessel");
        assert_eq!(VesselRole::DaughterVessel.as_str(), "daughter_vessel");
    }
}
