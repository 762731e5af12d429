//! Operation-creation wizard steps and validation.
//!
//! Defines the step enumeration, the transient draft types collected per
//! step, and the per-step validation gates used by the wizard runtime in
//! the session crate. Everything here is pure; the staged remote writes of
//! the finalize phase live with the runtime.
//!
//! Drafts are transient: participants and vessels exist only inside the
//! wizard and are persisted server-side during finalize. A draft row the
//! user never touched ("unfilled") is skipped by both validation and
//! submission, so trailing blank form rows do not block progression.

use serde::{Deserialize, Serialize};

use crate::countries::is_coastal_country;
use crate::error::CoreError;
use crate::types::{Id, Timestamp};
use crate::vessel::{validate_imo, VesselRole};

// ---------------------------------------------------------------------------
// Steps
// ---------------------------------------------------------------------------

/// The five steps of the operation-creation wizard, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    BasicInfo,
    TradingCompanyParticipants,
    BrokerParticipants,
    ShipownerParticipants,
    Vessels,
}

/// Total number of steps in the wizard.
pub const TOTAL_STEPS: u8 = 5;

/// Minimum step number (1-based).
pub const MIN_STEP: u8 = 1;

/// Maximum step number (1-based).
pub const MAX_STEP: u8 = 5;

impl WizardStep {
    /// Convert a 1-based step number to a `WizardStep`.
    pub fn from_number(n: u8) -> Result<Self, CoreError> {
        match n {
            1 => Ok(Self::BasicInfo),
            2 => Ok(Self::TradingCompanyParticipants),
            3 => Ok(Self::BrokerParticipants),
            4 => Ok(Self::ShipownerParticipants),
            5 => Ok(Self::Vessels),
            _ => Err(CoreError::Validation(format!(
                "Invalid step number {n}. Must be between {MIN_STEP} and {MAX_STEP}"
            ))),
        }
    }

    /// Convert to a 1-based step number.
    pub fn to_number(self) -> u8 {
        match self {
            Self::BasicInfo => 1,
            Self::TradingCompanyParticipants => 2,
            Self::BrokerParticipants => 3,
            Self::ShipownerParticipants => 4,
            Self::Vessels => 5,
        }
    }

    /// Human-readable label for the step indicator.
    pub fn label(self) -> &'static str {
        match self {
            Self::BasicInfo => "Basic Information",
            Self::TradingCompanyParticipants => "Trading Company",
            Self::BrokerParticipants => "Broker",
            Self::ShipownerParticipants => "Shipowner",
            Self::Vessels => "Vessels",
        }
    }

    /// The step after this one, or `None` on the last step.
    pub fn next(self) -> Option<Self> {
        Self::from_number(self.to_number() + 1).ok()
    }

    /// The step before this one, or `None` on the first step.
    pub fn previous(self) -> Option<Self> {
        match self.to_number() {
            n if n > MIN_STEP => Self::from_number(n - 1).ok(),
            _ => None,
        }
    }

    /// The participant group collected on this step, if it is one of the
    /// three participant steps.
    pub fn participant_kind(self) -> Option<ParticipantKind> {
        match self {
            Self::TradingCompanyParticipants => Some(ParticipantKind::TradingCompany),
            Self::BrokerParticipants => Some(ParticipantKind::Broker),
            Self::ShipownerParticipants => Some(ParticipantKind::Shipowner),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Participant groups
// ---------------------------------------------------------------------------

/// The three participant groups collected by the wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParticipantKind {
    TradingCompany,
    Broker,
    Shipowner,
}

/// All participant groups, in submission order.
pub const ALL_PARTICIPANT_KINDS: [ParticipantKind; 3] = [
    ParticipantKind::TradingCompany,
    ParticipantKind::Broker,
    ParticipantKind::Shipowner,
];

impl ParticipantKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TradingCompany => "trading_company",
            Self::Broker => "broker",
            Self::Shipowner => "shipowner",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::TradingCompany => "Trading Company",
            Self::Broker => "Broker",
            Self::Shipowner => "Shipowner",
        }
    }
}

// ---------------------------------------------------------------------------
// Drafts
// ---------------------------------------------------------------------------

/// Operation metadata collected on the basic-info step.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OperationDraft {
    pub title: String,
    pub location: String,
    pub start_date: Option<chrono::NaiveDate>,
    pub end_date: Option<chrono::NaiveDate>,
}

/// One participant form row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParticipantDraft {
    pub name: String,
    pub email: String,
    pub organization: String,
    pub position: String,
}

impl ParticipantDraft {
    /// A row counts as filled once the user typed anything into it.
    pub fn is_filled(&self) -> bool {
        !self.name.is_empty()
            || !self.email.is_empty()
            || !self.organization.is_empty()
            || !self.position.is_empty()
    }
}

/// One vessel form row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VesselDraft {
    pub name: String,
    pub imo: String,
    pub mmsi: String,
    pub vessel_type: String,
    pub flag: String,
    pub role: Option<VesselRole>,
}

impl VesselDraft {
    /// A row counts as filled once the user typed anything into it.
    pub fn is_filled(&self) -> bool {
        !self.name.is_empty()
            || !self.imo.is_empty()
            || !self.mmsi.is_empty()
            || !self.vessel_type.is_empty()
            || !self.flag.is_empty()
            || self.role.is_some()
    }
}

/// The operation record returned by the finalize endpoint.
///
/// Finalizing also triggers the participant notification emails on the
/// backend; that side effect is outside this system's control.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinalizedOperation {
    pub id: Id,
    /// Backend-generated operation code, when the backend assigns one.
    pub operation_code: Option<String>,
    pub title: String,
    pub location: String,
    pub finalized_at: Option<Timestamp>,
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Minimal syntactic email check, matching what the form enforces.
fn is_valid_email(email: &str) -> bool {
    email.contains('@')
}

/// Validate the basic-info step.
pub fn validate_basic_info(draft: &OperationDraft) -> Result<(), CoreError> {
    if draft.title.trim().is_empty() {
        return Err(CoreError::Validation("Title is required".to_string()));
    }
    if !is_coastal_country(&draft.location) {
        return Err(CoreError::Validation(format!(
            "'{}' is not a recognised coastal country",
            draft.location
        )));
    }
    if draft.start_date.is_none() {
        return Err(CoreError::Validation("Start date is required".to_string()));
    }
    Ok(())
}

/// Validate one participant step.
///
/// At least one filled row must carry an email, and every filled row must
/// have a name and a syntactically valid email. Unfilled rows are ignored.
pub fn validate_participants(
    kind: ParticipantKind,
    drafts: &[ParticipantDraft],
) -> Result<(), CoreError> {
    let filled: Vec<&ParticipantDraft> = drafts.iter().filter(|d| d.is_filled()).collect();

    if !filled.iter().any(|d| !d.email.is_empty()) {
        return Err(CoreError::Validation(format!(
            "At least one {} participant with an email is required",
            kind.label()
        )));
    }

    for draft in filled {
        if draft.name.trim().is_empty() {
            return Err(CoreError::Validation(
                "Every participant needs a name".to_string(),
            ));
        }
        if !is_valid_email(&draft.email) {
            return Err(CoreError::Validation(format!(
                "'{}' is not a valid email address",
                draft.email
            )));
        }
    }

    Ok(())
}

/// Validate the vessels step.
///
/// At least one filled row must carry an IMO, and every filled row must
/// have a name, a 7-character IMO, and exactly one transfer role tag.
pub fn validate_vessels(drafts: &[VesselDraft]) -> Result<(), CoreError> {
    let filled: Vec<&VesselDraft> = drafts.iter().filter(|d| d.is_filled()).collect();

    if !filled.iter().any(|d| !d.imo.is_empty()) {
        return Err(CoreError::Validation(
            "At least one vessel with an IMO number is required".to_string(),
        ));
    }

    for draft in filled {
        if draft.name.trim().is_empty() {
            return Err(CoreError::Validation(
                "Every vessel needs a name".to_string(),
            ));
        }
        validate_imo(&draft.imo)?;
        if draft.role.is_none() {
            return Err(CoreError::Validation(format!(
                "Vessel '{}' must be tagged as mother vessel or daughter vessel",
                draft.name
            )));
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn valid_basic_info() -> OperationDraft {
        OperationDraft {
            title: "Aframax lightering off Galveston".into(),
            location: "United States".into(),
            start_date: NaiveDate::from_ymd_opt(2025, 1, 1),
            end_date: None,
        }
    }

    fn filled_participant(email: &str) -> ParticipantDraft {
        ParticipantDraft {
            name: "Dana Broker".into(),
            email: email.into(),
            organization: "Seaways Chartering".into(),
            position: "Operations".into(),
        }
    }

    fn filled_vessel(imo: &str, role: Option<VesselRole>) -> VesselDraft {
        VesselDraft {
            name: "MT Meridian".into(),
            imo: imo.into(),
            mmsi: "563099000".into(),
            vessel_type: "Crude Oil Tanker".into(),
            flag: "Singapore".into(),
            role,
        }
    }

    // -- WizardStep --

    #[test]
    fn step_from_number_roundtrip() {
        for n in MIN_STEP..=MAX_STEP {
            let step = WizardStep::from_number(n).unwrap();
            assert_eq!(step.to_number(), n);
        }
    }

    #[test]
    fn step_from_number_invalid() {
        assert!(WizardStep::from_number(0).is_err());
        assert!(WizardStep::from_number(6).is_err());
    }

    #[test]
    fn step_order_is_linear() {
        assert_eq!(
            WizardStep::BasicInfo.next(),
            Some(WizardStep::TradingCompanyParticipants)
        );
        assert_eq!(WizardStep::Vessels.next(), None);
        assert_eq!(WizardStep::BasicInfo.previous(), None);
        assert_eq!(
            WizardStep::Vessels.previous(),
            Some(WizardStep::ShipownerParticipants)
        );
    }

    #[test]
    fn participant_kind_per_step() {
        assert_eq!(WizardStep::BasicInfo.participant_kind(), None);
        assert_eq!(
            WizardStep::BrokerParticipants.participant_kind(),
            Some(ParticipantKind::Broker)
        );
        assert_eq!(WizardStep::Vessels.participant_kind(), None);
    }

    #[test]
    fn step_labels_are_nonempty() {
        for n in MIN_STEP..=MAX_STEP {
            assert!(!WizardStep::from_number(n).unwrap().label().is_empty());
        }
    }

    // -- Basic info --

    #[test]
    fn valid_basic_info_passes() {
        assert!(validate_basic_info(&valid_basic_info()).is_ok());
    }

    #[test]
    fn empty_title_is_blocked() {
        let draft = OperationDraft {
            title: "".into(),
            location: "Singapore".into(),
            start_date: NaiveDate::from_ymd_opt(2025, 1, 1),
            end_date: None,
        };
        let err = validate_basic_info(&draft).unwrap_err();
        assert!(err.to_string().contains("Title is required"));
    }

    #[test]
    fn whitespace_title_is_blocked() {
        let mut draft = valid_basic_info();
        draft.title = "   ".into();
        assert!(validate_basic_info(&draft).is_err());
    }

    #[test]
    fn non_coastal_location_is_blocked() {
        let draft = OperationDraft {
            title: "X".into(),
            location: "Nowhereland".into(),
            start_date: NaiveDate::from_ymd_opt(2025, 1, 1),
            end_date: None,
        };
        let err = validate_basic_info(&draft).unwrap_err();
        assert!(err.to_string().contains("Nowhereland"));
    }

    #[test]
    fn missing_start_date_is_blocked() {
        let mut draft = valid_basic_info();
        draft.start_date = None;
        assert!(validate_basic_info(&draft).is_err());
    }

    // -- Participants --

    #[test]
    fn one_filled_participant_with_email_passes() {
        let drafts = vec![filled_participant("dana@seaways.example")];
        assert!(validate_participants(ParticipantKind::Broker, &drafts).is_ok());
    }

    #[test]
    fn trailing_blank_rows_are_ignored() {
        let drafts = vec![
            filled_participant("dana@seaways.example"),
            ParticipantDraft::default(),
            ParticipantDraft::default(),
        ];
        assert!(validate_participants(ParticipantKind::TradingCompany, &drafts).is_ok());
    }

    #[test]
    fn no_participants_is_blocked() {
        let err = validate_participants(ParticipantKind::Shipowner, &[]).unwrap_err();
        assert!(err.to_string().contains("Shipowner"));
    }

    #[test]
    fn participant_without_at_sign_is_blocked() {
        let drafts = vec![filled_participant("not-an-email")];
        let err = validate_participants(ParticipantKind::Broker, &drafts).unwrap_err();
        assert!(err.to_string().contains("not-an-email"));
    }

    #[test]
    fn filled_participant_without_name_is_blocked() {
        let drafts = vec![ParticipantDraft {
            name: "".into(),
            email: "dana@seaways.example".into(),
            organization: "".into(),
            position: "".into(),
        }];
        assert!(validate_participants(ParticipantKind::Broker, &drafts).is_err());
    }

    #[test]
    fn second_filled_participant_missing_email_is_blocked() {
        let drafts = vec![
            filled_participant("dana@seaways.example"),
            ParticipantDraft {
                name: "Sam Silent".into(),
                email: "".into(),
                organization: "Seaways".into(),
                position: "".into(),
            },
        ];
        // The second row is filled but has an empty email, which fails the
        // syntactic check applied to every filled row.
        assert!(validate_participants(ParticipantKind::Broker, &drafts).is_err());
    }

    // -- Vessels --

    #[test]
    fn valid_vessel_passes() {
        let drafts = vec![filled_vessel("1234567", Some(VesselRole::MotherVessel))];
        assert!(validate_vessels(&drafts).is_ok());
    }

    #[test]
    fn six_character_imo_is_blocked() {
        let drafts = vec![filled_vessel("123456", Some(VesselRole::MotherVessel))];
        assert!(validate_vessels(&drafts).is_err());
    }

    #[test]
    fn vessel_without_role_tag_is_blocked() {
        let drafts = vec![filled_vessel("1234567", None)];
        let err = validate_vessels(&drafts).unwrap_err();
        assert!(err.to_string().contains("mother vessel or daughter vessel"));
    }

    #[test]
    fn no_vessels_is_blocked() {
        assert!(validate_vessels(&[]).is_err());
    }

    #[test]
    fn blank_vessel_rows_are_ignored() {
        let drafts = vec![
            filled_vessel("1234567", Some(VesselRole::DaughterVessel)),
            VesselDraft::default(),
        ];
        assert!(validate_vessels(&drafts).is_ok());
    }

    #[test]
    fn vessel_without_name_is_blocked() {
        let drafts = vec![VesselDraft {
            name: "".into(),
            imo: "1234567".into(),
            mmsi: "".into(),
            vessel_type: "".into(),
            flag: "".into(),
            role: Some(VesselRole::MotherVessel),
        }];
        assert!(validate_vessels(&drafts).is_err());
    }
}
