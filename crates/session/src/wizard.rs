//! Operation-creation wizard runtime.
//!
//! Drives the five-step machine defined in `stshub_core::wizard`: per-step
//! validation gates on every forward transition, unconditional backward
//! transitions, and the staged finalize sequence of dependent remote
//! writes (create operation -> add participants -> add vessels ->
//! finalize/notify).
//!
//! The finalize sequence is deliberately non-transactional: a failure
//! partway leaves already-written records on the server and the wizard
//! open at the current step for retry. The assigned-operation guard means
//! a retry reuses the existing operation id instead of creating a
//! duplicate, but participants and vessels are re-sent (at-least-once).

use stshub_client::{ApiError, TransferApi};
use stshub_core::error::CoreError;
use stshub_core::types::Id;
use stshub_core::wizard::{
    validate_basic_info, validate_participants, validate_vessels, FinalizedOperation,
    OperationDraft, ParticipantDraft, ParticipantKind, VesselDraft, WizardStep,
    ALL_PARTICIPANT_KINDS,
};

/// Fallback error message when the server gives no usable detail.
const GENERIC_FINALIZE_ERROR: &str = "Failed to create the operation. Please try again.";

/// Outcome of a forward transition attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum Advance {
    /// Validation passed and the wizard moved to this step.
    MovedTo(WizardStep),
    /// The final step passed validation and the finalize sequence
    /// completed.
    Finalized(FinalizedOperation),
    /// Validation or finalize failed; see [`OperationWizard::error`].
    /// The wizard stays on the current step.
    Blocked,
}

/// State of one wizard session.
pub struct OperationWizard {
    step: WizardStep,
    pub draft: OperationDraft,
    pub trading_company: Vec<ParticipantDraft>,
    pub brokers: Vec<ParticipantDraft>,
    pub shipowners: Vec<ParticipantDraft>,
    pub vessels: Vec<VesselDraft>,
    error: Option<String>,
    /// Set once the operation record exists server-side; prevents a second
    /// create on double submit or retry.
    operation_id: Option<Id>,
    submitting: bool,
}

impl OperationWizard {
    pub fn new() -> Self {
        Self {
            step: WizardStep::BasicInfo,
            draft: OperationDraft::default(),
            trading_company: Vec::new(),
            brokers: Vec::new(),
            shipowners: Vec::new(),
            vessels: Vec::new(),
            error: None,
            operation_id: None,
            submitting: false,
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    /// The step-local error message, if the last transition was blocked.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn operation_id(&self) -> Option<Id> {
        self.operation_id
    }

    /// Whether the finalize sequence is in flight. The submit control is
    /// disabled while this is set.
    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn participants(&self, kind: ParticipantKind) -> &Vec<ParticipantDraft> {
        match kind {
            ParticipantKind::TradingCompany => &self.trading_company,
            ParticipantKind::Broker => &self.brokers,
            ParticipantKind::Shipowner => &self.shipowners,
        }
    }

    pub fn participants_mut(&mut self, kind: ParticipantKind) -> &mut Vec<ParticipantDraft> {
        match kind {
            ParticipantKind::TradingCompany => &mut self.trading_company,
            ParticipantKind::Broker => &mut self.brokers,
            ParticipantKind::Shipowner => &mut self.shipowners,
        }
    }

    /// Validate the current step's collected data.
    fn validate_current(&self) -> Result<(), CoreError> {
        match self.step {
            WizardStep::BasicInfo => validate_basic_info(&self.draft),
            WizardStep::TradingCompanyParticipants => {
                validate_participants(ParticipantKind::TradingCompany, &self.trading_company)
            }
            WizardStep::BrokerParticipants => {
                validate_participants(ParticipantKind::Broker, &self.brokers)
            }
            WizardStep::ShipownerParticipants => {
                validate_participants(ParticipantKind::Shipowner, &self.shipowners)
            }
            WizardStep::Vessels => validate_vessels(&self.vessels),
        }
    }

    /// Attempt a forward transition.
    ///
    /// Failing validation sets the step-local error and blocks the
    /// transition. Advancing past the last step runs the finalize
    /// sequence.
    pub async fn next(&mut self, api: &dyn TransferApi) -> Advance {
        if self.submitting {
            return Advance::Blocked;
        }

        if let Err(e) = self.validate_current() {
            self.error = Some(validation_message(e));
            return Advance::Blocked;
        }
        self.error = None;

        match self.step.next() {
            Some(next) => {
                self.step = next;
                Advance::MovedTo(next)
            }
            None => self.finalize(api).await,
        }
    }

    /// Move one step back. Unconditional: clears the error message and
    /// never re-validates. On the first step only the error is cleared.
    pub fn previous(&mut self) {
        if let Some(prev) = self.step.previous() {
            self.step = prev;
        }
        self.error = None;
    }

    /// Cancel the wizard: all step state and the assigned-operation guard
    /// return to their initial values.
    pub fn close(&mut self) {
        *self = Self::new();
    }

    // ---- finalize sequence ----

    async fn finalize(&mut self, api: &dyn TransferApi) -> Advance {
        self.submitting = true;
        let result = self.run_finalize(api).await;
        self.submitting = false;

        match result {
            Ok(operation) => {
                tracing::info!(
                    operation_id = operation.id,
                    code = operation.operation_code.as_deref(),
                    "Operation finalized"
                );
                Advance::Finalized(operation)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Finalize sequence failed");
                self.error = Some(
                    e.server_detail()
                        .unwrap_or_else(|| GENERIC_FINALIZE_ERROR.to_string()),
                );
                Advance::Blocked
            }
        }
    }

    /// The ordered remote-write sequence. Each call depends on the
    /// operation id from the first one, so the steps are strictly
    /// sequential.
    async fn run_finalize(&mut self, api: &dyn TransferApi) -> Result<FinalizedOperation, ApiError> {
        let operation_id = match self.operation_id {
            Some(id) => id,
            None => {
                let id = api.create_operation(&self.draft).await?;
                self.operation_id = Some(id);
                id
            }
        };

        for kind in ALL_PARTICIPANT_KINDS {
            for participant in self.participants(kind).iter().filter(|p| p.is_filled()) {
                api.add_participant(operation_id, kind, participant).await?;
            }
        }

        for vessel in self.vessels.iter().filter(|v| v.is_filled()) {
            api.add_vessel(operation_id, vessel).await?;
        }

        api.finalize_operation(operation_id).await
    }
}

impl Default for OperationWizard {
    fn default() -> Self {
        Self::new()
    }
}

/// Strip the error-enum prefix: step errors are shown inline as typed.
fn validation_message(err: CoreError) -> String {
    match err {
        CoreError::Validation(msg) => msg,
        other => other.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
