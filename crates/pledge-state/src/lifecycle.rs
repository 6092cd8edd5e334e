//! # Submission Lifecycle State Machine
//!
//! ## States
//!
//! ```text
//! Idle ──▶ Validating ──▶ Submitting ──▶ Succeeded ──▶ Idle
//!              │               │
//!              ▼               ▼
//!             Idle           Failed ──▶ Idle
//! ```
//!
//! The machine is an enum with validated transitions, in the same shape as
//! the other lifecycles in this workspace. Each transition returns `Result`
//! and is appended to an ordered log.
//!
//! ## Trigger Control
//!
//! Entering `Submitting` disables the trigger and swaps in a busy label.
//! Settling from `Succeeded` or `Failed` re-enables it with the label it had
//! before. The trigger is never disabled on the `Validating → Idle` path.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use pledge_core::{ReferenceId, Timestamp, TriggerState};

/// Label the submit trigger shows while idle, unless configured otherwise.
pub const DEFAULT_TRIGGER_LABEL: &str = "Submit Acknowledgement";

/// Label the submit trigger shows while a submission is in flight.
pub const BUSY_LABEL: &str = "Submitting...";

// ─── Phases ──────────────────────────────────────────────────────────

/// Where the form is in the submission flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SubmissionPhase {
    /// Waiting for the user.
    Idle,
    /// Checking the agreement and field constraints.
    Validating,
    /// The record is being dispatched.
    Submitting,
    /// Dispatch completed without a fault (terminal until settled).
    Succeeded,
    /// Dispatch was refused or faulted (terminal until settled).
    Failed,
}

impl SubmissionPhase {
    /// Whether this phase is a terminal outcome awaiting `settle`.
    pub fn is_outcome(&self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed)
    }
}

impl std::fmt::Display for SubmissionPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Idle => "IDLE",
            Self::Validating => "VALIDATING",
            Self::Submitting => "SUBMITTING",
            Self::Succeeded => "SUCCEEDED",
            Self::Failed => "FAILED",
        };
        f.write_str(s)
    }
}

// ─── Errors ──────────────────────────────────────────────────────────

/// Errors that can occur during lifecycle transitions.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LifecycleError {
    /// Attempted transition is not valid from the current phase.
    #[error("invalid submission transition: {from} -> {to}")]
    InvalidTransition { from: String, to: String },
}

// ─── Transition Log ──────────────────────────────────────────────────

/// Record of one phase change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhaseTransition {
    pub from: SubmissionPhase,
    pub to: SubmissionPhase,
    pub timestamp: Timestamp,
    pub reason: String,
}

// ─── Lifecycle ───────────────────────────────────────────────────────

/// Submission flow state for one form instance.
#[derive(Debug, Clone)]
pub struct SubmissionLifecycle {
    phase: SubmissionPhase,
    trigger: TriggerState,
    idle_label: String,
    reference_id: Option<ReferenceId>,
    transitions: Vec<PhaseTransition>,
}

impl SubmissionLifecycle {
    /// A fresh lifecycle whose trigger shows `idle_label`.
    pub fn new(idle_label: impl Into<String>) -> Self {
        let idle_label = idle_label.into();
        Self {
            phase: SubmissionPhase::Idle,
            trigger: TriggerState::enabled(idle_label.clone()),
            idle_label,
            reference_id: None,
            transitions: Vec::new(),
        }
    }

    /// Idle → Validating.
    pub fn begin_validation(&mut self) -> Result<(), LifecycleError> {
        self.require(SubmissionPhase::Idle, SubmissionPhase::Validating)?;
        self.do_transition(SubmissionPhase::Validating, "submit requested");
        Ok(())
    }

    /// Validating → Idle. The trigger is untouched.
    pub fn reject(&mut self, reason: &str) -> Result<(), LifecycleError> {
        self.require(SubmissionPhase::Validating, SubmissionPhase::Idle)?;
        self.do_transition(SubmissionPhase::Idle, reason);
        Ok(())
    }

    /// Validating → Submitting. Disables the trigger.
    pub fn begin_submission(&mut self, reference_id: ReferenceId) -> Result<(), LifecycleError> {
        self.require(SubmissionPhase::Validating, SubmissionPhase::Submitting)?;
        let reason = format!("dispatching {reference_id}");
        self.reference_id = Some(reference_id);
        self.trigger = TriggerState::busy(BUSY_LABEL);
        self.do_transition(SubmissionPhase::Submitting, &reason);
        Ok(())
    }

    /// Submitting → Succeeded.
    pub fn succeed(&mut self) -> Result<(), LifecycleError> {
        self.require(SubmissionPhase::Submitting, SubmissionPhase::Succeeded)?;
        self.do_transition(SubmissionPhase::Succeeded, "dispatched");
        Ok(())
    }

    /// Submitting → Failed.
    pub fn fail(&mut self, reason: &str) -> Result<(), LifecycleError> {
        self.require(SubmissionPhase::Submitting, SubmissionPhase::Failed)?;
        self.do_transition(SubmissionPhase::Failed, reason);
        Ok(())
    }

    /// Succeeded | Failed → Idle. Re-enables the trigger with its idle label.
    pub fn settle(&mut self) -> Result<(), LifecycleError> {
        if !self.phase.is_outcome() {
            return Err(LifecycleError::InvalidTransition {
                from: self.phase.to_string(),
                to: SubmissionPhase::Idle.to_string(),
            });
        }
        self.trigger = TriggerState::enabled(self.idle_label.clone());
        self.reference_id = None;
        self.do_transition(SubmissionPhase::Idle, "settled");
        Ok(())
    }

    pub fn phase(&self) -> SubmissionPhase {
        self.phase
    }

    /// Current trigger state, to be mirrored onto the page.
    pub fn trigger(&self) -> &TriggerState {
        &self.trigger
    }

    /// Reference id of the in-flight attempt.
    pub fn reference_id(&self) -> Option<&ReferenceId> {
        self.reference_id.as_ref()
    }

    /// Ordered log of all phase changes.
    pub fn transitions(&self) -> &[PhaseTransition] {
        &self.transitions
    }

    fn require(
        &self,
        expected: SubmissionPhase,
        target: SubmissionPhase,
    ) -> Result<(), LifecycleError> {
        if self.phase != expected {
            return Err(LifecycleError::InvalidTransition {
                from: self.phase.to_string(),
                to: target.to_string(),
            });
        }
        Ok(())
    }

    fn do_transition(&mut self, to: SubmissionPhase, reason: &str) {
        tracing::debug!(from = %self.phase, to = %to, reason, "submission phase change");
        self.transitions.push(PhaseTransition {
            from: self.phase,
            to,
            timestamp: Timestamp::now(),
            reason: reason.to_string(),
        });
        self.phase = to;
    }
}

impl Default for SubmissionLifecycle {
    fn default() -> Self {
        Self::new(DEFAULT_TRIGGER_LABEL)
    }
}

// ─── Tests ───────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn reference() -> ReferenceId {
        ReferenceId::parse("ACK-LOYW3V28-7F0XQ1").unwrap()
    }

    fn submitting() -> SubmissionLifecycle {
        let mut lc = SubmissionLifecycle::default();
        lc.begin_validation().unwrap();
        lc.begin_submission(reference()).unwrap();
        lc
    }

    #[test]
    fn starts_idle_with_enabled_trigger() {
        let lc = SubmissionLifecycle::new("Send");
        assert_eq!(lc.phase(), SubmissionPhase::Idle);
        assert_eq!(lc.trigger(), &TriggerState::enabled("Send"));
        assert!(lc.transitions().is_empty());
    }

    #[test]
    fn rejection_never_disables_trigger() {
        let mut lc = SubmissionLifecycle::default();
        lc.begin_validation().unwrap();
        assert!(lc.trigger().enabled);
        lc.reject("agreement missing").unwrap();
        assert_eq!(lc.phase(), SubmissionPhase::Idle);
        assert!(lc.trigger().enabled);
        assert_eq!(lc.trigger().label, DEFAULT_TRIGGER_LABEL);
    }

    #[test]
    fn submitting_disables_trigger_with_busy_label() {
        let lc = submitting();
        assert_eq!(lc.phase(), SubmissionPhase::Submitting);
        assert_eq!(lc.trigger(), &TriggerState::busy(BUSY_LABEL));
        assert_eq!(lc.reference_id(), Some(&reference()));
    }

    #[test]
    fn success_settles_back_to_idle() {
        let mut lc = submitting();
        lc.succeed().unwrap();
        assert_eq!(lc.phase(), SubmissionPhase::Succeeded);
        lc.settle().unwrap();
        assert_eq!(lc.phase(), SubmissionPhase::Idle);
        assert_eq!(lc.trigger(), &TriggerState::enabled(DEFAULT_TRIGGER_LABEL));
        assert!(lc.reference_id().is_none());
    }

    #[test]
    fn failure_settles_back_to_idle() {
        let mut lc = submitting();
        lc.fail("no endpoint").unwrap();
        lc.settle().unwrap();
        assert_eq!(lc.phase(), SubmissionPhase::Idle);
        assert!(lc.trigger().enabled);
    }

    #[test]
    fn cannot_submit_twice_concurrently() {
        let mut lc = submitting();
        let err = lc.begin_validation().unwrap_err();
        assert_eq!(
            err,
            LifecycleError::InvalidTransition {
                from: "SUBMITTING".into(),
                to: "VALIDATING".into(),
            }
        );
    }

    #[test]
    fn cannot_skip_validation() {
        let mut lc = SubmissionLifecycle::default();
        assert!(lc.begin_submission(reference()).is_err());
        assert!(lc.succeed().is_err());
        assert!(lc.settle().is_err());
    }

    #[test]
    fn transition_log_records_full_cycle() {
        let mut lc = submitting();
        lc.fail("transport fault").unwrap();
        lc.settle().unwrap();

        let path: Vec<(SubmissionPhase, SubmissionPhase)> =
            lc.transitions().iter().map(|t| (t.from, t.to)).collect();
        assert_eq!(
            path,
            [
                (SubmissionPhase::Idle, SubmissionPhase::Validating),
                (SubmissionPhase::Validating, SubmissionPhase::Submitting),
                (SubmissionPhase::Submitting, SubmissionPhase::Failed),
                (SubmissionPhase::Failed, SubmissionPhase::Idle),
            ]
        );
        assert_eq!(lc.transitions()[2].reason, "transport fault");
    }

    #[test]
    fn phase_display_and_serde() {
        assert_eq!(SubmissionPhase::Submitting.to_string(), "SUBMITTING");
        let json = serde_json::to_string(&SubmissionPhase::Failed).unwrap();
        assert_eq!(json, "\"Failed\"");
    }
}
