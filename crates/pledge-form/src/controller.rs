//! # Form Controller
//!
//! Owns one form instance: its page surfaces, draft slot, submitter, and
//! submission lifecycle. Every handler returns control in the `Idle` phase.

use pledge_client::{Ack, SubmitError, Submitter, Transport};
use pledge_core::{
    check_acknowledgement, collect, FieldName, FormSurface, ReferenceId, ValidationError,
};
use pledge_state::{LifecycleError, SubmissionLifecycle, SubmissionPhase};
use pledge_store::{DraftStore, KeyValueStore};

use crate::config::FormConfig;
use crate::display::DisplaySurface;
use crate::presenter::{PrintError, PrintTarget, Presenter};

/// Title of the modal shown when the final agreement is unchecked.
pub const INCOMPLETE_TITLE: &str = "Incomplete Agreement";
/// Body of the modal shown when the final agreement is unchecked.
pub const INCOMPLETE_MESSAGE: &str =
    "Please read every policy section and check the final acknowledgement before submitting.";
/// Title of the error view after a failed submission.
pub const FAILED_TITLE: &str = "Submission Failed";
/// Body used when the failure carries no message of its own.
pub const FAILED_MESSAGE: &str =
    "Your acknowledgement could not be submitted. Your answers are still saved on this device; please try again.";

/// Result of one submit event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// Validation failed; nothing was dispatched.
    Invalid(ValidationError),
    /// The record was dispatched.
    Succeeded { reference_id: ReferenceId, ack: Ack },
    /// Dispatch was refused or faulted; the draft is intact.
    Failed {
        reference_id: ReferenceId,
        message: String,
    },
    /// A submission is already in flight.
    Busy,
}

impl SubmissionOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded { .. })
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Invalid(_) => "invalid",
            Self::Succeeded { .. } => "succeeded",
            Self::Failed { .. } => "failed",
            Self::Busy => "busy",
        }
    }
}

/// Controller for one acknowledgement form.
pub struct FormController<F, S, T, D> {
    config: FormConfig,
    form: F,
    drafts: DraftStore<S>,
    submitter: Submitter<T>,
    display: D,
    presenter: Presenter,
    lifecycle: SubmissionLifecycle,
}

impl<F, S, T, D> FormController<F, S, T, D>
where
    F: FormSurface,
    S: KeyValueStore,
    T: Transport,
    D: DisplaySurface,
{
    /// Wire a controller. The trigger is set to its idle label immediately.
    pub fn new(
        config: FormConfig,
        form: F,
        store: S,
        transport: T,
        display: D,
        user_agent: impl Into<String>,
    ) -> Self {
        let submitter = Submitter::new(config.submit.clone(), transport, user_agent);
        let lifecycle = SubmissionLifecycle::new(config.trigger_label.clone());
        let mut controller = Self {
            config,
            form,
            drafts: DraftStore::new(store),
            submitter,
            display,
            presenter: Presenter::new(),
            lifecycle,
        };
        controller.sync_trigger();
        controller
    }

    /// Replace the presenter, e.g. to shorten the print settle delay.
    pub fn with_presenter(mut self, presenter: Presenter) -> Self {
        self.presenter = presenter;
        self
    }

    /// Repopulate the form from the saved draft, if any.
    ///
    /// Only the identity fields and the agreement are restored. Course,
    /// contact information, and section content stay as the page rendered
    /// them even though the draft holds them.
    pub fn restore_draft(&mut self) -> bool {
        let Some(draft) = self.drafts.load() else {
            return false;
        };
        for field in FieldName::RESTORABLE {
            self.form.set(field, draft.field(field));
        }
        self.form.set_agreement(draft.final_agreement);
        tracing::info!(saved_at = %draft.timestamp, "draft restored");
        true
    }

    /// A tracked field changed: re-collect and auto-save.
    pub fn on_field_change(&mut self, field: FieldName) {
        tracing::trace!(field = %field, "field changed");
        self.autosave();
    }

    /// The final agreement toggled: re-collect and auto-save.
    pub fn on_agreement_change(&mut self) {
        self.autosave();
    }

    fn autosave(&mut self) {
        let record = collect(&self.form);
        match self.drafts.save(&record) {
            Ok(()) => metrics::counter!("pledge_autosaves_total").increment(1),
            Err(e) => tracing::warn!(error = %e, "auto-save failed"),
        }
    }

    /// Check the form, surfacing any problem to the user.
    ///
    /// A missing agreement opens the error modal; constraint failures switch
    /// on inline validation styling instead.
    pub fn validate(&mut self) -> bool {
        self.check_and_surface().is_ok()
    }

    fn check_and_surface(&mut self) -> Result<(), ValidationError> {
        let result = check_acknowledgement(&self.form);
        match &result {
            Err(e) if e.is_modal() => {
                self.presenter
                    .show_error(&mut self.display, INCOMPLETE_TITLE, INCOMPLETE_MESSAGE);
            }
            Err(_) => self.form.set_validated(true),
            Ok(()) => {}
        }
        result
    }

    /// Handle the submit event.
    ///
    /// Once dispatch begins, the lifecycle is settled and the trigger
    /// re-enabled even if this future is dropped before it completes.
    pub async fn on_submit(&mut self) -> SubmissionOutcome {
        if let Err(e) = self.lifecycle.begin_validation() {
            tracing::debug!(error = %e, "submit ignored while a submission is in flight");
            return SubmissionOutcome::Busy;
        }

        if let Err(e) = self.check_and_surface() {
            step(&mut self.lifecycle, |lc| lc.reject(&e.to_string()));
            let outcome = SubmissionOutcome::Invalid(e);
            record_outcome(&outcome);
            return outcome;
        }

        let reference_id = ReferenceId::generate(&self.config.reference_prefix);
        step(&mut self.lifecycle, |lc| lc.begin_submission(reference_id.clone()));

        let Self {
            form,
            drafts,
            submitter,
            display,
            presenter,
            lifecycle,
            ..
        } = self;
        let mut guard = SettleGuard::new(lifecycle, form);

        let record = collect(&*guard.form).with_reference_id(reference_id.clone());
        let result = submitter.submit(record.clone()).await;

        let outcome = match result {
            Ok(ack) => {
                guard.step(SubmissionLifecycle::succeed);
                presenter.show_success(display, &reference_id, &record);
                if let Err(e) = drafts.clear() {
                    tracing::warn!(error = %e, "failed to clear draft after submission");
                }
                guard.form.reset();
                guard.form.set_validated(false);
                tracing::info!(reference = %reference_id, "acknowledgement submitted");
                SubmissionOutcome::Succeeded { reference_id, ack }
            }
            Err(e) => {
                let message = failure_message(&e);
                guard.step(|lc| lc.fail(&e.to_string()));
                presenter.show_error(display, FAILED_TITLE, &message);
                tracing::warn!(reference = %reference_id, error = %e, "acknowledgement not submitted");
                SubmissionOutcome::Failed {
                    reference_id,
                    message,
                }
            }
        };

        drop(guard);
        record_outcome(&outcome);
        outcome
    }

    /// Clear every field and drop inline validation styling.
    pub fn reset_form(&mut self) {
        self.form.reset();
        self.form.set_validated(false);
    }

    /// Export the confirmation receipt.
    pub async fn print<P: PrintTarget + ?Sized>(&self, target: &mut P) -> Result<bool, PrintError> {
        self.presenter.print(&self.display, target).await
    }

    pub fn config(&self) -> &FormConfig {
        &self.config
    }

    pub fn form(&self) -> &F {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut F {
        &mut self.form
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn drafts(&self) -> &DraftStore<S> {
        &self.drafts
    }

    pub fn submitter(&self) -> &Submitter<T> {
        &self.submitter
    }

    pub fn lifecycle(&self) -> &SubmissionLifecycle {
        &self.lifecycle
    }

    pub fn phase(&self) -> SubmissionPhase {
        self.lifecycle.phase()
    }

    fn sync_trigger(&mut self) {
        self.form.set_trigger(self.lifecycle.trigger());
    }
}

/// Settles the lifecycle and mirrors the trigger onto the page when dropped.
///
/// An attempt still in `Submitting` at drop time (the submit future was
/// dropped or the transport panicked) is recorded as failed first.
struct SettleGuard<'a, F: FormSurface> {
    lifecycle: &'a mut SubmissionLifecycle,
    form: &'a mut F,
}

impl<'a, F: FormSurface> SettleGuard<'a, F> {
    fn new(lifecycle: &'a mut SubmissionLifecycle, form: &'a mut F) -> Self {
        form.set_trigger(lifecycle.trigger());
        Self { lifecycle, form }
    }

    fn step(
        &mut self,
        transition: impl FnOnce(&mut SubmissionLifecycle) -> Result<(), LifecycleError>,
    ) {
        step(self.lifecycle, transition);
    }
}

impl<F: FormSurface> Drop for SettleGuard<'_, F> {
    fn drop(&mut self) {
        if self.lifecycle.phase() == SubmissionPhase::Submitting {
            tracing::warn!(
                reference = ?self.lifecycle.reference_id(),
                "submission abandoned before dispatch completed"
            );
            step(self.lifecycle, |lc| lc.fail("abandoned"));
        }
        step(self.lifecycle, SubmissionLifecycle::settle);
        self.form.set_trigger(self.lifecycle.trigger());
    }
}

fn step(
    lifecycle: &mut SubmissionLifecycle,
    transition: impl FnOnce(&mut SubmissionLifecycle) -> Result<(), LifecycleError>,
) {
    if let Err(e) = transition(lifecycle) {
        tracing::error!(error = %e, "submission lifecycle out of step");
    }
}

fn failure_message(error: &SubmitError) -> String {
    error
        .fault_message()
        .map_or_else(|| FAILED_MESSAGE.to_string(), str::to_string)
}

fn record_outcome(outcome: &SubmissionOutcome) {
    metrics::counter!("pledge_submissions_total", "outcome" => outcome.label()).increment(1);
}
