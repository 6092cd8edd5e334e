//! # pledge-form: Acknowledgement Form Controller
//!
//! Wires page events to the pledge components:
//!
//! | Event | Handler | Effect |
//! |---|---|---|
//! | page load | [`FormController::restore_draft`] | repopulate from the saved draft |
//! | field / agreement change | [`FormController::on_field_change`] | re-collect and auto-save |
//! | submit | [`FormController::on_submit`] | validate, mint reference id, dispatch, present |
//! | print | [`FormController::print`] | export the confirmation receipt |
//!
//! The page is reached only through the [`FormSurface`] and
//! [`DisplaySurface`] traits, so the whole flow runs headless in tests and in
//! the `pledge` CLI.
//!
//! [`FormSurface`]: pledge_core::FormSurface

pub mod config;
pub mod controller;
pub mod display;
pub mod presenter;
pub mod receipt;

pub use config::{validate_prefix, FormConfig, FormConfigError};
pub use controller::{FormController, SubmissionOutcome};
pub use display::{DisplaySurface, DisplayTarget, MemoryDisplay, View};
pub use presenter::{FilePrintTarget, PrintError, PrintTarget, Presenter, PRINT_SETTLE_DELAY};
