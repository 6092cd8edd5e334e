//! # pledge-state: Submission Lifecycle
//!
//! The state machine behind the submit button.
//!
//! ```text
//!          submit                valid
//!   Idle ─────────▶ Validating ─────────▶ Submitting
//!    ▲                  │                   │      │
//!    │     invalid      │          Ok       │      │ Err
//!    ├──────────────────┘     ┌─────────────┘      └──────────┐
//!    │                        ▼                               ▼
//!    │                   Succeeded                          Failed
//!    │        settle          │             settle            │
//!    └────────────────────────┴───────────────────────────────┘
//! ```
//!
//! The submit trigger's enabled flag and label are owned here, so that every
//! path back to `Idle` restores them.

pub mod lifecycle;

pub use lifecycle::{
    LifecycleError, PhaseTransition, SubmissionLifecycle, SubmissionPhase, BUSY_LABEL,
    DEFAULT_TRIGGER_LABEL,
};
