//! # pledge-client: Remote Submitter
//!
//! Sends a finished acknowledgement record to the operator's sheet-backed
//! endpoint with a single POST.
//!
//! ## Trust Model
//!
//! The endpoint is opaque cross-origin infrastructure. The browser transport
//! the form was designed around cannot read the response, so this crate never
//! does either: an [`Ack`] certifies that the request was *dispatched* without
//! a local fault. It does **not** certify that the endpoint accepted, stored,
//! or even received the record. Tests and callers must not read more into it.
//!
//! ## Failure Modes
//!
//! - No endpoint configured: [`SubmitError::NotConfigured`], returned before
//!   the transport is touched. Local-only storage is never success.
//! - Agreement not accepted: [`SubmitError::NotEligible`], also before the
//!   transport.
//! - Connectivity, DNS, TLS: [`SubmitError::Transport`].
//!
//! There are no retries. A failed submission is retried by the user.

pub mod config;
pub mod error;
pub mod submitter;
pub mod transport;

pub use config::{ConfigError, SubmitConfig};
pub use error::{SubmitError, TransportFault};
pub use submitter::{Ack, Submitter};
pub use transport::{Dispatch, HttpTransport, Transport};
