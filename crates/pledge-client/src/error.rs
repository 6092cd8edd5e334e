//! Submission errors.

use thiserror::Error;

/// A local failure to dispatch the request.
///
/// Only faults the transport itself observes are represented: the response
/// is never inspected, so endpoint-side failures cannot appear here.
#[derive(Error, Debug)]
#[error("{message}")]
pub struct TransportFault {
    message: String,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl TransportFault {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Human-readable description of the fault.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<reqwest::Error> for TransportFault {
    fn from(e: reqwest::Error) -> Self {
        let message = if e.is_connect() {
            "could not connect to the submission endpoint".to_string()
        } else if e.is_timeout() {
            "the submission request timed out".to_string()
        } else {
            format!("the submission request failed: {e}")
        };
        Self::with_source(message, e)
    }
}

/// Why a record was not dispatched.
#[derive(Error, Debug)]
pub enum SubmitError {
    /// No endpoint is configured.
    #[error("no submission endpoint is configured")]
    NotConfigured,

    /// The record's final agreement is not accepted.
    #[error("record {reference} has not accepted the final agreement")]
    NotEligible { reference: String },

    /// The record could not be encoded.
    #[error("failed to encode submission: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The transport failed before the request completed.
    #[error("transport fault: {0}")]
    Transport(#[from] TransportFault),
}

impl SubmitError {
    /// The fault's own message, when the failure came from the transport.
    pub fn fault_message(&self) -> Option<&str> {
        match self {
            Self::Transport(fault) => Some(fault.message()),
            _ => None,
        }
    }
}
