//! # Submitter
//!
//! Attaches the device descriptor to a record and hands it to the transport.

use pledge_core::{describe, ReferenceId, SubmissionRecord, Timestamp};
use url::Url;

use crate::config::SubmitConfig;
use crate::error::SubmitError;
use crate::transport::{Dispatch, Transport};

/// Proof of dispatch.
///
/// Weaker than a delivery receipt: the endpoint's response was never read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ack {
    /// Reference id carried by the dispatched record, if it had one.
    pub reference_id: Option<ReferenceId>,
    pub endpoint: Url,
    pub dispatched_at: Timestamp,
}

/// Sends records to the configured endpoint.
#[derive(Debug, Clone)]
pub struct Submitter<T> {
    config: SubmitConfig,
    transport: T,
    user_agent: String,
}

impl<T: Transport> Submitter<T> {
    /// A submitter describing the device from `user_agent`.
    pub fn new(config: SubmitConfig, transport: T, user_agent: impl Into<String>) -> Self {
        Self {
            config,
            transport,
            user_agent: user_agent.into(),
        }
    }

    pub fn config(&self) -> &SubmitConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Dispatch `record` with the device descriptor attached.
    ///
    /// Returns before touching the transport when no endpoint is configured or
    /// the final agreement has not been accepted.
    pub async fn submit(&self, record: SubmissionRecord) -> Result<Ack, SubmitError> {
        let record = record.with_device(describe(&self.user_agent));

        let Some(endpoint) = self.config.endpoint.clone() else {
            tracing::warn!("submission attempted with no endpoint configured");
            return Err(SubmitError::NotConfigured);
        };
        if !record.is_eligible_for_submission() {
            return Err(SubmitError::NotEligible {
                reference: reference_label(&record),
            });
        }

        let body = serde_json::to_vec(&record)?;
        let reference_id = record.reference_id.clone();
        tracing::info!(
            reference = %reference_label(&record),
            endpoint = %endpoint,
            bytes = body.len(),
            "dispatching submission"
        );

        self.transport
            .dispatch(Dispatch {
                url: endpoint.clone(),
                body,
            })
            .await
            .map_err(|fault| {
                tracing::error!(error = %fault, "submission transport fault");
                SubmitError::Transport(fault)
            })?;

        Ok(Ack {
            reference_id,
            endpoint,
            dispatched_at: Timestamp::now(),
        })
    }

    /// [`submit`](Self::submit) collapsed to "was it dispatched".
    pub async fn submit_accepted(&self, record: SubmissionRecord) -> bool {
        self.submit(record).await.is_ok()
    }
}

fn reference_label(record: &SubmissionRecord) -> String {
    record
        .reference_id
        .as_ref()
        .map_or_else(|| "<unassigned>".to_string(), ToString::to_string)
}
