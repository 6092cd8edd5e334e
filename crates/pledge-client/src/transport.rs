//! # Transports
//!
//! A transport moves one encoded record to the endpoint and reports only
//! whether it did so without a local fault.

use std::future::Future;

use reqwest::header::{HeaderValue, CONTENT_TYPE};
use url::Url;

use crate::error::TransportFault;

/// A single outbound request.
#[derive(Debug, Clone)]
pub struct Dispatch {
    pub url: Url,
    /// JSON-encoded record.
    pub body: Vec<u8>,
}

/// Fire-and-forget delivery.
pub trait Transport {
    /// Send `request`. `Ok` means the request went out, nothing more.
    fn dispatch(&self, request: Dispatch) -> impl Future<Output = Result<(), TransportFault>> + Send;
}

/// reqwest-backed transport.
///
/// The response status and body are discarded unread, mirroring a browser
/// request made in opaque (`no-cors`) mode. No timeout is applied.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self, TransportFault> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("pledge/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| TransportFault::with_source("failed to build HTTP client", e))?;
        Ok(Self { http })
    }

    /// Wrap an existing client.
    pub fn with_client(http: reqwest::Client) -> Self {
        Self { http }
    }
}

impl Transport for HttpTransport {
    async fn dispatch(&self, request: Dispatch) -> Result<(), TransportFault> {
        let response = self
            .http
            .post(request.url.clone())
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .body(request.body)
            .send()
            .await?;
        // Opaque by contract: the status is logged for operators, never acted on.
        tracing::debug!(
            endpoint = %request.url,
            status = response.status().as_u16(),
            "submission dispatched"
        );
        Ok(())
    }
}
