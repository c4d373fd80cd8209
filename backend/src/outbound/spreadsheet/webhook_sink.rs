//! Reqwest-backed `SubmissionSink` posting envelopes to a script webhook.
//!
//! The webhook answers opaquely (often a redirect or an HTML page), so the
//! response status and body are logged and otherwise ignored. Only a failure
//! to send the request is reported.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use tracing::{debug, warn};

use crate::domain::SubmissionEnvelope;
use crate::domain::ports::{SubmissionSink, SubmissionSinkError};

/// Posts each submission once to a fixed endpoint.
pub struct SpreadsheetWebhookSink {
    client: Client,
    endpoint: Url,
}

impl SpreadsheetWebhookSink {
    /// Build a sink. `timeout` of `None` waits for the endpoint indefinitely.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(endpoint: Url, timeout: Option<Duration>) -> Result<Self, reqwest::Error> {
        let builder = Client::builder();
        let builder = match timeout {
            Some(timeout) => builder.timeout(timeout),
            None => builder,
        };
        Ok(Self {
            client: builder.build()?,
            endpoint,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl SubmissionSink for SpreadsheetWebhookSink {
    async fn deliver(&self, envelope: &SubmissionEnvelope) -> Result<(), SubmissionSinkError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(envelope)
            .send()
            .await
            .map_err(|error| {
                warn!(%error, "registration webhook unreachable");
                SubmissionSinkError::transport(error.to_string())
            })?;
        debug!(
            status = response.status().as_u16(),
            "registration webhook answered; response not inspected"
        );
        Ok(())
    }
}
