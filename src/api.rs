use crate::{
    config::Config,
    errors::{HookchatError, HookchatResult},
    session::SessionId,
};
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WebhookRequest<'a> {
    message: &'a str,
    session_id: &'a SessionId,
}

/// Posts chat messages to the configured webhook.
#[derive(Debug, Clone)]
pub struct WebhookClient {
    http: Client,
    endpoint: String,
}

impl WebhookClient {
    pub fn new(endpoint: impl Into<String>, timeout: Option<Duration>) -> HookchatResult<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(WebhookClient {
            http: builder.build()?,
            endpoint: endpoint.into(),
        })
    }

    pub fn from_config(config: &Config) -> HookchatResult<Self> {
        Self::new(
            config.webhook_url(),
            config.request_timeout_secs.map(Duration::from_secs),
        )
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Sends one message and returns the `output` field of the reply.
    ///
    /// `Ok(None)` means the webhook answered but gave nothing usable: a body
    /// that is not JSON, no `output`, a non-string `output`, or an empty one.
    /// Transport failures, timeouts and non-2xx statuses are errors.
    pub async fn post_message(
        &self,
        message: &str,
        session_id: &SessionId,
    ) -> HookchatResult<Option<String>> {
        let payload = WebhookRequest {
            message,
            session_id,
        };

        let response = self.http.post(&self.endpoint).json(&payload).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(HookchatError::Status { status, body });
        }

        let body = response.text().await?;
        let data: Value = match serde_json::from_str(&body) {
            Ok(data) => data,
            Err(e) => {
                log::debug!("webhook body is not JSON: {}", e);
                return Ok(None);
            }
        };

        Ok(data
            .get("output")
            .and_then(Value::as_str)
            .filter(|output| !output.is_empty())
            .map(str::to_string))
    }
}
