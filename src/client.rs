use crate::config::Config;
use crate::error::{Error, Result};
use crate::payload::{format_payload, Message, Payload};
use crate::transport::{HttpTransport, ReqwestTransport};
use serde_json::Value;
use std::sync::Arc;

/// Body accepted by [`Client::post`]. Strings go out verbatim, everything else
/// is serialized to JSON first.
#[derive(Debug, Clone)]
pub enum Outbound {
    Serialized(String),
    Value(Value),
    Payload(Payload),
}

impl Outbound {
    fn into_body(self) -> Result<String> {
        match self {
            Outbound::Serialized(body) => Ok(body),
            Outbound::Value(value) => Ok(serde_json::to_string(&value)?),
            Outbound::Payload(payload) => Ok(serde_json::to_string(&payload)?),
        }
    }
}

impl From<String> for Outbound {
    fn from(body: String) -> Self {
        Outbound::Serialized(body)
    }
}

impl From<&str> for Outbound {
    fn from(body: &str) -> Self {
        Outbound::Serialized(body.to_string())
    }
}

impl From<Value> for Outbound {
    fn from(value: Value) -> Self {
        Outbound::Value(value)
    }
}

impl From<Payload> for Outbound {
    fn from(payload: Payload) -> Self {
        Outbound::Payload(payload)
    }
}

/// Posts messages to a Slack-compatible incoming webhook.
///
/// Every call is a single attempt. Failures are returned to the caller as-is.
pub struct Client<T = ReqwestTransport> {
    config: Arc<Config>,
    transport: T,
}

impl Client<ReqwestTransport> {
    pub fn new(config: impl Into<Arc<Config>>) -> Self {
        Self::with_transport(config, ReqwestTransport::new())
    }
}

impl<T: HttpTransport> Client<T> {
    pub fn with_transport(config: impl Into<Arc<Config>>, transport: T) -> Self {
        Self {
            config: config.into(),
            transport,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Send a payload and return the webhook's response body.
    pub async fn post(&self, payload: impl Into<Outbound>) -> Result<String> {
        let url = self
            .config
            .webhook_url
            .as_deref()
            .ok_or(Error::MissingWebhookUrl)?;
        let body = payload.into().into_body()?;

        tracing::debug!("Posting {} bytes to {}", body.len(), url);

        let response = self
            .transport
            .post(url, &[("Content-Type", "application/json")], body)
            .await?;

        if !response.is_success() {
            tracing::warn!(
                "Webhook {} rejected message: {} {}",
                url,
                response.status,
                response.status_text
            );
            return Err(Error::Delivery {
                url: url.to_string(),
                status: response.status,
                status_text: response.status_text,
            });
        }

        Ok(response.body)
    }

    /// Format `message` with this client's configuration and post it.
    pub async fn post_formatted<S: AsRef<str>>(
        &self,
        tags: &[S],
        message: impl Into<Message>,
    ) -> Result<String> {
        let payload = format_payload(tags, &message.into(), &self.config)?;
        self.post(payload).await
    }
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
