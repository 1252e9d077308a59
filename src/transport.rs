use crate::error::{Error, Result};
use async_trait::async_trait;

/// What came back from the webhook, success or not.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub status_text: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The one HTTP capability delivery needs: a single POST.
///
/// Implementations return `Ok` for any response the server produced, whatever
/// its status, and `Err` only when no response was obtained.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn post(&self, url: &str, headers: &[(&str, &str)], body: String) -> Result<HttpResponse>;
}

#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn post(&self, url: &str, headers: &[(&str, &str)], body: String) -> Result<HttpResponse> {
        let mut request = self.client.post(url).body(body);
        for (name, value) in headers {
            request = request.header(*name, *value);
        }

        let response = request.send().await?;

        let status = response.status();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();
        let body = settle_body(status.is_success(), response.text().await.map_err(Error::from))?;

        Ok(HttpResponse {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
            headers,
            body,
        })
    }
}

/// A body that fails to arrive only matters when the post succeeded; on an
/// error status the status itself is what the caller gets.
fn settle_body(success: bool, body: Result<String>) -> Result<String> {
    match body {
        Ok(body) => Ok(body),
        Err(err) if success => Err(err),
        Err(err) => {
            tracing::debug!("Dropping unreadable error response body: {}", err);
            Ok(String::new())
        }
    }
}
