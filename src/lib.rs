//! Format tagged messages as Slack attachments and deliver them to an
//! incoming webhook.
//!
//! ```no_run
//! # async fn run() -> slackpost::Result<()> {
//! use slackpost::{Client, Config};
//! use serde_json::json;
//!
//! let client = Client::new(Config::new().with_webhook_url("https://hooks.slack.com/services/T/B/X"));
//! client.post_formatted(&["error"], "database unreachable").await?;
//! client
//!     .post_formatted(&["deploy"], json!({ "message": "deployed", "version": "1.4.2" }))
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod payload;
pub mod transport;

pub use client::{Client, Outbound};
pub use config::{Config, TagColors};
pub use error::{Error, Result};
pub use payload::{build_payload, format_payload, Attachment, Field, Formatter, Message, Payload};
pub use transport::{HttpResponse, HttpTransport, ReqwestTransport};
