//! Turns a tagged message into a Slack incoming-webhook payload.
//!
//! Formatting is pure: the message is borrowed, the configuration is read
//! only, and the same input always serializes to the same bytes.

use crate::config::Config;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::Arc;

const TAGS_FIELD_TITLE: &str = "Tags";

/// Default colors, in evaluation order. A later match overrides an earlier one.
const DEFAULT_TAG_COLORS: [(&str, &str); 3] = [
    ("success", "good"),
    ("warning", "warning"),
    ("error", "danger"),
];

/// Message body handed to the formatter, classified by shape.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    Text(String),
    Record(Map<String, Value>),
    /// Numbers, booleans, null, arrays. Accepted but rendered as fields only.
    Other(Value),
}

impl From<&str> for Message {
    fn from(text: &str) -> Self {
        Message::Text(text.to_string())
    }
}

impl From<String> for Message {
    fn from(text: String) -> Self {
        Message::Text(text)
    }
}

impl From<Map<String, Value>> for Message {
    fn from(record: Map<String, Value>) -> Self {
        Message::Record(record)
    }
}

impl From<Value> for Message {
    fn from(value: Value) -> Self {
        match value {
            Value::String(text) => Message::Text(text),
            Value::Object(record) => Message::Record(record),
            other => Message::Other(other),
        }
    }
}

/// One `title`/`value` entry in an attachment's field list.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Field {
    pub title: String,
    pub value: Value,
}

impl Field {
    pub fn new(title: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            title: title.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Attachment {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title_link: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mrkdwn_in: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub fields: Vec<Field>,
}

/// The JSON document posted to the webhook.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Payload {
    pub attachments: Vec<Attachment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_emoji: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

pub fn build_payload<S: AsRef<str>>(tags: &[S], message: &Message, config: &Config) -> Payload {
    let mut attachment = Attachment::default();

    match message {
        Message::Text(text) => {
            attachment.title = Some(Value::String(text.clone()));
            attachment.fallback = Some(Value::String(text.clone()));
        }
        Message::Record(record) => apply_record(&mut attachment, record, config),
        Message::Other(_) => {}
    }

    attachment
        .fields
        .extend(config.additional_fields.iter().cloned());

    if !config.hide_tags && !tags.is_empty() {
        let joined = tags
            .iter()
            .map(|tag| tag.as_ref())
            .collect::<Vec<&str>>()
            .join(", ");
        attachment.fields.push(Field::new(TAGS_FIELD_TITLE, joined));
    }

    attachment.color = resolve_color(tags, config);

    Payload {
        attachments: vec![attachment],
        channel: config.channel.clone(),
        icon_url: config.icon_url.clone(),
        icon_emoji: config.icon_emoji.clone(),
        username: config.username.clone(),
    }
}

pub fn format_payload<S: AsRef<str>>(
    tags: &[S],
    message: &Message,
    config: &Config,
) -> Result<String> {
    let payload = build_payload(tags, message, config);
    Ok(serde_json::to_string(&payload)?)
}

fn apply_record(attachment: &mut Attachment, record: &Map<String, Value>, config: &Config) {
    if let Some(message) = record.get("message") {
        attachment.title = Some(message.clone());
        attachment.fallback = Some(message.clone());
    }
    if let Some(url) = record.get("url") {
        attachment.title_link = Some(url.clone());
    }

    let remaining = record
        .iter()
        .filter(|(key, _)| key.as_str() != "message" && key.as_str() != "url");

    if config.convert_object_to_fields {
        attachment
            .fields
            .extend(remaining.map(|(key, value)| Field::new(key.clone(), value.clone())));
    } else {
        let remaining: Map<String, Value> = remaining
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        // alternate Display is the two-space pretty printer; an empty map prints as `{}`
        attachment.text = Some(format!("``` {:#} ```", Value::Object(remaining)));
        attachment.mrkdwn_in = Some(vec!["text".to_string()]);
    }
}

fn resolve_color<S: AsRef<str>>(tags: &[S], config: &Config) -> Option<String> {
    let has_tag = |name: &str| tags.iter().any(|tag| tag.as_ref() == name);

    // an override map replaces the defaults entirely, even when nothing in it matches
    match &config.tag_colors {
        Some(colors) => colors
            .iter()
            .filter(|(tag, _)| has_tag(*tag))
            .last()
            .map(|(_, color)| color.to_string()),
        None => DEFAULT_TAG_COLORS
            .iter()
            .filter(|(tag, _)| has_tag(*tag))
            .last()
            .map(|(_, color)| color.to_string()),
    }
}

/// Formats messages against one shared, read-only configuration.
#[derive(Debug, Clone)]
pub struct Formatter {
    config: Arc<Config>,
}

impl Formatter {
    pub fn new(config: impl Into<Arc<Config>>) -> Self {
        Self {
            config: config.into(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn build<S: AsRef<str>>(&self, tags: &[S], message: &Message) -> Payload {
        build_payload(tags, message, &self.config)
    }

    pub fn format<S: AsRef<str>>(&self, tags: &[S], message: &Message) -> Result<String> {
        format_payload(tags, message, &self.config)
    }
}

#[cfg(test)]
#[path = "payload_tests.rs"]
mod tests;
