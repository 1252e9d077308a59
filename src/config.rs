use crate::error::{Error, Result};
use crate::payload::Field;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Options applied to every message a formatter or client produces.
///
/// Keys follow the camelCase names used in webhook config files; the older
/// `slackHook` and `json2Fields` spellings are accepted as aliases.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Config {
    #[serde(
        rename = "webhookURL",
        alias = "slackHook",
        alias = "webhook_url",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub webhook_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    #[serde(
        rename = "iconURL",
        alias = "icon_url",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub icon_url: Option<String>,

    #[serde(
        rename = "iconEmoji",
        alias = "icon_emoji",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub icon_emoji: Option<String>,

    #[serde(
        rename = "additionalFields",
        alias = "additional_fields",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    pub additional_fields: Vec<Field>,

    #[serde(rename = "hideTags", alias = "hide_tags", default)]
    pub hide_tags: bool,

    #[serde(
        rename = "tagColors",
        alias = "tag_colors",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub tag_colors: Option<TagColors>,

    #[serde(
        rename = "convertObjectToFields",
        alias = "json2Fields",
        alias = "convert_object_to_fields",
        default
    )]
    pub convert_object_to_fields: bool,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("cannot read {}: {}", path.display(), e)))?;
        serde_yaml::from_str(&content)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))
    }

    /// Parse a YAML (or JSON) document.
    pub fn from_yaml(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).map_err(|e| Error::Config(e.to_string()))
    }

    /// A webhook URL given on the command line wins over the file.
    pub fn merge_with_cli(&mut self, webhook_url: Option<String>) {
        if let Some(url) = webhook_url {
            self.webhook_url = Some(url);
        }
    }

    pub fn with_webhook_url(mut self, url: impl Into<String>) -> Self {
        self.webhook_url = Some(url.into());
        self
    }

    pub fn with_channel(mut self, channel: impl Into<String>) -> Self {
        self.channel = Some(channel.into());
        self
    }

    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn with_icon_url(mut self, icon_url: impl Into<String>) -> Self {
        self.icon_url = Some(icon_url.into());
        self
    }

    pub fn with_icon_emoji(mut self, icon_emoji: impl Into<String>) -> Self {
        self.icon_emoji = Some(icon_emoji.into());
        self
    }

    pub fn with_additional_field(mut self, field: Field) -> Self {
        self.additional_fields.push(field);
        self
    }

    pub fn with_hide_tags(mut self, hide: bool) -> Self {
        self.hide_tags = hide;
        self
    }

    pub fn with_tag_colors(mut self, colors: TagColors) -> Self {
        self.tag_colors = Some(colors);
        self
    }

    pub fn with_convert_object_to_fields(mut self, convert: bool) -> Self {
        self.convert_object_to_fields = convert;
        self
    }
}

/// Tag name to attachment color, kept in the order it was declared.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TagColors(Vec<(String, String)>);

impl TagColors {
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(tag, color)| (tag.as_str(), color.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for TagColors {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(tag, color)| (tag.into(), color.into()))
                .collect(),
        )
    }
}

impl Serialize for TagColors {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (tag, color) in &self.0 {
            map.serialize_entry(tag, color)?;
        }
        map.end()
    }
}

// Declaration order decides which color wins when several tags match.
impl<'de> Deserialize<'de> for TagColors {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de;

        struct OrderedMap;

        impl<'de> de::Visitor<'de> for OrderedMap {
            type Value = TagColors;

            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                formatter.write_str("a map of tag names to colors")
            }

            fn visit_map<M>(self, mut access: M) -> std::result::Result<Self::Value, M::Error>
            where
                M: de::MapAccess<'de>,
            {
                let mut entries: Vec<(String, String)> =
                    Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((tag, color)) = access.next_entry::<String, String>()? {
                    // a repeated key keeps its first position but takes the later color
                    if let Some(existing) = entries.iter_mut().find(|(t, _)| *t == tag) {
                        existing.1 = color;
                    } else {
                        entries.push((tag, color));
                    }
                }
                Ok(TagColors(entries))
            }
        }

        deserializer.deserialize_map(OrderedMap)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
