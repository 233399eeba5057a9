// SPDX-FileCopyrightText: 2026 Redline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! YAML front matter extraction.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};

/// The front matter keys the store cares about. Everything else is ignored.
#[derive(Debug, Default, Deserialize)]
pub struct FrontMatter {
    #[serde(default)]
    file_key: Option<serde_yaml::Value>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub created: Option<DateTime<Utc>>,
}

/// A `created` value that is not an RFC 3339 string reads as absent.
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_yaml::Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(serde_yaml::Value::as_str)
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|t| t.with_timezone(&Utc)))
}

impl FrontMatter {
    /// The recorded file key. Unquoted numeric keys are accepted too.
    pub fn file_key(&self) -> Option<String> {
        match self.file_key.as_ref()? {
            serde_yaml::Value::String(s) if !s.is_empty() => Some(s.clone()),
            serde_yaml::Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }
}

/// Returns the raw YAML between the leading `---` fence and the next one.
pub fn extract(content: &str) -> Option<&str> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let rest = content
        .strip_prefix("---\n")
        .or_else(|| content.strip_prefix("---\r\n"))?;

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == "---" {
            return Some(&rest[..offset]);
        }
        offset += line.len();
    }
    None
}

/// Parses the front matter of `content`. Documents without front matter, or
/// with front matter that is not valid YAML, yield `None`.
pub fn parse(content: &str) -> Option<FrontMatter> {
    let yaml = extract(content)?;
    if yaml.trim().is_empty() {
        return Some(FrontMatter::default());
    }
    serde_yaml::from_str(yaml).ok()
}
