//! Prompt record types.
//!
//! A prompt file is a YAML mapping from prompt identifier to [`PromptRecord`].
//! Every field is optional on disk; absent text fields stay `None` so the
//! validator can tell "missing" from "empty".

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_yaml::Value;
use std::collections::BTreeMap;

/// One prompt entry loaded from YAML.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PromptRecord {
    /// System message sent before the user turn
    #[serde(
        default,
        deserialize_with = "scalar_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub system_prompt: Option<String>,

    /// User message template, usually holding a `{bug_report}` placeholder
    #[serde(
        default,
        deserialize_with = "scalar_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub user_prompt: Option<String>,

    #[serde(
        default,
        deserialize_with = "scalar_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,

    /// Version suffix of the published identifier (e.g. "v2")
    #[serde(
        default,
        deserialize_with = "scalar_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub version: Option<String>,

    #[serde(default)]
    pub tags: Vec<String>,

    /// Prompt-engineering techniques applied in this prompt
    #[serde(default)]
    pub techniques: Vec<Technique>,
}

/// A named prompt-engineering technique recorded as metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Technique {
    #[serde(default)]
    pub name: String,

    #[serde(
        default,
        deserialize_with = "scalar_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,

    /// Any other keys (e.g. `application`, `reference`)
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

impl Technique {
    /// Create a technique with just a name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// Accept any YAML scalar as text, so `version: 2` reads as "2".
fn scalar_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(_) => Err(D::Error::custom("expected text, found a sequence or mapping")),
    }
}

impl PromptRecord {
    /// System prompt, or "" when absent.
    pub fn system_prompt(&self) -> &str {
        self.system_prompt.as_deref().unwrap_or_default()
    }

    /// User prompt, or "" when absent.
    pub fn user_prompt(&self) -> &str {
        self.user_prompt.as_deref().unwrap_or_default()
    }

    /// Comma-separated tag list for display.
    pub fn tag_list(&self) -> String {
        self.tags.join(", ")
    }
}
