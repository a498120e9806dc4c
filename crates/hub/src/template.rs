//! Chat prompt templates and their hub manifest.
//!
//! Templates use Python f-string placeholders (`{bug_report}`), with `{{` and
//! `}}` as escaped braces. Placeholders are never filled here; they are only
//! collected as input variables so the hub knows what consumers must supply.

use promptpush_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::BTreeSet;
use std::fmt;

/// Author of a message in a chat template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    Human,
}

impl MessageRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::System => "system",
            Self::Human => "human",
        }
    }

    /// LangChain class wrapping a message template of this role.
    fn manifest_class(&self) -> &'static str {
        match self {
            Self::System => "SystemMessagePromptTemplate",
            Self::Human => "HumanMessagePromptTemplate",
        }
    }
}

impl fmt::Display for MessageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One message of a chat template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageTemplate {
    pub role: MessageRole,
    pub template: String,
    /// Placeholders found in `template`, in order of first appearance
    pub input_variables: Vec<String>,
}

/// An ordered list of message templates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatPromptTemplate {
    messages: Vec<MessageTemplate>,
}

impl ChatPromptTemplate {
    /// Build a template from `(role, text)` pairs.
    ///
    /// Fails if any text has unbalanced or empty placeholders.
    pub fn from_messages<I, S>(messages: I) -> AppResult<Self>
    where
        I: IntoIterator<Item = (MessageRole, S)>,
        S: Into<String>,
    {
        let messages = messages
            .into_iter()
            .map(|(role, template)| {
                let template = template.into();
                let input_variables = parse_variables(&template).map_err(|e| {
                    AppError::Prompt(format!("Invalid {} message template: {}", role, e))
                })?;
                Ok(MessageTemplate {
                    role,
                    template,
                    input_variables,
                })
            })
            .collect::<AppResult<Vec<_>>>()?;

        Ok(Self { messages })
    }

    pub fn messages(&self) -> &[MessageTemplate] {
        &self.messages
    }

    /// All placeholders across messages, sorted and deduplicated.
    pub fn input_variables(&self) -> Vec<String> {
        self.messages
            .iter()
            .flat_map(|m| m.input_variables.iter().cloned())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// LangChain constructor serialization of this template, as stored by the hub.
    pub fn to_manifest(&self) -> Value {
        let messages: Vec<Value> = self
            .messages
            .iter()
            .map(|message| {
                let mut variables = message.input_variables.clone();
                variables.sort();
                variables.dedup();

                json!({
                    "lc": 1,
                    "type": "constructor",
                    "id": ["langchain", "prompts", "chat", message.role.manifest_class()],
                    "kwargs": {
                        "prompt": {
                            "lc": 1,
                            "type": "constructor",
                            "id": ["langchain", "prompts", "prompt", "PromptTemplate"],
                            "kwargs": {
                                "input_variables": variables,
                                "template": message.template,
                                "template_format": "f-string"
                            }
                        }
                    }
                })
            })
            .collect();

        json!({
            "lc": 1,
            "type": "constructor",
            "id": ["langchain", "prompts", "chat", "ChatPromptTemplate"],
            "kwargs": {
                "input_variables": self.input_variables(),
                "messages": messages
            }
        })
    }
}

/// Collect the f-string placeholders in `template`, in order of first appearance.
///
/// `{name}`, `{name:spec}` and `{name!r}` all yield `name`.
pub fn parse_variables(template: &str) -> Result<Vec<String>, String> {
    let mut variables: Vec<String> = Vec::new();
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '{' if chars.peek() == Some(&'{') => {
                chars.next();
            }
            '{' => {
                let mut field = String::new();
                let mut closed = false;
                for c in chars.by_ref() {
                    if c == '}' {
                        closed = true;
                        break;
                    }
                    field.push(c);
                }
                if !closed {
                    return Err("unclosed '{' in template".to_string());
                }

                let name = field
                    .split([':', '!'])
                    .next()
                    .unwrap_or_default()
                    .trim();
                if name.is_empty() {
                    return Err("empty placeholder '{}' in template".to_string());
                }
                if !variables.iter().any(|v| v == name) {
                    variables.push(name.to_string());
                }
            }
            '}' if chars.peek() == Some(&'}') => {
                chars.next();
            }
            '}' => return Err("single '}' encountered in template".to_string()),
            _ => {}
        }
    }

    Ok(variables)
}
