//! Hub selection types.

/// Supported hub implementations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HubKind {
    LangSmith,
}

impl HubKind {
    /// Parse hub kind from a config string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "langsmith" | "langchain" => Some(Self::LangSmith),
            _ => None,
        }
    }

    /// Get the canonical hub name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LangSmith => "langsmith",
        }
    }
}
