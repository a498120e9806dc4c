//! Structural validation of a prompt record.
//!
//! Validation is advisory: callers print the problems and carry on. Every
//! check runs, and problems are reported in a fixed order.

use crate::types::PromptRecord;
use std::fmt;

/// Minimum expected length of the system prompt, in characters.
pub const MIN_SYSTEM_PROMPT_CHARS: usize = 200;

/// Minimum expected number of documented techniques.
pub const MIN_TECHNIQUES: usize = 2;

/// A single validation problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationProblem {
    /// A required text field is absent or empty
    EmptyField(&'static str),

    /// The system prompt is shorter than [`MIN_SYSTEM_PROMPT_CHARS`]
    SystemPromptTooShort { chars: usize },

    /// Fewer than [`MIN_TECHNIQUES`] techniques are listed
    TooFewTechniques { found: usize },
}

impl fmt::Display for ValidationProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyField(field) => write!(f, "Field '{}' is empty", field),
            Self::SystemPromptTooShort { chars } => write!(
                f,
                "system_prompt is too short ({} characters, expected at least {})",
                chars, MIN_SYSTEM_PROMPT_CHARS
            ),
            Self::TooFewTechniques { found } => write!(
                f,
                "Expected at least {} techniques, found {}",
                MIN_TECHNIQUES, found
            ),
        }
    }
}

/// Outcome of [`validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    /// True iff `problems` is empty
    pub is_valid: bool,
    pub problems: Vec<ValidationProblem>,
}

impl ValidationReport {
    fn from_problems(problems: Vec<ValidationProblem>) -> Self {
        Self {
            is_valid: problems.is_empty(),
            problems,
        }
    }

    /// Problems rendered as display lines.
    pub fn messages(&self) -> Vec<String> {
        self.problems.iter().map(ToString::to_string).collect()
    }
}

/// Check a prompt record for missing fields and thin content.
///
/// Pure and total: the same record always yields the same report.
pub fn validate(record: &PromptRecord) -> ValidationReport {
    let mut problems = Vec::new();

    let required = [
        ("system_prompt", &record.system_prompt),
        ("user_prompt", &record.user_prompt),
        ("description", &record.description),
        ("version", &record.version),
    ];
    for (field, value) in required {
        if value.as_deref().map_or(true, str::is_empty) {
            problems.push(ValidationProblem::EmptyField(field));
        }
    }

    let chars = record.system_prompt().chars().count();
    if chars < MIN_SYSTEM_PROMPT_CHARS {
        problems.push(ValidationProblem::SystemPromptTooShort { chars });
    }

    let found = record.techniques.len();
    if found < MIN_TECHNIQUES {
        problems.push(ValidationProblem::TooFewTechniques { found });
    }

    ValidationReport::from_problems(problems)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Technique;

    fn complete_record() -> PromptRecord {
        PromptRecord {
            system_prompt: Some("a".repeat(250)),
            user_prompt: Some("{bug_report}".to_string()),
            description: Some("ok".to_string()),
            version: Some("v2".to_string()),
            tags: vec![],
            techniques: vec![
                Technique::named("Few-shot"),
                Technique::named("Role Prompting"),
            ],
        }
    }

    #[test]
    fn test_empty_system_prompt_without_techniques() {
        let record = PromptRecord {
            system_prompt: Some(String::new()),
            user_prompt: Some("x".to_string()),
            description: Some("d".to_string()),
            version: Some("v2".to_string()),
            tags: vec![],
            techniques: vec![],
        };

        let report = validate(&record);
        assert!(!report.is_valid);
        assert_eq!(
            report.problems,
            vec![
                ValidationProblem::EmptyField("system_prompt"),
                ValidationProblem::SystemPromptTooShort { chars: 0 },
                ValidationProblem::TooFewTechniques { found: 0 },
            ]
        );
    }

    #[test]
    fn test_complete_record_is_valid() {
        let report = validate(&complete_record());
        assert!(report.is_valid);
        assert!(report.problems.is_empty());
    }

    #[test]
    fn test_each_missing_field_is_named() {
        let fields = ["system_prompt", "user_prompt", "description", "version"];
        for field in fields {
            let mut record = complete_record();
            match field {
                "system_prompt" => record.system_prompt = None,
                "user_prompt" => record.user_prompt = None,
                "description" => record.description = None,
                _ => record.version = None,
            }

            let report = validate(&record);
            assert!(!report.is_valid, "{} missing should be invalid", field);
            assert!(
                report.messages().iter().any(|m| m.contains(field)),
                "no problem names {}",
                field
            );
        }
    }

    #[test]
    fn test_system_prompt_length_boundary() {
        let mut record = complete_record();

        record.system_prompt = Some("b".repeat(199));
        assert!(validate(&record)
            .problems
            .contains(&ValidationProblem::SystemPromptTooShort { chars: 199 }));

        record.system_prompt = Some("b".repeat(200));
        assert!(validate(&record).is_valid);
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        let mut record = complete_record();
        // 200 characters, 400 bytes
        record.system_prompt = Some("é".repeat(200));
        assert!(validate(&record).is_valid);

        record.system_prompt = Some("é".repeat(150));
        assert!(!validate(&record).is_valid);
    }

    #[test]
    fn test_technique_count_boundary() {
        let mut record = complete_record();
        record.techniques.truncate(1);
        assert_eq!(
            validate(&record).problems,
            vec![ValidationProblem::TooFewTechniques { found: 1 }]
        );
    }

    #[test]
    fn test_empty_record_collects_every_problem() {
        let report = validate(&PromptRecord::default());
        assert_eq!(report.problems.len(), 6);
    }

    #[test]
    fn test_validate_is_deterministic() {
        let record = PromptRecord {
            description: Some("d".to_string()),
            ..PromptRecord::default()
        };
        assert_eq!(validate(&record), validate(&record));
    }
}
