//! Content heuristics for bug-to-user-story prompts.
//!
//! These go beyond [`crate::validator`]: they look inside the prompt text for
//! a role definition, output-format instructions, few-shot examples and
//! leftover `[TODO]` markers. The indicator phrases are Portuguese because the
//! prompts they check are written in Portuguese.

use crate::types::PromptRecord;
use crate::validator::MIN_TECHNIQUES;
use std::fmt;

/// Minimum system prompt length for the lint, in characters (exclusive).
pub const MIN_LINT_SYSTEM_PROMPT_CHARS: usize = 100;

/// Minimum number of `Quando` occurrences expected across few-shot examples.
pub const MIN_EXAMPLE_MARKERS: usize = 2;

const ROLE_INDICATORS: &[&str] = &[
    "você é um",
    "você é uma",
    "você é especializado",
    "você é experiente",
    "você tem",
    "persona:",
];

const FORMAT_INDICATORS: &[&str] = &[
    "formato:",
    "formato esperado",
    "como um",
    "eu quero",
    "para que",
    "critérios de aceitação",
    "user story",
    "quando",
    "então",
];

const EXAMPLE_INDICATORS: &[&str] = &[
    "exemplo",
    "Exemplo",
    "EXEMPLO",
    "bug reportado",
    "user story gerada",
];

const EXAMPLE_MARKER: &str = "Quando";
const TODO_MARKER: &str = "[todo]";

/// The individual lint checks, in reporting order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LintCheck {
    SystemPrompt,
    RoleDefinition,
    OutputFormat,
    FewShotExamples,
    NoTodoMarkers,
    MinimumTechniques,
}

impl LintCheck {
    pub const ALL: [LintCheck; 6] = [
        LintCheck::SystemPrompt,
        LintCheck::RoleDefinition,
        LintCheck::OutputFormat,
        LintCheck::FewShotExamples,
        LintCheck::NoTodoMarkers,
        LintCheck::MinimumTechniques,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SystemPrompt => "system prompt",
            Self::RoleDefinition => "role definition",
            Self::OutputFormat => "output format",
            Self::FewShotExamples => "few-shot examples",
            Self::NoTodoMarkers => "no TODO markers",
            Self::MinimumTechniques => "minimum techniques",
        }
    }
}

impl fmt::Display for LintCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of one lint check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LintFinding {
    pub check: LintCheck,
    pub passed: bool,
    /// What was found, or what to fix
    pub detail: String,
}

impl LintFinding {
    fn pass(check: LintCheck, detail: impl Into<String>) -> Self {
        Self {
            check,
            passed: true,
            detail: detail.into(),
        }
    }

    fn fail(check: LintCheck, detail: impl Into<String>) -> Self {
        Self {
            check,
            passed: false,
            detail: detail.into(),
        }
    }
}

/// All lint findings for one prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LintReport {
    pub findings: Vec<LintFinding>,
}

impl LintReport {
    /// True iff every check passed.
    pub fn passed(&self) -> bool {
        self.findings.iter().all(|f| f.passed)
    }

    /// The finding for `check`.
    pub fn finding(&self, check: LintCheck) -> Option<&LintFinding> {
        self.findings.iter().find(|f| f.check == check)
    }

    pub fn failures(&self) -> impl Iterator<Item = &LintFinding> {
        self.findings.iter().filter(|f| !f.passed)
    }
}

/// Run every lint check against `record`.
pub fn lint(record: &PromptRecord) -> LintReport {
    let findings = LintCheck::ALL
        .iter()
        .map(|check| run_check(*check, record))
        .collect();

    LintReport { findings }
}

fn run_check(check: LintCheck, record: &PromptRecord) -> LintFinding {
    match check {
        LintCheck::SystemPrompt => check_system_prompt(record),
        LintCheck::RoleDefinition => check_role(record),
        LintCheck::OutputFormat => check_format(record),
        LintCheck::FewShotExamples => check_examples(record),
        LintCheck::NoTodoMarkers => check_todos(record),
        LintCheck::MinimumTechniques => check_techniques(record),
    }
}

fn check_system_prompt(record: &PromptRecord) -> LintFinding {
    let check = LintCheck::SystemPrompt;
    let Some(system_prompt) = record.system_prompt.as_deref() else {
        return LintFinding::fail(check, "system_prompt is missing");
    };

    if system_prompt.trim().is_empty() {
        return LintFinding::fail(check, "system_prompt is blank");
    }

    let chars = system_prompt.chars().count();
    if chars <= MIN_LINT_SYSTEM_PROMPT_CHARS {
        return LintFinding::fail(
            check,
            format!(
                "system_prompt is too short ({} characters, expected more than {})",
                chars, MIN_LINT_SYSTEM_PROMPT_CHARS
            ),
        );
    }

    LintFinding::pass(check, format!("{} characters", chars))
}

fn check_role(record: &PromptRecord) -> LintFinding {
    let lowered = record.system_prompt().to_lowercase();
    match first_match(&lowered, ROLE_INDICATORS) {
        Some(indicator) => {
            LintFinding::pass(LintCheck::RoleDefinition, format!("found '{}'", indicator))
        }
        None => LintFinding::fail(
            LintCheck::RoleDefinition,
            "no persona defined; include 'Você é um [role]' in the system prompt",
        ),
    }
}

fn check_format(record: &PromptRecord) -> LintFinding {
    let lowered = record.system_prompt().to_lowercase();
    match first_match(&lowered, FORMAT_INDICATORS) {
        Some(indicator) => {
            LintFinding::pass(LintCheck::OutputFormat, format!("found '{}'", indicator))
        }
        None => LintFinding::fail(
            LintCheck::OutputFormat,
            "no output format instructions (Como um/Eu quero/Para que or Dado/Quando/Então)",
        ),
    }
}

fn check_examples(record: &PromptRecord) -> LintFinding {
    let check = LintCheck::FewShotExamples;
    let system_prompt = record.system_prompt();

    if first_match(system_prompt, EXAMPLE_INDICATORS).is_none() {
        return LintFinding::fail(check, "no few-shot examples found");
    }

    let markers = system_prompt.matches(EXAMPLE_MARKER).count();
    if markers < MIN_EXAMPLE_MARKERS {
        return LintFinding::fail(
            check,
            format!(
                "too few examples: {} occurrences of '{}' (expected at least {})",
                markers, EXAMPLE_MARKER, MIN_EXAMPLE_MARKERS
            ),
        );
    }

    LintFinding::pass(check, format!("{} occurrences of '{}'", markers, EXAMPLE_MARKER))
}

fn check_todos(record: &PromptRecord) -> LintFinding {
    let check = LintCheck::NoTodoMarkers;
    let in_system = has_todo(record.system_prompt());
    let in_user = has_todo(record.user_prompt());

    match (in_system, in_user) {
        (false, false) => LintFinding::pass(check, "no [TODO] markers"),
        (true, false) => LintFinding::fail(check, "system_prompt contains [TODO]"),
        (false, true) => LintFinding::fail(check, "user_prompt contains [TODO]"),
        (true, true) => LintFinding::fail(check, "system_prompt and user_prompt contain [TODO]"),
    }
}

fn check_techniques(record: &PromptRecord) -> LintFinding {
    let check = LintCheck::MinimumTechniques;
    let found = record.techniques.len();

    if found < MIN_TECHNIQUES {
        return LintFinding::fail(
            check,
            format!(
                "found {} techniques (expected at least {}), e.g. Few-shot Learning, Role Prompting, Chain of Thought",
                found, MIN_TECHNIQUES
            ),
        );
    }

    let unnamed = record
        .techniques
        .iter()
        .filter(|t| t.name.is_empty())
        .count();
    if unnamed > 0 {
        return LintFinding::fail(check, format!("{} techniques have no name", unnamed));
    }

    LintFinding::pass(check, format!("{} techniques", found))
}

fn first_match<'a>(haystack: &str, needles: &[&'a str]) -> Option<&'a str> {
    needles.iter().copied().find(|needle| haystack.contains(needle))
}

fn has_todo(text: &str) -> bool {
    text.to_lowercase().contains(TODO_MARKER)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Technique;

    const GOOD_SYSTEM_PROMPT: &str = "Você é um Product Manager experiente. \
        Formato: Como um [usuário], eu quero [ação], para que [benefício]. \
        Exemplo 1: Quando o usuário clica em salvar, então os dados persistem. \
        Exemplo 2: Quando o carrinho está vazio, então o botão fica desabilitado.";

    fn good_record() -> PromptRecord {
        PromptRecord {
            system_prompt: Some(GOOD_SYSTEM_PROMPT.to_string()),
            user_prompt: Some("{bug_report}".to_string()),
            description: Some("d".to_string()),
            version: Some("v2".to_string()),
            tags: vec![],
            techniques: vec![
                Technique::named("Few-shot Learning"),
                Technique::named("Role Prompting"),
            ],
        }
    }

    fn failed(record: &PromptRecord, check: LintCheck) -> bool {
        !lint(record).finding(check).unwrap().passed
    }

    #[test]
    fn test_good_record_passes_every_check() {
        let report = lint(&good_record());
        assert_eq!(report.findings.len(), LintCheck::ALL.len());
        assert!(report.passed(), "{:?}", report.failures().collect::<Vec<_>>());
    }

    #[test]
    fn test_short_or_blank_system_prompt() {
        let mut record = good_record();
        record.system_prompt = Some("   ".to_string());
        assert!(failed(&record, LintCheck::SystemPrompt));

        record.system_prompt = Some("x".repeat(100));
        assert!(failed(&record, LintCheck::SystemPrompt));

        record.system_prompt = None;
        assert!(failed(&record, LintCheck::SystemPrompt));
    }

    #[test]
    fn test_role_definition_is_case_insensitive() {
        let mut record = good_record();
        record.system_prompt = Some("VOCÊ É UMA analista".to_string());
        assert!(!failed(&record, LintCheck::RoleDefinition));

        record.system_prompt = Some("Analise o bug.".to_string());
        assert!(failed(&record, LintCheck::RoleDefinition));
    }

    #[test]
    fn test_output_format_indicators() {
        let mut record = good_record();
        record.system_prompt = Some("Inclua Critérios de Aceitação".to_string());
        assert!(!failed(&record, LintCheck::OutputFormat));

        record.system_prompt = Some("Responda livremente.".to_string());
        assert!(failed(&record, LintCheck::OutputFormat));
    }

    #[test]
    fn test_few_shot_needs_two_quando_markers() {
        let mut record = good_record();
        record.system_prompt = Some("Exemplo: Quando algo acontece.".to_string());
        assert!(failed(&record, LintCheck::FewShotExamples));

        // Lowercase "quando" does not count as an example marker
        record.system_prompt = Some("Exemplo: quando isto, quando aquilo.".to_string());
        assert!(failed(&record, LintCheck::FewShotExamples));

        record.system_prompt = Some("Sem casos. Quando A. Quando B.".to_string());
        assert!(failed(&record, LintCheck::FewShotExamples));
    }

    #[test]
    fn test_todo_markers_in_either_prompt() {
        let mut record = good_record();
        record.user_prompt = Some("{bug_report} [Todo]".to_string());
        let report = lint(&record);
        let finding = report.finding(LintCheck::NoTodoMarkers).unwrap();
        assert!(!finding.passed);
        assert!(finding.detail.contains("user_prompt"));

        let mut record = good_record();
        record.system_prompt = Some(format!("{} [TODO] revisar", GOOD_SYSTEM_PROMPT));
        assert!(failed(&record, LintCheck::NoTodoMarkers));
    }

    #[test]
    fn test_techniques_need_names() {
        let mut record = good_record();
        record.techniques[1].name.clear();
        assert!(failed(&record, LintCheck::MinimumTechniques));

        record.techniques.truncate(1);
        assert!(failed(&record, LintCheck::MinimumTechniques));
    }

    #[test]
    fn test_failures_only_lists_failed_checks() {
        let mut record = good_record();
        record.techniques.clear();
        let report = lint(&record);
        let failures: Vec<_> = report.failures().map(|f| f.check).collect();
        assert_eq!(failures, vec![LintCheck::MinimumTechniques]);
        assert!(!report.passed());
    }
}
