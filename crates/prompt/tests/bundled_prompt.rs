use std::path::PathBuf;

use promptpush_prompt::{lint, load_catalog, load_prompt, validate, LintCheck, PromptRecord};

const PROMPT_KEY: &str = "bug_to_user_story_v2";

fn bundled_prompt_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../prompts")
        .join("bug_to_user_story_v2.yml")
}

fn bundled_prompt() -> PromptRecord {
    load_prompt(&bundled_prompt_path(), PROMPT_KEY).expect("bundled prompt should load")
}

fn assert_check_passes(check: LintCheck) {
    let report = lint(&bundled_prompt());
    let finding = report.finding(check).expect("every check is reported");
    assert!(finding.passed, "{}: {}", check, finding.detail);
}

#[test]
fn bundled_file_contains_the_published_entry() {
    let catalog = load_catalog(&bundled_prompt_path()).unwrap();
    assert!(catalog.keys().contains(&PROMPT_KEY.to_string()));
}

#[test]
fn bundled_prompt_is_structurally_valid() {
    let report = validate(&bundled_prompt());
    assert!(report.is_valid, "{:?}", report.messages());
}

#[test]
fn bundled_prompt_has_system_prompt() {
    assert_check_passes(LintCheck::SystemPrompt);
}

#[test]
fn bundled_prompt_defines_a_role() {
    assert_check_passes(LintCheck::RoleDefinition);
}

#[test]
fn bundled_prompt_mentions_output_format() {
    assert_check_passes(LintCheck::OutputFormat);
}

#[test]
fn bundled_prompt_has_few_shot_examples() {
    assert_check_passes(LintCheck::FewShotExamples);
}

#[test]
fn bundled_prompt_has_no_todo_markers() {
    assert_check_passes(LintCheck::NoTodoMarkers);
}

#[test]
fn bundled_prompt_lists_minimum_techniques() {
    assert_check_passes(LintCheck::MinimumTechniques);
}

#[test]
fn bundled_user_prompt_carries_bug_report_placeholder() {
    assert!(bundled_prompt().user_prompt().contains("{bug_report}"));
}
