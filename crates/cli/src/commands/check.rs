//! Check command handler.
//!
//! Runs structural validation and the content lint without touching the hub.

use clap::Args;
use promptpush_core::{config::AppConfig, AppError, AppResult};
use promptpush_prompt::{lint, list_prompt_files, load_catalog, validate, PromptCatalog};
use std::process::ExitCode;

/// Check prompts against structural and content rules
#[derive(Args, Debug, Default)]
pub struct CheckCommand {
    /// Check every entry of every YAML file in the prompts directory
    #[arg(long)]
    pub all: bool,
}

impl CheckCommand {
    /// Execute the check command.
    pub fn execute(&self, config: &AppConfig) -> AppResult<ExitCode> {
        tracing::info!("Executing check command");
        tracing::debug!("Check options: {:?}", self);

        if self.run(config)? {
            println!("\nAll checks passed.");
            Ok(ExitCode::SUCCESS)
        } else {
            println!("\nSome checks failed.");
            Ok(ExitCode::FAILURE)
        }
    }

    /// Run the checks; true iff every lint passed.
    fn run(&self, config: &AppConfig) -> AppResult<bool> {
        if self.all {
            return self.check_directory(config);
        }

        let catalog = load_catalog(&config.prompt_path())?;
        Ok(check_entries(&catalog, &[config.prompt.key.clone()]))
    }

    fn check_directory(&self, config: &AppConfig) -> AppResult<bool> {
        let dir = config.prompts_dir();
        let files = list_prompt_files(&dir)?;
        if files.is_empty() {
            return Err(AppError::Prompt(format!(
                "No prompt files found in {:?}",
                dir
            )));
        }

        let mut passed = true;
        for file in files {
            match load_catalog(&file) {
                Ok(catalog) => {
                    let keys = catalog.keys();
                    passed &= check_entries(&catalog, &keys);
                }
                Err(e) => {
                    println!("\n{}", file.display());
                    println!("  [FAIL] {}", e);
                    passed = false;
                }
            }
        }

        Ok(passed)
    }
}

/// Check `keys` of `catalog`, printing a report for each. True iff all lints pass.
///
/// Validation problems are printed as advisories and do not affect the result.
fn check_entries(catalog: &PromptCatalog, keys: &[String]) -> bool {
    let mut passed = true;

    for key in keys {
        println!("\n{} ({})", key, catalog.path().display());

        let record = match catalog.get(key) {
            Ok(record) => record,
            Err(e) => {
                println!("  [FAIL] {}", e);
                passed = false;
                continue;
            }
        };

        for problem in validate(&record).messages() {
            println!("  [WARN] {}", problem);
        }

        let report = lint(&record);
        for finding in &report.findings {
            let status = if finding.passed { "PASS" } else { "FAIL" };
            println!("  [{}] {}: {}", status, finding.check, finding.detail);
        }

        passed &= report.passed();
    }

    passed
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const GOOD: &str = r#"
good_v1:
  system_prompt: "Você é um Product Manager. Formato: Como um usuário, eu quero algo, para que eu ganhe valor. Exemplo 1: Quando A, então B. Exemplo 2: Quando C, então D."
  user_prompt: "{bug_report}"
  description: ok
  version: v1
  techniques:
    - name: Few-shot Learning
    - name: Role Prompting
"#;

    const BAD: &str = r#"
bad_v1:
  system_prompt: "[TODO] escrever"
  version: v1
"#;

    fn config_for(dir: &std::path::Path, file: &str, key: &str) -> AppConfig {
        let mut config = AppConfig {
            workspace: dir.to_path_buf(),
            ..AppConfig::default()
        };
        config.prompt.file = dir.join("prompts").join(file);
        config.prompt.key = key.to_string();
        config
    }

    fn write_prompts(dir: &std::path::Path, files: &[(&str, &str)]) {
        let prompts = dir.join("prompts");
        fs::create_dir_all(&prompts).unwrap();
        for (name, content) in files {
            fs::write(prompts.join(name), content).unwrap();
        }
    }

    #[test]
    fn test_check_entries_pass_and_fail() {
        let temp_dir = TempDir::new().unwrap();
        let mixed = format!("{}{}", GOOD, BAD);
        write_prompts(temp_dir.path(), &[("mixed.yml", mixed.as_str())]);
        let catalog = load_catalog(&temp_dir.path().join("prompts/mixed.yml")).unwrap();

        assert!(check_entries(&catalog, &["good_v1".to_string()]));
        assert!(!check_entries(&catalog, &["bad_v1".to_string()]));
        assert!(!check_entries(&catalog, &["absent".to_string()]));
    }

    #[test]
    fn test_run_single_entry() {
        let temp_dir = TempDir::new().unwrap();
        write_prompts(temp_dir.path(), &[("good.yml", GOOD), ("bad.yml", BAD)]);

        let command = CheckCommand::default();
        let good = config_for(temp_dir.path(), "good.yml", "good_v1");
        assert!(command.run(&good).unwrap());

        let bad = config_for(temp_dir.path(), "bad.yml", "bad_v1");
        assert!(!command.run(&bad).unwrap());

        let missing_file = config_for(temp_dir.path(), "absent.yml", "good_v1");
        assert!(command.run(&missing_file).is_err());
    }

    #[test]
    fn test_check_directory_reports_any_failure() {
        let temp_dir = TempDir::new().unwrap();
        write_prompts(temp_dir.path(), &[("good.yml", GOOD), ("bad.yaml", BAD)]);
        let config = config_for(temp_dir.path(), "good.yml", "good_v1");

        let command = CheckCommand { all: true };
        assert!(!command.check_directory(&config).unwrap());
    }

    #[test]
    fn test_check_directory_without_files_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let config = config_for(temp_dir.path(), "none.yml", "x");

        let command = CheckCommand { all: true };
        assert!(command.check_directory(&config).is_err());
    }
}
