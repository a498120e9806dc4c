//! Prompt loader for YAML prompt files.

use crate::types::PromptRecord;
use promptpush_core::{AppError, AppResult};
use serde_yaml::{Mapping, Value};
use std::path::{Path, PathBuf};

/// A parsed prompt file: a top-level mapping of prompt id to entry.
///
/// Entries stay as raw YAML until selected, so one malformed entry does not
/// prevent loading its siblings.
#[derive(Debug, Clone)]
pub struct PromptCatalog {
    path: PathBuf,
    entries: Mapping,
}

impl PromptCatalog {
    /// Path the catalog was loaded from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Prompt identifiers in file order.
    pub fn keys(&self) -> Vec<String> {
        self.entries
            .keys()
            .filter_map(|k| k.as_str().map(str::to_string))
            .collect()
    }

    /// Deserialize the entry stored under `key`.
    ///
    /// A missing key and a null entry are both reported as not found.
    pub fn get(&self, key: &str) -> AppResult<PromptRecord> {
        let value = match self.entries.get(key) {
            Some(Value::Null) | None => {
                return Err(AppError::Prompt(format!(
                    "Prompt '{}' not found in {:?}",
                    key, self.path
                )))
            }
            Some(value) => value.clone(),
        };

        serde_yaml::from_value(value).map_err(|e| {
            AppError::Prompt(format!(
                "Prompt '{}' in {:?} is malformed: {}",
                key, self.path, e
            ))
        })
    }
}

/// Load and parse a prompt file.
///
/// # Arguments
/// * `path` - YAML file whose top level maps prompt ids to entries
///
/// # Example
/// ```no_run
/// use promptpush_prompt::load_catalog;
/// use std::path::Path;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let catalog = load_catalog(Path::new("prompts/bug_to_user_story_v2.yml"))?;
/// for key in catalog.keys() {
///     println!("{}", key);
/// }
/// # Ok(())
/// # }
/// ```
pub fn load_catalog(path: &Path) -> AppResult<PromptCatalog> {
    tracing::debug!("Loading prompts from: {:?}", path);

    if !path.exists() {
        return Err(AppError::Prompt(format!("Prompt file not found: {:?}", path)));
    }

    let contents = std::fs::read_to_string(path).map_err(|e| {
        AppError::Prompt(format!("Failed to read prompt file {:?}: {}", path, e))
    })?;

    let document: Value = serde_yaml::from_str(&contents).map_err(|e| {
        AppError::Prompt(format!("Failed to parse prompt YAML {:?}: {}", path, e))
    })?;

    let entries = match document {
        Value::Mapping(entries) if !entries.is_empty() => entries,
        Value::Mapping(_) | Value::Null => {
            return Err(AppError::Prompt(format!(
                "Prompt file {:?} contains no prompts",
                path
            )))
        }
        _ => {
            return Err(AppError::Prompt(format!(
                "Prompt file {:?} must be a mapping of prompt ids to prompts",
                path
            )))
        }
    };

    tracing::debug!("Loaded {} prompt entries from {:?}", entries.len(), path);

    Ok(PromptCatalog {
        path: path.to_path_buf(),
        entries,
    })
}

/// Load a single prompt entry by key.
pub fn load_prompt(path: &Path, key: &str) -> AppResult<PromptRecord> {
    let record = load_catalog(path)?.get(key)?;
    tracing::info!("Loaded prompt '{}' from {:?}", key, path);
    Ok(record)
}

/// List the YAML prompt files directly inside `dir`, sorted by path.
pub fn list_prompt_files(dir: &Path) -> AppResult<Vec<PathBuf>> {
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let mut files = Vec::new();

    for entry in walkdir::WalkDir::new(dir)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        let is_yaml = matches!(
            path.extension().and_then(|s| s.to_str()),
            Some("yml") | Some("yaml")
        );
        if path.is_file() && is_yaml {
            files.push(path.to_path_buf());
        }
    }

    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const TWO_PROMPTS: &str = r#"
bug_to_user_story_v1:
  system_prompt: "Transforme o bug em user story."
  version: v1
bug_to_user_story_v2:
  system_prompt: "Você é um Product Manager experiente."
  user_prompt: "{bug_report}"
  description: Versão otimizada
  version: v2
  tags: [user-story]
  techniques:
    - name: Role Prompting
"#;

    fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_prompt_selects_entry() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_file(temp_dir.path(), "prompts.yml", TWO_PROMPTS);

        let record = load_prompt(&path, "bug_to_user_story_v2").unwrap();
        assert_eq!(record.version.as_deref(), Some("v2"));
        assert_eq!(record.tags, vec!["user-story".to_string()]);
    }

    #[test]
    fn test_catalog_keys_in_file_order() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_file(temp_dir.path(), "prompts.yml", TWO_PROMPTS);

        let catalog = load_catalog(&path).unwrap();
        assert_eq!(
            catalog.keys(),
            vec!["bug_to_user_story_v1", "bug_to_user_story_v2"]
        );
        assert_eq!(catalog.path(), path.as_path());
    }

    #[test]
    fn test_missing_entry_is_prompt_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_file(temp_dir.path(), "prompts.yml", TWO_PROMPTS);

        let err = load_prompt(&path, "bug_to_user_story_v9").unwrap_err();
        assert!(matches!(err, AppError::Prompt(_)));
        assert!(err.to_string().contains("bug_to_user_story_v9"));
    }

    #[test]
    fn test_null_entry_counts_as_missing() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_file(temp_dir.path(), "prompts.yml", "bug_to_user_story_v2: ~\n");

        let err = load_prompt(&path, "bug_to_user_story_v2").unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_malformed_sibling_does_not_block_selection() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_file(
            temp_dir.path(),
            "prompts.yml",
            "broken:\n  tags: 42\nbug_to_user_story_v2:\n  version: v2\n",
        );

        assert!(load_prompt(&path, "bug_to_user_story_v2").is_ok());
        assert!(load_prompt(&path, "broken").is_err());
    }

    #[test]
    fn test_numeric_version_loads_as_text() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_file(
            temp_dir.path(),
            "prompts.yml",
            "k:\n  version: 2\n  system_prompt: ~\n  description: 1.5\n",
        );

        let record = load_prompt(&path, "k").unwrap();
        assert_eq!(record.version.as_deref(), Some("2"));
        assert_eq!(record.description.as_deref(), Some("1.5"));
        assert_eq!(record.system_prompt, None);
    }

    #[test]
    fn test_load_nonexistent_file() {
        let temp_dir = TempDir::new().unwrap();
        let result = load_catalog(&temp_dir.path().join("nope.yml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_invalid_yaml() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_file(temp_dir.path(), "bad.yml", "invalid: yaml: content:");
        assert!(load_catalog(&path).is_err());
    }

    #[test]
    fn test_empty_or_scalar_document_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let empty = write_file(temp_dir.path(), "empty.yml", "");
        let scalar = write_file(temp_dir.path(), "scalar.yml", "just text\n");

        assert!(load_catalog(&empty).is_err());
        assert!(load_catalog(&scalar).is_err());
    }

    #[test]
    fn test_list_prompt_files() {
        let temp_dir = TempDir::new().unwrap();
        write_file(temp_dir.path(), "b.yaml", TWO_PROMPTS);
        write_file(temp_dir.path(), "a.yml", TWO_PROMPTS);
        write_file(temp_dir.path(), "notes.md", "# not a prompt");

        let files = list_prompt_files(temp_dir.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["a.yml", "b.yaml"]);
    }

    #[test]
    fn test_list_prompt_files_missing_dir() {
        let temp_dir = TempDir::new().unwrap();
        let files = list_prompt_files(&temp_dir.path().join("absent")).unwrap();
        assert!(files.is_empty());
    }
}
