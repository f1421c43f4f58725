//! Script validation
//!
//! Checks a script against the seed roster before anything runs.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::history::Direction;
use crate::parser::{Script, SessionEvent, Statement};

/// Errors that can occur during script validation
#[derive(Debug, Clone)]
pub struct ScriptValidationError {
    pub line: Option<usize>,
    pub message: String,
    pub severity: ValidationSeverity,
}

/// Severity level for validation issues
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationSeverity {
    Error,
    Warning,
}

impl std::fmt::Display for ScriptValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let prefix = match self.severity {
            ValidationSeverity::Error => "ERROR",
            ValidationSeverity::Warning => "WARNING",
        };
        if let Some(line) = self.line {
            write!(f, "{} (line {}): {}", prefix, line, self.message)
        } else {
            write!(f, "{}: {}", prefix, self.message)
        }
    }
}

/// Validation options
#[derive(Debug, Clone, Default)]
pub struct ValidationOptions {
    /// Container ids present when the script starts
    pub known_containers: Vec<String>,
    /// Directory `:load` paths are resolved against
    pub base_dir: Option<PathBuf>,
}

/// Validate a script for correctness
pub fn validate_script(script: &Script, options: &ValidationOptions) -> Vec<ScriptValidationError> {
    let mut errors = Vec::new();
    let mut live: HashSet<&str> = options.known_containers.iter().map(String::as_str).collect();
    let mut recalled = false;

    for entry in &script.statements {
        let line = Some(entry.line);
        match &entry.statement {
            Statement::Event(SessionEvent::ContainerToggle(id)) => {
                if !live.contains(id.as_str()) {
                    errors.push(ScriptValidationError {
                        line,
                        message: format!("toggle of unknown container '{}' will be ignored", id),
                        severity: ValidationSeverity::Warning,
                    });
                }
            }
            Statement::Event(SessionEvent::ContainerRemove(id)) => {
                if !live.remove(id.as_str()) {
                    errors.push(ScriptValidationError {
                        line,
                        message: format!("removal of unknown container '{}' will be ignored", id),
                        severity: ValidationSeverity::Warning,
                    });
                }
            }
            Statement::Event(SessionEvent::HistoryKey(Direction::Previous)) => recalled = true,
            Statement::Event(SessionEvent::HistoryKey(Direction::Next)) => {
                if !recalled {
                    errors.push(ScriptValidationError {
                        line,
                        message: ":down before any :up does nothing".to_string(),
                        severity: ValidationSeverity::Warning,
                    });
                }
            }
            Statement::LoadBuffer(path) => {
                let resolved = resolve(options.base_dir.as_deref(), path);
                if !resolved.is_file() {
                    errors.push(ScriptValidationError {
                        line,
                        message: format!("file to load not found: {}", resolved.display()),
                        severity: ValidationSeverity::Error,
                    });
                }
            }
            _ => {}
        }
    }

    errors
}

/// Resolve a `:load` path against the script's directory
pub(crate) fn resolve(base_dir: Option<&Path>, path: &str) -> PathBuf {
    let path = Path::new(path);
    match base_dir {
        Some(dir) if path.is_relative() => dir.join(path),
        _ => path.to_path_buf(),
    }
}

/// Check if a script has any validation errors (not just warnings)
pub fn has_errors(errors: &[ScriptValidationError]) -> bool {
    errors
        .iter()
        .any(|e| e.severity == ValidationSeverity::Error)
}

/// Check if a script has any validation warnings
pub fn has_warnings(errors: &[ScriptValidationError]) -> bool {
    errors
        .iter()
        .any(|e| e.severity == ValidationSeverity::Warning)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_script;

    fn demo_options() -> ValidationOptions {
        ValidationOptions {
            known_containers: vec!["1".into(), "2".into(), "3".into()],
            base_dir: None,
        }
    }

    #[test]
    fn test_validate_clean_script() {
        let script = parse_script("npm test\n:toggle 1\n:up\n:down\n:wait\n").unwrap();
        let errors = validate_script(&script, &demo_options());
        assert!(errors.is_empty());
    }

    #[test]
    fn test_validate_unknown_container() {
        let script = parse_script(":toggle 9\n").unwrap();
        let errors = validate_script(&script, &demo_options());
        assert!(has_warnings(&errors));
        assert!(!has_errors(&errors));
        assert_eq!(errors[0].line, Some(1));
    }

    #[test]
    fn test_validate_toggle_after_remove() {
        let script = parse_script(":rm 3\n:toggle 3\n:rm 3\n").unwrap();
        let errors = validate_script(&script, &demo_options());
        let lines: Vec<Option<usize>> = errors.iter().map(|e| e.line).collect();
        assert_eq!(lines, vec![Some(2), Some(3)]);
    }

    #[test]
    fn test_validate_down_without_up() {
        let script = parse_script("ls\n:down\n").unwrap();
        let errors = validate_script(&script, &demo_options());
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].to_string(), "WARNING (line 2): :down before any :up does nothing");
    }

    #[test]
    fn test_validate_missing_load() {
        let script = parse_script(":load does/not/exist.tsx\n").unwrap();
        let errors = validate_script(&script, &demo_options());
        assert!(has_errors(&errors));
    }

    #[test]
    fn test_validate_load_relative_to_base_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("buffer.tsx"), "export {}").unwrap();

        let script = parse_script(":load buffer.tsx\n").unwrap();
        let options = ValidationOptions {
            base_dir: Some(dir.path().to_path_buf()),
            ..demo_options()
        };
        assert!(validate_script(&script, &options).is_empty());
    }
}
