//! Script runner for replaying session scripts

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::engine::{execute_event, EventOutcome, Session};
use crate::error::{DevdeckError, Result};
use crate::output::{format_output, OutputFormat, Snapshot, View};
use crate::parser::{parse_script, Script, ScriptLine, Statement};
use crate::script::validator::resolve;
use crate::session::SessionState;

/// Result of script execution
#[derive(Debug)]
pub struct ScriptResult {
    /// Total statements executed
    pub statements_executed: usize,
    /// Delayed completions applied while the script ran
    pub resolutions_applied: usize,
    /// The session as the script left it
    pub state: SessionState,
}

/// Replays a script against a session, writing output as it appears.
///
/// Human output streams each transcript line as it is appended. JSON output
/// writes one snapshot once the script has settled.
pub struct ScriptRunner<W: Write> {
    session: Session,
    out: W,
    format: OutputFormat,
    base_dir: Option<PathBuf>,
}

impl<W: Write> ScriptRunner<W> {
    pub fn new(session: Session, out: W) -> Self {
        Self {
            session,
            out,
            format: OutputFormat::Human,
            base_dir: None,
        }
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Directory `:load` paths are resolved against
    pub fn with_base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(dir.into());
        self
    }

    /// Load and run a script file
    pub fn run_file(&mut self, path: &Path) -> Result<ScriptResult> {
        if !path.exists() {
            return Err(DevdeckError::PathNotFound(path.display().to_string()));
        }
        let content = fs::read_to_string(path)?;
        let script = parse_script(&content)?;

        if self.base_dir.is_none() {
            self.base_dir = path.parent().map(Path::to_path_buf);
        }

        info!(path = %path.display(), statements = script.statements.len(), "running script");
        self.run_script(&script)
    }

    /// Run a parsed script, then wait for everything it left pending
    pub fn run_script(&mut self, script: &Script) -> Result<ScriptResult> {
        let mut statements_executed = 0;
        let mut resolutions_applied = 0;

        for entry in &script.statements {
            resolutions_applied += self.run_statement(entry)?;
            statements_executed += 1;
        }

        let seen = self.session.state().transcript().len();
        resolutions_applied += self.session.settle();
        self.emit_since(seen)?;

        if self.format == OutputFormat::Json {
            let snapshot = Snapshot::capture(self.session.state());
            writeln!(self.out, "{}", format_output(&View::Snapshot(&snapshot), self.format))?;
        }

        Ok(ScriptResult {
            statements_executed,
            resolutions_applied,
            state: self.session.state().clone(),
        })
    }

    fn run_statement(&mut self, entry: &ScriptLine) -> Result<usize> {
        debug!(line = entry.line, statement = %entry.statement.describe(), "script statement");
        let seen = self.session.state().transcript().len();

        let applied = match &entry.statement {
            Statement::Event(event) => {
                let outcome = execute_event(event, &mut self.session)
                    .map_err(|e| at_line(entry.line, e))?;
                if let EventOutcome::Recalled(text) = outcome {
                    debug!(line = entry.line, recalled = %text, "history recall");
                }
                0
            }
            Statement::LoadBuffer(path) => {
                let resolved = resolve(self.base_dir.as_deref(), path);
                let text = fs::read_to_string(&resolved).map_err(|e| {
                    at_line(
                        entry.line,
                        DevdeckError::ExecutionError(format!("{}: {}", resolved.display(), e)),
                    )
                })?;
                if !self.session.set_code_buffer(text) {
                    return Err(at_line(entry.line, DevdeckError::SessionClosed));
                }
                0
            }
            Statement::Sleep(duration) => self.session.advance(*duration),
            Statement::Wait => self.session.settle(),
            Statement::Status => {
                self.emit_since(seen)?;
                if self.format == OutputFormat::Human {
                    writeln!(
                        self.out,
                        "{}",
                        format_output(&View::Status(self.session.status()), self.format)
                    )?;
                }
                return Ok(0);
            }
        };

        self.emit_since(seen)?;
        Ok(applied)
    }

    fn emit_since(&mut self, index: usize) -> Result<()> {
        if self.format != OutputFormat::Human {
            return Ok(());
        }
        for line in self.session.state().transcript().since(index) {
            writeln!(self.out, "{}", line.text)?;
        }
        Ok(())
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Hand back the session, e.g. to shut it down
    pub fn into_session(self) -> Session {
        self.session
    }
}

fn at_line(line: usize, err: DevdeckError) -> DevdeckError {
    DevdeckError::ExecutionError(format!("line {}: {}", line, err))
}

/// Explain a script without executing
pub fn explain_script(script: &Script) -> Vec<String> {
    script
        .statements
        .iter()
        .enumerate()
        .map(|(i, entry)| format!("{}. (line {}) {}", i + 1, entry.line, entry.statement.describe()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SessionConfig;
    use crate::engine::ManualClock;
    use crate::session::SeedProfile;
    use crate::suite::TestStatus;

    fn runner(seed: SeedProfile) -> ScriptRunner<Vec<u8>> {
        let config = SessionConfig {
            seed,
            ..SessionConfig::default()
        };
        let session = Session::new(config, ManualClock::shared()).unwrap();
        ScriptRunner::new(session, Vec::new())
    }

    fn output(runner: ScriptRunner<Vec<u8>>) -> String {
        String::from_utf8(runner.out).unwrap()
    }

    #[test]
    fn test_run_script_streams_lines() {
        let mut runner = runner(SeedProfile::Empty);
        let script = parse_script("echo hi\n:sleep 1000\ndocker ps\n").unwrap();
        let result = runner.run_script(&script).unwrap();

        assert_eq!(result.statements_executed, 3);
        assert_eq!(result.resolutions_applied, 2);
        assert_eq!(
            output(runner),
            "$ echo hi\nExecuting...\n✓ Command executed successfully\n$\n\
             $ docker ps\nExecuting...\nDocker command executed\n✓ Containers updated\n$\n"
        );
    }

    #[test]
    fn test_run_script_status_line() {
        let mut runner = runner(SeedProfile::Demo);
        let script = parse_script(":toggle 3\n:tests\n:wait\n:status\n").unwrap();
        let result = runner.run_script(&script).unwrap();

        assert_eq!(result.state.tests().count_with(TestStatus::Passed), 4);
        assert_eq!(output(runner), "3/3 containers | 4 passed\n");
    }

    #[test]
    fn test_run_script_settles_at_end() {
        let mut runner = runner(SeedProfile::Empty);
        let script = parse_script("make\n").unwrap();
        let result = runner.run_script(&script).unwrap();
        assert_eq!(result.resolutions_applied, 1);
        assert_eq!(runner.session().pending(), 0);
        assert_eq!(result.state.transcript().len(), 4);
    }

    #[test]
    fn test_run_script_json_snapshot() {
        let mut runner = runner(SeedProfile::Empty).with_format(OutputFormat::Json);
        let script = parse_script("ls\n:status\n").unwrap();
        runner.run_script(&script).unwrap();

        let value: serde_json::Value = serde_json::from_str(&output(runner)).unwrap();
        assert_eq!(value["history"][0], "ls");
        assert_eq!(value["transcript"].as_array().unwrap().len(), 4);
    }

    #[test]
    fn test_run_file_loads_relative_buffer() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("app.tsx"), "line one\nline two\n").unwrap();
        let script_path = dir.path().join("session.deck");
        std::fs::write(&script_path, ":load app.tsx\n").unwrap();

        let mut runner = runner(SeedProfile::Empty);
        let result = runner.run_file(&script_path).unwrap();
        assert_eq!(result.state.code(), "line one\nline two\n");
    }

    #[test]
    fn test_run_file_missing() {
        let mut runner = runner(SeedProfile::Empty);
        let result = runner.run_file(Path::new("/no/such/script.deck"));
        assert!(matches!(result, Err(DevdeckError::PathNotFound(_))));
    }

    #[test]
    fn test_run_script_after_shutdown_fails_with_line() {
        let mut runner = runner(SeedProfile::Empty);
        runner.session.shutdown();
        let script = parse_script("\nls\n").unwrap();
        let err = runner.run_script(&script).unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn test_explain_script() {
        let script = parse_script("npm test\n\n:toggle 2\n").unwrap();
        let explanations = explain_script(&script);
        assert_eq!(
            explanations,
            vec!["1. (line 1) run `npm test`".to_string(), "2. (line 3) toggle container 2".to_string()]
        );
    }
}
