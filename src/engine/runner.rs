//! Simulated task runner
//!
//! Work is two-phase: the immediate lines are appended when work is
//! submitted, and a [`Resolution`] is scheduled to land after the configured
//! delay. Nothing ever fails.

use serde::{Deserialize, Serialize};

use crate::session::SessionState;
use crate::suite::TestRecord;

pub const EXECUTING_LINE: &str = "Executing...";
pub const PROMPT_LINE: &str = "$";

/// How a shell command is simulated, decided by substring.
///
/// Matching is case-sensitive and checks `test` before `docker`, so
/// `docker test` and even `attest` count as test runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommandClass {
    TestSuite,
    Docker,
    Generic,
}

impl CommandClass {
    pub fn classify(text: &str) -> Self {
        if text.contains("test") {
            CommandClass::TestSuite
        } else if text.contains("docker") {
            CommandClass::Docker
        } else {
            CommandClass::Generic
        }
    }

    /// Lines appended when the command resolves, ending with a fresh prompt
    pub fn resolution_lines(self) -> &'static [&'static str] {
        match self {
            CommandClass::TestSuite => &["Running test suite...", "✓ All tests passed", PROMPT_LINE],
            CommandClass::Docker => &["Docker command executed", "✓ Containers updated", PROMPT_LINE],
            CommandClass::Generic => &["✓ Command executed successfully", PROMPT_LINE],
        }
    }
}

/// Lines appended immediately on submission
pub fn echo_lines(text: &str) -> [String; 2] {
    [format!("{} {}", PROMPT_LINE, text), EXECUTING_LINE.to_string()]
}

/// The roster every test run resolves to
pub fn canonical_test_outcome() -> Vec<TestRecord> {
    vec![
        TestRecord::passed("Skip API Integration", 145),
        TestRecord::passed("Skip List Component", 298),
        TestRecord::passed("Price Calculation", 234),
        TestRecord::passed("Search Functionality", 112),
    ]
}

/// A delayed completion waiting in the scheduler
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Command { text: String, class: CommandClass },
    TestRun { roster: Vec<TestRecord> },
}

impl Resolution {
    pub fn for_command(text: &str) -> Self {
        Resolution::Command {
            text: text.to_string(),
            class: CommandClass::classify(text),
        }
    }

    pub fn for_test_run() -> Self {
        Resolution::TestRun {
            roster: canonical_test_outcome(),
        }
    }

    /// Apply the completion as a single store mutation
    pub fn apply(self, state: &mut SessionState) {
        match self {
            Resolution::Command { class, .. } => {
                state.append_transcript(class.resolution_lines().iter().copied());
            }
            Resolution::TestRun { roster } => {
                state.replace_test_roster(roster);
            }
        }
    }

    pub fn describe(&self) -> String {
        match self {
            Resolution::Command { text, class } => format!("{:?} command '{}'", class, text),
            Resolution::TestRun { roster } => format!("test run ({} tests)", roster.len()),
        }
    }
}
