//! The session store
//!
//! `SessionState` is the single owner of everything a session shows. Fields
//! are private: every change goes through one of the entry points below, each
//! a complete read-modify-write, so unique container ids and whole-roster test
//! replacement hold by construction.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::transcript::Transcript;
use crate::container::{ContainerRecord, ContainerRoster, ContainerStatus};
use crate::history::{CommandHistory, Direction};
use crate::suite::{TestRecord, TestRoster};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    transcript: Transcript,
    history: CommandHistory,
    containers: ContainerRoster,
    tests: TestRoster,
    code: String,
}

impl SessionState {
    /// An empty session
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_parts(
        transcript: Transcript,
        containers: ContainerRoster,
        tests: TestRoster,
        code: String,
    ) -> Self {
        Self {
            transcript,
            history: CommandHistory::new(),
            containers,
            tests,
            code,
        }
    }

    // ------------------------------------------------------------------
    // Mutation entry points
    // ------------------------------------------------------------------

    /// Append lines to the transcript; returns the index of the first one
    pub fn append_transcript<I, S>(&mut self, lines: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let start = self.transcript.append(lines);
        debug!(
            appended = self.transcript.len() - start,
            total = self.transcript.len(),
            "transcript appended"
        );
        start
    }

    /// Record a submitted command in history (see [`CommandHistory::record_submission`])
    pub fn record_submission(&mut self, command: &str) -> bool {
        self.history.record_submission(command)
    }

    /// Move the history cursor; `None` when the cursor did not move
    pub fn recall(&mut self, direction: Direction) -> Option<String> {
        self.history.recall(direction).map(str::to_string)
    }

    /// Flip a container between running and stopped; `None` is a no-op
    pub fn toggle_container(&mut self, id: &str) -> Option<ContainerStatus> {
        let status = self.containers.toggle(id);
        debug!(id, ?status, "container toggle");
        status
    }

    /// Remove a container; `None` is a no-op
    pub fn remove_container(&mut self, id: &str) -> Option<ContainerRecord> {
        let removed = self.containers.remove(id);
        debug!(id, removed = removed.is_some(), "container remove");
        removed
    }

    /// Mark every test as running (start of a run)
    pub fn mark_all_running(&mut self) {
        self.tests.mark_all_running();
        debug!(tests = self.tests.count(), "test roster marked running");
    }

    /// Replace the test roster wholesale (resolution of a run)
    pub fn replace_test_roster(&mut self, roster: Vec<TestRecord>) {
        self.tests.replace(roster);
        debug!(tests = self.tests.count(), "test roster replaced");
    }

    /// Replace the code buffer verbatim
    pub fn set_code_buffer(&mut self, text: impl Into<String>) {
        self.code = text.into();
        debug!(bytes = self.code.len(), "code buffer replaced");
    }

    // ------------------------------------------------------------------
    // Read entry points
    // ------------------------------------------------------------------

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn history(&self) -> &CommandHistory {
        &self.history
    }

    pub fn containers(&self) -> &ContainerRoster {
        &self.containers
    }

    pub fn tests(&self) -> &TestRoster {
        &self.tests
    }

    pub fn code(&self) -> &str {
        &self.code
    }
}
