//! A live session: the store plus its pending completions
//!
//! The session is single-threaded and event driven. Each entry point runs to
//! completion before the next; delayed work sits in the scheduler until
//! [`Session::tick`] finds it due on the session clock.

use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use super::clock::SharedClock;
use super::executor::{execute_event, EventOutcome};
use super::runner::{echo_lines, Resolution};
use super::scheduler::Scheduler;
use crate::config::SessionConfig;
use crate::container::{ContainerRecord, ContainerStatus};
use crate::error::Result;
use crate::history::Direction;
use crate::parser::SessionEvent;
use crate::session::SessionState;
use crate::status::{summarize, StatusSummary};

#[derive(Debug)]
pub struct Session {
    state: SessionState,
    pending: Scheduler<Resolution>,
    clock: SharedClock,
    config: SessionConfig,
    started_at: DateTime<Utc>,
    closed: bool,
}

impl Session {
    /// Create a session seeded according to `config`
    pub fn new(config: SessionConfig, clock: SharedClock) -> Result<Self> {
        config.validate()?;
        let state = config.seed.build()?;
        Ok(Self::with_state(config, clock, state))
    }

    /// Create a session around an existing state
    pub fn with_state(config: SessionConfig, clock: SharedClock, state: SessionState) -> Self {
        info!(
            containers = state.containers().count(),
            tests = state.tests().count(),
            "session started"
        );
        Self {
            state,
            pending: Scheduler::new(),
            clock,
            config,
            started_at: Utc::now(),
            closed: false,
        }
    }

    /// Apply a front-end event (see [`execute_event`])
    pub fn apply(&mut self, event: &SessionEvent) -> Result<EventOutcome> {
        execute_event(event, self)
    }

    // ------------------------------------------------------------------
    // Task submission
    // ------------------------------------------------------------------

    /// Submit a command typed at the prompt.
    ///
    /// The text is trimmed; empty input is rejected with no transcript or
    /// history change and `None` is returned. Otherwise the command is
    /// recorded in history and run; the due time of its resolution is returned.
    /// A closed session accepts nothing.
    pub fn submit_command(&mut self, text: &str) -> Option<Duration> {
        if self.rejects_after_shutdown("submit_command") {
            return None;
        }
        if !self.state.record_submission(text) {
            warn!("empty command ignored");
            return None;
        }
        self.run_command(text.trim())
    }

    /// Echo a command now and schedule its outcome lines
    pub fn run_command(&mut self, text: &str) -> Option<Duration> {
        if self.rejects_after_shutdown("run_command") {
            return None;
        }
        self.state.append_transcript(echo_lines(text));
        let resolution = Resolution::for_command(text);
        let due = self
            .pending
            .schedule(self.clock.now(), self.config.command_delay, resolution);
        debug!(command = text, due_ms = due.as_millis() as u64, "command scheduled");
        Some(due)
    }

    /// Mark every test running now and schedule the canonical outcome
    pub fn run_test_suite(&mut self) -> Option<Duration> {
        if self.rejects_after_shutdown("run_test_suite") {
            return None;
        }
        self.state.mark_all_running();
        let due = self.pending.schedule(
            self.clock.now(),
            self.config.test_delay,
            Resolution::for_test_run(),
        );
        info!(due_ms = due.as_millis() as u64, "test run started");
        Some(due)
    }

    // ------------------------------------------------------------------
    // Direct store operations
    // ------------------------------------------------------------------

    // Each is a no-op returning `None`/`false` once the session is closed.

    pub fn recall(&mut self, direction: Direction) -> Option<String> {
        if self.rejects_after_shutdown("recall") {
            return None;
        }
        self.state.recall(direction)
    }

    pub fn toggle_container(&mut self, id: &str) -> Option<ContainerStatus> {
        if self.rejects_after_shutdown("toggle_container") {
            return None;
        }
        self.state.toggle_container(id)
    }

    pub fn remove_container(&mut self, id: &str) -> Option<ContainerRecord> {
        if self.rejects_after_shutdown("remove_container") {
            return None;
        }
        self.state.remove_container(id)
    }

    /// Replace the code buffer; `false` if the session is closed
    pub fn set_code_buffer(&mut self, text: impl Into<String>) -> bool {
        if self.rejects_after_shutdown("set_code_buffer") {
            return false;
        }
        self.state.set_code_buffer(text);
        true
    }

    fn rejects_after_shutdown(&self, operation: &'static str) -> bool {
        if self.closed {
            warn!(operation, "session is closed; ignored");
        }
        self.closed
    }

    // ------------------------------------------------------------------
    // Time
    // ------------------------------------------------------------------

    /// Apply every resolution due at the current clock reading.
    ///
    /// Returns how many were applied; always 0 once closed.
    pub fn tick(&mut self) -> usize {
        if self.closed {
            return 0;
        }
        let due = self.pending.drain_due(self.clock.now());
        let applied = due.len();
        for resolution in due {
            debug!(resolution = %resolution.describe(), "resolution applied");
            if matches!(resolution, Resolution::TestRun { .. }) {
                info!("test run resolved");
            }
            resolution.apply(&mut self.state);
        }
        applied
    }

    /// Sleep on the session clock for `duration`, then tick
    pub fn advance(&mut self, duration: Duration) -> usize {
        if self.closed {
            return 0;
        }
        self.clock.sleep(duration);
        self.tick()
    }

    /// Wait until nothing is pending, applying resolutions as they fall due
    pub fn settle(&mut self) -> usize {
        let mut applied = 0;
        while let Some(due) = self.pending.next_due() {
            let now = self.clock.now();
            if due > now {
                self.clock.sleep(due - now);
            }
            applied += self.tick();
        }
        applied
    }

    /// End the session, discarding pending completions.
    ///
    /// Returns how many completions were cancelled.
    pub fn shutdown(&mut self) -> usize {
        let dropped = self.pending.cancel_all();
        if dropped > 0 {
            warn!(dropped, "pending completions cancelled at shutdown");
        }
        self.closed = true;
        info!(
            lines = self.state.transcript().len(),
            commands = self.state.history().len(),
            "session closed"
        );
        dropped
    }

    // ------------------------------------------------------------------
    // Reads
    // ------------------------------------------------------------------

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn status(&self) -> StatusSummary {
        summarize(&self.state)
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn now(&self) -> Duration {
        self.clock.now()
    }

    pub fn next_due(&self) -> Option<Duration> {
        self.pending.next_due()
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::clock::ManualClock;
    use crate::engine::runner::canonical_test_outcome;
    use crate::session::SeedProfile;
    use crate::suite::TestStatus;
    use std::sync::Arc;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn session(seed: SeedProfile) -> (Session, Arc<ManualClock>) {
        let clock = ManualClock::shared();
        let config = SessionConfig {
            seed,
            ..SessionConfig::default()
        };
        let session = Session::new(config, clock.clone()).unwrap();
        (session, clock)
    }

    fn tail(session: &Session, n: usize) -> Vec<String> {
        let texts = session.state().transcript().texts();
        texts[texts.len() - n..].iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_run_command_test_suite() {
        let (mut session, _clock) = session(SeedProfile::Demo);
        session.submit_command("run test suite");
        assert_eq!(tail(&session, 2), vec!["$ run test suite", "Executing..."]);

        session.advance(ms(999));
        assert_eq!(session.pending(), 1);

        session.advance(ms(1));
        assert_eq!(
            tail(&session, 5),
            vec![
                "$ run test suite",
                "Executing...",
                "Running test suite...",
                "✓ All tests passed",
                "$"
            ]
        );
    }

    #[test]
    fn test_run_command_docker() {
        let (mut session, _clock) = session(SeedProfile::Empty);
        session.submit_command("docker ps");
        session.advance(ms(1000));
        assert_eq!(
            session.state().transcript().texts(),
            vec![
                "$ docker ps",
                "Executing...",
                "Docker command executed",
                "✓ Containers updated",
                "$"
            ]
        );
    }

    #[test]
    fn test_run_command_generic() {
        let (mut session, _clock) = session(SeedProfile::Empty);
        session.submit_command("echo hi");
        session.settle();
        assert_eq!(
            session.state().transcript().texts(),
            vec!["$ echo hi", "Executing...", "✓ Command executed successfully", "$"]
        );
    }

    #[test]
    fn test_empty_command_rejected() {
        let (mut session, _clock) = session(SeedProfile::Demo);
        let before = session.state().clone();
        assert_eq!(session.submit_command("   \t "), None);
        assert_eq!(session.state(), &before);
        assert_eq!(session.pending(), 0);
    }

    #[test]
    fn test_submitted_command_is_trimmed() {
        let (mut session, _clock) = session(SeedProfile::Empty);
        session.submit_command("  ls  ");
        assert_eq!(session.state().history().entries(), &["ls".to_string()]);
        assert_eq!(session.state().transcript().texts()[0], "$ ls");
    }

    #[test]
    fn test_interleaved_commands_resolve_at_boundaries() {
        let (mut session, clock) = session(SeedProfile::Empty);
        session.submit_command("echo one");
        clock.advance(ms(300));
        session.submit_command("docker ps");

        session.advance(ms(700));
        session.advance(ms(300));

        assert_eq!(
            session.state().transcript().texts(),
            vec![
                "$ echo one",
                "Executing...",
                "$ docker ps",
                "Executing...",
                "✓ Command executed successfully",
                "$",
                "Docker command executed",
                "✓ Containers updated",
                "$"
            ]
        );
    }

    #[test]
    fn test_all_pending_completions_apply() {
        let (mut session, _clock) = session(SeedProfile::Empty);
        for cmd in ["a", "b", "c"] {
            session.submit_command(cmd);
        }
        session.run_test_suite();
        assert_eq!(session.pending(), 4);

        assert_eq!(session.settle(), 4);
        assert_eq!(session.pending(), 0);
        assert_eq!(session.state().transcript().len(), 3 * 4);
    }

    #[test]
    fn test_run_test_suite_two_phases() {
        let (mut session, _clock) = session(SeedProfile::Demo);
        session.run_test_suite();

        let tests = session.state().tests();
        assert_eq!(tests.count_with(TestStatus::Running), tests.count());
        assert!(tests.list().iter().all(|t| t.duration_ms.is_none()));

        session.advance(ms(1999));
        assert_eq!(session.state().tests().count_with(TestStatus::Running), 4);

        session.advance(ms(1));
        assert_eq!(session.state().tests().list(), canonical_test_outcome().as_slice());
        assert_eq!(session.status().passed_tests, 4);
    }

    #[test]
    fn test_test_run_resolves_to_canonical_roster_from_empty() {
        let (mut session, _clock) = session(SeedProfile::Empty);
        session.run_test_suite();
        session.settle();
        assert_eq!(session.state().tests().count(), 4);
    }

    #[test]
    fn test_toggle_reads_current_status_with_pending_work() {
        let (mut session, _clock) = session(SeedProfile::Demo);
        session.submit_command("docker stop web-app");
        assert_eq!(session.toggle_container("1"), Some(ContainerStatus::Stopped));
        session.settle();
        // The docker resolution only writes transcript lines
        assert_eq!(
            session.state().containers().get("1").map(|c| c.status),
            Some(ContainerStatus::Stopped)
        );
    }

    #[test]
    fn test_shutdown_cancels_pending() {
        let (mut session, _clock) = session(SeedProfile::Empty);
        session.submit_command("echo hi");
        session.run_test_suite();

        assert_eq!(session.shutdown(), 2);
        assert!(session.is_closed());
        assert_eq!(session.advance(ms(5000)), 0);
        assert_eq!(session.state().transcript().len(), 2);
    }

    #[test]
    fn test_apply_routes_events() {
        let (mut session, _clock) = session(SeedProfile::Demo);
        let outcome = session
            .apply(&SessionEvent::ContainerToggle("3".into()))
            .unwrap();
        assert_eq!(outcome, EventOutcome::Applied);
        assert_eq!(session.status().running_containers, 3);

        session.shutdown();
        assert!(session.apply(&SessionEvent::RunTestsClicked).is_err());
    }

    #[test]
    fn test_closed_session_ignores_direct_calls() {
        let (mut session, _clock) = session(SeedProfile::Demo);
        session.submit_command("echo early");
        session.shutdown();
        let before = session.state().clone();

        assert_eq!(session.submit_command("echo late"), None);
        assert_eq!(session.run_command("echo later"), None);
        assert_eq!(session.run_test_suite(), None);
        assert_eq!(session.toggle_container("1"), None);
        assert!(session.remove_container("2").is_none());
        assert!(!session.set_code_buffer("gone"));
        assert_eq!(session.recall(Direction::Previous), None);

        assert_eq!(session.pending(), 0);
        assert_eq!(session.advance(ms(5000)), 0);
        assert_eq!(session.tick(), 0);
        assert_eq!(session.settle(), 0);
        assert_eq!(session.state(), &before);
    }

    #[test]
    fn test_zero_delay_resolves_on_next_tick() {
        let clock = ManualClock::shared();
        let config = SessionConfig::from_millis(0, 0, SeedProfile::Empty).unwrap();
        let mut session = Session::new(config, clock).unwrap();
        session.submit_command("ls");
        assert_eq!(session.tick(), 1);
        assert_eq!(session.state().transcript().len(), 4);
    }
}
