//! Event executor
//!
//! Front ends deliver [`SessionEvent`]s; `execute_event` routes each one to
//! the matching session entry point and reports what happened. Ignored events
//! are outcomes, not errors.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::session::Session;
use crate::container::ContainerStatus;
use crate::error::{DevdeckError, Result};
use crate::parser::SessionEvent;

/// Why an event changed nothing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum IgnoreReason {
    EmptyCommand,
    HistoryBoundary,
    UnknownContainer(String),
    NotToggleable { id: String, status: ContainerStatus },
}

impl std::fmt::Display for IgnoreReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IgnoreReason::EmptyCommand => write!(f, "empty command"),
            IgnoreReason::HistoryBoundary => write!(f, "no further history"),
            IgnoreReason::UnknownContainer(id) => write!(f, "no container with id '{}'", id),
            IgnoreReason::NotToggleable { id, status } => {
                write!(f, "container '{}' is {} and cannot be toggled", id, status)
            }
        }
    }
}

/// Result of applying one event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventOutcome {
    /// The store changed and nothing is pending
    Applied,
    /// The store changed and a resolution is due at the given session time
    Scheduled { due: Duration },
    /// A history key moved the cursor to this text (empty when leaving history)
    Recalled(String),
    Ignored(IgnoreReason),
}

/// Apply an event to a live session
pub fn execute_event(event: &SessionEvent, session: &mut Session) -> Result<EventOutcome> {
    if session.is_closed() {
        return Err(DevdeckError::SessionClosed);
    }

    let outcome = match event {
        SessionEvent::CommandSubmitted(text) => match session.submit_command(text) {
            Some(due) => EventOutcome::Scheduled { due },
            None => EventOutcome::Ignored(IgnoreReason::EmptyCommand),
        },
        SessionEvent::HistoryKey(direction) => match session.recall(*direction) {
            Some(text) => EventOutcome::Recalled(text),
            None => EventOutcome::Ignored(IgnoreReason::HistoryBoundary),
        },
        SessionEvent::ContainerToggle(id) => toggle(session, id),
        SessionEvent::ContainerRemove(id) => match session.remove_container(id) {
            Some(_) => EventOutcome::Applied,
            None => EventOutcome::Ignored(IgnoreReason::UnknownContainer(id.clone())),
        },
        SessionEvent::RunTestsClicked => match session.run_test_suite() {
            Some(due) => EventOutcome::Scheduled { due },
            None => return Err(DevdeckError::SessionClosed),
        },
        SessionEvent::CodeBufferEdited(text) => {
            if !session.set_code_buffer(text.clone()) {
                return Err(DevdeckError::SessionClosed);
            }
            EventOutcome::Applied
        }
    };

    if let EventOutcome::Ignored(reason) = &outcome {
        warn!(%reason, "event ignored");
    }

    Ok(outcome)
}

fn toggle(session: &mut Session, id: &str) -> EventOutcome {
    let Some(current) = session.state().containers().get(id).map(|c| c.status) else {
        return EventOutcome::Ignored(IgnoreReason::UnknownContainer(id.to_string()));
    };

    match session.toggle_container(id) {
        Some(_) => EventOutcome::Applied,
        None => EventOutcome::Ignored(IgnoreReason::NotToggleable {
            id: id.to_string(),
            status: current,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SessionConfig;
    use crate::container::{ContainerRecord, ContainerRoster};
    use crate::engine::clock::ManualClock;
    use crate::history::Direction;
    use crate::session::{SessionState, Transcript};
    use crate::suite::TestRoster;

    fn demo() -> Session {
        Session::new(SessionConfig::default(), ManualClock::shared()).unwrap()
    }

    #[test]
    fn test_command_event_schedules() {
        let mut session = demo();
        let outcome =
            execute_event(&SessionEvent::CommandSubmitted("ls".into()), &mut session).unwrap();
        assert_eq!(
            outcome,
            EventOutcome::Scheduled {
                due: Duration::from_millis(1000)
            }
        );
    }

    #[test]
    fn test_empty_command_event_ignored() {
        let mut session = demo();
        let before = session.state().transcript().len();
        let outcome =
            execute_event(&SessionEvent::CommandSubmitted("  ".into()), &mut session).unwrap();
        assert_eq!(outcome, EventOutcome::Ignored(IgnoreReason::EmptyCommand));
        assert_eq!(session.state().transcript().len(), before);
        assert!(session.state().history().is_empty());
    }

    #[test]
    fn test_history_key_events() {
        let mut session = demo();
        let up = SessionEvent::HistoryKey(Direction::Previous);
        let down = SessionEvent::HistoryKey(Direction::Next);

        assert_eq!(
            execute_event(&up, &mut session).unwrap(),
            EventOutcome::Ignored(IgnoreReason::HistoryBoundary)
        );

        execute_event(&SessionEvent::CommandSubmitted("make".into()), &mut session).unwrap();
        assert_eq!(
            execute_event(&up, &mut session).unwrap(),
            EventOutcome::Recalled("make".into())
        );
        assert_eq!(
            execute_event(&down, &mut session).unwrap(),
            EventOutcome::Recalled(String::new())
        );
        assert_eq!(session.state().history().cursor(), None);
    }

    #[test]
    fn test_toggle_events() {
        let containers = ContainerRoster::from_records(vec![
            ContainerRecord::new("a", "api", "node:18", ContainerStatus::Running),
            ContainerRecord::new("b", "img", "rust:1", ContainerStatus::Building),
        ])
        .unwrap();
        let state =
            SessionState::with_parts(Transcript::new(), containers, TestRoster::default(), String::new());
        let mut session =
            Session::with_state(SessionConfig::default(), ManualClock::shared(), state);

        assert_eq!(
            execute_event(&SessionEvent::ContainerToggle("a".into()), &mut session).unwrap(),
            EventOutcome::Applied
        );
        assert_eq!(
            execute_event(&SessionEvent::ContainerToggle("b".into()), &mut session).unwrap(),
            EventOutcome::Ignored(IgnoreReason::NotToggleable {
                id: "b".into(),
                status: ContainerStatus::Building
            })
        );
        assert_eq!(
            execute_event(&SessionEvent::ContainerToggle("zz".into()), &mut session).unwrap(),
            EventOutcome::Ignored(IgnoreReason::UnknownContainer("zz".into()))
        );
    }

    #[test]
    fn test_remove_event_twice() {
        let mut session = demo();
        let remove = SessionEvent::ContainerRemove("3".into());
        assert_eq!(execute_event(&remove, &mut session).unwrap(), EventOutcome::Applied);
        assert_eq!(
            execute_event(&remove, &mut session).unwrap(),
            EventOutcome::Ignored(IgnoreReason::UnknownContainer("3".into()))
        );
        assert_eq!(session.state().containers().count(), 2);
    }

    #[test]
    fn test_run_tests_and_edit_events() {
        let mut session = demo();
        let outcome = execute_event(&SessionEvent::RunTestsClicked, &mut session).unwrap();
        assert_eq!(
            outcome,
            EventOutcome::Scheduled {
                due: Duration::from_millis(2000)
            }
        );

        execute_event(&SessionEvent::CodeBufferEdited("x = 1".into()), &mut session).unwrap();
        assert_eq!(session.state().code(), "x = 1");
    }

    #[test]
    fn test_closed_session_rejects_events() {
        let mut session = demo();
        session.shutdown();
        let result = execute_event(&SessionEvent::RunTestsClicked, &mut session);
        assert!(matches!(result, Err(DevdeckError::SessionClosed)));
    }
}
