//! Session events and script statements

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::history::Direction;

/// Something a user did, as delivered by a front end
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionEvent {
    CommandSubmitted(String),
    HistoryKey(Direction),
    ContainerToggle(String),
    ContainerRemove(String),
    RunTestsClicked,
    CodeBufferEdited(String),
}

/// One parsed script line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Statement {
    Event(SessionEvent),
    /// Replace the code buffer with a file's contents
    LoadBuffer(String),
    /// Let time pass, applying whatever falls due
    Sleep(Duration),
    /// Wait for everything pending
    Wait,
    /// Print the status summary
    Status,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptLine {
    /// 1-based source line
    pub line: usize,
    pub statement: Statement,
}

/// A script is a sequence of statements
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Script {
    pub statements: Vec<ScriptLine>,
}

impl Statement {
    /// Short description for explain/trace output
    pub fn describe(&self) -> String {
        match self {
            Statement::Event(event) => match event {
                SessionEvent::CommandSubmitted(text) => format!("run `{}`", text),
                SessionEvent::HistoryKey(Direction::Previous) => "recall previous command".to_string(),
                SessionEvent::HistoryKey(Direction::Next) => "recall next command".to_string(),
                SessionEvent::ContainerToggle(id) => format!("toggle container {}", id),
                SessionEvent::ContainerRemove(id) => format!("remove container {}", id),
                SessionEvent::RunTestsClicked => "run all tests".to_string(),
                SessionEvent::CodeBufferEdited(text) => {
                    format!("replace code buffer ({} bytes)", text.len())
                }
            },
            Statement::LoadBuffer(path) => format!("load code buffer from {}", path),
            Statement::Sleep(d) => format!("sleep {} ms", d.as_millis()),
            Statement::Wait => "wait for pending work".to_string(),
            Statement::Status => "print status".to_string(),
        }
    }
}
