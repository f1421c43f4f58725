//! Command history with arrow-key style recall
//!
//! Submitted commands are kept oldest first. The recall cursor counts back
//! from the most recent entry: offset 0 is the last submission.

use serde::{Deserialize, Serialize};

/// Direction of a history key press
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Step into the past (arrow up)
    Previous,
    /// Step toward the present (arrow down)
    Next,
}

/// Submitted commands plus the recall cursor
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandHistory {
    entries: Vec<String>,
    cursor: Option<usize>,
}

impl CommandHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a submitted command.
    ///
    /// The command is trimmed; an empty result is rejected and `false` is
    /// returned. The cursor is reset either way.
    pub fn record_submission(&mut self, command: &str) -> bool {
        self.cursor = None;

        let command = command.trim();
        if command.is_empty() {
            return false;
        }

        self.entries.push(command.to_string());
        true
    }

    /// Move one step into the past.
    ///
    /// Returns the recalled command, or `None` when the cursor did not move
    /// (empty history, or already at the oldest entry).
    pub fn recall_previous(&mut self) -> Option<&str> {
        let next = match self.cursor {
            None if !self.entries.is_empty() => 0,
            Some(offset) if offset + 1 < self.entries.len() => offset + 1,
            _ => return None,
        };

        self.cursor = Some(next);
        self.entry_at(next)
    }

    /// Move one step toward the present.
    ///
    /// Leaving offset 0 clears the cursor and yields an empty string. Returns
    /// `None` when no recall is active.
    pub fn recall_next(&mut self) -> Option<&str> {
        match self.cursor {
            None => None,
            Some(0) => {
                self.cursor = None;
                Some("")
            }
            Some(offset) => {
                self.cursor = Some(offset - 1);
                self.entry_at(offset - 1)
            }
        }
    }

    /// Recall in the given direction
    pub fn recall(&mut self, direction: Direction) -> Option<&str> {
        match direction {
            Direction::Previous => self.recall_previous(),
            Direction::Next => self.recall_next(),
        }
    }

    /// Command at `offset` counting back from the most recent entry
    pub fn entry_at(&self, offset: usize) -> Option<&str> {
        let index = self.entries.len().checked_sub(offset + 1)?;
        self.entries.get(index).map(|s| s.as_str())
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
