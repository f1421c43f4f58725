//! Append-only terminal transcript
//!
//! Each line carries its kind as data, decided once when the line is
//! appended, so renderers never have to sniff the text.

use serde::{Deserialize, Serialize};

pub const PROMPT_MARKER: char = '$';
pub const SUCCESS_MARKER: char = '✓';
pub const FAILURE_MARKER: char = '✗';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineKind {
    Prompt,
    Success,
    Failure,
    Plain,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerminalLine {
    pub kind: LineKind,
    pub text: String,
}

impl TerminalLine {
    /// Tag a line by its leading marker
    pub fn classify(text: impl Into<String>) -> Self {
        let text = text.into();
        let kind = match text.chars().next() {
            Some(PROMPT_MARKER) => LineKind::Prompt,
            Some(SUCCESS_MARKER) => LineKind::Success,
            Some(FAILURE_MARKER) => LineKind::Failure,
            _ => LineKind::Plain,
        };
        Self { kind, text }
    }
}

impl std::fmt::Display for TerminalLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Transcript {
    lines: Vec<TerminalLine>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append lines in order; returns the index of the first appended line
    pub fn append<I, S>(&mut self, lines: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let start = self.lines.len();
        self.lines
            .extend(lines.into_iter().map(TerminalLine::classify));
        start
    }

    pub fn lines(&self) -> &[TerminalLine] {
        &self.lines
    }

    /// Lines appended at or after `index`
    pub fn since(&self, index: usize) -> &[TerminalLine] {
        self.lines.get(index..).unwrap_or(&[])
    }

    pub fn texts(&self) -> Vec<&str> {
        self.lines.iter().map(|l| l.text.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
