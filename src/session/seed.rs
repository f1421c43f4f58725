//! Seed data a session starts from

use serde::{Deserialize, Serialize};

use super::state::SessionState;
use super::transcript::Transcript;
use crate::container::{ContainerRecord, ContainerRoster, ContainerStatus};
use crate::error::Result;
use crate::suite::{TestRecord, TestRoster};

const DEMO_CODE: &str = include_str!("demo_buffer.tsx");

/// Which initial data a session is created with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeedProfile {
    /// The demo workspace: a short transcript, three containers, four tests
    #[default]
    Demo,
    /// Nothing at all
    Empty,
}

impl SeedProfile {
    pub fn build(self) -> Result<SessionState> {
        match self {
            SeedProfile::Empty => Ok(SessionState::new()),
            SeedProfile::Demo => demo_state(),
        }
    }
}

fn demo_state() -> Result<SessionState> {
    let mut transcript = Transcript::new();
    transcript.append([
        "$ npm install",
        "Installing dependencies...",
        "✓ Dependencies installed successfully",
        "$ npm test",
        "Running test suite...",
        "✓ Skip API tests passed",
        "✓ Component tests passed",
        "$",
    ]);

    let containers = ContainerRoster::from_records(vec![
        ContainerRecord::new("1", "web-app", "node:18", ContainerStatus::Running).with_port(3000),
        ContainerRecord::new("2", "database", "postgres:15", ContainerStatus::Running)
            .with_port(5432),
        ContainerRecord::new("3", "redis-cache", "redis:7", ContainerStatus::Stopped),
    ])?;

    let tests = TestRoster::new(vec![
        TestRecord::passed("Skip API Integration", 150),
        TestRecord::passed("Skip List Component", 320),
        TestRecord::passed("Price Calculation", 89),
        TestRecord::running("Search Functionality"),
    ]);

    Ok(SessionState::with_parts(
        transcript,
        containers,
        tests,
        DEMO_CODE.to_string(),
    ))
}
