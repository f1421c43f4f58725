//! Simulated test roster

mod roster;
mod types;

pub use roster::TestRoster;
pub use types::{TestRecord, TestStatus};
