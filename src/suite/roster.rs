//! Test roster with all-or-nothing run phases
//!
//! A run never updates records one at a time: `mark_all_running` flips the
//! whole roster at once, and `replace` swaps in the resolved roster whole.

use serde::{Deserialize, Serialize};

use super::types::{TestRecord, TestStatus};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TestRoster {
    records: Vec<TestRecord>,
}

impl TestRoster {
    pub fn new(records: Vec<TestRecord>) -> Self {
        Self { records }
    }

    /// Set every record to running, clearing duration and error
    pub fn mark_all_running(&mut self) {
        for record in &mut self.records {
            record.status = TestStatus::Running;
            record.duration_ms = None;
            record.error = None;
        }
    }

    /// Replace the whole roster
    pub fn replace(&mut self, records: Vec<TestRecord>) {
        self.records = records;
    }

    pub fn list(&self) -> &[TestRecord] {
        &self.records
    }

    pub fn count_with(&self, status: TestStatus) -> usize {
        self.records.iter().filter(|t| t.status == status).count()
    }

    pub fn count(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
