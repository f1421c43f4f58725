//! Derived status counts
//!
//! Always computed from the snapshot passed in; nothing is cached.

use serde::{Deserialize, Serialize};

use crate::session::SessionState;
use crate::suite::TestStatus;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusSummary {
    pub running_containers: usize,
    pub total_containers: usize,
    pub passed_tests: usize,
    pub failed_tests: usize,
    pub running_tests: usize,
    pub total_tests: usize,
}

/// Count containers and tests in the given snapshot
pub fn summarize(state: &SessionState) -> StatusSummary {
    let containers = state.containers();
    let tests = state.tests();

    StatusSummary {
        running_containers: containers.running_count(),
        total_containers: containers.count(),
        passed_tests: tests.count_with(TestStatus::Passed),
        failed_tests: tests.count_with(TestStatus::Failed),
        running_tests: tests.count_with(TestStatus::Running),
        total_tests: tests.count(),
    }
}

impl std::fmt::Display for StatusSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}/{} containers | {} passed",
            self.running_containers, self.total_containers, self.passed_tests
        )?;
        if self.failed_tests > 0 {
            write!(f, " | {} failed", self.failed_tests)?;
        }
        Ok(())
    }
}
