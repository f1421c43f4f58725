//! Session configuration

use std::time::Duration;

use crate::error::{DevdeckError, Result};
use crate::session::SeedProfile;

/// Simulated latency for a shell command
pub const DEFAULT_COMMAND_DELAY: Duration = Duration::from_millis(1000);

/// Simulated latency for a full test run
pub const DEFAULT_TEST_DELAY: Duration = Duration::from_millis(2000);

const MAX_DELAY: Duration = Duration::from_secs(3600);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    pub command_delay: Duration,
    pub test_delay: Duration,
    pub seed: SeedProfile,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            command_delay: DEFAULT_COMMAND_DELAY,
            test_delay: DEFAULT_TEST_DELAY,
            seed: SeedProfile::Demo,
        }
    }
}

impl SessionConfig {
    /// Build from millisecond delays, as given on the command line
    pub fn from_millis(command_delay_ms: u64, test_delay_ms: u64, seed: SeedProfile) -> Result<Self> {
        let config = Self {
            command_delay: Duration::from_millis(command_delay_ms),
            test_delay: Duration::from_millis(test_delay_ms),
            seed,
        };
        config.validate()?;
        Ok(config)
    }

    /// Zero delays are fine; anything over an hour is rejected
    pub fn validate(&self) -> Result<()> {
        for (name, delay) in [("command delay", self.command_delay), ("test delay", self.test_delay)] {
            if delay > MAX_DELAY {
                return Err(DevdeckError::InvalidConfig(format!(
                    "{} of {} ms exceeds the {} ms limit",
                    name,
                    delay.as_millis(),
                    MAX_DELAY.as_millis()
                )));
            }
        }
        Ok(())
    }
}
