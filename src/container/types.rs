//! Container record definitions

use serde::{Deserialize, Serialize};

/// Lifecycle state shown for a simulated container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContainerStatus {
    Running,
    Stopped,
    Building,
}

impl ContainerStatus {
    /// The status a toggle produces, if toggling is defined for this state.
    ///
    /// Only `Running` and `Stopped` flip; `Building` has no toggle.
    pub fn toggled(self) -> Option<ContainerStatus> {
        match self {
            ContainerStatus::Running => Some(ContainerStatus::Stopped),
            ContainerStatus::Stopped => Some(ContainerStatus::Running),
            ContainerStatus::Building => None,
        }
    }
}

impl std::fmt::Display for ContainerStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContainerStatus::Running => write!(f, "running"),
            ContainerStatus::Stopped => write!(f, "stopped"),
            ContainerStatus::Building => write!(f, "building"),
        }
    }
}

/// A container entry in the roster
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerRecord {
    /// Unique identity within the roster
    pub id: String,
    pub name: String,
    pub image: String,
    pub status: ContainerStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
}

impl ContainerRecord {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        image: impl Into<String>,
        status: ContainerStatus,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            image: image.into(),
            status,
            port: None,
        }
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    pub fn is_running(&self) -> bool {
        self.status == ContainerStatus::Running
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggled_pairs() {
        assert_eq!(ContainerStatus::Running.toggled(), Some(ContainerStatus::Stopped));
        assert_eq!(ContainerStatus::Stopped.toggled(), Some(ContainerStatus::Running));
        assert_eq!(ContainerStatus::Building.toggled(), None);
    }

    #[test]
    fn test_record_builder() {
        let record = ContainerRecord::new("1", "web-app", "node:18", ContainerStatus::Running)
            .with_port(3000);
        assert_eq!(record.port, Some(3000));
        assert!(record.is_running());
    }

    #[test]
    fn test_status_serializes_lowercase() {
        let json = serde_json::to_string(&ContainerStatus::Building).unwrap();
        assert_eq!(json, "\"building\"");
    }
}
