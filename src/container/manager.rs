//! Ordered container roster
//!
//! The roster keeps insertion order and guarantees unique ids: the only way
//! in is `insert`, which refuses duplicates.

use serde::{Deserialize, Serialize};

use super::types::{ContainerRecord, ContainerStatus};
use crate::error::{DevdeckError, Result};

/// Containers in insertion order, keyed by `id`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContainerRoster {
    records: Vec<ContainerRecord>,
}

impl ContainerRoster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a roster from records, rejecting duplicate ids
    pub fn from_records(records: impl IntoIterator<Item = ContainerRecord>) -> Result<Self> {
        let mut roster = Self::new();
        for record in records {
            roster.insert(record)?;
        }
        Ok(roster)
    }

    /// Add a container at the end of the roster
    pub fn insert(&mut self, record: ContainerRecord) -> Result<&ContainerRecord> {
        if self.exists(&record.id) {
            return Err(DevdeckError::ExecutionError(format!(
                "Container '{}' already exists",
                record.id
            )));
        }

        self.records.push(record);
        Ok(&self.records[self.records.len() - 1])
    }

    /// Flip a container between running and stopped.
    ///
    /// The current status is read and replaced in one step. Returns the new
    /// status, or `None` if the id is unknown or the container is building.
    pub fn toggle(&mut self, id: &str) -> Option<ContainerStatus> {
        let record = self.records.iter_mut().find(|c| c.id == id)?;
        let next = record.status.toggled()?;
        record.status = next;
        Some(next)
    }

    /// Remove a container; `None` if the id is unknown
    pub fn remove(&mut self, id: &str) -> Option<ContainerRecord> {
        let index = self.records.iter().position(|c| c.id == id)?;
        Some(self.records.remove(index))
    }

    pub fn get(&self, id: &str) -> Option<&ContainerRecord> {
        self.records.iter().find(|c| c.id == id)
    }

    pub fn exists(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn list(&self) -> &[ContainerRecord] {
        &self.records
    }

    pub fn ids(&self) -> Vec<&str> {
        self.records.iter().map(|c| c.id.as_str()).collect()
    }

    pub fn running_count(&self) -> usize {
        self.records.iter().filter(|c| c.is_running()).count()
    }

    pub fn count(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
