//! Simulated container roster
//!
//! Containers here are records only: a status flag and an optional port.
//! Nothing is started or stopped for real.

mod manager;
mod types;

pub use manager::ContainerRoster;
pub use types::{ContainerRecord, ContainerStatus};
