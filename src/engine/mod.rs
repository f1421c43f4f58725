//! Simulation engine: clock, scheduler, task runner and event execution

pub mod clock;
pub mod driver;
pub mod executor;
pub mod runner;
pub mod scheduler;
pub mod session;

pub use clock::{Clock, ManualClock, SharedClock, SystemClock};
pub use driver::{settle_async, sleep_async, tick_and_report, Cancellation, TokioClock};
pub use executor::{execute_event, EventOutcome, IgnoreReason};
pub use runner::{CommandClass, Resolution};
pub use session::Session;
