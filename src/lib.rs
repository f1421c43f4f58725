//! Devdeck - a simulated developer workspace
//!
//! Devdeck models a sandbox session: a terminal transcript with command
//! history, a roster of containers, a test suite and a code buffer. Shell
//! commands and test runs are simulated with fixed latencies on an injectable
//! clock, so the whole session can be driven deterministically.
//!
//! # Example
//!
//! ```
//! use devdeck::{execute_event, ManualClock, Session, SessionConfig, SessionEvent};
//! use std::time::Duration;
//!
//! let clock = ManualClock::shared();
//! let mut session = Session::new(SessionConfig::default(), clock.clone()).unwrap();
//!
//! execute_event(&SessionEvent::CommandSubmitted("docker ps".into()), &mut session).unwrap();
//! session.advance(Duration::from_millis(1000));
//!
//! assert_eq!(session.state().transcript().lines().last().unwrap().text, "$");
//! println!("{}", session.status());
//! ```

pub mod cli;
pub mod config;
pub mod container;
pub mod engine;
pub mod error;
pub mod history;
pub mod logging;
pub mod output;
pub mod parser;
pub mod repl;
pub mod script;
pub mod session;
pub mod skips;
pub mod status;
pub mod suite;

pub use config::SessionConfig;
pub use container::{ContainerRecord, ContainerRoster, ContainerStatus};
pub use engine::{
    execute_event, settle_async, Cancellation, Clock, EventOutcome, ManualClock, Session,
    SystemClock, TokioClock,
};
pub use error::{DevdeckError, Result};
pub use history::{CommandHistory, Direction};
pub use output::{format_output, OutputFormat, Snapshot, View};
pub use parser::{parse_line, parse_script, Script, SessionEvent, Statement};
pub use script::{validate_script, ScriptResult, ScriptRunner};
pub use session::{SeedProfile, SessionState, TerminalLine};
pub use skips::{filter_skips, format_price, JsonFileSource, Skip, SkipSource};
pub use status::{summarize, StatusSummary};
pub use suite::{TestRecord, TestRoster, TestStatus};
