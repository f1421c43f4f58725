//! Session state: transcript, history, rosters and code buffer

mod seed;
mod state;
mod transcript;

pub use seed::SeedProfile;
pub use state::SessionState;
pub use transcript::{LineKind, TerminalLine, Transcript};
