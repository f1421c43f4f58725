//! Tracing subscriber setup
//!
//! Diagnostics go to stderr so stdout stays clean for transcript and JSON
//! output. `RUST_LOG` wins when set; otherwise the level follows `-v`.

use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

/// Default directive for a `-v` count
pub fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "devdeck=warn",
        1 => "devdeck=info",
        _ => "devdeck=debug",
    }
}

/// Build the filter, preferring `RUST_LOG` over the verbosity default
pub fn env_filter(verbosity: u8) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)))
}

/// Install the global subscriber; a second call is a no-op
pub fn init(verbosity: u8) {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    let _ = tracing_subscriber::registry()
        .with(fmt_layer)
        .with(env_filter(verbosity))
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive() {
        assert_eq!(default_directive(0), "devdeck=warn");
        assert_eq!(default_directive(1), "devdeck=info");
        assert_eq!(default_directive(2), "devdeck=debug");
        assert_eq!(default_directive(9), "devdeck=debug");
    }

    #[test]
    fn test_init_twice_is_harmless() {
        init(0);
        init(2);
    }
}
