//! CLI argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::SessionConfig;
use crate::error::Result;
use crate::output::OutputFormat;
use crate::session::SeedProfile;

#[derive(Parser)]
#[command(name = "devdeck")]
#[command(author, version, about = "A simulated developer workspace: terminal, containers and tests", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: SubCommand,

    /// Simulated latency of a shell command, in milliseconds
    #[arg(long, global = true, env = "DEVDECK_COMMAND_DELAY_MS", default_value = "1000")]
    pub command_delay_ms: u64,

    /// Simulated latency of a test run, in milliseconds
    #[arg(long, global = true, env = "DEVDECK_TEST_DELAY_MS", default_value = "2000")]
    pub test_delay_ms: u64,

    /// Start with an empty session instead of the demo workspace
    #[arg(long, global = true)]
    pub empty: bool,

    /// Output format as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbose logging (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    pub fn session_config(&self) -> Result<SessionConfig> {
        let seed = if self.empty {
            SeedProfile::Empty
        } else {
            SeedProfile::Demo
        };
        SessionConfig::from_millis(self.command_delay_ms, self.test_delay_ms, seed)
    }

    pub fn output_format(&self) -> OutputFormat {
        OutputFormat::from_json_flag(self.json)
    }
}

#[derive(Subcommand)]
pub enum SubCommand {
    /// Replay a session script
    Run {
        /// Path to the script file
        file: PathBuf,

        /// List what the script would do without running it
        #[arg(long)]
        explain: bool,
    },

    /// Submit shell commands and wait for their results
    Exec {
        /// Commands to submit, in order
        #[arg(required = true)]
        commands: Vec<String>,
    },

    /// Print the starting snapshot and status
    Status,

    /// List skips from a saved listing
    Skips {
        /// JSON file holding the skip listing
        file: PathBuf,

        /// Only show skips whose size or description matches
        #[arg(long, short)]
        search: Option<String>,
    },

    /// Start interactive REPL mode
    Repl,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_exec_with_globals() {
        let args = Args::try_parse_from([
            "devdeck",
            "exec",
            "docker ps",
            "npm test",
            "--command-delay-ms",
            "0",
            "--empty",
            "-vv",
        ])
        .unwrap();

        assert_eq!(args.verbose, 2);
        assert!(args.empty);
        let config = args.session_config().unwrap();
        assert_eq!(config.seed, SeedProfile::Empty);
        assert_eq!(config.command_delay.as_millis(), 0);
        match args.command {
            SubCommand::Exec { commands } => assert_eq!(commands, vec!["docker ps", "npm test"]),
            _ => panic!("expected exec"),
        }
    }

    #[test]
    fn test_exec_requires_commands() {
        assert!(Args::try_parse_from(["devdeck", "exec"]).is_err());
    }

    #[test]
    fn test_oversized_delay_rejected() {
        let args =
            Args::try_parse_from(["devdeck", "status", "--test-delay-ms", "99999999"]).unwrap();
        assert!(args.session_config().is_err());
    }

    #[test]
    fn test_skips_search() {
        let args = Args::try_parse_from(["devdeck", "skips", "list.json", "--search", "yard"])
            .unwrap();
        match args.command {
            SubCommand::Skips { file, search } => {
                assert_eq!(file, PathBuf::from("list.json"));
                assert_eq!(search.as_deref(), Some("yard"));
            }
            _ => panic!("expected skips"),
        }
    }
}
