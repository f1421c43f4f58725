//! Interactive REPL implementation

use std::fs;

use bytesize::ByteSize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tracing::info;

use crate::config::SessionConfig;
use crate::engine::{
    execute_event, settle_async, sleep_async, tick_and_report, Cancellation, EventOutcome, Session,
    TokioClock,
};
use crate::error::{DevdeckError, Result};
use crate::output::{format_output, OutputFormat, Snapshot, View};
use crate::parser::{parse_line, Statement};
use crate::session::TerminalLine;

const PROMPT: &str = "deck> ";

pub fn run_repl(config: SessionConfig) -> Result<()> {
    let mut rl =
        DefaultEditor::new().map_err(|e| DevdeckError::ExecutionError(e.to_string()))?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;

    let mut session = Session::new(config, TokioClock::shared())?;

    // Ctrl-C at the prompt is handled by rustyline; this only fires while settling
    let cancel = Cancellation::new();
    {
        let cancel = cancel.clone();
        ctrlc::set_handler(move || cancel.cancel())
            .map_err(|e| DevdeckError::ExecutionError(e.to_string()))?;
    }

    println!("Devdeck v{} - Interactive Mode", env!("CARGO_PKG_VERSION"));
    println!("Type 'help' for commands, 'exit' to quit\n");
    print_lines(session.state().transcript().lines());

    let mut prefill: Option<String> = None;

    loop {
        // Background work that fell due while we were waiting on input
        tick_and_report(&mut session, &mut print_lines);

        let readline = match prefill.take() {
            Some(text) => rl.readline_with_initial(PROMPT, (text.as_str(), "")),
            None => rl.readline(PROMPT),
        };

        let line = match readline {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!("Goodbye!");
                break;
            }
            Err(err) => {
                eprintln!("Error: {:?}", err);
                break;
            }
        };

        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match line.to_lowercase().as_str() {
            "exit" | "quit" | "q" => {
                println!("Goodbye!");
                break;
            }
            "help" | "?" => {
                print_help();
                continue;
            }
            "clear" | "cls" => {
                print!("\x1B[2J\x1B[1;1H");
                continue;
            }
            "history" => {
                for (i, entry) in session.state().history().entries().iter().enumerate() {
                    println!("  {:>3}  {}", i + 1, entry);
                }
                println!();
                continue;
            }
            "containers" => {
                show(&View::Containers(session.state().containers()));
                continue;
            }
            "tests" => {
                show(&View::Tests(session.state().tests()));
                continue;
            }
            "code" => {
                show(&View::Code(session.state().code()));
                continue;
            }
            "snapshot" => {
                let snapshot = Snapshot::capture(session.state());
                show(&View::Snapshot(&snapshot));
                continue;
            }
            _ => {}
        }

        let _ = rl.add_history_entry(line);

        let (text, background) = split_background(line);
        let seen = session.state().transcript().len();

        let settle = match parse_line(text) {
            Ok(None) => false,
            Ok(Some(Statement::Event(event))) => match execute_event(&event, &mut session) {
                Ok(EventOutcome::Scheduled { .. }) => !background,
                Ok(EventOutcome::Recalled(text)) => {
                    prefill = Some(text);
                    false
                }
                Ok(EventOutcome::Applied) => {
                    println!("{}\n", session.status());
                    false
                }
                Ok(EventOutcome::Ignored(reason)) => {
                    println!("({})\n", reason);
                    false
                }
                Err(e) => {
                    eprintln!("Error: {}\n", e);
                    false
                }
            },
            Ok(Some(Statement::LoadBuffer(path))) => {
                match fs::read_to_string(&path) {
                    Ok(text) => {
                        let size = ByteSize(text.len() as u64);
                        session.set_code_buffer(text);
                        println!("Loaded {} ({})\n", path, size);
                    }
                    Err(e) => eprintln!("Error: {}: {}\n", path, e),
                }
                false
            }
            Ok(Some(Statement::Sleep(duration))) => {
                print_lines(session.state().transcript().since(seen));
                runtime.block_on(sleep_async(&mut session, &cancel, duration, print_lines));
                if session.is_closed() {
                    println!("^C (pending work cancelled)");
                    break;
                }
                continue;
            }
            Ok(Some(Statement::Wait)) => true,
            Ok(Some(Statement::Status)) => {
                show(&View::Status(session.status()));
                false
            }
            Err(e) => {
                eprintln!("Parse error: {}\n", e);
                false
            }
        };

        print_lines(session.state().transcript().since(seen));

        if settle {
            runtime.block_on(settle_async(&mut session, &cancel, print_lines));
            if session.is_closed() {
                println!("^C (pending work cancelled)");
                break;
            }
        }
    }

    if !session.is_closed() {
        session.shutdown();
    }
    info!("repl exited");
    Ok(())
}

/// A trailing ` &` submits without waiting for the result
fn split_background(line: &str) -> (&str, bool) {
    match line.strip_suffix('&') {
        Some(rest) if rest.ends_with(char::is_whitespace) => (rest.trim_end(), true),
        _ => (line, false),
    }
}

fn print_lines(lines: &[TerminalLine]) {
    for line in lines {
        println!("{}", line.text);
    }
}

fn show(view: &View<'_>) {
    println!("{}\n", format_output(view, OutputFormat::Human));
}

fn print_help() {
    println!(
        r#"
Devdeck Commands
================

SHELL:
  <anything else>                 - Run a simulated shell command
  <command> &                     - Run it without waiting for the result

  Commands containing "test" run the test suite, commands containing
  "docker" update containers, everything else just succeeds.

DIRECTIVES:
  :up / :down                     - Recall previous / next command
  :tests                          - Run all tests
  :toggle <id>                    - Start or stop a container
  :rm <id>                        - Remove a container
  :edit "<text>"                  - Replace the code buffer
  :load <path>                    - Load the code buffer from a file
  :sleep <ms>                     - Let time pass
  :wait                           - Wait for everything pending
  :status                         - Show the status bar

REPL Commands:
  help, ?                         - Show this help
  history                         - Show submitted commands
  containers                      - Show the container table
  tests                           - Show the test roster
  code                            - Show code buffer size
  snapshot                        - Show everything
  clear, cls                      - Clear screen
  exit, quit, q                   - Exit REPL

Ctrl-C while waiting cancels pending work and exits.
"#
    );
}
