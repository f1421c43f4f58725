//! Devdeck CLI - drive a simulated developer workspace

use std::io::Write;

use clap::Parser;
use devdeck::cli::{Args, SubCommand};
use devdeck::engine::tick_and_report;
use devdeck::script::{
    explain_script, has_errors, has_warnings, validate_script, ValidationOptions,
    ValidationSeverity,
};
use devdeck::skips::filter_skips;
use devdeck::{
    execute_event, format_output, parse_script, settle_async, Cancellation, DevdeckError,
    JsonFileSource, OutputFormat, ScriptRunner, Session, SessionEvent, SkipSource, Snapshot,
    SystemClock, TerminalLine, TokioClock, View,
};

fn main() {
    let args = Args::parse();
    devdeck::logging::init(args.verbose);

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> devdeck::Result<()> {
    let config = args.session_config()?;
    let format = args.output_format();

    match args.command {
        SubCommand::Run { file, explain } => {
            let content = std::fs::read_to_string(&file).map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => DevdeckError::PathNotFound(file.display().to_string()),
                _ => DevdeckError::IoError(e),
            })?;
            let script = parse_script(&content)?;

            if explain {
                println!("Script: {}", file.display());
                println!("Statements: {}\n", script.statements.len());
                for explanation in explain_script(&script) {
                    println!("{}", explanation);
                }
                return Ok(());
            }

            let seed_state = config.seed.build()?;
            let validation_opts = ValidationOptions {
                known_containers: seed_state
                    .containers()
                    .ids()
                    .into_iter()
                    .map(str::to_string)
                    .collect(),
                base_dir: file.parent().map(|p| p.to_path_buf()),
            };
            let validation_errors = validate_script(&script, &validation_opts);

            if has_warnings(&validation_errors) {
                for err in validation_errors
                    .iter()
                    .filter(|e| e.severity == ValidationSeverity::Warning)
                {
                    eprintln!("{}", err);
                }
            }

            if has_errors(&validation_errors) {
                for err in validation_errors
                    .iter()
                    .filter(|e| e.severity == ValidationSeverity::Error)
                {
                    eprintln!("{}", err);
                }
                return Err(DevdeckError::ExecutionError(
                    "Script validation failed".to_string(),
                ));
            }

            let session = Session::with_state(config, SystemClock::shared(), seed_state);
            let mut runner = ScriptRunner::new(session, std::io::stdout()).with_format(format);
            if let Some(dir) = file.parent() {
                runner = runner.with_base_dir(dir);
            }
            let result = runner.run_script(&script)?;
            runner.into_session().shutdown();

            tracing::info!(
                statements = result.statements_executed,
                resolutions = result.resolutions_applied,
                "script completed"
            );
            Ok(())
        }

        SubCommand::Exec { commands } => {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_time()
                .build()?;
            let mut session = Session::new(config, TokioClock::shared())?;

            let cancel = Cancellation::new();
            {
                let cancel = cancel.clone();
                ctrlc::set_handler(move || cancel.cancel())
                    .map_err(|e| DevdeckError::ExecutionError(e.to_string()))?;
            }

            let human = format == OutputFormat::Human;
            let mut emit = |lines: &[TerminalLine]| {
                if human {
                    for line in lines {
                        println!("{}", line.text);
                    }
                }
            };

            for command in commands {
                let seen = session.state().transcript().len();
                execute_event(&SessionEvent::CommandSubmitted(command), &mut session)?;
                emit(session.state().transcript().since(seen));
                tick_and_report(&mut session, &mut emit);
            }

            runtime.block_on(settle_async(&mut session, &cancel, &mut emit));

            if session.is_closed() {
                eprintln!("Interrupted: pending work cancelled");
                return Ok(());
            }

            if human {
                println!("{}", session.status());
            } else {
                let snapshot = Snapshot::capture(session.state());
                println!("{}", format_output(&View::Snapshot(&snapshot), format));
            }
            session.shutdown();
            Ok(())
        }

        SubCommand::Status => {
            let state = config.seed.build()?;
            let snapshot = Snapshot::capture(&state);
            println!("{}", format_output(&View::Snapshot(&snapshot), format));
            Ok(())
        }

        SubCommand::Skips { file, search } => {
            let skips = JsonFileSource::new(file).load()?;
            let matches = filter_skips(&skips, search.as_deref().unwrap_or(""));
            let mut out = std::io::stdout();
            writeln!(out, "{}", format_output(&View::Skips(&matches), format))?;
            Ok(())
        }

        SubCommand::Repl => devdeck::repl::run_repl(config),
    }
}
