use std::fs;

use anyhow::Context;
use clap::Parser;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tracing_subscriber::EnvFilter;

use smart_calc::commanding::{GREETING, FAREWELL};
use smart_calc::config::Args;
use smart_calc::{Outcome, Session};

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(args.log_level()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let mut session = Session::new();
    if let Some(path) = &args.load {
        let printed = session.read_file(path)
            .with_context(|| format!("failed to load variables from '{}'", path.display()))?;
        for line in printed {
            println!("{line}");
        }
    }

    match &args.file {
        Some(path) => {
            let script = fs::read_to_string(path)
                .with_context(|| format!("failed to read the input file '{}'", path.display()))?;
            run_script(&mut session, &script);
            Ok(())
        },
        None => run_prompt(&mut session, &args),
    }
}

/// Feeds `line` to the session and prints its result. Returns false once the
/// session asks to stop.
fn step(session: &mut Session, line: &str) -> bool {
    match session.execute(line) {
        Outcome::silent => true,
        Outcome::print(text) => {
            println!("{text}");
            true
        },
        Outcome::exit(text) => {
            println!("{text}");
            false
        },
    }
}

fn run_script(session: &mut Session, script: &str) {
    for line in script.lines() {
        if !step(session, line) {
            break;
        }
    }
}

fn run_prompt(session: &mut Session, args: &Args) -> anyhow::Result<()> {
    if !args.quiet {
        println!("{GREETING}");
    }

    let mut rl = DefaultEditor::new().context("could not start the line editor")?;
    if let Some(path) = args.history_path() {
        if rl.load_history(path).is_err() {
            tracing::debug!(path = %path.display(), "no history loaded");
        }
    }

    loop {
        let line = match rl.readline("> ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => {
                println!("{FAREWELL}");
                break;
            },
            Err(e) => {
                eprintln!("Error, {e}");
                break;
            },
        };

        if !line.trim().is_empty() {
            if let Err(e) = rl.add_history_entry(line.as_str()) {
                tracing::debug!(error = %e, "line not added to history");
            }
        }
        if !step(session, &line) {
            break;
        }
    }

    if let Some(path) = args.history_path() {
        if let Err(e) = rl.save_history(path) {
            tracing::warn!(path = %path.display(), error = %e, "could not save history");
        }
    }
    Ok(())
}
