use clap::Parser;
use std::path::PathBuf;

/// smart_calc is an interactive integer calculator that remembers variables
/// between lines.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Runs every line of this file instead of starting the prompt.
    #[arg(short, long, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Loads variables from this file before the session starts, like `/read`.
    #[arg(short, long, value_name = "PATH")]
    pub load: Option<PathBuf>,

    /// Where the prompt keeps its line history.
    #[arg(long, value_name = "PATH", default_value = ".smart_calc_history")]
    pub history: PathBuf,

    /// Neither loads nor saves line history.
    #[arg(long)]
    pub no_history: bool,

    /// Skips the welcome banner.
    #[arg(short, long)]
    pub quiet: bool,

    /// Raises log verbosity; repeat for more. `RUST_LOG` takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }

    pub fn history_path(&self) -> Option<&PathBuf> {
        (!self.no_history).then_some(&self.history)
    }
}
