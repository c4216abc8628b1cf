//! nestkv - an in-memory key-value store with nested transactions.
//!
//! This is the main entry point for the nestkv command-line interface.

use std::fs::File;
use std::io::{self, BufReader, IsTerminal};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use nestkv::db::{Database, DatabaseConfig, Repl, ReplConfig};
use nestkv::transaction::UndoMode;

/// In-memory key-value store with nested transactions.
#[derive(Parser)]
#[command(name = "nestkv")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Execute a command line and exit (may be repeated)
    #[arg(short, long = "execute", value_name = "LINE")]
    execute: Vec<String>,

    /// Run commands from a script file and exit
    #[arg(short, long, value_name = "PATH", conflicts_with = "execute")]
    file: Option<PathBuf>,

    /// When ROLLBACK points are recorded
    #[arg(long, value_enum, default_value_t = UndoArg::Transaction)]
    undo_mode: UndoArg,

    /// Do not print the banner or prompt
    #[arg(long)]
    no_prompt: bool,

    /// Enable verbose logging to stderr
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum UndoArg {
    /// Only BEGIN records a rollback point
    Transaction,
    /// Every SET and effective UNSET also records one
    EveryMutation,
}

impl From<UndoArg> for UndoMode {
    fn from(arg: UndoArg) -> Self {
        match arg {
            UndoArg::Transaction => UndoMode::Transaction,
            UndoArg::EveryMutation => UndoMode::EveryMutation,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = DatabaseConfig::new()
        .undo_mode(cli.undo_mode.into())
        .verbose(cli.verbose);
    let db = Database::with_config(config);

    let outcome = if !cli.execute.is_empty() {
        execute_lines(db, &cli.execute)
    } else if let Some(path) = cli.file {
        run_file(db, &path)
    } else {
        run_repl(db, !cli.no_prompt && io::stdin().is_terminal())
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("warn")
        }
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn execute_lines(mut db: Database, lines: &[String]) -> Result<(), Box<dyn std::error::Error>> {
    for line in lines {
        let result = db.execute(line);
        if result.is_end() {
            break;
        }
        if let Some(text) = result.render() {
            println!("{}", text);
        }
    }
    Ok(())
}

fn run_file(mut db: Database, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let file = File::open(path).map_err(|e| format!("{}: {}", path.display(), e))?;
    let mut stdout = io::stdout().lock();
    db.run_script(BufReader::new(file), &mut stdout)?;
    Ok(())
}

fn run_repl(db: Database, interactive: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config = ReplConfig {
        interactive,
        ..Default::default()
    };
    let mut repl = Repl::with_config(db, config);
    let end = repl.run()?;
    tracing::debug!(?end, "session finished");
    Ok(())
}
