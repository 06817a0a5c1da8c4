//! digraph: run a command script against an in-memory directed graph.
//!
//! Reads one command per line from a file or stdin, prints query results to
//! stdout and per-line failures to stderr. See `script` for the command set.

use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod config;
mod error;
mod script;
mod session;

use config::{OutputFormat, Overrides, Settings};
use error::Result;
use session::Session;

#[derive(Parser, Debug)]
#[command(name = "digraph", version, about = "Run a directed-graph command script")]
struct Args {
    /// Script file. Reads stdin when omitted or "-".
    script: Option<PathBuf>,

    /// YAML settings file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Stop at the first failing command.
    #[arg(long, conflicts_with = "no_strict")]
    strict: bool,

    /// Report failures and keep going, even if the config sets `strict`.
    #[arg(long)]
    no_strict: bool,

    /// Default depth for `within` and `subgraph`.
    #[arg(long)]
    depth: Option<u32>,

    /// Default result limit for `rank` (0 = all).
    #[arg(long)]
    top: Option<usize>,

    /// Output format for query results.
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,
}

/// Initialize structured logging on stderr with `RUST_LOG` support.
///
/// Defaults to `digraph=info`, which also covers the `digraph_core` target.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("digraph=info"));

    // try_init so a second call is harmless
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .try_init();
}

fn strict_override(args: &Args) -> Option<bool> {
    match (args.strict, args.no_strict) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    }
}

fn load_settings(args: &Args) -> Result<Settings> {
    let base = match &args.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    let settings = base.with_overrides(&Overrides {
        strict: strict_override(args),
        default_depth: args.depth,
        default_top: args.top,
        format: args.format,
    });
    settings.validate()?;
    Ok(settings)
}

fn run(args: Args) -> Result<bool> {
    let settings = load_settings(&args)?;
    let mut session = Session::new(settings);

    let stdout = io::stdout();
    let stderr = io::stderr();
    let mut out = stdout.lock();
    let mut err = stderr.lock();

    let summary = match args.script.as_deref() {
        Some(path) if path.as_os_str() != "-" => {
            let file = File::open(path)?;
            session.run(BufReader::new(file), &mut out, &mut err)?
        }
        _ => session.run(io::stdin().lock(), &mut out, &mut err)?,
    };

    info!(
        executed = summary.executed,
        failed = summary.failed,
        vertices = session.graph().vertex_count(),
        edges = session.graph().edge_count(),
        "script complete"
    );
    Ok(summary.failed == 0)
}

fn main() -> ExitCode {
    init_logging();
    let args = Args::parse();

    match run(args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            error!(error = %e, "digraph failed");
            eprintln!("digraph: {}", e);
            ExitCode::from(2)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_args_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_strict_flags() {
        let parse = |argv: &[&str]| Args::try_parse_from(argv);
        assert_eq!(strict_override(&parse(&["digraph"]).unwrap()), None);
        assert_eq!(strict_override(&parse(&["digraph", "--strict"]).unwrap()), Some(true));
        assert_eq!(
            strict_override(&parse(&["digraph", "--no-strict"]).unwrap()),
            Some(false)
        );
        assert!(parse(&["digraph", "--strict", "--no-strict"]).is_err());
    }
}
