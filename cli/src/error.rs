use std::path::PathBuf;

use digraph_core::GraphError;
use thiserror::Error;

/// Errors raised while loading settings or running a command script.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The YAML settings file could not be parsed.
    #[error("failed to parse config {}: {source}", .path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// A setting is outside its allowed range.
    #[error("invalid setting {name}: {reason}")]
    InvalidSetting { name: &'static str, reason: String },

    #[error("unknown command '{0}'")]
    UnknownCommand(String),

    /// A command got the wrong number of arguments.
    #[error("'{command}' expects {expected}")]
    Arity {
        command: &'static str,
        expected: &'static str,
    },

    #[error("invalid number '{0}'")]
    InvalidNumber(String),

    /// A numeric script argument is outside the range its setting allows.
    #[error("{name} {value} is outside {min}..={max}")]
    OutOfRange {
        name: &'static str,
        value: u64,
        min: u64,
        max: u64,
    },

    #[error("line is not valid UTF-8")]
    Encoding,

    #[error(transparent)]
    Graph(#[from] GraphError<String>),

    #[error("failed to encode output: {0}")]
    Json(#[from] serde_json::Error),

    /// A script line failed; wraps the underlying error with its line number.
    #[error("line {line}: {source}")]
    Line {
        line: usize,
        #[source]
        source: Box<CliError>,
    },
}

pub type Result<T> = std::result::Result<T, CliError>;
