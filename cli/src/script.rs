//! Line-oriented command language.
//!
//! One command per line, whitespace-separated tokens, `#` starts a comment.
//! Vertex identifiers are arbitrary tokens without whitespace or `#`.

use crate::config::DEPTH_RANGE;
use crate::error::{CliError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    AddVertex(String),
    RemoveVertex(String),
    AddEdge(String, String),
    RemoveEdge(String, String),
    Count,
    Degree(String),
    Neighbors(String),
    HasEdge(String, String),
    Connected(String, String),
    Path(String, String),
    Within { start: String, depth: Option<u32> },
    Subgraph { start: String, depth: Option<u32> },
    Rank { top: Option<usize> },
    Dump,
}

/// Parse one script line. Blank and comment-only lines yield `None`.
pub fn parse_line(line: &str) -> Result<Option<Command>> {
    let code = line.split('#').next().unwrap_or("");
    let tokens: Vec<&str> = code.split_whitespace().collect();

    let Some((&name, args)) = tokens.split_first() else {
        return Ok(None);
    };

    let command = match name {
        "vertex" => {
            let [id] = exact::<1>("vertex", "<id>", args)?;
            Command::AddVertex(id)
        }
        "remove-vertex" => {
            let [id] = exact::<1>("remove-vertex", "<id>", args)?;
            Command::RemoveVertex(id)
        }
        "edge" => {
            let [a, b] = exact::<2>("edge", "<origin> <destination>", args)?;
            Command::AddEdge(a, b)
        }
        "remove-edge" => {
            let [a, b] = exact::<2>("remove-edge", "<origin> <destination>", args)?;
            Command::RemoveEdge(a, b)
        }
        "count" => {
            exact::<0>("count", "no arguments", args)?;
            Command::Count
        }
        "degree" => {
            let [id] = exact::<1>("degree", "<id>", args)?;
            Command::Degree(id)
        }
        "neighbors" => {
            let [id] = exact::<1>("neighbors", "<id>", args)?;
            Command::Neighbors(id)
        }
        "has-edge" => {
            let [a, b] = exact::<2>("has-edge", "<origin> <destination>", args)?;
            Command::HasEdge(a, b)
        }
        "connected" => {
            let [a, b] = exact::<2>("connected", "<origin> <destination>", args)?;
            Command::Connected(a, b)
        }
        "path" => {
            let [a, b] = exact::<2>("path", "<origin> <destination>", args)?;
            Command::Path(a, b)
        }
        "within" => {
            let (start, depth) = id_and_optional("within", "<id> [depth]", args)?;
            let depth = depth.map(checked_depth).transpose()?;
            Command::Within { start, depth }
        }
        "subgraph" => {
            let (start, depth) = id_and_optional("subgraph", "<id> [depth]", args)?;
            let depth = depth.map(checked_depth).transpose()?;
            Command::Subgraph { start, depth }
        }
        "rank" => match args {
            [] => Command::Rank { top: None },
            [n] => Command::Rank {
                top: Some(parse_number(n)?),
            },
            _ => {
                return Err(CliError::Arity {
                    command: "rank",
                    expected: "[top]",
                })
            }
        },
        "dump" => {
            exact::<0>("dump", "no arguments", args)?;
            Command::Dump
        }
        other => return Err(CliError::UnknownCommand(other.to_string())),
    };

    Ok(Some(command))
}

fn exact<const N: usize>(
    command: &'static str,
    expected: &'static str,
    args: &[&str],
) -> Result<[String; N]> {
    let owned: Vec<String> = args.iter().map(|s| s.to_string()).collect();
    owned
        .try_into()
        .map_err(|_| CliError::Arity { command, expected })
}

fn id_and_optional<T: std::str::FromStr>(
    command: &'static str,
    expected: &'static str,
    args: &[&str],
) -> Result<(String, Option<T>)> {
    match args {
        [id] => Ok((id.to_string(), None)),
        [id, n] => Ok((id.to_string(), Some(parse_number(n)?))),
        _ => Err(CliError::Arity { command, expected }),
    }
}

/// Script depths obey the same bounds as the `default_depth` setting.
fn checked_depth(depth: u32) -> Result<u32> {
    if DEPTH_RANGE.contains(&depth) {
        Ok(depth)
    } else {
        Err(CliError::OutOfRange {
            name: "depth",
            value: depth.into(),
            min: (*DEPTH_RANGE.start()).into(),
            max: (*DEPTH_RANGE.end()).into(),
        })
    }
}

fn parse_number<T: std::str::FromStr>(token: &str) -> Result<T> {
    token
        .parse()
        .map_err(|_| CliError::InvalidNumber(token.to_string()))
}
