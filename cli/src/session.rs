use std::io::{BufRead, Write};

use digraph_core::Graph;
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::config::{OutputFormat, Settings};
use crate::error::{CliError, Result};
use crate::script::{parse_line, Command};

/// Counts reported after a script run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunSummary {
    pub executed: usize,
    pub failed: usize,
}

/// One graph plus the settings it is queried under.
///
/// The session owns the graph outright; commands borrow it for the
/// duration of a single call.
pub struct Session {
    graph: Graph<String>,
    settings: Settings,
}

impl Session {
    pub fn new(settings: Settings) -> Self {
        Self {
            graph: Graph::new(),
            settings,
        }
    }

    pub fn graph(&self) -> &Graph<String> {
        &self.graph
    }

    /// Execute every line of `script`, writing results to `out` and
    /// per-line failures to `err`.
    ///
    /// In strict mode the first failure aborts the run and is returned.
    pub fn run<R: BufRead, W: Write, E: Write>(
        &mut self,
        mut script: R,
        out: &mut W,
        err: &mut E,
    ) -> Result<RunSummary> {
        let mut summary = RunSummary::default();
        let mut buf = Vec::new();
        let mut number = 0usize;

        loop {
            buf.clear();
            if script.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            number += 1;

            // Undecodable lines fail on their own; later lines still run.
            let outcome = std::str::from_utf8(&buf)
                .map_err(|_| CliError::Encoding)
                .and_then(parse_line)
                .and_then(|command| match command {
                    Some(command) => self.execute(command, out).map(Some),
                    None => Ok(None),
                });

            match outcome {
                Ok(None) => {}
                Ok(Some(())) => summary.executed += 1,
                // Write failures on `out` abort the run even outside strict mode.
                Err(CliError::Io(e)) => return Err(CliError::Io(e)),
                Err(e) => {
                    summary.failed += 1;
                    warn!(line = number, error = %e, "command failed");
                    if self.settings.strict {
                        return Err(CliError::Line {
                            line: number,
                            source: Box::new(e),
                        });
                    }
                    writeln!(err, "line {}: {}", number, e)?;
                }
            }
        }

        debug!(
            executed = summary.executed,
            failed = summary.failed,
            vertices = self.graph.vertex_count(),
            edges = self.graph.edge_count(),
            "script finished"
        );
        Ok(summary)
    }

    /// Apply one command to the graph and write its result, if any.
    pub fn execute<W: Write>(&mut self, command: Command, out: &mut W) -> Result<()> {
        let graph = &mut self.graph;

        let (text, value) = match command {
            Command::AddVertex(id) => {
                graph.add_vertex(id);
                return Ok(());
            }
            Command::RemoveVertex(id) => {
                graph.remove_vertex(&id);
                return Ok(());
            }
            Command::AddEdge(a, b) => {
                graph.add_edge(a, b);
                return Ok(());
            }
            Command::RemoveEdge(a, b) => {
                graph.remove_edge(&a, &b);
                return Ok(());
            }
            Command::Count => {
                let (v, e) = (graph.vertex_count(), graph.edge_count());
                (
                    format!("vertices: {} edges: {}", v, e),
                    json!({ "op": "count", "vertices": v, "edges": e }),
                )
            }
            Command::Degree(id) => {
                let (in_degree, out_degree) = (graph.in_degree(&id), graph.out_degree(&id));
                (
                    format!("{} in: {} out: {}", id, in_degree, out_degree),
                    json!({ "op": "degree", "vertex": id, "in": in_degree, "out": out_degree }),
                )
            }
            Command::Neighbors(id) => {
                let neighbors = graph.neighbors(&id);
                (
                    format!("{}: {}", id, neighbors.join(" ")),
                    json!({ "op": "neighbors", "vertex": id, "neighbors": neighbors }),
                )
            }
            Command::HasEdge(a, b) => {
                let present = graph.has_edge(&a, &b);
                (
                    present.to_string(),
                    json!({ "op": "has-edge", "origin": a, "destination": b, "result": present }),
                )
            }
            Command::Connected(a, b) => {
                let connected = digraph_core::are_connected(graph, &a, &b)?;
                (
                    connected.to_string(),
                    json!({ "op": "connected", "origin": a, "destination": b, "result": connected }),
                )
            }
            Command::Path(a, b) => {
                let path = digraph_core::shortest_path(graph, &a, &b)?;
                (
                    path.join(" -> "),
                    json!({ "op": "path", "origin": a, "destination": b, "hops": path.len() - 1, "path": path }),
                )
            }
            Command::Within { start, depth } => {
                let depth = depth.unwrap_or(self.settings.default_depth);
                let reached = digraph_core::reachable_within(graph, &start, depth)?;
                let text = reached
                    .iter()
                    .map(|r| format!("{} {}: {}", r.vertex, r.distance, r.path.join(" -> ")))
                    .collect::<Vec<_>>()
                    .join("\n");
                let rows: Vec<Value> = reached
                    .into_iter()
                    .map(|r| json!({ "vertex": r.vertex, "distance": r.distance, "path": r.path }))
                    .collect();
                (
                    text,
                    json!({ "op": "within", "start": start, "depth": depth, "reached": rows }),
                )
            }
            Command::Subgraph { start, depth } => {
                let depth = depth.unwrap_or(self.settings.default_depth);
                let sub = digraph_core::extract_subgraph(graph, &start, depth)?;
                let report = sub.to_string();
                (
                    report.trim_end().to_string(),
                    json!({
                        "op": "subgraph",
                        "start": start,
                        "depth": depth,
                        "vertices": sub.vertex_count(),
                        "edges": sub.edge_count(),
                        "report": report,
                    }),
                )
            }
            Command::Rank { top } => {
                let top = top.unwrap_or(self.settings.default_top);
                let ranking = digraph_core::degree_ranking(graph, top);
                let text = ranking
                    .iter()
                    .map(|d| {
                        format!(
                            "{} total: {} in: {} out: {}",
                            d.vertex, d.total_degree, d.in_degree, d.out_degree
                        )
                    })
                    .collect::<Vec<_>>()
                    .join("\n");
                let rows: Vec<Value> = ranking
                    .into_iter()
                    .map(|d| {
                        json!({
                            "vertex": d.vertex,
                            "total": d.total_degree,
                            "in": d.in_degree,
                            "out": d.out_degree,
                        })
                    })
                    .collect();
                (text, json!({ "op": "rank", "ranking": rows }))
            }
            Command::Dump => {
                let report = graph.to_string();
                (
                    report.trim_end().to_string(),
                    json!({ "op": "dump", "report": report }),
                )
            }
        };

        match self.settings.format {
            OutputFormat::Text => {
                if !text.is_empty() {
                    writeln!(out, "{}", text)?;
                }
            }
            OutputFormat::Json => {
                serde_json::to_writer(&mut *out, &value)?;
                writeln!(out)?;
            }
        }
        Ok(())
    }
}
