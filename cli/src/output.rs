use std::collections::BTreeMap;
use std::fmt::Write as _;

use serde::Serialize;

use graph_walk_core::{NetworkSummary, NodeId, Path, UserId};

use crate::args::Format;

/// A command result that can be printed for people or machines.
pub trait Report: Serialize {
    fn human(&self) -> String;
}

pub fn emit<R: Report>(format: Format, report: &R) -> anyhow::Result<()> {
    match format {
        Format::Human => println!("{}", report.human()),
        Format::Json => println!("{}", serde_json::to_string_pretty(report)?),
    }
    Ok(())
}

fn join(vertices: &[NodeId]) -> String {
    vertices
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(" → ")
}

#[derive(Debug, Serialize)]
pub struct TraversalReport {
    pub order: &'static str,
    pub start: NodeId,
    pub visited: Vec<NodeId>,
}

impl Report for TraversalReport {
    fn human(&self) -> String {
        let order: Vec<String> = self.visited.iter().map(|v| v.to_string()).collect();
        format!("{} from {}: {}", self.order, self.start, order.join(", "))
    }
}

#[derive(Serialize)]
pub struct PathReport {
    pub algo: &'static str,
    pub from: NodeId,
    pub to: NodeId,
    pub path: Option<Path<NodeId>>,
}

impl Report for PathReport {
    fn human(&self) -> String {
        match &self.path {
            Some(p) => format!(
                "{} {} → {}: {} ({} hops)",
                self.algo,
                self.from,
                self.to,
                join(p.vertices()),
                p.hops()
            ),
            None => format!("{} {} → {}: no path", self.algo, self.from, self.to),
        }
    }
}

#[derive(Serialize)]
pub struct AncestorReport {
    pub start: NodeId,
    pub ancestor: Option<NodeId>,
}

impl Report for AncestorReport {
    fn human(&self) -> String {
        match self.ancestor {
            Some(a) => format!("earliest ancestor of {}: {}", self.start, a),
            None => format!("earliest ancestor of {}: none", self.start),
        }
    }
}

#[derive(Serialize)]
pub struct SocialReport {
    pub friendships: BTreeMap<UserId, Vec<UserId>>,
    pub paths: BTreeMap<UserId, Path<UserId>>,
    pub summary: NetworkSummary,
}

impl Report for SocialReport {
    fn human(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "friendships:");
        for (user, friends) in &self.friendships {
            let friends: Vec<String> = friends.iter().map(|f| f.to_string()).collect();
            let _ = writeln!(out, "  {:>4}: {}", user, friends.join(", "));
        }
        let _ = writeln!(out, "paths from {}:", self.summary.user);
        for (user, path) in &self.paths {
            let _ = writeln!(out, "  {:>4}: {}", user, join(path.vertices()));
        }
        let _ = write!(
            out,
            "reach {} of {} users ({:.1}%), average separation {:.2}",
            self.summary.reachable,
            self.summary.total_users.saturating_sub(1),
            self.summary.coverage * 100.0,
            self.summary.average_separation
        );
        out
    }
}

#[derive(Serialize)]
pub struct Timing {
    pub operation: &'static str,
    /// None when the operation was skipped for this graph.
    pub millis: Option<f64>,
    pub result: String,
}

#[derive(Serialize)]
pub struct ShapeRun {
    pub shape: &'static str,
    pub vertices: usize,
    pub edges: usize,
    pub generate_millis: f64,
    pub timings: Vec<Timing>,
}

#[derive(Serialize)]
pub struct BenchReport {
    pub runs: Vec<ShapeRun>,
}

impl Report for BenchReport {
    fn human(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "graph-walk bench");
        let _ = writeln!(out, "================");
        for run in &self.runs {
            let _ = writeln!(out);
            let _ = writeln!(out, "--- {} ---", run.shape);
            let _ = writeln!(
                out,
                "Generated in {:.1}ms: {} vertices, {} edges",
                run.generate_millis, run.vertices, run.edges
            );
            let _ = writeln!(out, "{:>20} {:>12} {:>24}", "operation", "time", "result");
            let _ = writeln!(out, "{:->20} {:->12} {:->24}", "", "", "");
            for t in &run.timings {
                let time = match t.millis {
                    Some(ms) => format!("{ms:.1}ms"),
                    None => "skipped".to_string(),
                };
                let _ = writeln!(out, "{:>20} {:>12} {:>24}", t.operation, time, t.result);
            }
        }
        out.trim_end().to_string()
    }
}
