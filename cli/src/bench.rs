use std::time::Instant;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

use graph_walk_core::{bfs_path, bft_order, dfs_path, dft_order, dft_recursive_order, Graph, NodeId};

use crate::args::{BenchArgs, Shape};
use crate::output::{BenchReport, ShapeRun, Timing};

/// The path searches copy the partial path into every frontier entry, so on
/// deep graphs they only run up to this many nodes.
const DEEP_LIMIT: u64 = 2_000;

struct Generator {
    name: &'static str,
    build: fn(u64) -> Graph,
    /// Depth grows logarithmically with the node count.
    shallow: bool,
}

const CHAIN: Generator = Generator {
    name: "chain",
    build: gen_chain,
    shallow: false,
};
const TREE: Generator = Generator {
    name: "ternary tree",
    build: gen_tree,
    shallow: true,
};
const RANDOM: Generator = Generator {
    name: "uniform random",
    build: gen_random,
    shallow: false,
};

pub fn run(args: &BenchArgs) -> anyhow::Result<BenchReport> {
    anyhow::ensure!(args.nodes >= 2, "bench needs at least 2 nodes, got {}", args.nodes);

    let generators: Vec<Generator> = match args.shape {
        Shape::Chain => vec![CHAIN],
        Shape::Tree => vec![TREE],
        Shape::Random => vec![RANDOM],
        Shape::All => vec![CHAIN, TREE, RANDOM],
    };

    let mut runs = Vec::with_capacity(generators.len());
    for generator in &generators {
        runs.push(run_shape(generator, args.nodes)?);
    }
    Ok(BenchReport { runs })
}

fn run_shape(generator: &Generator, nodes: u64) -> anyhow::Result<ShapeRun> {
    let t = Instant::now();
    let graph = (generator.build)(nodes);
    let generate_millis = millis(t);
    info!(
        shape = generator.name,
        vertices = graph.vertex_count(),
        edges = graph.edge_count(),
        "generated"
    );

    let far = nodes - 1;
    let run_deep = generator.shallow || nodes <= DEEP_LIMIT;
    let mut timings = vec![
        time_order("bft", || bft_order(&graph, &0))?,
        time_order("dft", || dft_order(&graph, &0))?,
        time_order("dft_recursive", || dft_recursive_order(&graph, &0))?,
    ];

    if run_deep {
        timings.push(time_path("bfs_path", || bfs_path(&graph, &0, &far))?);
        timings.push(time_path("dfs_path", || dfs_path(&graph, &0, &far))?);
    } else {
        for operation in ["bfs_path", "dfs_path"] {
            timings.push(Timing {
                operation,
                millis: None,
                result: format!("> {DEEP_LIMIT} nodes"),
            });
        }
    }

    Ok(ShapeRun {
        shape: generator.name,
        vertices: graph.vertex_count(),
        edges: graph.edge_count(),
        generate_millis,
        timings,
    })
}

fn time_order<F>(operation: &'static str, f: F) -> anyhow::Result<Timing>
where
    F: FnOnce() -> graph_walk_core::Result<Vec<NodeId>>,
{
    let t = Instant::now();
    let order = f()?;
    Ok(Timing {
        operation,
        millis: Some(millis(t)),
        result: format!("{} visited", order.len()),
    })
}

fn time_path<F>(operation: &'static str, f: F) -> anyhow::Result<Timing>
where
    F: FnOnce() -> graph_walk_core::Result<Option<graph_walk_core::Path<NodeId>>>,
{
    let t = Instant::now();
    let path = f()?;
    Ok(Timing {
        operation,
        millis: Some(millis(t)),
        result: match path {
            Some(p) => format!("{} hops", p.hops()),
            None => "no path".to_string(),
        },
    })
}

fn millis(t: Instant) -> f64 {
    t.elapsed().as_secs_f64() * 1000.0
}

// ---------------------------------------------------------------------------
// Generators: deterministic, O(n + edges)
// ---------------------------------------------------------------------------

/// 0 → 1 → ... → n-1. Longest possible paths.
fn gen_chain(node_count: u64) -> Graph {
    let mut graph = Graph::with_capacity(node_count as usize);
    graph.add_vertex(0);
    for i in 1..node_count {
        graph.add_edge(i - 1, i);
    }
    graph
}

/// Vertex i has children 3i+1, 3i+2, 3i+3. Log depth, wide frontier.
fn gen_tree(node_count: u64) -> Graph {
    let mut graph = Graph::with_capacity(node_count as usize);
    graph.add_vertex(0);
    for child in 1..node_count {
        graph.add_edge((child - 1) / 3, child);
    }
    graph
}

/// ~10 uniform random out-edges per vertex, plus a spine 0 → 1 → ... so
/// every vertex stays reachable from 0.
fn gen_random(node_count: u64) -> Graph {
    let mut graph = gen_chain(node_count);
    let mut rng = StdRng::seed_from_u64(54321);
    for _ in 0..node_count * 9 {
        let from = rng.gen_range(0..node_count);
        let to = rng.gen_range(0..node_count);
        if from != to {
            graph.add_edge(from, to);
        }
    }
    graph
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generators_cover_all_nodes() {
        for generator in [gen_chain, gen_tree, gen_random] {
            let g = generator(50);
            assert_eq!(g.vertex_count(), 50);
            assert_eq!(bft_order(&g, &0).unwrap().len(), 50);
        }
    }

    #[test]
    fn test_tree_depth() {
        let g = gen_tree(13);
        // 12 is a child of 3, which is a child of 0.
        assert_eq!(bfs_path(&g, &0, &12).unwrap().unwrap().hops(), 2);
    }

    #[test]
    fn test_bench_skips_deep_operations() {
        let report = run(&BenchArgs {
            shape: Shape::Chain,
            nodes: DEEP_LIMIT + 1,
        })
        .unwrap();
        let timings = &report.runs[0].timings;
        assert_eq!(timings.len(), 5);
        assert!(timings[..3].iter().all(|t| t.millis.is_some()));
        assert!(timings[3..].iter().all(|t| t.millis.is_none()));
    }

    #[test]
    fn test_bench_small_graph_runs_everything() {
        let report = run(&BenchArgs {
            shape: Shape::All,
            nodes: 200,
        })
        .unwrap();
        assert_eq!(report.runs.len(), 3);
        for run in &report.runs {
            assert!(run.timings.iter().all(|t| t.millis.is_some()));
            let bfs = run.timings.iter().find(|t| t.operation == "bfs_path").unwrap();
            assert!(bfs.result.ends_with("hops"));
        }
    }

    #[test]
    fn test_bench_rejects_tiny_graph() {
        assert!(run(&BenchArgs {
            shape: Shape::All,
            nodes: 1,
        })
        .is_err());
    }
}
