use std::collections::BTreeMap;

use anyhow::Context;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::debug;

use graph_walk_core::{
    bfs_path, bft_order, dfs_path, dfs_path_recursive, dft_order, dft_recursive_order,
    earliest_ancestor, Graph, NodeId, SocialGraph,
};

use crate::args::{
    AncestorArgs, Cli, Command, GraphArgs, PathAlgo, PathArgs, PopulateStrategy, SocialArgs,
    TraversalOrder, TraverseArgs,
};
use crate::bench;
use crate::output::{emit, AncestorReport, PathReport, SocialReport, TraversalReport};

/// Edges of the seven-vertex demo graph:
/// {1: {2}, 2: {3, 4}, 3: {5}, 4: {6, 7}, 5: {3}, 6: {3}, 7: {1, 6}}
const DEMO_EDGES: [(NodeId, NodeId); 10] = [
    (5, 3),
    (6, 3),
    (7, 1),
    (4, 7),
    (1, 2),
    (7, 6),
    (2, 4),
    (3, 5),
    (2, 3),
    (4, 6),
];

/// Parent:child pairs of the demo family tree.
const DEMO_RELATIONS: [(NodeId, NodeId); 10] = [
    (1, 3),
    (2, 3),
    (3, 6),
    (5, 6),
    (5, 7),
    (4, 5),
    (4, 8),
    (8, 9),
    (11, 8),
    (10, 1),
];

pub fn run(cli: &Cli) -> anyhow::Result<()> {
    match &cli.command {
        Command::Traverse(args) => emit(cli.format, &traverse(args)?),
        Command::Path(args) => emit(cli.format, &path(args)?),
        Command::Ancestor(args) => emit(cli.format, &ancestor(args)?),
        Command::Social(args) => emit(cli.format, &social(args)?),
        Command::Bench(args) => emit(cli.format, &bench::run(args)?),
    }
}

fn build_graph(args: &GraphArgs) -> Graph {
    if args.edges.is_empty() {
        let mut graph = Graph::with_capacity(7);
        for v in 1..=7 {
            graph.add_vertex(v);
        }
        graph.load_edges(DEMO_EDGES);
        graph
    } else {
        args.edges.iter().copied().collect()
    }
}

fn traverse(args: &TraverseArgs) -> anyhow::Result<TraversalReport> {
    let graph = build_graph(&args.graph);
    let (order, visited) = match args.order {
        TraversalOrder::Bft => ("bft", bft_order(&graph, &args.start)),
        TraversalOrder::Dft => ("dft", dft_order(&graph, &args.start)),
        TraversalOrder::DftRecursive => ("dft_recursive", dft_recursive_order(&graph, &args.start)),
    };
    let visited = visited.with_context(|| format!("{order} from {}", args.start))?;
    Ok(TraversalReport {
        order,
        start: args.start,
        visited,
    })
}

fn path(args: &PathArgs) -> anyhow::Result<PathReport> {
    let graph = build_graph(&args.graph);
    let (algo, found) = match args.algo {
        PathAlgo::Bfs => ("bfs", bfs_path(&graph, &args.from, &args.to)),
        PathAlgo::Dfs => ("dfs", dfs_path(&graph, &args.from, &args.to)),
        PathAlgo::DfsRecursive => ("dfs_recursive", dfs_path_recursive(&graph, &args.from, &args.to)),
    };
    let path = found.with_context(|| format!("{algo} path {} → {}", args.from, args.to))?;
    Ok(PathReport {
        algo,
        from: args.from,
        to: args.to,
        path,
    })
}

fn ancestor(args: &AncestorArgs) -> anyhow::Result<AncestorReport> {
    let relations: &[(NodeId, NodeId)] = if args.relations.is_empty() {
        &DEMO_RELATIONS
    } else {
        &args.relations
    };
    let ancestor = earliest_ancestor(relations, &args.start)
        .with_context(|| format!("earliest ancestor of {}", args.start))?;
    Ok(AncestorReport {
        start: args.start,
        ancestor,
    })
}

fn social(args: &SocialArgs) -> anyhow::Result<SocialReport> {
    let seed = args.seed.unwrap_or_else(rand::random);
    debug!(seed, users = args.users, avg = args.avg_friendships, "populating social graph");
    let mut rng = StdRng::seed_from_u64(seed);

    let mut graph = SocialGraph::new();
    let populated = match args.strategy {
        PopulateStrategy::Shuffle => graph.populate(args.users, args.avg_friendships, &mut rng),
        PopulateStrategy::Sample => {
            graph.populate_sampled(args.users, args.avg_friendships, &mut rng)
        }
    };
    populated.context("populating social graph")?;

    let mut friendships = BTreeMap::new();
    for id in 1..=graph.user_count() as u64 {
        let mut friends: Vec<u64> = graph.friends(id)?.iter().copied().collect();
        friends.sort_unstable();
        friendships.insert(id, friends);
    }

    let paths = graph
        .all_social_paths(args.user)
        .with_context(|| format!("social paths of user {}", args.user))?
        .into_iter()
        .collect();
    let summary = graph.network_summary(args.user)?;

    Ok(SocialReport {
        friendships,
        paths,
        summary,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph_args(edges: &[(NodeId, NodeId)]) -> GraphArgs {
        GraphArgs {
            edges: edges.to_vec(),
        }
    }

    #[test]
    fn test_demo_graph_shape() {
        let g = build_graph(&graph_args(&[]));
        assert_eq!(g.vertex_count(), 7);
        assert_eq!(g.edge_count(), 10);
    }

    #[test]
    fn test_path_on_demo_graph() {
        let report = path(&PathArgs {
            algo: PathAlgo::Bfs,
            from: 1,
            to: 6,
            graph: graph_args(&[]),
        })
        .unwrap();
        assert_eq!(report.path.unwrap().vertices(), &[1, 2, 4, 6]);
    }

    #[test]
    fn test_traverse_missing_start() {
        let err = traverse(&TraverseArgs {
            order: TraversalOrder::Dft,
            start: 99,
            graph: graph_args(&[(1, 2)]),
        })
        .unwrap_err();
        assert!(format!("{err:#}").contains("vertex not found: 99"));
    }

    #[test]
    fn test_ancestor_default_relations() {
        let report = ancestor(&AncestorArgs {
            relations: vec![],
            start: 6,
        })
        .unwrap();
        assert_eq!(report.ancestor, Some(10));
    }

    #[test]
    fn test_social_seeded() {
        let args = SocialArgs {
            users: 10,
            avg_friendships: 2,
            seed: Some(42),
            user: 1,
            strategy: PopulateStrategy::Shuffle,
        };
        let a = social(&args).unwrap();
        let b = social(&args).unwrap();
        assert_eq!(a.friendships, b.friendships);
        assert_eq!(a.paths[&1].vertices(), &[1]);
        let slots: usize = a.friendships.values().map(Vec::len).sum();
        assert_eq!(slots, 20);
    }
}
