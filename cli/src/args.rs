use clap::{Args, Parser, Subcommand, ValueEnum};

use graph_walk_core::NodeId;

#[derive(Parser, Debug)]
#[command(name = "graph-walk", version, about = "Graph traversal, path search and ancestry toolkit")]
pub struct Cli {
    /// Output format
    #[arg(long, global = true, value_enum, env = "GRAPH_WALK_FORMAT", default_value_t = Format::Human)]
    pub format: Format,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Log filter (e.g. "debug" or "graph_walk_core=trace")
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Human,
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Visit every vertex reachable from a start vertex
    Traverse(TraverseArgs),
    /// Find a path between two vertices
    Path(PathArgs),
    /// Resolve the earliest ancestor over parent:child relations
    Ancestor(AncestorArgs),
    /// Generate a random social network and report one user's extended network
    Social(SocialArgs),
    /// Time traversals on generated graphs
    Bench(BenchArgs),
}

#[derive(Args, Debug)]
pub struct GraphArgs {
    /// Directed edge FROM:TO (repeatable). Without any, the built-in
    /// seven-vertex demo graph is used.
    #[arg(long = "edge", value_name = "FROM:TO", value_parser = parse_pair)]
    pub edges: Vec<(NodeId, NodeId)>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum TraversalOrder {
    Bft,
    Dft,
    DftRecursive,
}

#[derive(Args, Debug)]
pub struct TraverseArgs {
    #[arg(long, value_enum, default_value_t = TraversalOrder::Bft)]
    pub order: TraversalOrder,

    #[arg(long, default_value_t = 1)]
    pub start: NodeId,

    #[command(flatten)]
    pub graph: GraphArgs,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum PathAlgo {
    Bfs,
    Dfs,
    DfsRecursive,
}

#[derive(Args, Debug)]
pub struct PathArgs {
    #[arg(long, value_enum, default_value_t = PathAlgo::Bfs)]
    pub algo: PathAlgo,

    #[arg(long)]
    pub from: NodeId,

    #[arg(long)]
    pub to: NodeId,

    #[command(flatten)]
    pub graph: GraphArgs,
}

#[derive(Args, Debug)]
pub struct AncestorArgs {
    /// Relation PARENT:CHILD (repeatable). Without any, the built-in family
    /// tree is used.
    #[arg(long = "relation", value_name = "PARENT:CHILD", value_parser = parse_pair)]
    pub relations: Vec<(NodeId, NodeId)>,

    #[arg(long)]
    pub start: NodeId,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum PopulateStrategy {
    /// Shuffle every candidate pair and take a prefix
    Shuffle,
    /// Draw random pairs, retrying rejected ones
    Sample,
}

#[derive(Args, Debug)]
pub struct SocialArgs {
    #[arg(long, default_value_t = 10)]
    pub users: usize,

    #[arg(long, default_value_t = 2)]
    pub avg_friendships: usize,

    /// RNG seed; random when omitted
    #[arg(long)]
    pub seed: Option<u64>,

    /// User whose extended network is reported
    #[arg(long, default_value_t = 1)]
    pub user: u64,

    #[arg(long, value_enum, default_value_t = PopulateStrategy::Shuffle)]
    pub strategy: PopulateStrategy,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Shape {
    All,
    /// Single long chain (deepest paths)
    Chain,
    /// Ternary tree (wide frontier)
    Tree,
    /// Uniform random edges, ~10 per vertex
    Random,
}

#[derive(Args, Debug)]
pub struct BenchArgs {
    #[arg(long, value_enum, default_value_t = Shape::All)]
    pub shape: Shape,

    #[arg(long, default_value_t = 100_000)]
    pub nodes: u64,
}

/// Parse `A:B` into a pair of vertex ids.
fn parse_pair(s: &str) -> Result<(NodeId, NodeId), String> {
    let (a, b) = s
        .split_once(':')
        .ok_or_else(|| format!("expected A:B, got '{s}'"))?;
    let parse = |part: &str| {
        part.trim()
            .parse::<NodeId>()
            .map_err(|e| format!("invalid vertex '{part}': {e}"))
    };
    Ok((parse(a)?, parse(b)?))
}
