//! graph-walk-core: in-memory graph traversal and path search.
//!
//! A small directed-graph store with breadth-first and depth-first
//! traversal (iterative and recursive), BFS shortest path and DFS path
//! search between two vertices, all-destinations BFS, an earliest-ancestor
//! query over parent/child relations, and a social-network simulation built
//! on the same search primitives.
//!
//! Everything is single-threaded and synchronous. Searches borrow the graph
//! immutably and keep their frontier and visited state per call.

mod ancestor;
mod error;
mod graph;
mod path;
mod search;
pub mod social;
mod traversal;

pub use ancestor::{earliest_ancestor, AncestorIndex};
pub use error::{GraphError, Result};
pub use graph::{Graph, NodeId, Vertex};
pub use path::Path;
pub use search::{bfs_path, dfs_path, dfs_path_recursive, shortest_paths_from};
pub use social::{NetworkSummary, SocialGraph, User, UserId};
pub use traversal::{
    bft, bft_order, dft, dft_order, dft_recursive, dft_recursive_order, reachable,
};
