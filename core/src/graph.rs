use std::collections::{HashMap, HashSet};
use std::fmt::Debug;
use std::hash::Hash;

use crate::error::{GraphError, Result};

/// Default vertex identifier.
pub type NodeId = u64;

/// Anything usable as a vertex: hashable, totally ordered, cheap to clone.
pub trait Vertex: Clone + Eq + Hash + Ord + Debug {}

impl<T: Clone + Eq + Hash + Ord + Debug> Vertex for T {}

/// In-memory directed graph: vertex → set of outgoing neighbors.
///
/// Every edge endpoint is also a vertex key. Neighbor sets carry no order,
/// so traversal order among siblings is unspecified.
#[derive(Debug, Clone)]
pub struct Graph<V: Vertex = NodeId> {
    vertices: HashMap<V, HashSet<V>>,
}

impl<V: Vertex> Graph<V> {
    pub fn new() -> Self {
        Self {
            vertices: HashMap::new(),
        }
    }

    /// Pre-allocate for a known vertex count.
    pub fn with_capacity(vertex_count: usize) -> Self {
        Self {
            vertices: HashMap::with_capacity(vertex_count),
        }
    }

    /// Insert a vertex with no neighbors. Re-adding an existing vertex keeps
    /// its edges. Returns true if the vertex is new.
    pub fn add_vertex(&mut self, id: V) -> bool {
        if self.vertices.contains_key(&id) {
            return false;
        }
        self.vertices.insert(id, HashSet::new());
        true
    }

    /// Add a directed edge `from → to`, creating missing endpoints.
    /// Returns true if the edge is new.
    pub fn add_edge(&mut self, from: V, to: V) -> bool {
        self.add_vertex(to.clone());
        self.vertices.entry(from).or_default().insert(to)
    }

    /// Add `a → b` and `b → a`.
    pub fn add_undirected_edge(&mut self, a: V, b: V) -> bool {
        let forward = self.add_edge(a.clone(), b.clone());
        let backward = self.add_edge(b, a);
        forward || backward
    }

    /// Bulk load directed edges.
    pub fn load_edges<I>(&mut self, edges: I)
    where
        I: IntoIterator<Item = (V, V)>,
    {
        for (from, to) in edges {
            self.add_edge(from, to);
        }
    }

    /// Outgoing neighbors of `id`. Unknown vertices are an error so that
    /// lookups on the wrong graph don't pass as "no neighbors".
    pub fn neighbors(&self, id: &V) -> Result<&HashSet<V>> {
        self.vertices
            .get(id)
            .ok_or_else(|| GraphError::vertex_not_found(id))
    }

    pub fn contains(&self, id: &V) -> bool {
        self.vertices.contains_key(id)
    }

    pub fn has_edge(&self, from: &V, to: &V) -> bool {
        self.vertices
            .get(from)
            .is_some_and(|neighbors| neighbors.contains(to))
    }

    pub fn vertices(&self) -> impl Iterator<Item = &V> {
        self.vertices.keys()
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn edge_count(&self) -> usize {
        self.vertices.values().map(|v| v.len()).sum()
    }
}

impl<V: Vertex> Default for Graph<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Vertex> FromIterator<(V, V)> for Graph<V> {
    fn from_iter<I: IntoIterator<Item = (V, V)>>(iter: I) -> Self {
        let mut graph = Graph::new();
        graph.load_edges(iter);
        graph
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_vertex_idempotent() {
        let mut g: Graph = Graph::new();
        assert!(g.add_vertex(1));
        assert!(!g.add_vertex(1));
        assert_eq!(g.vertex_count(), 1);
        assert!(g.neighbors(&1).unwrap().is_empty());
    }

    #[test]
    fn test_readd_vertex_keeps_edges() {
        let mut g: Graph = Graph::new();
        g.add_edge(1, 2);
        g.add_vertex(1);
        assert!(g.has_edge(&1, &2));
        assert_eq!(g.neighbors(&1).unwrap().len(), 1);
    }

    #[test]
    fn test_add_edge_creates_endpoints() {
        let mut g: Graph = Graph::new();
        assert!(g.add_edge(5, 3));
        assert!(g.contains(&5));
        assert!(g.contains(&3));
        assert!(g.neighbors(&3).unwrap().is_empty());
    }

    #[test]
    fn test_edges_are_directed() {
        let mut g: Graph = Graph::new();
        g.add_edge(1, 2);
        assert!(g.has_edge(&1, &2));
        assert!(!g.has_edge(&2, &1));
    }

    #[test]
    fn test_duplicate_edge() {
        let mut g: Graph = Graph::new();
        assert!(g.add_edge(1, 2));
        assert!(!g.add_edge(1, 2));
        assert_eq!(g.edge_count(), 1);
    }

    #[test]
    fn test_undirected_edge() {
        let mut g: Graph = Graph::new();
        assert!(g.add_undirected_edge(1, 2));
        assert!(g.has_edge(&1, &2));
        assert!(g.has_edge(&2, &1));
        assert_eq!(g.edge_count(), 2);
        assert!(!g.add_undirected_edge(2, 1));
    }

    #[test]
    fn test_neighbors_missing_vertex_is_error() {
        let g: Graph = Graph::new();
        assert_eq!(
            g.neighbors(&42),
            Err(GraphError::VertexNotFound {
                vertex: "42".to_string()
            })
        );
    }

    #[test]
    fn test_from_iterator() {
        let g: Graph = [(1, 2), (2, 3), (3, 1)].into_iter().collect();
        assert_eq!(g.vertex_count(), 3);
        assert_eq!(g.edge_count(), 3);
    }

    #[test]
    fn test_string_vertices() {
        let mut g: Graph<String> = Graph::new();
        g.add_edge("a".to_string(), "b".to_string());
        assert!(g.has_edge(&"a".to_string(), &"b".to_string()));
    }
}
