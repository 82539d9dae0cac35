use serde::Serialize;

use crate::graph::{Graph, Vertex};

/// A sequence of vertices from a source to a destination.
///
/// Built only by the search functions, read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Path<V: Vertex> {
    vertices: Vec<V>,
}

impl<V: Vertex> Path<V> {
    pub(crate) fn start(source: V) -> Self {
        Self {
            vertices: vec![source],
        }
    }

    /// `vertices` must be non-empty.
    pub(crate) fn from_vertices(vertices: Vec<V>) -> Self {
        debug_assert!(!vertices.is_empty());
        Self { vertices }
    }

    /// Copy of this path with `next` appended.
    pub(crate) fn extended(&self, next: V) -> Self {
        let mut vertices = Vec::with_capacity(self.vertices.len() + 1);
        vertices.extend_from_slice(&self.vertices);
        vertices.push(next);
        Self { vertices }
    }

    pub(crate) fn last(&self) -> &V {
        // Paths are never empty: every path starts from `start`.
        &self.vertices[self.vertices.len() - 1]
    }

    pub fn source(&self) -> &V {
        &self.vertices[0]
    }

    pub fn destination(&self) -> &V {
        self.last()
    }

    /// Number of edges on the path.
    pub fn hops(&self) -> usize {
        self.vertices.len() - 1
    }

    /// Number of vertices on the path.
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn vertices(&self) -> &[V] {
        &self.vertices
    }

    pub fn contains(&self, vertex: &V) -> bool {
        self.vertices.contains(vertex)
    }

    /// True if every consecutive pair is joined by an edge of `graph`.
    pub fn is_valid_in(&self, graph: &Graph<V>) -> bool {
        graph.contains(self.source())
            && self
                .vertices
                .windows(2)
                .all(|pair| graph.has_edge(&pair[0], &pair[1]))
    }

    pub fn into_vec(self) -> Vec<V> {
        self.vertices
    }
}
