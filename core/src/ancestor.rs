use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::error::{GraphError, Result};
use crate::graph::Vertex;

/// Child → parents index built from `(parent, child)` relation pairs.
#[derive(Debug, Clone)]
pub struct AncestorIndex<V: Vertex> {
    parents: HashMap<V, HashSet<V>>,
    vertex_count: usize,
}

impl<V: Vertex> AncestorIndex<V> {
    pub fn from_relations<'a, I>(relations: I) -> Self
    where
        I: IntoIterator<Item = &'a (V, V)>,
        V: 'a,
    {
        let mut parents: HashMap<V, HashSet<V>> = HashMap::new();
        let mut seen: HashSet<&V> = HashSet::new();
        for (parent, child) in relations {
            parents.entry(child.clone()).or_default().insert(parent.clone());
            seen.insert(parent);
            seen.insert(child);
        }
        Self {
            parents,
            vertex_count: seen.len(),
        }
    }

    /// Recorded parents of `child`, if any.
    pub fn parents(&self, child: &V) -> Option<&HashSet<V>> {
        self.parents.get(child)
    }

    pub fn has_parents(&self, child: &V) -> bool {
        self.parents.contains_key(child)
    }

    /// Number of distinct vertices named by the relations.
    pub fn len(&self) -> usize {
        self.vertex_count
    }

    pub fn is_empty(&self) -> bool {
        self.vertex_count == 0
    }

    /// The deepest ancestor of `start`; the smallest id wins among ancestors
    /// at the same depth. `None` when `start` has no parents.
    pub fn earliest(&self, start: &V) -> Result<Option<V>> {
        if !self.has_parents(start) {
            return Ok(None);
        }

        let mut stack: Vec<(&V, usize)> = vec![(start, 0)];
        let mut best: (usize, &V) = (0, start);

        while let Some((node, depth)) = stack.pop() {
            // Any chain longer than the vertex count must revisit a vertex.
            if depth > self.vertex_count {
                return Err(GraphError::CyclicAncestry {
                    vertex: format!("{node:?}"),
                });
            }

            let (max_depth, best_id) = best;
            if depth > max_depth || (depth == max_depth && node < best_id) {
                best = (depth, node);
            }

            if let Some(parents) = self.parents.get(node) {
                stack.extend(parents.iter().map(|parent| (parent, depth + 1)));
            }
        }

        debug!(start = ?start, ancestor = ?best.1, depth = best.0, "earliest ancestor resolved");
        Ok(Some(best.1.clone()))
    }
}

/// Earliest known ancestor of `start` given `(parent, child)` relations.
///
/// Depth dominates: the ancestor furthest from `start` wins, and the
/// smallest id breaks ties at equal depth. Returns `Ok(None)` if `start` has
/// no recorded parents. Relations must be acyclic; a cycle reachable from
/// `start` yields [`GraphError::CyclicAncestry`].
pub fn earliest_ancestor<V: Vertex>(relations: &[(V, V)], start: &V) -> Result<Option<V>> {
    AncestorIndex::from_relations(relations).earliest(start)
}
