use std::collections::{hash_set, HashSet, VecDeque};

use tracing::{debug, trace};

use crate::error::Result;
use crate::graph::{Graph, Vertex};

/// Breadth-first traversal from `start`, calling `visit` once per reachable
/// vertex in visitation order.
///
/// The frontier may hold the same vertex more than once (enqueued from
/// several parents before being dequeued); duplicates are dropped when
/// dequeued, so each vertex is emitted on its first dequeue only.
pub fn bft<V, F>(graph: &Graph<V>, start: &V, mut visit: F) -> Result<()>
where
    V: Vertex,
    F: FnMut(&V),
{
    graph.neighbors(start)?;

    let mut visited: HashSet<V> = HashSet::new();
    let mut queue: VecDeque<V> = VecDeque::new();
    queue.push_back(start.clone());

    while let Some(current) = queue.pop_front() {
        if !visited.insert(current.clone()) {
            continue;
        }
        visit(&current);
        for neighbor in graph.neighbors(&current)? {
            if !visited.contains(neighbor) {
                queue.push_back(neighbor.clone());
            }
        }
    }

    debug!(start = ?start, visited = visited.len(), "bft complete");
    Ok(())
}

/// Depth-first traversal with an explicit stack. Same duplicate policy as
/// [`bft`], LIFO instead of FIFO.
pub fn dft<V, F>(graph: &Graph<V>, start: &V, mut visit: F) -> Result<()>
where
    V: Vertex,
    F: FnMut(&V),
{
    graph.neighbors(start)?;

    let mut visited: HashSet<V> = HashSet::new();
    let mut stack: Vec<V> = vec![start.clone()];

    while let Some(current) = stack.pop() {
        if !visited.insert(current.clone()) {
            continue;
        }
        visit(&current);
        for neighbor in graph.neighbors(&current)? {
            if !visited.contains(neighbor) {
                stack.push(neighbor.clone());
            }
        }
    }

    debug!(start = ?start, visited = visited.len(), "dft complete");
    Ok(())
}

/// Depth-first traversal in recursive order.
///
/// Each vertex is entered once: its neighbors are tried in iteration order
/// and only unvisited ones are descended into, exactly as a recursive
/// descent would. The descent runs on an explicit stack of neighbor
/// iterators, so a long chain cannot exhaust the call stack. Visits the
/// same set as [`dft`], possibly in a different order.
pub fn dft_recursive<V, F>(graph: &Graph<V>, start: &V, mut visit: F) -> Result<()>
where
    V: Vertex,
    F: FnMut(&V),
{
    let mut frames: Vec<hash_set::Iter<'_, V>> = vec![graph.neighbors(start)?.iter()];
    let mut visited: HashSet<V> = HashSet::new();
    visit(start);
    visited.insert(start.clone());

    while let Some(neighbors) = frames.last_mut() {
        match neighbors.find(|n| !visited.contains(*n)) {
            Some(next) => {
                visit(next);
                visited.insert(next.clone());
                trace!(vertex = ?next, depth = frames.len(), "dft_recursive enter");
                frames.push(graph.neighbors(next)?.iter());
            }
            None => {
                frames.pop();
            }
        }
    }

    debug!(start = ?start, visited = visited.len(), "dft_recursive complete");
    Ok(())
}

/// [`bft`] collected into a vector.
pub fn bft_order<V: Vertex>(graph: &Graph<V>, start: &V) -> Result<Vec<V>> {
    let mut order = Vec::new();
    bft(graph, start, |v| order.push(v.clone()))?;
    Ok(order)
}

/// [`dft`] collected into a vector.
pub fn dft_order<V: Vertex>(graph: &Graph<V>, start: &V) -> Result<Vec<V>> {
    let mut order = Vec::new();
    dft(graph, start, |v| order.push(v.clone()))?;
    Ok(order)
}

/// [`dft_recursive`] collected into a vector.
pub fn dft_recursive_order<V: Vertex>(graph: &Graph<V>, start: &V) -> Result<Vec<V>> {
    let mut order = Vec::new();
    dft_recursive(graph, start, |v| order.push(v.clone()))?;
    Ok(order)
}

/// Every vertex reachable from `start`, `start` included.
pub fn reachable<V: Vertex>(graph: &Graph<V>, start: &V) -> Result<HashSet<V>> {
    let mut seen = HashSet::new();
    bft(graph, start, |v| {
        seen.insert(v.clone());
    })?;
    Ok(seen)
}
