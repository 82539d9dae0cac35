use std::collections::{hash_set, HashMap, HashSet, VecDeque};
use std::iter;

use tracing::{debug, trace};

use crate::error::Result;
use crate::graph::{Graph, Vertex};
use crate::path::Path;

/// Shortest path (in edges) from `source` to `destination` using BFS.
///
/// The frontier holds partial paths. Paths come off the queue in
/// non-decreasing length, so the first one ending at `destination` is a
/// shortest one.
///
/// Returns `Ok(None)` when `destination` is unreachable, including when it
/// is not in the graph. Fails only if `source` is absent and differs from
/// `destination`.
pub fn bfs_path<V: Vertex>(graph: &Graph<V>, source: &V, destination: &V) -> Result<Option<Path<V>>> {
    if source == destination {
        return Ok(Some(Path::start(source.clone())));
    }
    graph.neighbors(source)?;

    let mut visited: HashSet<V> = HashSet::new();
    let mut queue: VecDeque<Path<V>> = VecDeque::new();
    queue.push_back(Path::start(source.clone()));

    while let Some(path) = queue.pop_front() {
        let current = path.last();
        if current == destination {
            debug!(source = ?source, destination = ?destination, found = true, hops = path.hops(), visited = visited.len(), "bfs_path complete");
            return Ok(Some(path));
        }
        if !visited.insert(current.clone()) {
            continue;
        }
        for neighbor in graph.neighbors(current)? {
            if !visited.contains(neighbor) {
                queue.push_back(path.extended(neighbor.clone()));
            }
        }
    }

    debug!(source = ?source, destination = ?destination, found = false, visited = visited.len(), "bfs_path complete");
    Ok(None)
}

/// Some path from `source` to `destination` in iterative depth-first order.
/// Not necessarily the shortest.
///
/// A vertex is expanded only the first time it is popped, which bounds the
/// work on cyclic graphs.
pub fn dfs_path<V: Vertex>(graph: &Graph<V>, source: &V, destination: &V) -> Result<Option<Path<V>>> {
    if source == destination {
        return Ok(Some(Path::start(source.clone())));
    }
    graph.neighbors(source)?;

    let mut visited: HashSet<V> = HashSet::new();
    let mut stack: Vec<Path<V>> = vec![Path::start(source.clone())];

    while let Some(path) = stack.pop() {
        let current = path.last();
        if current == destination {
            debug!(source = ?source, destination = ?destination, found = true, hops = path.hops(), visited = visited.len(), "dfs_path complete");
            return Ok(Some(path));
        }
        if !visited.insert(current.clone()) {
            continue;
        }
        for neighbor in graph.neighbors(current)? {
            if !visited.contains(neighbor) {
                stack.push(path.extended(neighbor.clone()));
            }
        }
    }

    debug!(source = ?source, destination = ?destination, found = false, visited = visited.len(), "dfs_path complete");
    Ok(None)
}

/// Some path from `source` to `destination` in recursive depth-first order.
///
/// Neighbors are tried in iteration order; a vertex is marked visited when
/// entered and a branch that runs out of unvisited neighbors is abandoned
/// for the next sibling. The returned path is exactly the branch that
/// reached `destination`, never picking up vertices of failed branches.
///
/// Each stack frame is one vertex of the current branch together with its
/// remaining neighbors, so depth costs heap instead of call stack.
pub fn dfs_path_recursive<V: Vertex>(
    graph: &Graph<V>,
    source: &V,
    destination: &V,
) -> Result<Option<Path<V>>> {
    if source == destination {
        return Ok(Some(Path::start(source.clone())));
    }

    let mut frames: Vec<(&V, hash_set::Iter<'_, V>)> =
        vec![(source, graph.neighbors(source)?.iter())];
    let mut visited: HashSet<V> = HashSet::new();
    visited.insert(source.clone());
    let mut found = None;

    while let Some((_, neighbors)) = frames.last_mut() {
        match neighbors.find(|n| !visited.contains(*n)) {
            Some(next) => {
                visited.insert(next.clone());
                if next == destination {
                    let branch = frames.iter().map(|(v, _)| (*v).clone());
                    let vertices = branch.chain(iter::once(next.clone())).collect();
                    found = Some(Path::from_vertices(vertices));
                    break;
                }
                frames.push((next, graph.neighbors(next)?.iter()));
            }
            None => {
                if let Some((dead_end, _)) = frames.pop() {
                    trace!(vertex = ?dead_end, "dfs_path_recursive backtrack");
                }
            }
        }
    }

    debug!(
        source = ?source,
        destination = ?destination,
        found = found.is_some(),
        hops = found.as_ref().map(Path::hops),
        visited = visited.len(),
        "dfs_path_recursive complete"
    );
    Ok(found)
}

/// First-discovered shortest path from `source` to every reachable vertex.
///
/// Same loop as [`bfs_path`] without an early exit: runs until the frontier
/// is empty and records the path of each vertex when it is first dequeued.
/// The result includes `source` itself mapped to `[source]`.
pub fn shortest_paths_from<V: Vertex>(graph: &Graph<V>, source: &V) -> Result<HashMap<V, Path<V>>> {
    graph.neighbors(source)?;

    let mut paths: HashMap<V, Path<V>> = HashMap::new();
    let mut queue: VecDeque<Path<V>> = VecDeque::new();
    queue.push_back(Path::start(source.clone()));

    while let Some(path) = queue.pop_front() {
        let current = path.last().clone();
        if paths.contains_key(&current) {
            continue;
        }
        for neighbor in graph.neighbors(&current)? {
            if !paths.contains_key(neighbor) {
                queue.push_back(path.extended(neighbor.clone()));
            }
        }
        paths.insert(current, path);
    }

    debug!(source = ?source, reached = paths.len(), "shortest_paths_from complete");
    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GraphError;
    use crate::graph::NodeId;
    use crate::traversal::tests::{make_chain, make_cycle, make_walkthrough};

    type Finder = fn(&Graph, &NodeId, &NodeId) -> Result<Option<Path<NodeId>>>;

    const FINDERS: [(&str, Finder); 3] = [
        ("bfs", bfs_path),
        ("dfs", dfs_path),
        ("dfs_recursive", dfs_path_recursive),
    ];

    fn make_diamond_with_tail() -> Graph {
        // 0 → 1 → 2 → 3 → 4 and a shortcut 0 → 3
        [(0, 1), (1, 2), (2, 3), (3, 4), (0, 3)].into_iter().collect()
    }

    #[test]
    fn test_bfs_walkthrough_shortest() {
        let g = make_walkthrough();
        let path = bfs_path(&g, &1, &6).unwrap().unwrap();
        assert_eq!(path.vertices(), &[1, 2, 4, 6]);
    }

    #[test]
    fn test_dfs_walkthrough_valid_paths() {
        let g = make_walkthrough();
        let expected: [&[NodeId]; 2] = [&[1, 2, 4, 6], &[1, 2, 4, 7, 6]];
        for path in [
            dfs_path(&g, &1, &6).unwrap().unwrap(),
            dfs_path_recursive(&g, &1, &6).unwrap().unwrap(),
        ] {
            assert!(expected.contains(&path.vertices()), "unexpected {:?}", path);
        }
    }

    #[test]
    fn test_bfs_takes_shortcut() {
        let g = make_diamond_with_tail();
        let path = bfs_path(&g, &0, &4).unwrap().unwrap();
        assert_eq!(path.vertices(), &[0, 3, 4]);
        assert_eq!(path.hops(), 2);
    }

    #[test]
    fn test_all_finders_return_valid_paths() {
        let g = make_diamond_with_tail();
        for (name, find) in FINDERS {
            let path = find(&g, &0, &4).unwrap().unwrap();
            assert_eq!(path.source(), &0, "{name}");
            assert_eq!(path.destination(), &4, "{name}");
            assert!(path.is_valid_in(&g), "{name}: {:?}", path);
        }
    }

    #[test]
    fn test_self_path_all_finders() {
        let g = make_chain(3);
        for (name, find) in FINDERS {
            let path = find(&g, &1, &1).unwrap().unwrap();
            assert_eq!(path.vertices(), &[1], "{name}");
            assert_eq!(path.hops(), 0, "{name}");
        }
    }

    #[test]
    fn test_no_path_between_isolated_vertices() {
        let mut g: Graph = Graph::new();
        g.add_vertex(1);
        g.add_vertex(2);
        for (name, find) in FINDERS {
            assert_eq!(find(&g, &1, &2).unwrap(), None, "{name}");
        }
    }

    #[test]
    fn test_no_path_against_direction() {
        let g = make_chain(4);
        for (name, find) in FINDERS {
            assert_eq!(find(&g, &3, &0).unwrap(), None, "{name}");
        }
    }

    #[test]
    fn test_destination_not_in_graph_is_no_path() {
        let g = make_chain(3);
        for (name, find) in FINDERS {
            assert_eq!(find(&g, &0, &99).unwrap(), None, "{name}");
        }
    }

    #[test]
    fn test_source_not_in_graph_is_error() {
        let g = make_chain(3);
        for (name, find) in FINDERS {
            let err = find(&g, &99, &0).unwrap_err();
            assert!(matches!(err, GraphError::VertexNotFound { .. }), "{name}");
        }
    }

    #[test]
    fn test_cyclic_graph_terminates_without_path() {
        // Dense cycle with an unreachable target: the iterative DFS must not
        // keep growing paths around the loop.
        let mut g = make_cycle(6);
        for i in 0..6 {
            g.add_edge(i, (i + 2) % 6);
            g.add_edge(i, (i + 3) % 6);
        }
        g.add_vertex(100);
        for (name, find) in FINDERS {
            assert_eq!(find(&g, &0, &100).unwrap(), None, "{name}");
        }
    }

    #[test]
    fn test_cycle_path_found() {
        let g = make_cycle(5);
        for (name, find) in FINDERS {
            let path = find(&g, &3, &1).unwrap().unwrap();
            assert_eq!(path.vertices(), &[3, 4, 0, 1], "{name}");
        }
    }

    #[test]
    fn test_recursive_path_has_no_dead_branches() {
        // 0 → {1, 2}; 1 is a dead end, the target hangs off 2.
        let g: Graph = [(0, 1), (0, 2), (2, 3)].into_iter().collect();
        let path = dfs_path_recursive(&g, &0, &3).unwrap().unwrap();
        assert_eq!(path.vertices(), &[0, 2, 3]);
    }

    #[test]
    fn test_recursive_path_on_long_chain() {
        let g = make_chain(200_001);
        let path = dfs_path_recursive(&g, &0, &200_000).unwrap().unwrap();
        assert_eq!(path.hops(), 200_000);
        assert_eq!(path.destination(), &200_000);
    }

    #[test]
    fn test_recursive_path_long_chain_dead_end() {
        let g = make_chain(200_001);
        assert_eq!(dfs_path_recursive(&g, &0, &200_001).unwrap(), None);
    }

    #[test]
    fn test_shortest_paths_from_walkthrough() {
        let g = make_walkthrough();
        let paths = shortest_paths_from(&g, &1).unwrap();
        assert_eq!(paths.len(), 7);
        assert_eq!(paths[&1].vertices(), &[1]);
        assert_eq!(paths[&2].vertices(), &[1, 2]);
        assert_eq!(paths[&6].vertices(), &[1, 2, 4, 6]);
        assert_eq!(paths[&7].vertices(), &[1, 2, 4, 7]);
        assert_eq!(paths[&5].vertices(), &[1, 2, 3, 5]);
    }

    #[test]
    fn test_shortest_paths_from_matches_bfs_length() {
        let g = make_diamond_with_tail();
        let paths = shortest_paths_from(&g, &0).unwrap();
        for (vertex, path) in &paths {
            let single = bfs_path(&g, &0, vertex).unwrap().unwrap();
            assert_eq!(path.hops(), single.hops());
            assert!(path.is_valid_in(&g));
        }
    }

    #[test]
    fn test_shortest_paths_from_skips_unreachable() {
        let mut g = make_chain(3);
        g.add_edge(7, 0);
        let paths = shortest_paths_from(&g, &0).unwrap();
        assert_eq!(paths.len(), 3);
        assert!(!paths.contains_key(&7));
    }

    #[test]
    fn test_shortest_paths_from_missing_source() {
        let g = make_chain(3);
        assert!(shortest_paths_from(&g, &42).is_err());
    }

    mod events {
        use std::io;
        use std::sync::{Arc, Mutex};

        use tracing_subscriber::fmt::MakeWriter;

        use super::*;

        #[derive(Clone, Default)]
        struct Captured(Arc<Mutex<Vec<u8>>>);

        impl io::Write for Captured {
            fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
                self.0.lock().unwrap().extend_from_slice(buf);
                Ok(buf.len())
            }

            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        impl<'a> MakeWriter<'a> for Captured {
            type Writer = Captured;

            fn make_writer(&'a self) -> Self::Writer {
                self.clone()
            }
        }

        fn logged(f: impl FnOnce()) -> String {
            let captured = Captured::default();
            let subscriber = tracing_subscriber::fmt()
                .with_writer(captured.clone())
                .with_max_level(tracing::Level::DEBUG)
                .with_ansi(false)
                .finish();
            tracing::subscriber::with_default(subscriber, f);
            let bytes = captured.0.lock().unwrap().clone();
            String::from_utf8(bytes).unwrap()
        }

        #[test]
        fn test_search_events_carry_found() {
            let g = make_chain(4);
            for (name, find) in FINDERS {
                let hit = logged(|| {
                    find(&g, &0, &3).unwrap();
                });
                assert!(hit.contains("found=true"), "{name}: {hit}");

                let miss = logged(|| {
                    find(&g, &3, &0).unwrap();
                });
                assert!(miss.contains("found=false"), "{name}: {miss}");
            }
        }
    }
}
