use std::collections::hash_map::Entry;
use std::collections::VecDeque;

use rayon::prelude::*;
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::graph::Vertex;
use crate::view::GraphView;

/// Ordered vertex sequence from source to target. Empty means no path.
pub type Path = Vec<Vertex>;

/// Route every `(source, target)` pair independently, bounded by
/// `max_depth` hops. Output order matches input order, one path per pair.
///
/// With `parallel` set the pairs are spread over the rayon pool. Each pair
/// owns its search state, so results are identical either way.
pub fn min_cost_routing(
    view: GraphView<'_>,
    pairs: &[(Vertex, Vertex)],
    max_depth: usize,
    parallel: bool,
) -> Vec<Path> {
    let paths: Vec<Path> = if parallel {
        pairs
            .par_iter()
            .map(|&(source, target)| shortest_path(view, source, target, max_depth))
            .collect()
    } else {
        pairs
            .iter()
            .map(|&(source, target)| shortest_path(view, source, target, max_depth))
            .collect()
    };

    debug!(
        pairs = pairs.len(),
        found = paths.iter().filter(|p| !p.is_empty()).count(),
        max_depth,
        parallel,
        "routing batch complete"
    );

    paths
}

/// Depth-bounded BFS shortest path from `source` to `target`.
///
/// Only active vertices are entered. A vertex at depth `max_depth` is never
/// expanded, so the result has at most `max_depth + 1` vertices.
/// Returns an empty path when either endpoint is out of range or inactive,
/// or when `target` is not reachable within the bound.
pub fn shortest_path(view: GraphView<'_>, source: Vertex, target: Vertex, max_depth: usize) -> Path {
    if !view.is_active(source) || !view.is_active(target) {
        return Vec::new();
    }

    if source == target {
        return vec![source];
    }

    if max_depth == 0 {
        return Vec::new();
    }

    // Parent pointers. Sentinel: the source is its own parent.
    let mut parents: FxHashMap<Vertex, Vertex> = FxHashMap::default();
    let mut queue: VecDeque<(Vertex, usize)> = VecDeque::new();

    parents.insert(source, source);
    queue.push_back((source, 0));

    while let Some((current, depth)) = queue.pop_front() {
        if depth >= max_depth {
            continue;
        }

        for next in view.active_neighbors(current) {
            if let Entry::Vacant(slot) = parents.entry(next) {
                slot.insert(current);

                if next == target {
                    return reconstruct_path(&parents, source, target);
                }

                queue.push_back((next, depth + 1));
            }
        }
    }

    Vec::new()
}

/// Walk parent pointers from `target` back to `source`.
///
/// A broken chain yields an empty path rather than a partial one.
fn reconstruct_path(parents: &FxHashMap<Vertex, Vertex>, source: Vertex, target: Vertex) -> Path {
    let mut path = vec![target];
    let mut current = target;

    while current != source {
        match parents.get(&current) {
            Some(&parent) if parent != current && path.len() <= parents.len() => {
                current = parent;
                path.push(current);
            }
            _ => return Vec::new(),
        }
    }

    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::DynamicGraph;

    fn make_path(n: usize) -> DynamicGraph {
        let mut g = DynamicGraph::new(n);
        for i in 0..n - 1 {
            g.add_edge(i, i + 1);
        }
        g
    }

    fn make_two_triangles() -> DynamicGraph {
        let mut g = DynamicGraph::new(6);
        for (u, v) in [(0, 1), (1, 2), (2, 0), (3, 4), (4, 5), (5, 3)] {
            g.add_edge(u, v);
        }
        g
    }

    fn make_grid(side: usize) -> DynamicGraph {
        let mut g = DynamicGraph::new(side * side);
        for r in 0..side {
            for c in 0..side {
                let v = r * side + c;
                if c + 1 < side {
                    g.add_edge(v, v + 1);
                }
                if r + 1 < side {
                    g.add_edge(v, v + side);
                }
            }
        }
        g
    }

    #[test]
    fn test_path_graph_depth_bound() {
        let g = make_path(5);
        assert!(shortest_path(g.view(), 0, 4, 3).is_empty());
        assert_eq!(shortest_path(g.view(), 0, 4, 4), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_disjoint_triangles_no_path() {
        let g = make_two_triangles();
        let paths = min_cost_routing(g.view(), &[(0, 4)], 5, false);
        assert_eq!(paths, vec![Vec::<Vertex>::new()]);
    }

    #[test]
    fn test_within_triangle() {
        let g = make_two_triangles();
        assert_eq!(shortest_path(g.view(), 0, 2, 5), vec![0, 2]);
        assert_eq!(shortest_path(g.view(), 3, 4, 1), vec![3, 4]);
    }

    #[test]
    fn test_self_path() {
        let g = make_path(3);
        assert_eq!(shortest_path(g.view(), 1, 1, 5), vec![1]);
        assert_eq!(shortest_path(g.view(), 1, 1, 0), vec![1]);
    }

    #[test]
    fn test_depth_zero_distinct() {
        let g = make_path(3);
        assert!(shortest_path(g.view(), 0, 1, 0).is_empty());
    }

    #[test]
    fn test_out_of_range_endpoints() {
        let g = make_path(3);
        assert!(shortest_path(g.view(), 0, 99, 5).is_empty());
        assert!(shortest_path(g.view(), 99, 0, 5).is_empty());
    }

    #[test]
    fn test_inactive_endpoint() {
        let mut g = make_path(3);
        g.remove_vertex(2);
        assert!(shortest_path(g.view(), 0, 2, 5).is_empty());
        assert!(shortest_path(g.view(), 2, 2, 5).is_empty());
    }

    #[test]
    fn test_inactive_interior_not_traversed() {
        // 0-1-2 plus detour 0-3-4-2
        let mut g = make_path(3);
        g.add_vertex(4);
        g.add_vertex(3);
        g.add_edge(0, 3);
        g.add_edge(3, 4);
        g.add_edge(4, 2);

        assert_eq!(shortest_path(g.view(), 0, 2, 5), vec![0, 1, 2]);

        // Live lists still name 1, but it must not be entered
        g.remove_vertex(1);
        assert_eq!(shortest_path(g.view(), 0, 2, 5), vec![0, 3, 4, 2]);
        assert!(shortest_path(g.view(), 0, 2, 2).is_empty());
    }

    #[test]
    fn test_grid_shortest_length() {
        let g = make_grid(4);
        let path = shortest_path(g.view(), 0, 15, 10);
        // Manhattan distance 6 => 7 vertices
        assert_eq!(path.len(), 7);
        assert_eq!(path.first(), Some(&0));
        assert_eq!(path.last(), Some(&15));
        for w in path.windows(2) {
            assert!(g.neighbors(w[0]).contains(&w[1]));
        }
    }

    #[test]
    fn test_cycle_no_infinite_loop() {
        let mut g = DynamicGraph::new(4);
        for i in 0..4 {
            g.add_edge(i, (i + 1) % 4);
        }
        assert_eq!(shortest_path(g.view(), 0, 2, 5).len(), 3);
    }

    #[test]
    fn test_batch_order_preserved() {
        let g = make_path(5);
        let pairs = [(0, 4), (4, 0), (2, 2), (0, 9), (1, 3)];
        let paths = min_cost_routing(g.view(), &pairs, 5, false);
        assert_eq!(
            paths,
            vec![
                vec![0, 1, 2, 3, 4],
                vec![4, 3, 2, 1, 0],
                vec![2],
                vec![],
                vec![1, 2, 3],
            ]
        );
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let g = make_grid(8);
        let pairs: Vec<(Vertex, Vertex)> = (0..64).map(|i| (i, 63 - i)).collect();
        for depth in [0, 3, 7, 14] {
            let seq = min_cost_routing(g.view(), &pairs, depth, false);
            let par = min_cost_routing(g.view(), &pairs, depth, true);
            assert_eq!(seq, par);
        }
    }

    #[test]
    fn test_empty_batch() {
        let g = make_path(2);
        assert!(min_cost_routing(g.view(), &[], 5, true).is_empty());
    }

    #[test]
    fn test_reconstruct_broken_chain() {
        let mut parents = FxHashMap::default();
        parents.insert(0, 0);
        parents.insert(2, 1);
        assert!(reconstruct_path(&parents, 0, 2).is_empty());
    }
}
