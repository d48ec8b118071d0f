//! Property tests for the graph engine.
//!
//! Random edit scripts are replayed onto a small graph, then the
//! engine's answers are checked against brute-force references.

use std::collections::VecDeque;

use dyngraph_core::{verify_k_core, DynamicGraph, GraphView, Vertex};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    AddVertex(usize),
    RemoveVertex(usize),
    AddEdge(usize, usize),
    RemoveEdge(usize, usize),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        1 => (0usize..24).prop_map(Op::AddVertex),
        1 => (0usize..64).prop_map(Op::RemoveVertex),
        6 => (0usize..64, 0usize..64).prop_map(|(u, v)| Op::AddEdge(u, v)),
        2 => (0usize..64, 0usize..64).prop_map(|(u, v)| Op::RemoveEdge(u, v)),
    ]
}

/// Apply `op`, folding handles into range so every call is valid.
fn apply(g: &mut DynamicGraph, op: &Op) {
    let n = g.vertex_count();
    match *op {
        Op::AddVertex(v) => g.add_vertex(v),
        Op::RemoveVertex(v) if n > 0 => g.remove_vertex(v % n),
        Op::AddEdge(u, v) if n > 0 => g.add_edge(u % n, v % n),
        Op::RemoveEdge(u, v) if n > 0 => g.remove_edge(u % n, v % n),
        _ => {}
    }
}

fn build(n: usize, ops: &[Op]) -> DynamicGraph {
    let mut g = DynamicGraph::new(n);
    for op in ops {
        apply(&mut g, op);
    }
    g
}

/// Unbounded BFS distance over active vertices.
fn reference_distance(view: GraphView<'_>, s: Vertex, t: Vertex) -> Option<usize> {
    if !view.is_active(s) || !view.is_active(t) {
        return None;
    }
    let mut dist = vec![usize::MAX; view.vertex_count()];
    let mut queue = VecDeque::new();
    dist[s] = 0;
    queue.push_back(s);
    while let Some(u) = queue.pop_front() {
        if u == t {
            return Some(dist[u]);
        }
        for v in view.active_neighbors(u) {
            if dist[v] == usize::MAX {
                dist[v] = dist[u] + 1;
                queue.push_back(v);
            }
        }
    }
    None
}

/// Core numbers by repeated threshold pruning.
fn reference_cores(view: GraphView<'_>) -> Vec<usize> {
    let n = view.vertex_count();
    let mut cores = vec![0usize; n];
    for k in 1..=n {
        let mut alive: Vec<bool> = (0..n).map(|v| view.is_active(v)).collect();
        loop {
            let doomed: Vec<Vertex> = (0..n)
                .filter(|&v| alive[v])
                .filter(|&v| view.active_neighbors(v).filter(|&u| alive[u]).count() < k)
                .collect();
            if doomed.is_empty() {
                break;
            }
            for v in doomed {
                alive[v] = false;
            }
        }
        if !alive.iter().any(|&a| a) {
            break;
        }
        for v in 0..n {
            if alive[v] {
                cores[v] = k;
            }
        }
    }
    cores
}

proptest! {
    #[test]
    fn prop_live_adjacency_symmetric(
        n in 1usize..16,
        ops in prop::collection::vec(op_strategy(), 0..80),
    ) {
        let g = build(n, &ops);
        let view = g.live_view();
        for u in 0..g.vertex_count() {
            for &v in view.neighbors(u) {
                prop_assert!(view.neighbors(v).contains(&u));
            }
            let mut sorted = view.neighbors(u).to_vec();
            sorted.sort_unstable();
            sorted.dedup();
            prop_assert_eq!(sorted.len(), view.neighbors(u).len());
        }
    }

    #[test]
    fn prop_edge_edits_idempotent(
        n in 2usize..16,
        ops in prop::collection::vec(op_strategy(), 0..60),
        u in 0usize..16,
        v in 0usize..16,
    ) {
        let mut once = build(n, &ops);
        let mut twice = build(n, &ops);
        let len = once.vertex_count();
        let (u, v) = (u % len, v % len);

        once.add_edge(u, v);
        twice.add_edge(u, v);
        twice.add_edge(u, v);
        for w in 0..len {
            prop_assert_eq!(once.neighbors(w), twice.neighbors(w));
        }

        once.remove_edge(u, v);
        twice.remove_edge(u, v);
        twice.remove_edge(u, v);
        for w in 0..len {
            prop_assert_eq!(once.neighbors(w), twice.neighbors(w));
        }
    }

    #[test]
    fn prop_snapshot_isolation(
        n in 1usize..16,
        before in prop::collection::vec(op_strategy(), 0..60),
        after in prop::collection::vec(op_strategy(), 1..60),
    ) {
        let mut g = build(n, &before);
        g.snapshot();

        let frozen_n = g.vertex_count();
        let pairs: Vec<(Vertex, Vertex)> = (0..frozen_n)
            .flat_map(|s| (0..frozen_n).map(move |t| (s, t)))
            .collect();
        let neighbors: Vec<Vec<Vertex>> = (0..frozen_n).map(|v| g.neighbors(v).to_vec()).collect();
        let paths = g.min_cost_routing(&pairs, 3);
        let cores = g.k_cores();

        for op in &after {
            apply(&mut g, op);
        }

        for v in 0..frozen_n {
            prop_assert_eq!(g.neighbors(v), neighbors[v].as_slice());
        }
        prop_assert_eq!(g.min_cost_routing(&pairs, 3), paths);
        prop_assert_eq!(g.k_cores(), cores);
    }

    #[test]
    fn prop_routing_valid_and_minimal(
        n in 1usize..16,
        ops in prop::collection::vec(op_strategy(), 0..80),
        take_snapshot in any::<bool>(),
        max_depth in 0usize..6,
    ) {
        let mut g = build(n, &ops);
        if take_snapshot {
            g.snapshot();
        }
        let view = g.view();
        let len = view.vertex_count();
        let pairs: Vec<(Vertex, Vertex)> = (0..len)
            .flat_map(|s| (0..len).map(move |t| (s, t)))
            .collect();
        let paths = g.min_cost_routing(&pairs, max_depth);
        prop_assert_eq!(paths.len(), pairs.len());

        for (&(s, t), path) in pairs.iter().zip(&paths) {
            match reference_distance(view, s, t) {
                Some(d) if d <= max_depth => {
                    prop_assert_eq!(path.len(), d + 1);
                    prop_assert_eq!(path.first(), Some(&s));
                    prop_assert_eq!(path.last(), Some(&t));
                    for &v in path {
                        prop_assert!(view.is_active(v));
                    }
                    for w in path.windows(2) {
                        prop_assert!(view.neighbors(w[0]).contains(&w[1]));
                    }
                }
                _ => prop_assert!(path.is_empty()),
            }
        }
    }

    #[test]
    fn prop_k_cores_match_reference(
        n in 1usize..14,
        ops in prop::collection::vec(op_strategy(), 0..90),
        take_snapshot in any::<bool>(),
    ) {
        let mut g = build(n, &ops);
        if take_snapshot {
            g.snapshot();
        }
        let view = g.view();
        let cores = g.k_cores();
        prop_assert_eq!(cores.len(), view.vertex_count());
        prop_assert_eq!(&cores, &reference_cores(view));

        for c in 1..=g.degeneracy() {
            prop_assert!(verify_k_core(view, c, &g.k_core(c)));
        }
    }
}
