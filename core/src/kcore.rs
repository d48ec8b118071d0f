//! k-core decomposition by degeneracy peeling.
//!
//! Batagelj–Zaveršnik peeling driven by a binary min-heap with lazy
//! deletion: a degree change pushes a fresh `(degree, vertex)` entry and
//! the superseded one stays queued until it is popped and discarded.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use rustc_hash::FxHashSet;
use tracing::debug;

use crate::graph::Vertex;
use crate::view::GraphView;

/// Core number of every handle in `view`, active or not.
///
/// Inactive vertices get 0. Edges to inactive neighbors are ignored.
pub fn core_numbers(view: GraphView<'_>) -> Vec<usize> {
    let n = view.vertex_count();
    let mut degree = vec![0usize; n];
    let mut core = vec![0usize; n];
    let mut finalized = vec![false; n];

    let mut heap: BinaryHeap<Reverse<(usize, Vertex)>> = BinaryHeap::with_capacity(n);
    for v in 0..n {
        if view.is_active(v) {
            degree[v] = view.active_degree(v);
            heap.push(Reverse((degree[v], v)));
        }
    }

    let mut stale = 0usize;
    let mut peeled = 0usize;

    while let Some(Reverse((deg_v, v))) = heap.pop() {
        if finalized[v] || deg_v != degree[v] {
            stale += 1;
            continue;
        }

        finalized[v] = true;
        core[v] = deg_v;
        peeled += 1;

        for u in view.active_neighbors(v) {
            // Never drop a neighbor below the level already peeled.
            if finalized[u] || degree[u] <= deg_v {
                continue;
            }
            degree[u] -= 1;
            heap.push(Reverse((degree[u], u)));
        }
    }

    debug!(
        vertices = n,
        peeled,
        stale_discarded = stale,
        degeneracy = core.iter().copied().max().unwrap_or(0),
        "k-core decomposition complete"
    );

    core
}

/// Active vertices whose core number is at least `k`, ascending.
pub fn k_core_members(view: GraphView<'_>, cores: &[usize], k: usize) -> Vec<Vertex> {
    cores
        .iter()
        .enumerate()
        .filter(|&(v, &c)| c >= k && view.is_active(v))
        .map(|(v, _)| v)
        .collect()
}

/// Largest core number, 0 for an empty or edgeless graph.
pub fn degeneracy(cores: &[usize]) -> usize {
    cores.iter().copied().max().unwrap_or(0)
}

/// Check that every vertex in `members` has at least `k` active neighbors
/// inside `members`. An empty set is trivially a valid k-core.
pub fn verify_k_core(view: GraphView<'_>, k: usize, members: &[Vertex]) -> bool {
    let set: FxHashSet<Vertex> = members.iter().copied().collect();

    members.iter().all(|&v| {
        view.is_active(v) && view.active_neighbors(v).filter(|u| set.contains(u)).count() >= k
    })
}
