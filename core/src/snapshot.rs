use crate::config::DEFAULT_MAX_DEPTH;
use crate::graph::Vertex;
use crate::kcore;
use crate::routing::{self, Path};
use crate::view::GraphView;

/// Immutable point-in-time copy of the graph.
///
/// Liveness is frozen together with the adjacency lists. Inactive vertices
/// are fully isolated: their own lists are empty and no active vertex lists
/// them as a neighbor.
#[derive(Debug, Clone)]
pub struct Snapshot {
    adjacency: Vec<Vec<Vertex>>,
    active: Vec<bool>,
}

impl Snapshot {
    pub(crate) fn capture(adjacency: &[Vec<Vertex>], active: &[bool]) -> Self {
        let adjacency = adjacency
            .iter()
            .enumerate()
            .map(|(v, list)| {
                if active[v] {
                    list.iter().copied().filter(|&u| active[u]).collect()
                } else {
                    Vec::new()
                }
            })
            .collect();

        Self {
            adjacency,
            active: active.to_vec(),
        }
    }

    pub fn view(&self) -> GraphView<'_> {
        GraphView::new(&self.adjacency, &self.active)
    }

    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn is_active(&self, v: Vertex) -> bool {
        self.view().is_active(v)
    }

    /// Neighbor list as frozen. Empty for handles the snapshot does not hold.
    pub fn neighbors(&self, v: Vertex) -> &[Vertex] {
        self.adjacency.get(v).map(|l| l.as_slice()).unwrap_or(&[])
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(|l| l.len()).sum::<usize>() / 2
    }

    pub fn min_cost_routing(&self, pairs: &[(Vertex, Vertex)], max_depth: usize) -> Vec<Path> {
        routing::min_cost_routing(self.view(), pairs, max_depth, false)
    }

    /// Routing with the default depth bound of 5.
    pub fn route(&self, pairs: &[(Vertex, Vertex)]) -> Vec<Path> {
        self.min_cost_routing(pairs, DEFAULT_MAX_DEPTH)
    }

    pub fn k_cores(&self) -> Vec<usize> {
        kcore::core_numbers(self.view())
    }

    pub(crate) fn memory_usage(&self) -> usize {
        use std::mem::size_of;

        let lists: usize = self
            .adjacency
            .iter()
            .map(|l| size_of::<Vec<Vertex>>() + l.capacity() * size_of::<Vertex>())
            .sum();
        lists + self.active.len() * size_of::<bool>()
    }
}
