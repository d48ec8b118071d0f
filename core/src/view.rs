use crate::graph::Vertex;

/// Read-only view over one adjacency structure: either the live graph or
/// a snapshot. Analyses take a `GraphView` and never know which one.
///
/// Neighbor lists in the live view may still name inactive vertices
/// (removal is logical). Use `active_neighbors` when that matters.
#[derive(Debug, Clone, Copy)]
pub struct GraphView<'a> {
    lists: &'a [Vec<Vertex>],
    active: &'a [bool],
}

impl<'a> GraphView<'a> {
    pub(crate) fn new(lists: &'a [Vec<Vertex>], active: &'a [bool]) -> Self {
        debug_assert_eq!(lists.len(), active.len());
        Self { lists, active }
    }

    /// Number of handles in this view, active or not.
    pub fn vertex_count(&self) -> usize {
        self.lists.len()
    }

    /// False for out-of-range handles.
    pub fn is_active(&self, v: Vertex) -> bool {
        self.active.get(v).copied().unwrap_or(false)
    }

    /// Raw neighbor list. Empty for out-of-range handles.
    pub fn neighbors(&self, v: Vertex) -> &'a [Vertex] {
        self.lists.get(v).map(|l| l.as_slice()).unwrap_or(&[])
    }

    pub fn active_neighbors(&self, v: Vertex) -> impl Iterator<Item = Vertex> + 'a {
        let active = self.active;
        self.neighbors(v)
            .iter()
            .copied()
            .filter(move |&u| active.get(u).copied().unwrap_or(false))
    }

    /// Degree counting only active neighbors. 0 for inactive vertices.
    pub fn active_degree(&self, v: Vertex) -> usize {
        if !self.is_active(v) {
            return 0;
        }
        self.active_neighbors(v).count()
    }

    pub fn active_count(&self) -> usize {
        self.active.iter().filter(|&&a| a).count()
    }

    /// Undirected edges whose endpoints are both active.
    pub fn edge_count(&self) -> usize {
        (0..self.vertex_count())
            .filter(|&u| self.is_active(u))
            .map(|u| self.active_neighbors(u).filter(|&v| v > u).count())
            .sum()
    }
}
