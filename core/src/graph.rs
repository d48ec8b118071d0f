use std::sync::Arc;

use tracing::{debug, trace};

use crate::config::EngineConfig;
use crate::error::{check_vertex, Result};
use crate::kcore;
use crate::routing::{self, Path};
use crate::snapshot::Snapshot;
use crate::view::GraphView;

/// Dense vertex handle. Valid handles are `0..vertex_count()`.
pub type Vertex = usize;

/// Mutable undirected graph with an optional frozen snapshot.
///
/// Vertices are indices into dense storage with a separate liveness flag.
/// Removing a vertex only clears the flag, so handles stay stable and
/// neighbor lists may keep naming it until the next snapshot filters it.
///
/// Reads resolve to exactly one view: the last snapshot if one has been
/// taken, otherwise the live lists. The switch is `snapshot.is_some()`.
pub struct DynamicGraph {
    adjacency: Vec<Vec<Vertex>>,
    active: Vec<bool>,
    snapshot: Option<Arc<Snapshot>>,
    config: EngineConfig,
}

impl DynamicGraph {
    /// Graph with `num_vertices` active, edgeless vertices.
    pub fn new(num_vertices: usize) -> Self {
        Self {
            adjacency: vec![Vec::new(); num_vertices],
            active: vec![true; num_vertices],
            snapshot: None,
            config: EngineConfig::default(),
        }
    }

    pub fn with_config(num_vertices: usize, config: EngineConfig) -> Result<Self> {
        config.validate()?;
        let mut graph = Self::new(num_vertices);
        graph.config = config;
        Ok(graph)
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    // -----------------------------------------------------------------------
    // Mutation
    // -----------------------------------------------------------------------

    /// Activate `v`, growing storage to `v + 1` if needed. Vertices created
    /// by the growth other than `v` start inactive.
    pub fn add_vertex(&mut self, v: Vertex) {
        let len = self.adjacency.len();
        if v >= len {
            debug!(from = len, to = v + 1, "growing vertex storage");
            self.adjacency.resize_with(v + 1, Vec::new);
            self.active.resize(v + 1, false);
        }
        self.active[v] = true;
    }

    pub fn try_remove_vertex(&mut self, v: Vertex) -> Result<()> {
        check_vertex(v, self.adjacency.len())?;
        self.active[v] = false;
        Ok(())
    }

    /// Panics if `v` is out of range.
    #[track_caller]
    pub fn remove_vertex(&mut self, v: Vertex) {
        fail_fast(self.try_remove_vertex(v))
    }

    /// Insert the undirected edge `{u, v}`.
    ///
    /// No-op when either endpoint is inactive, when `u == v`, or when the
    /// edge already exists.
    pub fn try_add_edge(&mut self, u: Vertex, v: Vertex) -> Result<()> {
        let n = self.adjacency.len();
        check_vertex(u, n)?;
        check_vertex(v, n)?;

        if !self.active[u] || !self.active[v] {
            trace!(u, v, "edge dropped: inactive endpoint");
            return Ok(());
        }
        if u == v {
            trace!(v, "edge dropped: self-loop");
            return Ok(());
        }

        if !self.adjacency[u].contains(&v) {
            self.adjacency[u].push(v);
        }
        if !self.adjacency[v].contains(&u) {
            self.adjacency[v].push(u);
        }
        Ok(())
    }

    /// Panics if either endpoint is out of range.
    #[track_caller]
    pub fn add_edge(&mut self, u: Vertex, v: Vertex) {
        fail_fast(self.try_add_edge(u, v))
    }

    /// Remove the undirected edge `{u, v}`. Missing edges are ignored.
    pub fn try_remove_edge(&mut self, u: Vertex, v: Vertex) -> Result<()> {
        let n = self.adjacency.len();
        check_vertex(u, n)?;
        check_vertex(v, n)?;

        self.adjacency[u].retain(|&x| x != v);
        self.adjacency[v].retain(|&x| x != u);
        Ok(())
    }

    /// Panics if either endpoint is out of range.
    #[track_caller]
    pub fn remove_edge(&mut self, u: Vertex, v: Vertex) {
        fail_fast(self.try_remove_edge(u, v))
    }

    // -----------------------------------------------------------------------
    // Snapshot / view
    // -----------------------------------------------------------------------

    /// Freeze the current graph. Replaces any earlier snapshot wholesale.
    pub fn snapshot(&mut self) {
        let snap = Snapshot::capture(&self.adjacency, &self.active);
        debug!(
            vertices = snap.vertex_count(),
            edges = snap.edge_count(),
            replaced = self.snapshot.is_some(),
            "snapshot taken"
        );
        self.snapshot = Some(Arc::new(snap));
    }

    pub fn has_snapshot(&self) -> bool {
        self.snapshot.is_some()
    }

    /// Shared handle to the current snapshot. It stays valid and unchanged
    /// after later mutations or snapshots.
    pub fn snapshot_handle(&self) -> Option<Arc<Snapshot>> {
        self.snapshot.clone()
    }

    /// The view every read query resolves to.
    pub fn view(&self) -> GraphView<'_> {
        match &self.snapshot {
            Some(snap) => snap.view(),
            None => self.live_view(),
        }
    }

    /// The live lists regardless of any snapshot.
    pub fn live_view(&self) -> GraphView<'_> {
        GraphView::new(&self.adjacency, &self.active)
    }

    /// Neighbors of `v` in the current view.
    ///
    /// From the live view the list may include inactive vertices. A vertex
    /// added after the last snapshot has no neighbors in that snapshot.
    pub fn try_neighbors(&self, v: Vertex) -> Result<&[Vertex]> {
        check_vertex(v, self.adjacency.len())?;
        Ok(self.view().neighbors(v))
    }

    /// Panics if `v` is out of range.
    #[track_caller]
    pub fn neighbors(&self, v: Vertex) -> &[Vertex] {
        fail_fast(self.try_neighbors(v))
    }

    // -----------------------------------------------------------------------
    // Introspection
    // -----------------------------------------------------------------------

    /// Number of live handles. Never shrinks.
    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Live liveness flag. False for out-of-range handles.
    pub fn is_active(&self, v: Vertex) -> bool {
        self.active.get(v).copied().unwrap_or(false)
    }

    pub fn active_count(&self) -> usize {
        self.live_view().active_count()
    }

    /// Edges between active endpoints in the current view.
    pub fn edge_count(&self) -> usize {
        self.view().edge_count()
    }

    /// Approximate memory usage in bytes, live lists plus snapshot.
    pub fn memory_usage(&self) -> usize {
        use std::mem::size_of;

        let lists: usize = self
            .adjacency
            .iter()
            .map(|l| size_of::<Vec<Vertex>>() + l.capacity() * size_of::<Vertex>())
            .sum();
        let flags = self.active.len() * size_of::<bool>();
        let snap = self.snapshot.as_ref().map(|s| s.memory_usage()).unwrap_or(0);

        lists + flags + snap
    }

    // -----------------------------------------------------------------------
    // Analysis
    // -----------------------------------------------------------------------

    /// Depth-bounded shortest paths, one per pair, in input order.
    pub fn min_cost_routing(&self, pairs: &[(Vertex, Vertex)], max_depth: usize) -> Vec<Path> {
        let parallel = self.config.parallel_routing
            && pairs.len() >= self.config.parallel_routing_threshold;
        routing::min_cost_routing(self.view(), pairs, max_depth, parallel)
    }

    /// `min_cost_routing` with the configured default depth.
    pub fn route(&self, pairs: &[(Vertex, Vertex)]) -> Vec<Path> {
        self.min_cost_routing(pairs, self.config.default_max_depth)
    }

    /// Core number of every handle in the current view.
    pub fn k_cores(&self) -> Vec<usize> {
        kcore::core_numbers(self.view())
    }

    /// Active vertices in the k-core, ascending.
    pub fn k_core(&self, k: usize) -> Vec<Vertex> {
        let view = self.view();
        kcore::k_core_members(view, &kcore::core_numbers(view), k)
    }

    pub fn degeneracy(&self) -> usize {
        kcore::degeneracy(&self.k_cores())
    }
}

impl Default for DynamicGraph {
    fn default() -> Self {
        Self::new(0)
    }
}

#[track_caller]
fn fail_fast<T>(result: Result<T>) -> T {
    match result {
        Ok(value) => value,
        Err(e) => panic!("{e}"),
    }
}
