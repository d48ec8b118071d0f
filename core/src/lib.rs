//! dyngraph-core: mutable undirected graph engine.
//!
//! Maintains a dense adjacency-list graph under incremental vertex and
//! edge edits, and answers analytical queries against a frozen snapshot:
//! batch depth-bounded shortest-path routing and k-core decomposition.
//! Pure Rust, no I/O. A single thread mutates; snapshots are shared
//! read-only through `Arc` and may be analysed from other threads.

mod config;
mod error;
mod graph;
pub mod kcore;
pub mod routing;
mod snapshot;
mod view;

pub use config::{EngineConfig, DEFAULT_MAX_DEPTH, DEFAULT_PARALLEL_THRESHOLD, MAX_DEPTH_LIMIT};
pub use error::{GraphError, Result};
pub use graph::{DynamicGraph, Vertex};
pub use kcore::verify_k_core;
pub use routing::Path;
pub use snapshot::Snapshot;
pub use view::GraphView;
