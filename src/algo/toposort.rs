//! Find a [topologically sorted] sequence of vertices of a [directed acyclic
//! graph] (DAG).
//!
//! The order is computed by a depth-first search, vertices are sorted by
//! decreasing finish time. Discovery and finish times of the search are
//! available in the result. If the graph contains a cycle, an error with one
//! of the edges closing the cycle is returned instead.
//!
//! [topologically sorted]: https://en.wikipedia.org/wiki/Topological_sorting
//! [directed acyclic graph]:
//!     https://en.wikipedia.org/wiki/Directed_acyclic_graph
//!
//! # Examples
//!
//! ```
//! use grapha::{algo::TopoSort, DirectedGraph};
//!
//! let mut activities = DirectedGraph::new();
//!
//! let design = activities.add_node(1, "design").unwrap();
//! let build = activities.add_node(2, "build").unwrap();
//! let test = activities.add_node(3, "test").unwrap();
//! let docs = activities.add_node(4, "docs").unwrap();
//!
//! // Edge direction in "must be done before" relation.
//! activities.add_arc(design, build, ()).unwrap();
//! activities.add_arc(build, test, ()).unwrap();
//! activities.add_arc(design, docs, ()).unwrap();
//!
//! let order = TopoSort::on(&activities).run().unwrap();
//!
//! assert_eq!(order.as_slice(), &[design, docs, build, test]);
//! ```

use thiserror::Error;

use crate::core::id::VertexId;

mod builder;
mod dfs;

pub use builder::TopoSortBuilder;

/// Topologically sorted sequence of vertices of a directed acyclic graph.
///
/// See [module](self) documentation for more details and example.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopoSort {
    order: Vec<VertexId>,
    discovery: Vec<usize>,
    finish: Vec<usize>,
}

impl TopoSort {
    pub fn iter(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.order.iter().copied()
    }

    pub fn as_slice(&self) -> &[VertexId] {
        &self.order
    }

    pub fn into_vec(self) -> Vec<VertexId> {
        self.order
    }

    /// Time when the search discovered the vertex.
    pub fn discovery(&self, vertex: VertexId) -> Option<usize> {
        self.discovery.get(vertex.as_usize()).copied()
    }

    /// Time when the search finished all outgoing arcs of the vertex.
    pub fn finish(&self, vertex: VertexId) -> Option<usize> {
        self.finish.get(vertex.as_usize()).copied()
    }
}

/// The error encountered during a [`TopoSort`] run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// The graph contains a cycle.
    ///
    /// Graphs with cycles don't have a topological order. The arc is one of
    /// the arcs on the cycle.
    #[error("graph contains cycle closed by arc {from:?} -> {to:?}")]
    Cycle { from: VertexId, to: VertexId },
}
