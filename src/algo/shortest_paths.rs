//! Find [single source shortest paths] and their distances in a graph.
//!
//! See available parameters [here](ShortestPathsBuilder#implementations).
//!
//! Two algorithms are available. [Dijkstra's
//! algorithm](https://en.wikipedia.org/wiki/Dijkstra%27s_algorithm) (the
//! default) takes edge weights into account and requires them to be
//! non-negative. [Breadth-first
//! search](https://en.wikipedia.org/wiki/Breadth-first_search) ignores the
//! weights and counts edges instead.
//!
//! Vertices that cannot be reached from the source have no distance and no
//! predecessor, there is no "infinite" sentinel value.
//!
//! [single source shortest paths]:
//!     https://en.wikipedia.org/wiki/Shortest_path_problem#Single-source_shortest_paths
//!
//! # Examples
//!
//! ```
//! use grapha::{algo::ShortestPaths, UndirectedGraph};
//!
//! let mut graph = UndirectedGraph::new();
//!
//! let brno = graph.add_node(1, "Brno").unwrap();
//! let olomouc = graph.add_node(2, "Olomouc").unwrap();
//! let ostrava = graph.add_node(3, "Ostrava").unwrap();
//! let zlin = graph.add_node(4, "Zlín").unwrap();
//!
//! graph.add_edge(brno, olomouc, 77u32).unwrap();
//! graph.add_edge(olomouc, ostrava, 98).unwrap();
//! graph.add_edge(brno, zlin, 99).unwrap();
//! graph.add_edge(zlin, ostrava, 107).unwrap();
//!
//! let shortest_paths = ShortestPaths::on(&graph).run(brno).unwrap();
//! assert_eq!(shortest_paths.dist(ostrava), Some(&175));
//!
//! let path = shortest_paths
//!     .reconstruct(ostrava)
//!     .map(|v| graph[v].name())
//!     .collect::<Vec<_>>();
//! assert_eq!(path, vec!["Olomouc", "Brno"]);
//!
//! let hops = ShortestPaths::on(&graph).bfs().run(brno).unwrap();
//! assert_eq!(hops.dist(ostrava), Some(&2));
//! ```

use std::ops::Index;

use thiserror::Error;

use crate::{common::indexed_heap, core::id::VertexId};

mod bfs;
mod builder;
mod dijkstra;

pub use builder::ShortestPathsBuilder;

/// Shortest paths and their distances from a single source vertex.
///
/// See [module](self) documentation for more details and example.
#[derive(Debug, Clone, PartialEq)]
pub struct ShortestPaths<W> {
    source: VertexId,
    // Vertex ids are dense, so plain vectors indexed by vertex are used even
    // when the search terminates early on reaching the goal.
    dist: Vec<Option<W>>,
    pred: Vec<Option<VertexId>>,
}

impl<W> ShortestPaths<W> {
    /// Source vertex where the search was started.
    pub fn source(&self) -> VertexId {
        self.source
    }

    /// Returns the path distance between the source vertex and the given
    /// vertex, or `None` if it's not known.
    ///
    /// There are two causes why the distance between two vertices is not known:
    /// (1) the vertices are not connected, or (2) the
    /// [goal](ShortestPathsBuilder::goal) was reached before visiting the given
    /// vertex.
    pub fn dist(&self, to: VertexId) -> Option<&W> {
        self.dist.get(to.as_usize()).and_then(Option::as_ref)
    }

    /// Returns the vertex preceding `to` on its shortest path. `None` for the
    /// source and for unreached vertices.
    pub fn pred(&self, to: VertexId) -> Option<VertexId> {
        self.pred.get(to.as_usize()).copied().flatten()
    }

    pub fn is_reachable(&self, to: VertexId) -> bool {
        self.dist(to).is_some()
    }

    /// Distances of all vertices, indexed by vertex id.
    pub fn distances(&self) -> &[Option<W>] {
        &self.dist
    }

    /// Returns an iterator over vertices on the path between the given vertex
    /// and the source vertex, in this order. The given vertex itself is not
    /// included, the source is included unless `to` is the source.
    ///
    /// The iterator is empty if the vertex was not reached.
    pub fn reconstruct(&self, to: VertexId) -> PathReconstruction<'_> {
        PathReconstruction {
            curr: to,
            pred: &self.pred,
        }
    }
}

impl<W> Index<VertexId> for ShortestPaths<W> {
    type Output = W;

    fn index(&self, index: VertexId) -> &Self::Output {
        self.dist(index).expect("vertex was not reached")
    }
}

mod algo {
    #[derive(Debug)]
    pub struct Dijkstra;

    #[derive(Debug)]
    pub struct Bfs;
}

/// The error encountered during a [`ShortestPaths`] run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// An edge with negative weight encountered.
    #[error("edge with negative weight encountered")]
    NegativeWeight,

    /// The specified goal not reached.
    #[error("specified goal not reached")]
    GoalNotReached,

    /// The source or goal vertex is not in the graph.
    #[error("vertex {0:?} does not exist")]
    UnknownVertex(VertexId),

    /// The priority queue rejected an operation.
    ///
    /// This error should not happen in normal circumstances. If it does, it
    /// indicates a bug in the relaxation bookkeeping.
    #[error("priority queue failure: {0}")]
    Queue(#[from] indexed_heap::Error),
}

/// Iterator over the vertices on the path from a vertex to the source vertex.
///
/// Returned by [`ShortestPaths::reconstruct`].
pub struct PathReconstruction<'a> {
    curr: VertexId,
    pred: &'a [Option<VertexId>],
}

impl Iterator for PathReconstruction<'_> {
    type Item = VertexId;

    fn next(&mut self) -> Option<Self::Item> {
        self.curr = self.pred.get(self.curr.as_usize()).copied().flatten()?;
        Some(self.curr)
    }
}
