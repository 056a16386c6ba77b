//! Find shortest path distances between [all pairs] of vertices using the
//! [Floyd-Warshall algorithm](https://en.wikipedia.org/wiki/Floyd%E2%80%93Warshall_algorithm).
//!
//! The result is a dense `V × V` matrix, so the memory requirement is `O(V²)`
//! and the running time is `O(V³)` regardless of the number of edges. For
//! undirected graphs only the lower triangle is stored.
//!
//! [all pairs]:
//!     https://en.wikipedia.org/wiki/Shortest_path_problem#All-pairs_shortest_paths
//!
//! # Examples
//!
//! ```
//! use grapha::{algo::AllPairs, UndirectedGraph};
//!
//! let mut graph = UndirectedGraph::new();
//!
//! let a = graph.add_node(1, "a").unwrap();
//! let b = graph.add_node(2, "b").unwrap();
//! let c = graph.add_node(3, "c").unwrap();
//! let d = graph.add_node(4, "d").unwrap();
//!
//! graph.add_edge(a, b, 2u32).unwrap();
//! graph.add_edge(b, c, 3).unwrap();
//! graph.add_edge(a, c, 9).unwrap();
//!
//! let all_pairs = AllPairs::on(&graph).run().unwrap();
//!
//! assert_eq!(all_pairs.dist(a, c), Some(&5));
//! assert_eq!(all_pairs.dist(c, a), Some(&5));
//! assert_eq!(all_pairs.dist(a, d), None);
//! ```

use thiserror::Error;
use tracing::debug;

use crate::{
    common::Matrix,
    core::{graph::Graph, id::VertexId, marker::EdgeType, weight::Weight},
};

/// Shortest path distances between all pairs of vertices.
///
/// See [module](self) documentation for more details and example.
#[derive(Debug, Clone, PartialEq)]
pub struct AllPairs<W, Ty> {
    dist: Matrix<Option<W>, Ty>,
}

impl<W, Ty: EdgeType> AllPairs<W, Ty> {
    pub fn on(graph: &Graph<W, Ty>) -> AllPairsBuilder<'_, W, Ty> {
        AllPairsBuilder { graph }
    }

    /// Returns the distance from `from` to `to`, or `None` if `to` is not
    /// reachable from `from` or any of the vertices does not exist.
    pub fn dist(&self, from: VertexId, to: VertexId) -> Option<&W> {
        self.dist
            .get(from.as_usize(), to.as_usize())
            .and_then(Option::as_ref)
    }

    /// Number of vertices, the matrix is `size × size`.
    pub fn size(&self) -> usize {
        self.dist.size()
    }

    /// Distances from the given vertex to all vertices.
    pub fn row(&self, from: VertexId) -> impl Iterator<Item = Option<&W>> + '_ {
        self.dist.row(from.as_usize()).map(Option::as_ref)
    }
}

pub struct AllPairsBuilder<'a, W, Ty: EdgeType> {
    graph: &'a Graph<W, Ty>,
}

impl<'a, W: Weight, Ty: EdgeType> AllPairsBuilder<'a, W, Ty> {
    pub fn run(self) -> Result<AllPairs<W, Ty>, Error> {
        floyd_warshall(self.graph)
    }
}

/// The error encountered during an [`AllPairs`] run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// An edge with negative weight encountered.
    #[error("edge with negative weight encountered")]
    NegativeWeight,
}

#[tracing::instrument(skip_all, fields(vertices = graph.vertex_count(), edges = graph.edge_count()))]
fn floyd_warshall<W, Ty>(graph: &Graph<W, Ty>) -> Result<AllPairs<W, Ty>, Error>
where
    W: Weight,
    Ty: EdgeType,
{
    let n = graph.vertex_count();
    let mut dist = Matrix::<Option<W>, Ty>::new(n, None);

    for i in 0..n {
        dist[(i, i)] = Some(W::zero());
    }

    for connection in graph.connections() {
        let weight = connection.weight();

        if weight.is_negative() {
            debug!(edge = ?connection.edge(), "negative weight");
            return Err(Error::NegativeWeight);
        }

        let pos = (connection.start().as_usize(), connection.end().as_usize());

        // Keep the lightest of parallel edges. Self-loops never beat the zero
        // on the diagonal.
        if dist[pos].map_or(true, |current| weight < current) {
            dist[pos] = Some(weight);
        }
    }

    for k in 0..n {
        for i in 0..n {
            let Some(ik) = dist[(i, k)] else {
                continue;
            };

            // Undirected matrix is symmetric, the upper triangle is the same
            // storage as the lower one.
            let cols = if Ty::is_directed() { n } else { i + 1 };

            for j in 0..cols {
                let Some(kj) = dist[(k, j)] else {
                    continue;
                };

                let through = ik + kj;

                if dist[(i, j)].map_or(true, |current| through < current) {
                    dist[(i, j)] = Some(through);
                }
            }
        }
    }

    Ok(AllPairs { dist })
}
