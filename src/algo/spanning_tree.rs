//! Find a [minimum spanning tree] of an undirected graph using [Prim's
//! algorithm].
//!
//! The graph must be connected, otherwise [`Error::Disconnected`] is returned.
//! Negative weights are allowed.
//!
//! [minimum spanning tree]: https://en.wikipedia.org/wiki/Minimum_spanning_tree
//! [Prim's algorithm]: https://en.wikipedia.org/wiki/Prim%27s_algorithm
//!
//! # Examples
//!
//! ```
//! use grapha::{algo::MinimumSpanningTree, UndirectedGraph};
//!
//! let mut graph = UndirectedGraph::new();
//!
//! let a = graph.add_node(1, "a").unwrap();
//! let b = graph.add_node(2, "b").unwrap();
//! let c = graph.add_node(3, "c").unwrap();
//!
//! graph.add_edge(a, b, 1).unwrap();
//! graph.add_edge(b, c, 2).unwrap();
//! graph.add_edge(a, c, 5).unwrap();
//!
//! let mst = MinimumSpanningTree::on(&graph).run().unwrap();
//!
//! assert_eq!(mst.total_weight(), 3);
//! assert_eq!(mst.pred(c), Some(b));
//! ```

use std::{cmp::Reverse, collections::BinaryHeap};

use fixedbitset::FixedBitSet;
use thiserror::Error;
use tracing::{debug, trace};

use crate::core::{
    graph::UndirectedGraph,
    id::VertexId,
    weight::{Weight, Weighted},
};

/// Minimum spanning tree represented by the parent of each vertex.
///
/// See [module](self) documentation for more details and example.
#[derive(Debug, Clone, PartialEq)]
pub struct MinimumSpanningTree<W> {
    root: Option<VertexId>,
    // Parent of every vertex except the root, together with the weight of the
    // tree edge connecting them.
    pred: Vec<Option<(VertexId, W)>>,
}

impl<W> MinimumSpanningTree<W> {
    pub fn on(graph: &UndirectedGraph<W>) -> MinimumSpanningTreeBuilder<'_, W> {
        MinimumSpanningTreeBuilder { graph, root: None }
    }

    /// Root of the tree, `None` for an empty graph.
    pub fn root(&self) -> Option<VertexId> {
        self.root
    }

    /// Parent of the vertex in the tree. `None` for the root.
    pub fn pred(&self, vertex: VertexId) -> Option<VertexId> {
        self.pred
            .get(vertex.as_usize())
            .and_then(Option::as_ref)
            .map(|(parent, _)| *parent)
    }

    /// Number of edges in the tree.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.pred.iter().flatten().count()
    }
}

impl<W: Weight> MinimumSpanningTree<W> {
    /// Iterates over the tree edges as `(parent, child, weight)`.
    pub fn edges(&self) -> impl Iterator<Item = (VertexId, VertexId, W)> + '_ {
        self.pred.iter().enumerate().filter_map(|(child, edge)| {
            edge.as_ref()
                .map(|&(parent, weight)| (parent, VertexId::from_usize(child), weight))
        })
    }

    pub fn total_weight(&self) -> W {
        self.edges()
            .fold(W::zero(), |total, (_, _, weight)| total + weight)
    }
}

pub struct MinimumSpanningTreeBuilder<'a, W> {
    graph: &'a UndirectedGraph<W>,
    root: Option<VertexId>,
}

impl<'a, W> MinimumSpanningTreeBuilder<'a, W> {
    /// Vertex where the tree grows from. The first vertex by default.
    pub fn root(self, root: VertexId) -> Self {
        Self {
            root: Some(root),
            ..self
        }
    }
}

impl<'a, W: Weight> MinimumSpanningTreeBuilder<'a, W> {
    pub fn run(self) -> Result<MinimumSpanningTree<W>, Error> {
        prim(self.graph, self.root)
    }
}

/// The error encountered during a [`MinimumSpanningTree`] run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// Some vertices are not reachable from the root.
    #[error("graph is not connected, {unreached} vertices not reached")]
    Disconnected { unreached: usize },

    #[error("vertex {0:?} does not exist")]
    UnknownVertex(VertexId),
}

#[tracing::instrument(skip_all, fields(vertices = graph.vertex_count(), edges = graph.edge_count()))]
fn prim<W: Weight>(
    graph: &UndirectedGraph<W>,
    root: Option<VertexId>,
) -> Result<MinimumSpanningTree<W>, Error> {
    let vertex_count = graph.vertex_count();

    let root = match root {
        Some(root) if !graph.contains(root) => return Err(Error::UnknownVertex(root)),
        Some(root) => root,
        None if vertex_count == 0 => {
            return Ok(MinimumSpanningTree {
                root: None,
                pred: Vec::new(),
            })
        }
        None => VertexId::from_usize(0),
    };

    let mut visited = FixedBitSet::with_capacity(vertex_count);
    let mut key = vec![None; vertex_count];
    let mut pred = vec![None; vertex_count];

    // Lazy deletion: a vertex may be queued several times with decreasing keys,
    // entries of already visited vertices are skipped on pop.
    let mut queue = BinaryHeap::new();

    key[root.as_usize()] = Some(W::zero());
    queue.push(Reverse(Weighted(root, W::Ord::from(W::zero()))));

    while let Some(Reverse(Weighted(vertex, _))) = queue.pop() {
        if visited.put(vertex.as_usize()) {
            continue;
        }

        trace!(?vertex, parent = ?pred[vertex.as_usize()], "added to tree");

        for connection in graph.outgoing(vertex) {
            let next = connection.end();

            if visited.contains(next.as_usize()) {
                continue;
            }

            let weight = connection.weight();

            if key[next.as_usize()].map_or(true, |current| weight < current) {
                key[next.as_usize()] = Some(weight);
                pred[next.as_usize()] = Some((vertex, weight));
                queue.push(Reverse(Weighted(next, W::Ord::from(weight))));
            }
        }
    }

    let reached = visited.count_ones(..);

    if reached != vertex_count {
        debug!(reached, "graph is not connected");
        return Err(Error::Disconnected {
            unreached: vertex_count - reached,
        });
    }

    Ok(MinimumSpanningTree {
        root: Some(root),
        pred,
    })
}
