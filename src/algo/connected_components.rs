//! Find [strongly connected components] of a directed graph using [Kosaraju's
//! algorithm].
//!
//! Two vertices are in the same component if each of them is reachable from
//! the other. Every vertex belongs to exactly one component.
//!
//! [strongly connected components]:
//!     https://en.wikipedia.org/wiki/Strongly_connected_component
//! [Kosaraju's algorithm]: https://en.wikipedia.org/wiki/Kosaraju%27s_algorithm
//!
//! # Examples
//!
//! ```
//! use grapha::{algo::StronglyConnectedComponents, DirectedGraph};
//!
//! let mut graph = DirectedGraph::new();
//!
//! let a = graph.add_node(1, "a").unwrap();
//! let b = graph.add_node(2, "b").unwrap();
//! let c = graph.add_node(3, "c").unwrap();
//!
//! graph.add_arc(a, b, ()).unwrap();
//! graph.add_arc(b, a, ()).unwrap();
//! graph.add_arc(b, c, ()).unwrap();
//!
//! let scc = StronglyConnectedComponents::on(&graph).run();
//!
//! assert_eq!(scc.len(), 2);
//! assert_eq!(scc.component_of(a), scc.component_of(b));
//! assert_ne!(scc.component_of(a), scc.component_of(c));
//! ```

use crate::core::{graph::DirectedGraph, id::VertexId};

mod kosaraju;

/// Strongly connected components of a directed graph.
///
/// See [module](self) documentation for more details and example.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StronglyConnectedComponents {
    components: Vec<Vec<VertexId>>,
    component_of: Vec<usize>,
}

impl StronglyConnectedComponents {
    pub fn on<W>(graph: &DirectedGraph<W>) -> StronglyConnectedComponentsBuilder<'_, W> {
        StronglyConnectedComponentsBuilder { graph }
    }

    /// Returns the number of components.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Returns an iterator of the components.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.components.iter(),
        }
    }

    /// Index of the component containing the vertex, as ordered by
    /// [`iter`](Self::iter).
    pub fn component_of(&self, vertex: VertexId) -> Option<usize> {
        self.component_of.get(vertex.as_usize()).copied()
    }
}

pub struct StronglyConnectedComponentsBuilder<'a, W> {
    graph: &'a DirectedGraph<W>,
}

impl<'a, W: Copy> StronglyConnectedComponentsBuilder<'a, W> {
    pub fn run(self) -> StronglyConnectedComponents {
        kosaraju::kosaraju(self.graph)
    }
}

pub struct Iter<'a> {
    inner: std::slice::Iter<'a, Vec<VertexId>>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a [VertexId];

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|component| component.as_slice())
    }
}
