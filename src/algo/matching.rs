//! Find a [maximum matching] in a bipartite graph using the [Hopcroft-Karp
//! algorithm].
//!
//! See available parameters [here](MatchingBuilder#implementations).
//!
//! The two sides of the graph are given explicitly as a [`Bipartition`], which
//! is validated against the edges. If no bipartition is given, it is inferred
//! by a two-coloring of the graph.
//!
//! [maximum matching]:
//!     https://en.wikipedia.org/wiki/Matching_(graph_theory)#In_unweighted_bipartite_graphs
//! [Hopcroft-Karp algorithm]:
//!     https://en.wikipedia.org/wiki/Hopcroft%E2%80%93Karp_algorithm
//!
//! # Examples
//!
//! ```
//! use grapha::{
//!     algo::{Bipartition, Matching},
//!     UndirectedGraph,
//! };
//!
//! let mut graph = UndirectedGraph::new();
//!
//! let alice = graph.add_node(1, "Alice").unwrap();
//! let bob = graph.add_node(2, "Bob").unwrap();
//! let backend = graph.add_node(3, "backend").unwrap();
//! let frontend = graph.add_node(4, "frontend").unwrap();
//!
//! graph.add_edge(alice, backend, ()).unwrap();
//! graph.add_edge(alice, frontend, ()).unwrap();
//! graph.add_edge(bob, backend, ()).unwrap();
//!
//! let people = Bipartition::new(&graph, [alice, bob]).unwrap();
//! let matching = Matching::on(&graph).partition(people).run().unwrap();
//!
//! assert_eq!(matching.len(), 2);
//! assert_eq!(matching.mate(alice), Some(frontend));
//! assert_eq!(matching.mate(bob), Some(backend));
//! ```

use fixedbitset::FixedBitSet;
use thiserror::Error;

use crate::core::{graph::UndirectedGraph, id::VertexId};

mod bipartition;
mod hopcroft_karp;

pub use bipartition::Bipartition;

/// Maximum matching in a bipartite graph.
///
/// See [module](self) documentation for more details and example.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matching {
    mate: Vec<Option<VertexId>>,
    left: FixedBitSet,
    size: usize,
}

impl Matching {
    pub fn on<W>(graph: &UndirectedGraph<W>) -> MatchingBuilder<'_, W> {
        MatchingBuilder {
            graph,
            partition: None,
        }
    }

    /// Number of matched pairs.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.size
    }

    /// The vertex matched with the given one, if any.
    pub fn mate(&self, vertex: VertexId) -> Option<VertexId> {
        self.mate.get(vertex.as_usize()).copied().flatten()
    }

    pub fn is_matched(&self, vertex: VertexId) -> bool {
        self.mate(vertex).is_some()
    }

    /// Matched pairs as `(left, right)`, ordered by the left vertex.
    pub fn pairs(&self) -> impl Iterator<Item = (VertexId, VertexId)> + '_ {
        self.left.ones().filter_map(|left| {
            self.mate[left].map(|right| (VertexId::from_usize(left), right))
        })
    }
}

pub struct MatchingBuilder<'a, W> {
    graph: &'a UndirectedGraph<W>,
    partition: Option<Bipartition>,
}

impl<'a, W> MatchingBuilder<'a, W> {
    /// Sides of the graph. Vertices on the left side are the ones reported
    /// first by [`Matching::pairs`].
    pub fn partition(self, partition: Bipartition) -> Self {
        Self {
            partition: Some(partition),
            ..self
        }
    }

    pub fn run(self) -> Result<Matching, Error> {
        let partition = match self.partition {
            Some(partition) => {
                partition.check(self.graph)?;
                partition
            }
            None => Bipartition::infer(self.graph)?,
        };

        Ok(hopcroft_karp::hopcroft_karp(self.graph, partition))
    }
}

/// The error encountered when validating a [`Bipartition`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// An edge connects two vertices on the same side.
    #[error("edge between {start:?} and {end:?} does not cross the sides")]
    NotBipartite { start: VertexId, end: VertexId },

    /// The vertex is not in the graph.
    #[error("vertex {0:?} does not exist")]
    UnknownVertex(VertexId),

    /// The bipartition was created for a graph with a different number of
    /// vertices.
    #[error("bipartition covers {partition} vertices, graph has {graph}")]
    SizeMismatch { partition: usize, graph: usize },
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use proptest::prelude::*;

    use crate::infra::testing::{create_bipartite, create_cycle, to_petgraph_undirected};

    use super::*;

    fn v(index: usize) -> VertexId {
        index.into()
    }

    fn is_matching<W>(graph: &UndirectedGraph<W>, matching: &Matching) -> bool {
        let symmetric = graph
            .vertex_ids()
            .all(|u| matching.mate(u).map_or(true, |w| matching.mate(w) == Some(u)));

        let adjacent = matching
            .pairs()
            .all(|(u, w)| graph[u].connection_with(w).is_some());

        symmetric && adjacent && matching.pairs().count() == matching.len()
    }

    #[test]
    fn matching_perfect() {
        // Left 0..3, right 3..6, every left vertex connected to the right
        // vertex with the same or greater offset.
        let graph = create_bipartite(3, 3, |i, j| (j >= i).then_some(()));
        let matching = Matching::on(&graph).run().unwrap();

        assert_eq!(matching.len(), 3);
        assert!(is_matching(&graph, &matching));
        assert_eq!(
            matching.pairs().collect::<Vec<_>>(),
            vec![(v(0), v(3)), (v(1), v(4)), (v(2), v(5))]
        );
    }

    #[test]
    fn matching_requires_augmenting_path() {
        let mut graph = UndirectedGraph::new();

        for id in 1..=6 {
            graph.add_node(id, format!("{id}")).unwrap();
        }

        // Greedy choice of 0-3 blocks 1, which has only 3.
        graph.add_edge(v(0), v(3), ()).unwrap();
        graph.add_edge(v(0), v(4), ()).unwrap();
        graph.add_edge(v(1), v(3), ()).unwrap();
        graph.add_edge(v(2), v(4), ()).unwrap();
        graph.add_edge(v(2), v(5), ()).unwrap();

        let left = Bipartition::new(&graph, [v(0), v(1), v(2)]).unwrap();
        let matching = Matching::on(&graph).partition(left).run().unwrap();

        assert_eq!(matching.len(), 3);
        assert_eq!(matching.mate(v(1)), Some(v(3)));
        assert_eq!(matching.mate(v(3)), Some(v(1)));
        assert!(is_matching(&graph, &matching));
    }

    #[test]
    fn matching_unbalanced() {
        let graph = create_bipartite(2, 5, |_, _| Some(()));
        let matching = Matching::on(&graph).run().unwrap();

        assert_eq!(matching.len(), 2);
        assert_eq!(
            (2..7).filter(|&i| matching.is_matched(v(i))).count(),
            2
        );
    }

    #[test]
    fn matching_no_edges() {
        let graph = create_bipartite(3, 3, |_, _| None::<()>);
        let matching = Matching::on(&graph).run().unwrap();

        assert_eq!(matching.len(), 0);
        assert_eq!(matching.pairs().count(), 0);
    }

    #[test]
    fn matching_even_cycle() {
        let graph = create_cycle(6, |_| ());
        let matching = Matching::on(&graph).run().unwrap();

        assert_eq!(matching.len(), 3);
        assert!(is_matching(&graph, &matching));
    }

    #[test]
    fn matching_odd_cycle_not_bipartite() {
        let graph = create_cycle(5, |_| ());

        assert_matches!(
            Matching::on(&graph).run(),
            Err(Error::NotBipartite { .. })
        );
    }

    #[test]
    fn matching_invalid_partition() {
        let graph = create_bipartite(2, 2, |_, _| Some(()));
        let partition = Bipartition::new(&graph, [v(0), v(2)]);

        assert_matches!(partition, Err(Error::NotBipartite { .. }));
    }

    #[test]
    fn matching_partition_of_other_graph() {
        let small = create_bipartite(1, 1, |_, _| Some(()));
        let large = create_bipartite(2, 2, |_, _| Some(()));

        let partition = Bipartition::new(&small, [v(0)]).unwrap();

        assert_matches!(
            Matching::on(&large).partition(partition).run(),
            Err(Error::SizeMismatch { .. })
        );
    }

    #[test]
    fn matching_idempotent() {
        let graph = create_cycle(6, |_| ());

        assert_eq!(
            Matching::on(&graph).run().unwrap(),
            Matching::on(&graph).run().unwrap()
        );
    }

    proptest! {
        #[test]
        #[ignore = "run property-based tests with `cargo test proptest_ -- --ignored`"]
        fn proptest_matching_petgraph_agree(left in 0usize..8, right in 0usize..8, bits in prop::collection::vec(any::<bool>(), 64)) {
            let graph = create_bipartite(left, right, |i, j| bits[i * 8 + j].then_some(()));
            let matching = Matching::on(&graph).run().unwrap();

            prop_assert!(is_matching(&graph, &matching));

            let reference = to_petgraph_undirected(&graph);
            prop_assert_eq!(matching.len(), petgraph::algo::maximum_matching(&reference).len());
        }
    }
}
