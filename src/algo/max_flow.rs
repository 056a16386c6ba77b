//! Find a [maximum flow] between two vertices of a directed graph using the
//! [Edmonds-Karp algorithm].
//!
//! Arc weights are interpreted as capacities and must not be negative.
//! Parallel arcs are merged into a single arc with the sum of their
//! capacities.
//!
//! The residual network is kept in a dense `V × V` matrix, so the memory
//! requirement is `O(V²)`. The running time is `O(V³ E)` because every
//! breadth-first search scans matrix rows.
//!
//! [maximum flow]: https://en.wikipedia.org/wiki/Maximum_flow_problem
//! [Edmonds-Karp algorithm]:
//!     https://en.wikipedia.org/wiki/Edmonds%E2%80%93Karp_algorithm
//!
//! # Examples
//!
//! ```
//! use grapha::{algo::MaxFlow, DirectedGraph};
//!
//! let mut network = DirectedGraph::new();
//!
//! let source = network.add_node(1, "source").unwrap();
//! let a = network.add_node(2, "a").unwrap();
//! let b = network.add_node(3, "b").unwrap();
//! let sink = network.add_node(4, "sink").unwrap();
//!
//! network.add_arc(source, a, 3u32).unwrap();
//! network.add_arc(source, b, 2).unwrap();
//! network.add_arc(a, b, 1).unwrap();
//! network.add_arc(a, sink, 2).unwrap();
//! network.add_arc(b, sink, 3).unwrap();
//!
//! let max_flow = MaxFlow::on(&network).run(source, sink).unwrap();
//!
//! assert_eq!(max_flow.value(), 5);
//! assert_eq!(max_flow.flow(a, b), 1);
//! ```

use fixedbitset::FixedBitSet;
use thiserror::Error;

use crate::{
    common::Matrix,
    core::{graph::DirectedGraph, id::VertexId, marker::Directed, weight::Weight},
};

mod edmonds_karp;

/// Maximum flow from a source to a sink vertex.
///
/// See [module](self) documentation for more details and example.
#[derive(Debug, Clone, PartialEq)]
pub struct MaxFlow<W> {
    value: W,
    capacity: Matrix<W, Directed>,
    residual: Matrix<W, Directed>,
    source_side: FixedBitSet,
}

impl<W: Weight> MaxFlow<W> {
    pub fn on(graph: &DirectedGraph<W>) -> MaxFlowBuilder<'_, W> {
        MaxFlowBuilder { graph }
    }

    /// Total amount of flow leaving the source.
    pub fn value(&self) -> W {
        self.value
    }

    /// Net flow sent from `from` to `to` over all arcs between the two
    /// vertices. Zero if the flow goes the other way or there is no arc.
    pub fn flow(&self, from: VertexId, to: VertexId) -> W {
        let (from, to) = (from.as_usize(), to.as_usize());

        match (self.capacity.get(from, to), self.residual.get(from, to)) {
            (Some(&capacity), Some(&residual)) if residual < capacity => capacity - residual,
            _ => W::zero(),
        }
    }

    /// Vertices reachable from the source in the final residual network. They
    /// form the source side of a minimum cut.
    pub fn source_side(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.source_side.ones().map(VertexId::from_usize)
    }

    pub fn is_in_source_side(&self, vertex: VertexId) -> bool {
        self.source_side.contains(vertex.as_usize())
    }
}

pub struct MaxFlowBuilder<'a, W> {
    graph: &'a DirectedGraph<W>,
}

impl<'a, W: Weight> MaxFlowBuilder<'a, W> {
    pub fn run(self, source: VertexId, sink: VertexId) -> Result<MaxFlow<W>, Error> {
        for vertex in [source, sink] {
            if !self.graph.contains(vertex) {
                return Err(Error::UnknownVertex(vertex));
            }
        }

        if source == sink {
            return Err(Error::SourceIsSink);
        }

        edmonds_karp::edmonds_karp(self.graph, source, sink)
    }
}

/// The error encountered during a [`MaxFlow`] run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// An arc with negative capacity encountered.
    #[error("arc with negative capacity encountered")]
    NegativeCapacity,

    /// The source and the sink are the same vertex.
    #[error("source and sink are the same vertex")]
    SourceIsSink,

    #[error("vertex {0:?} does not exist")]
    UnknownVertex(VertexId),
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use proptest::prelude::*;

    use crate::infra::{
        proptest::graph_directed,
        testing::{create_path_directed, init_tracing},
    };

    use super::*;

    fn v(index: usize) -> VertexId {
        index.into()
    }

    fn create_basic_network() -> DirectedGraph<u32> {
        let mut graph = DirectedGraph::new();

        for id in 1..=6 {
            graph.add_node(id, format!("{id}")).unwrap();
        }

        graph.add_arc(v(0), v(1), 16).unwrap();
        graph.add_arc(v(0), v(2), 13).unwrap();
        graph.add_arc(v(2), v(1), 4).unwrap();
        graph.add_arc(v(1), v(3), 12).unwrap();
        graph.add_arc(v(3), v(2), 9).unwrap();
        graph.add_arc(v(2), v(4), 14).unwrap();
        graph.add_arc(v(4), v(3), 7).unwrap();
        graph.add_arc(v(3), v(5), 20).unwrap();
        graph.add_arc(v(4), v(5), 4).unwrap();

        graph
    }

    fn cut_capacity<W: Weight>(graph: &DirectedGraph<W>, max_flow: &MaxFlow<W>) -> W {
        graph
            .edges()
            .filter(|arc| {
                max_flow.is_in_source_side(arc.start()) && !max_flow.is_in_source_side(arc.end())
            })
            .fold(W::zero(), |total, arc| total + arc.weight())
    }

    fn assert_conservation<W: Weight>(
        graph: &DirectedGraph<W>,
        max_flow: &MaxFlow<W>,
        source: VertexId,
        sink: VertexId,
    ) {
        for u in graph.vertex_ids() {
            let (mut incoming, mut outgoing) = (W::zero(), W::zero());

            for w in graph.vertex_ids() {
                incoming = incoming + max_flow.flow(w, u);
                outgoing = outgoing + max_flow.flow(u, w);
            }

            if u == source {
                assert_eq!(outgoing - incoming, max_flow.value());
            } else if u != sink {
                assert_eq!(incoming, outgoing, "flow not conserved in {u:?}");
            }
        }
    }

    #[test]
    fn max_flow_basic() {
        init_tracing();

        let graph = create_basic_network();
        let max_flow = MaxFlow::on(&graph).run(v(0), v(5)).unwrap();

        assert_eq!(max_flow.value(), 23);
        assert_eq!(cut_capacity(&graph, &max_flow), 23);
        assert!(max_flow.is_in_source_side(v(0)));
        assert!(!max_flow.is_in_source_side(v(5)));
        assert_conservation(&graph, &max_flow, v(0), v(5));

        for arc in graph.edges() {
            assert!(max_flow.flow(arc.start(), arc.end()) <= arc.weight());
        }
    }

    #[test]
    fn max_flow_parallel_arcs() {
        let mut graph = DirectedGraph::new();

        graph.add_node(1, "s").unwrap();
        graph.add_node(2, "t").unwrap();

        graph.add_arc(v(0), v(1), 2.5).unwrap();
        graph.add_arc(v(0), v(1), 1.5).unwrap();
        graph.add_arc(v(1), v(0), 10.0).unwrap();

        let max_flow = MaxFlow::on(&graph).run(v(0), v(1)).unwrap();

        assert_eq!(max_flow.value(), 4.0);
        assert_eq!(max_flow.flow(v(0), v(1)), 4.0);
        assert_eq!(max_flow.flow(v(1), v(0)), 0.0);
    }

    #[test]
    fn max_flow_bottleneck_path() {
        let graph = create_path_directed(5, |i| [7u32, 3, 9, 4][i]);
        let max_flow = MaxFlow::on(&graph).run(v(0), v(4)).unwrap();

        assert_eq!(max_flow.value(), 3);
        assert_eq!(
            max_flow.source_side().collect::<Vec<_>>(),
            vec![v(0), v(1)]
        );
    }

    #[test]
    fn max_flow_unreachable_sink() {
        let graph = create_basic_network();
        let max_flow = MaxFlow::on(&graph).run(v(5), v(0)).unwrap();

        assert_eq!(max_flow.value(), 0);
        assert_eq!(max_flow.source_side().collect::<Vec<_>>(), vec![v(5)]);
    }

    #[test]
    fn max_flow_errors() {
        let mut graph = create_basic_network();

        assert_matches!(MaxFlow::on(&graph).run(v(2), v(2)), Err(Error::SourceIsSink));
        assert_matches!(
            MaxFlow::on(&graph).run(v(0), v(6)),
            Err(Error::UnknownVertex(_))
        );

        let mut signed = DirectedGraph::new();
        for node in graph.nodes() {
            signed.add_node(node.id(), node.name()).unwrap();
        }
        for arc in graph.edges() {
            signed.add_arc(arc.start(), arc.end(), arc.weight() as i64).unwrap();
        }
        signed.add_arc(v(4), v(1), -1).unwrap();

        assert_matches!(MaxFlow::on(&signed).run(v(0), v(5)), Err(Error::NegativeCapacity));

        graph.add_arc(v(5), v(5), 100).unwrap();
        assert_eq!(MaxFlow::on(&graph).run(v(0), v(5)).unwrap().value(), 23);
    }

    #[test]
    fn max_flow_idempotent() {
        let graph = create_basic_network();

        assert_eq!(
            MaxFlow::on(&graph).run(v(0), v(5)).unwrap(),
            MaxFlow::on(&graph).run(v(0), v(5)).unwrap()
        );
    }

    proptest! {
        #[test]
        #[ignore = "run property-based tests with `cargo test proptest_ -- --ignored`"]
        fn proptest_max_flow_min_cut(graph in graph_directed(0u32..100).max_size(24), source: prop::sample::Index, sink: prop::sample::Index) {
            let n = graph.vertex_count();
            prop_assume!(n >= 2);

            let source = VertexId::from_usize(source.index(n));
            let sink = VertexId::from_usize(sink.index(n));
            prop_assume!(source != sink);

            let max_flow = MaxFlow::on(&graph).run(source, sink).unwrap();

            prop_assert_eq!(max_flow.value(), cut_capacity(&graph, &max_flow));
            prop_assert!(!max_flow.is_in_source_side(sink));
            assert_conservation(&graph, &max_flow, source, sink);
        }
    }
}
