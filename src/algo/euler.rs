//! Find an [Eulerian cycle] in an undirected graph, a closed walk that
//! traverses every edge exactly once.
//!
//! The cycle exists if and only if every vertex has even degree and all edges
//! belong to a single connected component. The absence of the cycle is not an
//! error, the algorithm returns `Ok(None)` in such case.
//!
//! The implementation is [Hierholzer's algorithm] with an explicit stack, so it
//! runs in `O(V + E)` time and does not recurse.
//!
//! [Eulerian cycle]: https://en.wikipedia.org/wiki/Eulerian_path
//! [Hierholzer's algorithm]:
//!     https://en.wikipedia.org/wiki/Eulerian_path#Hierholzer's_algorithm
//!
//! # Examples
//!
//! ```
//! use grapha::{algo::EulerianCycle, UndirectedGraph};
//!
//! let mut graph = UndirectedGraph::new();
//!
//! let a = graph.add_node(1, "a").unwrap();
//! let b = graph.add_node(2, "b").unwrap();
//! let c = graph.add_node(3, "c").unwrap();
//!
//! graph.add_edge(a, b, ()).unwrap();
//! graph.add_edge(b, c, ()).unwrap();
//!
//! // Path has two vertices of odd degree.
//! assert!(EulerianCycle::on(&graph).run(a).unwrap().is_none());
//!
//! graph.add_edge(c, a, ()).unwrap();
//!
//! let cycle = EulerianCycle::on(&graph).run(a).unwrap().unwrap();
//! assert_eq!(cycle.vertices(), &[a, b, c, a]);
//! ```

use fixedbitset::FixedBitSet;
use thiserror::Error;
use tracing::debug;

use crate::core::{graph::UndirectedGraph, id::VertexId};

/// A closed walk traversing every edge of the graph exactly once.
///
/// See [module](self) documentation for more details and example.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EulerianCycle {
    walk: Vec<VertexId>,
}

impl EulerianCycle {
    pub fn on<W>(graph: &UndirectedGraph<W>) -> EulerianCycleBuilder<'_, W> {
        EulerianCycleBuilder { graph }
    }

    /// Vertices of the walk in order. The first and the last vertex are both
    /// the start vertex.
    pub fn vertices(&self) -> &[VertexId] {
        &self.walk
    }

    /// Number of edges traversed by the walk.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.walk.len() - 1
    }

    pub fn into_vec(self) -> Vec<VertexId> {
        self.walk
    }
}

pub struct EulerianCycleBuilder<'a, W> {
    graph: &'a UndirectedGraph<W>,
}

impl<'a, W> EulerianCycleBuilder<'a, W> {
    pub fn run(self, start: VertexId) -> Result<Option<EulerianCycle>, Error> {
        hierholzer(self.graph, start)
    }
}

/// The error encountered during an [`EulerianCycle`] run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    #[error("vertex {0:?} does not exist")]
    UnknownVertex(VertexId),
}

#[tracing::instrument(skip_all, fields(start = ?start, vertices = graph.vertex_count(), edges = graph.edge_count()))]
fn hierholzer<W>(graph: &UndirectedGraph<W>, start: VertexId) -> Result<Option<EulerianCycle>, Error> {
    if !graph.contains(start) {
        return Err(Error::UnknownVertex(start));
    }

    if graph.outgoing(start).is_empty() {
        debug!("start vertex has no edges");
        return Ok(None);
    }

    if let Some(odd) = graph
        .vertex_ids()
        .find(|&vertex| graph.outgoing(vertex).len() % 2 == 1)
    {
        debug!(vertex = ?odd, "vertex with odd degree");
        return Ok(None);
    }

    // Both connections of an undirected edge share the edge id, so marking the
    // id consumes the edge in both directions.
    let mut used = FixedBitSet::with_capacity(graph.edge_count());
    // Index of the first connection of each vertex that may still be unused.
    let mut cursor = vec![0; graph.vertex_count()];

    let mut stack = vec![start];
    let mut walk = Vec::with_capacity(graph.edge_count() + 1);

    while let Some(&vertex) = stack.last() {
        let connections = graph.outgoing(vertex);
        let next = &mut cursor[vertex.as_usize()];

        while *next < connections.len() && used.contains(connections[*next].edge().as_usize()) {
            *next += 1;
        }

        match connections.get(*next) {
            Some(connection) => {
                used.insert(connection.edge().as_usize());
                stack.push(connection.end());
            }
            None => {
                // Dead end closes a subcycle, which gets spliced into the
                // resulting walk at the position of this vertex.
                walk.push(vertex);
                stack.pop();
            }
        }
    }

    if used.count_ones(..) != graph.edge_count() {
        debug!(
            consumed = used.count_ones(..),
            "edges unreachable from the start vertex"
        );
        return Ok(None);
    }

    walk.reverse();

    Ok(Some(EulerianCycle { walk }))
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use proptest::prelude::*;

    use crate::infra::{
        proptest::graph_undirected,
        testing::{create_cycle, create_path},
    };

    use super::*;

    fn v(index: usize) -> VertexId {
        index.into()
    }

    fn is_eulerian_cycle<W>(graph: &UndirectedGraph<W>, cycle: &EulerianCycle) -> bool {
        let walk = cycle.vertices();

        if walk.first() != walk.last() || cycle.len() != graph.edge_count() {
            return false;
        }

        let mut used = FixedBitSet::with_capacity(graph.edge_count());

        walk.windows(2).all(|pair| {
            let edge = graph
                .outgoing(pair[0])
                .iter()
                .find(|c| c.end() == pair[1] && !used.contains(c.edge().as_usize()));

            match edge {
                Some(c) => {
                    used.insert(c.edge().as_usize());
                    true
                }
                None => false,
            }
        })
    }

    fn create_bowtie() -> UndirectedGraph<()> {
        let mut graph = UndirectedGraph::new();

        for id in 1..=5 {
            graph.add_node(id, format!("{id}")).unwrap();
        }

        graph.add_edge(v(0), v(1), ()).unwrap();
        graph.add_edge(v(1), v(2), ()).unwrap();
        graph.add_edge(v(2), v(0), ()).unwrap();
        graph.add_edge(v(0), v(3), ()).unwrap();
        graph.add_edge(v(3), v(4), ()).unwrap();
        graph.add_edge(v(4), v(0), ()).unwrap();

        graph
    }

    #[test]
    fn euler_four_cycle() {
        let graph = create_cycle(4, |_| ());
        let cycle = EulerianCycle::on(&graph).run(v(0)).unwrap().unwrap();

        assert_eq!(cycle.vertices(), &[v(0), v(1), v(2), v(3), v(0)]);
        assert_eq!(cycle.len(), 4);
        assert!(is_eulerian_cycle(&graph, &cycle));
    }

    #[test]
    fn euler_path_has_none() {
        let graph = create_path(4, |_| ());

        assert_eq!(EulerianCycle::on(&graph).run(v(1)).unwrap(), None);
    }

    #[test]
    fn euler_isolated_start_has_none() {
        let mut graph = create_cycle(3, |_| ());
        graph.add_node(4, "isolated").unwrap();

        assert_eq!(EulerianCycle::on(&graph).run(v(3)).unwrap(), None);
    }

    #[test]
    fn euler_bowtie_splices_subcycle() {
        let graph = create_bowtie();

        for start in graph.vertex_ids() {
            let cycle = EulerianCycle::on(&graph).run(start).unwrap().unwrap();

            assert_eq!(cycle.vertices()[0], start);
            assert_eq!(cycle.vertices().len(), 7);
            assert!(is_eulerian_cycle(&graph, &cycle));
        }
    }

    #[test]
    fn euler_disconnected_edges_has_none() {
        let mut graph = create_cycle(3, |_| ());

        for id in 4..=6 {
            graph.add_node(id, format!("{id}")).unwrap();
        }

        graph.add_edge(v(3), v(4), ()).unwrap();
        graph.add_edge(v(4), v(5), ()).unwrap();
        graph.add_edge(v(5), v(3), ()).unwrap();

        assert_eq!(EulerianCycle::on(&graph).run(v(0)).unwrap(), None);
    }

    #[test]
    fn euler_self_loop_and_parallel_edges() {
        let mut graph = UndirectedGraph::new();

        graph.add_node(1, "a").unwrap();
        graph.add_node(2, "b").unwrap();

        graph.add_edge(v(0), v(1), ()).unwrap();
        graph.add_edge(v(0), v(1), ()).unwrap();
        graph.add_edge(v(1), v(1), ()).unwrap();

        let cycle = EulerianCycle::on(&graph).run(v(0)).unwrap().unwrap();

        assert_eq!(cycle.len(), 3);
        assert!(is_eulerian_cycle(&graph, &cycle));
    }

    #[test]
    fn euler_unknown_vertex() {
        let graph = create_cycle(3, |_| ());

        assert_matches!(
            EulerianCycle::on(&graph).run(v(3)),
            Err(Error::UnknownVertex(_))
        );
    }

    #[test]
    fn euler_idempotent() {
        let graph = create_bowtie();

        assert_eq!(
            EulerianCycle::on(&graph).run(v(2)).unwrap(),
            EulerianCycle::on(&graph).run(v(2)).unwrap()
        );
    }

    proptest! {
        #[test]
        #[ignore = "run property-based tests with `cargo test proptest_ -- --ignored`"]
        fn proptest_euler_valid_when_found(graph in graph_undirected(Just(())).allow_loops().multi_edges(), start: prop::sample::Index) {
            let n = graph.vertex_count();
            prop_assume!(n > 0);

            let start = VertexId::from_usize(start.index(n));

            if let Some(cycle) = EulerianCycle::on(&graph).run(start).unwrap() {
                prop_assert!(is_eulerian_cycle(&graph, &cycle));
                prop_assert_eq!(cycle.vertices()[0], start);
            }
        }

        #[test]
        #[ignore = "run property-based tests with `cargo test proptest_ -- --ignored`"]
        fn proptest_euler_doubled_connected_graph(graph in graph_undirected(Just(())).connected(), start: prop::sample::Index) {
            let n = graph.vertex_count();
            prop_assume!(n > 0 && graph.edge_count() > 0);

            // Doubling every edge makes all degrees even.
            let mut graph = graph;
            let edges = graph
                .edges()
                .map(|c| (c.start(), c.end()))
                .collect::<Vec<_>>();

            for (start, end) in edges {
                graph.add_edge(start, end, ()).unwrap();
            }

            let start = VertexId::from_usize(start.index(n));
            let cycle = EulerianCycle::on(&graph).run(start).unwrap();

            prop_assert!(cycle.is_some());
            prop_assert!(is_eulerian_cycle(&graph, &cycle.unwrap()));
        }
    }
}
