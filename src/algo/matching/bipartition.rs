use std::collections::VecDeque;

use fixedbitset::FixedBitSet;
use tracing::debug;

use crate::core::{graph::UndirectedGraph, id::VertexId};

use super::Error;

/// Split of the vertices into two sides such that every edge connects
/// vertices on different sides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bipartition {
    left: FixedBitSet,
}

impl Bipartition {
    /// Puts the given vertices on the left side and all other vertices on the
    /// right side, then checks that every edge crosses the sides.
    pub fn new<W>(
        graph: &UndirectedGraph<W>,
        left: impl IntoIterator<Item = VertexId>,
    ) -> Result<Self, Error> {
        let mut side = FixedBitSet::with_capacity(graph.vertex_count());

        for vertex in left {
            if !graph.contains(vertex) {
                return Err(Error::UnknownVertex(vertex));
            }

            side.insert(vertex.as_usize());
        }

        let partition = Self { left: side };
        partition.check(graph)?;

        Ok(partition)
    }

    /// Derives the sides by two-coloring every connected component with a
    /// breadth-first search. The vertex with the lowest id in each component
    /// goes to the left side.
    #[tracing::instrument(skip_all, fields(vertices = graph.vertex_count()))]
    pub fn infer<W>(graph: &UndirectedGraph<W>) -> Result<Self, Error> {
        let vertex_count = graph.vertex_count();

        let mut left = FixedBitSet::with_capacity(vertex_count);
        let mut colored = FixedBitSet::with_capacity(vertex_count);
        let mut queue = VecDeque::new();

        for root in graph.vertex_ids() {
            if colored.put(root.as_usize()) {
                continue;
            }

            left.insert(root.as_usize());
            queue.push_back(root);

            while let Some(vertex) = queue.pop_front() {
                let is_left = left.contains(vertex.as_usize());

                for connection in graph.outgoing(vertex) {
                    let next = connection.end();

                    if !colored.put(next.as_usize()) {
                        left.set(next.as_usize(), !is_left);
                        queue.push_back(next);
                    } else if left.contains(next.as_usize()) == is_left {
                        debug!(start = ?vertex, end = ?next, "odd cycle");
                        return Err(Error::NotBipartite {
                            start: vertex,
                            end: next,
                        });
                    }
                }
            }
        }

        Ok(Self { left })
    }

    pub fn is_left(&self, vertex: VertexId) -> bool {
        self.left.contains(vertex.as_usize())
    }

    pub fn left(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.left.ones().map(VertexId::from_usize)
    }

    pub fn right(&self) -> impl Iterator<Item = VertexId> + '_ {
        (0..self.left.len())
            .filter(|&index| !self.left.contains(index))
            .map(VertexId::from_usize)
    }

    /// Number of vertices the partition was made for.
    pub fn vertex_count(&self) -> usize {
        self.left.len()
    }

    pub(super) fn check<W>(&self, graph: &UndirectedGraph<W>) -> Result<(), Error> {
        if self.vertex_count() != graph.vertex_count() {
            return Err(Error::SizeMismatch {
                partition: self.vertex_count(),
                graph: graph.vertex_count(),
            });
        }

        match graph
            .edges()
            .find(|edge| self.is_left(edge.start()) == self.is_left(edge.end()))
        {
            Some(edge) => Err(Error::NotBipartite {
                start: edge.start(),
                end: edge.end(),
            }),
            None => Ok(()),
        }
    }

    pub(super) fn into_inner(self) -> FixedBitSet {
        self.left
    }
}

#[cfg(test)]
mod tests {
    use crate::infra::testing::{create_bipartite, create_path};

    use super::*;

    fn v(index: usize) -> VertexId {
        index.into()
    }

    #[test]
    fn infer_path_alternates() {
        let graph = create_path(5, |_| ());
        let partition = Bipartition::infer(&graph).unwrap();

        assert_eq!(partition.left().collect::<Vec<_>>(), vec![v(0), v(2), v(4)]);
        assert_eq!(partition.right().collect::<Vec<_>>(), vec![v(1), v(3)]);
    }

    #[test]
    fn infer_matches_construction() {
        let graph = create_bipartite(2, 3, |i, j| ((i + j) % 2 == 0).then_some(()));
        let partition = Bipartition::infer(&graph).unwrap();

        assert!(partition.is_left(v(0)));
        assert!(!partition.is_left(v(2)));
        assert_eq!(partition.vertex_count(), 5);
    }

    #[test]
    fn new_unknown_vertex() {
        let graph = create_path(2, |_| ());

        assert_eq!(
            Bipartition::new(&graph, [v(5)]),
            Err(Error::UnknownVertex(v(5)))
        );
    }

    #[test]
    fn self_loop_is_not_bipartite() {
        let mut graph = create_path(2, |_| ());
        graph.add_edge(v(1), v(1), ()).unwrap();

        assert!(Bipartition::infer(&graph).is_err());
        assert!(Bipartition::new(&graph, [v(0)]).is_err());
    }
}
