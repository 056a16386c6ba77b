//! Depth-first traversal reporting [events](DfsEvent) instead of vertices.
//!
//! The traversal uses an explicit stack with a cursor into the outgoing
//! connections of every open vertex, so deep graphs cannot overflow the call
//! stack.

use crate::core::{graph::Graph, id::VertexId, marker::EdgeType};

/// Depth-first search event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DfsEvent {
    /// A new vertex was discovered.
    Open {
        vertex: VertexId,
        /// Discovery time. Times are shared by open and close events and
        /// start at 1.
        time: usize,
        /// The vertex is a root of a new traversal tree.
        root: bool,
    },

    /// An edge of the tree formed by the traversal.
    TreeEdge { from: VertexId, to: VertexId },

    /// An edge to a vertex that is open, that is, an ancestor of `from` or
    /// `from` itself.
    ///
    /// Presence of a back edge indicates a cycle in a directed graph.
    BackEdge { from: VertexId, to: VertexId },

    /// An edge to an already closed vertex.
    CrossForwardEdge { from: VertexId, to: VertexId },

    /// All connections of the vertex have been reported.
    Close { vertex: VertexId, time: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Unvisited,
    Open,
    Closed,
}

/// Iterator of [`DfsEvent`]s. A new traversal tree is started from the next
/// unvisited vertex in `roots` whenever the previous one is exhausted.
pub struct DfsEvents<'a, W, Ty: EdgeType, R> {
    graph: &'a Graph<W, Ty>,
    roots: R,
    // Open vertices together with the index of their next connection.
    stack: Vec<(VertexId, usize)>,
    state: Vec<State>,
    time: usize,
    pending: Option<DfsEvent>,
}

impl<'a, W, Ty, R> DfsEvents<'a, W, Ty, R>
where
    Ty: EdgeType,
    R: Iterator<Item = VertexId>,
{
    pub fn new(graph: &'a Graph<W, Ty>, roots: impl IntoIterator<IntoIter = R>) -> Self {
        Self {
            graph,
            roots: roots.into_iter(),
            stack: Vec::new(),
            state: vec![State::Unvisited; graph.vertex_count()],
            time: 0,
            pending: None,
        }
    }

    /// Current time, the number of open and close events so far.
    pub fn time(&self) -> usize {
        self.time
    }

    fn open(&mut self, vertex: VertexId, root: bool) -> DfsEvent {
        self.time += 1;
        self.state[vertex.as_usize()] = State::Open;
        self.stack.push((vertex, 0));

        DfsEvent::Open {
            vertex,
            time: self.time,
            root,
        }
    }
}

impl<'a, W, Ty, R> Iterator for DfsEvents<'a, W, Ty, R>
where
    Ty: EdgeType,
    R: Iterator<Item = VertexId>,
{
    type Item = DfsEvent;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(event) = self.pending.take() {
            return Some(event);
        }

        let Some(&mut (vertex, ref mut cursor)) = self.stack.last_mut() else {
            let state = &self.state;
            let root = self.roots.find(|root| {
                state
                    .get(root.as_usize())
                    .is_some_and(|state| *state == State::Unvisited)
            })?;

            return Some(self.open(root, true));
        };

        let graph = self.graph;

        let Some(connection) = graph.outgoing(vertex).get(*cursor) else {
            self.stack.pop();
            self.state[vertex.as_usize()] = State::Closed;
            self.time += 1;

            return Some(DfsEvent::Close {
                vertex,
                time: self.time,
            });
        };

        *cursor += 1;
        let next = connection.end();

        let event = match self.state[next.as_usize()] {
            State::Unvisited => {
                // The opening of the target is reported by the next call.
                let open = self.open(next, false);
                self.pending = Some(open);

                DfsEvent::TreeEdge {
                    from: vertex,
                    to: next,
                }
            }
            State::Open => DfsEvent::BackEdge {
                from: vertex,
                to: next,
            },
            State::Closed => DfsEvent::CrossForwardEdge {
                from: vertex,
                to: next,
            },
        };

        Some(event)
    }
}

#[cfg(test)]
mod tests {
    use crate::core::graph::DirectedGraph;

    use super::*;

    fn v(index: usize) -> VertexId {
        index.into()
    }

    #[test]
    fn events_of_small_graph() {
        let mut graph = DirectedGraph::new();

        for id in 1..=4 {
            graph.add_node(id, format!("{id}")).unwrap();
        }

        graph.add_arc(v(0), v(1), ()).unwrap();
        graph.add_arc(v(1), v(0), ()).unwrap();
        graph.add_arc(v(0), v(2), ()).unwrap();
        graph.add_arc(v(3), v(2), ()).unwrap();

        let events = DfsEvents::new(&graph, graph.vertex_ids()).collect::<Vec<_>>();

        assert_eq!(
            events,
            vec![
                DfsEvent::Open { vertex: v(0), time: 1, root: true },
                DfsEvent::TreeEdge { from: v(0), to: v(1) },
                DfsEvent::Open { vertex: v(1), time: 2, root: false },
                DfsEvent::BackEdge { from: v(1), to: v(0) },
                DfsEvent::Close { vertex: v(1), time: 3 },
                DfsEvent::TreeEdge { from: v(0), to: v(2) },
                DfsEvent::Open { vertex: v(2), time: 4, root: false },
                DfsEvent::Close { vertex: v(2), time: 5 },
                DfsEvent::Close { vertex: v(0), time: 6 },
                DfsEvent::Open { vertex: v(3), time: 7, root: true },
                DfsEvent::CrossForwardEdge { from: v(3), to: v(2) },
                DfsEvent::Close { vertex: v(3), time: 8 },
            ]
        );
    }

    #[test]
    fn roots_order_and_skipping() {
        let mut graph = DirectedGraph::new();

        for id in 1..=3 {
            graph.add_node(id, format!("{id}")).unwrap();
        }

        graph.add_arc(v(2), v(1), ()).unwrap();

        let roots = DfsEvents::new(&graph, [v(2), v(1), v(0), v(9)])
            .filter_map(|event| match event {
                DfsEvent::Open { vertex, root: true, .. } => Some(vertex),
                _ => None,
            })
            .collect::<Vec<_>>();

        assert_eq!(roots, vec![v(2), v(0)]);
    }
}
