use std::collections::VecDeque;

use tracing::{debug, trace};

use crate::core::{graph::UndirectedGraph, id::VertexId};

use super::{Bipartition, Matching};

#[tracing::instrument(skip_all, fields(vertices = graph.vertex_count(), edges = graph.edge_count()))]
pub fn hopcroft_karp<W>(graph: &UndirectedGraph<W>, partition: Bipartition) -> Matching {
    let vertex_count = graph.vertex_count();
    let left = partition.left().collect::<Vec<_>>();

    let mut state = State {
        graph,
        mate: vec![None; vertex_count],
        layer: vec![None; vertex_count],
        free_layer: None,
        cursor: vec![0; vertex_count],
    };

    let mut size = 0;
    let mut phases = 0;

    while state.build_layers(&left) {
        phases += 1;
        state.cursor.fill(0);

        let mut augmented = 0;

        for &vertex in left.iter() {
            if state.mate[vertex.as_usize()].is_none() && state.augment(vertex) {
                augmented += 1;
            }
        }

        trace!(phase = phases, augmented, "phase finished");

        if augmented == 0 {
            break;
        }

        size += augmented;
    }

    debug!(size, phases, "maximum matching found");

    Matching {
        mate: state.mate,
        left: partition.into_inner(),
        size,
    }
}

struct State<'a, W> {
    graph: &'a UndirectedGraph<W>,
    mate: Vec<Option<VertexId>>,
    // BFS layer of left vertices in the current phase. `None` means the
    // vertex is not part of the layered graph (or was found to be a dead end).
    layer: Vec<Option<usize>>,
    // Layer of the left vertices adjacent to the closest free right vertex.
    // Augmenting paths of a phase end there and nowhere else.
    free_layer: Option<usize>,
    cursor: Vec<usize>,
}

impl<W> State<'_, W> {
    /// Computes the layers of alternating paths starting in free left vertices,
    /// up to the first layer that reaches a free right vertex. Returns whether
    /// such a layer exists.
    fn build_layers(&mut self, left: &[VertexId]) -> bool {
        let mut queue = VecDeque::new();
        self.layer.fill(None);
        self.free_layer = None;

        for &vertex in left {
            if self.mate[vertex.as_usize()].is_none() {
                self.layer[vertex.as_usize()] = Some(0);
                queue.push_back(vertex);
            }
        }

        while let Some(vertex) = queue.pop_front() {
            let Some(layer) = self.layer[vertex.as_usize()] else {
                continue;
            };

            if self.free_layer.map_or(false, |free| layer > free) {
                break;
            }

            for connection in self.graph.outgoing(vertex) {
                match self.mate[connection.end().as_usize()] {
                    None => {
                        self.free_layer.get_or_insert(layer);
                    }
                    Some(mate)
                        if self.free_layer.is_none() && self.layer[mate.as_usize()].is_none() =>
                    {
                        self.layer[mate.as_usize()] = Some(layer + 1);
                        queue.push_back(mate);
                    }
                    Some(_) => {}
                }
            }
        }

        trace!(free_layer = ?self.free_layer, "layers built");

        self.free_layer.is_some()
    }

    /// Searches for an augmenting path from a free left vertex along the
    /// layers and flips the matching along it.
    fn augment(&mut self, start: VertexId) -> bool {
        // Left vertices on the current path and the right vertices used to get
        // from each one to the next.
        let mut path = vec![start];
        let mut via = Vec::new();

        while let Some(&vertex) = path.last() {
            let connections = self.graph.outgoing(vertex);
            let cursor = &mut self.cursor[vertex.as_usize()];

            let Some(connection) = connections.get(*cursor) else {
                // Dead end, exclude the vertex from the rest of the phase.
                self.layer[vertex.as_usize()] = None;
                path.pop();
                via.pop();
                continue;
            };

            *cursor += 1;
            let right = connection.end();
            let layer = self.layer[vertex.as_usize()];

            match self.mate[right.as_usize()] {
                None if layer.is_some() && layer == self.free_layer => {
                    via.push(right);

                    for (&left, &right) in path.iter().zip(via.iter()) {
                        self.mate[left.as_usize()] = Some(right);
                        self.mate[right.as_usize()] = Some(left);
                    }

                    return true;
                }
                None => {}
                Some(mate) => {
                    let expected = layer
                        .filter(|&layer| self.free_layer.map_or(false, |free| layer < free))
                        .map(|layer| layer + 1);

                    if expected.is_some() && self.layer[mate.as_usize()] == expected {
                        via.push(right);
                        path.push(mate);
                    }
                }
            }
        }

        false
    }
}

#[cfg(test)]
mod tests {
    use crate::infra::testing::create_bipartite;

    use super::*;

    fn v(index: usize) -> VertexId {
        index.into()
    }

    #[test]
    fn layers_stop_at_closest_free_vertex() {
        // Left 0..3, right 3..6. Vertex 0 reaches the free vertex 4 directly.
        // The path 0 - 3 = 1 - 5 is longer and must not be taken.
        let graph = create_bipartite(3, 3, |i, j| {
            matches!((i, j), (0, 0) | (0, 1) | (1, 0) | (1, 2)).then_some(())
        });

        let mut mate = vec![None; 6];
        mate[1] = Some(v(3));
        mate[3] = Some(v(1));

        let mut state = State {
            graph: &graph,
            mate,
            layer: vec![None; 6],
            free_layer: None,
            cursor: vec![0; 6],
        };

        let left = [v(0), v(1), v(2)];

        assert!(state.build_layers(&left));
        assert_eq!(state.free_layer, Some(0));
        assert_eq!(state.layer[0], Some(0));

        assert!(state.augment(v(0)));
        assert_eq!(state.mate[0], Some(v(4)));
        assert_eq!(state.mate[1], Some(v(3)));
    }

    #[test]
    fn layers_of_longer_augmenting_path() {
        // The only augmenting path is 1 - 2 = 0 - 3.
        let graph = create_bipartite(2, 2, |i, j| {
            matches!((i, j), (0, 0) | (0, 1) | (1, 0)).then_some(())
        });

        let mut mate = vec![None; 4];
        mate[0] = Some(v(2));
        mate[2] = Some(v(0));

        let mut state = State {
            graph: &graph,
            mate,
            layer: vec![None; 4],
            free_layer: None,
            cursor: vec![0; 4],
        };

        assert!(state.build_layers(&[v(0), v(1)]));
        assert_eq!(state.free_layer, Some(1));
        assert_eq!(state.layer[0], Some(1));

        assert!(state.augment(v(1)));
        assert_eq!(state.mate[1], Some(v(2)));
        assert_eq!(state.mate[0], Some(v(3)));
    }
}
