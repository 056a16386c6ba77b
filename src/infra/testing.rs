use thiserror::Error;

use crate::core::{
    graph::{DirectedGraph, Graph, UndirectedGraph},
    id::VertexId,
    marker::{Direction, EdgeType},
    Connect,
};

fn with_vertices<W, Ty: EdgeType>(vertex_count: usize, edge_capacity: usize) -> Graph<W, Ty> {
    let mut graph = Graph::with_capacity(vertex_count, edge_capacity);

    for id in 1..=vertex_count {
        graph
            .add_node(id, id.to_string())
            .expect("ids are consecutive");
    }

    graph
}

fn connect<W, G: Connect<W>>(graph: &mut G, start: usize, end: usize, weight: W) {
    graph
        .connect(VertexId::from_usize(start), VertexId::from_usize(end), weight)
        .ok()
        .expect("endpoints exist");
}

fn path_in<W, Ty>(vertex_count: usize, mut weight: impl FnMut(usize) -> W) -> Graph<W, Ty>
where
    Ty: EdgeType,
    Graph<W, Ty>: Connect<W>,
{
    let edge_count = vertex_count.saturating_sub(1);
    let mut graph = with_vertices(vertex_count, edge_count);

    for i in 0..edge_count {
        connect(&mut graph, i, i + 1, weight(i));
    }

    graph
}

/// Path `0 - 1 - ... - (n - 1)`. The weight of the `i`-th edge is given by
/// `weight(i)`.
pub fn create_path<W: Copy>(
    vertex_count: usize,
    weight: impl FnMut(usize) -> W,
) -> UndirectedGraph<W> {
    path_in(vertex_count, weight)
}

/// Path `0 -> 1 -> ... -> (n - 1)`.
pub fn create_path_directed<W: Copy>(
    vertex_count: usize,
    weight: impl FnMut(usize) -> W,
) -> DirectedGraph<W> {
    path_in(vertex_count, weight)
}

/// Cycle `0 - 1 - ... - (n - 1) - 0`, the closing edge is added last.
pub fn create_cycle<W: Copy>(
    vertex_count: usize,
    mut weight: impl FnMut(usize) -> W,
) -> UndirectedGraph<W> {
    let mut graph = path_in(vertex_count, &mut weight);

    if vertex_count > 1 {
        connect(&mut graph, vertex_count - 1, 0, weight(vertex_count - 1));
    }

    graph
}

pub fn create_complete<W: Copy>(
    vertex_count: usize,
    mut weight: impl FnMut(usize) -> W,
) -> UndirectedGraph<W> {
    let mut graph = with_vertices(vertex_count, vertex_count * vertex_count.saturating_sub(1) / 2);
    let mut edge = 0;

    for u in 0..vertex_count {
        for v in (u + 1)..vertex_count {
            connect(&mut graph, u, v, weight(edge));
            edge += 1;
        }
    }

    graph
}

/// Bipartite graph with vertices `0..lhs` on the left side and
/// `lhs..(lhs + rhs)` on the right side. `connect(i, j)` decides whether the
/// `i`-th left vertex is adjacent to the `j`-th right vertex.
pub fn create_bipartite<W: Copy>(
    vertex_count_lhs: usize,
    vertex_count_rhs: usize,
    mut edge: impl FnMut(usize, usize) -> Option<W>,
) -> UndirectedGraph<W> {
    let mut graph = with_vertices(vertex_count_lhs + vertex_count_rhs, vertex_count_lhs);

    for i in 0..vertex_count_lhs {
        for j in 0..vertex_count_rhs {
            if let Some(weight) = edge(i, j) {
                connect(&mut graph, i, vertex_count_lhs + j, weight);
            }
        }
    }

    graph
}

fn degree_dir(dir: &Direction) -> &'static str {
    match dir {
        Direction::Outgoing => "out",
        Direction::Incoming => "in",
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConsistencyCheckError {
    #[error("vertex ids iterator count ({0}) is not equal to vertex count ({1})")]
    VertexIdsVertexCountMismatch(usize, usize),
    #[error("node at index {0} has id {1}")]
    NodeIdMismatch(usize, usize),
    #[error("connection {0:?} -> {1:?} stored on node {2:?}")]
    ForeignConnection(VertexId, VertexId, VertexId),
    #[error("connection {0:?} -> {1:?} refers to a missing vertex")]
    DanglingConnection(VertexId, VertexId),
    #[error("connection count ({0}) does not match edge count ({1})")]
    ConnectionCountMismatch(usize, usize),
    #[error("nodes hold {0} connections, graph lists {1}")]
    AdjacencyMismatch(usize, usize),
    #[error("connection {0:?} -> {1:?} has no reverse connection")]
    MissingReverse(VertexId, VertexId),
    #[error("sum of degrees ({0}) is not equal to doubled edge count ({1})")]
    HandshakingLemma(usize, usize),
    #[error("sum of {} degrees ({0}) is not equal to edge count ({1})", degree_dir(.2))]
    HandshakingLemmaDirected(usize, usize, Direction),
}

pub fn check_consistency<W, Ty: EdgeType>(graph: &Graph<W, Ty>) -> Result<(), ConsistencyCheckError> {
    let vertex_count = graph.vertex_count();
    let edge_count = graph.edge_count();

    let ids_count = graph.vertex_ids().count();
    if ids_count != vertex_count {
        return Err(ConsistencyCheckError::VertexIdsVertexCountMismatch(
            ids_count,
            vertex_count,
        ));
    }

    for (index, node) in graph.nodes().iter().enumerate() {
        if node.id() != index + 1 {
            return Err(ConsistencyCheckError::NodeIdMismatch(index, node.id()));
        }
    }

    let connection_count = graph.connections().len();
    if connection_count != edge_count * Ty::connections_per_edge() {
        return Err(ConsistencyCheckError::ConnectionCountMismatch(
            connection_count,
            edge_count,
        ));
    }

    let mut adjacency_count = 0;

    for vertex in graph.vertex_ids() {
        for connection in graph.outgoing(vertex) {
            adjacency_count += 1;

            if connection.start() != vertex {
                return Err(ConsistencyCheckError::ForeignConnection(
                    connection.start(),
                    connection.end(),
                    vertex,
                ));
            }

            if !graph.contains(connection.end()) {
                return Err(ConsistencyCheckError::DanglingConnection(
                    connection.start(),
                    connection.end(),
                ));
            }

            if !Ty::is_directed() {
                let has_reverse = graph.outgoing(connection.end()).iter().any(|other| {
                    other.edge() == connection.edge() && other.end() == connection.start()
                });

                if !has_reverse {
                    return Err(ConsistencyCheckError::MissingReverse(
                        connection.start(),
                        connection.end(),
                    ));
                }
            }
        }
    }

    if adjacency_count != connection_count {
        return Err(ConsistencyCheckError::AdjacencyMismatch(
            adjacency_count,
            connection_count,
        ));
    }

    if Ty::is_directed() {
        let out_degrees = graph
            .vertex_ids()
            .map(|v| graph.outgoing(v).len())
            .sum::<usize>();

        if out_degrees != edge_count {
            return Err(ConsistencyCheckError::HandshakingLemmaDirected(
                out_degrees,
                edge_count,
                Direction::Outgoing,
            ));
        }

        let in_degrees = graph
            .vertex_ids()
            .map(|v| graph.connections().iter().filter(|c| c.end() == v).count())
            .sum::<usize>();

        if in_degrees != edge_count {
            return Err(ConsistencyCheckError::HandshakingLemmaDirected(
                in_degrees,
                edge_count,
                Direction::Incoming,
            ));
        }
    } else {
        let degrees = graph
            .vertex_ids()
            .map(|v| graph.outgoing(v).len())
            .sum::<usize>();

        if degrees != 2 * edge_count {
            return Err(ConsistencyCheckError::HandshakingLemma(
                degrees,
                2 * edge_count,
            ));
        }
    }

    Ok(())
}

/// Installs a `tracing` subscriber writing to the test output, filtered by
/// `RUST_LOG`. Calling it repeatedly is harmless.
#[cfg(test)]
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

#[cfg(test)]
pub fn to_petgraph_undirected<W: Copy>(
    graph: &UndirectedGraph<W>,
) -> petgraph::graph::UnGraph<(), W> {
    let mut reference =
        petgraph::graph::UnGraph::with_capacity(graph.vertex_count(), graph.edge_count());

    for _ in graph.vertex_ids() {
        reference.add_node(());
    }

    for edge in graph.edges() {
        reference.add_edge(
            petgraph::graph::NodeIndex::new(edge.start().as_usize()),
            petgraph::graph::NodeIndex::new(edge.end().as_usize()),
            edge.weight(),
        );
    }

    reference
}

#[cfg(test)]
pub fn to_petgraph_directed<W: Copy>(graph: &DirectedGraph<W>) -> petgraph::graph::DiGraph<(), W> {
    let mut reference =
        petgraph::graph::DiGraph::with_capacity(graph.vertex_count(), graph.edge_count());

    for _ in graph.vertex_ids() {
        reference.add_node(());
    }

    for arc in graph.edges() {
        reference.add_edge(
            petgraph::graph::NodeIndex::new(arc.start().as_usize()),
            petgraph::graph::NodeIndex::new(arc.end().as_usize()),
            arc.weight(),
        );
    }

    reference
}
