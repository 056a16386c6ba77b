use std::{collections::TryReserveError, marker::PhantomData, ops::Index};

use super::{
    error::{AddEdgeError, AddEdgeErrorKind, AddNodeError},
    id::{EdgeId, VertexId},
    marker::{Directed, Direction, EdgeType, Undirected},
    node::{Connection, Node},
    Connect,
};

/// A weighted graph owning its nodes and all their connections.
///
/// Nodes live in an arena indexed by [`VertexId`], connections refer to their
/// endpoints by index. The graph is meant to be built once and then only read
/// by algorithms, which all take `&Graph`.
///
/// The edge type is chosen by the `Ty` marker, see [`UndirectedGraph`] and
/// [`DirectedGraph`].
#[derive(Debug, Clone, PartialEq)]
pub struct Graph<W, Ty: EdgeType> {
    nodes: Vec<Node<W>>,
    // Every connection of every node, in insertion order. The two directions
    // of an undirected edge are always adjacent.
    connections: Vec<Connection<W>>,
    edge_count: usize,
    ty: PhantomData<fn() -> Ty>,
}

pub type UndirectedGraph<W> = Graph<W, Undirected>;
pub type DirectedGraph<W> = Graph<W, Directed>;

impl<W, Ty: EdgeType> Graph<W, Ty> {
    pub fn new() -> Self {
        Self::with_capacity(0, 0)
    }

    pub fn with_capacity(vertex_capacity: usize, edge_capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(vertex_capacity),
            connections: Vec::with_capacity(edge_capacity * Ty::connections_per_edge()),
            edge_count: 0,
            ty: PhantomData,
        }
    }

    /// Reserves room for more vertices and edges, failing instead of aborting
    /// when the allocation cannot be made.
    pub fn try_reserve(
        &mut self,
        additional_vertices: usize,
        additional_edges: usize,
    ) -> Result<(), TryReserveError> {
        self.nodes.try_reserve(additional_vertices)?;
        self.connections
            .try_reserve(additional_edges.saturating_mul(Ty::connections_per_edge()))
    }

    pub fn is_directed(&self) -> bool {
        Ty::is_directed()
    }

    /// Adds a node with the given external id.
    ///
    /// Ids must arrive in increasing order, starting at 1 and without gaps, so
    /// that the node with id `i` is stored at [`VertexId`] `i - 1`.
    pub fn add_node(
        &mut self,
        id: usize,
        name: impl Into<String>,
    ) -> Result<VertexId, AddNodeError> {
        let expected = self.nodes.len() + 1;

        if id != expected {
            return Err(AddNodeError::new(id, expected));
        }

        self.nodes.push(Node::new(id, name.into()));
        Ok(VertexId::from_usize(id - 1))
    }

    pub fn vertex_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of logical edges (arcs for a directed graph).
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn contains(&self, vertex: VertexId) -> bool {
        vertex.as_usize() < self.nodes.len()
    }

    pub fn node(&self, vertex: VertexId) -> Option<&Node<W>> {
        self.nodes.get(vertex.as_usize())
    }

    pub fn nodes(&self) -> &[Node<W>] {
        &self.nodes
    }

    pub fn vertex_ids(&self) -> impl Iterator<Item = VertexId> + Clone {
        (0..self.nodes.len()).map(VertexId::from_usize)
    }

    /// Translates an external, one-based node id to the vertex id.
    pub fn find(&self, id: usize) -> Option<VertexId> {
        (1..=self.nodes.len())
            .contains(&id)
            .then(|| VertexId::from_usize(id - 1))
    }

    /// All connections of the graph. An undirected edge is listed twice, once
    /// for each direction.
    pub fn connections(&self) -> &[Connection<W>] {
        &self.connections
    }

    /// One connection per logical edge, in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = &Connection<W>> {
        self.connections.iter().step_by(Ty::connections_per_edge())
    }

    /// Outgoing connections of a vertex, empty for a vertex that does not
    /// exist.
    pub fn outgoing(&self, vertex: VertexId) -> &[Connection<W>] {
        self.node(vertex).map(Node::connections).unwrap_or_default()
    }

    fn check_endpoints(&self, start: VertexId, end: VertexId) -> Result<(), AddEdgeErrorKind> {
        if !self.contains(start) {
            Err(AddEdgeErrorKind::SourceAbsent(start))
        } else if !self.contains(end) {
            Err(AddEdgeErrorKind::DestinationAbsent(end))
        } else {
            Ok(())
        }
    }

    fn push_connection(&mut self, connection: Connection<W>)
    where
        W: Copy,
    {
        self.nodes[connection.start().as_usize()].add_connection(connection);
        self.connections.push(connection);
    }
}

impl<W: Copy> Graph<W, Undirected> {
    /// Adds an undirected edge as a pair of reciprocal connections.
    ///
    /// Adding the same edge twice creates a parallel edge.
    pub fn add_edge(
        &mut self,
        start: VertexId,
        end: VertexId,
        weight: W,
    ) -> Result<EdgeId, AddEdgeError<W>> {
        self.check_endpoints(start, end)
            .map_err(|kind| AddEdgeError::new(weight, kind))?;

        let edge = EdgeId::from_usize(self.edge_count);
        let connection = Connection::new(weight, start, end, edge, true);

        self.push_connection(connection);
        self.push_connection(connection.reversed());
        self.edge_count += 1;

        Ok(edge)
    }

    /// Degree of a vertex. A self-loop contributes two.
    pub fn degree(&self, vertex: VertexId) -> usize {
        self.outgoing(vertex).len()
    }
}

impl<W: Copy> Graph<W, Directed> {
    /// Adds an arc from `start` to `end`.
    pub fn add_arc(
        &mut self,
        start: VertexId,
        end: VertexId,
        weight: W,
    ) -> Result<EdgeId, AddEdgeError<W>> {
        self.check_endpoints(start, end)
            .map_err(|kind| AddEdgeError::new(weight, kind))?;

        let edge = EdgeId::from_usize(self.edge_count);
        self.push_connection(Connection::new(weight, start, end, edge, false));
        self.edge_count += 1;

        Ok(edge)
    }

    pub fn out_degree(&self, vertex: VertexId) -> usize {
        self.outgoing(vertex).len()
    }

    /// Number of arcs ending in the vertex. Scans all arcs.
    pub fn in_degree(&self, vertex: VertexId) -> usize {
        self.connections
            .iter()
            .filter(|arc| arc.end() == vertex)
            .count()
    }

    pub fn degree_directed(&self, vertex: VertexId, dir: Direction) -> usize {
        match dir {
            Direction::Outgoing => self.out_degree(vertex),
            Direction::Incoming => self.in_degree(vertex),
        }
    }

    /// Total degree, incoming plus outgoing.
    pub fn degree(&self, vertex: VertexId) -> usize {
        self.out_degree(vertex) + self.in_degree(vertex)
    }

    /// A new graph with the same nodes and every arc reversed.
    ///
    /// Arcs keep their edge ids, so an arc of the transpose can be matched
    /// with its original.
    pub fn transpose(&self) -> Self {
        let mut transposed = Self {
            nodes: self.nodes.iter().map(Node::without_connections).collect(),
            connections: Vec::with_capacity(self.connections.len()),
            edge_count: self.edge_count,
            ty: PhantomData,
        };

        for arc in self.connections.iter() {
            transposed.push_connection(arc.reversed());
        }

        transposed
    }
}

impl<W: Copy> Connect<W> for Graph<W, Undirected> {
    fn connect(
        &mut self,
        start: VertexId,
        end: VertexId,
        weight: W,
    ) -> Result<EdgeId, AddEdgeError<W>> {
        self.add_edge(start, end, weight)
    }
}

impl<W: Copy> Connect<W> for Graph<W, Directed> {
    fn connect(
        &mut self,
        start: VertexId,
        end: VertexId,
        weight: W,
    ) -> Result<EdgeId, AddEdgeError<W>> {
        self.add_arc(start, end, weight)
    }
}

impl<W, Ty: EdgeType> Default for Graph<W, Ty> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W, Ty: EdgeType> Index<VertexId> for Graph<W, Ty> {
    type Output = Node<W>;

    fn index(&self, index: VertexId) -> &Self::Output {
        &self.nodes[index.as_usize()]
    }
}
