use super::id::{EdgeId, VertexId};

/// One direction of an edge.
///
/// A directed arc is exactly one connection. An undirected edge between `a`
/// and `b` is two connections, `a -> b` stored on `a` and `b -> a` stored on
/// `b`, sharing the same [`EdgeId`] and both flagged as bidirectional.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Connection<W> {
    weight: W,
    start: VertexId,
    end: VertexId,
    edge: EdgeId,
    bidirectional: bool,
}

impl<W> Connection<W> {
    pub(crate) fn new(
        weight: W,
        start: VertexId,
        end: VertexId,
        edge: EdgeId,
        bidirectional: bool,
    ) -> Self {
        Self {
            weight,
            start,
            end,
            edge,
            bidirectional,
        }
    }

    pub fn start(&self) -> VertexId {
        self.start
    }

    pub fn end(&self) -> VertexId {
        self.end
    }

    /// The logical edge this connection belongs to.
    pub fn edge(&self) -> EdgeId {
        self.edge
    }

    pub fn is_bidirectional(&self) -> bool {
        self.bidirectional
    }

    /// The same connection traversed in the opposite direction.
    #[must_use]
    pub fn reversed(&self) -> Self
    where
        W: Copy,
    {
        Self {
            start: self.end,
            end: self.start,
            ..*self
        }
    }
}

impl<W: Copy> Connection<W> {
    pub fn weight(&self) -> W {
        self.weight
    }
}

/// A vertex with its external id, display name and outgoing connections.
#[derive(Debug, Clone, PartialEq)]
pub struct Node<W> {
    id: usize,
    name: String,
    outgoing: Vec<Connection<W>>,
}

impl<W> Node<W> {
    pub(crate) fn new(id: usize, name: String) -> Self {
        Self {
            id,
            name,
            outgoing: Vec::new(),
        }
    }

    /// External, one-based id.
    pub fn id(&self) -> usize {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Outgoing connections in insertion order.
    pub fn connections(&self) -> &[Connection<W>] {
        &self.outgoing
    }

    /// Number of outgoing connections.
    ///
    /// For an undirected graph this is the degree of the vertex, with a
    /// self-loop counted twice.
    pub fn degree(&self) -> usize {
        self.outgoing.len()
    }

    /// Distinct end vertices of the outgoing connections, in the order of
    /// their first occurrence.
    pub fn neighbours(&self) -> Vec<VertexId> {
        let mut neighbours = Vec::with_capacity(self.outgoing.len());

        for connection in self.outgoing.iter() {
            // Degrees are small in practice, a linear scan beats hashing here.
            if !neighbours.contains(&connection.end) {
                neighbours.push(connection.end);
            }
        }

        neighbours
    }

    /// The first outgoing connection ending in `other`, if any.
    ///
    /// This is a linear scan over the outgoing connections.
    pub fn connection_with(&self, other: VertexId) -> Option<&Connection<W>> {
        self.outgoing
            .iter()
            .find(|connection| connection.end == other)
    }

    pub(crate) fn add_connection(&mut self, connection: Connection<W>) {
        self.outgoing.push(connection);
    }

    pub(crate) fn without_connections(&self) -> Self {
        Self::new(self.id, self.name.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn conn(end: usize, edge: usize) -> Connection<i32> {
        Connection::new(1, VertexId::from_usize(0), end.into(), edge.into(), true)
    }

    #[test]
    fn neighbours_are_distinct() {
        let mut node = Node::new(1, String::from("a"));

        node.add_connection(conn(2, 0));
        node.add_connection(conn(1, 1));
        node.add_connection(conn(2, 2));

        assert_eq!(node.neighbours(), vec![2.into(), 1.into()]);
        assert_eq!(node.degree(), 3);
    }

    #[test]
    fn connection_with_finds_first() {
        let mut node = Node::new(1, String::from("a"));

        node.add_connection(conn(2, 0));
        node.add_connection(conn(2, 1));

        assert_eq!(
            node.connection_with(2.into()).map(|c| c.edge()),
            Some(EdgeId::from_usize(0))
        );
        assert!(node.connection_with(3.into()).is_none());
    }

    #[test]
    fn reversed_keeps_edge() {
        let c = conn(2, 5).reversed();

        assert_eq!(c.start(), 2.into());
        assert_eq!(c.end(), 0.into());
        assert_eq!(c.edge(), 5.into());
    }
}
