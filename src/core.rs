//! The shared data model: nodes, connections and the graph owning them.

pub mod error;
pub mod graph;
pub mod id;
pub mod marker;
pub mod node;
pub mod weight;

use self::{error::AddEdgeError, id::EdgeId, id::VertexId};

/// Insertion of a connection between two existing vertices regardless of the
/// edge type.
///
/// For an [undirected](marker::Undirected) graph this is
/// [`add_edge`](graph::Graph::add_edge), for a [directed](marker::Directed)
/// graph it is [`add_arc`](graph::Graph::add_arc). Builders that are generic
/// over the edge type (the text reader, test factories) go through this trait.
pub trait Connect<W> {
    fn connect(
        &mut self,
        start: VertexId,
        end: VertexId,
        weight: W,
    ) -> Result<EdgeId, AddEdgeError<W>>;
}
