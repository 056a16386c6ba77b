pub mod algo;
pub mod common;
pub mod core;
pub mod infra;
pub mod io;

pub use crate::core::graph::{DirectedGraph, Graph, UndirectedGraph};

pub mod prelude {
    pub use crate::core::{
        graph::{DirectedGraph, Graph, UndirectedGraph},
        id::{EdgeId, VertexId},
        marker::{Directed, Direction, EdgeType, Undirected},
        node::{Connection, Node},
        weight::Weight,
        Connect,
    };
}
