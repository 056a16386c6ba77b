//! Identifiers of vertices and edges inside a graph.
//!
//! Both identifiers are dense, zero-based indices into the arenas owned by
//! the [`Graph`](super::graph::Graph). They are *internal* identifiers: the
//! external, one-based id assigned by the graph builder is available as
//! [`Node::id`](super::node::Node::id) and always equals
//! `vertex_id.as_usize() + 1`.
//!
//! Storing plain indices instead of references keeps connections free of
//! lifetimes and makes operations like transposition or building a residual
//! network a matter of copying integers.

use std::fmt;

macro_rules! impl_id {
    ($name:ident) => {
        impl $name {
            #[inline]
            pub const fn from_usize(index: usize) -> Self {
                Self(index)
            }

            #[inline]
            pub const fn as_usize(&self) -> usize {
                self.0
            }
        }

        impl From<usize> for $name {
            fn from(index: usize) -> Self {
                Self(index)
            }
        }

        impl From<$name> for usize {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

/// Zero-based index of a vertex in its graph.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VertexId(usize);

/// Zero-based index of a *logical* edge in its graph.
///
/// The two connections that form an undirected edge share the same edge id.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EdgeId(usize);

impl_id!(VertexId);
impl_id!(EdgeId);

impl fmt::Debug for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

impl fmt::Debug for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "e{}", self.0)
    }
}
