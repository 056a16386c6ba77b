use std::fmt;

use thiserror::Error;

use super::id::VertexId;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("adding node {id} failed: {kind}")]
pub struct AddNodeError {
    /// The external id that was requested.
    pub id: usize,
    /// The external id the graph expected next.
    pub expected: usize,
    pub kind: AddNodeErrorKind,
}

impl AddNodeError {
    pub fn new(id: usize, expected: usize) -> Self {
        let kind = if id == 0 {
            AddNodeErrorKind::Zero
        } else if id < expected {
            AddNodeErrorKind::Duplicate
        } else {
            AddNodeErrorKind::Gap
        };

        Self { id, expected, kind }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddNodeErrorKind {
    Zero,
    Duplicate,
    Gap,
}

impl fmt::Display for AddNodeErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            AddNodeErrorKind::Zero => "node ids start at 1",
            AddNodeErrorKind::Duplicate => "a node with this id already exists",
            AddNodeErrorKind::Gap => "node ids must be added without gaps",
        };
        f.write_str(reason)
    }
}

#[derive(Debug, Error, PartialEq)]
#[error("adding edge failed: {kind}")]
pub struct AddEdgeError<W> {
    pub attr: W,
    pub kind: AddEdgeErrorKind,
}

impl<W> AddEdgeError<W> {
    pub fn new(attr: W, kind: AddEdgeErrorKind) -> Self {
        Self { attr, kind }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddEdgeErrorKind {
    SourceAbsent(VertexId),
    DestinationAbsent(VertexId),
}

impl fmt::Display for AddEdgeErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddEdgeErrorKind::SourceAbsent(id) => write!(f, "source {id:?} does not exist"),
            AddEdgeErrorKind::DestinationAbsent(id) => {
                write!(f, "destination {id:?} does not exist")
            }
        }
    }
}
