//! Reader of graphs in a subset of the [Pajek] `.net` format.
//!
//! ```text
//! % comment
//! *vertices 3
//! 1 Alice
//! 2 "Bob Smith"
//! 3 Carol
//! *edges
//! 1 2 4
//! 2 3 1
//! ```
//!
//! Section headers are case-insensitive. A `*vertices N` header declares
//! vertices with ids `1..=N`, lines below it give their names (remaining
//! tokens joined by single spaces, surrounding quotes stripped). Vertex lines
//! may come in any order, a vertex without a line is named by its id. The
//! `*edges` section makes the graph undirected, `*arcs` makes it directed;
//! the two cannot be mixed. Edge lines are `start end [weight]`, a missing
//! weight is 1 and further tokens are ignored. Blank lines and lines starting
//! with `%` are skipped.
//!
//! [Pajek]: http://vlado.fmf.uni-lj.si/pub/networks/pajek/
//!
//! # Examples
//!
//! ```
//! use grapha::io::{pajek, AnyGraph};
//!
//! let input = "*vertices 2\n1 a\n2 b\n*arcs\n1 2 7\n";
//!
//! let AnyGraph::Directed(graph) = pajek::read_str::<i64>(input).unwrap() else {
//!     panic!("expected a directed graph");
//! };
//!
//! assert_eq!(graph.edge_count(), 1);
//! assert_eq!(graph.nodes()[1].name(), "b");
//! ```

use std::{
    fmt,
    io::{self, Read},
    str::FromStr,
};

use rustc_hash::FxHashMap;
use thiserror::Error;
use tracing::debug;

use crate::core::{
    error::AddNodeError,
    graph::{DirectedGraph, Graph, UndirectedGraph},
    id::VertexId,
    marker::{Directed, EdgeType, Undirected},
    Connect,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GraphKind {
    Undirected,
    Directed,
}

impl fmt::Display for GraphKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GraphKind::Undirected => f.write_str("undirected"),
            GraphKind::Directed => f.write_str("directed"),
        }
    }
}

/// A graph whose edge type was decided by the input.
#[derive(Debug, Clone, PartialEq)]
pub enum AnyGraph<W> {
    Undirected(UndirectedGraph<W>),
    Directed(DirectedGraph<W>),
}

impl<W> AnyGraph<W> {
    pub fn kind(&self) -> GraphKind {
        match self {
            AnyGraph::Undirected(_) => GraphKind::Undirected,
            AnyGraph::Directed(_) => GraphKind::Directed,
        }
    }

    pub fn vertex_count(&self) -> usize {
        match self {
            AnyGraph::Undirected(graph) => graph.vertex_count(),
            AnyGraph::Directed(graph) => graph.vertex_count(),
        }
    }

    pub fn edge_count(&self) -> usize {
        match self {
            AnyGraph::Undirected(graph) => graph.edge_count(),
            AnyGraph::Directed(graph) => graph.edge_count(),
        }
    }

    pub fn into_undirected(self) -> Option<UndirectedGraph<W>> {
        match self {
            AnyGraph::Undirected(graph) => Some(graph),
            AnyGraph::Directed(_) => None,
        }
    }

    pub fn into_directed(self) -> Option<DirectedGraph<W>> {
        match self {
            AnyGraph::Directed(graph) => Some(graph),
            AnyGraph::Undirected(_) => None,
        }
    }
}

/// Malformed input, with the 1-based number of the offending line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {kind}")]
pub struct ReadError {
    pub line: usize,
    pub kind: ReadErrorKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReadErrorKind {
    #[error("unknown section `{0}`")]
    UnknownSection(String),
    #[error("`*vertices` section declared twice")]
    DuplicateVerticesSection,
    #[error("`*vertices` header needs a vertex count")]
    MissingVertexCount,
    #[error("line outside of any section")]
    OutsideSection,
    #[error("edges and arcs cannot be mixed in one graph")]
    MixedEdgeKinds,
    #[error("invalid number `{0}`")]
    InvalidNumber(String),
    #[error("invalid weight `{0}`")]
    InvalidWeight(String),
    #[error("vertex {id} is out of range 1..={count}")]
    VertexOutOfRange { id: usize, count: usize },
    #[error("vertex {0} is listed twice")]
    DuplicateVertex(usize),
    #[error("edge needs both endpoints")]
    MissingEndpoint,
    #[error("cannot allocate {0} vertices")]
    TooManyVertices(usize),
    #[error(transparent)]
    Node(#[from] AddNodeError),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Read(#[from] ReadError),
}

/// Detects the edge type from the first `*edges` or `*arcs` header, without
/// validating the rest of the input.
pub fn kind_of(input: &str) -> Option<GraphKind> {
    input
        .lines()
        .filter_map(|line| line.split_whitespace().next())
        .find_map(|token| section_kind(token).ok().flatten())
}

/// Reads the whole input and parses it, see [`read_str`].
pub fn read<W, R>(mut reader: R) -> Result<AnyGraph<W>, Error>
where
    W: FromStr + From<u8> + Copy,
    R: Read,
{
    let mut input = String::new();
    reader.read_to_string(&mut input)?;
    Ok(read_str(&input)?)
}

#[tracing::instrument(skip_all, fields(bytes = input.len()))]
pub fn read_str<W>(input: &str) -> Result<AnyGraph<W>, ReadError>
where
    W: FromStr + From<u8> + Copy,
{
    let parsed = parse(input)?;

    let graph = match parsed.kind {
        Some(GraphKind::Directed) => AnyGraph::Directed(build::<W, Directed>(parsed)?),
        // A graph without any edge section is undirected.
        _ => AnyGraph::Undirected(build::<W, Undirected>(parsed)?),
    };

    debug!(
        kind = %graph.kind(),
        vertices = graph.vertex_count(),
        edges = graph.edge_count(),
        "graph read"
    );

    Ok(graph)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Preamble,
    Vertices,
    Edges,
}

struct Parsed<W> {
    vertex_count: usize,
    vertices_line: usize,
    names: FxHashMap<usize, String>,
    kind: Option<GraphKind>,
    // Line number, start id, end id, weight.
    edges: Vec<(usize, usize, usize, W)>,
}

/// `Ok(None)` for `*vertices`, `Ok(Some(kind))` for edge sections.
fn section_kind(token: &str) -> Result<Option<GraphKind>, ReadErrorKind> {
    if token.eq_ignore_ascii_case("*vertices") {
        Ok(None)
    } else if token.eq_ignore_ascii_case("*edges") {
        Ok(Some(GraphKind::Undirected))
    } else if token.eq_ignore_ascii_case("*arcs") {
        Ok(Some(GraphKind::Directed))
    } else {
        Err(ReadErrorKind::UnknownSection(token.to_string()))
    }
}

fn parse_id(token: &str, vertex_count: usize) -> Result<usize, ReadErrorKind> {
    let id = token
        .parse::<usize>()
        .map_err(|_| ReadErrorKind::InvalidNumber(token.to_string()))?;

    if (1..=vertex_count).contains(&id) {
        Ok(id)
    } else {
        Err(ReadErrorKind::VertexOutOfRange {
            id,
            count: vertex_count,
        })
    }
}

fn parse_name<'a>(tokens: impl Iterator<Item = &'a str>) -> Option<String> {
    let name = tokens.collect::<Vec<_>>().join(" ");
    let name = name
        .strip_prefix('"')
        .and_then(|name| name.strip_suffix('"'))
        .map(str::to_string)
        .unwrap_or(name);

    (!name.is_empty()).then_some(name)
}

fn parse<W>(input: &str) -> Result<Parsed<W>, ReadError>
where
    W: FromStr + From<u8>,
{
    let mut parsed = Parsed {
        vertex_count: 0,
        vertices_line: 0,
        names: FxHashMap::default(),
        kind: None,
        edges: Vec::new(),
    };

    let mut section = Section::Preamble;
    let mut seen_vertices = false;

    for (index, line) in input.lines().enumerate() {
        let line_no = index + 1;
        let error = |kind| ReadError {
            line: line_no,
            kind,
        };

        let mut tokens = line.split_whitespace();

        let Some(first) = tokens.next() else {
            continue;
        };

        if first.starts_with('%') {
            continue;
        }

        if first.starts_with('*') {
            match section_kind(first).map_err(error)? {
                None => {
                    if seen_vertices {
                        return Err(error(ReadErrorKind::DuplicateVerticesSection));
                    }

                    let count = tokens
                        .next()
                        .ok_or_else(|| error(ReadErrorKind::MissingVertexCount))?;

                    parsed.vertex_count = count
                        .parse()
                        .map_err(|_| error(ReadErrorKind::InvalidNumber(count.to_string())))?;

                    parsed.vertices_line = line_no;
                    seen_vertices = true;
                    section = Section::Vertices;
                }
                Some(kind) => {
                    if parsed.kind.map_or(false, |current| current != kind) {
                        return Err(error(ReadErrorKind::MixedEdgeKinds));
                    }

                    parsed.kind = Some(kind);
                    section = Section::Edges;
                }
            }

            continue;
        }

        match section {
            Section::Preamble => return Err(error(ReadErrorKind::OutsideSection)),
            Section::Vertices => {
                let id = parse_id(first, parsed.vertex_count).map_err(error)?;

                if let Some(name) = parse_name(tokens) {
                    if parsed.names.insert(id, name).is_some() {
                        return Err(error(ReadErrorKind::DuplicateVertex(id)));
                    }
                }
            }
            Section::Edges => {
                let end = tokens
                    .next()
                    .ok_or_else(|| error(ReadErrorKind::MissingEndpoint))?;

                let start = parse_id(first, parsed.vertex_count).map_err(error)?;
                let end = parse_id(end, parsed.vertex_count).map_err(error)?;

                let weight = match tokens.next() {
                    Some(token) => token
                        .parse::<W>()
                        .map_err(|_| error(ReadErrorKind::InvalidWeight(token.to_string())))?,
                    None => W::from(1),
                };

                parsed.edges.push((line_no, start, end, weight));
            }
        }
    }

    Ok(parsed)
}

fn build<W, Ty>(mut parsed: Parsed<W>) -> Result<Graph<W, Ty>, ReadError>
where
    W: Copy,
    Ty: EdgeType,
    Graph<W, Ty>: Connect<W>,
{
    let header_error = |kind| ReadError {
        line: parsed.vertices_line,
        kind,
    };

    let mut graph = Graph::new();
    graph
        .try_reserve(parsed.vertex_count, parsed.edges.len())
        .map_err(|_| header_error(ReadErrorKind::TooManyVertices(parsed.vertex_count)))?;

    for id in 1..=parsed.vertex_count {
        let name = parsed
            .names
            .remove(&id)
            .unwrap_or_else(|| id.to_string());

        graph
            .add_node(id, name)
            .map_err(|error| header_error(error.into()))?;
    }

    for (line, start, end, weight) in parsed.edges {
        // Endpoints were range-checked during parsing.
        graph
            .connect(
                VertexId::from_usize(start - 1),
                VertexId::from_usize(end - 1),
                weight,
            )
            .map_err(|_| ReadError {
                line,
                kind: ReadErrorKind::VertexOutOfRange {
                    id: start.max(end),
                    count: parsed.vertex_count,
                },
            })?;
    }

    Ok(graph)
}
