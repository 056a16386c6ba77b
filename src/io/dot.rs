//! Export to the [DOT language](https://graphviz.org/doc/info/lang.html).

use std::{
    fmt::{self, Display},
    io,
};

use crate::core::{graph::Graph, marker::EdgeType};

/// DOT exporter. Vertices are labeled by their names and edges by their
/// weights.
///
/// # Examples
///
/// ```
/// use grapha::{io::Dot, UndirectedGraph};
///
/// let mut graph = UndirectedGraph::new();
///
/// let a = graph.add_node(1, "a").unwrap();
/// let b = graph.add_node(2, "b").unwrap();
/// graph.add_edge(a, b, 3).unwrap();
///
/// let dot = Dot::new("G").to_string(&graph);
///
/// assert_eq!(
///     dot,
///     "graph G {\n    v1 [label=\"a\"];\n    v2 [label=\"b\"];\n    v1 -- v2 [label=\"3\"];\n}\n"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dot {
    name: String,
}

impl Dot {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Writes the graph into any [`fmt::Write`] sink.
    pub fn write<W, Ty, O>(&self, graph: &Graph<W, Ty>, out: &mut O) -> fmt::Result
    where
        W: Display + Copy,
        Ty: EdgeType,
        O: fmt::Write,
    {
        let (keyword, line) = if Ty::is_directed() {
            ("digraph", "->")
        } else {
            ("graph", "--")
        };

        writeln!(out, "{keyword} {} {{", self.name)?;

        for node in graph.nodes() {
            writeln!(out, "    v{} [label={:?}];", node.id(), node.name())?;
        }

        // Undirected edges are listed once, in the direction they were added.
        for connection in graph.edges() {
            writeln!(
                out,
                "    v{} {line} v{} [label=\"{}\"];",
                connection.start().as_usize() + 1,
                connection.end().as_usize() + 1,
                connection.weight()
            )?;
        }

        out.write_str("}\n")
    }

    pub fn to_string<W: Display + Copy, Ty: EdgeType>(&self, graph: &Graph<W, Ty>) -> String {
        let mut out = String::new();
        // Writing into a string cannot fail.
        let _ = self.write(graph, &mut out);
        out
    }

    pub fn export<W, Ty, O>(&self, graph: &Graph<W, Ty>, out: &mut O) -> io::Result<()>
    where
        W: Display + Copy,
        Ty: EdgeType,
        O: io::Write,
    {
        out.write_all(self.to_string(graph).as_bytes())
    }
}
