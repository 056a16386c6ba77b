//! Greedy sequential [vertex coloring] of an undirected graph.
//!
//! Vertices are processed in the order of their ids and each gets the smallest
//! color not used by its already colored neighbours. The coloring is always
//! proper, but the number of colors is not minimal in general.
//!
//! [vertex coloring]: https://en.wikipedia.org/wiki/Greedy_coloring
//!
//! # Examples
//!
//! ```
//! use grapha::{algo::Coloring, UndirectedGraph};
//!
//! let mut graph = UndirectedGraph::new();
//!
//! let a = graph.add_node(1, "a").unwrap();
//! let b = graph.add_node(2, "b").unwrap();
//! let c = graph.add_node(3, "c").unwrap();
//!
//! graph.add_edge(a, b, ()).unwrap();
//! graph.add_edge(b, c, ()).unwrap();
//!
//! let coloring = Coloring::on(&graph).run();
//!
//! assert_eq!(coloring.colors(), &[0, 1, 0]);
//! assert_eq!(coloring.color_count(), 2);
//! ```

use fixedbitset::FixedBitSet;

use crate::core::{graph::UndirectedGraph, id::VertexId};

/// Color index of every vertex.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Coloring {
    colors: Vec<usize>,
}

impl Coloring {
    pub fn on<W>(graph: &UndirectedGraph<W>) -> ColoringBuilder<'_, W> {
        ColoringBuilder { graph }
    }

    pub fn color(&self, vertex: VertexId) -> Option<usize> {
        self.colors.get(vertex.as_usize()).copied()
    }

    /// Colors indexed by vertex id.
    pub fn colors(&self) -> &[usize] {
        &self.colors
    }

    pub fn color_count(&self) -> usize {
        self.colors.iter().max().map_or(0, |max| max + 1)
    }

    /// Vertices grouped by their color, the outer index is the color.
    pub fn classes(&self) -> Vec<Vec<VertexId>> {
        let mut classes = vec![Vec::new(); self.color_count()];

        for (vertex, &color) in self.colors.iter().enumerate() {
            classes[color].push(VertexId::from_usize(vertex));
        }

        classes
    }
}

pub struct ColoringBuilder<'a, W> {
    graph: &'a UndirectedGraph<W>,
}

impl<'a, W> ColoringBuilder<'a, W> {
    pub fn run(self) -> Coloring {
        greedy(self.graph)
    }
}

#[tracing::instrument(skip_all, fields(vertices = graph.vertex_count(), edges = graph.edge_count()))]
fn greedy<W>(graph: &UndirectedGraph<W>) -> Coloring {
    let vertex_count = graph.vertex_count();
    let mut colors: Vec<Option<usize>> = vec![None; vertex_count];

    // A vertex with degree d never needs more than d + 1 colors, so the set is
    // resized only when a vertex with a larger degree comes.
    let mut taken = FixedBitSet::new();

    for vertex in graph.vertex_ids() {
        let neighbours = graph.outgoing(vertex);
        taken.clear();
        taken.grow(neighbours.len() + 1);

        for connection in neighbours {
            if let Some(color) = colors[connection.end().as_usize()] {
                if color < taken.len() {
                    taken.insert(color);
                }
            }
        }

        // There are at most `neighbours.len()` taken colors among the first
        // `neighbours.len() + 1`, so some bit is always zero.
        let color = (0..taken.len())
            .find(|&color| !taken.contains(color))
            .unwrap_or(neighbours.len());
        colors[vertex.as_usize()] = Some(color);
    }

    let colors = colors.into_iter().flatten().collect::<Vec<_>>();
    tracing::debug!(colors = colors.iter().max().map_or(0, |max| max + 1), "colored");

    Coloring { colors }
}
