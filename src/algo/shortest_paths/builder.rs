use crate::core::{graph::Graph, id::VertexId, marker::EdgeType, weight::Weight};

use super::{algo, bfs::bfs, dijkstra::dijkstra, Error, ShortestPaths};

pub struct ShortestPathsBuilder<'a, W, Ty: EdgeType, A> {
    graph: &'a Graph<W, Ty>,
    goal: Option<VertexId>,
    algo: A,
}

impl<W> ShortestPaths<W> {
    pub fn on<Ty: EdgeType>(graph: &Graph<W, Ty>) -> ShortestPathsBuilder<'_, W, Ty, algo::Dijkstra> {
        ShortestPathsBuilder {
            graph,
            goal: None,
            algo: algo::Dijkstra,
        }
    }
}

impl<'a, W, Ty: EdgeType, A> ShortestPathsBuilder<'a, W, Ty, A> {
    /// Stops the search as soon as the goal vertex is settled. Distances of
    /// vertices further than the goal are then unknown.
    pub fn goal(self, goal: VertexId) -> Self {
        Self {
            goal: Some(goal),
            ..self
        }
    }

    pub fn dijkstra(self) -> ShortestPathsBuilder<'a, W, Ty, algo::Dijkstra> {
        ShortestPathsBuilder {
            graph: self.graph,
            goal: self.goal,
            algo: algo::Dijkstra,
        }
    }

    /// Counts edges instead of summing their weights.
    pub fn bfs(self) -> ShortestPathsBuilder<'a, W, Ty, algo::Bfs> {
        ShortestPathsBuilder {
            graph: self.graph,
            goal: self.goal,
            algo: algo::Bfs,
        }
    }

    fn check_vertices(&self, source: VertexId) -> Result<(), Error> {
        if !self.graph.contains(source) {
            return Err(Error::UnknownVertex(source));
        }

        match self.goal {
            Some(goal) if !self.graph.contains(goal) => Err(Error::UnknownVertex(goal)),
            _ => Ok(()),
        }
    }
}

impl<'a, W: Weight, Ty: EdgeType> ShortestPathsBuilder<'a, W, Ty, algo::Dijkstra> {
    pub fn run(self, source: VertexId) -> Result<ShortestPaths<W>, Error> {
        self.check_vertices(source)?;
        dijkstra(self.graph, source, self.goal)
    }
}

impl<'a, W, Ty: EdgeType> ShortestPathsBuilder<'a, W, Ty, algo::Bfs> {
    pub fn run(self, source: VertexId) -> Result<ShortestPaths<usize>, Error> {
        self.check_vertices(source)?;
        bfs(self.graph, source, self.goal)
    }
}
