use crate::core::graph::DirectedGraph;

use super::{dfs::dfs, Error, TopoSort};

pub struct TopoSortBuilder<'a, W> {
    graph: &'a DirectedGraph<W>,
}

impl TopoSort {
    pub fn on<W>(graph: &DirectedGraph<W>) -> TopoSortBuilder<'_, W> {
        TopoSortBuilder { graph }
    }
}

impl<'a, W> TopoSortBuilder<'a, W> {
    pub fn run(self) -> Result<TopoSort, Error> {
        dfs(self.graph)
    }
}
