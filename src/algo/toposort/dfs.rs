use tracing::debug;

use crate::{
    common::{DfsEvent, DfsEvents},
    core::graph::DirectedGraph,
};

use super::{Error, TopoSort};

#[tracing::instrument(skip_all, fields(vertices = graph.vertex_count(), arcs = graph.edge_count()))]
pub fn dfs<W>(graph: &DirectedGraph<W>) -> Result<TopoSort, Error> {
    let vertex_count = graph.vertex_count();

    let mut order = Vec::with_capacity(vertex_count);
    let mut discovery = vec![0; vertex_count];
    let mut finish = vec![0; vertex_count];

    for event in DfsEvents::new(graph, graph.vertex_ids()) {
        match event {
            DfsEvent::Open { vertex, time, .. } => discovery[vertex.as_usize()] = time,
            DfsEvent::Close { vertex, time } => {
                finish[vertex.as_usize()] = time;
                order.push(vertex);
            }
            DfsEvent::BackEdge { from, to } => {
                debug!(?from, ?to, "back edge");
                return Err(Error::Cycle { from, to });
            }
            DfsEvent::TreeEdge { .. } | DfsEvent::CrossForwardEdge { .. } => {}
        }
    }

    // Vertices closed later come first.
    order.reverse();

    Ok(TopoSort {
        order,
        discovery,
        finish,
    })
}
