use tracing::debug;

use crate::{
    common::{DfsEvent, DfsEvents},
    core::graph::DirectedGraph,
};

use super::StronglyConnectedComponents;

#[tracing::instrument(skip_all, fields(vertices = graph.vertex_count(), arcs = graph.edge_count()))]
pub fn kosaraju<W: Copy>(graph: &DirectedGraph<W>) -> StronglyConnectedComponents {
    // First pass: finish order of a full depth-first search.
    let mut finished = DfsEvents::new(graph, graph.vertex_ids())
        .filter_map(|event| match event {
            DfsEvent::Close { vertex, .. } => Some(vertex),
            _ => None,
        })
        .collect::<Vec<_>>();

    finished.reverse();

    // Second pass: each tree of the search on the transposed graph, started in
    // the order of decreasing finish time, is a component.
    let transpose = graph.transpose();

    let mut components: Vec<Vec<_>> = Vec::new();
    let mut component_of = vec![0; graph.vertex_count()];

    for event in DfsEvents::new(&transpose, finished) {
        if let DfsEvent::Open { vertex, root, .. } = event {
            if root {
                components.push(Vec::new());
            }

            component_of[vertex.as_usize()] = components.len() - 1;

            if let Some(component) = components.last_mut() {
                component.push(vertex);
            }
        }
    }

    debug!(components = components.len(), "strongly connected components found");

    StronglyConnectedComponents {
        components,
        component_of,
    }
}
