use fixedbitset::FixedBitSet;
use tracing::{debug, trace};

use crate::{
    common::IndexedMinHeap,
    core::{graph::Graph, id::VertexId, marker::EdgeType, weight::Weight},
};

use super::{Error, ShortestPaths};

#[tracing::instrument(skip_all, fields(source = ?source, goal = ?goal, vertices = graph.vertex_count()))]
pub fn dijkstra<W, Ty>(
    graph: &Graph<W, Ty>,
    source: VertexId,
    goal: Option<VertexId>,
) -> Result<ShortestPaths<W>, Error>
where
    W: Weight,
    Ty: EdgeType,
{
    // Negative weights are rejected anywhere in the graph, reachable or not.
    if let Some(connection) = graph.connections().iter().find(|c| c.weight().is_negative()) {
        debug!(edge = ?connection.edge(), "negative weight");
        return Err(Error::NegativeWeight);
    }

    let vertex_count = graph.vertex_count();

    let mut visited = FixedBitSet::with_capacity(vertex_count);
    let mut dist = vec![None; vertex_count];
    let mut pred = vec![None; vertex_count];

    // Vertices are queued when first discovered and their priority is lowered
    // in place on every improvement, so each vertex is popped exactly once.
    let mut queue = IndexedMinHeap::with_vertex_bound(vertex_count);

    dist[source.as_usize()] = Some(W::zero());
    queue.insert(source, W::zero())?;

    while let Some((vertex, vertex_dist)) = queue.pop_min() {
        visited.insert(vertex.as_usize());
        trace!(?vertex, dist = ?vertex_dist, "settled");

        if goal == Some(vertex) {
            debug!("goal reached");
            break;
        }

        for connection in graph.outgoing(vertex) {
            let edge_dist = connection.weight();
            let next = connection.end();

            if visited.contains(next.as_usize()) {
                continue;
            }

            let next_dist = vertex_dist + edge_dist;

            match dist[next.as_usize()] {
                None => {
                    dist[next.as_usize()] = Some(next_dist);
                    pred[next.as_usize()] = Some(vertex);
                    queue.insert(next, next_dist)?;
                }
                Some(curr_dist) if next_dist < curr_dist => {
                    dist[next.as_usize()] = Some(next_dist);
                    pred[next.as_usize()] = Some(vertex);
                    queue.decrease_priority(next, next_dist)?;
                }
                Some(_) => {}
            }
        }
    }

    if let Some(goal) = goal {
        if !visited.contains(goal.as_usize()) {
            return Err(Error::GoalNotReached);
        }
    }

    Ok(ShortestPaths { source, dist, pred })
}
