use std::collections::VecDeque;

use tracing::debug;

use crate::core::{graph::Graph, id::VertexId, marker::EdgeType};

use super::{Error, ShortestPaths};

#[tracing::instrument(skip_all, fields(source = ?source, goal = ?goal, vertices = graph.vertex_count()))]
pub fn bfs<W, Ty>(
    graph: &Graph<W, Ty>,
    source: VertexId,
    goal: Option<VertexId>,
) -> Result<ShortestPaths<usize>, Error>
where
    Ty: EdgeType,
{
    let vertex_count = graph.vertex_count();

    let mut dist = vec![None; vertex_count];
    let mut pred = vec![None; vertex_count];
    let mut queue = VecDeque::new();
    let mut goal_reached = false;

    dist[source.as_usize()] = Some(0);
    queue.push_back((source, 0));

    while let Some((vertex, vertex_dist)) = queue.pop_front() {
        if goal == Some(vertex) {
            debug!(dist = vertex_dist, "goal reached");
            goal_reached = true;
            break;
        }

        for connection in graph.outgoing(vertex) {
            let next = connection.end();

            if dist[next.as_usize()].is_none() {
                dist[next.as_usize()] = Some(vertex_dist + 1);
                pred[next.as_usize()] = Some(vertex);
                queue.push_back((next, vertex_dist + 1));
            }
        }
    }

    if goal.is_some() && !goal_reached {
        return Err(Error::GoalNotReached);
    }

    Ok(ShortestPaths { source, dist, pred })
}
