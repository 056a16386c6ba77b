use std::collections::VecDeque;

use fixedbitset::FixedBitSet;
use tracing::{debug, trace};

use crate::{
    common::Matrix,
    core::{graph::DirectedGraph, id::VertexId, marker::Directed, weight::Weight},
};

use super::{Error, MaxFlow};

#[tracing::instrument(skip_all, fields(source = ?source, sink = ?sink, vertices = graph.vertex_count(), arcs = graph.edge_count()))]
pub fn edmonds_karp<W: Weight>(
    graph: &DirectedGraph<W>,
    source: VertexId,
    sink: VertexId,
) -> Result<MaxFlow<W>, Error> {
    let n = graph.vertex_count();
    let mut capacity = Matrix::<W, Directed>::new(n, W::zero());

    for arc in graph.edges() {
        let weight = arc.weight();

        if weight.is_negative() {
            debug!(arc = ?arc.edge(), "negative capacity");
            return Err(Error::NegativeCapacity);
        }

        // Self-loops cannot carry any flow between different vertices.
        if arc.start() != arc.end() {
            let cell = &mut capacity[(arc.start().as_usize(), arc.end().as_usize())];
            *cell = *cell + weight;
        }
    }

    let mut residual = capacity.clone();
    let mut value = W::zero();
    let mut augmentations = 0usize;

    let source_side = loop {
        let (pred, reached) = shortest_augmenting_path(&residual, source);

        if !reached.contains(sink.as_usize()) {
            break reached;
        }

        let path = path_to(&pred, sink);

        let bottleneck = path
            .iter()
            .map(|&(u, v)| residual[(u, v)])
            .reduce(|min, r| if r < min { r } else { min })
            .unwrap_or_else(W::zero);

        for &(u, v) in path.iter() {
            residual[(u, v)] = residual[(u, v)] - bottleneck;
            residual[(v, u)] = residual[(v, u)] + bottleneck;
        }

        value = value + bottleneck;
        augmentations += 1;

        trace!(length = path.len(), bottleneck = ?bottleneck, "augmented");
    };

    debug!(value = ?value, augmentations, "maximum flow found");

    Ok(MaxFlow {
        value,
        capacity,
        residual,
        source_side,
    })
}

/// Breadth-first search over arcs with positive residual capacity.
fn shortest_augmenting_path<W: Weight>(
    residual: &Matrix<W, Directed>,
    source: VertexId,
) -> (Vec<Option<usize>>, FixedBitSet) {
    let n = residual.size();

    let mut pred = vec![None; n];
    let mut reached = FixedBitSet::with_capacity(n);
    let mut queue = VecDeque::new();

    reached.insert(source.as_usize());
    queue.push_back(source.as_usize());

    while let Some(u) = queue.pop_front() {
        for (v, &r) in residual.row(u).enumerate() {
            if r > W::zero() && !reached.put(v) {
                pred[v] = Some(u);
                queue.push_back(v);
            }
        }
    }

    (pred, reached)
}

/// Arcs of the path from the source to `sink` as `(from, to)` pairs.
fn path_to(pred: &[Option<usize>], sink: VertexId) -> Vec<(usize, usize)> {
    let mut path = Vec::new();
    let mut v = sink.as_usize();

    while let Some(u) = pred[v] {
        path.push((u, v));
        v = u;
    }

    path.reverse();
    path
}
