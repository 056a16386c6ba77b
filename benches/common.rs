#![allow(dead_code)]

use fastrand::Rng;
use grapha::{
    core::{id::VertexId, marker::EdgeType, Connect},
    Graph,
};
use petgraph::prelude::*;

pub const RANDOM_SEED: u64 = 0xef6f79ed30ba75a;

pub struct RandomEdges {
    v: usize,
    w: usize,
    n: usize,
    p: f32,
}

impl RandomEdges {
    pub fn new(vertex_bound: usize, p: f32) -> Self {
        Self {
            v: 1,
            w: usize::MAX,
            n: vertex_bound,
            p,
        }
    }

    /// Next pair `(v, w)` with `w < v` of a G(n, p) random graph.
    pub fn next_edge(&mut self, rng: &mut Rng) -> Option<(usize, usize)> {
        let Self { v, w, .. } = self;
        let n = self.n;
        let p = self.p;

        if *v >= n {
            return None;
        }

        let r = rng.f32();
        *w = w.wrapping_add(1) + ((1.0 - r).log10() / (1.0 - p).log10()).floor() as usize;

        while *w >= *v && *v < n {
            *w -= *v;
            *v += 1;
        }

        if *v < n { Some((*v, *w)) } else { None }
    }
}

/// Random pairs with the orientation flipped at random, so that directed
/// graphs contain cycles.
fn random_pairs(vertex_count: usize, density: f32, rng: &mut Rng) -> Vec<(usize, usize)> {
    let mut edges = RandomEdges::new(vertex_count, density);
    let mut pairs = Vec::new();

    while let Some((u, v)) = edges.next_edge(rng) {
        pairs.push(if rng.bool() { (u, v) } else { (v, u) });
    }

    pairs
}

pub fn grapha_random<Ty: EdgeType>(
    vertex_count: usize,
    density: f32,
    rng: &mut Rng,
) -> Graph<f32, Ty>
where
    Graph<f32, Ty>: Connect<f32>,
{
    let mut graph = Graph::with_capacity(vertex_count, 0);

    for id in 1..=vertex_count {
        graph.add_node(id, id.to_string()).unwrap();
    }

    for (u, v) in random_pairs(vertex_count, density, rng) {
        graph
            .connect(VertexId::from_usize(u), VertexId::from_usize(v), rng.f32())
            .unwrap();
    }

    graph
}

pub fn grapha_random_undirected(
    vertex_count: usize,
    density: f32,
    rng: &mut Rng,
) -> grapha::UndirectedGraph<f32> {
    grapha_random(vertex_count, density, rng)
}

pub fn grapha_random_directed(
    vertex_count: usize,
    density: f32,
    rng: &mut Rng,
) -> grapha::DirectedGraph<f32> {
    grapha_random(vertex_count, density, rng)
}

pub fn petgraph_random<Ty: petgraph::EdgeType>(
    vertex_count: usize,
    density: f32,
    rng: &mut Rng,
) -> petgraph::Graph<(), f32, Ty> {
    let mut graph = petgraph::Graph::with_capacity(vertex_count, 0);

    for _ in 0..vertex_count {
        graph.add_node(());
    }

    for (u, v) in random_pairs(vertex_count, density, rng) {
        graph.add_edge(NodeIndex::new(u), NodeIndex::new(v), rng.f32());
    }

    graph
}

pub fn petgraph_random_undirected(
    vertex_count: usize,
    density: f32,
    rng: &mut Rng,
) -> petgraph::Graph<(), f32, petgraph::Undirected> {
    petgraph_random(vertex_count, density, rng)
}

pub fn petgraph_random_directed(
    vertex_count: usize,
    density: f32,
    rng: &mut Rng,
) -> petgraph::Graph<(), f32, petgraph::Directed> {
    petgraph_random(vertex_count, density, rng)
}
