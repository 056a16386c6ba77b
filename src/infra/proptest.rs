//! Strategies generating random graphs for property-based tests.

use std::{fmt, marker::PhantomData};

use proptest::{
    collection::vec,
    prelude::*,
    sample::Index,
    strategy::{BoxedStrategy, NewTree, ValueTree},
    test_runner::TestRunner,
};
use rustc_hash::FxHashSet;

use crate::core::{
    graph::Graph,
    id::VertexId,
    marker::{Directed, EdgeType, Undirected},
    Connect,
};

pub fn graph_undirected<S: Strategy>(weight: S) -> GraphStrategy<S, Undirected> {
    GraphStrategy::new(weight)
}

pub fn graph_directed<S: Strategy>(weight: S) -> GraphStrategy<S, Directed> {
    GraphStrategy::new(weight)
}

pub struct GraphStrategy<S, Ty> {
    weight: S,
    params: StrategyParams,
    ty: PhantomData<fn() -> Ty>,
}

impl<S: fmt::Debug, Ty> fmt::Debug for GraphStrategy<S, Ty> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GraphStrategy")
            .field("weight", &self.weight)
            .field("params", &self.params)
            .finish()
    }
}

macro_rules! delegate_builder_fn {
    ($name:ident$(, $param:ident: $param_type:ty)*) => {
        #[doc = concat!("See [StrategyParams::", stringify!($name), "](StrategyParams::", stringify!($name), ") for details.")]
        pub fn $name(self, $($param: $param_type),*) -> Self {
            Self {
                params: self.params.$name($($param,)*),
                ..self
            }
        }
    }
}

impl<S: Strategy, Ty> GraphStrategy<S, Ty> {
    pub fn new(weight: S) -> Self {
        Self::with_params(weight, StrategyParams::default())
    }

    pub fn with_params(weight: S, params: StrategyParams) -> Self {
        Self {
            weight,
            params,
            ty: PhantomData,
        }
    }

    // Builder pattern on the strategy itself to allow usage as in
    // `graph_undirected(0..10).max_size(32).connected()`.
    delegate_builder_fn!(max_size, max_size: usize);
    delegate_builder_fn!(connected);
    delegate_builder_fn!(acyclic);
    delegate_builder_fn!(allow_loops);
    delegate_builder_fn!(multi_edges);
}

#[derive(Debug, Clone, Copy)]
pub struct StrategyParams {
    max_size: usize,
    connected: bool,
    acyclic: bool,
    allow_loops: bool,
    multi_edges: bool,
}

impl Default for StrategyParams {
    fn default() -> Self {
        Self {
            max_size: 64,
            connected: false,
            acyclic: false,
            allow_loops: false,
            multi_edges: false,
        }
    }
}

impl StrategyParams {
    pub fn max_size(self, max_size: usize) -> Self {
        Self { max_size, ..self }
    }

    /// Every vertex is reachable from the first one when the edge direction
    /// is ignored.
    pub fn connected(self) -> Self {
        Self {
            connected: true,
            ..self
        }
    }

    /// Arcs always go from a lower to a higher vertex id. Implies no loops.
    pub fn acyclic(self) -> Self {
        Self {
            acyclic: true,
            ..self
        }
    }

    pub fn allow_loops(self) -> Self {
        Self {
            allow_loops: true,
            ..self
        }
    }

    pub fn multi_edges(self) -> Self {
        Self {
            multi_edges: true,
            ..self
        }
    }
}

impl<S, Ty> GraphStrategy<S, Ty>
where
    S: Strategy + Clone + 'static,
    S::Value: Copy,
    Ty: EdgeType + fmt::Debug,
    Graph<S::Value, Ty>: Connect<S::Value>,
{
    fn generator(&self) -> BoxedStrategy<Graph<S::Value, Ty>> {
        let weight = self.weight.clone();
        let params = self.params;

        (0..=params.max_size)
            .prop_flat_map(move |n| {
                let bound = n.max(1);
                let edges = vec((0..bound, 0..bound, weight.clone()), 0..=3 * n);
                let tree = vec((any::<Index>(), weight.clone()), n.saturating_sub(1));
                (Just(n), edges, tree)
            })
            .prop_map(move |(n, edges, tree)| build(n, edges, tree, params))
            .boxed()
    }
}

impl<S, Ty> Strategy for GraphStrategy<S, Ty>
where
    S: Strategy + Clone + 'static,
    S::Value: Copy,
    Ty: EdgeType + fmt::Debug,
    Graph<S::Value, Ty>: Connect<S::Value>,
{
    type Tree = Box<dyn ValueTree<Value = Graph<S::Value, Ty>>>;
    type Value = Graph<S::Value, Ty>;

    fn new_tree(&self, runner: &mut TestRunner) -> NewTree<Self> {
        self.generator().new_tree(runner)
    }
}

fn build<W, Ty>(
    vertex_count: usize,
    edges: Vec<(usize, usize, W)>,
    tree: Vec<(Index, W)>,
    params: StrategyParams,
) -> Graph<W, Ty>
where
    W: Copy,
    Ty: EdgeType,
    Graph<W, Ty>: Connect<W>,
{
    let mut graph = Graph::with_capacity(vertex_count, edges.len() + tree.len());

    for id in 1..=vertex_count {
        graph
            .add_node(id, id.to_string())
            .expect("ids are consecutive");
    }

    let mut seen = FxHashSet::default();

    // The spanning tree goes first, each vertex is attached to one of the
    // vertices before it.
    let tree = tree
        .into_iter()
        .enumerate()
        .filter(|_| params.connected)
        .map(|(i, (parent, weight))| (parent.index(i + 1), i + 1, weight));

    for (start, end, weight) in tree.chain(edges) {
        if start == end && (params.acyclic || !params.allow_loops) {
            continue;
        }

        let (start, end) = if params.acyclic || !Ty::is_directed() {
            (start.min(end), start.max(end))
        } else {
            (start, end)
        };

        if !params.multi_edges && !seen.insert((start, end)) {
            continue;
        }

        graph
            .connect(VertexId::from_usize(start), VertexId::from_usize(end), weight)
            .ok()
            .expect("endpoints exist");
    }

    graph
}
