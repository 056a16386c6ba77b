pub mod all_pairs;
pub mod coloring;
pub mod connected_components;
pub mod euler;
pub mod matching;
pub mod max_flow;
pub mod shortest_paths;
pub mod spanning_tree;
pub mod toposort;

pub use all_pairs::AllPairs;
pub use coloring::Coloring;
pub use connected_components::StronglyConnectedComponents;
pub use euler::EulerianCycle;
pub use matching::{Bipartition, Matching};
pub use max_flow::MaxFlow;
pub use shortest_paths::ShortestPaths;
pub use spanning_tree::MinimumSpanningTree;
pub use toposort::TopoSort;
