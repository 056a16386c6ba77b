#![no_main]

use libfuzzer_sys::fuzz_target;

use grapha::{
    infra::testing::check_consistency,
    io::{pajek, AnyGraph},
};

fuzz_target!(|input: &str| {
    let Ok(graph) = pajek::read_str::<i32>(input) else {
        return;
    };

    let result = match &graph {
        AnyGraph::Undirected(graph) => check_consistency(graph),
        AnyGraph::Directed(graph) => check_consistency(graph),
    };

    result.as_ref().map_err(ToString::to_string).unwrap();

    assert_eq!(pajek::kind_of(input).unwrap_or(pajek::GraphKind::Undirected), graph.kind());
});
