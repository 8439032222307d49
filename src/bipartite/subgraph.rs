use std::collections::HashMap;

use super::graph::{BipartiteGraph, RawGraph, RawLink};
use super::selection::SelectionState;

/// Raw graph made of every selected or highlighted link and its endpoints.
///
/// Labels keep first-seen order over the parent's link order. The result is
/// meant to be fed into a fresh [`BipartiteGraph::build`].
pub fn induced_subgraph(graph: &BipartiteGraph, state: &SelectionState) -> RawGraph {
    let mut sources = Vec::new();
    let mut targets = Vec::new();
    let mut source_remap: HashMap<usize, usize> = HashMap::new();
    let mut target_remap: HashMap<usize, usize> = HashMap::new();
    let mut links = Vec::new();

    for link in graph
        .links
        .iter()
        .filter(|link| state.is_link_included(graph, link))
    {
        let source = *source_remap.entry(link.source).or_insert_with(|| {
            sources.push(graph.source_of(link).id.clone());
            sources.len() - 1
        });
        let target = *target_remap.entry(link.target).or_insert_with(|| {
            targets.push(graph.target_of(link).id.clone());
            targets.len() - 1
        });

        links.push(RawLink {
            source,
            target,
            value: link.value,
        });
    }

    RawGraph {
        sources,
        targets,
        links,
    }
}
