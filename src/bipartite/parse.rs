use anyhow::{Context, Result, anyhow};

use super::graph::RawGraph;

pub const SAMPLE_GRAPH_JSON: &str = include_str!("../../assets/sample_graph.json");

pub fn parse_raw_graph(raw: &str) -> Result<RawGraph> {
    let graph: RawGraph = serde_json::from_str(raw).context("invalid raw graph JSON")?;

    if graph.sources.is_empty() && graph.targets.is_empty() && !graph.links.is_empty() {
        return Err(anyhow!(
            "raw graph has {} links but no source or target labels",
            graph.links.len()
        ));
    }

    Ok(graph)
}

/// Pretty-printed JSON in the same shape [`parse_raw_graph`] accepts.
pub fn raw_graph_to_json(graph: &RawGraph) -> Result<String> {
    serde_json::to_string_pretty(graph).context("failed to serialize raw graph")
}

pub fn sample_graph() -> Result<RawGraph> {
    parse_raw_graph(SAMPLE_GRAPH_JSON).context("failed to parse bundled sample graph")
}
