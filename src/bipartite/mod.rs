mod error;
mod graph;
mod id_set;
mod parse;
mod selection;
mod subgraph;

pub use error::GraphError;
pub use graph::{BipartiteGraph, NodeClass, NodeRef, RawGraph};
pub use parse::{raw_graph_to_json, sample_graph};
pub use selection::{
    DEFAULT_SOURCE_HUE, DEFAULT_TARGET_HUE, HUE_RANGE, LinkHighlight, SelectionEvent, SelectionState,
    TIGHTNESS_RANGE,
};
pub use subgraph::induced_subgraph;
