use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::error::{GraphError, Result};

/// Which column a node belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeClass {
    Source,
    Target,
}

impl NodeClass {
    pub fn label(self) -> &'static str {
        match self {
            Self::Source => "source",
            Self::Target => "target",
        }
    }
}

impl fmt::Display for NodeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RawLink {
    pub source: usize,
    pub target: usize,
    #[serde(default = "default_link_value")]
    pub value: f64,
}

fn default_link_value() -> f64 {
    1.0
}

/// Graph as supplied by the caller: two label lists and index triples.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RawGraph {
    #[serde(default)]
    pub sources: Vec<String>,
    #[serde(default)]
    pub targets: Vec<String>,
    #[serde(default)]
    pub links: Vec<RawLink>,
}

/// Arena handle for a node: its class plus its index inside that class.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeRef {
    pub class: NodeClass,
    pub index: usize,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NodeRecord {
    pub id: String,
    pub index: usize,
    pub class: NodeClass,
    /// Indices into [`BipartiteGraph::links`], ordered by the other endpoint's index.
    pub incident_links: Vec<usize>,
    pub weight: f64,
}

impl NodeRecord {
    fn new(id: &str, index: usize, class: NodeClass) -> Self {
        Self {
            id: id.to_owned(),
            index,
            class,
            incident_links: Vec::new(),
            weight: 0.0,
        }
    }

    pub fn node_ref(&self) -> NodeRef {
        NodeRef {
            class: self.class,
            index: self.index,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct LinkRecord {
    pub id: String,
    /// Index into [`BipartiteGraph::sources`].
    pub source: usize,
    /// Index into [`BipartiteGraph::targets`].
    pub target: usize,
    pub value: f64,
}

#[derive(Clone, Debug)]
pub struct BipartiteGraph {
    pub sources: Vec<NodeRecord>,
    pub targets: Vec<NodeRecord>,
    /// Sorted by source index, then target index.
    pub links: Vec<LinkRecord>,
    link_index_by_id: HashMap<String, usize>,
}

#[cfg(test)]
impl RawGraph {
    pub(crate) fn from_triples(
        sources: &[&str],
        targets: &[&str],
        links: &[(usize, usize, f64)],
    ) -> Self {
        Self {
            sources: sources.iter().map(|label| label.to_string()).collect(),
            targets: targets.iter().map(|label| label.to_string()).collect(),
            links: links
                .iter()
                .map(|&(source, target, value)| RawLink {
                    source,
                    target,
                    value,
                })
                .collect(),
        }
    }
}

pub fn link_id(source: usize, target: usize) -> String {
    format!("{source}-{target}")
}

impl BipartiteGraph {
    /// Builds the node and link arenas from a raw graph.
    ///
    /// Links repeating an earlier `(source, target)` pair are folded into it
    /// and their values summed. The raw graph is not modified.
    pub fn build(raw: &RawGraph) -> Result<Self> {
        let mut sources = raw
            .sources
            .iter()
            .enumerate()
            .map(|(index, label)| NodeRecord::new(label, index, NodeClass::Source))
            .collect::<Vec<_>>();
        let mut targets = raw
            .targets
            .iter()
            .enumerate()
            .map(|(index, label)| NodeRecord::new(label, index, NodeClass::Target))
            .collect::<Vec<_>>();

        let mut sorted = raw.links.iter().enumerate().collect::<Vec<_>>();
        sorted.sort_by_key(|(_, link)| (link.source, link.target));

        let mut links: Vec<LinkRecord> = Vec::with_capacity(sorted.len());
        let mut link_index_by_id = HashMap::with_capacity(sorted.len());

        for (raw_index, raw_link) in sorted {
            if raw_link.source >= sources.len() {
                return Err(GraphError::IndexOutOfBounds {
                    link: raw_index,
                    class: NodeClass::Source,
                    index: raw_link.source,
                    len: sources.len(),
                });
            }
            if raw_link.target >= targets.len() {
                return Err(GraphError::IndexOutOfBounds {
                    link: raw_index,
                    class: NodeClass::Target,
                    index: raw_link.target,
                    len: targets.len(),
                });
            }
            if !raw_link.value.is_finite() || raw_link.value < 0.0 {
                return Err(GraphError::InvalidValue {
                    link: raw_index,
                    value: raw_link.value,
                });
            }

            sources[raw_link.source].weight += raw_link.value;
            targets[raw_link.target].weight += raw_link.value;

            if let Some(last) = links.last_mut()
                && last.source == raw_link.source
                && last.target == raw_link.target
            {
                last.value += raw_link.value;
                continue;
            }

            let link_index = links.len();
            let id = link_id(raw_link.source, raw_link.target);
            sources[raw_link.source].incident_links.push(link_index);
            targets[raw_link.target].incident_links.push(link_index);
            link_index_by_id.insert(id.clone(), link_index);
            links.push(LinkRecord {
                id,
                source: raw_link.source,
                target: raw_link.target,
                value: raw_link.value,
            });
        }

        debug!(
            sources = sources.len(),
            targets = targets.len(),
            links = links.len(),
            folded = raw.links.len() - links.len(),
            "built bipartite graph"
        );

        Ok(Self {
            sources,
            targets,
            links,
            link_index_by_id,
        })
    }

    pub fn nodes(&self, class: NodeClass) -> &[NodeRecord] {
        match class {
            NodeClass::Source => &self.sources,
            NodeClass::Target => &self.targets,
        }
    }

    pub fn node(&self, node: NodeRef) -> Option<&NodeRecord> {
        self.nodes(node.class).get(node.index)
    }

    pub fn source_of(&self, link: &LinkRecord) -> &NodeRecord {
        &self.sources[link.source]
    }

    pub fn target_of(&self, link: &LinkRecord) -> &NodeRecord {
        &self.targets[link.target]
    }

    pub fn link_index(&self, id: &str) -> Option<usize> {
        self.link_index_by_id.get(id).copied()
    }

    pub fn link_by_id(&self, id: &str) -> Option<&LinkRecord> {
        self.link_index(id).and_then(|index| self.links.get(index))
    }

    /// First node of `class` whose id equals `id`.
    pub fn node_by_id(&self, class: NodeClass, id: &str) -> Option<&NodeRecord> {
        self.nodes(class).iter().find(|node| node.id == id)
    }

    /// Links of `node` in stacking order.
    pub fn incident_links<'a>(
        &'a self,
        node: &'a NodeRecord,
    ) -> impl Iterator<Item = &'a LinkRecord> + 'a {
        node.incident_links
            .iter()
            .filter_map(|&index| self.links.get(index))
    }

    /// Sum of all link values; equal to the total weight of either column.
    pub fn total_weight(&self) -> f64 {
        self.links.iter().map(|link| link.value).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty() && self.targets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn raw(sources: &[&str], targets: &[&str], links: &[(usize, usize, f64)]) -> RawGraph {
        RawGraph::from_triples(sources, targets, links)
    }

    fn assert_weight_invariants(graph: &BipartiteGraph) {
        for node in graph.sources.iter().chain(graph.targets.iter()) {
            let incident = graph.incident_links(node).map(|l| l.value).sum::<f64>();
            assert!((node.weight - incident).abs() < 1e-9, "node {}", node.id);
        }
        let source_total = graph.sources.iter().map(|n| n.weight).sum::<f64>();
        let target_total = graph.targets.iter().map(|n| n.weight).sum::<f64>();
        assert!((source_total - graph.total_weight()).abs() < 1e-9);
        assert!((target_total - graph.total_weight()).abs() < 1e-9);
    }

    #[test]
    fn weights_match_small_scenario() {
        let graph =
            BipartiteGraph::build(&raw(&["a", "b"], &["x", "y"], &[(0, 0, 2.0), (0, 1, 3.0), (1, 0, 1.0)]))
                .unwrap();

        let weight = |class, id| graph.node_by_id(class, id).unwrap().weight;
        assert_eq!(weight(NodeClass::Source, "a"), 5.0);
        assert_eq!(weight(NodeClass::Source, "b"), 1.0);
        assert_eq!(weight(NodeClass::Target, "x"), 3.0);
        assert_eq!(weight(NodeClass::Target, "y"), 3.0);
        assert_weight_invariants(&graph);
    }

    #[test]
    fn links_are_sorted_and_input_untouched() {
        let input = raw(
            &["a", "b", "c"],
            &["x", "y"],
            &[(2, 0, 1.0), (0, 1, 1.0), (1, 1, 1.0), (0, 0, 1.0)],
        );
        let before = input.clone();
        let graph = BipartiteGraph::build(&input).unwrap();

        let ids = graph.links.iter().map(|l| l.id.as_str()).collect::<Vec<_>>();
        assert_eq!(ids, vec!["0-0", "0-1", "1-1", "2-0"]);
        assert_eq!(input, before);
    }

    #[test]
    fn incident_links_follow_other_endpoint_order() {
        let graph = BipartiteGraph::build(&raw(
            &["a", "b", "c"],
            &["x", "y", "z"],
            &[(0, 2, 1.0), (2, 0, 2.0), (0, 0, 3.0), (1, 0, 4.0), (0, 1, 5.0)],
        ))
        .unwrap();

        let targets_of_a = graph
            .incident_links(&graph.sources[0])
            .map(|l| l.target)
            .collect::<Vec<_>>();
        assert_eq!(targets_of_a, vec![0, 1, 2]);

        let sources_of_x = graph
            .incident_links(&graph.targets[0])
            .map(|l| l.source)
            .collect::<Vec<_>>();
        assert_eq!(sources_of_x, vec![0, 1, 2]);
        assert_weight_invariants(&graph);
    }

    #[test]
    fn duplicate_pairs_are_summed() {
        let graph = BipartiteGraph::build(&raw(
            &["a"],
            &["x", "y"],
            &[(0, 0, 2.0), (0, 1, 1.0), (0, 0, 5.0)],
        ))
        .unwrap();

        assert_eq!(graph.links.len(), 2);
        assert_eq!(graph.link_by_id("0-0").unwrap().value, 7.0);
        assert_eq!(graph.sources[0].incident_links.len(), 2);
        assert_eq!(graph.targets[0].weight, 7.0);
        assert_weight_invariants(&graph);
    }

    #[test]
    fn out_of_range_index_fails_the_build() {
        let error = BipartiteGraph::build(&raw(&["a"], &["x"], &[(0, 0, 1.0), (0, 3, 1.0)]))
            .unwrap_err();
        assert_eq!(
            error,
            GraphError::IndexOutOfBounds {
                link: 1,
                class: NodeClass::Target,
                index: 3,
                len: 1,
            }
        );

        let error = BipartiteGraph::build(&raw(&[], &["x"], &[(0, 0, 1.0)])).unwrap_err();
        assert!(matches!(
            error,
            GraphError::IndexOutOfBounds {
                class: NodeClass::Source,
                ..
            }
        ));
    }

    #[test]
    fn negative_values_are_rejected() {
        let error = BipartiteGraph::build(&raw(&["a"], &["x"], &[(0, 0, -1.0)])).unwrap_err();
        assert_eq!(error, GraphError::InvalidValue { link: 0, value: -1.0 });
    }

    #[test]
    fn empty_and_zero_weight_inputs_are_valid() {
        let graph = BipartiteGraph::build(&RawGraph::default()).unwrap();
        assert!(graph.is_empty());
        assert_eq!(graph.total_weight(), 0.0);

        let graph = BipartiteGraph::build(&raw(&["a"], &["x"], &[(0, 0, 0.0)])).unwrap();
        assert_eq!(graph.links.len(), 1);
        assert_eq!(graph.sources[0].weight, 0.0);
    }
}
