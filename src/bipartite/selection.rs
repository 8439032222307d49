use super::graph::{BipartiteGraph, LinkRecord, NodeClass, NodeRecord};
use super::id_set::IdSet;

pub const TIGHTNESS_RANGE: std::ops::RangeInclusive<f64> = -1.0..=0.0;
pub const HUE_RANGE: std::ops::RangeInclusive<f64> = 0.0..=360.0;

pub const DEFAULT_SOURCE_HUE: f64 = 200.0;
pub const DEFAULT_TARGET_HUE: f64 = 20.0;

/// Everything the user has clicked or dialed in for one diagram.
#[derive(Clone, Debug, PartialEq)]
pub struct SelectionState {
    pub selected_source_ids: IdSet,
    pub selected_target_ids: IdSet,
    pub selected_link_ids: IdSet,
    pub tightness: f64,
    pub source_hue: f64,
    pub target_hue: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub enum SelectionEvent {
    ToggleNode { class: NodeClass, id: String },
    ToggleLink { id: String },
    SetTightness(f64),
    SetSourceHue(f64),
    SetTargetHue(f64),
    ClearSources,
    ClearTargets,
    ClearLinks,
}

/// Which endpoint selections a link is reached by.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LinkHighlight {
    Plain,
    Left,
    Right,
    Both,
}

impl LinkHighlight {
    pub fn from_flags(left: bool, right: bool) -> Self {
        match (left, right) {
            (false, false) => Self::Plain,
            (true, false) => Self::Left,
            (false, true) => Self::Right,
            (true, true) => Self::Both,
        }
    }

    pub fn is_highlighted(self) -> bool {
        self != Self::Plain
    }
}

impl Default for SelectionState {
    fn default() -> Self {
        Self {
            selected_source_ids: IdSet::empty(),
            selected_target_ids: IdSet::empty(),
            selected_link_ids: IdSet::empty(),
            tightness: 0.0,
            source_hue: DEFAULT_SOURCE_HUE,
            target_hue: DEFAULT_TARGET_HUE,
        }
    }
}

impl SelectionState {
    /// Empty selections carrying over the scalar settings of `self`.
    pub fn fresh_with_settings(&self) -> Self {
        Self {
            tightness: self.tightness,
            source_hue: self.source_hue,
            target_hue: self.target_hue,
            ..Self::default()
        }
    }

    pub fn apply(&self, event: SelectionEvent) -> Self {
        match event {
            SelectionEvent::ToggleNode { class, id } => self.toggle_node(class, &id),
            SelectionEvent::ToggleLink { id } => self.toggle_link(&id),
            SelectionEvent::SetTightness(value) => self.with_tightness(value),
            SelectionEvent::SetSourceHue(value) => self.with_source_hue(value),
            SelectionEvent::SetTargetHue(value) => self.with_target_hue(value),
            SelectionEvent::ClearSources => self.clear_sources(),
            SelectionEvent::ClearTargets => self.clear_targets(),
            SelectionEvent::ClearLinks => self.clear_links(),
        }
    }

    pub fn toggle_node(&self, class: NodeClass, id: &str) -> Self {
        match class {
            NodeClass::Source => Self {
                selected_source_ids: self.selected_source_ids.toggle(id),
                ..self.clone()
            },
            NodeClass::Target => Self {
                selected_target_ids: self.selected_target_ids.toggle(id),
                ..self.clone()
            },
        }
    }

    pub fn toggle_link(&self, id: &str) -> Self {
        Self {
            selected_link_ids: self.selected_link_ids.toggle(id),
            ..self.clone()
        }
    }

    pub fn with_tightness(&self, tightness: f64) -> Self {
        Self {
            tightness: clamp_to(tightness, &TIGHTNESS_RANGE),
            ..self.clone()
        }
    }

    pub fn with_source_hue(&self, hue: f64) -> Self {
        Self {
            source_hue: clamp_to(hue, &HUE_RANGE),
            ..self.clone()
        }
    }

    pub fn with_target_hue(&self, hue: f64) -> Self {
        Self {
            target_hue: clamp_to(hue, &HUE_RANGE),
            ..self.clone()
        }
    }

    pub fn clear_sources(&self) -> Self {
        Self {
            selected_source_ids: IdSet::empty(),
            ..self.clone()
        }
    }

    pub fn clear_targets(&self) -> Self {
        Self {
            selected_target_ids: IdSet::empty(),
            ..self.clone()
        }
    }

    pub fn clear_links(&self) -> Self {
        Self {
            selected_link_ids: IdSet::empty(),
            ..self.clone()
        }
    }

    pub fn selected_ids(&self, class: NodeClass) -> &IdSet {
        match class {
            NodeClass::Source => &self.selected_source_ids,
            NodeClass::Target => &self.selected_target_ids,
        }
    }

    pub fn hue(&self, class: NodeClass) -> f64 {
        match class {
            NodeClass::Source => self.source_hue,
            NodeClass::Target => self.target_hue,
        }
    }

    pub fn is_left_highlighted(&self, graph: &BipartiteGraph, link: &LinkRecord) -> bool {
        self.selected_source_ids.includes(&graph.source_of(link).id)
    }

    pub fn is_right_highlighted(&self, graph: &BipartiteGraph, link: &LinkRecord) -> bool {
        self.selected_target_ids.includes(&graph.target_of(link).id)
    }

    pub fn is_link_selected(&self, link: &LinkRecord) -> bool {
        self.selected_link_ids.includes(&link.id)
    }

    pub fn is_node_selected(&self, node: &NodeRecord) -> bool {
        self.selected_ids(node.class).includes(&node.id)
    }

    pub fn link_highlight(&self, graph: &BipartiteGraph, link: &LinkRecord) -> LinkHighlight {
        LinkHighlight::from_flags(
            self.is_left_highlighted(graph, link),
            self.is_right_highlighted(graph, link),
        )
    }

    /// True when this link would survive a drill-down.
    pub fn is_link_included(&self, graph: &BipartiteGraph, link: &LinkRecord) -> bool {
        self.is_link_selected(link) || self.link_highlight(graph, link).is_highlighted()
    }

    pub fn has_any_selection(&self) -> bool {
        !(self.selected_source_ids.is_empty()
            && self.selected_target_ids.is_empty()
            && self.selected_link_ids.is_empty())
    }
}

fn clamp_to(value: f64, range: &std::ops::RangeInclusive<f64>) -> f64 {
    if value.is_nan() {
        return *range.start();
    }
    value.clamp(*range.start(), *range.end())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::bipartite::RawGraph;

    fn scenario() -> BipartiteGraph {
        BipartiteGraph::build(&RawGraph::from_triples(
            &["a", "b"],
            &["x", "y"],
            &[(0, 0, 2.0), (0, 1, 3.0), (1, 0, 1.0)],
        ))
        .unwrap()
    }

    #[test]
    fn selecting_a_source_highlights_its_links_only() {
        let graph = scenario();
        let state = SelectionState::default().toggle_node(NodeClass::Source, "a");

        let highlights = graph
            .links
            .iter()
            .map(|link| (link.id.as_str(), state.link_highlight(&graph, link)))
            .collect::<Vec<_>>();
        assert_eq!(
            highlights,
            vec![
                ("0-0", LinkHighlight::Left),
                ("0-1", LinkHighlight::Left),
                ("1-0", LinkHighlight::Plain),
            ]
        );
        assert!(state.is_node_selected(&graph.sources[0]));
        assert!(!state.is_node_selected(&graph.sources[1]));
    }

    #[test]
    fn both_sides_and_explicit_link_selection() {
        let graph = scenario();
        let state = SelectionState::default()
            .toggle_node(NodeClass::Source, "a")
            .toggle_node(NodeClass::Target, "x")
            .toggle_link("1-0");

        let link = |id| graph.link_by_id(id).unwrap();
        assert_eq!(state.link_highlight(&graph, link("0-0")), LinkHighlight::Both);
        assert_eq!(state.link_highlight(&graph, link("0-1")), LinkHighlight::Left);
        assert_eq!(state.link_highlight(&graph, link("1-0")), LinkHighlight::Right);
        assert!(state.is_link_selected(link("1-0")));
        assert!(!state.is_link_selected(link("0-0")));
    }

    #[test]
    fn node_classes_are_tracked_separately() {
        let graph = BipartiteGraph::build(&RawGraph::from_triples(&["n"], &["n"], &[(0, 0, 1.0)])).unwrap();
        let state = SelectionState::default().toggle_node(NodeClass::Target, "n");
        assert!(!state.is_node_selected(&graph.sources[0]));
        assert!(state.is_node_selected(&graph.targets[0]));
    }

    #[test]
    fn transitions_do_not_touch_other_fields() {
        let state = SelectionState::default()
            .toggle_node(NodeClass::Source, "a")
            .toggle_node(NodeClass::Target, "x")
            .toggle_link("0-0")
            .with_tightness(-0.5);

        let cleared = state.clear_targets();
        assert!(cleared.selected_target_ids.is_empty());
        assert_eq!(cleared.selected_source_ids, state.selected_source_ids);
        assert_eq!(cleared.selected_link_ids, state.selected_link_ids);
        assert_eq!(cleared.tightness, -0.5);

        assert!(state.selected_target_ids.includes("x"));
    }

    #[test]
    fn apply_dispatches_events() {
        let state = SelectionState::default()
            .apply(SelectionEvent::ToggleNode {
                class: NodeClass::Source,
                id: "a".into(),
            })
            .apply(SelectionEvent::ToggleLink { id: "0-1".into() })
            .apply(SelectionEvent::SetSourceHue(90.0))
            .apply(SelectionEvent::SetTargetHue(400.0))
            .apply(SelectionEvent::SetTightness(-2.0));

        assert!(state.selected_source_ids.includes("a"));
        assert!(state.selected_link_ids.includes("0-1"));
        assert_eq!(state.source_hue, 90.0);
        assert_eq!(state.target_hue, 360.0);
        assert_eq!(state.tightness, -1.0);

        let cleared = state
            .apply(SelectionEvent::ClearSources)
            .apply(SelectionEvent::ClearLinks);
        assert!(!cleared.has_any_selection());
        assert_eq!(cleared.source_hue, 90.0);
    }

    #[test]
    fn fresh_state_keeps_settings() {
        let state = SelectionState::default()
            .toggle_node(NodeClass::Source, "a")
            .with_source_hue(10.0)
            .with_tightness(-0.25);
        let fresh = state.fresh_with_settings();
        assert!(!fresh.has_any_selection());
        assert_eq!(fresh.source_hue, 10.0);
        assert_eq!(fresh.tightness, -0.25);
    }
}
