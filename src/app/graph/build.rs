use tracing::{debug, error, info};

use crate::bipartite::{
    BipartiteGraph, GraphError, RawGraph, SelectionEvent, SelectionState, induced_subgraph,
};
use crate::layout::{LayoutConfig, compute_layout};

use super::super::Level;

impl Level {
    pub(in crate::app) fn build(
        raw: RawGraph,
        config: LayoutConfig,
        selection: SelectionState,
        depth: usize,
    ) -> Result<Self, GraphError> {
        let graph = BipartiteGraph::build(&raw)?;
        let layout = compute_layout(&graph, config);
        debug!(
            depth,
            sources = graph.sources.len(),
            targets = graph.targets.len(),
            links = graph.links.len(),
            "built diagram level"
        );

        Ok(Self {
            depth,
            raw,
            graph,
            layout,
            selection,
            child: None,
        })
    }

    /// Applies one click or slider event. Any change to the selected ids
    /// replaces the nested level with a freshly built one.
    pub(in crate::app) fn apply(&mut self, event: SelectionEvent, drill_down: bool) {
        let membership_changed = !matches!(
            event,
            SelectionEvent::SetTightness(_)
                | SelectionEvent::SetSourceHue(_)
                | SelectionEvent::SetTargetHue(_)
        );

        self.selection = self.selection.apply(event);

        if drill_down && membership_changed {
            self.rebuild_child();
        }
    }

    pub(in crate::app) fn rebuild_child(&mut self) {
        let raw = induced_subgraph(&self.graph, &self.selection);
        if raw.links.is_empty() {
            self.child = None;
            return;
        }

        let selection = self.selection.fresh_with_settings();
        match Self::build(raw, self.layout.config, selection, self.depth + 1) {
            Ok(child) => {
                info!(
                    depth = child.depth,
                    sources = child.graph.sources.len(),
                    targets = child.graph.targets.len(),
                    links = child.graph.links.len(),
                    "rebuilt drill-down level"
                );
                self.child = Some(Box::new(child));
            }
            Err(error) => {
                error!(depth = self.depth + 1, %error, "failed to build drill-down level");
                self.child = None;
            }
        }
    }

    pub(in crate::app) fn set_drill_down(&mut self, enabled: bool) {
        if enabled {
            self.rebuild_child();
        } else {
            self.child = None;
        }
    }

    pub(in crate::app) fn level_mut(&mut self, depth: usize) -> Option<&mut Level> {
        if depth == self.depth {
            return Some(self);
        }
        self.child.as_deref_mut()?.level_mut(depth)
    }

    pub(in crate::app) fn level(&self, depth: usize) -> Option<&Level> {
        if depth == self.depth {
            return Some(self);
        }
        self.child.as_deref()?.level(depth)
    }

    pub(in crate::app) fn deepest(&self) -> usize {
        self.child.as_deref().map_or(self.depth, Level::deepest)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::bipartite::{NodeClass, sample_graph};

    fn root() -> Level {
        Level::build(
            sample_graph().unwrap(),
            LayoutConfig::default(),
            SelectionState::default(),
            0,
        )
        .unwrap()
    }

    #[test]
    fn drill_down_follows_selection_changes() {
        let mut level = root();
        level.apply(
            SelectionEvent::ToggleNode {
                class: NodeClass::Source,
                id: "b".into(),
            },
            true,
        );

        let child = level.child.as_deref().unwrap();
        assert_eq!(child.depth, 1);
        assert_eq!(child.raw.sources, vec!["b"]);
        assert_eq!(child.raw.targets, vec!["u", "x"]);
        assert!(!child.selection.has_any_selection());
        assert_eq!(level.deepest(), 1);

        level.apply(
            SelectionEvent::ToggleNode {
                class: NodeClass::Source,
                id: "b".into(),
            },
            true,
        );
        assert!(level.child.is_none());
    }

    #[test]
    fn slider_events_keep_nested_selection() {
        let mut level = root();
        level.apply(SelectionEvent::ToggleLink { id: "3-1".into() }, true);
        level
            .level_mut(1)
            .unwrap()
            .apply(SelectionEvent::ToggleLink { id: "0-0".into() }, true);
        assert_eq!(level.deepest(), 2);

        level.apply(SelectionEvent::SetTightness(-0.4), true);
        assert_eq!(level.selection.tightness, -0.4);
        assert!(level.level(1).unwrap().selection.selected_link_ids.includes("0-0"));
        assert_eq!(level.deepest(), 2);
    }

    #[test]
    fn nested_levels_reset_when_parent_selection_changes() {
        let mut level = root();
        level.apply(SelectionEvent::ToggleLink { id: "3-1".into() }, true);
        level
            .level_mut(1)
            .unwrap()
            .apply(SelectionEvent::ToggleLink { id: "0-0".into() }, true);

        level.apply(SelectionEvent::ToggleLink { id: "0-0".into() }, true);
        let child = level.level(1).unwrap();
        assert!(!child.selection.has_any_selection());
        assert!(child.child.is_none());
    }

    #[test]
    fn drill_down_disabled_builds_nothing() {
        let mut level = root();
        level.apply(
            SelectionEvent::ToggleNode {
                class: NodeClass::Target,
                id: "u".into(),
            },
            false,
        );
        assert!(level.child.is_none());

        level.set_drill_down(true);
        assert_eq!(level.level(1).unwrap().raw.targets, vec!["u"]);
        level.set_drill_down(false);
        assert!(level.child.is_none());
    }
}
