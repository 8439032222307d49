use eframe::egui::{self, Align, Context, Layout};
use tracing::info;

use crate::bipartite::{GraphError, RawGraph, SelectionEvent};

use super::super::{DiagramConfig, Level, ViewModel};

impl ViewModel {
    pub(in crate::app) fn new(raw: RawGraph, config: DiagramConfig) -> Result<Self, GraphError> {
        let mut root = Level::build(raw, config.layout, config.initial_selection(), 0)?;
        if config.drill_down {
            root.set_drill_down(true);
        }

        Ok(Self {
            config,
            root,
            drill_down: config.drill_down,
            focused_depth: 0,
            search: String::new(),
        })
    }

    pub(in crate::app) fn show(&mut self, ctx: &Context) {
        egui::TopBottomPanel::top("top_bar")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("bipartite-view");
                    ui.separator();
                    ui.label(format!("sources: {}", self.root.graph.sources.len()));
                    ui.label(format!("targets: {}", self.root.graph.targets.len()));
                    ui.label(format!("links: {}", self.root.graph.links.len()));
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        ui.label(format!(
                            "column {}x{}",
                            self.config.layout.width, self.config.layout.height
                        ));
                        if self.drill_down {
                            ui.label(format!("levels: {}", self.root.deepest() + 1));
                        }
                    });
                });
            });

        egui::SidePanel::left("controls")
            .resizable(true)
            .default_width(300.0)
            .show(ctx, |ui| self.draw_controls(ui));

        egui::SidePanel::right("details")
            .resizable(true)
            .default_width(300.0)
            .show(ctx, |ui| self.draw_details(ui));

        egui::CentralPanel::default().show(ctx, |ui| self.draw_levels(ui));
    }

    pub(in crate::app) fn focused_level(&self) -> &Level {
        self.root.level(self.focused_depth).unwrap_or(&self.root)
    }

    pub(in crate::app) fn apply_event(&mut self, depth: usize, event: SelectionEvent) {
        let drill_down = self.drill_down;
        if let Some(level) = self.root.level_mut(depth) {
            level.apply(event, drill_down);
        }
        self.focused_depth = self.focused_depth.min(self.root.deepest());
    }

    pub(in crate::app) fn apply_to_focused(&mut self, events: Vec<SelectionEvent>) {
        let depth = self.focused_depth;
        for event in events {
            self.apply_event(depth, event);
        }
    }

    pub(in crate::app) fn set_drill_down(&mut self, enabled: bool) {
        if self.drill_down == enabled {
            return;
        }

        info!(enabled, "drill-down toggled");
        self.drill_down = enabled;
        self.root.set_drill_down(enabled);
        self.focused_depth = self.focused_depth.min(self.root.deepest());
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::bipartite::{NodeClass, sample_graph};
    use crate::layout::LayoutConfig;

    fn config(drill_down: bool) -> DiagramConfig {
        DiagramConfig {
            layout: LayoutConfig::default(),
            tightness: -0.2,
            source_hue: 100.0,
            target_hue: 300.0,
            drill_down,
        }
    }

    #[test]
    fn new_applies_configured_settings() {
        let model = ViewModel::new(sample_graph().unwrap(), config(true)).unwrap();
        let selection = &model.root.selection;
        assert_eq!(selection.tightness, -0.2);
        assert_eq!(selection.source_hue, 100.0);
        assert_eq!(selection.target_hue, 300.0);
        assert!(model.root.child.is_none());
    }

    #[test]
    fn new_rejects_out_of_range_links() {
        let raw = RawGraph::from_triples(&["a"], &["x"], &[(1, 0, 1.0)]);
        assert!(ViewModel::new(raw, config(false)).is_err());
    }

    #[test]
    fn focus_falls_back_when_levels_disappear() {
        let mut model = ViewModel::new(sample_graph().unwrap(), config(true)).unwrap();
        model.apply_event(
            0,
            SelectionEvent::ToggleNode {
                class: NodeClass::Source,
                id: "a".into(),
            },
        );
        model.focused_depth = 1;
        assert_eq!(model.focused_level().depth, 1);
        assert_eq!(model.focused_level().selection.source_hue, 100.0);

        model.set_drill_down(false);
        assert_eq!(model.focused_depth, 0);
        assert_eq!(model.focused_level().depth, 0);
    }

    #[test]
    fn focused_events_target_the_focused_level() {
        let mut model = ViewModel::new(sample_graph().unwrap(), config(true)).unwrap();
        model.apply_event(0, SelectionEvent::ToggleLink { id: "0-3".into() });
        model.focused_depth = 1;
        model.apply_to_focused(vec![
            SelectionEvent::ToggleLink { id: "0-0".into() },
            SelectionEvent::SetTightness(-1.0),
        ]);

        assert_eq!(model.root.selection.tightness, -0.2);
        let child = model.root.level(1).unwrap();
        assert!(child.selection.selected_link_ids.includes("0-0"));
        assert_eq!(child.selection.tightness, -1.0);
        assert_eq!(model.root.deepest(), 2);
    }
}
