use eframe::egui::{self, RichText, Ui};
use tracing::{error, info};

use crate::bipartite::{NodeClass, raw_graph_to_json};
use crate::curve::CubicCurve;
use crate::layout::LayoutWarning;
use crate::util::format_weight;

use super::super::{Level, ViewModel};

const INCIDENT_ROWS_VISIBLE: usize = 12;

fn warning_text(warning: &LayoutWarning) -> String {
    match warning {
        LayoutWarning::Overfull {
            class,
            total,
            height,
        } => format!(
            "{class} column is overfull: weight {} exceeds height {}",
            format_weight(*total),
            format_weight(*height)
        ),
        LayoutWarning::SingleNode { class } => {
            format!("{class} column has a single node stretched to full height")
        }
    }
}

/// Rows describing the selected nodes of `class`, in column order.
fn selected_node_rows(level: &Level, class: NodeClass) -> Vec<(String, Vec<String>)> {
    level
        .layout
        .nodes(class)
        .iter()
        .filter_map(|geometry| {
            let record = level.graph.node(geometry.node)?;
            if !level.selection.is_node_selected(record) {
                return None;
            }
            let header = format!(
                "{}  weight {}  y {:.1}..{:.1}",
                record.id,
                format_weight(record.weight),
                geometry.span.top,
                geometry.span.bottom
            );
            let links = level
                .graph
                .incident_links(record)
                .map(|link| {
                    format!(
                        "{} \u{2192} {}  {}",
                        level.graph.source_of(link).id,
                        level.graph.target_of(link).id,
                        format_weight(link.value)
                    )
                })
                .collect();
            Some((header, links))
        })
        .collect()
}

impl ViewModel {
    pub(in crate::app) fn draw_details(&mut self, ui: &mut Ui) {
        ui.heading("Selection Details");
        ui.add_space(6.0);

        let level = self.focused_level();
        let layout = &level.layout;

        ui.label(format!(
            "Spacing: sources {:.2}, targets {:.2}",
            layout.source_spacing, layout.target_spacing
        ));
        for warning in &layout.warnings {
            ui.colored_label(egui::Color32::from_rgb(230, 160, 80), warning_text(warning));
        }

        if ui
            .button("Copy level as JSON")
            .on_hover_text("Copy this diagram's sources, targets, and links to the clipboard.")
            .clicked()
        {
            match raw_graph_to_json(&level.raw) {
                Ok(json) => {
                    info!(depth = level.depth, bytes = json.len(), "copied level JSON");
                    ui.ctx().copy_text(json);
                }
                Err(error) => error!(
                    depth = level.depth,
                    error = %format!("{error:#}"),
                    "failed to export level"
                ),
            }
        }

        if !level.selection.has_any_selection() {
            ui.separator();
            ui.label("Click nodes or links in a diagram to select them.");
            return;
        }

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                for class in [NodeClass::Source, NodeClass::Target] {
                    let rows = selected_node_rows(level, class);
                    if rows.is_empty() {
                        continue;
                    }

                    ui.separator();
                    ui.label(RichText::new(format!("Selected {}s", class.label())).strong());
                    for (header, links) in rows {
                        ui.label(header);
                        for link in links.iter().take(INCIDENT_ROWS_VISIBLE) {
                            ui.small(format!("  {link}"));
                        }
                        if links.len() > INCIDENT_ROWS_VISIBLE {
                            ui.small(format!(
                                "  ... {} more",
                                links.len() - INCIDENT_ROWS_VISIBLE
                            ));
                        }
                    }
                }

                let link_ids = level.selection.selected_link_ids.to_array();
                if link_ids.is_empty() {
                    return;
                }

                ui.separator();
                ui.label(RichText::new("Selected links").strong());
                let tightness = level.selection.tightness;
                for id in link_ids {
                    let Some(index) = level.graph.link_index(&id) else {
                        continue;
                    };
                    let link = &level.graph.links[index];
                    ui.label(format!(
                        "{id}: {} \u{2192} {}  {}",
                        level.graph.source_of(link).id,
                        level.graph.target_of(link).id,
                        format_weight(link.value)
                    ));

                    if let Some(geometry) = layout.link_geometry(index) {
                        let curve = CubicCurve::new(
                            geometry.x1,
                            geometry.y1(),
                            geometry.x2,
                            geometry.y2(),
                            tightness,
                        );
                        ui.small(curve.svg_path()).on_hover_text("SVG path of this link");
                    }
                }
            });
    }
}
