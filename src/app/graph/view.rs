use eframe::egui::{
    self, Align2, Color32, CursorIcon, FontId, Painter, Rect, RichText, Sense, Shape, Stroke,
    StrokeKind, Ui, pos2, vec2,
};

use crate::bipartite::{NodeClass, SelectionEvent};
use crate::scene::{LinkView, NodeView, Scene};
use crate::util::format_weight;

use super::super::render_utils::{
    DiagramTransform, HOVER_COLOR, SELECTED_COLOR, blend_color, dim_color, draw_background,
    to_color32,
};
use super::super::{HitTarget, Level, ViewModel};

const LABEL_MARGIN: f32 = 72.0;
const VERTICAL_PADDING: f32 = 14.0;
const CURVE_SEGMENTS: usize = 32;

/// Outcome of drawing one level during a frame.
struct LevelResponse {
    clicked: bool,
    event: Option<SelectionEvent>,
}

impl ViewModel {
    pub(in crate::app) fn draw_levels(&mut self, ui: &mut Ui) {
        let mut pending = None;
        let mut focus = None;
        let focused_depth = self.focused_depth;
        let root = &self.root;

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                let mut current = Some(root);
                while let Some(level) = current {
                    let response = Self::draw_level(ui, level, focused_depth == level.depth);
                    if response.clicked {
                        focus = Some(level.depth);
                    }
                    if let Some(event) = response.event {
                        pending = Some((level.depth, event));
                    }
                    current = level.child.as_deref();
                    ui.add_space(12.0);
                }
            });

        if let Some(depth) = focus {
            self.focused_depth = depth;
        }
        if let Some((depth, event)) = pending {
            self.apply_event(depth, event);
        }
    }

    fn draw_level(ui: &mut Ui, level: &Level, focused: bool) -> LevelResponse {
        let config = level.layout.config;
        let title = if level.depth == 0 {
            "Full graph".to_owned()
        } else {
            format!("Drill-down level {}", level.depth)
        };
        ui.label(RichText::new(title).strong());
        ui.small(format!(
            "{} sources, {} targets, {} links, total weight {}",
            level.graph.sources.len(),
            level.graph.targets.len(),
            level.graph.links.len(),
            format_weight(level.graph.total_weight()),
        ));

        let available = ui.available_width().max(LABEL_MARGIN * 2.0 + 80.0);
        let scale = ((available - LABEL_MARGIN * 2.0) / config.width as f32).clamp(0.4, 1.6);
        let desired = vec2(
            available,
            config.height as f32 * scale + VERTICAL_PADDING * 2.0,
        );
        let (rect, response) = ui.allocate_exact_size(desired, Sense::click());
        let painter = ui.painter_at(rect);
        draw_background(&painter, rect, focused);

        let transform = DiagramTransform {
            origin: pos2(
                rect.center().x - config.width as f32 * scale / 2.0,
                rect.top() + VERTICAL_PADDING,
            ),
            scale,
        };

        let scene = Scene::compose(&level.graph, &level.layout, &level.selection);
        if level.graph.is_empty() {
            painter.text(
                rect.center(),
                Align2::CENTER_CENTER,
                "Nothing to draw",
                FontId::proportional(13.0),
                Color32::from_gray(180),
            );
        }

        let hovered = response
            .hover_pos()
            .and_then(|pointer| Self::hit_test(&scene, transform, pointer));
        if hovered.is_some() {
            ui.ctx().set_cursor_icon(CursorIcon::PointingHand);
        }

        let any_highlight = scene
            .links
            .iter()
            .any(|link| link.highlight.is_highlighted() || link.is_selected);

        for link in scene.links_in_paint_order() {
            let is_hovered = matches!(&hovered, Some(HitTarget::Link { id }) if *id == link.id);
            Self::paint_link(&painter, transform, link, is_hovered, any_highlight);
        }

        for node in &scene.nodes {
            let is_hovered = matches!(
                &hovered,
                Some(HitTarget::Node { class, id }) if *class == node.class && *id == node.id
            );
            Self::paint_node(&painter, transform, node, is_hovered);
        }

        if let Some(text) = hovered.as_ref().and_then(|hit| Self::hover_text(level, hit)) {
            painter.text(
                rect.left_top() + vec2(10.0, 6.0),
                Align2::LEFT_TOP,
                text,
                FontId::proportional(12.0),
                Color32::from_gray(240),
            );
        }

        let clicked = response.clicked();
        let event = if clicked {
            hovered.map(|hit| match hit {
                HitTarget::Node { class, id } => SelectionEvent::ToggleNode { class, id },
                HitTarget::Link { id } => SelectionEvent::ToggleLink { id },
            })
        } else {
            None
        };

        LevelResponse { clicked, event }
    }

    fn paint_link(
        painter: &Painter,
        transform: DiagramTransform,
        link: &LinkView,
        is_hovered: bool,
        any_highlight: bool,
    ) {
        let points = link
            .curve
            .sample(CURVE_SEGMENTS)
            .into_iter()
            .map(|point| transform.to_screen(point))
            .collect::<Vec<_>>();
        let width = transform.length(link.stroke_width).max(1.0);

        if link.is_selected {
            painter.add(Shape::line(
                points.clone(),
                Stroke::new(width + 4.0, SELECTED_COLOR),
            ));
        }

        let faded = any_highlight && !link.highlight.is_highlighted() && !link.is_selected;
        for (step, pair) in points.windows(2).enumerate() {
            let t = (step as f64 + 0.5) / CURVE_SEGMENTS as f64;
            let mut color = to_color32(link.start_color.lerp(link.end_color, t));
            if faded {
                color = dim_color(color, 0.45);
            } else {
                color = color.gamma_multiply(0.85);
            }
            if is_hovered {
                color = blend_color(color, HOVER_COLOR, 0.3);
            }
            painter.line_segment([pair[0], pair[1]], Stroke::new(width, color));
        }
    }

    fn paint_node(painter: &Painter, transform: DiagramTransform, node: &NodeView, is_hovered: bool) {
        let rect = transform.rect(node.position, node.width, node.height);
        let rect = if rect.height() < 1.0 {
            Rect::from_min_size(rect.min, vec2(rect.width(), 1.0))
        } else {
            rect
        };

        let mut fill = to_color32(node.color);
        if is_hovered {
            fill = blend_color(fill, HOVER_COLOR, 0.35);
        }
        painter.rect_filled(rect, 0.0, fill);
        if node.is_selected {
            painter.rect_stroke(rect, 0.0, Stroke::new(1.5, SELECTED_COLOR), StrokeKind::Outside);
        }

        let label = format!("{} ({})", node.id, format_weight(node.weight));
        let (anchor, align) = match node.class {
            NodeClass::Source => {
                (pos2(rect.left() - 6.0, rect.center().y), Align2::RIGHT_CENTER)
            }
            NodeClass::Target => {
                (pos2(rect.right() + 6.0, rect.center().y), Align2::LEFT_CENTER)
            }
        };
        let text_color = if node.is_selected {
            SELECTED_COLOR
        } else {
            Color32::from_gray(220)
        };
        painter.text(anchor, align, label, FontId::proportional(12.0), text_color);
    }

    fn hover_text(level: &Level, hit: &HitTarget) -> Option<String> {
        match hit {
            HitTarget::Node { class, id } => {
                let node = level.graph.node_by_id(*class, id)?;
                Some(format!(
                    "{class} {}  |  weight {}  |  {} links",
                    node.id,
                    format_weight(node.weight),
                    node.incident_links.len()
                ))
            }
            HitTarget::Link { id } => {
                let link = level.graph.link_by_id(id)?;
                Some(format!(
                    "{} \u{2192} {}  |  {}",
                    level.graph.source_of(link).id,
                    level.graph.target_of(link).id,
                    format_weight(link.value)
                ))
            }
        }
    }
}
