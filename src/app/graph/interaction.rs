use eframe::egui::{Pos2, Rect, vec2};

use crate::scene::{NodeView, Scene};

use super::super::render_utils::DiagramTransform;
use super::super::{HitTarget, ViewModel};

const LINK_HIT_SEGMENTS: usize = 24;
const MIN_NODE_HIT_HEIGHT: f32 = 6.0;
const MIN_LINK_HIT_PX: f32 = 3.0;

pub(in crate::app) fn node_hit_rect(transform: DiagramTransform, node: &NodeView) -> Rect {
    let rect = transform.rect(node.position, node.width, node.height);
    let rect = if rect.height() < MIN_NODE_HIT_HEIGHT {
        Rect::from_center_size(rect.center(), vec2(rect.width(), MIN_NODE_HIT_HEIGHT))
    } else {
        rect
    };
    rect.expand2(vec2(2.0, 0.0))
}

impl ViewModel {
    /// Nodes win over links; among links the nearest curve wins.
    pub(in crate::app) fn hit_test(
        scene: &Scene,
        transform: DiagramTransform,
        pointer: Pos2,
    ) -> Option<HitTarget> {
        if let Some(node) = scene
            .nodes
            .iter()
            .find(|node| node_hit_rect(transform, node).contains(pointer))
        {
            return Some(HitTarget::Node {
                class: node.class,
                id: node.id.clone(),
            });
        }

        let point = transform.to_diagram(pointer);
        let min_reach = f64::from(MIN_LINK_HIT_PX / transform.scale);
        scene
            .links
            .iter()
            .filter_map(|link| {
                let distance = link.curve.distance_to(point, LINK_HIT_SEGMENTS);
                let reach = (link.stroke_width / 2.0).max(min_reach);
                (distance <= reach).then_some((link, distance))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(link, _)| HitTarget::Link {
                id: link.id.clone(),
            })
    }
}
