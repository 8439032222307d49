//! Per-frame view records: layout geometry joined with selection state.

use crate::bipartite::{BipartiteGraph, LinkHighlight, NodeClass, SelectionState};
use crate::curve::{CubicCurve, Point};
use crate::layout::{Layout, NODE_WIDTH};
use crate::util::{Rgb, hue_color};

pub const NEUTRAL_COLOR: Rgb = Rgb::new(128, 134, 142);

#[derive(Clone, Debug, PartialEq)]
pub struct NodeView {
    pub id: String,
    pub class: NodeClass,
    pub index: usize,
    pub position: Point,
    pub width: f64,
    pub height: f64,
    pub weight: f64,
    pub color: Rgb,
    pub is_selected: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LinkView {
    pub id: String,
    /// Index into [`BipartiteGraph::links`].
    pub link: usize,
    pub curve: CubicCurve,
    pub stroke_width: f64,
    pub highlight: LinkHighlight,
    pub is_selected: bool,
    /// Gradient from the source end to the target end.
    pub start_color: Rgb,
    pub end_color: Rgb,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scene {
    pub nodes: Vec<NodeView>,
    pub links: Vec<LinkView>,
}

impl Scene {
    pub fn compose(graph: &BipartiteGraph, layout: &Layout, state: &SelectionState) -> Self {
        let source_color = hue_color(state.source_hue);
        let target_color = hue_color(state.target_hue);

        let nodes = [NodeClass::Source, NodeClass::Target]
            .into_iter()
            .flat_map(|class| graph.nodes(class).iter().zip(layout.nodes(class)))
            .map(|(node, geometry)| {
                let is_selected = state.is_node_selected(node);
                let color = if is_selected {
                    hue_color(state.hue(node.class))
                } else {
                    NEUTRAL_COLOR
                };
                NodeView {
                    id: node.id.clone(),
                    class: node.class,
                    index: node.index,
                    position: Point::new(geometry.x, geometry.span.top),
                    width: NODE_WIDTH,
                    height: geometry.span.height(),
                    weight: node.weight,
                    color,
                    is_selected,
                }
            })
            .collect();

        let links = layout
            .links
            .iter()
            .filter_map(|geometry| {
                let link = graph.links.get(geometry.link)?;
                let highlight = state.link_highlight(graph, link);
                let (start_color, end_color) = match highlight {
                    LinkHighlight::Plain => (NEUTRAL_COLOR, NEUTRAL_COLOR),
                    LinkHighlight::Left => (source_color, NEUTRAL_COLOR),
                    LinkHighlight::Right => (NEUTRAL_COLOR, target_color),
                    LinkHighlight::Both => (source_color, target_color),
                };
                Some(LinkView {
                    id: link.id.clone(),
                    link: geometry.link,
                    curve: CubicCurve::new(
                        geometry.x1,
                        geometry.y1(),
                        geometry.x2,
                        geometry.y2(),
                        state.tightness,
                    ),
                    stroke_width: link.value,
                    highlight,
                    is_selected: state.is_link_selected(link),
                    start_color,
                    end_color,
                })
            })
            .collect();

        Self { nodes, links }
    }

    /// Plain links first so highlighted ones paint on top.
    pub fn links_in_paint_order(&self) -> Vec<&LinkView> {
        let mut ordered = self.links.iter().collect::<Vec<_>>();
        ordered.sort_by_key(|link| (link.highlight.is_highlighted() || link.is_selected, link.is_selected));
        ordered
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::bipartite::RawGraph;
    use crate::layout::{LayoutConfig, compute_layout};

    fn scenario() -> (BipartiteGraph, Layout) {
        let graph = BipartiteGraph::build(&RawGraph::from_triples(
            &["a", "b"],
            &["x", "y"],
            &[(0, 0, 2.0), (0, 1, 3.0), (1, 0, 1.0)],
        ))
        .unwrap();
        let layout = compute_layout(&graph, LayoutConfig::default());
        (graph, layout)
    }

    #[test]
    fn compose_reports_geometry_and_selection() {
        let (graph, layout) = scenario();
        let state = SelectionState::default()
            .with_source_hue(0.0)
            .toggle_node(NodeClass::Source, "a")
            .toggle_link("1-0");
        let scene = Scene::compose(&graph, &layout, &state);

        assert_eq!(scene.nodes.len(), 4);
        let a = &scene.nodes[0];
        assert_eq!(a.id, "a");
        assert!(a.is_selected);
        assert_eq!(a.color, Rgb::new(255, 0, 0));
        assert_eq!(a.height, 5.0);
        assert_eq!(scene.nodes[1].color, NEUTRAL_COLOR);
        assert_eq!(scene.nodes[2].position, Point::new(690.0, 0.0));

        let highlights = scene
            .links
            .iter()
            .map(|l| (l.id.as_str(), l.highlight, l.is_selected))
            .collect::<Vec<_>>();
        assert_eq!(
            highlights,
            vec![
                ("0-0", LinkHighlight::Left, false),
                ("0-1", LinkHighlight::Left, false),
                ("1-0", LinkHighlight::Plain, true),
            ]
        );
        assert_eq!(scene.links[0].start_color, Rgb::new(255, 0, 0));
        assert_eq!(scene.links[0].end_color, NEUTRAL_COLOR);
        assert_eq!(scene.links[1].stroke_width, 3.0);
    }

    #[test]
    fn curves_start_at_link_midpoints() {
        let (graph, layout) = scenario();
        let scene = Scene::compose(&graph, &layout, &SelectionState::default().with_tightness(-0.5));
        let curve = scene.links[1].curve;
        assert_eq!(curve.start, Point::new(NODE_WIDTH, 3.5));
        assert_eq!(curve.end, Point::new(690.0, 398.5));
        assert_eq!(curve.control1.x, 175.0);
    }

    #[test]
    fn highlighted_links_paint_last() {
        let (graph, layout) = scenario();
        let state = SelectionState::default().toggle_node(NodeClass::Target, "x");
        let scene = Scene::compose(&graph, &layout, &state);
        let ids = scene
            .links_in_paint_order()
            .iter()
            .map(|l| l.id.as_str())
            .collect::<Vec<_>>();
        assert_eq!(ids, vec!["0-1", "0-0", "1-0"]);
    }
}
