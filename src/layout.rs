use tracing::{debug, warn};

use crate::bipartite::{BipartiteGraph, NodeClass, NodeRef};

pub const DEFAULT_COLUMN_HEIGHT: f64 = 400.0;
pub const DEFAULT_DIAGRAM_WIDTH: f64 = 700.0;
pub const NODE_WIDTH: f64 = 10.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutConfig {
    pub height: f64,
    pub width: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            height: DEFAULT_COLUMN_HEIGHT,
            width: DEFAULT_DIAGRAM_WIDTH,
        }
    }
}

/// Closed vertical range in diagram units, `top <= bottom` unless the column is overfull.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Interval {
    pub top: f64,
    pub bottom: f64,
}

impl Interval {
    pub fn new(top: f64, height: f64) -> Self {
        Self {
            top,
            bottom: top + height,
        }
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    pub fn mid(&self) -> f64 {
        (self.top + self.bottom) / 2.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NodeGeometry {
    pub node: NodeRef,
    pub x: f64,
    pub span: Interval,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinkGeometry {
    /// Index into [`BipartiteGraph::links`].
    pub link: usize,
    pub x1: f64,
    pub x2: f64,
    pub source_span: Interval,
    pub target_span: Interval,
}

impl LinkGeometry {
    pub fn y1(&self) -> f64 {
        self.source_span.mid()
    }

    pub fn y2(&self) -> f64 {
        self.target_span.mid()
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LayoutWarning {
    /// Column weight exceeds the column height; spacing goes negative.
    Overfull {
        class: NodeClass,
        total: f64,
        height: f64,
    },
    /// A lone node is stretched over the whole column.
    SingleNode { class: NodeClass },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Layout {
    pub config: LayoutConfig,
    pub sources: Vec<NodeGeometry>,
    pub targets: Vec<NodeGeometry>,
    pub links: Vec<LinkGeometry>,
    pub source_spacing: f64,
    pub target_spacing: f64,
    pub warnings: Vec<LayoutWarning>,
}

impl Layout {
    pub fn nodes(&self, class: NodeClass) -> &[NodeGeometry] {
        match class {
            NodeClass::Source => &self.sources,
            NodeClass::Target => &self.targets,
        }
    }

    pub fn link_geometry(&self, link: usize) -> Option<&LinkGeometry> {
        self.links.get(link)
    }
}

struct Column {
    nodes: Vec<NodeGeometry>,
    link_spans: Vec<Option<Interval>>,
    spacing: f64,
}

fn layout_column(
    graph: &BipartiteGraph,
    class: NodeClass,
    config: LayoutConfig,
    warnings: &mut Vec<LayoutWarning>,
) -> Column {
    let nodes = graph.nodes(class);
    let total = nodes.iter().map(|node| node.weight).sum::<f64>();
    let x = match class {
        NodeClass::Source => 0.0,
        NodeClass::Target => config.width - NODE_WIDTH,
    };

    if total > config.height {
        warnings.push(LayoutWarning::Overfull {
            class,
            total,
            height: config.height,
        });
    }

    let spacing = if nodes.len() > 1 {
        (config.height - total) / (nodes.len() - 1) as f64
    } else {
        0.0
    };
    let stretch_single = nodes.len() == 1;
    if stretch_single {
        warnings.push(LayoutWarning::SingleNode { class });
    }

    let mut link_spans = vec![None; graph.links.len()];
    let mut geometries = Vec::with_capacity(nodes.len());
    let mut top = 0.0;

    for node in nodes {
        let (height, scale) = if stretch_single {
            let scale = if node.weight > 0.0 {
                config.height / node.weight
            } else {
                0.0
            };
            (config.height, scale)
        } else {
            (node.weight, 1.0)
        };

        let mut offset = 0.0;
        for &link_index in &node.incident_links {
            let Some(link) = graph.links.get(link_index) else {
                continue;
            };
            let extent = link.value * scale;
            link_spans[link_index] = Some(Interval::new(top + offset, extent));
            offset += extent;
        }

        geometries.push(NodeGeometry {
            node: node.node_ref(),
            x,
            span: Interval::new(top, height),
        });
        top += height + spacing;
    }

    Column {
        nodes: geometries,
        link_spans,
        spacing,
    }
}

/// Places every node and link of `graph` inside a `config.height` tall column pair.
pub fn compute_layout(graph: &BipartiteGraph, config: LayoutConfig) -> Layout {
    let mut warnings = Vec::new();
    let sources = layout_column(graph, NodeClass::Source, config, &mut warnings);
    let targets = layout_column(graph, NodeClass::Target, config, &mut warnings);

    let links = sources
        .link_spans
        .iter()
        .zip(targets.link_spans.iter())
        .enumerate()
        .filter_map(|(link, (source_span, target_span))| {
            Some(LinkGeometry {
                link,
                x1: NODE_WIDTH,
                x2: config.width - NODE_WIDTH,
                source_span: (*source_span)?,
                target_span: (*target_span)?,
            })
        })
        .collect::<Vec<_>>();

    for warning in &warnings {
        match warning {
            LayoutWarning::Overfull {
                class,
                total,
                height,
            } => warn!(%class, total, height, "column weight exceeds column height"),
            LayoutWarning::SingleNode { class } => {
                debug!(%class, "single node stretched over column")
            }
        }
    }

    debug!(
        sources = sources.nodes.len(),
        targets = targets.nodes.len(),
        links = links.len(),
        source_spacing = sources.spacing,
        target_spacing = targets.spacing,
        "computed layout"
    );

    Layout {
        config,
        sources: sources.nodes,
        targets: targets.nodes,
        links,
        source_spacing: sources.spacing,
        target_spacing: targets.spacing,
        warnings,
    }
}
