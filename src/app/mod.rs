use anyhow::{Context as _, Result};
use eframe::egui::{self, Context};
use tracing::error;

use crate::bipartite::{BipartiteGraph, NodeClass, RawGraph, SelectionState, sample_graph};
use crate::layout::{Layout, LayoutConfig};

mod graph;
mod render_utils;
mod ui;

/// Settings taken from the command line.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DiagramConfig {
    pub layout: LayoutConfig,
    pub tightness: f64,
    pub source_hue: f64,
    pub target_hue: f64,
    pub drill_down: bool,
}

impl DiagramConfig {
    fn initial_selection(&self) -> SelectionState {
        SelectionState::default()
            .with_tightness(self.tightness)
            .with_source_hue(self.source_hue)
            .with_target_hue(self.target_hue)
    }
}

pub struct BipartiteApp {
    state: AppState,
}

enum AppState {
    Ready(Box<ViewModel>),
    Error(String),
}

struct ViewModel {
    config: DiagramConfig,
    root: Level,
    drill_down: bool,
    focused_depth: usize,
    search: String,
}

/// One diagram plus its selection; `child` is the drill-down of that selection.
struct Level {
    depth: usize,
    raw: RawGraph,
    graph: BipartiteGraph,
    layout: Layout,
    selection: SelectionState,
    child: Option<Box<Level>>,
}

/// Element under the pointer inside one diagram.
#[derive(Clone, Debug, PartialEq)]
enum HitTarget {
    Node { class: NodeClass, id: String },
    Link { id: String },
}

impl BipartiteApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: DiagramConfig) -> Self {
        let state = match Self::load(config) {
            Ok(model) => AppState::Ready(Box::new(model)),
            Err(error) => {
                error!(error = %format!("{error:#}"), "failed to build diagram");
                AppState::Error(format!("{error:#}"))
            }
        };
        Self { state }
    }

    fn load(config: DiagramConfig) -> Result<ViewModel> {
        let raw = sample_graph()?;
        ViewModel::new(raw, config).context("failed to build the sample diagram")
    }
}

impl eframe::App for BipartiteApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        match &mut self.state {
            AppState::Ready(model) => model.show(ctx),
            AppState::Error(error) => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.heading("Failed to build the bipartite diagram");
                    ui.add_space(6.0);
                    ui.label(error.as_str());
                });
            }
        }
    }
}
