mod app;
mod bipartite;
mod curve;
mod layout;
mod scene;
mod util;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::bipartite::{DEFAULT_SOURCE_HUE, DEFAULT_TARGET_HUE, HUE_RANGE, TIGHTNESS_RANGE};
use crate::layout::{DEFAULT_COLUMN_HEIGHT, DEFAULT_DIAGRAM_WIDTH, LayoutConfig, NODE_WIDTH};

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Column height in diagram units.
    #[arg(long, default_value_t = DEFAULT_COLUMN_HEIGHT)]
    height: f64,
    /// Distance between the outer edges of the two columns.
    #[arg(long, default_value_t = DEFAULT_DIAGRAM_WIDTH)]
    width: f64,
    /// Curve tightness, from -1 (straight) to 0.
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    tightness: f64,
    #[arg(long, default_value_t = DEFAULT_SOURCE_HUE)]
    source_hue: f64,
    #[arg(long, default_value_t = DEFAULT_TARGET_HUE)]
    target_hue: f64,
    /// Start with drill-down enabled.
    #[arg(long)]
    drill_down: bool,
}

impl Args {
    fn diagram_config(&self) -> app::DiagramConfig {
        let height = if self.height.is_finite() && self.height > 0.0 {
            self.height
        } else {
            DEFAULT_COLUMN_HEIGHT
        };
        let width = if self.width.is_finite() && self.width > NODE_WIDTH * 2.0 {
            self.width
        } else {
            DEFAULT_DIAGRAM_WIDTH
        };

        app::DiagramConfig {
            layout: LayoutConfig { height, width },
            tightness: self
                .tightness
                .clamp(*TIGHTNESS_RANGE.start(), *TIGHTNESS_RANGE.end()),
            source_hue: self.source_hue.clamp(*HUE_RANGE.start(), *HUE_RANGE.end()),
            target_hue: self.target_hue.clamp(*HUE_RANGE.start(), *HUE_RANGE.end()),
            drill_down: self.drill_down,
        }
    }
}

fn main() -> eframe::Result<()> {
    if std::env::var_os("RUST_LOG").is_some() {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .init();
    }

    let args = Args::parse();
    let config = args.diagram_config();
    tracing::debug!(?config, "starting bipartite-view");

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default().with_inner_size([1440.0, 920.0]),
        ..Default::default()
    };

    eframe::run_native(
        "bipartite-view",
        options,
        Box::new(move |cc| Ok(Box::new(app::BipartiteApp::new(cc, config)))),
    )
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn defaults_match_documented_settings() {
        let config = Args::parse_from(["bipartite-view"]).diagram_config();
        assert_eq!(config.layout, LayoutConfig::default());
        assert_eq!(config.tightness, 0.0);
        assert_eq!(config.source_hue, 200.0);
        assert_eq!(config.target_hue, 20.0);
        assert!(!config.drill_down);
    }

    #[test]
    fn out_of_range_arguments_are_clamped() {
        let config = Args::parse_from([
            "bipartite-view",
            "--tightness",
            "-4",
            "--source-hue",
            "500",
            "--height",
            "0",
            "--drill-down",
        ])
        .diagram_config();
        assert_eq!(config.tightness, -1.0);
        assert_eq!(config.source_hue, 360.0);
        assert_eq!(config.layout.height, DEFAULT_COLUMN_HEIGHT);
        assert!(config.drill_down);
    }
}
