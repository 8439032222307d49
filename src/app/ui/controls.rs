use eframe::egui::{self, Key, Response, RichText, Ui};
use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

use crate::bipartite::{HUE_RANGE, NodeClass, SelectionEvent, TIGHTNESS_RANGE};

use super::super::render_utils::to_color32;
use super::super::{Level, ViewModel};
use crate::util::hue_color;

const SLIDER_KEY_BASE_RATE: f64 = 10.0;
const SLIDER_KEY_ACCEL_PER_SEC: f64 = 9.0;
const SLIDER_KEY_ACCEL_MAX: f64 = 40.0;
const FINDER_RESULT_LIMIT: usize = 24;

#[derive(Clone, Copy, Default)]
struct SliderKeyHoldState {
    positive_secs: f64,
    negative_secs: f64,
}

fn slider_key_accel_multiplier(hold_secs: f64) -> f64 {
    let ramp = hold_secs * SLIDER_KEY_ACCEL_PER_SEC;
    (1.0 + ramp + ramp * ramp * 0.15).min(SLIDER_KEY_ACCEL_MAX)
}

/// Arrow keys nudge a focused slider, speeding up while held.
fn apply_slider_arrow_acceleration(
    ui: &Ui,
    response: &Response,
    value: &mut f64,
    range: &std::ops::RangeInclusive<f64>,
    step: f64,
) -> bool {
    let state_id = response.id.with("arrow_key_hold_state");
    let mut hold_state = ui.ctx().data(|data| {
        data.get_temp::<SliderKeyHoldState>(state_id)
            .unwrap_or_default()
    });

    if !response.has_focus() {
        ui.ctx()
            .data_mut(|data| data.insert_temp(state_id, SliderKeyHoldState::default()));
        return false;
    }

    let (delta_time, increase_down, decrease_down) = ui.input(|input| {
        (
            f64::from(input.stable_dt.min(0.1)),
            input.key_down(Key::ArrowRight) || input.key_down(Key::ArrowUp),
            input.key_down(Key::ArrowLeft) || input.key_down(Key::ArrowDown),
        )
    });

    hold_state.positive_secs = if increase_down {
        hold_state.positive_secs + delta_time
    } else {
        0.0
    };
    hold_state.negative_secs = if decrease_down {
        hold_state.negative_secs + delta_time
    } else {
        0.0
    };

    let direction = (increase_down as i8) - (decrease_down as i8);
    ui.ctx()
        .data_mut(|data| data.insert_temp(state_id, hold_state));
    if direction == 0 {
        return false;
    }

    let hold_secs = if direction > 0 {
        hold_state.positive_secs
    } else {
        hold_state.negative_secs
    };
    let speed = SLIDER_KEY_BASE_RATE * slider_key_accel_multiplier(hold_secs);
    let old_value = *value;
    *value = (*value + f64::from(direction) * step * speed * delta_time)
        .clamp(*range.start(), *range.end());

    ui.ctx().request_repaint();
    (*value - old_value).abs() > f64::EPSILON
}

fn accelerated_slider(
    ui: &mut Ui,
    value: &mut f64,
    range: std::ops::RangeInclusive<f64>,
    step: f64,
    text: &str,
) -> bool {
    let response = ui.add(
        egui::Slider::new(value, range.clone())
            .step_by(step)
            .text(text),
    );
    let mut changed = response.changed();
    changed |= apply_slider_arrow_acceleration(ui, &response, value, &range, step);
    changed
}

fn fuzzy_match_score(matcher: &SkimMatcherV2, text: &str, query: &str) -> Option<i64> {
    matcher
        .fuzzy_match(text, query)
        .or_else(|| matcher.fuzzy_match(&text.to_ascii_lowercase(), &query.to_ascii_lowercase()))
}

/// Labels of `level` matching `query`, best match first.
fn finder_matches(level: &Level, query: &str) -> Vec<(NodeClass, String, i64)> {
    let query = query.trim();
    if query.is_empty() {
        return Vec::new();
    }

    let matcher = SkimMatcherV2::default();
    let mut matches = level
        .graph
        .sources
        .iter()
        .chain(level.graph.targets.iter())
        .filter_map(|node| {
            fuzzy_match_score(&matcher, &node.id, query)
                .map(|score| (node.class, node.id.clone(), score))
        })
        .collect::<Vec<_>>();
    matches.sort_by(|a, b| b.2.cmp(&a.2).then_with(|| a.1.cmp(&b.1)));
    matches.truncate(FINDER_RESULT_LIMIT);
    matches
}

impl ViewModel {
    pub(in crate::app) fn draw_controls(&mut self, ui: &mut Ui) {
        ui.heading("Diagram Controls");
        ui.separator();
        ui.add_space(4.0);

        let level = self.focused_level();
        let selection = level.selection.clone();
        let mut events = Vec::new();

        ui.label(if level.depth == 0 {
            "Editing: full graph".to_owned()
        } else {
            format!("Editing: drill-down level {}", level.depth)
        })
        .on_hover_text("Click inside a diagram to edit its settings here.");
        ui.add_space(4.0);

        let mut tightness = selection.tightness;
        if accelerated_slider(ui, &mut tightness, TIGHTNESS_RANGE, 0.01, "Tightness") {
            events.push(SelectionEvent::SetTightness(tightness));
        }

        let mut source_hue = selection.source_hue;
        ui.horizontal(|ui| {
            if accelerated_slider(ui, &mut source_hue, HUE_RANGE, 1.0, "Source hue") {
                events.push(SelectionEvent::SetSourceHue(source_hue));
            }
            ui.label(RichText::new("\u{25A0}").color(to_color32(hue_color(source_hue))));
        });

        let mut target_hue = selection.target_hue;
        ui.horizontal(|ui| {
            if accelerated_slider(ui, &mut target_hue, HUE_RANGE, 1.0, "Target hue") {
                events.push(SelectionEvent::SetTargetHue(target_hue));
            }
            ui.label(RichText::new("\u{25A0}").color(to_color32(hue_color(target_hue))));
        });

        ui.separator();

        let clear_rows = [
            (
                "sources",
                selection.selected_source_ids.size(),
                SelectionEvent::ClearSources,
            ),
            (
                "targets",
                selection.selected_target_ids.size(),
                SelectionEvent::ClearTargets,
            ),
            (
                "links",
                selection.selected_link_ids.size(),
                SelectionEvent::ClearLinks,
            ),
        ];
        for (label, count, event) in clear_rows {
            ui.horizontal(|ui| {
                ui.label(format!("{count} {label} selected"));
                if ui
                    .add_enabled(count > 0, egui::Button::new("clear"))
                    .clicked()
                {
                    events.push(event);
                }
            });
        }

        ui.separator();

        let mut drill_down = self.drill_down;
        ui.checkbox(&mut drill_down, "Drill down into selection")
            .on_hover_text("Show the selected and highlighted links as a nested diagram below.");

        ui.separator();
        ui.label("Find node");
        ui.text_edit_singleline(&mut self.search)
            .on_hover_text("Fuzzy-match labels in the focused diagram; click a result to toggle it.");

        let matches = finder_matches(self.focused_level(), &self.search);
        if !self.search.trim().is_empty() && matches.is_empty() {
            ui.label("No matching nodes.");
        }
        for (class, id, _score) in matches {
            let is_selected = selection.selected_ids(class).includes(&id);
            if ui
                .selectable_label(is_selected, format!("{id} ({class})"))
                .clicked()
            {
                events.push(SelectionEvent::ToggleNode { class, id });
            }
        }

        self.set_drill_down(drill_down);
        self.apply_to_focused(events);
    }
}
