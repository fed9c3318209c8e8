use eframe::egui::{self, Ui};
use fuzzy_matcher::skim::SkimMatcherV2;

use crate::layout::GraphConfig;
use crate::network::ActorId;

use super::super::ViewModel;
use super::super::graph::fuzzy_match_score;

const SEARCH_RESULT_ROWS: usize = 12;

fn tuning_slider(
    ui: &mut Ui,
    value: &mut f32,
    range: std::ops::RangeInclusive<f32>,
    text: &str,
    hover: &str,
) -> bool {
    ui.add(
        egui::Slider::new(value, range)
            .text(text)
            .clamping(egui::SliderClamping::Always),
    )
    .on_hover_text(hover)
    .changed()
}

impl ViewModel {
    pub(in crate::app) fn draw_controls(&mut self, ui: &mut Ui) {
        ui.heading("Controls");
        ui.add_space(6.0);

        ui.label("Search actors");
        ui.text_edit_singleline(&mut self.search)
            .on_hover_text("Fuzzy match on actor names in the current page.");

        if let Some(id) = self.draw_search_results(ui) {
            self.set_selected(Some(id));
        }

        ui.separator();
        ui.checkbox(&mut self.live_physics, "Live physics simulation")
            .on_hover_text("Advance the force-directed layout every frame.");
        ui.checkbox(&mut self.show_fps_bar, "FPS Display")
            .on_hover_text("Show a live FPS readout in the header.");

        ui.separator();
        ui.collapsing("Relation thresholds", |ui| {
            let mut changed = tuning_slider(
                ui,
                &mut self.settings.opinion_threshold_neg,
                -100.0..=0.0,
                "Enemy below",
                "Opinions below this value always draw a relation.",
            );
            changed |= tuning_slider(
                ui,
                &mut self.settings.opinion_threshold_pos,
                0.0..=100.0,
                "Friend above",
                "Opinions above this value always draw a relation.",
            );
            if changed {
                self.refresh_edges();
            }
        });

        ui.collapsing("Physics tuning", |ui| {
            let config = &mut self.settings.graph;
            tuning_slider(
                ui,
                &mut config.max_temperature,
                0.005..=0.2,
                "Temperature",
                "Step size at the start of a layout run; it cools towards zero.",
            );
            tuning_slider(
                ui,
                &mut config.repulsive_constant,
                500.0..=20000.0,
                "Repulsion",
                "How strongly every pair of actors pushes apart.",
            );
            tuning_slider(
                ui,
                &mut config.attractive_constant,
                0.01..=1.0,
                "Attraction",
                "How strongly related actors pull together beyond the ideal distance.",
            );
            tuning_slider(
                ui,
                &mut config.central_constant,
                0.0..=2.0,
                "Centering",
                "Pull towards the middle of the canvas.",
            );
            tuning_slider(
                ui,
                &mut config.threshold,
                0.001..=0.5,
                "Settle threshold",
                "Squared speed below which an actor counts as settled.",
            );
            tuning_slider(
                ui,
                &mut config.slot_size,
                30.0..=140.0,
                "Slot size",
                "Size of each actor, also the shortest ideal distance.",
            );
            ui.add(
                egui::Slider::new(&mut config.max_iterations, 50..=5000)
                    .text("Max iterations")
                    .clamping(egui::SliderClamping::Always),
            )
            .on_hover_text("Hard cap on the length of one layout run.");

            if ui.button("Restore defaults").clicked() {
                *config = GraphConfig::default();
            }
        });

        ui.separator();
        if ui
            .button("Restart layout")
            .on_hover_text("Resume the simulation from the current positions.")
            .clicked()
        {
            self.graph.restart();
        }
    }

    fn draw_search_results(&self, ui: &mut Ui) -> Option<ActorId> {
        let query = self.search.trim();
        if query.is_empty() {
            return None;
        }

        let matcher = SkimMatcherV2::default();
        let mut ranked = self
            .network
            .actors_of(self.page.kind())
            .filter_map(|actor| {
                fuzzy_match_score(&matcher, &actor.name, query).map(|score| (score, actor))
            })
            .collect::<Vec<_>>();
        ranked.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.name.cmp(&b.1.name)));

        if ranked.is_empty() {
            ui.small("No actors match.");
            return None;
        }

        let mut clicked = None;
        for (_score, actor) in ranked.into_iter().take(SEARCH_RESULT_ROWS) {
            let is_selected = self.selected == Some(actor.id);
            if ui.selectable_label(is_selected, actor.name.as_str()).clicked() {
                clicked = Some(actor.id);
            }
        }
        clicked
    }
}
