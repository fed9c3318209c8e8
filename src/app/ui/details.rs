use eframe::egui::{self, Align, Layout, RichText, Ui};

use crate::layout::FreezeReason;
use crate::network::{ActorId, Relation, relation_color};

use super::super::ViewModel;

struct OpinionRow {
    other: ActorId,
    name: String,
    value: f32,
}

impl ViewModel {
    fn opinion_rows<'a>(
        &self,
        relations: impl Iterator<Item = &'a Relation>,
        outgoing: bool,
    ) -> Vec<OpinionRow> {
        let mut rows = relations
            .filter_map(|relation| {
                let other = if outgoing { relation.to } else { relation.from };
                let actor = self.network.actor(other)?;
                (actor.kind == self.page.kind()).then(|| OpinionRow {
                    other,
                    name: actor.name.clone(),
                    value: relation.value,
                })
            })
            .collect::<Vec<_>>();
        rows.sort_by(|a, b| b.value.abs().total_cmp(&a.value.abs()));
        rows
    }

    pub(in crate::app) fn draw_details(&mut self, ui: &mut Ui) {
        ui.heading("Selection Details");
        ui.add_space(6.0);

        let Some(selected) = self.selected else {
            ui.label("Select an actor on the canvas or from the search results.");
            self.draw_layout_status(ui);
            return;
        };

        let Some(actor) = self.network.actor(selected) else {
            ui.label("Selected actor no longer exists in the network.");
            return;
        };
        let name = actor.name.clone();
        let pinned = self
            .graph
            .node(&selected)
            .is_some_and(|node| node.is_frozen_for(FreezeReason::Pinned));
        let connections = self.graph.connections(&selected).len();

        ui.label(RichText::new(name.as_str()).strong());
        ui.small(format!("{selected}"));
        ui.label(format!("Connections on canvas: {connections}"));

        let mut keep_pinned = pinned;
        if ui
            .checkbox(&mut keep_pinned, "Pinned")
            .on_hover_text("Pinned actors are ignored by the layout forces.")
            .changed()
            && let Some(node) = self.graph.node_mut(&selected)
        {
            node.set_frozen(keep_pinned);
            self.graph.restart();
        }

        let outgoing = self.opinion_rows(self.network.relations_from(selected), true);
        let incoming = self.opinion_rows(self.network.relations_to(selected), false);

        ui.separator();
        ui.label(RichText::new(format!("{name} thinks of")).strong());
        let picked_outgoing = Self::draw_opinion_list(ui, "outgoing", &outgoing);

        ui.separator();
        ui.label(RichText::new(format!("Opinions of {name}")).strong());
        let picked_incoming = Self::draw_opinion_list(ui, "incoming", &incoming);

        self.draw_layout_status(ui);

        if let Some(id) = picked_outgoing.or(picked_incoming) {
            self.set_selected(Some(id));
        }
    }

    fn draw_opinion_list(ui: &mut Ui, salt: &str, rows: &[OpinionRow]) -> Option<ActorId> {
        if rows.is_empty() {
            ui.label("No recorded opinions.");
            return None;
        }

        let mut clicked = None;
        egui::ScrollArea::vertical()
            .id_salt(salt)
            .max_height(200.0)
            .auto_shrink([false, true])
            .show(ui, |ui| {
                for row in rows {
                    ui.horizontal(|ui| {
                        if ui.selectable_label(false, row.name.as_str()).clicked() {
                            clicked = Some(row.other);
                        }
                        ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                            ui.label(
                                RichText::new(format!("{:+.0}", row.value))
                                    .color(relation_color(row.value)),
                            );
                        });
                    });
                }
            });
        clicked
    }

    fn draw_layout_status(&self, ui: &mut Ui) {
        ui.separator();
        ui.label(RichText::new("Layout").strong());
        ui.label(format!("Iteration: {}", self.graph.iteration()));
        ui.label(format!("Temperature: {:.4}", self.graph.temperature()));
        ui.label(format!("Ideal distance: {:.1}", self.graph.ideal_distance()));
        ui.label(if self.graph.is_done() {
            "Converged"
        } else {
            "Running"
        });
    }
}
