use eframe::egui::{self, Align, Context, Layout};

use crate::layout::LayoutMode;

use super::super::{Page, ViewModel};

impl ViewModel {
    pub(in crate::app) fn show(&mut self, ctx: &Context) {
        self.update_fps_counter(ctx);

        egui::TopBottomPanel::top("top_bar")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("Relations");
                    ui.separator();

                    let mut page = self.page;
                    ui.selectable_value(&mut page, Page::People, "People")
                        .on_hover_text("Opinions between individual people.");
                    ui.selectable_value(&mut page, Page::Factions, "Factions")
                        .on_hover_text("Goodwill between factions.");
                    self.set_page(page);
                    ui.separator();

                    let mut mode = self.mode;
                    ui.selectable_value(&mut mode, LayoutMode::ForceDirected, "Force-directed")
                        .on_hover_text("Let related actors pull together and strangers drift apart.");
                    ui.selectable_value(&mut mode, LayoutMode::Circular, "Circle")
                        .on_hover_text("Place every actor on a fixed circle.");
                    self.set_mode(mode);

                    if ui
                        .button("Reset layout")
                        .on_hover_text("Scatter the actors again and clear the selection.")
                        .clicked()
                    {
                        self.rebuild_graph();
                    }

                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        if let Some(fps_text) = self.fps_display_text() {
                            ui.label(fps_text);
                        }
                        ui.label(self.layout_status_text());
                    });
                });
            });

        egui::SidePanel::left("controls")
            .resizable(true)
            .default_width(300.0)
            .show(ctx, |ui| self.draw_controls(ui));

        egui::SidePanel::right("details")
            .resizable(true)
            .default_width(320.0)
            .show(ctx, |ui| self.draw_details(ui));

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| self.draw_graph(ui));
    }
}
