use std::collections::HashSet;

use eframe::egui::{self, Align2, Color32, FontId, Painter, Sense, Stroke, Ui, vec2};
use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

use crate::layout::{
    EdgeView, Flow, GraphPainter, Interaction, LayoutMode, NodeView, PointerFrame,
};
use crate::network::{ActorId, ActorKind, Network, relation_color};

use super::super::ViewModel;
use super::build::attraction_weight;
use super::super::render_utils::{
    blend_color, dim_color, draw_background, fit_label, paint_connector,
};

pub(in crate::app) fn fuzzy_match_score(
    matcher: &SkimMatcherV2,
    text: &str,
    query: &str,
) -> Option<i64> {
    matcher
        .fuzzy_match(text, query)
        .or_else(|| matcher.fuzzy_match(&text.to_ascii_lowercase(), &query.to_ascii_lowercase()))
}

struct RelationStyle<'a> {
    network: &'a Network,
    selected: Option<ActorId>,
    focus: Option<HashSet<ActorId>>,
    search_matches: HashSet<ActorId>,
}

impl RelationStyle<'_> {
    fn in_focus(&self, id: ActorId) -> bool {
        self.focus.as_ref().is_none_or(|focus| focus.contains(&id))
    }
}

impl GraphPainter<ActorId> for RelationStyle<'_> {
    fn paint_edge(&mut self, painter: &Painter, edge: &EdgeView<'_, ActorId>) {
        let (a, b) = (*edge.a, *edge.b);
        let touches_selection = self.selected.is_some_and(|id| id == a || id == b);
        let width = if touches_selection { 2.4 } else { 1.4 };

        for connector in &edge.connectors {
            let opinion = match connector.flow {
                Flow::Forward => self.network.opinion(a, b),
                Flow::Backward => self.network.opinion(b, a),
                Flow::Both | Flow::Undirected => self.network.goodwill(a, b),
            };
            let mut color = relation_color(opinion);
            if self.selected.is_some() && !touches_selection {
                color = dim_color(color, 0.45);
            }
            paint_connector(painter, connector, Stroke::new(width, color));
        }
    }

    fn paint_node(&mut self, painter: &Painter, node: &NodeView<'_, ActorId>) {
        let id = *node.id;
        let Some(actor) = self.network.actor(id) else {
            return;
        };

        let radius = node.slot.width() * 0.3;
        let base_color = match actor.kind {
            ActorKind::Person => Color32::from_rgb(88, 104, 122),
            ActorKind::Faction => blend_color(Color32::from_rgb(60, 66, 74), actor.color, 0.55),
        };
        let is_selected = self.selected == Some(id);
        let is_match = self.search_matches.contains(&id);
        let fill = if is_selected {
            blend_color(base_color, Color32::from_rgb(245, 206, 93), 0.6)
        } else if node.interaction == Interaction::Dragging {
            blend_color(base_color, Color32::from_rgb(255, 164, 101), 0.5)
        } else if self.in_focus(id) {
            base_color
        } else {
            dim_color(base_color, 0.5)
        };

        painter.circle_filled(node.center, radius, fill);
        let ring = if is_selected {
            Stroke::new(2.2, Color32::from_rgb(245, 206, 93))
        } else if is_match {
            Stroke::new(1.8, Color32::from_rgb(103, 196, 255))
        } else {
            Stroke::new(1.0, Color32::from_rgba_unmultiplied(15, 15, 15, 190))
        };
        painter.circle_stroke(node.center, radius, ring);

        painter.text(
            node.center,
            Align2::CENTER_CENTER,
            actor.initials(),
            FontId::proportional(13.0),
            Color32::from_gray(240),
        );
        painter.text(
            node.center + vec2(0.0, radius + 4.0),
            Align2::CENTER_TOP,
            fit_label(&actor.name, 14),
            FontId::proportional(11.0),
            if self.in_focus(id) {
                Color32::from_gray(225)
            } else {
                Color32::from_gray(120)
            },
        );
    }
}

impl ViewModel {
    pub(in crate::app) fn search_matches(&self) -> HashSet<ActorId> {
        let query = self.search.trim();
        if query.is_empty() {
            return HashSet::new();
        }

        let matcher = SkimMatcherV2::default();
        self.network
            .actors_of(self.page.kind())
            .filter(|actor| fuzzy_match_score(&matcher, &actor.name, query).is_some())
            .map(|actor| actor.id)
            .collect()
    }

    pub(in crate::app) fn draw_graph(&mut self, ui: &mut Ui) {
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click());
        let painter = ui.painter_at(rect);
        draw_background(&painter, rect);

        if self.graph.size() != rect.size() {
            self.graph.resize(rect.size());
            if self.mode == LayoutMode::Circular {
                self.graph.arrange_circle(true);
            }
        }
        self.graph.update_config(self.settings.graph);

        let settled = if self.live_physics {
            let (network, page) = (&self.network, self.page);
            self.graph.update(&|from: &ActorId, to: &ActorId| {
                attraction_weight(network, page, *from, *to)
            })
        } else {
            true
        };

        let dragging = self
            .graph
            .nodes()
            .iter()
            .any(|node| node.interaction() == Interaction::Dragging);
        let pointer = if response.contains_pointer() || dragging {
            ui.input(|input| PointerFrame::from_input(input, rect.min))
        } else {
            PointerFrame::idle()
        };

        let focus = self.selected.map(|id| {
            let mut focus = self
                .graph
                .connections(&id)
                .into_iter()
                .copied()
                .collect::<HashSet<_>>();
            focus.insert(id);
            focus
        });
        let mut style = RelationStyle {
            network: &self.network,
            selected: self.selected,
            focus,
            search_matches: self.search_matches(),
        };
        let dragged = self.graph.draw(&painter, rect, &pointer, &mut style);

        self.apply_node_actions(&pointer, response.clicked_by(egui::PointerButton::Primary));

        if let Some(text) = self.hovered.and_then(|id| self.hover_text(id)) {
            ui.output_mut(|output| {
                output.cursor_icon = egui::CursorIcon::PointingHand;
            });
            painter.text(
                rect.left_top() + vec2(10.0, 10.0),
                Align2::LEFT_TOP,
                text,
                FontId::proportional(13.0),
                Color32::from_gray(240),
            );
        }

        if !settled || dragged {
            ui.ctx().request_repaint();
        }
    }
}
