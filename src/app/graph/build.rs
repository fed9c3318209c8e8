use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use eframe::egui::{Pos2, Rect, vec2};
use log::debug;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::layout::{
    DrawStage, EdgeKind, Graph, Interaction, LayoutMode, Node, PointerHook, random_point,
};
use crate::network::{ActorId, ActorKind, Network, Thresholds};

use super::super::render_utils::{draw_color_chip, draw_halo, draw_pin_badge};
use super::super::{NodeAction, Page, ViewModel, ViewerOptions};

const INITIAL_CANVAS: [f32; 2] = [960.0, 720.0];

pub fn rebuild_edges(
    graph: &mut Graph<ActorId>,
    network: &Network,
    page: Page,
    selected: Option<ActorId>,
    thresholds: Thresholds,
) {
    graph.clear_edges();

    let ids = graph.nodes().iter().map(|node| *node.id()).collect::<Vec<_>>();
    let selected = selected.filter(|id| graph.node(id).is_some());

    match page {
        Page::People => {
            if let Some(selected) = selected {
                for other in network.related(selected, ids.iter().copied(), true, thresholds) {
                    graph.add_edge(&selected, &other, EdgeKind::Directed);
                }
            }
            for &id in &ids {
                for other in network.related(id, ids.iter().copied(), false, thresholds) {
                    graph.add_edge(&id, &other, EdgeKind::Directed);
                }
            }
        }
        Page::Factions => match selected {
            Some(selected) => {
                for other in &ids {
                    graph.add_edge(&selected, other, EdgeKind::Mutual);
                }
            }
            None => {
                for a in &ids {
                    for b in &ids {
                        graph.add_edge(a, b, EdgeKind::Mutual);
                    }
                }
            }
        },
    }

    debug!(
        "rebuilt {} edges for {:?} (selected: {:?})",
        graph.edges().len(),
        page,
        selected
    );
    graph.restart();
}

/// Attraction weight of `from` towards `to` on `page`. Faction goodwill reads the same
/// from both sides.
pub(in crate::app) fn attraction_weight(
    network: &Network,
    page: Page,
    from: ActorId,
    to: ActorId,
) -> Option<f32> {
    match page {
        Page::People => network.attraction(from, to),
        Page::Factions => Some(network.goodwill(from, to)),
    }
}

impl ViewModel {
    pub(in crate::app) fn new(network: Network, options: &ViewerOptions) -> Self {
        let settings = options.settings.sanitized();
        let rng = options
            .seed
            .map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);
        let mode = if options.circle {
            LayoutMode::Circular
        } else {
            LayoutMode::ForceDirected
        };

        let mut model = Self {
            graph: Graph::new(vec2(INITIAL_CANVAS[0], INITIAL_CANVAS[1]), settings.graph),
            network,
            settings,
            page: Page::People,
            mode,
            selected: None,
            hovered: None,
            actions: Rc::new(RefCell::new(Vec::new())),
            rng,
            search: String::new(),
            live_physics: true,
            show_fps_bar: true,
            fps_current: 0.0,
            fps_samples: VecDeque::new(),
        };
        model.rebuild_graph();
        model
    }

    pub(in crate::app) fn rebuild_graph(&mut self) {
        let bounds = Rect::from_min_size(Pos2::ZERO, self.graph.size());
        let nodes = self
            .network
            .actors_of(self.page.kind())
            .map(|actor| {
                let mut node = Node::new(actor.id, random_point(bounds, &mut self.rng));

                let actions = Rc::clone(&self.actions);
                node.on_pointer(PointerHook::LeftClick, move |id| {
                    actions.borrow_mut().push(NodeAction::Select(*id));
                });
                let actions = Rc::clone(&self.actions);
                node.on_pointer(PointerHook::Hover, move |id| {
                    actions.borrow_mut().push(NodeAction::Hover(*id));
                });

                node.on_draw(DrawStage::Pre, |view, painter| {
                    if view.interaction != Interaction::Idle {
                        draw_halo(painter, view.slot);
                    }
                });
                node.on_draw(DrawStage::Post, |view, painter| {
                    if view.pinned {
                        draw_pin_badge(painter, view.slot);
                    }
                });
                if actor.kind == ActorKind::Faction {
                    let color = actor.color;
                    node.on_draw(DrawStage::Post, move |view, painter| {
                        draw_color_chip(painter, view.slot, color);
                    });
                }
                node
            })
            .collect();

        self.graph.set_nodes(nodes);
        self.graph.set_mode(self.mode);
        self.selected = None;
        self.hovered = None;
        self.actions.borrow_mut().clear();
        self.refresh_edges();
    }

    pub(in crate::app) fn refresh_edges(&mut self) {
        rebuild_edges(
            &mut self.graph,
            &self.network,
            self.page,
            self.selected,
            self.settings.thresholds(),
        );
    }

    pub(in crate::app) fn set_selected(&mut self, selected: Option<ActorId>) {
        if let Some(previous) = self.selected
            && let Some(node) = self.graph.node_mut(&previous)
        {
            node.set_frozen(false);
        }

        self.selected = selected.filter(|id| self.graph.node(id).is_some());
        if let Some(current) = self.selected
            && let Some(node) = self.graph.node_mut(&current)
        {
            node.set_frozen(true);
        }

        self.refresh_edges();
    }

    pub(in crate::app) fn set_page(&mut self, page: Page) {
        if self.page == page {
            return;
        }
        self.page = page;
        self.rebuild_graph();
    }

    pub(in crate::app) fn set_mode(&mut self, mode: LayoutMode) {
        if self.mode == mode {
            return;
        }
        self.mode = mode;
        self.graph.set_mode(mode);
    }
}
