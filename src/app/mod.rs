use std::cell::RefCell;
use std::collections::VecDeque;
use std::path::PathBuf;
use std::rc::Rc;
use std::sync::mpsc::{self, Receiver};
use std::thread;

use eframe::egui::{self, Context};
use log::error;
use rand::rngs::StdRng;

use crate::config::Settings;
use crate::layout::{Graph, LayoutMode};
use crate::network::{ActorId, ActorKind, Network, load_network};

mod graph;
mod render_utils;
mod ui;

pub use graph::rebuild_edges;

#[derive(Clone, Debug)]
pub struct ViewerOptions {
    pub network: Option<PathBuf>,
    pub settings: Settings,
    pub circle: bool,
    pub seed: Option<u64>,
}

pub struct RelationsApp {
    options: ViewerOptions,
    state: AppState,
}

enum AppState {
    Loading { rx: Receiver<Result<Network, String>> },
    Ready(Box<ViewModel>),
    Error(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Page {
    People,
    Factions,
}

impl Page {
    pub fn kind(self) -> ActorKind {
        match self {
            Page::People => ActorKind::Person,
            Page::Factions => ActorKind::Faction,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum NodeAction {
    Select(ActorId),
    Hover(ActorId),
}

type ActionQueue = Rc<RefCell<Vec<NodeAction>>>;

struct ViewModel {
    network: Network,
    settings: Settings,
    page: Page,
    mode: LayoutMode,
    graph: Graph<ActorId>,
    selected: Option<ActorId>,
    hovered: Option<ActorId>,
    actions: ActionQueue,
    rng: StdRng,
    search: String,
    live_physics: bool,
    show_fps_bar: bool,
    fps_current: f32,
    fps_samples: VecDeque<f32>,
}

impl RelationsApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, options: ViewerOptions) -> Self {
        let state = Self::start_load(options.network.clone());
        Self { options, state }
    }

    fn spawn_load(path: Option<PathBuf>) -> Receiver<Result<Network, String>> {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let result = match path {
                Some(path) => load_network(&path).map_err(|error| format!("{error:#}")),
                None => Ok(Network::sample()),
            };
            let _ = tx.send(result);
        });

        rx
    }

    fn start_load(path: Option<PathBuf>) -> AppState {
        AppState::Loading {
            rx: Self::spawn_load(path),
        }
    }
}

impl eframe::App for RelationsApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let mut transition = None;

        match &mut self.state {
            AppState::Loading { rx } => {
                if let Ok(result) = rx.try_recv() {
                    transition = Some(match result {
                        Ok(network) => {
                            AppState::Ready(Box::new(ViewModel::new(network, &self.options)))
                        }
                        Err(message) => {
                            error!("failed to load network: {message}");
                            AppState::Error(message)
                        }
                    });
                }

                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(120.0);
                        ui.heading("Loading relations network...");
                        ui.add_space(8.0);
                        ui.spinner();
                    });
                });
                ctx.request_repaint();
            }
            AppState::Error(message) => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.heading("Failed to load relations network");
                    ui.add_space(6.0);
                    ui.label(message.as_str());
                    ui.add_space(10.0);
                    if ui.button("Retry").clicked() {
                        transition = Some(Self::start_load(self.options.network.clone()));
                    }
                    if ui.button("Open sample network").clicked() {
                        transition = Some(Self::start_load(None));
                    }
                });
            }
            AppState::Ready(model) => model.show(ctx),
        }

        if let Some(next_state) = transition {
            self.state = next_state;
        }
    }
}
