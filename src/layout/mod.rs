mod config;
mod edge;
mod math;
mod node;
mod pointer;

use std::collections::HashMap;
use std::hash::Hash;

use eframe::egui::{Painter, Pos2, Rect, Vec2};
use log::{debug, trace, warn};
use rand::Rng;

pub use config::GraphConfig;
pub use edge::{Connector, Edge, EdgeKind, Flow};
pub use math::{direction_to, distance_to, point_on_circle, random_point, rotated};
pub use node::{
    DrawStage, Forces, FreezeReason, HookId, Interaction, Node, NodeResponse, NodeView,
    PointerHook,
};
pub use pointer::PointerFrame;

pub trait Affinity<K> {
    fn attraction(&self, from: &K, to: &K) -> Option<f32>;
}

impl<K, F> Affinity<K> for F
where
    F: Fn(&K, &K) -> Option<f32>,
{
    fn attraction(&self, from: &K, to: &K) -> Option<f32> {
        self(from, to)
    }
}

pub fn no_affinity<K>(_from: &K, _to: &K) -> Option<f32> {
    None
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LayoutMode {
    #[default]
    ForceDirected,
    Circular,
}

pub struct EdgeView<'a, K> {
    pub kind: EdgeKind,
    pub a: &'a K,
    pub b: &'a K,
    pub connectors: Vec<Connector>,
}

pub trait GraphPainter<K> {
    fn paint_edge(&mut self, painter: &Painter, edge: &EdgeView<'_, K>);
    fn paint_node(&mut self, painter: &Painter, node: &NodeView<'_, K>);
}

pub struct Graph<K> {
    size: Vec2,
    config: GraphConfig,
    nodes: Vec<Node<K>>,
    index_by_id: HashMap<K, usize>,
    edges: Vec<Edge>,
    connections: Vec<Vec<usize>>,
    iteration: u32,
    done: bool,
    ideal_distance: f32,
    temperature: f32,
    mode: LayoutMode,
}

impl<K: Clone + Eq + Hash> Graph<K> {
    pub fn new(size: Vec2, config: GraphConfig) -> Self {
        let config = config.sanitized();
        Self {
            size,
            nodes: Vec::new(),
            index_by_id: HashMap::new(),
            edges: Vec::new(),
            connections: Vec::new(),
            iteration: 1,
            done: false,
            ideal_distance: config.slot_size,
            temperature: config.max_temperature,
            mode: LayoutMode::ForceDirected,
            config,
        }
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn center(&self) -> Vec2 {
        self.size / 2.0
    }

    pub fn resize(&mut self, size: Vec2) {
        if self.size == size {
            return;
        }
        self.size = size;
        self.restart();
    }

    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    pub fn update_config(&mut self, config: GraphConfig) {
        let config = config.sanitized();
        if self.config == config {
            return;
        }
        self.config = config;
        self.restart();
    }

    pub fn mode(&self) -> LayoutMode {
        self.mode
    }

    pub fn iteration(&self) -> u32 {
        self.iteration
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    pub fn ideal_distance(&self) -> f32 {
        self.ideal_distance
    }

    pub fn temperature(&self) -> f32 {
        self.temperature
    }

    pub fn restart(&mut self) {
        self.iteration = 1;
        self.done = false;
        debug!("layout restarted with {} nodes", self.nodes.len());
    }

    pub fn set_nodes(&mut self, nodes: Vec<Node<K>>) {
        self.nodes.clear();
        self.index_by_id.clear();
        self.nodes.reserve(nodes.len());

        for node in nodes {
            if self.index_by_id.contains_key(node.id()) {
                warn!("dropping node with a duplicate identity");
                continue;
            }
            self.index_by_id.insert(node.id().clone(), self.nodes.len());
            self.nodes.push(node);
        }

        self.clear_edges();
        self.connections = vec![Vec::new(); self.nodes.len()];
        self.restart();
    }

    pub fn nodes(&self) -> &[Node<K>] {
        &self.nodes
    }

    pub fn nodes_mut(&mut self) -> &mut [Node<K>] {
        &mut self.nodes
    }

    pub fn node(&self, id: &K) -> Option<&Node<K>> {
        self.index_by_id.get(id).map(|&index| &self.nodes[index])
    }

    pub fn node_mut(&mut self, id: &K) -> Option<&mut Node<K>> {
        let index = *self.index_by_id.get(id)?;
        Some(&mut self.nodes[index])
    }

    pub fn node_at(&self, point: Pos2) -> Option<&K> {
        let slot_size = self.config.slot_size;
        self.nodes
            .iter()
            .rev()
            .find(|node| node.slot(slot_size).contains(point))
            .map(Node::id)
    }

    /// Adds an edge unless an endpoint is unknown, both are the same node, or the pair
    /// is already connected in either direction. Returns whether an edge was added.
    pub fn add_edge(&mut self, a: &K, b: &K, kind: EdgeKind) -> bool {
        let (Some(&from), Some(&to)) = (self.index_by_id.get(a), self.index_by_id.get(b)) else {
            return false;
        };
        if from == to || self.connections[from].contains(&to) {
            return false;
        }

        self.edges.push(Edge::new(from, to, kind));
        self.connections[from].push(to);
        self.connections[to].push(from);
        true
    }

    pub fn clear_edges(&mut self) {
        self.edges.clear();
        for neighbors in &mut self.connections {
            neighbors.clear();
        }
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn edge_endpoints(&self, edge: &Edge) -> (&K, &K) {
        (self.nodes[edge.a].id(), self.nodes[edge.b].id())
    }

    pub fn connections(&self, id: &K) -> Vec<&K> {
        self.index_by_id
            .get(id)
            .map(|&index| {
                self.connections[index]
                    .iter()
                    .map(|&other| self.nodes[other].id())
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn scatter(&mut self, rng: &mut impl Rng) {
        let bounds = Rect::from_min_size(Pos2::ZERO, self.size);
        for node in &mut self.nodes {
            node.position = random_point(bounds, rng);
            node.velocity = Vec2::ZERO;
        }
        self.restart();
    }

    pub fn arrange_circle(&mut self, lock: bool) {
        let count = self.nodes.len();
        let center = self.center();
        let radius = (self.size.x.min(self.size.y) / 2.0 - self.config.slot_size / 2.0).max(0.0);

        for (index, node) in self.nodes.iter_mut().enumerate() {
            node.position = point_on_circle(index, count, center, radius);
            node.velocity = Vec2::ZERO;
            if lock {
                node.freeze(FreezeReason::Layout);
            } else {
                node.thaw(FreezeReason::Layout);
            }
        }
        self.restart();
    }

    pub fn set_mode(&mut self, mode: LayoutMode) {
        debug!("switching layout mode from {:?} to {mode:?}", self.mode);
        self.mode = mode;
        match mode {
            LayoutMode::Circular => self.arrange_circle(true),
            LayoutMode::ForceDirected => {
                for node in &mut self.nodes {
                    node.thaw(FreezeReason::Layout);
                }
                self.restart();
            }
        }
    }

    fn prepare_iteration(&mut self) {
        let slot_size = self.config.slot_size;
        self.ideal_distance = ((self.size.x * self.size.y).max(0.0).sqrt()
            / self.nodes.len() as f32)
            .clamp(slot_size, slot_size * 5.0);
        self.temperature = self.config.max_temperature
            * (1.0 - self.iteration as f32 / self.config.max_iterations as f32);
    }

    /// Advances the simulation by one tick and returns whether it has settled.
    pub fn update(&mut self, affinity: &impl Affinity<K>) -> bool {
        if self.done
            || self.iteration > self.config.max_iterations
            || self.nodes.iter().all(Node::is_frozen)
        {
            if !self.done {
                debug!("layout halted at iteration {}", self.iteration);
                self.done = true;
            }
            return true;
        }

        self.prepare_iteration();
        let forces = Forces {
            attractive: self.config.attractive_constant,
            repulsive: self.config.repulsive_constant,
            ideal_distance: self.ideal_distance,
        };

        for node in &mut self.nodes {
            node.velocity = Vec2::ZERO;
        }

        for edge in &self.edges {
            let (a, b) = (edge.a, edge.b);
            let (position_a, position_b) = (self.nodes[a].position, self.nodes[b].position);
            let weight_ab = affinity.attraction(self.nodes[a].id(), self.nodes[b].id());
            let weight_ba = affinity.attraction(self.nodes[b].id(), self.nodes[a].id());
            self.nodes[a].attracted_to(position_b, weight_ab, &forces);
            self.nodes[b].attracted_to(position_a, weight_ba, &forces);
        }

        for index in 0..self.nodes.len() {
            for other in 0..self.nodes.len() {
                if index == other {
                    continue;
                }
                let position = self.nodes[other].position;
                self.nodes[index].repulsed_by(position, &forces);
            }
        }

        let center = self.center();
        let diagonal = self.size.length();
        let temperature = self.temperature;
        let threshold = self.config.threshold;
        let central = self.config.central_constant;
        let mut settled = true;
        let mut max_speed_sq = 0.0_f32;

        for node in self.nodes.iter_mut().filter(|node| !node.is_frozen()) {
            let distance = distance_to(node.position, center);
            let overshoot = (distance - diagonal).max(0.0);
            node.velocity +=
                direction_to(node.position, center) * central * (distance + overshoot * overshoot);
            node.velocity *= temperature;

            let speed_sq = node.velocity.length_sq();
            max_speed_sq = max_speed_sq.max(speed_sq);
            if speed_sq > threshold {
                settled = false;
            }
        }
        self.done = settled;

        for node in self.nodes.iter_mut().filter(|node| !node.is_frozen()) {
            node.position += node.velocity;
        }

        self.recenter();

        trace!(
            "iteration {} ideal {:.1} temperature {:.4} max speed² {:.4}",
            self.iteration, self.ideal_distance, self.temperature, max_speed_sq
        );
        self.iteration += 1;
        self.done
    }

    fn recenter(&mut self) {
        let mut free = self.nodes.iter().filter(|node| !node.is_frozen());
        let Some(first) = free.next() else {
            return;
        };
        let mut bounds = Rect::from_min_max(first.position.to_pos2(), first.position.to_pos2());
        for node in free {
            bounds.extend_with(node.position.to_pos2());
        }

        let offset = self.center() - bounds.center().to_vec2();
        for node in self.nodes.iter_mut().filter(|node| !node.is_frozen()) {
            node.position += offset;
        }
    }

    pub fn interactions(&mut self, pointer: &PointerFrame) -> bool {
        let slot_size = self.config.slot_size;
        let mut dragged = false;
        for node in &mut self.nodes {
            dragged |= node.interactions(pointer, slot_size).dragged;
        }
        if dragged {
            self.restart();
        }
        dragged
    }

    pub fn draw(
        &mut self,
        painter: &Painter,
        canvas: Rect,
        pointer: &PointerFrame,
        style: &mut impl GraphPainter<K>,
    ) -> bool {
        let origin = canvas.min;
        let slot_size = self.config.slot_size;

        for edge in &self.edges {
            let (a, b) = (&self.nodes[edge.a], &self.nodes[edge.b]);
            let view = EdgeView {
                kind: edge.kind,
                a: a.id(),
                b: b.id(),
                connectors: edge.connectors(origin + a.position, origin + b.position),
            };
            style.paint_edge(painter, &view);
        }

        for node in &mut self.nodes {
            node.run_draw_hooks(DrawStage::Pre, origin, slot_size, painter);
            style.paint_node(painter, &node.view(origin, slot_size));
            node.run_draw_hooks(DrawStage::Post, origin, slot_size, painter);
        }

        self.interactions(pointer)
    }
}
