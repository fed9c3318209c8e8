use std::fmt;

use eframe::egui::{Painter, PointerButton, Pos2, Rect, Vec2, vec2};

use super::math::{direction_to, distance_to};
use super::pointer::PointerFrame;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FreezeReason {
    Pinned,
    Layout,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Interaction {
    #[default]
    Idle,
    Hovering,
    Dragging,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerHook {
    Hover,
    LeftClick,
    RightClick,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DrawStage {
    Pre,
    Post,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct HookId(u64);

#[derive(Clone, Copy, Debug)]
pub struct Forces {
    pub attractive: f32,
    pub repulsive: f32,
    pub ideal_distance: f32,
}

#[derive(Clone, Copy, Debug)]
pub struct NodeView<'a, K> {
    pub id: &'a K,
    pub center: Pos2,
    pub slot: Rect,
    pub frozen: bool,
    pub pinned: bool,
    pub interaction: Interaction,
}

type PointerCallback<K> = Box<dyn FnMut(&K)>;
type DrawCallback<K> = Box<dyn FnMut(&NodeView<'_, K>, &Painter)>;

struct Hooks<K> {
    next_id: u64,
    pointer: Vec<(HookId, PointerHook, PointerCallback<K>)>,
    draw: Vec<(HookId, DrawStage, DrawCallback<K>)>,
}

impl<K> Default for Hooks<K> {
    fn default() -> Self {
        Self {
            next_id: 0,
            pointer: Vec::new(),
            draw: Vec::new(),
        }
    }
}

impl<K> Hooks<K> {
    fn next_id(&mut self) -> HookId {
        let id = HookId(self.next_id);
        self.next_id += 1;
        id
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NodeResponse {
    pub hovered: bool,
    pub dragged: bool,
    pub clicked: Option<PointerButton>,
}

pub struct Node<K> {
    id: K,
    pub position: Vec2,
    pub velocity: Vec2,
    pinned: bool,
    layout_locked: bool,
    interaction: Interaction,
    armed: Option<PointerButton>,
    was_dragged: bool,
    hooks: Hooks<K>,
}

impl<K: fmt::Debug> fmt::Debug for Node<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("id", &self.id)
            .field("position", &self.position)
            .field("velocity", &self.velocity)
            .field("pinned", &self.pinned)
            .field("layout_locked", &self.layout_locked)
            .field("interaction", &self.interaction)
            .field("hooks", &(self.hooks.pointer.len() + self.hooks.draw.len()))
            .finish()
    }
}

impl<K> Node<K> {
    pub fn new(id: K, position: Vec2) -> Self {
        Self {
            id,
            position,
            velocity: Vec2::ZERO,
            pinned: false,
            layout_locked: false,
            interaction: Interaction::Idle,
            armed: None,
            was_dragged: false,
            hooks: Hooks::default(),
        }
    }

    pub fn id(&self) -> &K {
        &self.id
    }

    pub fn interaction(&self) -> Interaction {
        self.interaction
    }

    pub fn is_frozen(&self) -> bool {
        self.pinned || self.layout_locked
    }

    pub fn is_frozen_for(&self, reason: FreezeReason) -> bool {
        match reason {
            FreezeReason::Pinned => self.pinned,
            FreezeReason::Layout => self.layout_locked,
        }
    }

    pub fn freeze(&mut self, reason: FreezeReason) {
        self.set_reason(reason, true);
    }

    pub fn thaw(&mut self, reason: FreezeReason) {
        self.set_reason(reason, false);
    }

    pub fn set_frozen(&mut self, frozen: bool) {
        self.set_reason(FreezeReason::Pinned, frozen);
    }

    fn set_reason(&mut self, reason: FreezeReason, value: bool) {
        match reason {
            FreezeReason::Pinned => self.pinned = value,
            FreezeReason::Layout => self.layout_locked = value,
        }
        if value {
            self.velocity = Vec2::ZERO;
        }
    }

    pub fn slot(&self, slot_size: f32) -> Rect {
        Rect::from_center_size(self.position.to_pos2(), vec2(slot_size, slot_size))
    }

    /// A weight above one scales the pull by its square root; smaller weights never
    /// weaken or reverse it.
    pub fn attracted_to(&mut self, other: Vec2, weight: Option<f32>, forces: &Forces) {
        if self.is_frozen() {
            return;
        }

        let mut force = forces.attractive
            * (distance_to(self.position, other) - forces.ideal_distance).max(0.0);
        if let Some(weight) = weight
            && weight > 1.0
        {
            force *= weight.sqrt();
        }

        self.velocity += direction_to(self.position, other) * force;
    }

    pub fn repulsed_by(&mut self, other: Vec2, forces: &Forces) {
        if self.is_frozen() {
            return;
        }

        let distance = distance_to(self.position, other);
        let force = -(forces.repulsive / (distance * distance)) * forces.ideal_distance;
        self.velocity += direction_to(self.position, other) * force;
    }

    pub fn clamp(&mut self, size: Vec2) {
        self.position.x = self.position.x.clamp(0.0, size.x);
        self.position.y = self.position.y.clamp(0.0, size.y);
    }

    pub fn on_pointer(&mut self, hook: PointerHook, callback: impl FnMut(&K) + 'static) -> HookId {
        let id = self.hooks.next_id();
        self.hooks.pointer.push((id, hook, Box::new(callback)));
        id
    }

    pub fn on_draw(
        &mut self,
        stage: DrawStage,
        callback: impl FnMut(&NodeView<'_, K>, &Painter) + 'static,
    ) -> HookId {
        let id = self.hooks.next_id();
        self.hooks.draw.push((id, stage, Box::new(callback)));
        id
    }

    pub fn remove_hook(&mut self, id: HookId) -> bool {
        let before = self.hooks.pointer.len() + self.hooks.draw.len();
        self.hooks.pointer.retain(|(hook_id, _, _)| *hook_id != id);
        self.hooks.draw.retain(|(hook_id, _, _)| *hook_id != id);
        before != self.hooks.pointer.len() + self.hooks.draw.len()
    }

    pub fn hook_count(&self) -> usize {
        self.hooks.pointer.len() + self.hooks.draw.len()
    }

    fn fire(&mut self, hook: PointerHook) {
        let Self { id, hooks, .. } = self;
        for (_, kind, callback) in &mut hooks.pointer {
            if *kind == hook {
                callback(&*id);
            }
        }
    }

    pub fn view(&self, origin: Pos2, slot_size: f32) -> NodeView<'_, K> {
        let center = origin + self.position;
        NodeView {
            id: &self.id,
            center,
            slot: Rect::from_center_size(center, vec2(slot_size, slot_size)),
            frozen: self.is_frozen(),
            pinned: self.pinned,
            interaction: self.interaction,
        }
    }

    pub(super) fn run_draw_hooks(
        &mut self,
        stage: DrawStage,
        origin: Pos2,
        slot_size: f32,
        painter: &Painter,
    ) {
        let Self {
            id,
            position,
            pinned,
            layout_locked,
            interaction,
            hooks,
            ..
        } = self;
        let center = origin + *position;
        let view = NodeView {
            id: &*id,
            center,
            slot: Rect::from_center_size(center, vec2(slot_size, slot_size)),
            frozen: *pinned || *layout_locked,
            pinned: *pinned,
            interaction: *interaction,
        };

        for (_, hook_stage, callback) in &mut hooks.draw {
            if *hook_stage == stage {
                callback(&view, painter);
            }
        }
    }

    pub fn interactions(&mut self, pointer: &PointerFrame, slot_size: f32) -> NodeResponse {
        let slot = self.slot(slot_size);
        let over = pointer.position.is_some_and(|position| slot.contains(position));
        let mut response = NodeResponse {
            hovered: over,
            ..NodeResponse::default()
        };

        if let Some(button) = pointer.pressed {
            self.was_dragged = false;
            self.armed = over.then_some(button);
        }

        if over && pointer.pressed.is_none() && pointer.released.is_none() {
            self.fire(PointerHook::Hover);
        }

        let dragging = self.interaction == Interaction::Dragging;
        if self.armed == Some(PointerButton::Primary)
            && pointer.primary_down
            && pointer.delta != Vec2::ZERO
            && (over || dragging)
        {
            self.position += pointer.delta;
            self.freeze(FreezeReason::Pinned);
            self.was_dragged = true;
            response.dragged = true;
        }

        if let Some(button) = pointer.released {
            if over && self.armed == Some(button) && !self.was_dragged {
                match button {
                    PointerButton::Primary => self.fire(PointerHook::LeftClick),
                    PointerButton::Secondary => {
                        self.thaw(FreezeReason::Pinned);
                        self.fire(PointerHook::RightClick);
                    }
                    _ => {}
                }
                response.clicked = Some(button);
            }
            self.armed = None;
        }

        let still_dragging =
            self.armed == Some(PointerButton::Primary) && self.was_dragged && pointer.primary_down;
        self.interaction = if still_dragging {
            Interaction::Dragging
        } else if over {
            Interaction::Hovering
        } else {
            Interaction::Idle
        };

        response
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use eframe::egui::pos2;

    use super::*;

    const SLOT: f32 = 70.0;

    fn forces() -> Forces {
        Forces {
            attractive: 0.2,
            repulsive: 5000.0,
            ideal_distance: 100.0,
        }
    }

    #[test]
    fn attraction_is_zero_inside_ideal_distance() {
        let mut node = Node::new(1_u32, vec2(0.0, 0.0));
        node.attracted_to(vec2(50.0, 0.0), None, &forces());
        assert_eq!(node.velocity, Vec2::ZERO);
    }

    #[test]
    fn attraction_grows_with_excess_distance() {
        let mut node = Node::new(1_u32, vec2(0.0, 0.0));
        node.attracted_to(vec2(300.0, 0.0), None, &forces());
        assert!((node.velocity.x - 40.0).abs() < 1e-4);
        assert_eq!(node.velocity.y, 0.0);
    }

    #[test]
    fn strong_weight_scales_attraction_by_square_root() {
        let mut plain = Node::new(1_u32, Vec2::ZERO);
        let mut weighted = Node::new(2_u32, Vec2::ZERO);
        plain.attracted_to(vec2(300.0, 0.0), None, &forces());
        weighted.attracted_to(vec2(300.0, 0.0), Some(2.0), &forces());

        let ratio = weighted.velocity.x / plain.velocity.x;
        assert!((ratio - 2.0_f32.sqrt()).abs() < 1e-4);
    }

    #[test]
    fn weak_or_negative_weight_does_not_change_attraction() {
        let mut plain = Node::new(1_u32, Vec2::ZERO);
        let mut weak = Node::new(2_u32, Vec2::ZERO);
        let mut hostile = Node::new(3_u32, Vec2::ZERO);
        plain.attracted_to(vec2(300.0, 0.0), None, &forces());
        weak.attracted_to(vec2(300.0, 0.0), Some(0.5), &forces());
        hostile.attracted_to(vec2(300.0, 0.0), Some(-80.0), &forces());

        assert_eq!(plain.velocity, weak.velocity);
        assert_eq!(plain.velocity, hostile.velocity);
    }

    #[test]
    fn repulsion_pushes_away_with_inverse_square() {
        let mut near = Node::new(1_u32, Vec2::ZERO);
        let mut far = Node::new(2_u32, Vec2::ZERO);
        near.repulsed_by(vec2(10.0, 0.0), &forces());
        far.repulsed_by(vec2(20.0, 0.0), &forces());

        assert!(near.velocity.x < 0.0);
        assert!((near.velocity.x - -5000.0).abs() < 1e-2);
        assert!((near.velocity.x / far.velocity.x - 4.0).abs() < 1e-4);
    }

    #[test]
    fn repulsion_from_coincident_node_is_finite() {
        let mut node = Node::new(1_u32, vec2(5.0, 5.0));
        node.repulsed_by(vec2(5.0, 5.0), &forces());
        assert!(node.velocity.x.is_finite() && node.velocity.y.is_finite());
    }

    #[test]
    fn frozen_node_ignores_forces() {
        let mut node = Node::new(1_u32, Vec2::ZERO);
        node.freeze(FreezeReason::Layout);
        node.attracted_to(vec2(300.0, 0.0), Some(9.0), &forces());
        node.repulsed_by(vec2(2.0, 0.0), &forces());
        assert_eq!(node.velocity, Vec2::ZERO);
    }

    #[test]
    fn freeze_reasons_are_independent() {
        let mut node = Node::new(1_u32, Vec2::ZERO);
        node.freeze(FreezeReason::Layout);
        node.set_frozen(true);
        node.thaw(FreezeReason::Layout);
        assert!(node.is_frozen());
        assert!(node.is_frozen_for(FreezeReason::Pinned));

        node.set_frozen(false);
        assert!(!node.is_frozen());
    }

    #[test]
    fn clamp_keeps_node_inside_canvas() {
        let mut node = Node::new(1_u32, vec2(-10.0, 900.0));
        node.clamp(vec2(500.0, 400.0));
        assert_eq!(node.position, vec2(0.0, 400.0));
    }

    #[test]
    fn hover_fires_every_frame_while_inside() {
        let hovers = Rc::new(RefCell::new(0));
        let mut node = Node::new(7_u32, vec2(100.0, 100.0));
        let counter = Rc::clone(&hovers);
        node.on_pointer(PointerHook::Hover, move |_| *counter.borrow_mut() += 1);

        let pointer = PointerFrame::at(pos2(110.0, 95.0));
        for _ in 0..3 {
            let response = node.interactions(&pointer, SLOT);
            assert!(response.hovered);
        }
        node.interactions(&PointerFrame::at(pos2(400.0, 400.0)), SLOT);

        assert_eq!(*hovers.borrow(), 3);
        assert_eq!(node.interaction(), Interaction::Idle);
    }

    #[test]
    fn hover_skips_frames_with_button_changes() {
        let hovers = Rc::new(RefCell::new(0));
        let mut node = Node::new(7_u32, vec2(100.0, 100.0));
        let counter = Rc::clone(&hovers);
        node.on_pointer(PointerHook::Hover, move |_| *counter.borrow_mut() += 1);

        let over = PointerFrame::at(pos2(100.0, 100.0));
        let response = node.interactions(&over.press(PointerButton::Primary), SLOT);
        assert!(response.hovered);
        node.interactions(&over.release(PointerButton::Primary), SLOT);
        assert_eq!(*hovers.borrow(), 0);

        node.interactions(&over, SLOT);
        assert_eq!(*hovers.borrow(), 1);
    }

    #[test]
    fn click_without_drag_fires_left_click() {
        let clicks = Rc::new(RefCell::new(Vec::new()));
        let mut node = Node::new(7_u32, vec2(100.0, 100.0));
        let log = Rc::clone(&clicks);
        node.on_pointer(PointerHook::LeftClick, move |id| log.borrow_mut().push(*id));

        let over = PointerFrame::at(pos2(100.0, 100.0));
        node.interactions(&over.press(PointerButton::Primary), SLOT);
        let response = node.interactions(&over.release(PointerButton::Primary), SLOT);

        assert_eq!(response.clicked, Some(PointerButton::Primary));
        assert_eq!(*clicks.borrow(), vec![7]);
        assert!(!node.is_frozen());
    }

    #[test]
    fn drag_moves_and_pins_without_click() {
        let clicks = Rc::new(RefCell::new(0));
        let mut node = Node::new(7_u32, vec2(100.0, 100.0));
        let counter = Rc::clone(&clicks);
        node.on_pointer(PointerHook::LeftClick, move |_| *counter.borrow_mut() += 1);

        node.interactions(&PointerFrame::at(pos2(100.0, 100.0)).press(PointerButton::Primary), SLOT);
        let response = node.interactions(
            &PointerFrame::at(pos2(110.0, 105.0)).drag_by(vec2(10.0, 5.0)),
            SLOT,
        );
        assert!(response.dragged);
        assert_eq!(node.interaction(), Interaction::Dragging);
        assert_eq!(node.position, vec2(110.0, 105.0));
        assert!(node.is_frozen_for(FreezeReason::Pinned));

        node.interactions(
            &PointerFrame::at(pos2(110.0, 105.0)).release(PointerButton::Primary),
            SLOT,
        );
        assert_eq!(*clicks.borrow(), 0);
        assert_eq!(node.interaction(), Interaction::Hovering);
    }

    #[test]
    fn fast_drag_keeps_tracking_the_pointer() {
        let mut node = Node::new(1_u32, vec2(100.0, 100.0));
        node.interactions(&PointerFrame::at(pos2(100.0, 100.0)).press(PointerButton::Primary), SLOT);
        node.interactions(&PointerFrame::at(pos2(105.0, 100.0)).drag_by(vec2(5.0, 0.0)), SLOT);
        // the pointer outruns the slot in a single frame
        node.interactions(&PointerFrame::at(pos2(205.0, 100.0)).drag_by(vec2(100.0, 0.0)), SLOT);
        assert_eq!(node.position, vec2(205.0, 100.0));
    }

    #[test]
    fn press_elsewhere_does_not_drag_node() {
        let mut node = Node::new(1_u32, vec2(100.0, 100.0));
        node.interactions(&PointerFrame::at(pos2(300.0, 300.0)).press(PointerButton::Primary), SLOT);
        let response = node.interactions(
            &PointerFrame::at(pos2(100.0, 100.0)).drag_by(vec2(-200.0, -200.0)),
            SLOT,
        );
        assert!(!response.dragged);
        assert_eq!(node.position, vec2(100.0, 100.0));
        assert!(!node.is_frozen());
    }

    #[test]
    fn right_click_unpins_before_handlers_run() {
        let seen = Rc::new(RefCell::new(None));
        let mut node = Node::new(3_u32, vec2(50.0, 50.0));
        node.set_frozen(true);
        let log = Rc::clone(&seen);
        node.on_pointer(PointerHook::RightClick, move |id| *log.borrow_mut() = Some(*id));

        let over = PointerFrame::at(pos2(50.0, 50.0));
        node.interactions(&over.press(PointerButton::Secondary), SLOT);
        node.interactions(&over.release(PointerButton::Secondary), SLOT);

        assert!(!node.is_frozen());
        assert_eq!(*seen.borrow(), Some(3));
    }

    #[test]
    fn right_click_leaves_layout_lock_in_place() {
        let mut node = Node::new(3_u32, vec2(50.0, 50.0));
        node.freeze(FreezeReason::Layout);
        node.set_frozen(true);

        let over = PointerFrame::at(pos2(50.0, 50.0));
        node.interactions(&over.press(PointerButton::Secondary), SLOT);
        node.interactions(&over.release(PointerButton::Secondary), SLOT);

        assert!(!node.is_frozen_for(FreezeReason::Pinned));
        assert!(node.is_frozen_for(FreezeReason::Layout));
    }

    #[test]
    fn hooks_run_in_registration_order_and_can_be_removed() {
        let order = Rc::new(RefCell::new(Vec::new()));
        let mut node = Node::new(1_u32, vec2(10.0, 10.0));

        let first_log = Rc::clone(&order);
        let first = node.on_pointer(PointerHook::Hover, move |_| first_log.borrow_mut().push("first"));
        let second_log = Rc::clone(&order);
        node.on_pointer(PointerHook::Hover, move |_| second_log.borrow_mut().push("second"));

        node.interactions(&PointerFrame::at(pos2(10.0, 10.0)), SLOT);
        assert_eq!(*order.borrow(), vec!["first", "second"]);

        assert!(node.remove_hook(first));
        assert!(!node.remove_hook(first));
        node.interactions(&PointerFrame::at(pos2(10.0, 10.0)), SLOT);
        assert_eq!(*order.borrow(), vec!["first", "second", "second"]);
        assert_eq!(node.hook_count(), 1);
    }
}
