use eframe::egui::{InputState, PointerButton, Pos2, Vec2};

/// Pointer snapshot for one frame, in canvas-local coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerFrame {
    pub position: Option<Pos2>,
    pub delta: Vec2,
    pub pressed: Option<PointerButton>,
    pub released: Option<PointerButton>,
    pub primary_down: bool,
}

const TRACKED_BUTTONS: [PointerButton; 2] = [PointerButton::Primary, PointerButton::Secondary];

impl PointerFrame {
    pub fn from_input(input: &InputState, origin: Pos2) -> Self {
        let pointer = &input.pointer;
        let position = pointer
            .latest_pos()
            .map(|position| Pos2::ZERO + (position - origin));

        Self {
            position,
            delta: pointer.delta(),
            pressed: TRACKED_BUTTONS
                .into_iter()
                .find(|&button| pointer.button_pressed(button)),
            released: TRACKED_BUTTONS
                .into_iter()
                .find(|&button| pointer.button_released(button)),
            primary_down: pointer.primary_down(),
        }
    }

    pub fn idle() -> Self {
        Self::default()
    }

    pub fn at(position: Pos2) -> Self {
        Self {
            position: Some(position),
            ..Self::default()
        }
    }

    pub fn press(mut self, button: PointerButton) -> Self {
        self.pressed = Some(button);
        self.primary_down |= button == PointerButton::Primary;
        self
    }

    pub fn drag_by(mut self, delta: Vec2) -> Self {
        self.delta = delta;
        self.primary_down = true;
        self
    }

    pub fn release(mut self, button: PointerButton) -> Self {
        self.released = Some(button);
        if button == PointerButton::Primary {
            self.primary_down = false;
        }
        self
    }
}
