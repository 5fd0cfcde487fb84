use super::input::{ActionStates, InputAction};
use crate::math::Vec2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneCommand {
    None,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u64);

/// Input sampled once per frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputSnapshot {
    held: ActionStates,
    pressed: ActionStates,
    look_delta: Vec2,
    scroll_delta: Vec2,
    move_axis: Option<Vec2>,
}

impl InputSnapshot {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn new(held: ActionStates, pressed: ActionStates) -> Self {
        Self {
            held,
            pressed,
            ..Self::default()
        }
    }

    pub fn is_down(&self, action: InputAction) -> bool {
        self.held.is_down(action)
    }

    /// True only on the frame the button went down.
    pub fn pressed(&self, action: InputAction) -> bool {
        self.pressed.is_down(action)
    }

    pub fn look_delta(&self) -> Vec2 {
        self.look_delta
    }

    pub fn scroll_delta(&self) -> Vec2 {
        self.scroll_delta
    }

    /// x = right - left, y = forward - back, unless an analog axis was given.
    pub fn move_axis(&self) -> Vec2 {
        if let Some(axis) = self.move_axis {
            return axis;
        }
        let axis_value = |positive: InputAction, negative: InputAction| {
            let mut value = 0.0;
            if self.is_down(positive) {
                value += 1.0;
            }
            if self.is_down(negative) {
                value -= 1.0;
            }
            value
        };
        Vec2 {
            x: axis_value(InputAction::MoveRight, InputAction::MoveLeft),
            y: axis_value(InputAction::MoveForward, InputAction::MoveBack),
        }
    }

    pub fn with_action_down(mut self, action: InputAction, is_down: bool) -> Self {
        self.held.set(action, is_down);
        self
    }

    pub fn with_action_pressed(mut self, action: InputAction, pressed: bool) -> Self {
        self.pressed.set(action, pressed);
        self
    }

    pub fn with_look_delta(mut self, look_delta: Vec2) -> Self {
        self.look_delta = look_delta;
        self
    }

    pub fn with_scroll_delta(mut self, scroll_delta: Vec2) -> Self {
        self.scroll_delta = scroll_delta;
        self
    }

    pub fn with_move_axis(mut self, move_axis: Option<Vec2>) -> Self {
        self.move_axis = move_axis;
        self
    }
}

/// Driven by the loop runner: `update` once per frame, then `fixed_update`
/// zero or more times for the physics step.
pub trait Scene {
    fn update(&mut self, frame_dt_seconds: f32, input: &InputSnapshot) -> SceneCommand;
    fn fixed_update(&mut self, fixed_dt_seconds: f32);
    fn debug_title(&self) -> Option<String> {
        None
    }
}
