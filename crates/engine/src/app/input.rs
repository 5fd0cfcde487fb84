use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputAction {
    MoveForward,
    MoveBack,
    MoveLeft,
    MoveRight,
    Use,
    NotePad,
    Quit,
}

const ACTION_COUNT: usize = 7;

impl InputAction {
    pub const ALL: [InputAction; ACTION_COUNT] = [
        InputAction::MoveForward,
        InputAction::MoveBack,
        InputAction::MoveLeft,
        InputAction::MoveRight,
        InputAction::Use,
        InputAction::NotePad,
        InputAction::Quit,
    ];

    const fn index(self) -> usize {
        match self {
            InputAction::MoveForward => 0,
            InputAction::MoveBack => 1,
            InputAction::MoveLeft => 2,
            InputAction::MoveRight => 3,
            InputAction::Use => 4,
            InputAction::NotePad => 5,
            InputAction::Quit => 6,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActionStates {
    down: [bool; ACTION_COUNT],
}

impl ActionStates {
    pub fn set(&mut self, action: InputAction, is_down: bool) {
        self.down[action.index()] = is_down;
    }

    pub fn is_down(&self, action: InputAction) -> bool {
        self.down[action.index()]
    }

    pub fn from_held(held: &[InputAction]) -> Self {
        let mut states = Self::default();
        for action in held {
            states.set(*action, true);
        }
        states
    }
}

/// Turns successive held-button states into press edges.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputEdgeTracker {
    previous: ActionStates,
}

impl InputEdgeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the buttons that went from up to down since the last call.
    pub fn advance(&mut self, current: ActionStates) -> ActionStates {
        let mut pressed = ActionStates::default();
        for action in InputAction::ALL {
            if current.is_down(action) && !self.previous.is_down(action) {
                pressed.set(action, true);
            }
        }
        self.previous = current;
        pressed
    }
}
