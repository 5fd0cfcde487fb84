use engine::Vec3;
use tracing::debug;

use super::interaction::{Interactable, Outline};

pub(crate) const DEFAULT_DRAWER_DURATION_SECONDS: f32 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SlideDirection {
    Opening,
    Closing,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum DrawerMotion {
    Idle,
    Animating {
        direction: SlideDirection,
        elapsed: f32,
    },
}

/// A drawer that slides between its closed position and
/// `closed - open_offset` when interacted with.
#[derive(Debug, Clone)]
pub(crate) struct Drawer {
    label: String,
    closed_position: Vec3,
    open_position: Vec3,
    position: Vec3,
    duration: f32,
    is_open: bool,
    motion: DrawerMotion,
    outline: Outline,
    hidden_note: Option<String>,
    revealed_note: Option<String>,
}

impl Drawer {
    pub(crate) fn new(label: impl Into<String>, closed_position: Vec3, open_offset: Vec3) -> Self {
        Self {
            label: label.into(),
            closed_position,
            open_position: closed_position - open_offset,
            position: closed_position,
            duration: DEFAULT_DRAWER_DURATION_SECONDS,
            is_open: false,
            motion: DrawerMotion::Idle,
            outline: Outline::default(),
            hidden_note: None,
            revealed_note: None,
        }
    }

    pub(crate) fn with_duration(mut self, duration: f32) -> Self {
        self.duration = duration.max(0.0);
        self
    }

    pub(crate) fn position(&self) -> Vec3 {
        self.position
    }

    pub(crate) fn is_open(&self) -> bool {
        self.is_open
    }

    pub(crate) fn motion(&self) -> DrawerMotion {
        self.motion
    }

    /// The note is revealed the first time the drawer opens.
    pub(crate) fn with_note(mut self, note: impl Into<String>) -> Self {
        self.hidden_note = Some(note.into());
        self
    }

    fn endpoints(&self, direction: SlideDirection) -> (Vec3, Vec3) {
        match direction {
            SlideDirection::Opening => (self.closed_position, self.open_position),
            SlideDirection::Closing => (self.open_position, self.closed_position),
        }
    }
}

impl Interactable for Drawer {
    fn label(&self) -> &str {
        &self.label
    }

    fn highlight(&mut self) {
        self.outline.request();
    }

    /// Replaces any slide in progress; the new slide starts from its own
    /// endpoint rather than from where the old one stopped.
    fn interact(&mut self) {
        let direction = if self.is_open {
            SlideDirection::Closing
        } else {
            SlideDirection::Opening
        };
        self.motion = DrawerMotion::Animating {
            direction,
            elapsed: 0.0,
        };
        self.is_open = !self.is_open;
        if direction == SlideDirection::Opening {
            if let Some(note) = self.hidden_note.take() {
                self.revealed_note = Some(note);
            }
        }
        debug!(drawer = self.label.as_str(), ?direction, "drawer_slide_started");
    }

    fn is_highlighted(&self) -> bool {
        self.outline.is_visible()
    }

    fn status(&self) -> &'static str {
        match (self.motion(), self.is_open()) {
            (DrawerMotion::Animating { .. }, true) => "opening",
            (DrawerMotion::Animating { .. }, false) => "closing",
            (DrawerMotion::Idle, true) => "open",
            (DrawerMotion::Idle, false) => "closed",
        }
    }

    fn take_note(&mut self) -> Option<String> {
        self.revealed_note.take()
    }

    fn tick(&mut self, dt_seconds: f32) -> Vec3 {
        self.outline.refresh();
        let before = self.position;

        if let DrawerMotion::Animating { direction, elapsed } = self.motion {
            let (from, to) = self.endpoints(direction);
            if elapsed < self.duration {
                self.position = from.lerp(to, elapsed / self.duration);
                self.motion = DrawerMotion::Animating {
                    direction,
                    elapsed: elapsed + dt_seconds.max(0.0),
                };
            } else {
                self.position = to;
                self.motion = DrawerMotion::Idle;
                debug!(
                    drawer = self.label.as_str(),
                    open = self.is_open,
                    "drawer_slide_finished"
                );
            }
        }

        self.position - before
    }
}
