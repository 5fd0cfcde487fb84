use engine::{
    forward_from_yaw_pitch, rotate_about_y, EntityId, InputAction, InputSnapshot, ItemDefinition,
    PhysicsWorld, Vec2, Vec3,
};
use tracing::{debug, info};

use super::hud::InventoryDisplay;
use super::interaction::{InteractableSet, InteractionProbe};
use super::inventory::Inventory;
use super::selection::SelectionCycler;

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct PlayerTuning {
    pub(crate) speed: f32,
    pub(crate) look_sensitivity: f32,
    /// Pitch is clamped to +/- this many degrees.
    pub(crate) up_down_look_range: f32,
    pub(crate) grab_range: f32,
    pub(crate) eye_height: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            speed: 0.12,
            look_sensitivity: 1.0,
            up_down_look_range: 80.0,
            grab_range: 100.0,
            eye_height: 1.6,
        }
    }
}

/// A flip, not a counter: blocking twice unblocks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct BlockGate {
    blocked: bool,
}

impl BlockGate {
    pub(crate) fn toggle(&mut self) -> bool {
        self.blocked = !self.blocked;
        self.blocked
    }

    pub(crate) fn is_blocked(&self) -> bool {
        self.blocked
    }
}

#[derive(Debug, Clone)]
pub(crate) struct PlayerController {
    tuning: PlayerTuning,
    position: Vec3,
    yaw_degrees: f32,
    pitch_degrees: f32,
    move_sample: Vec2,
    is_moving: bool,
    gate: BlockGate,
    probe: InteractionProbe,
    selection: SelectionCycler,
    inventory: Inventory,
    display: InventoryDisplay,
}

impl PlayerController {
    pub(crate) fn new(tuning: PlayerTuning, spawn: Vec3) -> Self {
        Self {
            tuning,
            position: spawn,
            yaw_degrees: 0.0,
            pitch_degrees: 0.0,
            move_sample: Vec2::ZERO,
            is_moving: false,
            gate: BlockGate::default(),
            probe: InteractionProbe::new(tuning.grab_range),
            selection: SelectionCycler::new(),
            inventory: Inventory::new(),
            display: InventoryDisplay::default(),
        }
    }

    /// Frame step. Look, probe, move sampling and selection are skipped while
    /// blocked; the inventory display always refreshes.
    pub(crate) fn update(
        &mut self,
        input: &InputSnapshot,
        physics: &PhysicsWorld,
        objects: &mut InteractableSet,
    ) {
        if !self.gate.is_blocked() {
            self.apply_look(input.look_delta());
            self.probe
                .poll(physics, self.eye_position(), self.view_forward(), objects);
            self.move_sample = input.move_axis();
            self.selection
                .poll(input.scroll_delta(), self.inventory.number_of_items());
        }

        if input.pressed(InputAction::Use) {
            if !self.probe.is_targeting() {
                debug!("use_pressed_without_target");
            } else if !self.probe.fire_use(objects) {
                debug!("use_target_despawned");
            }
        }

        self.display.refresh(&self.inventory, &self.selection);
    }

    /// Physics step. Planar only; gravity is not integrated.
    pub(crate) fn fixed_update(&mut self, fixed_dt_seconds: f32) {
        if self.gate.is_blocked() {
            return;
        }
        let forward_speed = self.move_sample.y * self.tuning.speed;
        let strafe_speed = self.move_sample.x * self.tuning.speed;
        let local = Vec3::new(strafe_speed, 0.0, forward_speed);
        let velocity = rotate_about_y(local, self.yaw_degrees);

        self.position += Vec3::new(velocity.x, 0.0, velocity.z) * fixed_dt_seconds;
        self.is_moving = forward_speed != 0.0 || strafe_speed != 0.0;
    }

    fn apply_look(&mut self, look_delta: Vec2) {
        let sensitivity = self.tuning.look_sensitivity;
        self.yaw_degrees = (self.yaw_degrees + look_delta.x * sensitivity).rem_euclid(360.0);
        let range = self.tuning.up_down_look_range;
        self.pitch_degrees = (self.pitch_degrees - look_delta.y * sensitivity).clamp(-range, range);
    }

    pub(crate) fn toggle_block(&mut self) -> bool {
        let blocked = self.gate.toggle();
        if blocked {
            self.probe.clear();
        }
        info!(blocked, "player_block_toggled");
        blocked
    }

    pub(crate) fn is_blocked(&self) -> bool {
        self.gate.is_blocked()
    }

    pub(crate) fn add_item(&mut self, item: ItemDefinition) {
        let id = item.id;
        let name = item.name.clone();
        self.inventory.add_item_fast(item, 1);
        debug!(
            item = id.0,
            name = name.as_str(),
            count = self.inventory.count_of(id),
            "item_added"
        );
    }

    /// No-op when the item is not held.
    #[allow(dead_code)]
    pub(crate) fn remove_item(&mut self, item: &ItemDefinition) -> bool {
        match self.inventory.item_index(item.id) {
            Some(index) => self.inventory.remove_item(index, 1) > 0,
            None => false,
        }
    }

    pub(crate) fn selected_item(&self, offset: i64) -> Option<&ItemDefinition> {
        self.selection.neighbor(offset, &self.inventory)
    }

    pub(crate) fn eye_position(&self) -> Vec3 {
        self.position + Vec3::new(0.0, self.tuning.eye_height, 0.0)
    }

    pub(crate) fn view_forward(&self) -> Vec3 {
        forward_from_yaw_pitch(self.yaw_degrees, self.pitch_degrees)
    }

    pub(crate) fn position(&self) -> Vec3 {
        self.position
    }

    pub(crate) fn yaw_degrees(&self) -> f32 {
        self.yaw_degrees
    }

    pub(crate) fn pitch_degrees(&self) -> f32 {
        self.pitch_degrees
    }

    pub(crate) fn is_moving(&self) -> bool {
        self.is_moving
    }

    pub(crate) fn target(&self) -> Option<EntityId> {
        self.probe.target()
    }

    pub(crate) fn selection_index(&self) -> usize {
        self.selection.index()
    }

    pub(crate) fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub(crate) fn display(&self) -> &InventoryDisplay {
        &self.display
    }
}
