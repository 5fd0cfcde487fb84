use engine::{
    Collider, EntityId, InputAction, InputSnapshot, ItemCatalog, ItemId, PhysicsWorld, Scene,
    SceneCommand, Shape, Vec3,
};
use tracing::{info, warn};

use super::drawer::Drawer;
use super::interaction::{InteractableSet, INTERACTABLE_LAYER};
use super::notepad::NotePad;
use super::player::{PlayerController, PlayerTuning};
use super::STARTING_ITEM_IDS;

const PLAYER_SPAWN: Vec3 = Vec3::new(0.0, 0.0, 0.0);
const DESK_DRAWER_CENTER: Vec3 = Vec3::new(0.0, 1.6, 2.0);
const DESK_DRAWER_HALF_EXTENTS: Vec3 = Vec3::new(0.4, 0.15, 0.25);
const DESK_DRAWER_OPEN_OFFSET: Vec3 = Vec3::new(0.0, 0.0, 0.4);
const DESK_DRAWER_SLIDE_SECONDS: f32 = 0.75;
pub(crate) const DESK_DRAWER_NOTE: &str = "Desk drawer: the key fits the wardrobe.";

/// The playable room: one player, interactable props, and their colliders.
pub(crate) struct RoomScene {
    player: PlayerController,
    physics: PhysicsWorld,
    objects: InteractableSet,
    note_pad: NotePad,
    next_entity_id: u64,
    frames: u64,
}

impl RoomScene {
    pub(crate) fn new(tuning: PlayerTuning, catalog: &ItemCatalog) -> Self {
        let mut player = PlayerController::new(tuning, PLAYER_SPAWN);
        for id in STARTING_ITEM_IDS {
            match catalog.item(ItemId(id)) {
                Some(item) => player.add_item(item.clone()),
                None => warn!(item = id, "starting_item_missing_from_catalog"),
            }
        }

        let mut room = Self {
            player,
            physics: PhysicsWorld::new(),
            objects: InteractableSet::new(),
            note_pad: NotePad::default(),
            next_entity_id: 1,
            frames: 0,
        };
        room.spawn_drawer(
            Drawer::new("desk_drawer", DESK_DRAWER_CENTER, DESK_DRAWER_OPEN_OFFSET)
                .with_duration(DESK_DRAWER_SLIDE_SECONDS)
                .with_note(DESK_DRAWER_NOTE),
            DESK_DRAWER_HALF_EXTENTS,
        );
        info!(
            inventory_items = room.player().inventory().number_of_items(),
            interactables = room.objects().len(),
            colliders = room.physics().len(),
            "room_loaded"
        );
        room
    }

    /// Restores note pad pages carried by the save record.
    pub(crate) fn with_notes(mut self, pages: &[String]) -> Self {
        self.note_pad = NotePad::from_pages(pages);
        self
    }

    pub(crate) fn spawn_drawer(&mut self, drawer: Drawer, half_extents: Vec3) -> EntityId {
        let id = EntityId(self.next_entity_id);
        self.next_entity_id += 1;
        let center = drawer.position();
        self.physics.insert(Collider {
            owner: id,
            layer: INTERACTABLE_LAYER,
            shape: Shape::Aabb {
                min: center - half_extents,
                max: center + half_extents,
            },
        });
        self.objects.insert(id, Box::new(drawer));
        id
    }

    pub(crate) fn player(&self) -> &PlayerController {
        &self.player
    }

    pub(crate) fn physics(&self) -> &PhysicsWorld {
        &self.physics
    }

    pub(crate) fn objects(&self) -> &InteractableSet {
        &self.objects
    }

    pub(crate) fn note_pad(&self) -> &NotePad {
        &self.note_pad
    }

    fn tick_objects(&mut self, dt_seconds: f32) {
        for (id, object) in self.objects.iter_mut() {
            let moved = object.tick(dt_seconds);
            if moved != Vec3::ZERO {
                self.physics.translate(id, moved);
            }
            if let Some(note) = object.take_note() {
                if self.note_pad.mentions(&note) {
                    continue;
                }
                let page = self.note_pad.jot(&note);
                info!(entity = id.0, page, "note_jotted");
            }
        }
    }
}

impl Scene for RoomScene {
    fn update(&mut self, frame_dt_seconds: f32, input: &InputSnapshot) -> SceneCommand {
        if input.pressed(InputAction::Quit) {
            return SceneCommand::Quit;
        }
        self.frames += 1;
        if input.pressed(InputAction::NotePad) {
            self.player.toggle_block();
        }
        self.player.update(input, &self.physics, &mut self.objects);
        self.tick_objects(frame_dt_seconds);
        SceneCommand::None
    }

    fn fixed_update(&mut self, fixed_dt_seconds: f32) {
        self.player.fixed_update(fixed_dt_seconds);
    }

    fn debug_title(&self) -> Option<String> {
        let position = self.player.position();
        let target = self.player.target().and_then(|id| self.objects.get(id));
        let (label, status, outlined) = target.map_or(("none", "-", false), |object| {
            (object.label(), object.status(), object.is_highlighted())
        });
        let selected = self
            .player
            .selected_item(0)
            .map_or("none", |item| item.name.as_str());
        Some(format!(
            "frame={} pos=({:.2}, {:.2}, {:.2}) yaw={:.1} pitch={:.1} moving={} blocked={} \
target={} state={} outlined={} selected={} slot={} hud={} notes={}",
            self.frames,
            position.x,
            position.y,
            position.z,
            self.player.yaw_degrees(),
            self.player.pitch_degrees(),
            self.player.is_moving(),
            self.player.is_blocked(),
            label,
            status,
            outlined,
            selected,
            self.player.selection_index(),
            self.player.display().visible_count(),
            self.note_pad.filled_pages()
        ))
    }
}
