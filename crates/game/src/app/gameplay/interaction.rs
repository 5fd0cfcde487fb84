use std::collections::BTreeMap;

use engine::{EntityId, Layer, LayerMask, PhysicsWorld, Vec3};
use tracing::{debug, info};

use super::INTERACTABLE_LAYER_INDEX;

pub(crate) const INTERACTABLE_LAYER: Layer = match Layer::new(INTERACTABLE_LAYER_INDEX) {
    Some(layer) => layer,
    None => Layer::DEFAULT,
};

/// What the probe needs from an object it can target.
pub(crate) trait Interactable {
    fn label(&self) -> &str;
    /// Called on every frame the object is targeted.
    fn highlight(&mut self);
    fn interact(&mut self);
    /// Advances the object's own animation; returns how far it moved.
    fn tick(&mut self, _dt_seconds: f32) -> Vec3 {
        Vec3::ZERO
    }
    fn is_highlighted(&self) -> bool {
        false
    }
    fn status(&self) -> &'static str {
        "idle"
    }
    /// A note revealed by the last interaction, handed out once.
    fn take_note(&mut self) -> Option<String> {
        None
    }
}

/// Highlight state an object owns; the probe only ever sets it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Outline {
    requested: bool,
    visible: bool,
}

impl Outline {
    pub(crate) fn request(&mut self) {
        self.requested = true;
    }

    /// Shows the outline iff it was requested since the last refresh.
    pub(crate) fn refresh(&mut self) {
        self.visible = self.requested;
        self.requested = false;
    }

    pub(crate) fn is_visible(&self) -> bool {
        self.visible
    }
}

#[derive(Default)]
pub(crate) struct InteractableSet {
    objects: BTreeMap<EntityId, Box<dyn Interactable>>,
}

impl InteractableSet {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, id: EntityId, object: Box<dyn Interactable>) {
        self.objects.insert(id, object);
    }

    pub(crate) fn get(&self, id: EntityId) -> Option<&dyn Interactable> {
        self.objects.get(&id).map(|object| object.as_ref())
    }

    pub(crate) fn get_mut(&mut self, id: EntityId) -> Option<&mut (dyn Interactable + 'static)> {
        self.objects.get_mut(&id).map(|object| object.as_mut())
    }

    pub(crate) fn iter_mut(
        &mut self,
    ) -> impl Iterator<Item = (EntityId, &mut (dyn Interactable + 'static))> {
        self.objects
            .iter_mut()
            .map(|(id, object)| (*id, object.as_mut()))
    }

    pub(crate) fn len(&self) -> usize {
        self.objects.len()
    }
}

/// Forward raycast against the interactable layer; holds at most one target,
/// valid until the next poll.
#[derive(Debug, Clone, Copy)]
pub(crate) struct InteractionProbe {
    mask: LayerMask,
    range: f32,
    target: Option<EntityId>,
}

impl InteractionProbe {
    pub(crate) fn new(range: f32) -> Self {
        Self {
            mask: LayerMask::only(INTERACTABLE_LAYER),
            range,
            target: None,
        }
    }

    pub(crate) fn target(&self) -> Option<EntityId> {
        self.target
    }

    pub(crate) fn is_targeting(&self) -> bool {
        self.target.is_some()
    }

    pub(crate) fn poll(
        &mut self,
        physics: &PhysicsWorld,
        origin: Vec3,
        forward: Vec3,
        objects: &mut InteractableSet,
    ) -> Option<EntityId> {
        self.target = physics
            .raycast(origin, forward, self.range, self.mask)
            .map(|hit| hit.owner);

        if let Some(id) = self.target {
            match objects.get_mut(id) {
                Some(object) => object.highlight(),
                None => debug!(entity = id.0, "probe_hit_without_interactable"),
            }
        }
        self.target
    }

    /// Sends one `interact` to the current target, if any.
    pub(crate) fn fire_use(&self, objects: &mut InteractableSet) -> bool {
        let Some(id) = self.target else {
            return false;
        };
        let Some(object) = objects.get_mut(id) else {
            return false;
        };
        object.interact();
        info!(entity = id.0, label = object.label(), "interact_dispatched");
        true
    }

    /// Forgets the target without raycasting.
    pub(crate) fn clear(&mut self) {
        self.target = None;
    }
}
