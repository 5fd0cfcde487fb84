use crate::app::EntityId;
use crate::math::Vec3;

pub const MAX_LAYERS: u8 = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Layer(u8);

impl Layer {
    pub const DEFAULT: Layer = Layer(0);

    /// Returns `None` when `index` does not fit in a 32-bit mask.
    pub const fn new(index: u8) -> Option<Self> {
        if index < MAX_LAYERS {
            Some(Self(index))
        } else {
            None
        }
    }

    pub const fn index(self) -> u8 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LayerMask(pub u32);

impl LayerMask {
    pub const NONE: LayerMask = LayerMask(0);
    pub const ALL: LayerMask = LayerMask(u32::MAX);

    pub const fn only(layer: Layer) -> Self {
        Self(1 << layer.0)
    }

    pub const fn contains(self, layer: Layer) -> bool {
        self.0 & (1 << layer.0) != 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Sphere { center: Vec3, radius: f32 },
    Aabb { min: Vec3, max: Vec3 },
}

impl Shape {
    pub fn translated(self, delta: Vec3) -> Self {
        match self {
            Shape::Sphere { center, radius } => Shape::Sphere {
                center: center + delta,
                radius,
            },
            Shape::Aabb { min, max } => Shape::Aabb {
                min: min + delta,
                max: max + delta,
            },
        }
    }

    /// Entry distance along a unit-length `direction`, 0 when `origin` is inside.
    fn ray_entry(&self, origin: Vec3, direction: Vec3) -> Option<f32> {
        match *self {
            Shape::Sphere { center, radius } => ray_sphere(origin, direction, center, radius),
            Shape::Aabb { min, max } => ray_aabb(origin, direction, min, max),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collider {
    pub owner: EntityId,
    pub layer: Layer,
    pub shape: Shape,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RaycastHit {
    pub owner: EntityId,
    pub distance: f32,
    pub point: Vec3,
}

/// One collider per owner. Insertion order breaks distance ties.
#[derive(Debug, Default, Clone)]
pub struct PhysicsWorld {
    colliders: Vec<Collider>,
}

impl PhysicsWorld {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, collider: Collider) {
        match self
            .colliders
            .iter_mut()
            .find(|existing| existing.owner == collider.owner)
        {
            Some(existing) => *existing = collider,
            None => self.colliders.push(collider),
        }
    }

    pub fn remove(&mut self, owner: EntityId) -> Option<Collider> {
        let index = self
            .colliders
            .iter()
            .position(|collider| collider.owner == owner)?;
        Some(self.colliders.remove(index))
    }

    pub fn translate(&mut self, owner: EntityId, delta: Vec3) -> bool {
        match self.collider_mut(owner) {
            Some(collider) => {
                collider.shape = collider.shape.translated(delta);
                true
            }
            None => false,
        }
    }

    pub fn collider(&self, owner: EntityId) -> Option<&Collider> {
        self.colliders.iter().find(|collider| collider.owner == owner)
    }

    fn collider_mut(&mut self, owner: EntityId) -> Option<&mut Collider> {
        self.colliders
            .iter_mut()
            .find(|collider| collider.owner == owner)
    }

    pub fn len(&self) -> usize {
        self.colliders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colliders.is_empty()
    }

    pub fn raycast(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        mask: LayerMask,
    ) -> Option<RaycastHit> {
        let direction = direction.normalized();
        if direction == Vec3::ZERO || max_distance.is_nan() || max_distance < 0.0 {
            return None;
        }

        let mut best: Option<RaycastHit> = None;
        for collider in &self.colliders {
            if !mask.contains(collider.layer) {
                continue;
            }
            let Some(distance) = collider.shape.ray_entry(origin, direction) else {
                continue;
            };
            if distance > max_distance {
                continue;
            }
            if best.map_or(true, |hit| distance < hit.distance) {
                best = Some(RaycastHit {
                    owner: collider.owner,
                    distance,
                    point: origin + direction * distance,
                });
            }
        }
        best
    }
}

fn ray_sphere(origin: Vec3, direction: Vec3, center: Vec3, radius: f32) -> Option<f32> {
    let offset = origin - center;
    let c = offset.dot(offset) - radius * radius;
    if c <= 0.0 {
        return Some(0.0);
    }
    let b = offset.dot(direction);
    if b > 0.0 {
        return None;
    }
    let discriminant = b * b - c;
    if discriminant < 0.0 {
        return None;
    }
    Some(-b - discriminant.sqrt())
}

fn ray_aabb(origin: Vec3, direction: Vec3, min: Vec3, max: Vec3) -> Option<f32> {
    let mut t_min = 0.0f32;
    let mut t_max = f32::INFINITY;
    let axes = [
        (origin.x, direction.x, min.x, max.x),
        (origin.y, direction.y, min.y, max.y),
        (origin.z, direction.z, min.z, max.z),
    ];

    for (o, d, lo, hi) in axes {
        if d.abs() <= f32::EPSILON {
            if o < lo || o > hi {
                return None;
            }
            continue;
        }
        let inv = 1.0 / d;
        let mut t1 = (lo - o) * inv;
        let mut t2 = (hi - o) * inv;
        if t1 > t2 {
            std::mem::swap(&mut t1, &mut t2);
        }
        t_min = t_min.max(t1);
        t_max = t_max.min(t2);
        if t_min > t_max {
            return None;
        }
    }
    Some(t_min)
}
