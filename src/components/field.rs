//! Bounded map hosting one mover and a set of spots.
//!
//! The [`Field`] only stores handles. Ownership rules (one field per spot,
//! one mover per field and vice versa) are enforced by the operations in
//! [`crate::systems::field`].

use bevy_ecs::prelude::{Component, Entity};
use smallvec::SmallVec;

use crate::components::mapposition::Vector2;

#[derive(Component, Clone, Debug)]
pub struct Field {
    pub width: f32,
    pub height: f32,
    pub(crate) spots: SmallVec<[Entity; 8]>,
    pub(crate) mover: Option<Entity>,
}

impl Field {
    pub fn new(width: f32, height: f32) -> Self {
        Field {
            width,
            height,
            spots: SmallVec::new(),
            mover: None,
        }
    }

    /// Spots in registration order.
    pub fn spots(&self) -> &[Entity] {
        &self.spots
    }

    pub fn mover(&self) -> Option<Entity> {
        self.mover
    }

    pub fn contains(&self, pos: Vector2) -> bool {
        (0.0..=self.width).contains(&pos.x) && (0.0..=self.height).contains(&pos.y)
    }

    pub fn has_spot(&self, spot: Entity) -> bool {
        self.spots.contains(&spot)
    }
}
