//! Typed component access for the world-level operations.
//!
//! Each helper turns a missing component into the matching `OnAirError`
//! instead of panicking on a stale or foreign handle.

use bevy_ecs::prelude::*;

use crate::components::field::Field;
use crate::components::mapposition::{MapPosition, Vector2};
use crate::components::mover::Mover;
use crate::components::screen::Screen;
use crate::components::spot::Spot;
use crate::error::OnAirError;

pub(crate) fn mover(world: &World, e: Entity) -> Result<&Mover, OnAirError> {
    world.get::<Mover>(e).ok_or(OnAirError::NotAMover(e))
}

pub(crate) fn mover_mut(world: &mut World, e: Entity) -> Result<Mut<'_, Mover>, OnAirError> {
    world.get_mut::<Mover>(e).ok_or(OnAirError::NotAMover(e))
}

pub(crate) fn spot(world: &World, e: Entity) -> Result<&Spot, OnAirError> {
    world.get::<Spot>(e).ok_or(OnAirError::NotASpot(e))
}

pub(crate) fn spot_mut(world: &mut World, e: Entity) -> Result<Mut<'_, Spot>, OnAirError> {
    world.get_mut::<Spot>(e).ok_or(OnAirError::NotASpot(e))
}

pub(crate) fn field(world: &World, e: Entity) -> Result<&Field, OnAirError> {
    world.get::<Field>(e).ok_or(OnAirError::NotAField(e))
}

pub(crate) fn field_mut(world: &mut World, e: Entity) -> Result<Mut<'_, Field>, OnAirError> {
    world.get_mut::<Field>(e).ok_or(OnAirError::NotAField(e))
}

pub(crate) fn screen(world: &World, e: Entity) -> Result<&Screen, OnAirError> {
    world.get::<Screen>(e).ok_or(OnAirError::NotAScreen(e))
}

pub(crate) fn screen_mut(world: &mut World, e: Entity) -> Result<Mut<'_, Screen>, OnAirError> {
    world.get_mut::<Screen>(e).ok_or(OnAirError::NotAScreen(e))
}

/// Location of a spot. Spots are always spawned with one.
pub(crate) fn spot_position(world: &World, spot: Entity) -> Result<Vector2, OnAirError> {
    world
        .get::<MapPosition>(spot)
        .map(|p| p.pos)
        .ok_or(OnAirError::NotASpot(spot))
}

pub(crate) fn position(world: &World, e: Entity) -> Option<Vector2> {
    world.get::<MapPosition>(e).map(|p| p.pos)
}
