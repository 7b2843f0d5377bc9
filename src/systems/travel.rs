//! Travel system.
//!
//! Advances every in-flight [`Travel`] by the scaled frame delta from
//! [`WorldTime`] and writes the eased position into [`MapPosition`].
//! Travels that reach their end are removed and the mover's arrival is
//! completed in the same tick. Travel inserted during a tick is first
//! advanced on the next one, which is what makes a zero-distance departure
//! land after exactly one tick.

use bevy_ecs::prelude::*;
use log::error;

use crate::components::mapposition::MapPosition;
use crate::components::travel::Travel;
use crate::resources::worldtime::WorldTime;
use crate::systems::mover::complete_arrival;

pub fn travel_system(world: &mut World) {
    let dt = world
        .get_resource::<WorldTime>()
        .map(|t| t.delta)
        .unwrap_or(0.0);

    let mut arrived: Vec<(Entity, Entity)> = Vec::new();
    let mut query = world.query::<(Entity, &mut Travel, &mut MapPosition)>();
    for (entity, mut travel, mut position) in query.iter_mut(world) {
        position.pos = travel.advance(dt);
        if travel.is_finished() {
            arrived.push((entity, travel.destination));
        }
    }

    for (mover, spot) in arrived {
        world.entity_mut(mover).remove::<Travel>();
        if let Err(err) = complete_arrival(world, mover, spot) {
            error!("Mover {} could not arrive at spot {}: {}", mover, spot, err);
        }
    }
}
