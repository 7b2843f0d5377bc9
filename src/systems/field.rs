//! Field registry operations.
//!
//! A spot belongs to at most one field and a field hosts at most one mover
//! (and a mover stands on at most one field). Registering the same pair twice
//! is a no-op; registering a conflicting pair fails and changes nothing.
//!
//! The batch toggles [`disable_spot_except`] and [`enable_spot_except`] lock
//! every other spot while a destination is targeted or broadcasting.

use bevy_ecs::prelude::*;
use log::debug;

use crate::components::field::Field;
use crate::components::spot::{Spot, SpotStatus};
use crate::error::{OnAirError, positive};
use crate::systems::lookup;
use crate::systems::mover::stand_on;
use crate::systems::spot::deploy_on;

/// Spawn an empty field of the given size.
pub fn spawn_field(world: &mut World, width: f32, height: f32) -> Result<Entity, OnAirError> {
    positive("field width", width as f64)?;
    positive("field height", height as f64)?;
    Ok(world.spawn(Field::new(width, height)).id())
}

/// Register `spot` on `field`. Same as deploying the spot on the field.
pub fn add_spot(world: &mut World, field: Entity, spot: Entity) -> Result<(), OnAirError> {
    lookup::field(world, field)?;
    deploy_on(world, spot, field)
}

/// Put `mover` on `field`. Same as the mover standing on the field.
pub fn add_mover(world: &mut World, field: Entity, mover: Entity) -> Result<(), OnAirError> {
    lookup::field(world, field)?;
    stand_on(world, mover, field)
}

/// Disable every enabled spot of `field` except `except`.
pub fn disable_spot_except(
    world: &mut World,
    field: Entity,
    except: Entity,
) -> Result<(), OnAirError> {
    toggle_siblings(world, field, except, SpotStatus::Enabled, SpotStatus::Disabled)
}

/// Re-enable every disabled spot of `field` except `except`.
pub fn enable_spot_except(
    world: &mut World,
    field: Entity,
    except: Entity,
) -> Result<(), OnAirError> {
    toggle_siblings(world, field, except, SpotStatus::Disabled, SpotStatus::Enabled)
}

fn toggle_siblings(
    world: &mut World,
    field: Entity,
    except: Entity,
    from: SpotStatus,
    to: SpotStatus,
) -> Result<(), OnAirError> {
    let spots = lookup::field(world, field)?.spots.clone();
    let mut changed = 0;
    for spot in spots.into_iter().filter(|s| *s != except) {
        if let Some(mut s) = world.get_mut::<Spot>(spot) {
            if s.status == from {
                s.status = to;
                changed += 1;
            }
        }
    }
    debug!(
        "Field {}: {} sibling spot(s) of {} {:?} -> {:?}",
        field, changed, except, from, to
    );
    Ok(())
}
