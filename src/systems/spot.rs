//! Spot lifecycle operations.
//!
//! - [`deploy_on`] – one-time registration on a field (`NonDeployed -> Enabled`)
//! - [`attach_screen`] – one-time binding to the screen that runs its live
//! - [`set_as_destination`] / [`unset_as_destination`] – `Enabled <-> Target`,
//!   driving the field's mover as a side effect
//! - [`enable`] / [`disable`] – toggle selectability
//! - [`mark_as_visited`] – set once the mover has physically arrived
//!
//! Destination changes can be triggered from either side (the spot or the
//! mover). Each side checks whether the other already ran, so one request
//! never starts two movements.

use bevy_ecs::prelude::*;
use log::debug;

use crate::components::live::LiveFactory;
use crate::components::mapposition::{MapPosition, Vector2};
use crate::components::spot::{Spot, SpotAssets, SpotStatus};
use crate::error::OnAirError;
use crate::systems::lookup;
use crate::systems::mover::{depart_to, stop};

/// Distance under which a mover counts as standing on a spot.
const ARRIVAL_EPSILON: f32 = 1e-3;

/// Spawn a non-deployed spot at its fixed location.
pub fn spawn_spot(world: &mut World, pos: Vector2, live: LiveFactory, assets: SpotAssets) -> Entity {
    world
        .spawn((Spot::new(live, assets), MapPosition { pos }))
        .id()
}

/// Deploy `spot` on `field`. Repeating with the same field is a no-op.
pub fn deploy_on(world: &mut World, spot: Entity, field: Entity) -> Result<(), OnAirError> {
    match lookup::spot(world, spot)?.field {
        Some(f) if f == field => return Ok(()),
        Some(f) => return Err(OnAirError::SpotOnOtherField { spot, field: f }),
        None => {}
    }
    let pos = lookup::spot_position(world, spot)?;
    if !lookup::field(world, field)?.contains(pos) {
        return Err(OnAirError::SpotOutOfBounds { spot, field });
    }

    {
        let mut f = lookup::field_mut(world, field)?;
        if !f.has_spot(spot) {
            f.spots.push(spot);
        }
    }
    let mut s = lookup::spot_mut(world, spot)?;
    s.field = Some(field);
    s.status = SpotStatus::Enabled;
    debug!("Spot {} deployed on field {}", spot, field);
    Ok(())
}

/// Bind `spot` to `screen`. Repeating with the same screen is a no-op.
pub fn attach_screen(world: &mut World, spot: Entity, screen: Entity) -> Result<(), OnAirError> {
    lookup::screen(world, screen)?;
    let mut s = lookup::spot_mut(world, spot)?;
    match s.screen {
        Some(current) if current == screen => Ok(()),
        Some(current) => Err(OnAirError::ScreenAlreadyAttached {
            spot,
            screen: current,
        }),
        None => {
            s.screen = Some(screen);
            Ok(())
        }
    }
}

/// Make `spot` the destination of its field's mover and send the mover there.
pub fn set_as_destination(world: &mut World, spot: Entity) -> Result<(), OnAirError> {
    let s = lookup::spot(world, spot)?;
    let field = s.field.ok_or(OnAirError::SpotNotDeployed(spot))?;
    let mover = lookup::field(world, field)?
        .mover
        .ok_or(OnAirError::NoMoverOnField(field))?;
    match s.status {
        SpotStatus::Target => return Ok(()),
        SpotStatus::Disabled => return Err(OnAirError::SpotDisabled(spot)),
        SpotStatus::Enabled | SpotStatus::NonDeployed => {}
    }

    if lookup::mover(world, mover)?.destination == Some(spot) {
        lookup::spot_mut(world, spot)?.status = SpotStatus::Target;
        return Ok(());
    }
    // depart_to marks the spot as target itself
    depart_to(world, mover, spot)
}

/// Withdraw `spot` as destination, stopping the mover if it is on its way.
/// No-op when the spot is not the current target.
pub fn unset_as_destination(world: &mut World, spot: Entity) -> Result<(), OnAirError> {
    let s = lookup::spot(world, spot)?;
    let field = s.field.ok_or(OnAirError::SpotNotDeployed(spot))?;
    let mover = lookup::field(world, field)?
        .mover
        .ok_or(OnAirError::NoMoverOnField(field))?;
    if s.status != SpotStatus::Target {
        return Ok(());
    }

    let m = lookup::mover(world, mover)?;
    if m.destination == Some(spot) && m.is_moving() {
        // stop resets the target marker
        stop(world, mover)
    } else {
        lookup::spot_mut(world, spot)?.status = SpotStatus::Enabled;
        Ok(())
    }
}

pub fn enable(world: &mut World, spot: Entity) -> Result<(), OnAirError> {
    let mut s = lookup::spot_mut(world, spot)?;
    match s.status {
        SpotStatus::NonDeployed => Err(OnAirError::SpotNotDeployed(spot)),
        SpotStatus::Disabled => {
            s.status = SpotStatus::Enabled;
            Ok(())
        }
        SpotStatus::Enabled | SpotStatus::Target => Ok(()),
    }
}

pub fn disable(world: &mut World, spot: Entity) -> Result<(), OnAirError> {
    let mut s = lookup::spot_mut(world, spot)?;
    match s.status {
        SpotStatus::NonDeployed => Err(OnAirError::SpotNotDeployed(spot)),
        SpotStatus::Target => Err(OnAirError::IsDestination(spot)),
        SpotStatus::Enabled => {
            s.status = SpotStatus::Disabled;
            Ok(())
        }
        SpotStatus::Disabled => Ok(()),
    }
}

/// Mark `spot` visited. Only valid while it is the mover's destination and
/// the mover stands on it.
pub fn mark_as_visited(world: &mut World, spot: Entity) -> Result<bool, OnAirError> {
    let s = lookup::spot(world, spot)?;
    let field = s.field.ok_or(OnAirError::SpotNotDeployed(spot))?;
    let mover = lookup::field(world, field)?
        .mover
        .ok_or(OnAirError::NoMoverOnField(field))?;
    if lookup::mover(world, mover)?.destination != Some(spot) {
        return Err(OnAirError::NotArrived(spot));
    }
    let target = lookup::spot_position(world, spot)?;
    let here = lookup::position(world, mover).ok_or(OnAirError::NotArrived(spot))?;
    if here.distance(target) > ARRIVAL_EPSILON {
        return Err(OnAirError::NotArrived(spot));
    }

    let mut s = lookup::spot_mut(world, spot)?;
    if s.visited {
        return Ok(false);
    }
    s.visited = true;
    debug!("Spot {} visited for the first time", spot);
    Ok(true)
}
