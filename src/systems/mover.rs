//! Mover transitions.
//!
//! Every function validates its preconditions first and returns an
//! [`OnAirError`] without touching the world when one does not hold. Nothing
//! is retried: callers inspect [`Mover::status`] or react to events before
//! issuing the next command.
//!
//! # Departure and arrival
//!
//! [`depart_to`] never completes within the call. It inserts a [`Travel`]
//! that [`crate::systems::travel::travel_system`] advances once per tick;
//! a zero-distance travel completes on the next tick. [`jump_to`] skips the
//! travel and completes the arrival synchronously. Arrival then:
//!
//! 1. marks the spot visited
//! 2. clears the destination and re-enables the sibling spots
//! 3. fires [`MoverArrivedEvent`] and clears the spot's target marker
//! 4. asks the spot's screen to start the broadcast
//!
//! # Broadcast
//!
//! A player goes on air as part of step 4. A broadcaster rests in
//! [`MoverStatus::StayingInSpot`] and the screen calls [`go_to_live`] with
//! the freshly built live; [`back_from_live`] is the reverse transition.

use bevy_ecs::prelude::*;
use log::{debug, info};

use crate::components::hidden::Hidden;
use crate::components::live::LiveKind;
use crate::components::mapposition::{MapPosition, Vector2};
use crate::components::mover::{Mover, MoverFlavor, MoverStatus};
use crate::components::spot::SpotStatus;
use crate::components::travel::Travel;
use crate::error::OnAirError;
use crate::events::live::LiveEndedEvent;
use crate::events::mover::{MoverArrivedEvent, MoverDepartedEvent, MoverStoppedEvent};
use crate::systems::field::{disable_spot_except, enable_spot_except};
use crate::systems::lookup;
use crate::systems::screen::start_live;
use crate::systems::spot::mark_as_visited;

/// Spawn a mover, optionally already placed at `pos`.
pub fn spawn_mover(world: &mut World, mover: Mover, pos: Option<Vector2>) -> Entity {
    let mut e = world.spawn(mover);
    if let Some(pos) = pos {
        e.insert(MapPosition { pos });
    }
    e.id()
}

/// Put the mover at `pos`. Not allowed while moving or on air.
pub fn place_at(world: &mut World, mover: Entity, pos: Vector2) -> Result<(), OnAirError> {
    let m = lookup::mover(world, mover)?;
    match m.status {
        MoverStatus::Moving => return Err(OnAirError::AlreadyMoving(mover)),
        MoverStatus::OnAir => return Err(OnAirError::OnAir(mover)),
        _ => {}
    }
    let left_spot = m.staying.is_some();
    world.entity_mut(mover).insert(MapPosition { pos });
    if left_spot {
        let mut m = lookup::mover_mut(world, mover)?;
        m.staying = None;
        if m.status != MoverStatus::NonField {
            m.status = MoverStatus::Idle;
        }
    }
    Ok(())
}

/// Change the travel speed used by the next departure.
pub fn set_speed(world: &mut World, mover: Entity, speed: f32) -> Result<(), OnAirError> {
    lookup::mover_mut(world, mover)?.set_speed(speed)
}

/// Bind the mover to `field` and register it there.
///
/// Standing on the same field again is a no-op; a different field fails.
pub fn stand_on(world: &mut World, mover: Entity, field: Entity) -> Result<(), OnAirError> {
    match lookup::mover(world, mover)?.field {
        Some(f) if f == field => return Ok(()),
        Some(f) => return Err(OnAirError::MoverOnOtherField { mover, field: f }),
        None => {}
    }
    match lookup::field(world, field)?.mover {
        Some(other) if other != mover => {
            return Err(OnAirError::FieldOccupied {
                field,
                mover: other,
            });
        }
        _ => {}
    }

    lookup::field_mut(world, field)?.mover = Some(mover);
    let mut m = lookup::mover_mut(world, mover)?;
    m.field = Some(field);
    if m.status == MoverStatus::NonField {
        m.status = MoverStatus::Idle;
    }
    debug!("Mover {} stands on field {}", mover, field);
    Ok(())
}

/// Checks shared by `depart_to` and `jump_to`. Returns the mover's field.
fn check_departure(world: &World, mover: Entity, spot: Entity) -> Result<Entity, OnAirError> {
    let m = lookup::mover(world, mover)?;
    let field = m.field.ok_or(OnAirError::MoverNotOnField(mover))?;
    let s = lookup::spot(world, spot)?;
    match s.field {
        None => return Err(OnAirError::SpotNotDeployed(spot)),
        Some(f) if f != field => return Err(OnAirError::SpotOnOtherField { spot, field: f }),
        Some(_) => {}
    }
    if s.status == SpotStatus::Disabled {
        return Err(OnAirError::SpotDisabled(spot));
    }
    let screen = s.screen.ok_or(OnAirError::SpotWithoutScreen(spot))?;
    match m.status {
        MoverStatus::Moving => return Err(OnAirError::AlreadyMoving(mover)),
        MoverStatus::OnAir => return Err(OnAirError::OnAir(mover)),
        _ => {}
    }
    // arrival would be refused by the screen after the state already changed
    if lookup::screen(world, screen)?.is_on_air() {
        return Err(OnAirError::ScreenBusy(screen));
    }
    Ok(field)
}

/// Start travelling towards `spot`. The arrival happens on a later tick.
pub fn depart_to(world: &mut World, mover: Entity, spot: Entity) -> Result<(), OnAirError> {
    let field = check_departure(world, mover, spot)?;
    let from = lookup::position(world, mover).ok_or(OnAirError::Unlocated(mover))?;
    let to = lookup::spot_position(world, spot)?;
    let (speed, easing) = {
        let m = lookup::mover(world, mover)?;
        (m.speed, m.easing)
    };

    disable_spot_except(world, field, spot)?;
    {
        let mut s = lookup::spot_mut(world, spot)?;
        if s.status == SpotStatus::Enabled {
            s.status = SpotStatus::Target;
        }
    }
    {
        let mut m = lookup::mover_mut(world, mover)?;
        m.status = MoverStatus::Moving;
        m.destination = Some(spot);
        m.staying = None;
    }
    let travel = Travel::new(spot, from, to, speed, easing);
    debug!(
        "Mover {} departs to spot {} ({:.1} units, {:.3}s)",
        mover,
        spot,
        from.distance(to),
        travel.duration
    );
    world.entity_mut(mover).insert(travel);
    world.trigger(MoverDepartedEvent { mover, spot });
    Ok(())
}

/// Teleport to `spot` and complete the arrival before returning.
pub fn jump_to(world: &mut World, mover: Entity, spot: Entity) -> Result<(), OnAirError> {
    check_departure(world, mover, spot)?;
    let to = lookup::spot_position(world, spot)?;
    {
        let mut m = lookup::mover_mut(world, mover)?;
        m.destination = Some(spot);
        m.staying = None;
    }
    world.entity_mut(mover).insert(MapPosition { pos: to });
    debug!("Mover {} jumps to spot {}", mover, spot);
    complete_arrival(world, mover, spot)
}

/// Cancel the current travel. The mover stays where the interpolation left it.
pub fn stop(world: &mut World, mover: Entity) -> Result<(), OnAirError> {
    let m = lookup::mover(world, mover)?;
    if m.status != MoverStatus::Moving {
        return Err(OnAirError::NotMoving(mover));
    }
    let field = m.field;
    let spot = m.destination;

    world.entity_mut(mover).remove::<Travel>();
    if let Some(spot) = spot {
        if let Some(field) = field {
            enable_spot_except(world, field, spot)?;
        }
        let mut s = lookup::spot_mut(world, spot)?;
        if s.status == SpotStatus::Target {
            s.status = SpotStatus::Enabled;
        }
    }
    {
        let mut m = lookup::mover_mut(world, mover)?;
        m.destination = None;
        m.status = MoverStatus::Idle;
    }
    debug!("Mover {} stopped", mover);
    if let Some(spot) = spot {
        world.trigger(MoverStoppedEvent { mover, spot });
    }
    Ok(())
}

/// Finish an arrival at `spot` and request the broadcast.
pub(crate) fn complete_arrival(
    world: &mut World,
    mover: Entity,
    spot: Entity,
) -> Result<(), OnAirError> {
    let first_visit = mark_as_visited(world, spot)?;
    let field = {
        let mut m = lookup::mover_mut(world, mover)?;
        m.destination = None;
        m.staying = Some(spot);
        m.status = match m.flavor {
            MoverFlavor::Player => MoverStatus::Staying,
            MoverFlavor::Broadcaster => MoverStatus::StayingInSpot,
        };
        m.field
    };
    if let Some(field) = field {
        enable_spot_except(world, field, spot)?;
    }
    info!("Mover {} arrived at spot {}", mover, spot);
    world.trigger(MoverArrivedEvent {
        mover,
        spot,
        first_visit,
    });
    {
        let mut s = lookup::spot_mut(world, spot)?;
        if s.status == SpotStatus::Target {
            s.status = SpotStatus::Enabled;
        }
    }
    start_live(world, mover)?;
    Ok(())
}

/// Broadcaster entry into the live built by the screen.
///
/// `live` must be the kind registered on the spot the broadcaster stays at.
pub fn go_to_live(world: &mut World, mover: Entity, live: LiveKind) -> Result<(), OnAirError> {
    if lookup::mover(world, mover)?.flavor != MoverFlavor::Broadcaster {
        return Err(OnAirError::NotBroadcaster(mover));
    }
    enter_on_air(world, mover, live)
}

/// Broadcaster exit from a live whose screen has already released it.
pub fn back_from_live(world: &mut World, mover: Entity) -> Result<(), OnAirError> {
    let m = lookup::mover(world, mover)?;
    if m.flavor != MoverFlavor::Broadcaster {
        return Err(OnAirError::NotBroadcaster(mover));
    }
    if let Some(spot) = m.staying {
        if let Some(screen) = lookup::spot(world, spot)?.screen {
            let running = lookup::screen(world, screen)?
                .slot()
                .is_some_and(|slot| slot.mover == mover);
            if running {
                return Err(OnAirError::LiveStillRunning(screen));
            }
        }
    }
    leave_on_air(world, mover)
}

/// Shared on-air entry for both flavors.
pub(crate) fn enter_on_air(
    world: &mut World,
    mover: Entity,
    live: LiveKind,
) -> Result<(), OnAirError> {
    let m = lookup::mover(world, mover)?;
    match m.status {
        MoverStatus::OnAir => return Err(OnAirError::OnAir(mover)),
        MoverStatus::Moving => return Err(OnAirError::AlreadyMoving(mover)),
        MoverStatus::Staying | MoverStatus::StayingInSpot => {}
        MoverStatus::NonField | MoverStatus::Idle => return Err(OnAirError::NotStaying(mover)),
    }
    let spot = m.staying.ok_or(OnAirError::NotStaying(mover))?;
    let field = m.field;
    let expected = lookup::spot(world, spot)?.live.kind();
    if live != expected {
        return Err(OnAirError::LiveMismatch {
            spot,
            expected: expected.0,
            given: live.0,
        });
    }

    world.entity_mut(mover).insert(Hidden);
    if let Some(field) = field {
        disable_spot_except(world, field, spot)?;
    }
    let mut m = lookup::mover_mut(world, mover)?;
    m.status = MoverStatus::OnAir;
    m.live = Some(live);
    debug!("Mover {} on air with `{}`", mover, live);
    Ok(())
}

/// Shared on-air exit for both flavors.
pub(crate) fn leave_on_air(world: &mut World, mover: Entity) -> Result<(), OnAirError> {
    let m = lookup::mover(world, mover)?;
    if m.status != MoverStatus::OnAir {
        return Err(OnAirError::NotOnAir(mover));
    }
    let spot = m.staying.ok_or(OnAirError::NotStaying(mover))?;
    let field = m.field;
    let live = match m.live {
        Some(kind) => kind,
        None => lookup::spot(world, spot)?.live.kind(),
    };

    world.entity_mut(mover).remove::<Hidden>();
    if let Some(field) = field {
        enable_spot_except(world, field, spot)?;
    }
    {
        let mut m = lookup::mover_mut(world, mover)?;
        m.status = MoverStatus::Staying;
        m.live = None;
    }
    debug!("Mover {} back from `{}`", mover, live);
    world.trigger(LiveEndedEvent { mover, spot, live });
    Ok(())
}
