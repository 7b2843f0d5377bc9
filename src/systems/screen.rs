//! Screen arbitration.
//!
//! A screen runs at most one live at a time. [`start_live`] is called by
//! the mover on arrival and fails with [`OnAirError::ScreenBusy`] instead of
//! queueing. The live is taken out of the slot while its callbacks run so it
//! can receive `&mut World`; completion requested during a callback is
//! applied as soon as the callback returns.

use bevy_ecs::prelude::*;
use log::{error, info};

use crate::components::live::{Live, LiveContext};
use crate::components::mover::{MoverFlavor, MoverStatus};
use crate::components::screen::{LiveContainer, OnAirSlot, Screen};
use crate::error::OnAirError;
use crate::events::live::LiveStartedEvent;
use crate::systems::lookup;
use crate::systems::mover::{back_from_live, enter_on_air, go_to_live, leave_on_air};

pub fn spawn_screen(world: &mut World) -> Entity {
    world.spawn(Screen::new()).id()
}

/// Start the live of the spot `mover` stays at.
///
/// Returns the container entity created for the broadcast. The mover goes
/// on air before the slot is filled, so a rejected live leaves the screen
/// idle.
pub fn start_live(world: &mut World, mover: Entity) -> Result<Entity, OnAirError> {
    let m = lookup::mover(world, mover)?;
    let spot = match m.status {
        MoverStatus::Staying | MoverStatus::StayingInSpot => {
            m.staying.ok_or(OnAirError::NotStaying(mover))?
        }
        MoverStatus::OnAir => return Err(OnAirError::OnAir(mover)),
        MoverStatus::Moving => return Err(OnAirError::AlreadyMoving(mover)),
        MoverStatus::NonField | MoverStatus::Idle => return Err(OnAirError::NotStaying(mover)),
    };
    let flavor = m.flavor;
    let s = lookup::spot(world, spot)?;
    let screen = s.screen.ok_or(OnAirError::SpotWithoutScreen(spot))?;
    let factory = s.live;
    if lookup::screen(world, screen)?.is_on_air() {
        return Err(OnAirError::ScreenBusy(screen));
    }

    let live = factory.build();
    let kind = live.kind();
    match flavor {
        MoverFlavor::Broadcaster => go_to_live(world, mover, kind)?,
        MoverFlavor::Player => enter_on_air(world, mover, kind)?,
    }

    let container = world
        .spawn((LiveContainer { screen, spot }, ChildOf(screen)))
        .id();
    lookup::screen_mut(world, screen)?.slot = Some(OnAirSlot {
        mover,
        spot,
        container,
        kind,
        live: None,
        end_requested: false,
    });
    info!("Screen {} on air: `{}` at spot {}", screen, kind, spot);
    world.trigger(LiveStartedEvent {
        screen,
        mover,
        spot,
        live: kind,
    });

    let mut live = live;
    let ended = {
        let mut ctx = LiveContext::new(world, container, spot, mover, screen);
        live.start(&mut ctx);
        ctx.is_ended()
    };
    restore_live(world, screen, live, ended)?;
    Ok(container)
}

/// Request completion of the live running on `screen`.
pub fn end_live(world: &mut World, screen: Entity) -> Result<(), OnAirError> {
    let in_callback = {
        let mut scr = lookup::screen_mut(world, screen)?;
        let Some(slot) = scr.slot.as_mut() else {
            return Err(OnAirError::ScreenIdle(screen));
        };
        // the live is out of its slot while its own callback runs
        if slot.live.is_none() {
            slot.end_requested = true;
        }
        slot.live.is_none()
    };
    if in_callback {
        return Ok(());
    }
    finish_live(world, screen)
}

/// Put a live back into its slot after a callback, finishing it if asked.
fn restore_live(
    world: &mut World,
    screen: Entity,
    live: Box<dyn Live>,
    ended: bool,
) -> Result<(), OnAirError> {
    let end_requested = {
        let mut scr = lookup::screen_mut(world, screen)?;
        match scr.slot.as_mut() {
            Some(slot) => {
                slot.live = Some(live);
                slot.end_requested
            }
            // the callback tore the broadcast down itself
            None => return Ok(()),
        }
    };
    if ended || end_requested {
        finish_live(world, screen)?;
    }
    Ok(())
}

/// Clear the slot, drop the container and hand control back to the mover.
fn finish_live(world: &mut World, screen: Entity) -> Result<(), OnAirError> {
    let Some(slot) = lookup::screen_mut(world, screen)?.slot.take() else {
        return Ok(());
    };
    if let Ok(container) = world.get_entity_mut(slot.container) {
        container.despawn();
    }
    info!("Screen {} off air: `{}`", screen, slot.kind);
    match lookup::mover(world, slot.mover)?.flavor {
        MoverFlavor::Broadcaster => back_from_live(world, slot.mover),
        MoverFlavor::Player => leave_on_air(world, slot.mover),
    }
}

/// Drive every running live once per tick.
pub fn live_update_system(world: &mut World) {
    let mut screens = world.query_filtered::<Entity, With<Screen>>();
    let screens: Vec<Entity> = screens.iter(world).collect();

    for screen in screens {
        let taken = match world.get_mut::<Screen>(screen) {
            Some(mut scr) => scr.slot.as_mut().and_then(|slot| {
                slot.live
                    .take()
                    .map(|live| (live, slot.container, slot.spot, slot.mover))
            }),
            None => None,
        };
        let Some((mut live, container, spot, mover)) = taken else {
            continue;
        };
        let ended = {
            let mut ctx = LiveContext::new(world, container, spot, mover, screen);
            live.update(&mut ctx);
            ctx.is_ended()
        };
        if let Err(err) = restore_live(world, screen, live, ended) {
            error!("Screen {}: live update failed: {}", screen, err);
        }
    }
}
