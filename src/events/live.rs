//! Broadcast lifecycle notifications.

use bevy_ecs::prelude::*;

use crate::components::live::LiveKind;

/// A live went on air on `screen`.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct LiveStartedEvent {
    pub screen: Entity,
    pub mover: Entity,
    pub spot: Entity,
    pub live: LiveKind,
}

/// The broadcast ended and the mover is back at the spot.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct LiveEndedEvent {
    pub mover: Entity,
    pub spot: Entity,
    /// The terminated live.
    pub live: LiveKind,
}
