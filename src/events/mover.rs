//! Movement notifications.
//!
//! Fired synchronously from the mover transitions in
//! [`crate::systems::mover`]. Observers see the state after the transition,
//! except [`MoverArrivedEvent`], which fires before the broadcast starts.
//!
//! ```ignore
//! world.add_observer(|trigger: On<MoverArrivedEvent>, mut signals: ResMut<WorldSignals>| {
//!     signals.add_integer("visits", 1);
//! });
//! ```

use bevy_ecs::prelude::*;

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoverDepartedEvent {
    pub mover: Entity,
    pub spot: Entity,
}

/// The mover reached `spot`; the spot is already marked visited.
/// `first_visit` is set only on the arrival that flipped the visited flag.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoverArrivedEvent {
    pub mover: Entity,
    pub spot: Entity,
    pub first_visit: bool,
}

/// A travel towards `spot` was cancelled.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoverStoppedEvent {
    pub mover: Entity,
    pub spot: Entity,
}
