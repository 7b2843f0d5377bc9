//! Single-slot broadcast presenter.
//!
//! A [`Screen`] holds at most one running live (the on-air slot). Spots
//! attach to a screen; the screen starts the spot's live when a mover
//! arrives there. See [`crate::systems::screen`].

use std::fmt;

use bevy_ecs::prelude::{Component, Entity};

use crate::components::live::{Live, LiveKind};

/// The live currently occupying a screen.
pub struct OnAirSlot {
    pub mover: Entity,
    pub spot: Entity,
    /// Container entity spawned as a child of the screen for this live.
    pub container: Entity,
    pub kind: LiveKind,
    /// Taken out while one of its callbacks runs.
    pub(crate) live: Option<Box<dyn Live>>,
    pub(crate) end_requested: bool,
}

#[derive(Component, Default)]
pub struct Screen {
    pub(crate) slot: Option<OnAirSlot>,
}

impl Screen {
    pub fn new() -> Self {
        Screen::default()
    }

    pub fn slot(&self) -> Option<&OnAirSlot> {
        self.slot.as_ref()
    }

    pub fn is_on_air(&self) -> bool {
        self.slot.is_some()
    }
}

impl fmt::Debug for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.slot {
            None => f.debug_struct("Screen").field("slot", &"empty").finish(),
            Some(slot) => f
                .debug_struct("Screen")
                .field("mover", &slot.mover)
                .field("spot", &slot.spot)
                .field("container", &slot.container)
                .field("kind", &slot.kind)
                .field("end_requested", &slot.end_requested)
                .finish(),
        }
    }
}

/// Marks the rendering container of a running live.
#[derive(Component, Clone, Copy, Debug)]
pub struct LiveContainer {
    pub screen: Entity,
    pub spot: Entity,
}
