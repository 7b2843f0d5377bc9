//! The roaming actor.
//!
//! A [`Mover`] comes in two flavors:
//! - [`MoverFlavor::Player`] merges arrival and broadcast start: when it
//!   reaches a spot it goes on air in the same step.
//! - [`MoverFlavor::Broadcaster`] first rests in [`MoverStatus::StayingInSpot`]
//!   and enters the broadcast through an explicit `go_to_live` call, leaving
//!   it again with `back_from_live`.
//!
//! # State machine
//!
//! ```text
//! NonField --stand_on--> Idle
//! Idle | Staying | StayingInSpot --depart_to--> Moving --arrival--> StayingInSpot | OnAir
//! Moving --stop--> Idle
//! OnAir --back_from_live--> Staying
//! ```
//!
//! Transitions live in [`crate::systems::mover`].

use std::any::Any;
use std::fmt;

use bevy_ecs::prelude::{Component, Entity};

use crate::components::live::LiveKind;
use crate::components::travel::Easing;
use crate::error::{OnAirError, positive};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MoverFlavor {
    Player,
    Broadcaster,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MoverStatus {
    /// Not standing on any field yet.
    NonField,
    /// Resting at a spot, not broadcasting.
    Staying,
    /// Broadcaster only: arrived, broadcast not yet started.
    StayingInSpot,
    /// Travelling towards a destination spot.
    Moving,
    /// Resting on open ground.
    Idle,
    /// Broadcast in progress.
    OnAir,
}

#[derive(Component)]
pub struct Mover {
    pub(crate) speed: f32,
    pub easing: Easing,
    pub(crate) flavor: MoverFlavor,
    pub(crate) status: MoverStatus,
    pub(crate) field: Option<Entity>,
    pub(crate) destination: Option<Entity>,
    pub(crate) staying: Option<Entity>,
    pub(crate) live: Option<LiveKind>,
    payload: Option<Box<dyn Any + Send + Sync>>,
}

impl Mover {
    /// Create a mover travelling at `speed` field units per second.
    pub fn new(flavor: MoverFlavor, speed: f32) -> Result<Self, OnAirError> {
        positive("speed", speed as f64)?;
        Ok(Mover {
            speed,
            easing: Easing::default(),
            flavor,
            status: MoverStatus::NonField,
            field: None,
            destination: None,
            staying: None,
            live: None,
            payload: None,
        })
    }

    pub fn player(speed: f32) -> Result<Self, OnAirError> {
        Self::new(MoverFlavor::Player, speed)
    }

    pub fn broadcaster(speed: f32) -> Result<Self, OnAirError> {
        Self::new(MoverFlavor::Broadcaster, speed)
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Attach an opaque value owned by the game.
    pub fn with_payload<T: Any + Send + Sync>(mut self, payload: T) -> Self {
        self.payload = Some(Box::new(payload));
        self
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Change the speed. Applies to the next departure.
    pub fn set_speed(&mut self, speed: f32) -> Result<(), OnAirError> {
        positive("speed", speed as f64)?;
        self.speed = speed;
        Ok(())
    }

    pub fn flavor(&self) -> MoverFlavor {
        self.flavor
    }

    pub fn status(&self) -> MoverStatus {
        self.status
    }

    pub fn field(&self) -> Option<Entity> {
        self.field
    }

    pub fn destination(&self) -> Option<Entity> {
        self.destination
    }

    pub fn staying(&self) -> Option<Entity> {
        self.staying
    }

    /// Kind of the live currently on air, if any.
    pub fn live(&self) -> Option<LiveKind> {
        self.live
    }

    pub fn is_moving(&self) -> bool {
        self.status == MoverStatus::Moving
    }

    pub fn is_on_air(&self) -> bool {
        self.status == MoverStatus::OnAir
    }

    pub fn payload<T: Any>(&self) -> Option<&T> {
        self.payload.as_deref()?.downcast_ref::<T>()
    }

    pub fn payload_mut<T: Any>(&mut self) -> Option<&mut T> {
        self.payload.as_deref_mut()?.downcast_mut::<T>()
    }

    pub fn set_payload<T: Any + Send + Sync>(&mut self, payload: T) {
        self.payload = Some(Box::new(payload));
    }
}

impl fmt::Debug for Mover {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mover")
            .field("speed", &self.speed)
            .field("easing", &self.easing)
            .field("flavor", &self.flavor)
            .field("status", &self.status)
            .field("field", &self.field)
            .field("destination", &self.destination)
            .field("staying", &self.staying)
            .field("live", &self.live)
            .field("payload", &self.payload.is_some())
            .finish()
    }
}
