//! Error type shared by every world-level operation.
//!
//! Failures fall in three groups:
//! - precondition violations: the entity is in the wrong state or belongs to
//!   the wrong owner for the requested transition. The call has no effect.
//! - validation errors: a non-positive speed, interval, fps or spacing was
//!   supplied. The previous value is kept.
//! - configuration errors: the INI or JSON input could not be read.
//!
//! Registering the same entity twice with the same owner is not an error.

use bevy_ecs::prelude::Entity;
use thiserror::Error;

/// Error returned by the `onair` operations.
#[derive(Debug, Error)]
pub enum OnAirError {
    #[error("entity {0} is not a mover")]
    NotAMover(Entity),
    #[error("entity {0} is not a spot")]
    NotASpot(Entity),
    #[error("entity {0} is not a field")]
    NotAField(Entity),
    #[error("entity {0} is not a screen")]
    NotAScreen(Entity),
    #[error("entity {0} is not a comment deployer")]
    NotADeployer(Entity),
    #[error("entity {0} is not a comment supplier")]
    NotASupplier(Entity),

    #[error("mover {0} does not stand on a field")]
    MoverNotOnField(Entity),
    #[error("mover {mover} already stands on field {field}")]
    MoverOnOtherField { mover: Entity, field: Entity },
    #[error("field {field} already hosts mover {mover}")]
    FieldOccupied { field: Entity, mover: Entity },
    #[error("spot {spot} belongs to field {field}")]
    SpotOnOtherField { spot: Entity, field: Entity },
    #[error("spot {0} is not deployed on a field")]
    SpotNotDeployed(Entity),
    #[error("spot {0} is disabled")]
    SpotDisabled(Entity),
    #[error("spot {spot} lies outside field {field}")]
    SpotOutOfBounds { spot: Entity, field: Entity },
    #[error("spot {0} has no screen attached")]
    SpotWithoutScreen(Entity),
    #[error("spot {spot} is already attached to screen {screen}")]
    ScreenAlreadyAttached { spot: Entity, screen: Entity },
    #[error("spot {0} is the current destination")]
    IsDestination(Entity),
    #[error("field {0} has no mover")]
    NoMoverOnField(Entity),

    #[error("mover {0} has no location yet")]
    Unlocated(Entity),
    #[error("mover {0} is already moving")]
    AlreadyMoving(Entity),
    #[error("mover {0} is not moving")]
    NotMoving(Entity),
    #[error("mover {0} is on air")]
    OnAir(Entity),
    #[error("mover {0} is not on air")]
    NotOnAir(Entity),
    #[error("mover {0} is not staying at a spot")]
    NotStaying(Entity),
    #[error("mover has not arrived at spot {0}")]
    NotArrived(Entity),
    #[error("mover {0} is not a broadcaster")]
    NotBroadcaster(Entity),
    #[error("live `{given}` does not match `{expected}` registered on spot {spot}")]
    LiveMismatch {
        spot: Entity,
        expected: &'static str,
        given: &'static str,
    },
    #[error("screen {0} is already broadcasting")]
    ScreenBusy(Entity),
    #[error("screen {0} is still running the live of this mover")]
    LiveStillRunning(Entity),
    #[error("screen {0} has no live on air")]
    ScreenIdle(Entity),
    #[error("entity {0} is not a canvas")]
    NotACanvas(Entity),
    #[error("comment deployer {0} has no container")]
    NoContainer(Entity),

    #[error("invalid {what}: {value} (must be positive)")]
    InvalidValue { what: &'static str, value: f64 },

    #[error("config error: {0}")]
    Config(String),
    #[error("comment script error: {0}")]
    Script(#[from] serde_json::Error),
}

/// Reject non-positive or non-finite values.
pub(crate) fn positive(what: &'static str, value: f64) -> Result<f64, OnAirError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(OnAirError::InvalidValue { what, value })
    }
}

/// Like [`positive`], for values stored as `f32`. The check is repeated after
/// narrowing so overflow to infinity or underflow to zero is rejected too.
pub(crate) fn positive_f32(what: &'static str, value: f64) -> Result<f32, OnAirError> {
    let narrowed = positive(what, value)? as f32;
    if narrowed.is_finite() && narrowed > 0.0 {
        Ok(narrowed)
    } else {
        Err(OnAirError::InvalidValue { what, value })
    }
}
