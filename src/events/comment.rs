//! Comment pipeline notifications.

use bevy_ecs::prelude::*;

/// A supplier emitted `text` during the current tick.
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct CommentSuppliedEvent {
    pub supplier: Entity,
    pub text: String,
}

/// A view was placed on the canvas.
#[derive(Event, Debug, Clone, PartialEq)]
pub struct CommentDeployedEvent {
    pub deployer: Entity,
    pub view: Entity,
    pub row: u32,
}

/// A view scrolled off the left edge and was despawned.
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct CommentFadedOutEvent {
    pub deployer: Entity,
    pub text: String,
}
