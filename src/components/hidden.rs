//! Visibility marker.
//!
//! The rendering layer skips entities carrying [`Hidden`]. A broadcasting
//! mover is hidden for the duration of its live.

use bevy_ecs::prelude::Component;

/// Tag component for entities that should not be drawn.
#[derive(Component, Clone, Debug)]
pub struct Hidden;
