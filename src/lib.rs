//! OnAir simulation core.
//!
//! This crate exposes the ECS components, resources, systems, and events of
//! the mover/spot/screen broadcast state machine and the scrolling comment
//! pipeline, for use by a host engine and in integration tests.

pub mod components;
pub mod error;
pub mod events;
pub mod game;
pub mod resources;
pub mod systems;
