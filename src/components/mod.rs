//! ECS components for entities.
//!
//! Submodules overview:
//! - [`commentdeployer`] – canvas, comment views and the row placement rule
//! - [`commentsupplier`] – timed rotation of conditionally gated comments
//! - [`condition`] – data-driven predicates over world signals
//! - [`field`] – bounded area owning spots and at most one mover
//! - [`hidden`] – marker for entities whose view is hidden
//! - [`live`] – pluggable broadcast capability and its factory token
//! - [`mapposition`] – world-space position for an entity
//! - [`mover`] – roaming actor state (player or broadcaster)
//! - [`screen`] – single-slot broadcast presenter
//! - [`spot`] – discrete destination on a field
//! - [`travel`] – in-flight eased interpolation towards a spot

pub mod commentdeployer;
pub mod commentsupplier;
pub mod condition;
pub mod field;
pub mod hidden;
pub mod live;
pub mod mapposition;
pub mod mover;
pub mod screen;
pub mod spot;
pub mod travel;
