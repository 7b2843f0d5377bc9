//! World operations and per-tick systems.
//!
//! Operations take `&mut World` plus entity handles and return
//! `Result<_, OnAirError>`; the `*_system` functions are run once per tick by
//! [`crate::game::Game`].
//!
//! Submodules overview
//! - [`comment`] – supplier scheduling and deployer scrolling/placement
//! - [`field`] – spot and mover registration, sibling lock/unlock
//! - [`mover`] – departure, arrival, stop and on-air transitions
//! - [`screen`] – live start, per-tick update and teardown
//! - [`spot`] – deployment, destination and visited marking
//! - [`time`] – update simulation time and delta
//! - [`travel`] – advance in-flight travels and complete arrivals

pub mod comment;
pub mod field;
pub(crate) mod lookup;
pub mod mover;
pub mod screen;
pub mod spot;
pub mod time;
pub mod travel;
