//! Event types fired by the simulation.
//!
//! Every transition that a game may want to react to triggers an event on
//! the world. Subscribe with `world.add_observer(...)`.
//!
//! Submodules:
//! - [`mover`] – departure, arrival and stop of a mover
//! - [`live`] – broadcast start and end
//! - [`comment`] – comment emission, placement and retirement
pub mod comment;
pub mod live;
pub mod mover;
