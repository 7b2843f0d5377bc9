//! ECS resources made available to systems.
//!
//! Overview
//! - `gameconfig` – INI-backed tunables (mover speed, comment timing, layout)
//! - `textmetrics` – width estimate for comment texts
//! - `worldsignals` – global scalars, integers, strings and flags read by comment conditions
//! - `worldtime` – simulation time and delta
pub mod gameconfig;
pub mod textmetrics;
pub mod worldsignals;
pub mod worldtime;
