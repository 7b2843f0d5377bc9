//! Simulation clock.
//!
//! Updated once per tick by [`crate::systems::time::update_world_time`].
//! Travel interpolation reads `delta`; comment scheduling ignores it and
//! advances on its own fixed `1000 / fps` step.

use bevy_ecs::prelude::Resource;

#[derive(Resource, Clone, Copy, Debug)]
pub struct WorldTime {
    /// Seconds since the simulation started, scaled.
    pub elapsed: f32,
    /// Seconds covered by the current tick, scaled.
    pub delta: f32,
    pub time_scale: f32,
    /// Number of ticks processed.
    pub frame_count: u64,
}

impl Default for WorldTime {
    fn default() -> Self {
        WorldTime {
            elapsed: 0.0,
            delta: 0.0,
            time_scale: 1.0,
            frame_count: 0,
        }
    }
}

impl WorldTime {
    pub fn with_time_scale(mut self, time_scale: f32) -> Self {
        self.time_scale = time_scale;
        self
    }
}
