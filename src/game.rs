//! World setup and the per-tick schedule.
//!
//! [`Game`] owns the ECS world, inserts the shared resources and runs the
//! systems in a fixed order each tick:
//!
//! 1. `update_world_time`
//! 2. `travel_system`
//! 3. `live_update_system`
//! 4. `comment_supply_system`
//! 5. `comment_deploy_system`
//!
//! The `spawn_*` helpers fill in the tunables from [`GameConfig`].

use bevy_ecs::prelude::*;

use crate::components::commentsupplier::CommentSchema;
use crate::components::mapposition::Vector2;
use crate::components::mover::{Mover, MoverFlavor};
use crate::error::OnAirError;
use crate::resources::gameconfig::GameConfig;
use crate::resources::textmetrics::TextMetrics;
use crate::resources::worldsignals::WorldSignals;
use crate::resources::worldtime::WorldTime;
use crate::systems::comment::{
    comment_deploy_system, comment_supply_system, spawn_comment_deployer, spawn_comment_supplier,
};
use crate::systems::mover::spawn_mover;
use crate::systems::screen::live_update_system;
use crate::systems::time::update_world_time;
use crate::systems::travel::travel_system;

pub struct Game {
    world: World,
    schedule: Schedule,
}

impl Game {
    pub fn new(config: GameConfig) -> Self {
        let mut world = World::new();
        world.insert_resource(WorldTime::default().with_time_scale(1.0));
        world.insert_resource(WorldSignals::default());
        world.insert_resource(TextMetrics {
            glyph_width: config.glyph_width,
        });
        world.insert_resource(config);

        let mut schedule = Schedule::default();
        schedule.add_systems(
            (
                travel_system,
                live_update_system,
                comment_supply_system,
                comment_deploy_system,
            )
                .chain(),
        );

        Game { world, schedule }
    }

    /// Advance the simulation by `dt` seconds.
    pub fn tick(&mut self, dt: f32) {
        update_world_time(&mut self.world, dt);
        self.schedule.run(&mut self.world);
        self.world.clear_trackers();
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn config(&self) -> &GameConfig {
        self.world.resource::<GameConfig>()
    }

    /// Spawn a mover of `flavor` with the configured speed and easing.
    pub fn spawn_mover(
        &mut self,
        flavor: MoverFlavor,
        pos: Option<Vector2>,
    ) -> Result<Entity, OnAirError> {
        let (speed, easing) = {
            let c = self.config();
            (c.mover_speed, c.mover_easing)
        };
        let mover = Mover::new(flavor, speed)?.with_easing(easing);
        Ok(spawn_mover(&mut self.world, mover, pos))
    }

    /// Spawn a supplier with the configured interval and fps.
    pub fn spawn_comment_supplier(
        &mut self,
        schemas: Vec<CommentSchema>,
    ) -> Result<Entity, OnAirError> {
        let (interval_ms, fps) = {
            let c = self.config();
            (c.comment_interval_ms, c.comment_fps)
        };
        spawn_comment_supplier(&mut self.world, schemas, interval_ms, fps)
    }

    /// Spawn a deployer with the configured scroll speed and row spacing.
    pub fn spawn_comment_deployer(
        &mut self,
        container: Option<Entity>,
    ) -> Result<Entity, OnAirError> {
        let (speed, spacing) = {
            let c = self.config();
            (c.scroll_speed, c.row_spacing)
        };
        spawn_comment_deployer(&mut self.world, speed, spacing, container)
    }
}
