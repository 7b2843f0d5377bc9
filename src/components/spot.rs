//! Visitable location on a field.
//!
//! A [`Spot`] is spawned together with its fixed [`MapPosition`] and only
//! becomes usable once deployed on a field. Its lifecycle is driven by the
//! operations in [`crate::systems::spot`]:
//!
//! ```text
//! NonDeployed --deploy_on--> Enabled <--set/unset destination--> Target
//!                            Enabled <--enable/disable---------> Disabled
//! ```
//!
//! [`MapPosition`]: crate::components::mapposition::MapPosition

use bevy_ecs::prelude::{Component, Entity};

use crate::components::live::LiveFactory;

/// Visit-eligibility state of a spot.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SpotStatus {
    /// Not yet deployed on any field.
    NonDeployed,
    /// Can be chosen as a destination.
    Enabled,
    /// The mover's current destination.
    Target,
    /// Not selectable, e.g. while the mover is travelling elsewhere.
    Disabled,
}

/// Image keys shown for each presentation state. Presentation only.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SpotAssets {
    /// Managed by the consumer, never selected automatically.
    pub locked: String,
    pub unvisited: String,
    pub disabled: String,
    pub normal: String,
}

impl SpotAssets {
    pub fn new(
        locked: impl Into<String>,
        unvisited: impl Into<String>,
        disabled: impl Into<String>,
        normal: impl Into<String>,
    ) -> Self {
        SpotAssets {
            locked: locked.into(),
            unvisited: unvisited.into(),
            disabled: disabled.into(),
            normal: normal.into(),
        }
    }
}

#[derive(Component, Clone, Debug)]
pub struct Spot {
    pub(crate) status: SpotStatus,
    pub(crate) visited: bool,
    pub assets: SpotAssets,
    /// Builds the live broadcast started when a mover arrives here.
    pub live: LiveFactory,
    pub(crate) field: Option<Entity>,
    pub(crate) screen: Option<Entity>,
}

impl Spot {
    pub fn new(live: LiveFactory, assets: SpotAssets) -> Self {
        Spot {
            status: SpotStatus::NonDeployed,
            visited: false,
            assets,
            live,
            field: None,
            screen: None,
        }
    }

    pub fn status(&self) -> SpotStatus {
        self.status
    }

    /// Set the first time a mover completes an arrival here. Never reset.
    pub fn visited(&self) -> bool {
        self.visited
    }

    pub fn field(&self) -> Option<Entity> {
        self.field
    }

    pub fn screen(&self) -> Option<Entity> {
        self.screen
    }

    pub fn is_deployed(&self) -> bool {
        self.status != SpotStatus::NonDeployed
    }

    /// Asset key to draw for the current (status, visited) pair.
    pub fn displayed_asset(&self) -> &str {
        match self.status {
            SpotStatus::Disabled => &self.assets.disabled,
            SpotStatus::Target => &self.assets.unvisited,
            SpotStatus::Enabled | SpotStatus::NonDeployed if self.visited => &self.assets.normal,
            SpotStatus::Enabled | SpotStatus::NonDeployed => &self.assets.unvisited,
        }
    }
}
