//! The live broadcast capability.
//!
//! A [`Live`] is the content a game author plugs into a spot: when a mover
//! arrives, the spot's screen builds a fresh instance through the spot's
//! [`LiveFactory`], calls [`Live::start`] and then [`Live::update`] once per
//! tick until the live signals completion.
//!
//! Completion is signalled either from inside the live with
//! [`LiveContext::end`] or from outside with
//! [`end_live`](crate::systems::screen::end_live).
//!
//! # Example
//!
//! ```ignore
//! #[derive(Default)]
//! struct Fanfare { seconds: f32 }
//!
//! impl Live for Fanfare {
//!     fn kind(&self) -> LiveKind { LiveKind("fanfare") }
//!     fn start(&mut self, ctx: &mut LiveContext<'_>) {
//!         ctx.world.spawn((Banner, ChildOf(ctx.container)));
//!     }
//!     fn update(&mut self, ctx: &mut LiveContext<'_>) {
//!         self.seconds += ctx.delta();
//!         if self.seconds >= 3.0 { ctx.end(); }
//!     }
//! }
//!
//! let spot = Spot::new(LiveFactory::of::<Fanfare>(), assets);
//! ```

use std::fmt;

use bevy_ecs::prelude::{Entity, World};

use crate::resources::worldtime::WorldTime;

/// Token identifying a kind of live. Compared instead of runtime types.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct LiveKind(pub &'static str);

impl fmt::Display for LiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// A broadcast started when a mover arrives at a spot.
pub trait Live: Send + Sync + 'static {
    /// Token matched against the factory registered on the spot.
    fn kind(&self) -> LiveKind;

    /// Called once when the live goes on air.
    fn start(&mut self, ctx: &mut LiveContext<'_>);

    /// Called once per tick while on air.
    fn update(&mut self, _ctx: &mut LiveContext<'_>) {}
}

/// Typed constructor stored on a spot.
#[derive(Copy, Clone)]
pub struct LiveFactory {
    kind: LiveKind,
    build: fn() -> Box<dyn Live>,
}

impl LiveFactory {
    /// Factory with an explicit token.
    pub fn new(kind: LiveKind, build: fn() -> Box<dyn Live>) -> Self {
        LiveFactory { kind, build }
    }

    /// Factory for a default-constructible live; the token is taken from it.
    pub fn of<L: Live + Default>() -> Self {
        LiveFactory {
            kind: L::default().kind(),
            build: || Box::new(L::default()) as Box<dyn Live>,
        }
    }

    pub fn kind(&self) -> LiveKind {
        self.kind
    }

    pub fn build(&self) -> Box<dyn Live> {
        (self.build)()
    }
}

impl fmt::Debug for LiveFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LiveFactory").field("kind", &self.kind).finish()
    }
}

/// What a live can reach while running.
pub struct LiveContext<'a> {
    pub world: &'a mut World,
    /// Rendering container created for this broadcast; despawned on end.
    pub container: Entity,
    pub spot: Entity,
    pub mover: Entity,
    pub screen: Entity,
    pub(crate) ended: bool,
}

impl<'a> LiveContext<'a> {
    pub(crate) fn new(
        world: &'a mut World,
        container: Entity,
        spot: Entity,
        mover: Entity,
        screen: Entity,
    ) -> Self {
        LiveContext {
            world,
            container,
            spot,
            mover,
            screen,
            ended: false,
        }
    }

    /// Signal completion. The screen tears the broadcast down once the
    /// current callback returns.
    pub fn end(&mut self) {
        self.ended = true;
    }

    pub fn is_ended(&self) -> bool {
        self.ended
    }

    /// Seconds elapsed during the current tick.
    pub fn delta(&self) -> f32 {
        self.world
            .get_resource::<WorldTime>()
            .map(|t| t.delta)
            .unwrap_or(0.0)
    }
}
