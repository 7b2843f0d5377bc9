//! In-flight movement of a mover.
//!
//! A [`Travel`] component is inserted on a mover by `depart_to` and removed
//! either on arrival or by `stop`. The interpolation is advanced once per tick
//! by [`crate::systems::travel::travel_system`]; no external animation engine
//! is involved.

use bevy_ecs::prelude::{Component, Entity};
use serde::{Deserialize, Serialize};

use crate::components::mapposition::Vector2;

/// Easing curves applied to the elapsed fraction of a travel.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    /// Constant speed.
    Linear,
    QuadIn,
    QuadOut,
    /// Slow start and end. Default for movers.
    #[default]
    QuadInOut,
    CubicIn,
    CubicOut,
    CubicInOut,
}

impl Easing {
    /// Map an elapsed fraction to an eased fraction. `t` is clamped to [0, 1].
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::QuadIn => t * t,
            Easing::QuadOut => t * (2.0 - t),
            Easing::QuadInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    -1.0 + (4.0 - 2.0 * t) * t
                }
            }
            Easing::CubicIn => t * t * t,
            Easing::CubicOut => {
                let p = t - 1.0;
                p * p * p + 1.0
            }
            Easing::CubicInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let p = 2.0 * t - 2.0;
                    0.5 * p * p * p + 1.0
                }
            }
        }
    }

    /// Parse the names used in config files (`quad_in_out`, `linear`, ...).
    pub fn from_name(name: &str) -> Option<Easing> {
        match name.trim().to_ascii_lowercase().as_str() {
            "linear" => Some(Easing::Linear),
            "quad_in" => Some(Easing::QuadIn),
            "quad_out" => Some(Easing::QuadOut),
            "quad_in_out" => Some(Easing::QuadInOut),
            "cubic_in" => Some(Easing::CubicIn),
            "cubic_out" => Some(Easing::CubicOut),
            "cubic_in_out" => Some(Easing::CubicInOut),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Easing::Linear => "linear",
            Easing::QuadIn => "quad_in",
            Easing::QuadOut => "quad_out",
            Easing::QuadInOut => "quad_in_out",
            Easing::CubicIn => "cubic_in",
            Easing::CubicOut => "cubic_out",
            Easing::CubicInOut => "cubic_in_out",
        }
    }
}

/// Straight-line interpolation from `from` to `to` over `duration` seconds.
///
/// A zero `duration` (the mover already stands on the destination) completes
/// on the first tick after departure.
#[derive(Component, Clone, Debug)]
pub struct Travel {
    /// Spot being travelled to.
    pub destination: Entity,
    pub from: Vector2,
    pub to: Vector2,
    /// Duration in seconds, `distance / speed`.
    pub duration: f32,
    /// Seconds elapsed since departure.
    pub elapsed: f32,
    pub easing: Easing,
}

impl Travel {
    pub fn new(destination: Entity, from: Vector2, to: Vector2, speed: f32, easing: Easing) -> Self {
        let distance = from.distance(to);
        Travel {
            destination,
            from,
            to,
            duration: distance / speed,
            elapsed: 0.0,
            easing,
        }
    }

    /// Advance by `dt` seconds and return the new position. Lands exactly
    /// on `to` once finished.
    pub fn advance(&mut self, dt: f32) -> Vector2 {
        self.elapsed += dt.max(0.0);
        if self.is_finished() {
            return self.to;
        }
        self.from.lerp(self.to, self.easing.apply(self.fraction()))
    }

    /// Elapsed fraction in [0, 1].
    pub fn fraction(&self) -> f32 {
        if self.duration <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.duration).min(1.0)
        }
    }

    pub fn is_finished(&self) -> bool {
        self.fraction() >= 1.0
    }
}
