//! World-space position of movers, spots and comment views.

use bevy_ecs::prelude::Component;
use serde::{Deserialize, Serialize};

/// Plain 2D vector in field units.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vector2 {
    pub x: f32,
    pub y: f32,
}

impl Vector2 {
    pub const fn new(x: f32, y: f32) -> Self {
        Vector2 { x, y }
    }

    /// Euclidean distance to `other`.
    pub fn distance(self, other: Vector2) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Linearly interpolate towards `other`.
    pub fn lerp(self, other: Vector2, t: f32) -> Vector2 {
        Vector2 {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
        }
    }
}

/// Position of an entity. A mover without this component has not been placed.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct MapPosition {
    pub pos: Vector2,
}

impl MapPosition {
    pub fn new(x: f32, y: f32) -> Self {
        MapPosition {
            pos: Vector2 { x, y },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-6;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn test_distance_345() {
        let a = Vector2::new(0.0, 0.0);
        let b = Vector2::new(3.0, 4.0);
        assert!(approx_eq(a.distance(b), 5.0));
        assert!(approx_eq(b.distance(a), 5.0));
    }

    #[test]
    fn test_lerp_endpoints_and_midpoint() {
        let a = Vector2::new(10.0, -10.0);
        let b = Vector2::new(20.0, 10.0);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        let mid = a.lerp(b, 0.5);
        assert!(approx_eq(mid.x, 15.0));
        assert!(approx_eq(mid.y, 0.0));
    }
}
