//! Game-wide values that comment conditions are evaluated against.
//!
//! The game writes its state here (score, remaining time, flags such as
//! `"combo"`) and every [`Condition`](crate::components::condition::Condition)
//! of a comment schema reads the snapshot at the moment the supplier ticks.

use bevy_ecs::prelude::Resource;
use rustc_hash::{FxHashMap, FxHashSet};

#[derive(Debug, Clone, Default, Resource)]
pub struct WorldSignals {
    scalars: FxHashMap<String, f32>,
    integers: FxHashMap<String, i32>,
    strings: FxHashMap<String, String>,
    /// A key being present means "true".
    flags: FxHashSet<String>,
}

impl WorldSignals {
    pub fn set_scalar(&mut self, key: impl Into<String>, value: f32) {
        self.scalars.insert(key.into(), value);
    }
    pub fn get_scalar(&self, key: &str) -> Option<f32> {
        self.scalars.get(key).copied()
    }
    pub fn set_integer(&mut self, key: impl Into<String>, value: i32) {
        self.integers.insert(key.into(), value);
    }
    pub fn get_integer(&self, key: &str) -> Option<i32> {
        self.integers.get(key).copied()
    }
    /// Add `by` to an integer signal, starting from zero when absent.
    pub fn add_integer(&mut self, key: impl Into<String>, by: i32) -> i32 {
        let v = self.integers.entry(key.into()).or_insert(0);
        *v += by;
        *v
    }
    pub fn set_string(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.strings.insert(key.into(), value.into());
    }
    pub fn get_string(&self, key: &str) -> Option<&str> {
        self.strings.get(key).map(String::as_str)
    }
    pub fn set_flag(&mut self, key: impl Into<String>) {
        self.flags.insert(key.into());
    }
    pub fn clear_flag(&mut self, key: &str) {
        self.flags.remove(key);
    }
    pub fn has_flag(&self, key: &str) -> bool {
        self.flags.contains(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags() {
        let mut s = WorldSignals::default();
        assert!(!s.has_flag("combo"));
        s.set_flag("combo");
        assert!(s.has_flag("combo"));
        s.clear_flag("combo");
        assert!(!s.has_flag("combo"));
    }

    #[test]
    fn test_add_integer_starts_at_zero() {
        let mut s = WorldSignals::default();
        assert_eq!(s.add_integer("score", 5), 5);
        assert_eq!(s.add_integer("score", -2), 3);
        assert_eq!(s.get_integer("score"), Some(3));
    }

    #[test]
    fn test_scalars_and_strings() {
        let mut s = WorldSignals::default();
        s.set_scalar("time_left", 12.5);
        s.set_string("scene", "stage1");
        assert_eq!(s.get_scalar("time_left"), Some(12.5));
        assert_eq!(s.get_string("scene"), Some("stage1"));
        assert_eq!(s.get_scalar("missing"), None);
    }
}
