//! Data-driven conditions over [`WorldSignals`].
//!
//! Used as comment predicates: a comment schema is eligible only when all of
//! its conditions hold. Conditions are plain data so comment rotations can be
//! loaded from JSON.
//!
//! ```json
//! { "ScalarCmp": { "key": "time_left", "op": "Lt", "value": 10.0 } }
//! { "HasFlag": { "key": "combo" } }
//! ```

use serde::{Deserialize, Serialize};

use crate::resources::worldsignals::WorldSignals;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CmpOp {
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
    Ne,
}

impl CmpOp {
    fn cmp_f32(self, lhs: f32, rhs: f32) -> bool {
        match self {
            CmpOp::Lt => lhs < rhs,
            CmpOp::Le => lhs <= rhs,
            CmpOp::Gt => lhs > rhs,
            CmpOp::Ge => lhs >= rhs,
            CmpOp::Eq => (lhs - rhs).abs() < f32::EPSILON,
            CmpOp::Ne => (lhs - rhs).abs() >= f32::EPSILON,
        }
    }

    fn cmp_i32(self, lhs: i32, rhs: i32) -> bool {
        match self {
            CmpOp::Lt => lhs < rhs,
            CmpOp::Le => lhs <= rhs,
            CmpOp::Gt => lhs > rhs,
            CmpOp::Ge => lhs >= rhs,
            CmpOp::Eq => lhs == rhs,
            CmpOp::Ne => lhs != rhs,
        }
    }
}

/// A boolean test over the current signals. Missing keys evaluate to false
/// (except for `LacksFlag`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Condition {
    ScalarCmp { key: String, op: CmpOp, value: f32 },
    ScalarRange { key: String, min: f32, max: f32, inclusive: bool },
    IntegerCmp { key: String, op: CmpOp, value: i32 },
    IntegerRange { key: String, min: i32, max: i32, inclusive: bool },
    StringEq { key: String, value: String },
    HasFlag { key: String },
    LacksFlag { key: String },
    All(Vec<Condition>),
    Any(Vec<Condition>),
    Not(Box<Condition>),
}

impl Condition {
    pub fn has_flag(key: impl Into<String>) -> Self {
        Condition::HasFlag { key: key.into() }
    }

    pub fn lacks_flag(key: impl Into<String>) -> Self {
        Condition::LacksFlag { key: key.into() }
    }

    pub fn integer(key: impl Into<String>, op: CmpOp, value: i32) -> Self {
        Condition::IntegerCmp {
            key: key.into(),
            op,
            value,
        }
    }

    pub fn scalar(key: impl Into<String>, op: CmpOp, value: f32) -> Self {
        Condition::ScalarCmp {
            key: key.into(),
            op,
            value,
        }
    }

    pub fn evaluate(&self, signals: &WorldSignals) -> bool {
        match self {
            Condition::ScalarCmp { key, op, value } => signals
                .get_scalar(key)
                .is_some_and(|v| op.cmp_f32(v, *value)),
            Condition::ScalarRange {
                key,
                min,
                max,
                inclusive,
            } => signals.get_scalar(key).is_some_and(|v| {
                if *inclusive {
                    v >= *min && v <= *max
                } else {
                    v > *min && v < *max
                }
            }),
            Condition::IntegerCmp { key, op, value } => signals
                .get_integer(key)
                .is_some_and(|v| op.cmp_i32(v, *value)),
            Condition::IntegerRange {
                key,
                min,
                max,
                inclusive,
            } => signals.get_integer(key).is_some_and(|v| {
                if *inclusive {
                    v >= *min && v <= *max
                } else {
                    v > *min && v < *max
                }
            }),
            Condition::StringEq { key, value } => signals.get_string(key) == Some(value.as_str()),
            Condition::HasFlag { key } => signals.has_flag(key),
            Condition::LacksFlag { key } => !signals.has_flag(key),
            Condition::All(conditions) => conditions.iter().all(|c| c.evaluate(signals)),
            Condition::Any(conditions) => conditions.iter().any(|c| c.evaluate(signals)),
            Condition::Not(cond) => !cond.evaluate(signals),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signals() -> WorldSignals {
        let mut s = WorldSignals::default();
        s.set_scalar("time_left", 5.0);
        s.set_integer("score", 30);
        s.set_string("scene", "night");
        s.set_flag("combo");
        s
    }

    #[test]
    fn test_scalar_cmp() {
        let s = signals();
        assert!(Condition::scalar("time_left", CmpOp::Lt, 10.0).evaluate(&s));
        assert!(!Condition::scalar("time_left", CmpOp::Gt, 10.0).evaluate(&s));
        assert!(Condition::scalar("time_left", CmpOp::Eq, 5.0).evaluate(&s));
        assert!(Condition::scalar("time_left", CmpOp::Ne, 4.0).evaluate(&s));
    }

    #[test]
    fn test_missing_key_is_false() {
        let s = WorldSignals::default();
        assert!(!Condition::scalar("nope", CmpOp::Ne, 1.0).evaluate(&s));
        assert!(!Condition::integer("nope", CmpOp::Ne, 1).evaluate(&s));
        assert!(!Condition::has_flag("nope").evaluate(&s));
        assert!(Condition::lacks_flag("nope").evaluate(&s));
    }

    #[test]
    fn test_integer_range_inclusive_and_exclusive() {
        let s = signals();
        let inclusive = Condition::IntegerRange {
            key: "score".into(),
            min: 10,
            max: 30,
            inclusive: true,
        };
        let exclusive = Condition::IntegerRange {
            key: "score".into(),
            min: 10,
            max: 30,
            inclusive: false,
        };
        assert!(inclusive.evaluate(&s));
        assert!(!exclusive.evaluate(&s));
    }

    #[test]
    fn test_string_eq() {
        let s = signals();
        let night = Condition::StringEq {
            key: "scene".into(),
            value: "night".into(),
        };
        let day = Condition::StringEq {
            key: "scene".into(),
            value: "day".into(),
        };
        assert!(night.evaluate(&s));
        assert!(!day.evaluate(&s));
    }

    #[test]
    fn test_combinators() {
        let s = signals();
        let all = Condition::All(vec![
            Condition::has_flag("combo"),
            Condition::integer("score", CmpOp::Ge, 30),
        ]);
        let any = Condition::Any(vec![
            Condition::has_flag("fever"),
            Condition::integer("score", CmpOp::Eq, 30),
        ]);
        assert!(all.evaluate(&s));
        assert!(any.evaluate(&s));
        assert!(!Condition::Not(Box::new(all)).evaluate(&s));
        assert!(Condition::All(vec![]).evaluate(&s));
        assert!(!Condition::Any(vec![]).evaluate(&s));
    }

    #[test]
    fn test_deserialize_from_json() {
        let c: Condition =
            serde_json::from_str(r#"{"ScalarCmp":{"key":"time_left","op":"Le","value":5.0}}"#)
                .unwrap();
        assert!(c.evaluate(&signals()));
    }
}
