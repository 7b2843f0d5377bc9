//! Timed, condition-gated comment generator.
//!
//! A [`CommentSupplier`] owns a fixed rotation of [`CommentSchema`]s and a
//! virtual clock that advances `1000 / fps` milliseconds per tick. Every
//! `interval_ms` of accumulated budget buys one slot; each slot emits the
//! first schema, starting at the rotation cursor, whose predicates all pass.
//! A slot that finds no passing schema after a full rotation emits nothing.
//!
//! Emitted texts are pushed to the subscribed deployers by
//! [`crate::systems::comment::comment_supply_system`].

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use bevy_ecs::prelude::{Component, Entity};
use serde::{Deserialize, Serialize};

use crate::components::condition::Condition;
use crate::error::{OnAirError, positive};
use crate::resources::worldsignals::WorldSignals;

/// Snapshot handed to predicates.
pub struct CommentContext<'a> {
    pub signals: &'a WorldSignals,
    /// Virtual milliseconds elapsed on the supplier's clock.
    pub elapsed_ms: f64,
}

pub type CommentFn = dyn Fn(&CommentContext<'_>) -> bool + Send + Sync;

#[derive(Clone)]
pub enum CommentPredicate {
    Rule(Condition),
    Custom(Arc<CommentFn>),
}

impl CommentPredicate {
    pub fn test(&self, ctx: &CommentContext<'_>) -> bool {
        match self {
            CommentPredicate::Rule(cond) => cond.evaluate(ctx.signals),
            CommentPredicate::Custom(f) => f(ctx),
        }
    }
}

impl fmt::Debug for CommentPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommentPredicate::Rule(cond) => f.debug_tuple("Rule").field(cond).finish(),
            CommentPredicate::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Immutable comment text plus the predicates gating it (AND semantics).
#[derive(Clone, Debug)]
pub struct CommentSchema {
    text: String,
    predicates: Vec<CommentPredicate>,
}

impl CommentSchema {
    pub fn new(text: impl Into<String>) -> Self {
        CommentSchema {
            text: text.into(),
            predicates: Vec::new(),
        }
    }

    pub fn when(mut self, cond: Condition) -> Self {
        self.predicates.push(CommentPredicate::Rule(cond));
        self
    }

    pub fn when_fn(
        mut self,
        f: impl Fn(&CommentContext<'_>) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.predicates.push(CommentPredicate::Custom(Arc::new(f)));
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn predicates(&self) -> &[CommentPredicate] {
        &self.predicates
    }

    pub fn passes(&self, ctx: &CommentContext<'_>) -> bool {
        self.predicates.iter().all(|p| p.test(ctx))
    }
}

#[derive(Component, Debug)]
pub struct CommentSupplier {
    schemas: Vec<CommentSchema>,
    cursor: usize,
    budget_ms: f64,
    elapsed_ms: f64,
    interval_ms: f64,
    fps: f64,
    pub(crate) deployers: Vec<Entity>,
}

impl CommentSupplier {
    pub fn new(schemas: Vec<CommentSchema>, interval_ms: f64, fps: f64) -> Result<Self, OnAirError> {
        positive("comment interval", interval_ms)?;
        positive("fps", fps)?;
        Ok(CommentSupplier {
            schemas,
            cursor: 0,
            budget_ms: 0.0,
            elapsed_ms: 0.0,
            interval_ms,
            fps,
            deployers: Vec::new(),
        })
    }

    pub fn schemas(&self) -> &[CommentSchema] {
        &self.schemas
    }

    /// Index of the schema tried first on the next slot.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn budget_ms(&self) -> f64 {
        self.budget_ms
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed_ms
    }

    pub fn interval_ms(&self) -> f64 {
        self.interval_ms
    }

    pub fn fps(&self) -> f64 {
        self.fps
    }

    pub fn set_interval_ms(&mut self, interval_ms: f64) -> Result<(), OnAirError> {
        self.interval_ms = positive("comment interval", interval_ms)?;
        Ok(())
    }

    pub fn set_fps(&mut self, fps: f64) -> Result<(), OnAirError> {
        self.fps = positive("fps", fps)?;
        Ok(())
    }

    /// Milliseconds added to the budget per tick.
    pub fn frame_ms(&self) -> f64 {
        1000.0 / self.fps
    }

    pub fn deployers(&self) -> &[Entity] {
        &self.deployers
    }

    /// Process one tick and return the texts emitted during it.
    ///
    /// Slots are consumed while the budget covers an interval; the tick's
    /// `1000 / fps` step is added after processing, so the first tick never
    /// emits.
    pub fn fetch(&mut self, signals: &WorldSignals) -> Vec<String> {
        let mut emitted = Vec::new();
        while self.budget_ms >= self.interval_ms {
            self.budget_ms -= self.interval_ms;
            if let Some(text) = self.next_passing(signals) {
                emitted.push(text);
            }
        }
        let step = self.frame_ms();
        self.budget_ms += step;
        self.elapsed_ms += step;
        emitted
    }

    /// Walk the rotation from the cursor until a schema passes or the walk
    /// returns to where it started.
    fn next_passing(&mut self, signals: &WorldSignals) -> Option<String> {
        let len = self.schemas.len();
        if len == 0 {
            return None;
        }
        let ctx = CommentContext {
            signals,
            elapsed_ms: self.elapsed_ms,
        };
        let tail = self.cursor;
        loop {
            let index = self.cursor;
            self.cursor = (self.cursor + 1) % len;
            if self.schemas[index].passes(&ctx) {
                return Some(self.schemas[index].text.clone());
            }
            if self.cursor == tail {
                return None;
            }
        }
    }
}

/// JSON form of a comment rotation.
///
/// ```json
/// { "comments": [
///     { "text": "nice!" },
///     { "text": "hurry up", "when": [ { "ScalarCmp": { "key": "time_left", "op": "Lt", "value": 10.0 } } ] }
/// ] }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommentScript {
    pub comments: Vec<CommentEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentEntry {
    pub text: String,
    #[serde(default)]
    pub when: Vec<Condition>,
}

impl CommentScript {
    pub fn from_json(json: &str) -> Result<Self, OnAirError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, OnAirError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| OnAirError::Config(format!("failed to read {}: {}", path.display(), e)))?;
        Self::from_json(&text)
    }

    pub fn into_schemas(self) -> Vec<CommentSchema> {
        self.comments
            .into_iter()
            .map(|entry| {
                entry
                    .when
                    .into_iter()
                    .fold(CommentSchema::new(entry.text), CommentSchema::when)
            })
            .collect()
    }
}
