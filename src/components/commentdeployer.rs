//! Scrolling comment layer.
//!
//! A [`CommentDeployer`] places comment texts on a [`Canvas`] in horizontal
//! rows, scrolls them left every tick and retires them once they have left
//! the canvas. Views are [`CommentView`] entities parented (`ChildOf`) to the
//! canvas.
//!
//! Row choice: rows `0..floor(height / row_spacing)` are scanned top to
//! bottom; a row is full while any of its views still sticks out past the
//! right edge. The first free row wins. When all are full the comment goes
//! one row below the lowest row in use, without an upper bound.
//!
//! Comments placed in the same pass see each other, so a burst spreads over
//! the free rows. Once the burst has filled every row that fits, the rest are
//! placed against the views that were live before the pass.

use bevy_ecs::prelude::{Component, Entity};

use crate::error::{OnAirError, positive};

/// Drawing area comments scroll across.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct Canvas {
    pub width: f32,
    pub height: f32,
}

impl Canvas {
    pub fn new(width: f32, height: f32) -> Self {
        Canvas { width, height }
    }
}

/// One comment on screen. Its position is the entity's `MapPosition`.
#[derive(Component, Clone, Debug)]
pub struct CommentView {
    pub deployer: Entity,
    pub text: String,
    pub row: u32,
    pub width: f32,
}

#[derive(Component, Debug)]
pub struct CommentDeployer {
    speed: f32,
    row_spacing: f32,
    pub(crate) container: Option<Entity>,
    pub(crate) views: Vec<Entity>,
    pub(crate) pending: Vec<String>,
}

impl CommentDeployer {
    /// `speed` is in pixels per tick, `row_spacing` in pixels.
    pub fn new(speed: f32, row_spacing: f32) -> Result<Self, OnAirError> {
        positive("scroll speed", speed as f64)?;
        positive("row spacing", row_spacing as f64)?;
        Ok(CommentDeployer {
            speed,
            row_spacing,
            container: None,
            views: Vec::new(),
            pending: Vec::new(),
        })
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn set_speed(&mut self, speed: f32) -> Result<(), OnAirError> {
        positive("scroll speed", speed as f64)?;
        self.speed = speed;
        Ok(())
    }

    pub fn row_spacing(&self) -> f32 {
        self.row_spacing
    }

    pub fn set_row_spacing(&mut self, row_spacing: f32) -> Result<(), OnAirError> {
        positive("row spacing", row_spacing as f64)?;
        self.row_spacing = row_spacing;
        Ok(())
    }

    pub fn container(&self) -> Option<Entity> {
        self.container
    }

    /// Live views, oldest first.
    pub fn views(&self) -> &[Entity] {
        &self.views
    }

    /// Texts queued for placement on the next tick.
    pub fn pending(&self) -> &[String] {
        &self.pending
    }

    /// Number of rows that fit on `canvas`.
    pub fn row_capacity(&self, canvas: Canvas) -> u32 {
        (canvas.height / self.row_spacing).floor().max(0.0) as u32
    }
}

/// A live view as seen by the row scan: `(row, right edge)`.
pub type RowOccupancy = (u32, f32);

/// Pick the row for a new comment given the views currently on screen.
pub fn choose_row(live: &[RowOccupancy], canvas_width: f32, capacity: u32) -> u32 {
    let full = |row: u32| {
        live.iter()
            .any(|&(r, right)| r == row && right > canvas_width)
    };
    if let Some(row) = (0..capacity).find(|&row| !full(row)) {
        return row;
    }
    live.iter()
        .map(|&(row, _)| row)
        .max()
        .map_or(0, |highest| highest + 1)
}

/// Pick the row for one comment of a pass, given the views live before the
/// pass and those already placed during it.
pub fn choose_row_in_pass(
    live: &[RowOccupancy],
    placed: &[RowOccupancy],
    canvas_width: f32,
    capacity: u32,
) -> u32 {
    let scan: Vec<RowOccupancy> = live.iter().chain(placed).copied().collect();
    let row = choose_row(&scan, canvas_width, capacity);
    if row < capacity {
        row
    } else {
        choose_row(live, canvas_width, capacity)
    }
}
