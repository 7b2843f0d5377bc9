//! Text size estimation for comment layout.
//!
//! Font rendering belongs to the host engine; the core only needs the width
//! of a comment to decide when it has scrolled clear of the canvas edges.

use bevy_ecs::prelude::Resource;

#[derive(Resource, Clone, Copy, Debug)]
pub struct TextMetrics {
    /// Advance of one character in pixels.
    pub glyph_width: f32,
}

impl Default for TextMetrics {
    fn default() -> Self {
        TextMetrics { glyph_width: 16.0 }
    }
}

impl TextMetrics {
    pub fn measure(&self, text: &str) -> f32 {
        text.chars().count() as f32 * self.glyph_width
    }
}
