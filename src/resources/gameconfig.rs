//! Game configuration resource.
//!
//! Caller-owned defaults for movers and the comment pipeline, loaded from an
//! INI file. Spawn helpers take the values they need from a `GameConfig`
//! passed in explicitly; there is no global "last used" configuration.
//!
//! # Configuration File Format
//!
//! ```ini
//! [mover]
//! speed = 240
//! easing = quad_in_out
//!
//! [comments]
//! interval_ms = 1200
//! fps = 60
//! scroll_speed = 3
//! row_spacing = 32
//! glyph_width = 16
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::info;
use std::path::PathBuf;

use crate::components::travel::Easing;
use crate::error::{OnAirError, positive, positive_f32};

/// Default safe values for startup
const DEFAULT_MOVER_SPEED: f32 = 240.0;
const DEFAULT_COMMENT_INTERVAL_MS: f64 = 1200.0;
const DEFAULT_COMMENT_FPS: f64 = 60.0;
const DEFAULT_SCROLL_SPEED: f32 = 3.0;
const DEFAULT_ROW_SPACING: f32 = 32.0;
const DEFAULT_GLYPH_WIDTH: f32 = 16.0;
const DEFAULT_CONFIG_PATH: &str = "./onair.ini";

#[derive(Resource, Debug, Clone)]
pub struct GameConfig {
    /// Mover speed in field units per second.
    pub mover_speed: f32,
    pub mover_easing: Easing,
    /// Milliseconds between comment slots.
    pub comment_interval_ms: f64,
    /// Ticks per second assumed by the comment scheduler.
    pub comment_fps: f64,
    /// Pixels a comment scrolls left per tick.
    pub scroll_speed: f32,
    /// Vertical distance between comment rows.
    pub row_spacing: f32,
    pub glyph_width: f32,
    pub config_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl GameConfig {
    pub fn new() -> Self {
        Self {
            mover_speed: DEFAULT_MOVER_SPEED,
            mover_easing: Easing::default(),
            comment_interval_ms: DEFAULT_COMMENT_INTERVAL_MS,
            comment_fps: DEFAULT_COMMENT_FPS,
            scroll_speed: DEFAULT_SCROLL_SPEED,
            row_spacing: DEFAULT_ROW_SPACING,
            glyph_width: DEFAULT_GLYPH_WIDTH,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file at `config_path`.
    ///
    /// Missing values keep their current values. On any invalid value the
    /// whole load is rejected and `self` is left untouched.
    pub fn load_from_file(&mut self) -> Result<(), OnAirError> {
        let mut ini = Ini::new();
        ini.load(&self.config_path)
            .map_err(|e| OnAirError::Config(format!("failed to load config file: {}", e)))?;
        self.apply(&ini)?;
        info!(
            "Loaded config from {:?}: speed={}, easing={}, interval={}ms, fps={}, scroll={}, rows={}px",
            self.config_path,
            self.mover_speed,
            self.mover_easing.name(),
            self.comment_interval_ms,
            self.comment_fps,
            self.scroll_speed,
            self.row_spacing
        );
        Ok(())
    }

    /// Load configuration from INI text.
    pub fn load_from_str(&mut self, text: &str) -> Result<(), OnAirError> {
        let mut ini = Ini::new();
        ini.read(text.to_string())
            .map_err(|e| OnAirError::Config(format!("failed to parse config: {}", e)))?;
        self.apply(&ini)
    }

    fn apply(&mut self, ini: &Ini) -> Result<(), OnAirError> {
        let mut next = self.clone();

        if let Some(v) = float(ini, "mover", "speed")? {
            next.mover_speed = positive_f32("mover speed", v)?;
        }
        if let Some(name) = ini.get("mover", "easing") {
            next.mover_easing = Easing::from_name(&name)
                .ok_or_else(|| OnAirError::Config(format!("unknown easing `{}`", name)))?;
        }
        if let Some(v) = float(ini, "comments", "interval_ms")? {
            next.comment_interval_ms = positive("comment interval", v)?;
        }
        if let Some(v) = float(ini, "comments", "fps")? {
            next.comment_fps = positive("fps", v)?;
        }
        if let Some(v) = float(ini, "comments", "scroll_speed")? {
            next.scroll_speed = positive_f32("scroll speed", v)?;
        }
        if let Some(v) = float(ini, "comments", "row_spacing")? {
            next.row_spacing = positive_f32("row spacing", v)?;
        }
        if let Some(v) = float(ini, "comments", "glyph_width")? {
            next.glyph_width = positive_f32("glyph width", v)?;
        }

        *self = next;
        Ok(())
    }

    /// Save configuration to the INI file. Creates the file if needed.
    pub fn save_to_file(&self) -> Result<(), OnAirError> {
        let mut ini = Ini::new();

        ini.set("mover", "speed", Some(self.mover_speed.to_string()));
        ini.set("mover", "easing", Some(self.mover_easing.name().to_string()));

        ini.set(
            "comments",
            "interval_ms",
            Some(self.comment_interval_ms.to_string()),
        );
        ini.set("comments", "fps", Some(self.comment_fps.to_string()));
        ini.set("comments", "scroll_speed", Some(self.scroll_speed.to_string()));
        ini.set("comments", "row_spacing", Some(self.row_spacing.to_string()));
        ini.set("comments", "glyph_width", Some(self.glyph_width.to_string()));

        ini.write(&self.config_path)
            .map_err(|e| OnAirError::Config(format!("failed to save config file: {}", e)))?;

        info!("Saved config to {:?}", self.config_path);
        Ok(())
    }
}

fn float(ini: &Ini, section: &str, key: &str) -> Result<Option<f64>, OnAirError> {
    ini.getfloat(section, key)
        .map_err(|e| OnAirError::Config(format!("[{}] {}: {}", section, key, e)))
}
