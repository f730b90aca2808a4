//! Arena and gameplay settings
//!
//! Loaded once per session (optionally from JSON) and never written back.

use std::f32::consts::FRAC_PI_2;
use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::Side;

/// Errors raised while loading or validating settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid setting `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Court dimensions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaSettings {
    pub width: f32,
    pub height: f32,
}

impl Default for ArenaSettings {
    fn default() -> Self {
        Self {
            width: ARENA_WIDTH,
            height: ARENA_HEIGHT,
        }
    }
}

/// Paddle geometry and speed
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaddleSettings {
    pub width: f32,
    pub height: f32,
    /// Human speed (px/s); CPU speed is this times the profile's speed factor
    pub speed: f32,
    pub inset: f32,
}

impl Default for PaddleSettings {
    fn default() -> Self {
        Self {
            width: PADDLE_WIDTH,
            height: PADDLE_HEIGHT,
            speed: PADDLE_SPEED,
            inset: PADDLE_INSET,
        }
    }
}

/// Ball size and speed bounds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BallSettings {
    pub radius: f32,
    pub start_speed: f32,
    pub max_speed: f32,
    pub speed_increment: f32,
    pub serve_max_angle_deg: f32,
    pub bounce_max_angle: f32,
}

impl Default for BallSettings {
    fn default() -> Self {
        Self {
            radius: BALL_RADIUS,
            start_speed: BALL_START_SPEED,
            max_speed: BALL_MAX_SPEED,
            speed_increment: BALL_SPEED_INCREMENT,
            serve_max_angle_deg: SERVE_MAX_ANGLE_DEG,
            bounce_max_angle: BOUNCE_MAX_ANGLE,
        }
    }
}

/// Center net (drawn by the renderer, no collision)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetSettings {
    pub width: f32,
    pub gap: f32,
}

impl Default for NetSettings {
    fn default() -> Self {
        Self {
            width: NET_WIDTH,
            gap: NET_GAP,
        }
    }
}

/// Power-up spawning and effect
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PowerUpSettings {
    pub radius: f32,
    pub speed_boost: f32,
    pub spawn_chance: f64,
    pub max_active: usize,
    pub spawn_margin: f32,
}

impl Default for PowerUpSettings {
    fn default() -> Self {
        Self {
            radius: POWERUP_RADIUS,
            speed_boost: POWERUP_SPEED_BOOST,
            spawn_chance: POWERUP_SPAWN_CHANCE,
            max_active: POWERUP_MAX_ACTIVE,
            spawn_margin: POWERUP_SPAWN_MARGIN,
        }
    }
}

/// Complete gameplay configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub arena: ArenaSettings,
    pub paddle: PaddleSettings,
    pub ball: BallSettings,
    pub net: NetSettings,
    pub power_ups: PowerUpSettings,
    pub win_score: u32,
    pub max_dt: f32,
    pub trail_length: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            arena: ArenaSettings::default(),
            paddle: PaddleSettings::default(),
            ball: BallSettings::default(),
            net: NetSettings::default(),
            power_ups: PowerUpSettings::default(),
            win_score: WIN_SCORE,
            max_dt: MAX_DT,
            trail_length: TRAIL_LENGTH,
        }
    }
}

impl Settings {
    /// Parse settings from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        log::info!("Loaded settings ({}x{} arena)", settings.arena.width, settings.arena.height);
        Ok(settings)
    }

    /// Read and parse a JSON settings file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Reject configurations the simulation cannot run sensibly
    pub fn validate(&self) -> Result<(), SettingsError> {
        fn invalid(field: &'static str, reason: &'static str) -> Result<(), SettingsError> {
            Err(SettingsError::Invalid { field, reason })
        }

        fn finite_nonneg(value: f32) -> bool {
            value.is_finite() && value >= 0.0
        }

        let (arena, paddle, ball, power_ups) = (self.arena, self.paddle, self.ball, self.power_ups);
        if !(arena.width.is_finite() && arena.width > 0.0)
            || !(arena.height.is_finite() && arena.height > 0.0)
        {
            return invalid("arena", "dimensions must be positive");
        }
        if !(paddle.width.is_finite() && paddle.width > 0.0)
            || !(paddle.height.is_finite() && paddle.height > 0.0)
        {
            return invalid("paddle", "dimensions must be positive");
        }
        if paddle.height >= arena.height {
            return invalid("paddle.height", "must be smaller than the arena height");
        }
        if !finite_nonneg(paddle.speed) {
            return invalid("paddle.speed", "must not be negative");
        }
        if !finite_nonneg(paddle.inset) || paddle.inset >= arena.width / 2.0 - paddle.width {
            return invalid("paddle.inset", "paddles must sit apart inside the arena");
        }
        if !(ball.radius.is_finite() && ball.radius > 0.0) {
            return invalid("ball.radius", "must be positive");
        }
        if !(ball.start_speed.is_finite() && ball.start_speed > 0.0) {
            return invalid("ball.start_speed", "must be positive");
        }
        if !ball.max_speed.is_finite() || ball.max_speed < ball.start_speed {
            return invalid("ball.max_speed", "must be at least ball.start_speed");
        }
        if !finite_nonneg(ball.speed_increment) {
            return invalid("ball.speed_increment", "must not be negative");
        }
        if !finite_nonneg(ball.serve_max_angle_deg) || ball.serve_max_angle_deg >= 90.0 {
            return invalid("ball.serve_max_angle_deg", "must be within [0, 90)");
        }
        if !finite_nonneg(ball.bounce_max_angle) || ball.bounce_max_angle >= FRAC_PI_2 {
            return invalid("ball.bounce_max_angle", "must be within [0, pi/2)");
        }
        if self.win_score == 0 {
            return invalid("win_score", "must be at least 1");
        }
        if !(power_ups.speed_boost.is_finite() && power_ups.speed_boost >= 1.0) {
            return invalid("power_ups.speed_boost", "must be at least 1.0");
        }
        if !(0.0..=1.0).contains(&power_ups.spawn_chance) {
            return invalid("power_ups.spawn_chance", "must be within [0, 1]");
        }
        if !(power_ups.radius.is_finite() && power_ups.radius > 0.0) {
            return invalid("power_ups.radius", "must be positive");
        }
        if !finite_nonneg(power_ups.spawn_margin)
            || power_ups.spawn_margin * 2.0 >= arena.width.min(arena.height)
        {
            return invalid("power_ups.spawn_margin", "must leave room to spawn inside the arena");
        }
        if !(self.max_dt.is_finite() && self.max_dt > 0.0) {
            return invalid("max_dt", "must be positive");
        }
        if self.trail_length == 0 {
            return invalid("trail_length", "must be at least 1");
        }
        Ok(())
    }

    /// Arena center
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.arena.width / 2.0, self.arena.height / 2.0)
    }

    /// Left edge x of a side's paddle (fixed for the session)
    pub fn paddle_x(&self, side: Side) -> f32 {
        match side {
            Side::Left => self.paddle.inset,
            Side::Right => self.arena.width - self.paddle.inset - self.paddle.width,
        }
    }

    /// The x coordinate of the paddle face that looks toward the court
    pub fn paddle_near_face_x(&self, side: Side) -> f32 {
        match side {
            Side::Left => self.paddle_x(side) + self.paddle.width,
            Side::Right => self.paddle_x(side),
        }
    }

    /// Largest legal paddle top edge
    pub fn max_paddle_y(&self) -> f32 {
        self.arena.height - self.paddle.height
    }

    /// Paddle top edge that vertically centers it
    pub fn centered_paddle_y(&self) -> f32 {
        self.arena.height / 2.0 - self.paddle.height / 2.0
    }

    /// Clamp a paddle top edge into the arena
    pub fn clamp_paddle_y(&self, y: f32) -> f32 {
        y.clamp(0.0, self.max_paddle_y())
    }
}
