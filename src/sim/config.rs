//! Match configuration
//!
//! Computed once at startup from the screen size. Everything the simulation
//! needs to know about layout and tuning lives here so it can be passed
//! explicitly instead of read from globals.

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::input::KeyBindings;

/// Largest accepted play field side
const MAX_SCREEN_SIZE: f32 = 16384.0;
/// Most hit zones accepted on each side of a paddle's center
const MAX_PADDLE_SEGMENTS: i32 = 64;

/// Startup configuration problems
#[derive(Debug)]
pub enum ConfigError {
    /// JSON could not be parsed into a config
    Parse(serde_json::Error),
    /// A field holds a value the match cannot run with
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Parse(e) => write!(f, "config parse error: {}", e),
            ConfigError::Invalid(what) => write!(f, "invalid config: {}", what),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Parse(e) => Some(e),
            ConfigError::Invalid(_) => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}

/// Layout and tuning for one match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub screen_width: f32,
    pub screen_height: f32,
    /// Center line dash length
    pub dash_size: f32,

    pub paddle_left_x: f32,
    pub paddle_right_x: f32,
    /// Vertical paddle speed (units/sec)
    pub paddle_velocity: f32,
    /// Number of hit zones on each half of a paddle
    pub paddle_segments_max: i32,
    pub paddle_segment_height: f32,
    /// Return angle added per hit zone (degrees)
    pub paddle_segment_angle: f32,
    pub paddle_size: Vec2,

    pub ball_size: Vec2,
    /// Ball speed (units/sec), constant for the whole rally
    pub ball_velocity: f32,
    /// Delay between a reset and the serve (seconds)
    pub ball_start_delay: f32,
    /// Serve headings toward the left side (degrees)
    pub serve_angles_left: Vec<f32>,
    /// Serve headings toward the right side (degrees)
    pub serve_angles_right: Vec<f32>,

    pub score_to_win: u32,
    pub score_left_x: f32,
    pub score_right_x: f32,
    pub score_top_y: f32,
    pub score_font_size: f32,

    #[serde(default)]
    pub keys: KeyBindings,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::from_screen(WINDOW_WIDTH * SCREEN_FILL, WINDOW_HEIGHT * SCREEN_FILL)
    }
}

impl GameConfig {
    /// Derive a config for a play field of the given size
    pub fn from_screen(width: f32, height: f32) -> Self {
        Self {
            screen_width: width,
            screen_height: height,
            dash_size: DASH_SIZE,

            paddle_left_x: PADDLE_LEFT_X * width,
            paddle_right_x: PADDLE_RIGHT_X * width,
            paddle_velocity: PADDLE_VELOCITY,
            paddle_segments_max: PADDLE_SEGMENTS_MAX,
            paddle_segment_height: PADDLE_SEGMENT_HEIGHT,
            paddle_segment_angle: PADDLE_SEGMENT_ANGLE,
            paddle_size: Vec2::new(PADDLE_WIDTH, PADDLE_HEIGHT),

            ball_size: Vec2::splat(BALL_SIZE),
            ball_velocity: BALL_VELOCITY,
            ball_start_delay: BALL_START_DELAY,
            serve_angles_left: SERVE_ANGLES_LEFT.to_vec(),
            serve_angles_right: SERVE_ANGLES_RIGHT.to_vec(),

            score_to_win: SCORE_TO_WIN,
            score_left_x: SCORE_LEFT_X * width,
            score_right_x: SCORE_RIGHT_X * width,
            score_top_y: SCORE_TOP_Y * width,
            score_font_size: SCORE_FONT_SIZE,

            keys: KeyBindings::default(),
        }
    }

    /// Parse and validate a JSON config
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the match cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let scalars = [
            self.screen_width,
            self.screen_height,
            self.dash_size,
            self.paddle_left_x,
            self.paddle_right_x,
            self.paddle_velocity,
            self.paddle_segment_height,
            self.paddle_segment_angle,
            self.ball_velocity,
            self.ball_start_delay,
            self.score_left_x,
            self.score_right_x,
            self.score_top_y,
            self.score_font_size,
        ];
        let vectors = [self.paddle_size, self.ball_size];
        let angles = self.serve_angles_left.iter().chain(&self.serve_angles_right);
        if !scalars.iter().chain(angles).all(|v| v.is_finite())
            || !vectors.iter().all(|v| v.is_finite())
        {
            return Err(ConfigError::Invalid("numbers must be finite"));
        }

        let screen = 1.0..=MAX_SCREEN_SIZE;
        if !(screen.contains(&self.screen_width) && screen.contains(&self.screen_height)) {
            return Err(ConfigError::Invalid("screen size must be within 1..=16384"));
        }
        if !(self.dash_size > 0.0) {
            return Err(ConfigError::Invalid("dash_size must be positive"));
        }
        if !(1..=MAX_PADDLE_SEGMENTS).contains(&self.paddle_segments_max) {
            return Err(ConfigError::Invalid("paddle_segments_max must be within 1..=64"));
        }
        if !(self.paddle_segment_height > 0.0) {
            return Err(ConfigError::Invalid("paddle_segment_height must be positive"));
        }
        if !(0.0..=90.0).contains(&self.paddle_segment_angle) {
            return Err(ConfigError::Invalid("paddle_segment_angle must be within 0..=90"));
        }
        if !(self.paddle_size.min_element() > 0.0 && self.ball_size.min_element() > 0.0) {
            return Err(ConfigError::Invalid("sprite sizes must be positive"));
        }
        if self.paddle_velocity < 0.0 || self.ball_velocity < 0.0 {
            return Err(ConfigError::Invalid("velocities must not be negative"));
        }
        if self.score_to_win == 0 {
            return Err(ConfigError::Invalid("score_to_win must be at least 1"));
        }
        if self.serve_angles_left.is_empty() || self.serve_angles_right.is_empty() {
            return Err(ConfigError::Invalid("serve angle lists must not be empty"));
        }
        if self
            .serve_angles_left
            .iter()
            .chain(&self.serve_angles_right)
            .any(|a| !(-360.0..=360.0).contains(a))
        {
            return Err(ConfigError::Invalid("serve angles must be within -360..=360"));
        }
        if self.ball_start_delay < 0.0 {
            return Err(ConfigError::Invalid("ball_start_delay must not be negative"));
        }
        Ok(())
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.screen_width * 0.5, self.screen_height * 0.5)
    }
}
