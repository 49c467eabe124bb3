//! Pong Classic - two paddles, one ball, first to eleven
//!
//! Core modules:
//! - `sim`: Deterministic simulation (config, physics, collisions, match flow)
//! - `scene`: Scene port the simulation is mirrored into
//! - `renderer`: Display list and WebGPU rendering pipeline
//! - `input`: Key bindings and held-key tracking
//! - `game`: Frame driver tying the simulation to a scene

pub mod game;
pub mod input;
pub mod renderer;
pub mod scene;
pub mod sim;

pub use game::Game;
pub use sim::GameConfig;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz keeps the ball from skipping a paddle)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame delta fed to the accumulator
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Window the original layout was tuned for; the play field is 95% of it
    pub const WINDOW_WIDTH: f32 = 640.0;
    pub const WINDOW_HEIGHT: f32 = 480.0;
    pub const SCREEN_FILL: f32 = 0.95;

    /// Center line dash length (gap is the same length)
    pub const DASH_SIZE: f32 = 5.0;
    pub const CENTER_LINE_WIDTH: f32 = 2.0;

    /// Paddle defaults
    pub const PADDLE_LEFT_X: f32 = 0.08; // fraction of screen width
    pub const PADDLE_RIGHT_X: f32 = 0.92;
    pub const PADDLE_VELOCITY: f32 = 600.0;
    pub const PADDLE_SEGMENTS_MAX: i32 = 4;
    pub const PADDLE_SEGMENT_HEIGHT: f32 = 4.0;
    pub const PADDLE_SEGMENT_ANGLE: f32 = 15.0; // degrees
    pub const PADDLE_WIDTH: f32 = 8.0;
    pub const PADDLE_HEIGHT: f32 = 32.0;

    /// Ball defaults
    pub const BALL_SIZE: f32 = 8.0;
    pub const BALL_VELOCITY: f32 = 500.0;
    pub const BALL_START_DELAY: f32 = 2.0; // seconds
    pub const SERVE_ANGLES_LEFT: [f32; 2] = [-120.0, 120.0];
    pub const SERVE_ANGLES_RIGHT: [f32; 2] = [-60.0, 60.0];

    /// Match
    pub const SCORE_TO_WIN: u32 = 11;

    /// Score text layout
    pub const SCORE_LEFT_X: f32 = 0.25; // fraction of screen width
    pub const SCORE_RIGHT_X: f32 = 0.75;
    pub const SCORE_TOP_Y: f32 = 0.1; // fraction of screen width, not height
    pub const SCORE_FONT_SIZE: f32 = 80.0;
}

/// Wrap an angle in degrees into (-180, 180]
#[inline]
pub fn wrap_degrees(angle: f32) -> f32 {
    let wrapped = (angle + 180.0).rem_euclid(360.0) - 180.0;
    if wrapped <= -180.0 { 180.0 } else { wrapped }
}

/// Velocity vector for a heading in degrees (0 = right, 90 = down in screen space)
#[inline]
pub fn velocity_from_angle(angle_deg: f32, speed: f32) -> Vec2 {
    let rad = angle_deg.to_radians();
    Vec2::new(rad.cos() * speed, rad.sin() * speed)
}
