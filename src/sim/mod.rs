//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (left paddle before right)
//! - No rendering or platform dependencies

pub mod collision;
pub mod config;
pub mod controller;
pub mod physics;
pub mod state;
pub mod tick;

pub use collision::{collide_with_paddle, return_angle, segment_hit};
pub use config::{ConfigError, GameConfig};
pub use controller::{
    ball_out_of_bounds, enable_boundaries, enable_paddles, init_physics, move_paddles, new_match,
    reset_ball, reset_scores, start_ball, start_demo, start_game,
};
pub use physics::{ArcadePhysics, Body, BoundaryChecks, BoundsEvent, Physics};
pub use state::{Ball, MatchEvent, MatchPhase, MatchState, Paddle, Score, Side};
pub use tick::{PaddleCommand, TickInput, tick};
