//! Match flow: attract mode, serves, scoring and the win condition
//!
//! Free functions over an explicit `MatchState`, `GameConfig` and physics
//! port. Nothing here touches the scene; the host mirrors state into it from
//! the recorded `MatchEvent`s.

use glam::Vec2;
use rand::Rng;

use super::config::GameConfig;
use super::physics::{BoundaryChecks, Physics};
use super::state::{MatchEvent, MatchPhase, MatchState, Side};
use super::tick::TickInput;

/// Build a match, configure its bodies and enter attract mode
pub fn new_match<P: Physics + ?Sized>(config: &GameConfig, physics: &mut P, seed: u64) -> MatchState {
    let mut state = MatchState::new(config, seed);
    init_physics(&mut state, physics);
    start_demo(&mut state, config, physics);
    state
}

/// Ball: elastic, reports leaving the world.
/// Paddles: clamped to the world, no bounce.
/// Overlaps never push either body; only the ball's velocity changes on a hit.
pub fn init_physics<P: Physics + ?Sized>(state: &mut MatchState, physics: &mut P) {
    physics.set_boundary_checks(BoundaryChecks::default());

    let ball = &mut state.ball.body;
    ball.enabled = true;
    ball.check_world_bounds = true;
    ball.collide_world_bounds = true;
    ball.bounce = 1.0;

    for paddle in state.paddles.iter_mut() {
        let body = &mut paddle.body;
        body.check_world_bounds = true;
        body.collide_world_bounds = true;
        body.bounce = 0.0;
    }
}

/// Enter attract mode: hidden paddles, ball bouncing off all four walls
pub fn start_demo<P: Physics + ?Sized>(state: &mut MatchState, config: &GameConfig, physics: &mut P) {
    reset_ball(state, config);
    enable_paddles(state, false);
    enable_boundaries(physics, true);
    state.phase = MatchPhase::Demo;
    state.push_event(MatchEvent::DemoStarted);
    log::info!("Demo started - press to play");
}

/// Start a match from attract mode. Returns false if one is already running.
pub fn start_game<P: Physics + ?Sized>(
    state: &mut MatchState,
    config: &GameConfig,
    physics: &mut P,
) -> bool {
    if state.phase != MatchPhase::Demo {
        return false;
    }

    state.phase = MatchPhase::Active;
    enable_paddles(state, true);
    enable_boundaries(physics, false);
    reset_ball(state, config);
    reset_scores(state);
    state.push_event(MatchEvent::MatchStarted);
    log::info!("Match started (first to {})", config.score_to_win);
    true
}

/// Hide the ball at the center line, random height, and arm the serve timer.
/// Re-arming replaces any pending serve.
pub fn reset_ball(state: &mut MatchState, config: &GameConfig) {
    let y = state.rng.random_range(0.0..=config.screen_height);
    let pos = Vec2::new(config.screen_width * 0.5, y);
    state.ball.body.reset(pos);
    state.ball.visible = false;
    state.serve_timer = Some(config.ball_start_delay);
    state.push_event(MatchEvent::ServePending);
    log::debug!("Ball reset to y={:.1}, serving in {}s", y, config.ball_start_delay);
}

/// Show the ball and launch it.
///
/// With no miss yet the heading comes from both serve lists; afterwards it
/// comes from the list belonging to the side that missed last.
pub fn start_ball<P: Physics + ?Sized>(state: &mut MatchState, config: &GameConfig, physics: &P) {
    state.ball.visible = true;
    state.serve_timer = None;

    let angle = {
        let candidates: Vec<f32> = match state.missed_side {
            None => config
                .serve_angles_right
                .iter()
                .chain(config.serve_angles_left.iter())
                .copied()
                .collect(),
            Some(Side::Right) => config.serve_angles_right.clone(),
            Some(Side::Left) => config.serve_angles_left.clone(),
        };
        if candidates.is_empty() {
            0.0
        } else {
            candidates[state.rng.random_range(0..candidates.len())]
        }
    };

    state.ball.body.vel = physics.velocity_from_angle(angle, config.ball_velocity);
    state.push_event(MatchEvent::BallLaunched { angle });
    log::debug!("Ball launched at {}°", angle);
}

/// Paddle visibility, collision and input always switch together
pub fn enable_paddles(state: &mut MatchState, enabled: bool) {
    for paddle in state.paddles.iter_mut() {
        paddle.set_enabled(enabled);
    }
}

/// Open or close the left/right walls. Top and bottom always stay closed.
pub fn enable_boundaries<P: Physics + ?Sized>(physics: &mut P, enabled: bool) {
    let mut checks = physics.boundary_checks();
    checks.left = enabled;
    checks.right = enabled;
    physics.set_boundary_checks(checks);
}

/// Set paddle velocities from the held keys. Up wins over down.
pub fn move_paddles(state: &mut MatchState, config: &GameConfig, input: &TickInput) {
    for paddle in state.paddles.iter_mut() {
        paddle.body.vel.x = 0.0;
        if !paddle.input_enabled {
            paddle.body.vel.y = 0.0;
            continue;
        }

        let command = input.command(paddle.side);
        paddle.body.vel.y = if command.up {
            -config.paddle_velocity
        } else if command.down {
            config.paddle_velocity
        } else {
            0.0
        };
    }
}

/// Ball left the court: award the point, then serve again or end the match
pub fn ball_out_of_bounds<P: Physics + ?Sized>(
    state: &mut MatchState,
    config: &GameConfig,
    physics: &mut P,
) {
    if state.phase != MatchPhase::Active {
        log::debug!("Ignoring out-of-bounds outside a match");
        return;
    }

    let x = state.ball.pos().x;
    let missed = if x < 0.0 {
        Some(Side::Left)
    } else if x > config.screen_width {
        Some(Side::Right)
    } else {
        None
    };

    if let Some(missed) = missed {
        let scorer = missed.opponent();
        state.missed_side = Some(missed);
        state.score.increment(scorer);
        state.push_event(MatchEvent::Scored { scorer, missed });
        log::info!(
            "{:?} scores ({} - {})",
            scorer,
            state.score.left,
            state.score.right
        );
    }

    state.push_event(MatchEvent::ScoreChanged(state.score));

    if let Some(winner) = state.score.winner(config.score_to_win) {
        state.push_event(MatchEvent::MatchWon {
            winner,
            score: state.score,
        });
        log::info!(
            "{:?} wins {} - {}",
            winner,
            state.score.left,
            state.score.right
        );
        start_demo(state, config, physics);
    } else {
        reset_ball(state, config);
    }
}

pub fn reset_scores(state: &mut MatchState) {
    state.score.reset();
    state.push_event(MatchEvent::ScoreChanged(state.score));
}
