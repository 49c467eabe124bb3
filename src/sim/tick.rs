//! Fixed timestep simulation tick
//!
//! Core game loop that advances a match deterministically.

use super::collision::collide_with_paddle;
use super::config::GameConfig;
use super::controller::{ball_out_of_bounds, move_paddles, start_ball, start_game};
use super::physics::{BoundsEvent, Physics};
use super::state::{MatchEvent, MatchPhase, MatchState, Side};

/// Slack for the serve countdown so float drift cannot cost a whole tick
const TIMER_EPSILON: f32 = 1e-4;

/// Held state of one paddle's keys
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PaddleCommand {
    pub up: bool,
    pub down: bool,
}

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub left: PaddleCommand,
    pub right: PaddleCommand,
    /// Pointer pressed since the last tick (starts a match from attract mode)
    pub pointer_down: bool,
}

impl TickInput {
    pub fn command(&self, side: Side) -> PaddleCommand {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }
}

/// Advance the match by one fixed timestep
pub fn tick<P: Physics + ?Sized>(
    state: &mut MatchState,
    config: &GameConfig,
    physics: &mut P,
    input: &TickInput,
    dt: f32,
) {
    state.time_ticks += 1;

    // Serve countdown, before anything can re-arm it this tick
    if let Some(remaining) = state.serve_timer {
        let remaining = remaining - dt;
        if remaining <= TIMER_EPSILON {
            start_ball(state, config, physics);
        } else {
            state.serve_timer = Some(remaining);
        }
    }

    if input.pointer_down && state.phase == MatchPhase::Demo {
        start_game(state, config, physics);
    }

    move_paddles(state, config, input);

    for paddle in state.paddles.iter_mut() {
        physics.integrate(&mut paddle.body, dt);
    }
    let bounds_event = physics.integrate(&mut state.ball.body, dt);

    if state.ball.is_live() {
        for index in 0..state.paddles.len() {
            let paddle = &state.paddles[index];
            if !physics.overlaps(&state.ball.body, &paddle.body) {
                continue;
            }
            let side = paddle.side;
            let (segment, angle) = collide_with_paddle(&mut state.ball, paddle, config, &*physics);
            state.push_event(MatchEvent::PaddleHit {
                side,
                segment,
                angle,
            });
            log::debug!("{:?} paddle hit, segment {} -> {}°", side, segment, angle);
            break;
        }
    }

    if bounds_event == Some(BoundsEvent::OutOfBounds) {
        ball_out_of_bounds(state, config, physics);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::sim::controller::new_match;
    use crate::sim::physics::ArcadePhysics;
    use crate::sim::state::Score;
    use glam::Vec2;

    fn setup(seed: u64) -> (GameConfig, ArcadePhysics, MatchState) {
        let config = GameConfig::default();
        let mut physics = ArcadePhysics::new(Vec2::new(config.screen_width, config.screen_height));
        let state = new_match(&config, &mut physics, seed);
        (config, physics, state)
    }

    fn press() -> TickInput {
        TickInput {
            pointer_down: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_tick_demo_to_active() {
        let (config, mut physics, mut state) = setup(12345);
        assert_eq!(state.phase, MatchPhase::Demo);

        tick(&mut state, &config, &mut physics, &TickInput::default(), SIM_DT);
        assert_eq!(state.phase, MatchPhase::Demo);

        tick(&mut state, &config, &mut physics, &press(), SIM_DT);
        assert_eq!(state.phase, MatchPhase::Active);
        assert_eq!(state.score, Score::new());
    }

    #[test]
    fn test_ball_hidden_for_serve_delay() {
        let (config, mut physics, mut state) = setup(7);
        tick(&mut state, &config, &mut physics, &press(), SIM_DT);

        let delay_ticks = (config.ball_start_delay / SIM_DT).round() as u32;
        for _ in 1..delay_ticks {
            tick(&mut state, &config, &mut physics, &TickInput::default(), SIM_DT);
            assert!(!state.ball.visible);
            assert_eq!(state.ball.body.vel, Vec2::ZERO);
        }

        tick(&mut state, &config, &mut physics, &TickInput::default(), SIM_DT);
        assert!(state.ball.visible);
        assert!((state.ball.body.vel.length() - config.ball_velocity).abs() < 0.01);
        assert!(state.serve_timer.is_none());
    }

    /// Ticks from the one that arms the serve until the ball shows
    fn ticks_until_launch(
        state: &mut MatchState,
        config: &GameConfig,
        physics: &mut ArcadePhysics,
    ) -> u32 {
        let mut ticks = 0;
        while !state.ball.visible && ticks < 1000 {
            tick(state, config, physics, &TickInput::default(), SIM_DT);
            ticks += 1;
        }
        ticks
    }

    #[test]
    fn test_every_serve_waits_full_delay() {
        let (config, mut physics, mut state) = setup(21);
        let delay_ticks = (config.ball_start_delay / SIM_DT).round() as u32;

        tick(&mut state, &config, &mut physics, &press(), SIM_DT);
        assert_eq!(ticks_until_launch(&mut state, &config, &mut physics), delay_ticks);

        // Point scored: the serve re-arms at the end of the scoring tick
        state.ball.body.pos = Vec2::new(config.screen_width - 2.0, 20.0);
        state.ball.body.vel = Vec2::new(config.ball_velocity, 0.0);
        while state.score == Score::new() {
            tick(&mut state, &config, &mut physics, &TickInput::default(), SIM_DT);
        }
        assert!(!state.ball.visible);
        assert_eq!(ticks_until_launch(&mut state, &config, &mut physics), delay_ticks);
    }

    #[test]
    fn test_demo_ball_never_scores() {
        let (config, mut physics, mut state) = setup(99);
        // Ten seconds of attract mode
        for _ in 0..1200 {
            tick(&mut state, &config, &mut physics, &TickInput::default(), SIM_DT);
            let pos = state.ball.pos();
            assert!(pos.x >= 0.0 && pos.x <= config.screen_width);
            assert!(pos.y >= 0.0 && pos.y <= config.screen_height);
        }
        assert_eq!(state.score, Score::new());
        assert_eq!(state.phase, MatchPhase::Demo);
        assert!(state.ball.visible);
    }

    #[test]
    fn test_paddle_moves_and_clamps() {
        let (config, mut physics, mut state) = setup(3);
        tick(&mut state, &config, &mut physics, &press(), SIM_DT);

        let input = TickInput {
            left: PaddleCommand { up: true, down: false },
            ..Default::default()
        };
        let start_y = state.paddle(Side::Left).body.pos.y;
        tick(&mut state, &config, &mut physics, &input, SIM_DT);
        let moved = start_y - state.paddle(Side::Left).body.pos.y;
        assert!((moved - config.paddle_velocity * SIM_DT).abs() < 0.01);
        assert_eq!(state.paddle(Side::Left).body.pos.x, config.paddle_left_x);

        for _ in 0..240 {
            tick(&mut state, &config, &mut physics, &input, SIM_DT);
        }
        assert_eq!(
            state.paddle(Side::Left).body.pos.y,
            config.paddle_size.y * 0.5
        );
    }

    #[test]
    fn test_ball_returns_off_left_paddle() {
        let (config, mut physics, mut state) = setup(5);
        tick(&mut state, &config, &mut physics, &press(), SIM_DT);
        state.drain_events();

        // Put a live ball just right of the left paddle, heading into it
        let paddle_pos = state.paddle(Side::Left).body.pos;
        state.serve_timer = None;
        state.ball.visible = true;
        state.ball.body.pos = Vec2::new(paddle_pos.x + 9.0, paddle_pos.y - 5.0);
        state.ball.body.vel = Vec2::new(-config.ball_velocity, 0.0);

        for _ in 0..4 {
            tick(&mut state, &config, &mut physics, &TickInput::default(), SIM_DT);
        }

        assert!(state.ball.body.vel.x > 0.0);
        assert!(state.events.iter().any(|e| matches!(
            e,
            MatchEvent::PaddleHit {
                side: Side::Left,
                ..
            }
        )));
        // The hit only redirects the ball
        let paddle = state.paddle(Side::Left);
        assert_eq!(paddle.body.pos, paddle_pos);
        assert_eq!(paddle.body.vel, Vec2::ZERO);
    }

    #[test]
    fn test_missed_ball_scores_and_reserves() {
        let (config, mut physics, mut state) = setup(11);
        tick(&mut state, &config, &mut physics, &press(), SIM_DT);

        // Ball flies past an idle right paddle
        state.serve_timer = None;
        state.ball.visible = true;
        state.ball.body.pos = Vec2::new(config.screen_width - 2.0, 20.0);
        state.ball.body.vel = Vec2::new(config.ball_velocity, 0.0);

        for _ in 0..10 {
            tick(&mut state, &config, &mut physics, &TickInput::default(), SIM_DT);
        }

        assert_eq!(state.score, Score { left: 1, right: 0 });
        assert_eq!(state.missed_side, Some(Side::Right));
        assert!(!state.ball.visible);
        assert!(state.serve_timer.is_some());
    }

    #[test]
    fn test_determinism() {
        let (config, mut physics1, mut state1) = setup(99999);
        let (_, mut physics2, mut state2) = setup(99999);

        let inputs = [
            TickInput::default(),
            press(),
            TickInput {
                left: PaddleCommand { up: true, down: false },
                ..Default::default()
            },
            TickInput {
                right: PaddleCommand { up: false, down: true },
                ..Default::default()
            },
        ];

        for i in 0..2000 {
            let input = &inputs[i % inputs.len()];
            tick(&mut state1, &config, &mut physics1, input, SIM_DT);
            tick(&mut state2, &config, &mut physics2, input, SIM_DT);
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.score, state2.score);
        assert_eq!(state1.ball.body, state2.ball.body);
        assert_eq!(state1.events, state2.events);
    }
}
