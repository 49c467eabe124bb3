//! Match state and core simulation types

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::config::GameConfig;
use super::physics::Body;

/// Which half of the court
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Side::Left => 0,
            Side::Right => 1,
        }
    }
}

/// Current phase of the match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchPhase {
    /// Attract mode: paddles hidden, ball bounces off every wall, waiting for a press
    Demo,
    /// Rally in progress: paddles live, ball can leave left/right to score
    Active,
}

/// The ball
#[derive(Debug, Clone)]
pub struct Ball {
    pub body: Body,
    /// Hidden until served
    pub visible: bool,
}

impl Ball {
    /// Plain body at the center; `init_physics` sets its world flags
    pub fn new(config: &GameConfig) -> Self {
        Self {
            body: Body::new(config.center(), config.ball_size),
            visible: true,
        }
    }

    pub fn pos(&self) -> Vec2 {
        self.body.pos
    }

    /// In flight and able to hit paddles
    pub fn is_live(&self) -> bool {
        self.visible && self.body.enabled
    }
}

/// One player's paddle
#[derive(Debug, Clone)]
pub struct Paddle {
    pub side: Side,
    pub body: Body,
    pub visible: bool,
    /// Responds to its up/down keys
    pub input_enabled: bool,
}

impl Paddle {
    pub fn new(side: Side, config: &GameConfig) -> Self {
        let x = match side {
            Side::Left => config.paddle_left_x,
            Side::Right => config.paddle_right_x,
        };
        Self {
            side,
            body: Body::new(Vec2::new(x, config.screen_height * 0.5), config.paddle_size),
            visible: true,
            input_enabled: true,
        }
    }

    /// Collision, visibility and input always switch together
    pub fn set_enabled(&mut self, enabled: bool) {
        self.visible = enabled;
        self.body.enabled = enabled;
        self.input_enabled = enabled;
        if !enabled {
            self.body.vel = Vec2::ZERO;
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.body.enabled
    }
}

/// Points for each side
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub left: u32,
    pub right: u32,
}

impl Score {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&mut self, side: Side) {
        match side {
            Side::Left => self.left += 1,
            Side::Right => self.right += 1,
        }
    }

    pub fn get(&self, side: Side) -> u32 {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// First side at or above the threshold
    pub fn winner(&self, score_to_win: u32) -> Option<Side> {
        if self.left >= score_to_win {
            Some(Side::Left)
        } else if self.right >= score_to_win {
            Some(Side::Right)
        } else {
            None
        }
    }
}

/// Things that happened during a step, drained by the host
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MatchEvent {
    /// Attract mode entered
    DemoStarted,
    /// A press started a new match
    MatchStarted,
    /// Ball reset and hidden; serve pending
    ServePending,
    /// Ball made visible and launched at `angle` degrees
    BallLaunched { angle: f32 },
    /// Ball returned off a paddle
    PaddleHit { side: Side, segment: i32, angle: f32 },
    /// `scorer` won the point; `missed` is where the ball went out
    Scored { scorer: Side, missed: Side },
    /// Score display needs refreshing
    ScoreChanged(Score),
    /// Match over
    MatchWon { winner: Side, score: Score },
}

/// Complete match state (deterministic for a given seed and input sequence)
#[derive(Debug, Clone)]
pub struct MatchState {
    pub seed: u64,
    pub rng: Pcg32,
    pub phase: MatchPhase,
    pub ball: Ball,
    /// Indexed by `Side::index`
    pub paddles: [Paddle; 2],
    pub score: Score,
    /// Side the ball last went out on
    pub missed_side: Option<Side>,
    /// Seconds until the pending serve
    pub serve_timer: Option<f32>,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub events: Vec<MatchEvent>,
}

impl MatchState {
    /// Entities laid out at their starting positions; no phase entered yet
    pub fn new(config: &GameConfig, seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: MatchPhase::Demo,
            ball: Ball::new(config),
            paddles: [Paddle::new(Side::Left, config), Paddle::new(Side::Right, config)],
            score: Score::new(),
            missed_side: None,
            serve_timer: None,
            time_ticks: 0,
            events: Vec::new(),
        }
    }

    pub fn paddle(&self, side: Side) -> &Paddle {
        &self.paddles[side.index()]
    }

    pub fn paddle_mut(&mut self, side: Side) -> &mut Paddle {
        &mut self.paddles[side.index()]
    }

    pub fn push_event(&mut self, event: MatchEvent) {
        self.events.push(event);
    }

    /// Take all events recorded since the last drain
    pub fn drain_events(&mut self) -> Vec<MatchEvent> {
        std::mem::take(&mut self.events)
    }
}
