//! Frame driver
//!
//! Owns one match together with its physics world and scene, turns variable
//! frame deltas into fixed simulation ticks and mirrors the result into the
//! scene after every frame.

use glam::Vec2;

use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};
use crate::input::HeldKeys;
use crate::scene::{Scene, SceneHandles, init_graphics, sync_scene};
use crate::sim::{
    ArcadePhysics, GameConfig, MatchEvent, MatchState, Physics, Side, TickInput, new_match, tick,
};

/// A running game: match state, physics world and the scene it is drawn into
pub struct Game<S: Scene, P: Physics = ArcadePhysics> {
    config: GameConfig,
    state: MatchState,
    physics: P,
    scene: S,
    handles: SceneHandles,
    held: HeldKeys,
    /// Pointer press waiting for the next tick
    pointer_pressed: bool,
    accumulator: f32,
}

impl<S: Scene> Game<S, ArcadePhysics> {
    /// Create a game over a world the size of the configured screen
    pub fn new(config: GameConfig, scene: S, seed: u64) -> Self {
        let physics = ArcadePhysics::new(Vec2::new(config.screen_width, config.screen_height));
        Self::with_physics(config, scene, physics, seed)
    }
}

impl<S: Scene, P: Physics> Game<S, P> {
    pub fn with_physics(config: GameConfig, mut scene: S, mut physics: P, seed: u64) -> Self {
        let handles = init_graphics(&mut scene, &config);
        let mut state = new_match(&config, &mut physics, seed);
        let events = state.drain_events();
        sync_scene(&mut scene, &handles, &state, &events);
        log::info!("Game created with seed {}", seed);

        Self {
            config,
            state,
            physics,
            scene,
            handles,
            held: HeldKeys::default(),
            pointer_pressed: false,
            accumulator: 0.0,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> &MatchState {
        &self.state
    }

    /// Direct access for hosts that script a match (tests, replays)
    pub fn state_mut(&mut self) -> &mut MatchState {
        &mut self.state
    }

    pub fn physics(&self) -> &P {
        &self.physics
    }

    pub fn scene(&self) -> &S {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut S {
        &mut self.scene
    }

    pub fn handles(&self) -> &SceneHandles {
        &self.handles
    }

    /// Returns true if the key is bound to a paddle
    pub fn key_down(&mut self, key: &str) -> bool {
        self.held.key_down(&self.config.keys, key)
    }

    pub fn key_up(&mut self, key: &str) -> bool {
        self.held.key_up(&self.config.keys, key)
    }

    /// Release every held key (focus lost)
    pub fn release_keys(&mut self) {
        self.held.clear();
    }

    /// Queue a pointer press for the next tick
    pub fn pointer_down(&mut self) {
        self.pointer_pressed = true;
    }

    /// Advance by a frame of `dt` seconds and return what happened
    pub fn frame(&mut self, dt: f32) -> Vec<MatchEvent> {
        let dt = if dt.is_finite() {
            dt.clamp(0.0, MAX_FRAME_DT)
        } else {
            0.0
        };
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            let input = TickInput {
                left: self.held.command(Side::Left),
                right: self.held.command(Side::Right),
                pointer_down: self.pointer_pressed,
            };
            tick(
                &mut self.state,
                &self.config,
                &mut self.physics,
                &input,
                SIM_DT,
            );
            self.accumulator -= SIM_DT;
            substeps += 1;

            // One-shot
            self.pointer_pressed = false;
        }

        // Drop the backlog rather than chase it next frame
        if substeps == MAX_SUBSTEPS {
            self.accumulator = 0.0;
        }

        let events = self.state.drain_events();
        for event in &events {
            log_event(event);
        }
        sync_scene(&mut self.scene, &self.handles, &self.state, &events);
        events
    }
}

fn log_event(event: &MatchEvent) {
    match event {
        MatchEvent::MatchWon { winner, score } => {
            log::info!("Match over: {:?} ({} - {})", winner, score.left, score.right)
        }
        MatchEvent::ScoreChanged(score) => log::debug!("Score {} - {}", score.left, score.right),
        other => log::trace!("{:?}", other),
    }
}
