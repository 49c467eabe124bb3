//! Scene port
//!
//! The render host owns drawing; the match only creates entities once and
//! then pushes positions, visibility and score text into them.

use glam::Vec2;

use crate::consts::CENTER_LINE_WIDTH;
use crate::sim::{GameConfig, MatchEvent, MatchState, Score, Side};

/// Handle to an entity created in a scene
pub type EntityId = usize;

/// A drawable image, declared before the scene starts
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteAsset {
    pub name: &'static str,
    pub size: Vec2,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    /// Glyph height
    pub size: f32,
    pub color: [f32; 4],
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineStyle {
    pub width: f32,
    pub color: [f32; 4],
}

/// Entity operations a render host provides
pub trait Scene {
    /// Sprite anchored at its center
    fn add_sprite(&mut self, asset: &SpriteAsset, pos: Vec2) -> EntityId;
    /// Text anchored at its top center
    fn add_text(&mut self, pos: Vec2, content: &str, style: &TextStyle) -> EntityId;
    /// Static line segments
    fn add_lines(&mut self, segments: &[(Vec2, Vec2)], style: &LineStyle) -> EntityId;

    fn set_position(&mut self, id: EntityId, pos: Vec2);
    fn set_visible(&mut self, id: EntityId, visible: bool);
    fn set_text(&mut self, id: EntityId, content: &str);
}

/// Entities created by `init_graphics`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneHandles {
    pub center_line: EntityId,
    pub ball: EntityId,
    pub paddle_left: EntityId,
    pub paddle_right: EntityId,
    pub score_left: EntityId,
    pub score_right: EntityId,
}

impl SceneHandles {
    pub fn paddle(&self, side: Side) -> EntityId {
        match side {
            Side::Left => self.paddle_left,
            Side::Right => self.paddle_right,
        }
    }
}

const WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

pub fn ball_asset(config: &GameConfig) -> SpriteAsset {
    SpriteAsset {
        name: "ball",
        size: config.ball_size,
    }
}

pub fn paddle_asset(config: &GameConfig) -> SpriteAsset {
    SpriteAsset {
        name: "paddle",
        size: config.paddle_size,
    }
}

/// Dashes of `dash_size` every `2 * dash_size` down the middle
pub fn center_line_segments(config: &GameConfig) -> Vec<(Vec2, Vec2)> {
    let x = config.screen_width * 0.5;
    let step = (config.dash_size * 2.0).max(1.0);
    let height = config.screen_height;
    if !(height.is_finite() && step.is_finite()) {
        return Vec::new();
    }
    let count = (height / step).ceil().max(0.0) as usize;
    (0..count)
        .map(|i| {
            let y = i as f32 * step;
            (Vec2::new(x, y), Vec2::new(x, y + config.dash_size))
        })
        .collect()
}

/// Create the center line, ball, paddles and score texts
pub fn init_graphics<S: Scene + ?Sized>(scene: &mut S, config: &GameConfig) -> SceneHandles {
    let line_style = LineStyle {
        width: CENTER_LINE_WIDTH,
        color: WHITE,
    };
    let center_line = scene.add_lines(&center_line_segments(config), &line_style);

    let center = config.center();
    let ball = scene.add_sprite(&ball_asset(config), center);

    let paddle = paddle_asset(config);
    let paddle_left = scene.add_sprite(&paddle, Vec2::new(config.paddle_left_x, center.y));
    let paddle_right = scene.add_sprite(&paddle, Vec2::new(config.paddle_right_x, center.y));

    let text_style = TextStyle {
        size: config.score_font_size,
        color: WHITE,
    };
    let score_left = scene.add_text(
        Vec2::new(config.score_left_x, config.score_top_y),
        "0",
        &text_style,
    );
    let score_right = scene.add_text(
        Vec2::new(config.score_right_x, config.score_top_y),
        "0",
        &text_style,
    );

    SceneHandles {
        center_line,
        ball,
        paddle_left,
        paddle_right,
        score_left,
        score_right,
    }
}

pub fn update_score_text<S: Scene + ?Sized>(scene: &mut S, handles: &SceneHandles, score: &Score) {
    scene.set_text(handles.score_left, &score.left.to_string());
    scene.set_text(handles.score_right, &score.right.to_string());
}

/// Mirror the match into the scene. Score text only changes on `ScoreChanged`.
pub fn sync_scene<S: Scene + ?Sized>(
    scene: &mut S,
    handles: &SceneHandles,
    state: &MatchState,
    events: &[MatchEvent],
) {
    for event in events {
        if let MatchEvent::ScoreChanged(score) = event {
            update_score_text(scene, handles, score);
        }
    }

    scene.set_position(handles.ball, state.ball.pos());
    scene.set_visible(handles.ball, state.ball.visible);

    for paddle in &state.paddles {
        let id = handles.paddle(paddle.side);
        scene.set_position(id, paddle.body.pos);
        scene.set_visible(id, paddle.visible);
    }
}
