//! Ball/paddle collision response
//!
//! A paddle is split into horizontal hit zones of `paddle_segment_height`.
//! The zone the ball meets decides the return angle: center hits come back
//! flat, edge hits come back steep. Speed never changes.

use super::config::GameConfig;
use super::physics::Physics;
use super::state::{Ball, Paddle};
use crate::wrap_degrees;

/// Hit zone index for a ball at `ball_y` against a paddle centered at `paddle_y`.
/// Always within `[-(segments_max - 1), segments_max - 1]`.
pub fn segment_hit(ball_y: f32, paddle_y: f32, segment_height: f32, segments_max: i32) -> i32 {
    let limit = (segments_max - 1).max(0);
    let raw = ((ball_y - paddle_y) / segment_height).floor();
    // Clamp in float space first so huge offsets cannot overflow the cast
    raw.clamp(-(limit as f32), limit as f32) as i32
}

/// Heading (degrees) for a ball returned from hit zone `segment`.
/// Left-half paddles send it right, right-half paddles send it left.
pub fn return_angle(paddle_x: f32, segment: i32, config: &GameConfig) -> f32 {
    let offset = segment as f32 * config.paddle_segment_angle;
    if paddle_x < config.screen_width * 0.5 {
        offset
    } else {
        wrap_degrees(180.0 - offset)
    }
}

/// Redirect the ball off `paddle`. Returns `(segment, angle)`.
pub fn collide_with_paddle<P: Physics + ?Sized>(
    ball: &mut Ball,
    paddle: &Paddle,
    config: &GameConfig,
    physics: &P,
) -> (i32, f32) {
    let segment = segment_hit(
        ball.body.pos.y,
        paddle.body.pos.y,
        config.paddle_segment_height,
        config.paddle_segments_max,
    );
    let angle = return_angle(paddle.body.pos.x, segment, config);
    ball.body.vel = physics.velocity_from_angle(angle, config.ball_velocity);
    (segment, angle)
}
