//! Ball collision detection and response
//!
//! Every check is guarded on the velocity sign, so a ball already moving
//! away from a surface can never be bounced by it a second time.

use glam::Vec2;

use super::state::{Ball, Paddle, Side};
use crate::Settings;

/// Bounce off the top/bottom wall. Returns true on a hit.
///
/// Any power-up boost is dropped and the ball returns to its base speed.
pub fn wall_collision(ball: &mut Ball, settings: &Settings) -> bool {
    let r = settings.ball.radius;
    let height = settings.arena.height;

    if ball.pos.y - r <= 0.0 && ball.vel.y < 0.0 {
        ball.pos.y = r;
    } else if ball.pos.y + r >= height && ball.vel.y > 0.0 {
        ball.pos.y = height - r;
    } else {
        return false;
    }

    ball.vel.y = -ball.vel.y;
    ball.clear_boost();
    true
}

/// Axis-aligned overlap between the ball and a paddle box inflated by the ball radius
pub fn ball_paddle_overlap(ball_pos: Vec2, paddle: &Paddle, settings: &Settings) -> bool {
    let r = settings.ball.radius;
    let half_width = settings.paddle.width / 2.0;
    let within_x = (ball_pos.x - (paddle.x + half_width)).abs() <= half_width + r;
    let within_y =
        ball_pos.y + r >= paddle.y && ball_pos.y - r <= paddle.y + settings.paddle.height;
    within_x && within_y
}

/// Bounce off a paddle. Returns true on a hit.
///
/// The outgoing angle depends on where the ball meets the paddle. A hit
/// ratchets the base speed up (capped) and drops any power-up boost.
pub fn paddle_collision(ball: &mut Ball, paddle: &Paddle, settings: &Settings) -> bool {
    let r = settings.ball.radius;
    let face_x = settings.paddle_near_face_x(paddle.side);

    let reached_face = match paddle.side {
        Side::Left => ball.vel.x < 0.0 && ball.pos.x - r <= face_x,
        Side::Right => ball.vel.x > 0.0 && ball.pos.x + r >= face_x,
    };
    if !reached_face || !ball_paddle_overlap(ball.pos, paddle, settings) {
        return false;
    }

    let half_height = settings.paddle.height / 2.0;
    let relative_intersect =
        ((ball.pos.y - paddle.center_y(settings)) / half_height).clamp(-1.0, 1.0);
    let bounce_angle = relative_intersect * settings.ball.bounce_max_angle;

    ball.base_speed = (ball.base_speed + settings.ball.speed_increment).min(settings.ball.max_speed);
    ball.power_up_multiplier = 1.0;
    ball.speed = ball.base_speed;

    // Away from the paddle that was hit
    let away = paddle.side.opposite().sign();
    ball.vel = Vec2::new(bounce_angle.cos() * away, bounce_angle.sin()) * ball.speed;

    let push_out = r + crate::consts::PADDLE_PUSH_OUT;
    ball.pos.x = face_x + away * push_out;
    true
}

/// Side that earns a point if the ball has fully left the court
pub fn scoring_side(ball: &Ball, settings: &Settings) -> Option<Side> {
    let r = settings.ball.radius;
    if ball.pos.x + r < 0.0 {
        Some(Side::Right)
    } else if ball.pos.x - r > settings.arena.width {
        Some(Side::Left)
    } else {
        None
    }
}
