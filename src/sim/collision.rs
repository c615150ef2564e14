//! Motion integration and collision response
//!
//! Everything here is axis-aligned and integer. Checks run unconditionally in
//! a fixed order each frame, so a wall bounce and a paddle hit can both apply
//! in the same frame.

use rand_pcg::Pcg32;

use super::state::{
    Ball, GameEvent, GameState, Paddle, Score, Side, screen_center, serve_velocity,
};
use crate::audio::AudioCue;
use crate::consts::*;

/// Advance the ball by its velocity, then clamp the velocity per axis
pub fn integrate(ball: &mut Ball) {
    ball.pos += ball.vel;
    ball.vel = ball.vel.clamp(
        glam::IVec2::splat(-BALL_MAX_SPEED),
        glam::IVec2::splat(BALL_MAX_SPEED),
    );
}

/// Bounce off the top and bottom edges (sign flip only, no repositioning)
pub fn resolve_vertical_bounds(ball: &mut Ball) {
    if ball.pos.y < 0 || ball.pos.y > SCREEN_HEIGHT {
        ball.vel.y = -ball.vel.y;
    }
}

/// Score a point when the ball leaves through the left or right edge
///
/// The loss and win checks are independent; which one fires depends only on
/// where the ball is relative to each paddle. Either way the ball is
/// re-served from the center.
pub fn resolve_horizontal_bounds(
    ball: &mut Ball,
    paddle: &Paddle,
    ai: &Paddle,
    score: &mut Score,
    rng: &mut Pcg32,
    events: &mut Vec<GameEvent>,
) {
    if ball.pos.x >= 0 && ball.pos.x <= SCREEN_WIDTH {
        return;
    }

    if ball.pos.x < paddle.pos.x {
        score.losses += 1;
        events.push(GameEvent::Cue(AudioCue::Loss));
        events.push(GameEvent::PointScored { player_won: false });
    }
    if ball.pos.x > ai.pos.x {
        score.wins += 1;
        events.push(GameEvent::Cue(AudioCue::Win));
        events.push(GameEvent::PointScored { player_won: true });
    }

    ball.pos = screen_center();
    ball.vel = serve_velocity(rng, SERVE_VX, RESERVE_VY);
}

/// Rebound off a paddle
///
/// Upper and lower halves are separate checks: the upper half (center
/// included) forces the ball upward, the lower half downward. Each hit also
/// nudges horizontal speed by one, away from the paddle.
pub fn resolve_paddle_collision(
    ball: &mut Ball,
    paddle: &Paddle,
    side: Side,
    events: &mut Vec<GameEvent>,
) {
    let in_reach = match side {
        Side::Left => ball.pos.x <= paddle.pos.x + paddle.half_width(),
        Side::Right => ball.pos.x >= paddle.pos.x - paddle.half_width(),
    };
    let nudge = match side {
        Side::Left => 1,
        Side::Right => -1,
    };

    // Upper half
    if in_reach
        && ball.pos.y >= paddle.pos.y - paddle.half_height()
        && ball.pos.y <= paddle.pos.y
    {
        events.push(GameEvent::Cue(AudioCue::Hit));
        ball.vel.x = -ball.vel.x + nudge;
        ball.vel.y = -ball.vel.y.abs();
    }

    // Lower half, strictly below center. A ball level with the center gets
    // the upper-half rebound only, never both.
    if in_reach
        && ball.pos.y <= paddle.pos.y + paddle.half_height()
        && ball.pos.y > paddle.pos.y
    {
        events.push(GameEvent::Cue(AudioCue::Hit));
        ball.vel.x = -ball.vel.x + nudge;
        ball.vel.y = ball.vel.y.abs();
    }
}

/// Keep a paddle fully on screen
pub fn clamp_paddle(paddle: &mut Paddle) {
    let half = paddle.half_height();
    if paddle.pos.y - half <= 0 {
        paddle.pos.y = half;
    }
    if paddle.pos.y + half >= SCREEN_HEIGHT {
        paddle.pos.y = SCREEN_HEIGHT - half;
    }
}

/// Run all ball collision checks for one frame, in order
pub fn resolve_collisions(state: &mut GameState) {
    let GameState {
        ball,
        paddle,
        ai,
        score,
        rng,
        events,
        ..
    } = state;

    resolve_vertical_bounds(ball);
    resolve_horizontal_bounds(ball, paddle, ai, score, rng, events);
    resolve_paddle_collision(ball, paddle, Side::Left, events);
    resolve_paddle_collision(ball, ai, Side::Right, events);
}
