//! Computer opponent
//!
//! Follows the ball's height one paddle step per frame. No prediction.

use super::state::{Ball, Paddle};

/// Step the AI paddle toward the ball's y position
pub fn track_ball(ai: &mut Paddle, ball: &Ball) {
    if ball.pos.y > ai.pos.y {
        ai.move_down();
    } else if ball.pos.y < ai.pos.y {
        ai.move_up();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::PADDLE_SPEED;
    use crate::sim::state::Side;

    #[test]
    fn test_moves_toward_ball() {
        let mut ai = Paddle::new(Side::Right);
        let mut ball = Ball::new();

        ball.pos.y = 300;
        track_ball(&mut ai, &ball);
        assert_eq!(ai.pos.y, 247);

        ball.pos.y = 100;
        track_ball(&mut ai, &ball);
        assert_eq!(ai.pos.y, 240);
    }

    #[test]
    fn test_level_ball_holds_still() {
        let mut ai = Paddle::new(Side::Right);
        let ball = Ball::new();
        track_ball(&mut ai, &ball);
        assert_eq!(ai.pos.y, 240);
    }

    #[test]
    fn test_overshoots_by_at_most_one_step() {
        // No smoothing: a ball 3px away still moves the paddle a full step
        let mut ai = Paddle::new(Side::Right);
        let mut ball = Ball::new();
        ball.pos.y = 243;
        track_ball(&mut ai, &ball);
        assert_eq!(ai.pos.y, 247);
        track_ball(&mut ai, &ball);
        assert_eq!(ai.pos.y, 240);
    }

    #[test]
    fn test_near_ball_still_moves_once() {
        // One comparison per frame: the step toward the ball is never undone
        for dy in 1..PADDLE_SPEED {
            let mut ai = Paddle::new(Side::Right);
            let mut ball = Ball::new();

            ball.pos.y = 240 + dy;
            track_ball(&mut ai, &ball);
            assert_eq!(ai.pos.y, 247, "ball {dy}px below");

            let mut ai = Paddle::new(Side::Right);
            ball.pos.y = 240 - dy;
            track_ball(&mut ai, &ball);
            assert_eq!(ai.pos.y, 233, "ball {dy}px above");
        }
    }
}
