//! Computer opponent
//!
//! Purely reactive: it chases the ball's current height with no lookahead.
//! Difficulty sets how fast the AI paddle moves (see
//! [`Difficulty::speed_factor`]); easy mode also jitters at random.

use rand::Rng;

use super::state::{Ball, Difficulty, Direction, Paddle};
use crate::consts::*;

/// Direction that brings the paddle's center toward the ball, holding inside the dead zone
pub fn track(ball: &Ball, paddle: &Paddle) -> Direction {
    let target = ball.pos.y - paddle.height / 2.0;
    let diff = target - paddle.pos.y;

    if diff > AI_DEAD_ZONE {
        Direction::Down
    } else if diff < -AI_DEAD_ZONE {
        Direction::Up
    } else {
        Direction::None
    }
}

/// Full AI decision for one tick, including easy-mode mistakes
pub fn decide<R: Rng>(ball: &Ball, paddle: &Paddle, difficulty: Difficulty, rng: &mut R) -> Direction {
    let dir = track(ball, paddle);

    if difficulty == Difficulty::Easy && rng.random_bool(AI_EASY_NOISE) {
        return if rng.random_bool(0.5) {
            Direction::Down
        } else {
            Direction::Up
        };
    }

    dir
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Side;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn setup(ball_offset: f32) -> (Ball, Paddle) {
        let paddle = Paddle::new(Side::Right, PADDLE_HEIGHT);
        let mut ball = Ball::new();
        ball.pos.y = paddle.center_y() + ball_offset;
        (ball, paddle)
    }

    #[test]
    fn test_moves_down_toward_ball_below() {
        let (ball, paddle) = setup(200.0);
        let mut rng = Pcg32::seed_from_u64(1);
        assert_eq!(decide(&ball, &paddle, Difficulty::Normal, &mut rng), Direction::Down);
        assert_eq!(decide(&ball, &paddle, Difficulty::Hard, &mut rng), Direction::Down);
    }

    #[test]
    fn test_moves_up_toward_ball_above() {
        let (ball, paddle) = setup(-150.0);
        assert_eq!(track(&ball, &paddle), Direction::Up);
    }

    #[test]
    fn test_holds_inside_dead_zone() {
        for offset in [-AI_DEAD_ZONE, -3.0, 0.0, 5.0, AI_DEAD_ZONE] {
            let (ball, paddle) = setup(offset);
            assert_eq!(track(&ball, &paddle), Direction::None, "offset {offset}");
        }
    }

    #[test]
    fn test_easy_mode_sometimes_ignores_target() {
        let (ball, paddle) = setup(200.0);
        let mut rng = Pcg32::seed_from_u64(99);
        let ups = (0..1000)
            .filter(|_| decide(&ball, &paddle, Difficulty::Easy, &mut rng) == Direction::Up)
            .count();
        // ~15% of ticks pick "up" at random; the target alone never would
        assert!(ups > 50 && ups < 300, "ups={ups}");
    }

    #[test]
    fn test_harder_levels_never_jitter() {
        let (ball, paddle) = setup(0.0);
        let mut rng = Pcg32::seed_from_u64(5);
        for _ in 0..500 {
            assert_eq!(decide(&ball, &paddle, Difficulty::Normal, &mut rng), Direction::None);
        }
    }
}
