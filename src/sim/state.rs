//! Game state and core simulation types
//!
//! Everything one match needs lives in [`GameState`]; nothing is global, so
//! several sessions can run side by side.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::consts::*;

/// Which end of the field a paddle defends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// Player 1
    Left,
    /// Player 2 or the AI
    Right,
}

/// Paddle movement intent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    #[default]
    None,
}

/// Who controls the right paddle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GameMode {
    #[default]
    OnePlayer,
    TwoPlayer,
}

impl GameMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::OnePlayer => "1p",
            GameMode::TwoPlayer => "2p",
        }
    }
}

/// AI difficulty level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Normal => "normal",
            Difficulty::Hard => "hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "normal" => Some(Difficulty::Normal),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Parse, substituting `Normal` for anything unrecognized
    pub fn parse_or_default(s: &str) -> Self {
        Self::from_str(s).unwrap_or_else(|| {
            log::warn!("Unknown difficulty {:?}, using normal", s);
            Difficulty::default()
        })
    }

    /// Multiplier on base paddle speed for the AI-controlled paddle
    pub fn speed_factor(&self) -> f32 {
        match self {
            Difficulty::Easy => 0.5,
            Difficulty::Normal => 0.7,
            Difficulty::Hard => 1.2,
        }
    }
}

/// Match lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchPhase {
    /// No match started (or the last one was abandoned)
    Idle,
    /// Ticks advance the simulation
    Running,
    /// Ticks are skipped
    Paused,
    /// A side reached the win score
    Ended,
}

/// Points per side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Score {
    pub p1: u32,
    pub p2: u32,
}

impl Score {
    pub fn get(&self, side: Side) -> u32 {
        match side {
            Side::Left => self.p1,
            Side::Right => self.p2,
        }
    }

    pub fn award(&mut self, side: Side) {
        match side {
            Side::Left => self.p1 += 1,
            Side::Right => self.p2 += 1,
        }
    }

    /// Side that has reached the win score, if any
    pub fn winner(&self) -> Option<Side> {
        if self.p1 < WIN_SCORE && self.p2 < WIN_SCORE {
            return None;
        }
        Some(if self.p1 > self.p2 { Side::Left } else { Side::Right })
    }
}

/// The ball. `pos` is its center; it collides as a square of `size`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
}

impl Default for Ball {
    fn default() -> Self {
        Self::new()
    }
}

impl Ball {
    /// Centered and at rest; call [`Ball::reset`] to serve
    pub fn new() -> Self {
        Self {
            pos: field_center(),
            vel: Vec2::ZERO,
            size: BALL_SIZE,
        }
    }

    /// Re-center and serve toward a random side with a random vertical slope
    pub fn reset<R: Rng>(&mut self, rng: &mut R) {
        self.pos = field_center();
        let dir = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
        self.vel = Vec2::new(
            dir * BALL_SPEED_INIT,
            (rng.random::<f32>() - 0.5) * BALL_SPEED_INIT,
        );
    }

    /// Advance one tick. Returns true if the ball bounced off the top or bottom wall.
    ///
    /// Leaving through the left or right edge is not handled here; that is a point.
    pub fn update(&mut self) -> bool {
        self.pos += self.vel;

        let half = self.size / 2.0;
        if self.pos.y - half < 0.0 || self.pos.y + half > FIELD_HEIGHT {
            self.vel.y = -self.vel.y;
            self.pos.y = self.pos.y.clamp(half, FIELD_HEIGHT - half);
            return true;
        }
        false
    }

    pub fn speed(&self) -> f32 {
        self.vel.length()
    }

    pub fn bounds(&self) -> Rect {
        Rect::centered(self.pos, Vec2::splat(self.size))
    }
}

/// A paddle. `pos` is its top-left corner; x never changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    pub side: Side,
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    /// Vertical velocity, one of `-speed`, `0`, `+speed`
    pub vel_y: f32,
    /// Pixels per tick when moving
    pub speed: f32,
}

impl Paddle {
    pub fn new(side: Side, height: f32) -> Self {
        let x = match side {
            Side::Left => FIELD_MARGIN,
            Side::Right => FIELD_WIDTH - FIELD_MARGIN - PADDLE_WIDTH,
        };
        let mut paddle = Self {
            side,
            pos: Vec2::new(x, 0.0),
            width: PADDLE_WIDTH,
            height,
            vel_y: 0.0,
            speed: PADDLE_SPEED,
        };
        paddle.recenter();
        paddle
    }

    /// Set velocity from a direction; position changes on the next update
    pub fn set_direction(&mut self, dir: Direction) {
        self.vel_y = match dir {
            Direction::Up => -self.speed,
            Direction::Down => self.speed,
            Direction::None => 0.0,
        };
    }

    pub fn direction(&self) -> Direction {
        if self.vel_y < 0.0 {
            Direction::Up
        } else if self.vel_y > 0.0 {
            Direction::Down
        } else {
            Direction::None
        }
    }

    /// Change movement speed, keeping the current direction
    pub fn set_speed(&mut self, speed: f32) {
        let dir = self.direction();
        self.speed = speed;
        self.set_direction(dir);
    }

    /// Move by velocity, then clamp into the field
    pub fn update(&mut self) {
        self.pos.y += self.vel_y;
        self.clamp();
    }

    /// Place the top edge directly (pointer/touch control). Non-finite input is ignored.
    pub fn set_position(&mut self, y: f32) {
        if !y.is_finite() {
            return;
        }
        self.pos.y = y;
        self.clamp();
    }

    pub fn set_height(&mut self, height: f32) {
        self.height = height;
        self.clamp();
    }

    /// Vertically center in the field
    pub fn recenter(&mut self) {
        self.pos.y = FIELD_HEIGHT / 2.0 - self.height / 2.0;
        self.vel_y = 0.0;
    }

    pub fn center_y(&self) -> f32 {
        self.pos.y + self.height / 2.0
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.pos, self.pos + Vec2::new(self.width, self.height))
    }

    pub fn collides_with(&self, ball: &Ball) -> bool {
        self.bounds().overlaps(&ball.bounds())
    }

    fn clamp(&mut self) {
        self.pos.y = self.pos.y.clamp(0.0, (FIELD_HEIGHT - self.height).max(0.0));
    }
}

/// Complete state of one session
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the session RNG was created from
    pub seed: u64,
    pub rng: Pcg32,
    pub mode: GameMode,
    pub difficulty: Difficulty,
    pub phase: MatchPhase,
    pub score: Score,
    pub ball: Ball,
    pub paddle1: Paddle,
    pub paddle2: Paddle,
    /// Session-level paddle height applied to both paddles
    pub paddle_height: f32,
    /// Consecutive paddle hits since the last point
    pub hits: u32,
    /// Whole seconds spent Running in the current match
    pub elapsed_secs: u32,
    /// Simulation ticks in the current match
    pub time_ticks: u64,
}

impl GameState {
    /// Create an idle session with the given seed
    pub fn new(seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut ball = Ball::new();
        ball.reset(&mut rng);
        Self {
            seed,
            rng,
            mode: GameMode::default(),
            difficulty: Difficulty::default(),
            phase: MatchPhase::Idle,
            score: Score::default(),
            ball,
            paddle1: Paddle::new(Side::Left, PADDLE_HEIGHT),
            paddle2: Paddle::new(Side::Right, PADDLE_HEIGHT),
            paddle_height: PADDLE_HEIGHT,
            hits: 0,
            elapsed_secs: 0,
            time_ticks: 0,
        }
    }

    pub fn paddle(&self, side: Side) -> &Paddle {
        match side {
            Side::Left => &self.paddle1,
            Side::Right => &self.paddle2,
        }
    }

    pub fn paddle_mut(&mut self, side: Side) -> &mut Paddle {
        match side {
            Side::Left => &mut self.paddle1,
            Side::Right => &mut self.paddle2,
        }
    }

    /// Whether a match is in progress (running or paused)
    pub fn is_active(&self) -> bool {
        matches!(self.phase, MatchPhase::Running | MatchPhase::Paused)
    }

    /// Speed the right paddle should move at for the current mode/difficulty
    pub fn paddle2_speed(&self) -> f32 {
        match self.mode {
            GameMode::OnePlayer => PADDLE_SPEED * self.difficulty.speed_factor(),
            GameMode::TwoPlayer => PADDLE_SPEED,
        }
    }
}

pub fn field_center() -> Vec2 {
    Vec2::new(FIELD_WIDTH / 2.0, FIELD_HEIGHT / 2.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ball_reset_centered_with_bounded_velocity() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut ball = Ball::new();
        for _ in 0..200 {
            ball.pos = Vec2::new(-50.0, 3.0);
            ball.reset(&mut rng);
            assert_eq!(ball.pos, field_center());
            assert_eq!(ball.vel.x.abs(), BALL_SPEED_INIT);
            assert!(ball.vel.y.abs() <= BALL_SPEED_INIT / 2.0);
        }
    }

    #[test]
    fn test_ball_reset_serves_both_sides() {
        let mut rng = Pcg32::seed_from_u64(42);
        let mut ball = Ball::new();
        let mut left = 0;
        let mut right = 0;
        for _ in 0..200 {
            ball.reset(&mut rng);
            if ball.vel.x < 0.0 {
                left += 1;
            } else {
                right += 1;
            }
        }
        assert!(left > 50 && right > 50, "left={left} right={right}");
    }

    #[test]
    fn test_ball_bounces_off_top_wall() {
        let mut ball = Ball::new();
        ball.pos = Vec2::new(400.0, 5.0);
        ball.vel = Vec2::new(4.0, -3.0);

        assert!(ball.update());
        assert_eq!(ball.vel.y, 3.0);
        assert_eq!(ball.pos.y, BALL_SIZE / 2.0);
    }

    #[test]
    fn test_ball_bounces_off_bottom_wall() {
        let mut ball = Ball::new();
        ball.pos = Vec2::new(400.0, FIELD_HEIGHT - 5.0);
        ball.vel = Vec2::new(4.0, 3.0);

        assert!(ball.update());
        assert_eq!(ball.vel.y, -3.0);
        assert_eq!(ball.pos.y, FIELD_HEIGHT - BALL_SIZE / 2.0);
    }

    #[test]
    fn test_ball_leaves_sideways_without_bounce() {
        let mut ball = Ball::new();
        ball.pos = Vec2::new(2.0, 300.0);
        ball.vel = Vec2::new(-4.0, 0.0);

        assert!(!ball.update());
        assert!(ball.pos.x < 0.0);
    }

    #[test]
    fn test_paddle_clamped_at_top() {
        let mut paddle = Paddle::new(Side::Left, PADDLE_HEIGHT);
        paddle.pos.y = 0.0;
        paddle.set_direction(Direction::Up);
        paddle.update();
        assert_eq!(paddle.pos.y, 0.0);
    }

    #[test]
    fn test_paddle_clamped_at_bottom() {
        let mut paddle = Paddle::new(Side::Right, 100.0);
        paddle.set_position(FIELD_HEIGHT);
        assert_eq!(paddle.pos.y, FIELD_HEIGHT - 100.0);
        paddle.set_direction(Direction::Down);
        paddle.update();
        assert_eq!(paddle.pos.y, FIELD_HEIGHT - 100.0);
    }

    #[test]
    fn test_non_finite_position_ignored() {
        let mut paddle = Paddle::new(Side::Left, PADDLE_HEIGHT);
        paddle.set_position(50.0);
        paddle.set_position(f32::NAN);
        assert_eq!(paddle.pos.y, 50.0);
        paddle.set_position(f32::INFINITY);
        assert_eq!(paddle.pos.y, 50.0);
    }

    #[test]
    fn test_set_direction_does_not_move() {
        let mut paddle = Paddle::new(Side::Left, PADDLE_HEIGHT);
        let y = paddle.pos.y;
        paddle.set_direction(Direction::Down);
        assert_eq!(paddle.pos.y, y);
        assert_eq!(paddle.vel_y, PADDLE_SPEED);
        paddle.update();
        assert_eq!(paddle.pos.y, y + PADDLE_SPEED);
    }

    #[test]
    fn test_set_speed_keeps_direction() {
        let mut paddle = Paddle::new(Side::Right, PADDLE_HEIGHT);
        paddle.set_direction(Direction::Up);
        paddle.set_speed(3.0);
        assert_eq!(paddle.vel_y, -3.0);
    }

    #[test]
    fn test_paddle_x_positions() {
        assert_eq!(Paddle::new(Side::Left, 80.0).pos.x, FIELD_MARGIN);
        assert_eq!(
            Paddle::new(Side::Right, 80.0).pos.x,
            FIELD_WIDTH - FIELD_MARGIN - PADDLE_WIDTH
        );
    }

    #[test]
    fn test_difficulty_parse_fails_closed() {
        assert_eq!(Difficulty::parse_or_default("HARD"), Difficulty::Hard);
        assert_eq!(Difficulty::parse_or_default("nightmare"), Difficulty::Normal);
        assert_eq!(Difficulty::parse_or_default(""), Difficulty::Normal);
    }

    #[test]
    fn test_score_winner() {
        let mut score = Score::default();
        assert_eq!(score.winner(), None);
        score.p2 = WIN_SCORE;
        score.p1 = 9;
        assert_eq!(score.winner(), Some(Side::Right));
    }
}
