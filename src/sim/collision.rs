//! Collision detection and response
//!
//! Everything is axis-aligned: the ball is a square, paddles are rectangles.
//! A paddle hit reflects the ball horizontally, bends it vertically by where it
//! struck the paddle, and speeds it up while it is still below the speed cap.

use glam::Vec2;

use super::state::{Ball, Paddle, Side};
use crate::consts::*;

/// Axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    pub fn centered(center: Vec2, size: Vec2) -> Self {
        let half = size / 2.0;
        Self::new(center - half, center + half)
    }

    /// Strict overlap; rectangles that only share an edge do not collide
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }
}

/// Normalized contact point: 0 at the paddle's top edge, 1 at its bottom edge
#[inline]
pub fn hit_position(ball_y: f32, paddle: &Paddle) -> f32 {
    (ball_y - paddle.pos.y) / paddle.height
}

/// Vertical velocity added for a given hit position (zero at the center)
#[inline]
pub fn deflection(hit_pos: f32) -> f32 {
    (hit_pos - 0.5) * BALL_SPEED_INIT
}

/// Speed-up rule: scale by the acceleration factor if currently below max speed.
///
/// The check is made before scaling, so one application may land slightly
/// above `BALL_SPEED_MAX` (at most `BALL_SPEED_MAX * BALL_ACCELERATION`).
#[inline]
pub fn accelerate(vel: Vec2) -> Vec2 {
    if vel.length() < BALL_SPEED_MAX {
        vel * BALL_ACCELERATION
    } else {
        vel
    }
}

/// Whether the ball is travelling toward the given paddle's side
#[inline]
pub fn approaching(ball: &Ball, side: Side) -> bool {
    match side {
        Side::Left => ball.vel.x < 0.0,
        Side::Right => ball.vel.x > 0.0,
    }
}

/// Resolve a ball/paddle contact. Returns true if the ball was returned.
///
/// Only fires while the ball is moving toward the paddle, so a ball that was
/// already reflected cannot be caught twice on the same contact.
pub fn resolve_paddle_hit(ball: &mut Ball, paddle: &Paddle) -> bool {
    if !paddle.collides_with(ball) || !approaching(ball, paddle.side) {
        return false;
    }

    // Push out flush with the paddle face so the next tick starts clear of it
    let half = ball.size / 2.0;
    ball.pos.x = match paddle.side {
        Side::Left => paddle.pos.x + paddle.width + half,
        Side::Right => paddle.pos.x - half,
    };

    ball.vel.x = -ball.vel.x;
    ball.vel.y += deflection(hit_position(ball.pos.y, paddle));
    ball.vel = accelerate(ball.vel);
    true
}
