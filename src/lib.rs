//! Arcade Pong - classic single-screen Pong
//!
//! Core modules:
//! - `sim`: Headless simulation (ball/paddle physics, collisions, AI, scoring)
//! - `app`: Presentation controller (screens, input mapping, event dispatch)
//! - `persistence`: Key/value storage for settings and stats
//! - `i18n`: Translation tables
//! - `feedback` / `particles`: Audio, haptic and visual reactions to game events

pub mod app;
#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod feedback;
pub mod i18n;
pub mod particles;
pub mod persistence;
pub mod settings;
pub mod sim;
pub mod stats;

pub use app::{App, Key, MenuCommand, Screen};
pub use settings::Settings;
pub use stats::Stats;

/// Game configuration constants
pub mod consts {
    /// Playfield dimensions (pixels)
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 600.0;
    /// Horizontal gap between field edge and paddle
    pub const FIELD_MARGIN: f32 = 20.0;

    /// Ball defaults (speeds are pixels per tick)
    pub const BALL_SIZE: f32 = 8.0;
    pub const BALL_SPEED_INIT: f32 = 4.0;
    pub const BALL_SPEED_MAX: f32 = 8.0;
    /// Speed multiplier applied on paddle hit while below max speed
    pub const BALL_ACCELERATION: f32 = 1.02;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 12.0;
    pub const PADDLE_HEIGHT: f32 = 80.0;
    pub const PADDLE_HEIGHT_MIN: f32 = 40.0;
    pub const PADDLE_HEIGHT_MAX: f32 = 160.0;
    pub const PADDLE_SPEED: f32 = 6.0;

    /// First side to reach this wins the match
    pub const WIN_SCORE: u32 = 11;

    /// AI tolerance band around its target (pixels)
    pub const AI_DEAD_ZONE: f32 = 10.0;
    /// Per-tick chance that the easy AI jitters randomly
    pub const AI_EASY_NOISE: f64 = 0.3;

    /// Particles per burst
    pub const PARTICLE_COUNT: usize = 10;
    /// Particle lifetime (seconds)
    pub const PARTICLE_LIFETIME: f32 = 0.6;
}
