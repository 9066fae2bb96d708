//! Simulation module
//!
//! All gameplay logic lives here. This module must stay headless:
//! - One call to `tick` = one step, no delta-time scaling
//! - Session RNG is seeded, so a seed plus an input sequence replays exactly
//! - No rendering, audio, storage or platform dependencies

pub mod ai;
pub mod collision;
pub mod event;
pub mod state;
pub mod tick;

pub use collision::{Rect, accelerate, deflection, hit_position, resolve_paddle_hit};
pub use event::{EventSink, GameEvent, NullSink};
pub use state::{
    Ball, Difficulty, Direction, GameMode, GameState, MatchPhase, Paddle, Score, Side,
    field_center,
};
pub use tick::{
    clock_second, pause_toggle, set_difficulty, set_paddle_direction, set_paddle_height,
    set_paddle_position, start_match, stop_match, tick,
};
