//! Notifications from the simulation to whatever presents it
//!
//! The core never calls rendering, audio or storage code directly; it pushes
//! [`GameEvent`]s into an [`EventSink`] and carries on.

use glam::Vec2;

use super::state::{Score, Side};

#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// Ball bounced off the top or bottom wall
    WallBounce { pos: Vec2 },
    /// Ball was returned by a paddle; `hits` counts returns since the last point
    PaddleHit { side: Side, pos: Vec2, hits: u32 },
    /// A point was scored; `pos` is where the ball left the field
    Score { scorer: Side, pos: Vec2, score: Score },
    /// Request a particle burst at a field position
    ParticleBurst { pos: Vec2 },
    /// Scoreboard/clock should be redrawn
    UiRefresh { score: Score, elapsed_secs: u32 },
    /// A frame should be drawn
    Render,
    /// Match finished
    GameOver { score: Score, winner: Side },
}

/// Receiver of game events. Fire-and-forget: nothing flows back into the core.
pub trait EventSink {
    fn emit(&mut self, event: GameEvent);
}

impl EventSink for Vec<GameEvent> {
    fn emit(&mut self, event: GameEvent) {
        self.push(event);
    }
}

impl<F: FnMut(GameEvent)> EventSink for F {
    fn emit(&mut self, event: GameEvent) {
        self(event)
    }
}

/// Sink that drops everything (headless runs that only inspect state)
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&mut self, _event: GameEvent) {}
}
