//! Per-tick simulation step and match control
//!
//! The host calls [`tick`] once per frame and [`clock_second`] once per second.
//! All other entry points are the control surface used by input handlers and menus.

use super::ai;
use super::collision::resolve_paddle_hit;
use super::event::{EventSink, GameEvent};
use super::state::{Difficulty, Direction, GameMode, GameState, MatchPhase, Score, Side};
use crate::consts::*;

/// Advance the match by one tick. Does nothing unless the match is running.
///
/// Order: ball, paddles, AI, paddle collisions, scoring, win check, UI/render.
pub fn tick(state: &mut GameState, sink: &mut impl EventSink) {
    if state.phase != MatchPhase::Running {
        return;
    }

    state.time_ticks += 1;

    if state.ball.update() {
        sink.emit(GameEvent::WallBounce { pos: state.ball.pos });
    }

    state.paddle1.update();
    state.paddle2.update();

    // The AI reads post-move positions; its choice takes effect next tick
    if state.mode == GameMode::OnePlayer {
        let dir = ai::decide(&state.ball, &state.paddle2, state.difficulty, &mut state.rng);
        state.paddle2.set_direction(dir);
    }

    for side in [Side::Left, Side::Right] {
        let paddle = match side {
            Side::Left => &state.paddle1,
            Side::Right => &state.paddle2,
        };
        if resolve_paddle_hit(&mut state.ball, paddle) {
            state.hits += 1;
            let pos = state.ball.pos;
            sink.emit(GameEvent::PaddleHit {
                side,
                pos,
                hits: state.hits,
            });
            sink.emit(GameEvent::ParticleBurst { pos });
        }
    }

    let scorer = if state.ball.pos.x < 0.0 {
        Some(Side::Right)
    } else if state.ball.pos.x > FIELD_WIDTH {
        Some(Side::Left)
    } else {
        None
    };

    if let Some(scorer) = scorer {
        let pos = state.ball.pos;
        state.score.award(scorer);
        state.hits = 0;
        sink.emit(GameEvent::Score {
            scorer,
            pos,
            score: state.score,
        });
        sink.emit(GameEvent::ParticleBurst { pos });
        state.ball.reset(&mut state.rng);
    }

    if let Some(winner) = state.score.winner() {
        state.phase = MatchPhase::Ended;
        log::info!(
            "Match over: {} - {} ({:?} wins)",
            state.score.p1,
            state.score.p2,
            winner
        );
        sink.emit(GameEvent::GameOver {
            score: state.score,
            winner,
        });
        return;
    }

    sink.emit(GameEvent::UiRefresh {
        score: state.score,
        elapsed_secs: state.elapsed_secs,
    });
    sink.emit(GameEvent::Render);
}

/// One-second timer callback. Counts match time while running; never touches physics.
pub fn clock_second(state: &mut GameState, sink: &mut impl EventSink) {
    if state.phase != MatchPhase::Running {
        return;
    }
    state.elapsed_secs += 1;
    sink.emit(GameEvent::UiRefresh {
        score: state.score,
        elapsed_secs: state.elapsed_secs,
    });
}

/// Start a fresh match from any phase: zero score and clock, serve, center paddles
pub fn start_match(state: &mut GameState, mode: GameMode) {
    state.mode = mode;
    state.score = Score::default();
    state.hits = 0;
    state.elapsed_secs = 0;
    state.time_ticks = 0;

    state.ball.reset(&mut state.rng);
    for side in [Side::Left, Side::Right] {
        let height = state.paddle_height;
        let paddle = state.paddle_mut(side);
        paddle.set_height(height);
        paddle.recenter();
    }
    apply_paddle_speeds(state);

    state.phase = MatchPhase::Running;
    log::info!(
        "Match started: mode={} difficulty={}",
        mode.as_str(),
        state.difficulty.as_str()
    );
}

/// Running <-> Paused. Ignored in other phases.
///
/// Pausing stops both paddles; key releases are not seen while paused.
pub fn pause_toggle(state: &mut GameState) {
    state.phase = match state.phase {
        MatchPhase::Running => {
            state.paddle1.set_direction(Direction::None);
            state.paddle2.set_direction(Direction::None);
            MatchPhase::Paused
        }
        MatchPhase::Paused => MatchPhase::Running,
        other => other,
    };
}

/// Abandon the current match. Safe to call repeatedly.
pub fn stop_match(state: &mut GameState) {
    if state.is_active() {
        state.phase = MatchPhase::Idle;
        log::info!("Match stopped at {} - {}", state.score.p1, state.score.p2);
    }
}

pub fn set_paddle_direction(state: &mut GameState, side: Side, dir: Direction) {
    state.paddle_mut(side).set_direction(dir);
}

/// Absolute placement of a paddle's top edge (pointer/touch control)
pub fn set_paddle_position(state: &mut GameState, side: Side, y: f32) {
    state.paddle_mut(side).set_position(y);
}

/// Resize both paddles, keeping them inside the field
pub fn set_paddle_height(state: &mut GameState, height: f32) {
    if !height.is_finite() {
        return;
    }
    let height = height.clamp(PADDLE_HEIGHT_MIN, PADDLE_HEIGHT_MAX);
    state.paddle_height = height;
    state.paddle1.set_height(height);
    state.paddle2.set_height(height);
}

pub fn set_difficulty(state: &mut GameState, difficulty: Difficulty) {
    state.difficulty = difficulty;
    apply_paddle_speeds(state);
}

fn apply_paddle_speeds(state: &mut GameState) {
    state.paddle1.set_speed(PADDLE_SPEED);
    let speed = state.paddle2_speed();
    state.paddle2.set_speed(speed);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::event::NullSink;
    use crate::sim::state::field_center;
    use glam::Vec2;

    fn running(mode: GameMode) -> GameState {
        let mut state = GameState::new(12345);
        start_match(&mut state, mode);
        state
    }

    #[test]
    fn test_idle_tick_is_noop() {
        let mut state = GameState::new(1);
        let pos = state.ball.pos;
        let mut events = Vec::new();
        tick(&mut state, &mut events);
        assert_eq!(state.ball.pos, pos);
        assert!(events.is_empty());
    }

    #[test]
    fn test_ball_past_left_edge_scores_for_p2() {
        let mut state = running(GameMode::OnePlayer);
        state.ball.pos.x = -1.0;
        state.ball.vel = Vec2::new(-1.0, 0.0);
        state.hits = 4;

        let mut events = Vec::new();
        tick(&mut state, &mut events);

        assert_eq!(state.score.p1, 0);
        assert_eq!(state.score.p2, 1);
        assert_eq!(state.hits, 0);
        assert_eq!(state.ball.pos, field_center());
        assert_eq!(state.ball.pos.x, FIELD_WIDTH / 2.0);
        assert_eq!(state.ball.vel.x.abs(), BALL_SPEED_INIT);
        let scores = events
            .iter()
            .filter(|e| matches!(e, GameEvent::Score { scorer: Side::Right, .. }))
            .count();
        assert_eq!(scores, 1);
    }

    #[test]
    fn test_ball_past_right_edge_scores_for_p1() {
        let mut state = running(GameMode::TwoPlayer);
        state.ball.pos = Vec2::new(FIELD_WIDTH + 1.0, 100.0);
        state.ball.vel = Vec2::new(1.0, 0.0);

        tick(&mut state, &mut Vec::new());
        assert_eq!(state.score.p1, 1);
        assert_eq!(state.score.p2, 0);
    }

    #[test]
    fn test_win_ends_match_and_freezes_state() {
        let mut state = running(GameMode::TwoPlayer);
        state.score.p1 = WIN_SCORE - 1;
        state.ball.pos = Vec2::new(FIELD_WIDTH + 1.0, 100.0);
        state.ball.vel = Vec2::new(1.0, 0.0);

        let mut events = Vec::new();
        tick(&mut state, &mut events);

        assert_eq!(state.phase, MatchPhase::Ended);
        assert!(matches!(
            events.last(),
            Some(GameEvent::GameOver { winner: Side::Left, .. })
        ));
        assert!(!events.iter().any(|e| matches!(e, GameEvent::Render)));

        let ball = state.ball.pos;
        let paddle = state.paddle1.pos;
        set_paddle_direction(&mut state, Side::Left, Direction::Down);
        for _ in 0..10 {
            tick(&mut state, &mut events);
        }
        assert_eq!(state.ball.pos, ball);
        assert_eq!(state.paddle1.pos, paddle);
    }

    #[test]
    fn test_paused_match_does_not_advance() {
        let mut state = running(GameMode::OnePlayer);
        pause_toggle(&mut state);
        assert_eq!(state.phase, MatchPhase::Paused);

        let pos = state.ball.pos;
        tick(&mut state, &mut Vec::new());
        clock_second(&mut state, &mut Vec::new());
        assert_eq!(state.ball.pos, pos);
        assert_eq!(state.elapsed_secs, 0);

        pause_toggle(&mut state);
        assert_eq!(state.phase, MatchPhase::Running);
        tick(&mut state, &mut Vec::new());
        assert_ne!(state.ball.pos, pos);
    }

    #[test]
    fn test_tick_counter_follows_running_ticks() {
        let mut state = running(GameMode::OnePlayer);
        for _ in 0..5 {
            tick(&mut state, &mut NullSink);
        }
        pause_toggle(&mut state);
        tick(&mut state, &mut NullSink);
        assert_eq!(state.time_ticks, 5);

        start_match(&mut state, GameMode::OnePlayer);
        assert_eq!(state.time_ticks, 0);
    }

    #[test]
    fn test_pause_stops_held_paddles() {
        let mut state = running(GameMode::TwoPlayer);
        set_paddle_direction(&mut state, Side::Left, Direction::Down);
        set_paddle_direction(&mut state, Side::Right, Direction::Up);

        pause_toggle(&mut state);
        pause_toggle(&mut state);
        let (p1, p2) = (state.paddle1.pos, state.paddle2.pos);
        tick(&mut state, &mut Vec::new());
        assert_eq!(state.paddle1.pos, p1);
        assert_eq!(state.paddle2.pos, p2);
    }

    #[test]
    fn test_stop_is_idempotent() {
        let mut state = running(GameMode::OnePlayer);
        stop_match(&mut state);
        assert_eq!(state.phase, MatchPhase::Idle);
        stop_match(&mut state);
        assert_eq!(state.phase, MatchPhase::Idle);
    }

    #[test]
    fn test_restart_from_ended_resets() {
        let mut state = running(GameMode::OnePlayer);
        state.phase = MatchPhase::Ended;
        state.score.p2 = WIN_SCORE;
        state.elapsed_secs = 90;
        state.paddle1.pos.y = 0.0;

        start_match(&mut state, GameMode::TwoPlayer);
        assert_eq!(state.phase, MatchPhase::Running);
        assert_eq!(state.score, Score::default());
        assert_eq!(state.elapsed_secs, 0);
        assert_eq!(state.paddle1.center_y(), FIELD_HEIGHT / 2.0);
        assert_eq!(state.mode, GameMode::TwoPlayer);
    }

    #[test]
    fn test_paddle_hit_emits_events() {
        let mut state = running(GameMode::TwoPlayer);
        let paddle = state.paddle1.clone();
        // One tick away from touching the left paddle's face
        state.ball.pos = Vec2::new(paddle.pos.x + paddle.width + 4.0 + 2.0, paddle.center_y());
        state.ball.vel = Vec2::new(-4.0, 0.0);

        let mut events = Vec::new();
        tick(&mut state, &mut events);

        assert!(state.ball.vel.x > 0.0);
        assert_eq!(state.hits, 1);
        assert!(events.iter().any(|e| matches!(
            e,
            GameEvent::PaddleHit { side: Side::Left, hits: 1, .. }
        )));
        assert!(events.iter().any(|e| matches!(e, GameEvent::ParticleBurst { .. })));
    }

    #[test]
    fn test_ai_steers_right_paddle_in_one_player() {
        let mut state = running(GameMode::OnePlayer);
        state.ball.pos = Vec2::new(400.0, state.paddle2.center_y() + 200.0);
        state.ball.vel = Vec2::new(0.5, 0.0);

        tick(&mut state, &mut Vec::new());
        assert_eq!(state.paddle2.direction(), Direction::Down);
        assert_eq!(state.paddle2.vel_y, PADDLE_SPEED * Difficulty::Normal.speed_factor());
    }

    #[test]
    fn test_two_player_leaves_right_paddle_alone() {
        let mut state = running(GameMode::TwoPlayer);
        state.ball.pos = Vec2::new(400.0, 550.0);
        state.ball.vel = Vec2::new(0.5, 0.0);

        tick(&mut state, &mut Vec::new());
        assert_eq!(state.paddle2.direction(), Direction::None);
    }

    #[test]
    fn test_difficulty_scales_ai_speed() {
        let mut state = running(GameMode::OnePlayer);
        set_difficulty(&mut state, Difficulty::Hard);
        set_paddle_direction(&mut state, Side::Right, Direction::Up);
        assert_eq!(state.paddle2.vel_y, -PADDLE_SPEED * 1.2);
        assert_eq!(state.paddle1.speed, PADDLE_SPEED);
    }

    #[test]
    fn test_paddle_height_is_clamped_and_applied() {
        let mut state = running(GameMode::TwoPlayer);
        set_paddle_height(&mut state, 1000.0);
        assert_eq!(state.paddle1.height, PADDLE_HEIGHT_MAX);
        assert_eq!(state.paddle2.height, PADDLE_HEIGHT_MAX);
        assert!(state.paddle1.pos.y + state.paddle1.height <= FIELD_HEIGHT);

        set_paddle_height(&mut state, 1.0);
        assert_eq!(state.paddle_height, PADDLE_HEIGHT_MIN);
    }

    #[test]
    fn test_pointer_position_is_clamped() {
        let mut state = running(GameMode::TwoPlayer);
        set_paddle_position(&mut state, Side::Right, -50.0);
        assert_eq!(state.paddle2.pos.y, 0.0);

        set_paddle_position(&mut state, Side::Right, f32::NAN);
        assert_eq!(state.paddle2.pos.y, 0.0);
        set_paddle_height(&mut state, f32::NAN);
        assert_eq!(state.paddle2.height, PADDLE_HEIGHT);
    }

    #[test]
    fn test_clock_counts_running_seconds() {
        let mut state = running(GameMode::OnePlayer);
        let mut events = Vec::new();
        for _ in 0..3 {
            clock_second(&mut state, &mut events);
        }
        assert_eq!(state.elapsed_secs, 3);
        assert_eq!(
            events.last(),
            Some(&GameEvent::UiRefresh {
                score: state.score,
                elapsed_secs: 3
            })
        );
    }

    #[test]
    fn test_determinism() {
        let mut a = running(GameMode::OnePlayer);
        let mut b = running(GameMode::OnePlayer);
        set_difficulty(&mut a, Difficulty::Easy);
        set_difficulty(&mut b, Difficulty::Easy);

        for _ in 0..2000 {
            tick(&mut a, &mut Vec::new());
            tick(&mut b, &mut Vec::new());
        }
        assert_eq!(a.ball.pos, b.ball.pos);
        assert_eq!(a.score, b.score);
        assert_eq!(a.paddle2.pos, b.paddle2.pos);
    }
}
