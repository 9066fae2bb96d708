//! Presentation controller
//!
//! Owns one simulation session plus everything around it: screens, settings,
//! stats, translations, particles and pending audio/haptic cues. Hosts feed it
//! frames, seconds and input; it feeds the host cues and draw data.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::consts::*;
use crate::feedback::Cue;
use crate::i18n::{self, I18n, I18nError};
use crate::particles::ParticleSystem;
use crate::persistence::KeyValueStore;
use crate::settings::Settings;
use crate::sim::{self, Difficulty, Direction, GameEvent, GameMode, GameState, MatchPhase, Side};
use crate::stats::Stats;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Menu,
    Game,
    Pause,
    GameOver,
    Settings,
    Stats,
}

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowUp,
    ArrowDown,
    W,
    S,
    Pause,
    Quit,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value
    pub fn from_dom(key: &str) -> Option<Self> {
        match key {
            "ArrowUp" => Some(Key::ArrowUp),
            "ArrowDown" => Some(Key::ArrowDown),
            "w" | "W" => Some(Key::W),
            "s" | "S" => Some(Key::S),
            " " | "p" | "P" => Some(Key::Pause),
            "Escape" => Some(Key::Quit),
            _ => None,
        }
    }
}

/// Commands for the non-match screens. Which keys map to what depends on the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuCommand {
    StartOnePlayer,
    StartTwoPlayer,
    OpenSettings,
    OpenStats,
    Back,
    Restart,
    CycleDifficulty,
    ToggleSound,
    ToggleVibration,
    PaddleBigger,
    PaddleSmaller,
    CycleLanguage,
    ResetStats,
}

impl MenuCommand {
    /// Map a DOM `KeyboardEvent.key` value on `screen`
    pub fn from_dom(key: &str, screen: Screen) -> Option<Self> {
        use MenuCommand::*;
        let key = key.to_lowercase();
        match (screen, key.as_str()) {
            (Screen::Menu, "1") => Some(StartOnePlayer),
            (Screen::Menu, "2") => Some(StartTwoPlayer),
            (Screen::Menu, "o") => Some(OpenSettings),
            (Screen::Menu, "t") => Some(OpenStats),
            (Screen::Settings, "d") => Some(CycleDifficulty),
            (Screen::Settings, "m") => Some(ToggleSound),
            (Screen::Settings, "v") => Some(ToggleVibration),
            (Screen::Settings, "+" | "=") => Some(PaddleBigger),
            (Screen::Settings, "-") => Some(PaddleSmaller),
            (Screen::Settings, "l") => Some(CycleLanguage),
            (Screen::Stats, "x") => Some(ResetStats),
            (Screen::Settings | Screen::Stats, "backspace") => Some(Back),
            (Screen::Pause | Screen::GameOver, "r") => Some(Restart),
            _ => None,
        }
    }
}

/// Paddle size change per settings keypress
const PADDLE_SIZE_STEP: f32 = 10.0;

/// Format seconds as `MM:SS`
pub fn format_clock(secs: u32) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

pub struct App<S: KeyValueStore> {
    pub game: GameState,
    pub settings: Settings,
    pub stats: Stats,
    pub i18n: I18n,
    pub particles: ParticleSystem,
    screen: Screen,
    store: S,
    cues: Vec<Cue>,
    /// Separate from the session RNG so effects never perturb gameplay
    fx_rng: Pcg32,
}

impl<S: KeyValueStore> App<S> {
    pub fn new(store: S, seed: u64, browser_lang: Option<&str>) -> Self {
        let mut settings = Settings::load(&store);
        let stats = Stats::load(&store);

        let lang = i18n::detect_language(Some(settings.language.as_str()), browser_lang);
        let i18n = I18n::new(&lang);
        settings.language = i18n.current_language().to_string();

        let mut game = GameState::new(seed);
        sim::set_paddle_height(&mut game, settings.paddle_size);
        sim::set_difficulty(&mut game, settings.difficulty);

        Self {
            game,
            settings,
            stats,
            i18n,
            particles: ParticleSystem::new(),
            screen: Screen::Menu,
            store,
            cues: Vec::new(),
            fx_rng: Pcg32::seed_from_u64(seed ^ 0x9e37_79b9_7f4a_7c15),
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Navigate between menu-level screens. Ignored while a match is active.
    pub fn show(&mut self, screen: Screen) {
        if self.game.is_active() {
            return;
        }
        if screen == Screen::Stats {
            log::debug!(
                "Stats: {} games, {}% wins",
                self.stats.total_games,
                self.stats.win_rate()
            );
        }
        self.screen = screen;
    }

    // === Match control ===

    pub fn start(&mut self, mode: GameMode) {
        sim::start_match(&mut self.game, mode);
        self.particles.clear();
        self.cues.clear();
        self.screen = Screen::Game;
        log::info!(target: "analytics", "game_start mode={}", mode.as_str());
    }

    /// Start another match in the same mode (pause menu "restart", game over "replay")
    pub fn restart(&mut self) {
        self.start(self.game.mode);
    }

    pub fn toggle_pause(&mut self) {
        if !self.game.is_active() {
            return;
        }
        sim::pause_toggle(&mut self.game);
        self.screen = match self.game.phase {
            MatchPhase::Paused => Screen::Pause,
            _ => Screen::Game,
        };
    }

    pub fn quit_to_menu(&mut self) {
        sim::stop_match(&mut self.game);
        self.particles.clear();
        self.screen = Screen::Menu;
    }

    /// Animation-frame callback: one simulation tick plus `dt` seconds of effects
    pub fn frame(&mut self, dt: f32) -> Vec<GameEvent> {
        self.particles.update(dt);
        let mut events = Vec::new();
        sim::tick(&mut self.game, &mut events);
        for event in &events {
            self.dispatch(event);
        }
        events
    }

    /// One-second timer callback
    pub fn second_elapsed(&mut self) -> Vec<GameEvent> {
        let mut events = Vec::new();
        sim::clock_second(&mut self.game, &mut events);
        events
    }

    /// Cues queued since the last call
    pub fn take_cues(&mut self) -> Vec<Cue> {
        std::mem::take(&mut self.cues)
    }

    fn dispatch(&mut self, event: &GameEvent) {
        if let Some(cue) = Cue::for_event(event, &self.settings) {
            self.cues.push(cue);
        }
        match event {
            GameEvent::ParticleBurst { pos } => self.particles.burst(*pos, &mut self.fx_rng),
            GameEvent::GameOver { score, winner } => {
                self.stats.record_match(score.p1 > score.p2);
                self.stats.save(&mut self.store);
                self.screen = Screen::GameOver;
                log::info!(
                    target: "analytics",
                    "game_end mode={} score_p1={} score_p2={} winner={:?} duration={} ticks={}",
                    self.game.mode.as_str(),
                    score.p1,
                    score.p2,
                    winner,
                    self.game.elapsed_secs,
                    self.game.time_ticks
                );
            }
            _ => {}
        }
    }

    // === Input ===

    fn key_target(&self, key: Key) -> Option<(Side, Direction)> {
        let two_player = self.game.mode == GameMode::TwoPlayer;
        match key {
            Key::W => Some((Side::Left, Direction::Up)),
            Key::S => Some((Side::Left, Direction::Down)),
            Key::ArrowUp if two_player => Some((Side::Right, Direction::Up)),
            Key::ArrowDown if two_player => Some((Side::Right, Direction::Down)),
            Key::ArrowUp => Some((Side::Left, Direction::Up)),
            Key::ArrowDown => Some((Side::Left, Direction::Down)),
            Key::Pause | Key::Quit => None,
        }
    }

    pub fn key_down(&mut self, key: Key) {
        match key {
            Key::Pause => self.toggle_pause(),
            Key::Quit => self.quit_to_menu(),
            _ => {
                if self.game.phase != MatchPhase::Running {
                    return;
                }
                if let Some((side, dir)) = self.key_target(key) {
                    sim::set_paddle_direction(&mut self.game, side, dir);
                }
            }
        }
    }

    pub fn key_up(&mut self, key: Key) {
        if self.game.phase != MatchPhase::Running {
            return;
        }
        if let Some((side, _)) = self.key_target(key) {
            sim::set_paddle_direction(&mut self.game, side, Direction::None);
        }
    }

    /// Pointer/touch at field coordinates: center the owning paddle on `pos.y`.
    ///
    /// One player always drives the left paddle; with two players the half of
    /// the field under the pointer picks the paddle.
    pub fn pointer_move(&mut self, pos: Vec2) {
        if !self.game.is_active() {
            return;
        }
        let side = if self.game.mode == GameMode::TwoPlayer && pos.x >= FIELD_WIDTH / 2.0 {
            Side::Right
        } else {
            Side::Left
        };
        let top = pos.y - self.game.paddle(side).height / 2.0;
        sim::set_paddle_position(&mut self.game, side, top);
    }

    pub fn menu_command(&mut self, cmd: MenuCommand) {
        match cmd {
            MenuCommand::StartOnePlayer if !self.game.is_active() => self.start(GameMode::OnePlayer),
            MenuCommand::StartTwoPlayer if !self.game.is_active() => self.start(GameMode::TwoPlayer),
            MenuCommand::StartOnePlayer | MenuCommand::StartTwoPlayer => {}
            MenuCommand::OpenSettings => self.show(Screen::Settings),
            MenuCommand::OpenStats => self.show(Screen::Stats),
            MenuCommand::Back => self.show(Screen::Menu),
            MenuCommand::Restart => self.restart(),
            MenuCommand::CycleDifficulty => {
                let next = match self.settings.difficulty {
                    Difficulty::Easy => Difficulty::Normal,
                    Difficulty::Normal => Difficulty::Hard,
                    Difficulty::Hard => Difficulty::Easy,
                };
                self.set_difficulty(next);
            }
            MenuCommand::ToggleSound => self.set_sound(!self.settings.sound),
            MenuCommand::ToggleVibration => self.set_vibration(!self.settings.vibration),
            MenuCommand::PaddleBigger => {
                self.set_paddle_size(self.settings.paddle_size + PADDLE_SIZE_STEP)
            }
            MenuCommand::PaddleSmaller => {
                self.set_paddle_size(self.settings.paddle_size - PADDLE_SIZE_STEP)
            }
            MenuCommand::CycleLanguage => {
                let langs = &i18n::SUPPORTED_LANGUAGES;
                let idx = langs
                    .iter()
                    .position(|l| *l == self.i18n.current_language())
                    .unwrap_or(0);
                let next = langs[(idx + 1) % langs.len()];
                if let Err(e) = self.set_language(next) {
                    log::warn!("Language switch failed: {}", e);
                }
            }
            MenuCommand::ResetStats => self.reset_stats(),
        }
    }

    // === Settings ===

    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.settings.difficulty = difficulty;
        sim::set_difficulty(&mut self.game, difficulty);
        self.settings.save(&mut self.store);
    }

    pub fn set_sound(&mut self, on: bool) {
        self.settings.sound = on;
        self.settings.save(&mut self.store);
    }

    pub fn set_vibration(&mut self, on: bool) {
        self.settings.vibration = on;
        self.settings.save(&mut self.store);
    }

    pub fn set_paddle_size(&mut self, px: f32) {
        self.settings.set_paddle_size(px);
        sim::set_paddle_height(&mut self.game, self.settings.paddle_size);
        self.settings.save(&mut self.store);
    }

    pub fn set_language(&mut self, lang: &str) -> Result<(), I18nError> {
        self.i18n.set_language(lang)?;
        self.settings.language = lang.to_string();
        self.settings.save(&mut self.store);
        Ok(())
    }

    pub fn reset_stats(&mut self) {
        self.stats.reset();
        self.stats.save(&mut self.store);
    }

    // === Text ===

    pub fn player2_label(&self) -> String {
        match self.game.mode {
            GameMode::OnePlayer => self.i18n.t("game.ai"),
            GameMode::TwoPlayer => self.i18n.t("game.player2"),
        }
    }

    pub fn clock_text(&self) -> String {
        format_clock(self.game.elapsed_secs)
    }

    fn on_off(&self, on: bool) -> String {
        self.i18n.t(if on { "settings.on" } else { "settings.off" })
    }

    /// Overlay lines for the current screen, empty while playing
    pub fn screen_lines(&self) -> Vec<String> {
        let t = |key: &str| self.i18n.t(key);
        match self.screen {
            Screen::Game => Vec::new(),
            Screen::Pause => vec![
                t("game.paused"),
                format!("[Space] {}", t("game.resume")),
                format!("[R] {}", t("game.restart")),
                format!("[Esc] {}", t("game.quit")),
            ],
            Screen::GameOver => {
                let (title, message) = self.game_over_text();
                vec![
                    title,
                    message,
                    self.clock_text(),
                    format!("[R] {}", t("game.restart")),
                    format!("[Esc] {}", t("game.quit")),
                ]
            }
            Screen::Menu => vec![
                t("menu.title"),
                format!("[1] {}", t("menu.onePlayer")),
                format!("[2] {}", t("menu.twoPlayer")),
                format!("[O] {}", t("menu.settings")),
                format!("[T] {}", t("menu.stats")),
            ],
            Screen::Settings => vec![
                t("menu.settings"),
                format!(
                    "[D] {}: {}",
                    t("settings.difficulty"),
                    t(format!("settings.{}", self.settings.difficulty.as_str()).as_str())
                ),
                format!("[M] {}: {}", t("settings.sound"), self.on_off(self.settings.sound)),
                format!(
                    "[V] {}: {}",
                    t("settings.vibration"),
                    self.on_off(self.settings.vibration)
                ),
                format!(
                    "[+/-] {}: {}px",
                    t("settings.paddleSize"),
                    self.settings.paddle_size
                ),
                format!(
                    "[L] {}: {}",
                    t("settings.language"),
                    i18n::language_name(self.i18n.current_language())
                ),
                format!("[Esc] {}", t("settings.back")),
            ],
            Screen::Stats => vec![
                t("menu.stats"),
                format!("{}: {}", t("stats.bestStreak"), self.stats.best_streak),
                format!("{}: {}", t("stats.totalGames"), self.stats.total_games),
                format!("{}: {}", t("stats.totalWins"), self.stats.total_wins),
                format!("{}: {}%", t("stats.winRate"), self.stats.win_rate()),
                format!("[X] {}", t("stats.reset")),
                format!("[Esc] {}", t("settings.back")),
            ],
        }
    }

    /// Title and message for the game-over screen
    pub fn game_over_text(&self) -> (String, String) {
        let score = self.game.score;
        let p1_won = score.p1 > score.p2;
        let title = match self.game.mode {
            GameMode::OnePlayer if p1_won => self.i18n.t("game.youWin"),
            GameMode::OnePlayer => self.i18n.t("game.youLose"),
            GameMode::TwoPlayer => {
                let name = if p1_won {
                    self.i18n.t("game.player1")
                } else {
                    self.i18n.t("game.player2")
                };
                format!("{} {}", name, self.i18n.t("game.wins"))
            }
        };
        let message = format!("{}: {} - {}", self.i18n.t("game.finalScore"), score.p1, score.p2);
        (title, message)
    }
}
