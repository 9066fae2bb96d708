//! Player preferences
//!
//! Persisted as one JSON blob in the key/value store.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::consts::{PADDLE_HEIGHT, PADDLE_HEIGHT_MAX, PADDLE_HEIGHT_MIN};
use crate::persistence::{self, KeyValueStore};
use crate::sim::Difficulty;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Language code (`en`, `ko`, ...)
    pub language: String,
    /// Play tones on game events
    pub sound: bool,
    /// Vibrate on paddle hits and points
    pub vibration: bool,
    /// Paddle height in pixels
    pub paddle_size: f32,
    /// AI difficulty. Unknown values load as normal without discarding the rest.
    #[serde(deserialize_with = "lenient_difficulty")]
    pub difficulty: Difficulty,
}

fn lenient_difficulty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Difficulty, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(match value.as_str() {
        Some(s) => Difficulty::parse_or_default(s),
        None => {
            log::warn!("Ignoring non-string difficulty {}", value);
            Difficulty::default()
        }
    })
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            language: "en".to_string(),
            sound: true,
            vibration: true,
            paddle_size: PADDLE_HEIGHT,
            difficulty: Difficulty::Normal,
        }
    }
}

impl Settings {
    /// Storage key
    const STORAGE_KEY: &'static str = "arcade_pong_settings";

    /// Set paddle size, clamped to the supported range
    pub fn set_paddle_size(&mut self, px: f32) {
        self.paddle_size = px.clamp(PADDLE_HEIGHT_MIN, PADDLE_HEIGHT_MAX);
    }

    /// Load settings, falling back to defaults when missing or corrupt
    pub fn load(store: &dyn KeyValueStore) -> Self {
        match persistence::load_json::<Settings>(store, Self::STORAGE_KEY) {
            Some(mut settings) => {
                // Hand-edited storage can carry an out-of-range size
                settings.set_paddle_size(settings.paddle_size);
                log::info!("Loaded settings");
                settings
            }
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    pub fn save(&self, store: &mut dyn KeyValueStore) {
        match persistence::save_json(store, Self::STORAGE_KEY, self) {
            Ok(()) => log::info!("Settings saved"),
            Err(e) => log::warn!("Failed to save settings: {}", e),
        }
    }
}
