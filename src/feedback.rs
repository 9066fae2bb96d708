//! Audio and haptic cues for game events
//!
//! Maps simulation events to a short tone and/or a vibration pulse. The host
//! plays them (Web Audio + `navigator.vibrate` in the browser).

use crate::settings::Settings;
use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Ball hits paddle
    PaddleHit,
    /// Ball hits top/bottom wall
    WallBounce,
    /// Point scored
    Score,
    /// Match over
    GameOver,
}

impl SoundEffect {
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::PaddleHit { .. } => Some(SoundEffect::PaddleHit),
            GameEvent::WallBounce { .. } => Some(SoundEffect::WallBounce),
            GameEvent::Score { .. } => Some(SoundEffect::Score),
            GameEvent::GameOver { .. } => Some(SoundEffect::GameOver),
            _ => None,
        }
    }

    /// Sine tone for this effect
    pub fn tone(&self) -> Tone {
        match self {
            SoundEffect::PaddleHit => Tone::new(800.0, 0.1),
            SoundEffect::WallBounce => Tone::new(600.0, 0.05),
            SoundEffect::Score => Tone::new(1000.0, 0.2),
            SoundEffect::GameOver => Tone::new(400.0, 0.3),
        }
    }

    /// Vibration pulse length, for the effects that have one
    pub fn vibration_ms(&self) -> Option<u32> {
        match self {
            SoundEffect::PaddleHit => Some(50),
            SoundEffect::Score => Some(100),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub frequency: f32,
    /// Seconds
    pub duration: f32,
}

impl Tone {
    pub fn new(frequency: f32, duration: f32) -> Self {
        Self { frequency, duration }
    }
}

/// What the host should actually play, after applying the user's toggles
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cue {
    pub effect: SoundEffect,
    pub tone: Option<Tone>,
    pub vibration_ms: Option<u32>,
}

impl Cue {
    /// `None` if the event has no cue or both outputs are switched off
    pub fn for_event(event: &GameEvent, settings: &Settings) -> Option<Self> {
        let effect = SoundEffect::for_event(event)?;
        let tone = settings.sound.then(|| effect.tone());
        let vibration_ms = effect.vibration_ms().filter(|_| settings.vibration);
        if tone.is_none() && vibration_ms.is_none() {
            return None;
        }
        Some(Self {
            effect,
            tone,
            vibration_ms,
        })
    }
}
