//! Audio and vibration output using Web APIs
//!
//! Tones are synthesized on the fly - no sound files.

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use crate::feedback::{Cue, Tone};

/// Peak gain of a tone before its decay
const TONE_GAIN: f32 = 0.3;

/// Audio manager for the game
pub struct AudioManager {
    ctx: Option<AudioContext>,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        // Fails outside a secure context or on very old browsers
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self { ctx }
    }

    /// Resume audio context (required after user gesture)
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }

    /// Play whatever the cue asks for. Errors are logged, never returned.
    pub fn play(&self, cue: &Cue) {
        if let Some(tone) = cue.tone {
            self.play_tone(tone);
        }
        if let Some(ms) = cue.vibration_ms {
            vibrate(ms);
        }
    }

    fn play_tone(&self, tone: Tone) {
        let Some(ctx) = &self.ctx else { return };

        // Browsers start contexts suspended until a user gesture
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        let Some((osc, gain)) = self.create_osc(ctx, tone.frequency, OscillatorType::Sine) else {
            log::warn!("Audio playback failed ({} Hz)", tone.frequency);
            return;
        };
        let t = ctx.current_time();
        let end = t + tone.duration as f64;

        gain.gain().set_value_at_time(TONE_GAIN, t).ok();
        gain.gain().exponential_ramp_to_value_at_time(0.01, end).ok();

        osc.start().ok();
        osc.stop_with_when(end).ok();
    }

    /// Create an oscillator routed through a gain node
    fn create_osc(
        &self,
        ctx: &AudioContext,
        freq: f32,
        osc_type: OscillatorType,
    ) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(osc_type);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }
}

/// Haptic pulse; silently ignored where `navigator.vibrate` is missing
fn vibrate(ms: u32) {
    if let Some(window) = web_sys::window() {
        let _ = window.navigator().vibrate_with_duration(ms);
    }
}
