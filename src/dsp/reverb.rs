//! Reverb effect
//!
//! A multi-tap early-reflection reverb: each tap is a delayed, attenuated copy
//! of the dry signal overlaid onto the accumulating result. Taps read the dry
//! input, never the output of earlier taps.

use crate::dsp::effect::Effect;
use crate::engine::AudioBuffer;
use crate::impl_effect_common;
use crate::presets::EffectKind;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// One reflection of the dry signal
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReverbTap {
    pub delay_ms: f64,
    /// Attenuation in dB, positive values make the tap quieter
    pub attenuation_db: f64,
}

/// Reflections at 100/200/300 ms, each 5 dB quieter than the last
pub const DEFAULT_TAPS: [ReverbTap; 3] = [
    ReverbTap {
        delay_ms: 100.0,
        attenuation_db: 10.0,
    },
    ReverbTap {
        delay_ms: 200.0,
        attenuation_db: 15.0,
    },
    ReverbTap {
        delay_ms: 300.0,
        attenuation_db: 20.0,
    },
];

/// Multi-tap reverb
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reverb {
    taps: Vec<ReverbTap>,
}

impl Reverb {
    pub fn new() -> Self {
        Self::with_taps(DEFAULT_TAPS.to_vec())
    }

    pub fn with_taps(taps: Vec<ReverbTap>) -> Self {
        Self { taps }
    }

    pub fn taps(&self) -> &[ReverbTap] {
        &self.taps
    }
}

impl Default for Reverb {
    fn default() -> Self {
        Self::new()
    }
}

impl Effect for Reverb {
    impl_effect_common!(EffectKind::Reverb, "Reverb");

    fn apply(&self, buffer: &AudioBuffer) -> AudioBuffer {
        self.taps.iter().fold(buffer.clone(), |wet, tap| {
            let reflection = buffer.delayed(tap.delay_ms).gain_db(-tap.attenuation_db);
            wet.overlay(&reflection)
        })
    }

    fn get_params(&self) -> Value {
        json!({ "taps": self.taps })
    }
}
