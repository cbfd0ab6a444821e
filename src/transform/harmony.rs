//! Harmony generator

use crate::dsp::pitch_shift;
use crate::engine::AudioBuffer;
use crate::error::Result;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

/// Level of the harmony voice relative to the dry clip
pub const HARMONY_ATTENUATION_DB: f64 = 8.0;

/// Interval of the harmony voice above the dry clip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HarmonyInterval {
    /// Major third
    Third,
    /// Perfect fifth
    Fifth,
    Octave,
}

impl HarmonyInterval {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "third" => Some(HarmonyInterval::Third),
            "fifth" => Some(HarmonyInterval::Fifth),
            "octave" => Some(HarmonyInterval::Octave),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            HarmonyInterval::Third => "third",
            HarmonyInterval::Fifth => "fifth",
            HarmonyInterval::Octave => "octave",
        }
    }

    pub fn semitones(&self) -> f64 {
        match self {
            HarmonyInterval::Third => 4.0,
            HarmonyInterval::Fifth => 7.0,
            HarmonyInterval::Octave => 12.0,
        }
    }
}

/// Overlay a quieter copy of `audio` shifted up by `interval`
pub fn add_harmony_interval(audio: &AudioBuffer, interval: HarmonyInterval) -> Result<AudioBuffer> {
    let voice = pitch_shift(audio, interval.semitones())?.gain_db(-HARMONY_ATTENUATION_DB);
    debug!("Harmony: {} above, -{} dB", interval.name(), HARMONY_ATTENUATION_DB);
    Ok(audio.overlay(&voice))
}

/// Add a harmony voice by interval name
///
/// Unrecognized names leave the clip unchanged.
pub fn add_harmony(audio: &AudioBuffer, interval: &str) -> Result<AudioBuffer> {
    match HarmonyInterval::from_name(interval) {
        Some(interval) => add_harmony_interval(audio, interval),
        None => {
            warn!("Unknown harmony type '{}', leaving audio unchanged", interval);
            Ok(audio.clone())
        }
    }
}
