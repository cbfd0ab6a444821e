//! Mood transformer
//!
//! Moves an existing clip from one mood preset toward another.

use crate::dsp::{change_speed, high_pass_filter, low_pass_filter};
use crate::engine::AudioBuffer;
use crate::error::Result;
use crate::presets::MoodPreset;
use log::debug;

/// Cutoff applied when the target mood is much brighter
pub const BRIGHTEN_HIGH_PASS_HZ: f64 = 200.0;

/// Cutoff applied when the target mood is much darker
pub const DARKEN_LOW_PASS_HZ: f64 = 4000.0;

/// dB of gain per unit of energy difference
const ENERGY_GAIN_DB: f64 = 10.0;

/// Brightness difference that triggers a filter
const BRIGHTNESS_STEP: f64 = 0.2;

/// Tempo ratios closer to 1 than this are left alone
const TEMPO_TOLERANCE: f64 = 0.1;

/// Move a clip from `source` mood toward `target` mood
///
/// Energy becomes a gain offset, a large brightness difference becomes a
/// high-pass or low-pass filter, and a tempo ratio beyond 10% becomes a
/// speed change. The result is resampled to `target_rate` only when the
/// speed changes.
pub fn mood_transform(
    audio: &AudioBuffer,
    source: &MoodPreset,
    target: &MoodPreset,
    target_rate: u32,
) -> Result<AudioBuffer> {
    let energy_delta = target.energy - source.energy;
    let mut result = audio.gain_db(energy_delta * ENERGY_GAIN_DB);

    let brightness_delta = target.brightness - source.brightness;
    if brightness_delta > BRIGHTNESS_STEP {
        result = high_pass_filter(&result, BRIGHTEN_HIGH_PASS_HZ);
    } else if brightness_delta < -BRIGHTNESS_STEP {
        result = low_pass_filter(&result, DARKEN_LOW_PASS_HZ);
    }

    let tempo_ratio = target.mean_tempo() / source.mean_tempo();
    if (tempo_ratio - 1.0).abs() > TEMPO_TOLERANCE {
        result = change_speed(&result, tempo_ratio, target_rate)?;
    }

    debug!(
        "Mood transform {} -> {}: {:+.1} dB, brightness {:+.2}, tempo x{:.3}",
        source.name,
        target.name,
        energy_delta * ENERGY_GAIN_DB,
        brightness_delta,
        tempo_ratio
    );
    Ok(result)
}
