//! Pitch and time transforms
//!
//! Both work by resampling, so they are coupled: a pitch shift changes the
//! duration and a time stretch changes the perceived pitch.

use crate::engine::{AudioBuffer, MAX_BUFFER_SAMPLES};
use crate::error::{MoodwaveError, Result};
use log::debug;

/// Frequency ratio for a shift of `semitones`
pub fn semitone_ratio(semitones: f64) -> f64 {
    2.0_f64.powf(semitones / 12.0)
}

/// Shift pitch by `semitones`
///
/// The samples are reinterpreted at `floor(rate * 2^(s/12))` and resampled
/// back to the original rate. +12 halves the length, -12 doubles it.
pub fn pitch_shift(buffer: &AudioBuffer, semitones: f64) -> Result<AudioBuffer> {
    if !semitones.is_finite() {
        return Err(MoodwaveError::InvalidParameter {
            param: "pitch_shift".to_string(),
            value: semitones.to_string(),
            expected: "a finite number of semitones".to_string(),
        });
    }
    if semitones == 0.0 {
        return Ok(buffer.clone());
    }

    let rate = buffer.sample_rate();
    let shifted_rate = (rate as f64 * semitone_ratio(semitones)).floor();
    if shifted_rate < 1.0 || shifted_rate > u32::MAX as f64 {
        return Err(MoodwaveError::InvalidParameter {
            param: "pitch_shift".to_string(),
            value: semitones.to_string(),
            expected: "a shift that keeps the sample rate in range".to_string(),
        });
    }

    debug!(
        "Pitch shift {:+} semitones: {} Hz reinterpreted as {} Hz",
        semitones, rate, shifted_rate
    );
    buffer.with_sample_rate(shifted_rate as u32)?.resample(rate)
}

/// Stretch duration by `1 / rate`, keeping the sample rate
///
/// Output length is `floor(n / rate)`. Output sample `i` reads the input at
/// `i * (n - 1) / (new_len - 1)` with linear interpolation, truncated toward
/// zero. Pitch moves with the stretch.
pub fn time_stretch(buffer: &AudioBuffer, rate: f64) -> Result<AudioBuffer> {
    if !(rate > 0.0) || !rate.is_finite() {
        return Err(MoodwaveError::InvalidParameter {
            param: "stretch".to_string(),
            value: rate.to_string(),
            expected: "greater than 0".to_string(),
        });
    }
    if rate == 1.0 || buffer.is_empty() {
        return Ok(buffer.clone());
    }

    let input = buffer.samples();
    let len = input.len();
    let new_len = (len as f64 / rate).floor();
    if !new_len.is_finite() || new_len > MAX_BUFFER_SAMPLES as f64 {
        return Err(MoodwaveError::InvalidParameter {
            param: "stretch".to_string(),
            value: rate.to_string(),
            expected: format!("a rate producing at most {} samples", MAX_BUFFER_SAMPLES),
        });
    }
    let new_len = new_len as usize;
    let last = len - 1;

    let span = new_len.saturating_sub(1).max(1) as f64;

    let samples = (0..new_len)
        .map(|i| {
            let pos = (i * last) as f64 / span;
            let i0 = (pos.floor() as usize).min(last);
            let i1 = (i0 + 1).min(last);
            let frac = pos - i0 as f64;
            let a = input[i0] as f64;
            let b = input[i1] as f64;
            (a + (b - a) * frac) as i16
        })
        .collect();

    Ok(buffer.with_samples(samples))
}

/// Play back `ratio` times faster, then resample to `target_rate`
///
/// Used for tempo changes. Pitch rises with the speed.
pub fn change_speed(buffer: &AudioBuffer, ratio: f64, target_rate: u32) -> Result<AudioBuffer> {
    if !(ratio > 0.0) || !ratio.is_finite() {
        return Err(MoodwaveError::InvalidParameter {
            param: "tempo_change".to_string(),
            value: ratio.to_string(),
            expected: "greater than 0".to_string(),
        });
    }

    let new_rate = (buffer.sample_rate() as f64 * ratio).floor();
    if new_rate < 1.0 || new_rate > u32::MAX as f64 {
        return Err(MoodwaveError::InvalidParameter {
            param: "tempo_change".to_string(),
            value: ratio.to_string(),
            expected: "a ratio that keeps the sample rate in range".to_string(),
        });
    }

    debug!(
        "Speed x{}: {} Hz reinterpreted as {} Hz, resampled to {} Hz",
        ratio,
        buffer.sample_rate(),
        new_rate,
        target_rate
    );
    buffer.with_sample_rate(new_rate as u32)?.resample(target_rate)
}
