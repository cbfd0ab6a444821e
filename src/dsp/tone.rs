//! Tone generator
//!
//! Full-scale single-frequency waveforms. Phase is computed directly from the
//! sample index, so segments always start at phase zero.

use crate::engine::buffer::{seconds_to_samples, to_sample, AudioBuffer, MAX_AMPLITUDE};
use crate::presets::Waveform;
use std::f64::consts::PI;

/// Sign of `x`, with zero mapping to zero
#[inline]
fn sign(x: f64) -> f64 {
    if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Unit-amplitude value of `waveform` at `cycles` = f·t
#[inline]
pub fn waveform_value(waveform: Waveform, cycles: f64) -> f64 {
    match waveform {
        Waveform::Sine => (2.0 * PI * cycles).sin(),
        Waveform::Square => sign((2.0 * PI * cycles).sin()),
        Waveform::Sawtooth => 2.0 * (cycles - (cycles + 0.5).floor()),
        Waveform::Triangle => 1.0 - 4.0 * (cycles.round() - cycles).abs(),
    }
}

/// Synthesize `duration_secs` of `waveform` at `frequency_hz`
///
/// Zero or negative durations give an empty buffer.
pub fn generate_tone(
    frequency_hz: f64,
    duration_secs: f64,
    waveform: Waveform,
    sample_rate: u32,
) -> AudioBuffer {
    generate_tone_samples(
        frequency_hz,
        seconds_to_samples(duration_secs, sample_rate),
        waveform,
        sample_rate,
    )
}

/// Synthesize exactly `num_samples` samples of `waveform` at `frequency_hz`
///
/// Sample `i` is identical to sample `i` of any longer tone.
pub fn generate_tone_samples(
    frequency_hz: f64,
    num_samples: usize,
    waveform: Waveform,
    sample_rate: u32,
) -> AudioBuffer {
    let rate = sample_rate.max(1) as f64;

    let samples: Vec<i16> = (0..num_samples)
        .map(|i| {
            let cycles = frequency_hz * i as f64 / rate;
            to_sample(MAX_AMPLITUDE * waveform_value(waveform, cycles))
        })
        .collect();

    AudioBuffer::empty(sample_rate).with_samples(samples)
}
