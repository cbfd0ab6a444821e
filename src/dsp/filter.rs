//! First-order RC filters
//!
//! One-pole low-pass and high-pass filters with a fixed cutoff. These are
//! gentle (6 dB/octave) and used for brightness shaping, not surgery.

use crate::dsp::effect::Effect;
use crate::engine::buffer::{to_sample, AudioBuffer};
use crate::impl_effect_common;
use crate::presets::EffectKind;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::f64::consts::PI;

/// Cutoff used by the genre filter on dark moods
pub const DARK_LOW_PASS_HZ: f64 = 3000.0;

/// Cutoff used by the genre filter on bright moods
pub const BRIGHT_HIGH_PASS_HZ: f64 = 100.0;

/// Filter response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterType {
    LowPass,
    HighPass,
}

/// One-pole RC filter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OnePoleFilter {
    filter_type: FilterType,
    cutoff_hz: f64,
}

impl OnePoleFilter {
    pub fn new(filter_type: FilterType, cutoff_hz: f64) -> Self {
        Self {
            filter_type,
            cutoff_hz: cutoff_hz.max(1.0),
        }
    }

    pub fn low_pass(cutoff_hz: f64) -> Self {
        Self::new(FilterType::LowPass, cutoff_hz)
    }

    pub fn high_pass(cutoff_hz: f64) -> Self {
        Self::new(FilterType::HighPass, cutoff_hz)
    }

    /// Genre filter for a mood: darken below 0.5 brightness, else trim lows
    pub fn for_brightness(brightness: f64) -> Self {
        if brightness < 0.5 {
            Self::low_pass(DARK_LOW_PASS_HZ)
        } else {
            Self::high_pass(BRIGHT_HIGH_PASS_HZ)
        }
    }

    pub fn filter_type(&self) -> FilterType {
        self.filter_type
    }

    pub fn cutoff_hz(&self) -> f64 {
        self.cutoff_hz
    }

    /// Filter a copy of `buffer`
    pub fn process(&self, buffer: &AudioBuffer) -> AudioBuffer {
        let input = buffer.samples();
        let Some(&first) = input.first() else {
            return buffer.clone();
        };

        let rc = 1.0 / (2.0 * PI * self.cutoff_hz);
        let dt = 1.0 / buffer.sample_rate() as f64;
        let mut output = Vec::with_capacity(input.len());
        output.push(first);

        match self.filter_type {
            FilterType::LowPass => {
                // y[n] = y[n-1] + alpha * (x[n] - y[n-1])
                let alpha = dt / (rc + dt);
                let mut last = first as f64;
                for &x in &input[1..] {
                    last += alpha * (x as f64 - last);
                    output.push(to_sample(last));
                }
            }
            FilterType::HighPass => {
                // y[n] = alpha * (y[n-1] + x[n] - x[n-1])
                let alpha = rc / (rc + dt);
                let mut last_out = first as f64;
                let mut last_in = first as f64;
                for &x in &input[1..] {
                    last_out = alpha * (last_out + x as f64 - last_in);
                    last_in = x as f64;
                    output.push(to_sample(last_out));
                }
            }
        }

        buffer.with_samples(output)
    }
}

/// Low-pass a copy of `buffer` at `cutoff_hz`
pub fn low_pass_filter(buffer: &AudioBuffer, cutoff_hz: f64) -> AudioBuffer {
    OnePoleFilter::low_pass(cutoff_hz).process(buffer)
}

/// High-pass a copy of `buffer` at `cutoff_hz`
pub fn high_pass_filter(buffer: &AudioBuffer, cutoff_hz: f64) -> AudioBuffer {
    OnePoleFilter::high_pass(cutoff_hz).process(buffer)
}

impl Effect for OnePoleFilter {
    impl_effect_common!(EffectKind::Filter, "Filter");

    fn apply(&self, buffer: &AudioBuffer) -> AudioBuffer {
        self.process(buffer)
    }

    fn get_params(&self) -> Value {
        json!({
            "filter_type": self.filter_type,
            "cutoff_hz": self.cutoff_hz,
        })
    }
}
