//! Delay (echo) effect
//!
//! A single feedback-free echo of the dry signal.

use crate::dsp::effect::Effect;
use crate::engine::AudioBuffer;
use crate::impl_effect_common;
use crate::presets::EffectKind;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

pub const DEFAULT_DELAY_MS: f64 = 400.0;
pub const DEFAULT_ATTENUATION_DB: f64 = 12.0;

/// Single-tap echo
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Delay {
    /// Delay time in milliseconds
    delay_ms: f64,
    /// Echo attenuation in dB
    attenuation_db: f64,
}

impl Delay {
    /// Create a delay with the given time and attenuation
    ///
    /// Negative delay times are treated as zero.
    pub fn new(delay_ms: f64, attenuation_db: f64) -> Self {
        Self {
            delay_ms: delay_ms.max(0.0),
            attenuation_db,
        }
    }

    pub fn delay_ms(&self) -> f64 {
        self.delay_ms
    }

    pub fn attenuation_db(&self) -> f64 {
        self.attenuation_db
    }
}

impl Default for Delay {
    fn default() -> Self {
        Self::new(DEFAULT_DELAY_MS, DEFAULT_ATTENUATION_DB)
    }
}

impl Effect for Delay {
    impl_effect_common!(EffectKind::Delay, "Delay");

    fn apply(&self, buffer: &AudioBuffer) -> AudioBuffer {
        let echo = buffer.delayed(self.delay_ms).gain_db(-self.attenuation_db);
        buffer.overlay(&echo)
    }

    fn get_params(&self) -> Value {
        json!({
            "delay_ms": self.delay_ms,
            "attenuation_db": self.attenuation_db,
        })
    }
}
