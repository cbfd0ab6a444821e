//! Distortion effect
//!
//! Drives the signal into the i16 ceiling with a fixed boost, then squashes
//! it with the compressor. The clipping from the boost is the grit.

use crate::dsp::compressor::Compressor;
use crate::dsp::effect::Effect;
use crate::engine::AudioBuffer;
use crate::impl_effect_common;
use crate::presets::EffectKind;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

pub const DEFAULT_BOOST_DB: f64 = 10.0;

/// Boost-then-compress distortion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Distortion {
    boost_db: f64,
    compressor: Compressor,
}

impl Distortion {
    pub fn new(boost_db: f64, compressor: Compressor) -> Self {
        Self {
            boost_db,
            compressor,
        }
    }

    pub fn boost_db(&self) -> f64 {
        self.boost_db
    }
}

impl Default for Distortion {
    fn default() -> Self {
        Self::new(DEFAULT_BOOST_DB, Compressor::new())
    }
}

impl Effect for Distortion {
    impl_effect_common!(EffectKind::Distortion, "Distortion");

    fn apply(&self, buffer: &AudioBuffer) -> AudioBuffer {
        self.compressor.process(&buffer.gain_db(self.boost_db))
    }

    fn get_params(&self) -> Value {
        let params = self.compressor.params();
        json!({
            "boost_db": self.boost_db,
            "threshold_db": params.threshold_db,
            "ratio": params.ratio,
            "attack_ms": params.attack_ms,
            "release_ms": params.release_ms,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsp::tone::generate_tone;
    use crate::presets::Waveform;

    #[test]
    fn test_quiet_input_is_boosted() {
        // -40 dBFS stays under threshold even after +10 dB
        let input = generate_tone(220.0, 0.1, Waveform::Sine, 44100).gain_db(-40.0);
        let out = Distortion::default().apply(&input);
        let gain = 20.0 * (out.rms() / input.rms()).log10();
        assert!((gain - 10.0).abs() < 0.2, "gain {:.2}", gain);
    }

    #[test]
    fn test_loud_input_clips_then_compresses() {
        let input = generate_tone(220.0, 0.3, Waveform::Sine, 44100).gain_db(-3.0);
        let out = Distortion::default().apply(&input);
        assert_eq!(out.len(), input.len());
        assert!(out.rms() < input.rms());
    }

    #[test]
    fn test_params() {
        let params = Distortion::default().get_params();
        assert_eq!(params["boost_db"].as_f64().unwrap(), 10.0);
        assert_eq!(params["ratio"].as_f64().unwrap(), 4.0);
    }
}
