//! Compressor
//!
//! Feed-forward downward compressor. The detector is the RMS of the samples in
//! the attack window preceding each sample; gain reduction ramps toward its
//! target over the attack time and relaxes over the release time.

use crate::engine::buffer::{db_to_linear, to_sample, AudioBuffer};
use serde::{Deserialize, Serialize};

/// Full-scale reference for the threshold (2^15)
const FULL_SCALE: f64 = 32768.0;

/// Compressor parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompressorParams {
    /// Threshold level in dBFS (-60 to 0 dB)
    pub threshold_db: f64,
    /// Compression ratio (1.0 to 20.0, representing 1:1 to 20:1)
    pub ratio: f64,
    /// Attack time in milliseconds, also the detector window
    pub attack_ms: f64,
    /// Release time in milliseconds
    pub release_ms: f64,
}

impl Default for CompressorParams {
    fn default() -> Self {
        Self {
            threshold_db: -20.0,
            ratio: 4.0,
            attack_ms: 5.0,
            release_ms: 50.0,
        }
    }
}

/// Dynamic range compressor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Compressor {
    params: CompressorParams,
}

impl Compressor {
    /// Create a compressor with default parameters (-20 dB, 4:1)
    pub fn new() -> Self {
        Self {
            params: CompressorParams::default(),
        }
    }

    pub fn params(&self) -> &CompressorParams {
        &self.params
    }

    /// Compress a copy of `buffer`
    pub fn process(&self, buffer: &AudioBuffer) -> AudioBuffer {
        let input = buffer.samples();
        let rate = buffer.sample_rate() as f64;

        let threshold = FULL_SCALE * db_to_linear(self.params.threshold_db);
        let attack_frames = (self.params.attack_ms * rate / 1000.0).max(1.0);
        let release_frames = (self.params.release_ms * rate / 1000.0).max(1.0);
        let window = (self.params.attack_ms * rate / 1000.0) as usize;
        let slope = 1.0 - 1.0 / self.params.ratio;

        let mut output = Vec::with_capacity(input.len());
        let mut window_sum_sq = 0.0_f64;
        let mut attenuation_db = 0.0_f64;

        for (i, &x) in input.iter().enumerate() {
            // Detector covers input[i - window .. i]
            let count = i.min(window);
            let rms = if count == 0 {
                0.0
            } else {
                (window_sum_sq.max(0.0) / count as f64).sqrt()
            };

            let over_db = if rms > 0.0 {
                (20.0 * (rms / threshold).log10()).max(0.0)
            } else {
                0.0
            };
            let max_attenuation = slope * over_db;

            if rms > threshold && attenuation_db <= max_attenuation {
                attenuation_db = (attenuation_db + max_attenuation / attack_frames).min(max_attenuation);
            } else {
                attenuation_db = (attenuation_db - max_attenuation / release_frames).max(0.0);
            }

            if attenuation_db == 0.0 {
                output.push(x);
            } else {
                output.push(to_sample(x as f64 * db_to_linear(-attenuation_db)));
            }

            window_sum_sq += (x as f64).powi(2);
            if i >= window {
                window_sum_sq -= (input[i - window] as f64).powi(2);
            }
        }

        buffer.with_samples(output)
    }
}

impl Default for Compressor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsp::tone::generate_tone;
    use crate::presets::Waveform;

    #[test]
    fn test_quiet_signal_untouched() {
        // -30 dBFS sine stays below a -20 dB threshold
        let quiet = generate_tone(440.0, 0.2, Waveform::Sine, 44100).gain_db(-30.0);
        let out = Compressor::new().process(&quiet);
        assert_eq!(out, quiet);
    }

    #[test]
    fn test_loud_signal_reduced() {
        let loud = generate_tone(440.0, 0.5, Waveform::Sine, 44100);
        let out = Compressor::new().process(&loud);

        assert_eq!(out.len(), loud.len());
        // Steady state: RMS ~ -3 dBFS, 17 dB over, 4:1 removes ~12.75 dB
        let tail_in = loud.samples()[11025..]
            .iter()
            .map(|&s| (s as f64).powi(2))
            .sum::<f64>();
        let tail_out = out.samples()[11025..]
            .iter()
            .map(|&s| (s as f64).powi(2))
            .sum::<f64>();
        let reduction_db = 10.0 * (tail_out / tail_in).log10();
        assert!(reduction_db < -8.0, "reduction {:.2} dB", reduction_db);
    }

    #[test]
    fn test_silence_untouched() {
        let silence = AudioBuffer::silent(1000, 44100);
        assert_eq!(Compressor::new().process(&silence), silence);
    }
}
