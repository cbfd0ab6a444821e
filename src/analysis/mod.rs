//! Feature Analyzer
//!
//! Coarse descriptors of a clip, computed on the peak-normalized signal so
//! they do not depend on the recording level.

mod suggest;

pub use suggest::{suggest, CreativeSuggestion, SuggestionParams, Suggestions};

use crate::engine::AudioBuffer;
use serde::{Deserialize, Serialize};

/// Loudness, brightness and range of a clip
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AudioFeatures {
    /// RMS of the normalized signal, 0.0 to 1.0
    pub energy: f64,
    /// Zero crossings per sample, a cheap stand-in for spectral centroid
    pub brightness: f64,
    /// Normalized max minus normalized min, 0.0 to 2.0
    pub dynamic_range: f64,
}

/// Sign of a sample, zero for zero
#[inline]
fn sign(sample: i16) -> i32 {
    sample.signum() as i32
}

/// Analyze a clip
///
/// Empty and all-zero clips give all-zero features.
pub fn analyze(buffer: &AudioBuffer) -> AudioFeatures {
    let samples = buffer.samples();
    let peak = buffer.peak() as f64;
    if samples.is_empty() || peak == 0.0 {
        return AudioFeatures::default();
    }

    let n = samples.len() as f64;
    let sum_sq: f64 = samples.iter().map(|&s| (s as f64 / peak).powi(2)).sum();
    let energy = (sum_sq / n).sqrt();

    // Each full crossing moves the sign by 2, a touch of zero by 1
    let sign_changes: i32 = samples
        .windows(2)
        .map(|w| (sign(w[1]) - sign(w[0])).abs())
        .sum();
    let brightness = sign_changes as f64 / (2.0 * n);

    let (min, max) = samples
        .iter()
        .fold((i16::MAX, i16::MIN), |(lo, hi), &s| (lo.min(s), hi.max(s)));
    let dynamic_range = (max as f64 - min as f64) / peak;

    AudioFeatures {
        energy,
        brightness,
        dynamic_range,
    }
}
