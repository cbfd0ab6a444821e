//! Audio Buffer Management
//!
//! Provides the core mono PCM buffer used by every stage of Moodwave.
//! Samples are signed 16-bit; all arithmetic saturates at the i16 range.
//! Transforms take `&self` and return a new buffer.

use crate::error::{MoodwaveError, Result};

// ============================================================================
// Constants
// ============================================================================

/// Default engine sample rate (44.1kHz)
pub const DEFAULT_SAMPLE_RATE: u32 = 44100;

/// Largest representable sample magnitude (0 dBFS)
pub const MAX_AMPLITUDE: f64 = i16::MAX as f64;

/// Longest buffer a transform may produce (2^28 samples, about 100 minutes at 44.1kHz)
pub const MAX_BUFFER_SAMPLES: usize = 1 << 28;

// ============================================================================
// Helper Functions
// ============================================================================

/// Convert decibels to linear amplitude
#[inline]
pub fn db_to_linear(db: f64) -> f64 {
    10.0_f64.powf(db / 20.0)
}

/// Convert linear amplitude to decibels
///
/// Returns `f64::NEG_INFINITY` for zero input.
#[inline]
pub fn linear_to_db(linear: f64) -> f64 {
    if linear <= 0.0 {
        f64::NEG_INFINITY
    } else {
        20.0 * linear.log10()
    }
}

/// Round and clamp a floating point value into the i16 sample range
#[inline]
pub fn to_sample(value: f64) -> i16 {
    value.round().clamp(i16::MIN as f64, i16::MAX as f64) as i16
}

/// Number of whole samples covering `secs` seconds at `sample_rate`
#[inline]
pub fn seconds_to_samples(secs: f64, sample_rate: u32) -> usize {
    if secs <= 0.0 || !secs.is_finite() {
        return 0;
    }
    (secs * sample_rate as f64) as usize
}

/// Number of whole samples covering `ms` milliseconds at `sample_rate`
#[inline]
pub fn ms_to_samples(ms: f64, sample_rate: u32) -> usize {
    if ms <= 0.0 || !ms.is_finite() {
        return 0;
    }
    (ms * sample_rate as f64 / 1000.0) as usize
}

// ============================================================================
// Audio Buffer
// ============================================================================

/// Mono 16-bit PCM buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioBuffer {
    samples: Vec<i16>,
    sample_rate: u32,
}

impl AudioBuffer {
    /// Create a buffer from existing samples
    pub fn new(samples: Vec<i16>, sample_rate: u32) -> Result<Self> {
        if sample_rate == 0 {
            return Err(MoodwaveError::InvalidSampleRate { rate: sample_rate });
        }
        Ok(Self {
            samples,
            sample_rate,
        })
    }

    /// Create an empty buffer
    pub fn empty(sample_rate: u32) -> Self {
        Self {
            samples: Vec::new(),
            sample_rate: sample_rate.max(1),
        }
    }

    /// Create a silent buffer of `num_samples` samples
    pub fn silent(num_samples: usize, sample_rate: u32) -> Self {
        Self {
            samples: vec![0; num_samples],
            sample_rate: sample_rate.max(1),
        }
    }

    /// Create a silent buffer lasting `ms` milliseconds
    pub fn silent_ms(ms: f64, sample_rate: u32) -> Self {
        Self::silent(ms_to_samples(ms, sample_rate), sample_rate)
    }

    /// New buffer at this buffer's sample rate holding `samples`
    pub fn with_samples(&self, samples: Vec<i16>) -> Self {
        Self {
            samples,
            sample_rate: self.sample_rate,
        }
    }

    pub fn samples(&self) -> &[i16] {
        &self.samples
    }

    pub fn into_samples(self) -> Vec<i16> {
        self.samples
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Always mono
    pub fn channels(&self) -> u16 {
        1
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Duration in seconds
    pub fn duration_secs(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate as f64
    }

    /// Largest absolute sample value
    pub fn peak(&self) -> u16 {
        self.samples
            .iter()
            .map(|s| s.unsigned_abs())
            .max()
            .unwrap_or(0)
    }

    /// Peak level in dBFS
    pub fn peak_db(&self) -> f64 {
        linear_to_db(self.peak() as f64 / MAX_AMPLITUDE)
    }

    /// Root mean square of the raw sample values
    pub fn rms(&self) -> f64 {
        if self.samples.is_empty() {
            return 0.0;
        }
        let sum_sq: f64 = self.samples.iter().map(|&s| (s as f64).powi(2)).sum();
        (sum_sq / self.samples.len() as f64).sqrt()
    }

    /// Whether every sample is zero
    pub fn is_silent(&self) -> bool {
        self.samples.iter().all(|&s| s == 0)
    }

    /// Append another buffer's samples to this one
    ///
    /// Used by composers while building a clip they own.
    pub fn extend_from(&mut self, other: &AudioBuffer) {
        self.samples.extend_from_slice(&other.samples);
    }

    /// Append `num_samples` samples of silence
    pub fn extend_silence(&mut self, num_samples: usize) {
        self.samples.resize(self.samples.len() + num_samples, 0);
    }

    /// Keep at most the first `num_samples` samples
    pub fn truncated(&self, num_samples: usize) -> Self {
        let end = num_samples.min(self.samples.len());
        Self {
            samples: self.samples[..end].to_vec(),
            sample_rate: self.sample_rate,
        }
    }

    /// Apply a gain offset in decibels
    pub fn gain_db(&self, db: f64) -> Self {
        if db == 0.0 {
            return self.clone();
        }
        self.scaled(db_to_linear(db))
    }

    /// Multiply every sample by a linear factor
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            samples: self
                .samples
                .iter()
                .map(|&s| to_sample(s as f64 * factor))
                .collect(),
            sample_rate: self.sample_rate,
        }
    }

    /// Linear fade from silence over the first `ms` milliseconds
    pub fn fade_in(&self, ms: f64) -> Self {
        let fade = ms_to_samples(ms, self.sample_rate).min(self.samples.len());
        let mut samples = self.samples.clone();
        for (i, sample) in samples.iter_mut().take(fade).enumerate() {
            *sample = to_sample(*sample as f64 * i as f64 / fade as f64);
        }
        Self {
            samples,
            sample_rate: self.sample_rate,
        }
    }

    /// Linear fade to silence over the last `ms` milliseconds
    pub fn fade_out(&self, ms: f64) -> Self {
        let len = self.samples.len();
        let fade = ms_to_samples(ms, self.sample_rate).min(len);
        let mut samples = self.samples.clone();
        for (i, sample) in samples.iter_mut().skip(len - fade).enumerate() {
            let remaining = fade - i - 1;
            *sample = to_sample(*sample as f64 * remaining as f64 / fade as f64);
        }
        Self {
            samples,
            sample_rate: self.sample_rate,
        }
    }

    /// Prepend `ms` milliseconds of silence
    pub fn delayed(&self, ms: f64) -> Self {
        let lead = ms_to_samples(ms, self.sample_rate);
        let mut samples = Vec::with_capacity(lead + self.samples.len());
        samples.resize(lead, 0);
        samples.extend_from_slice(&self.samples);
        Self {
            samples,
            sample_rate: self.sample_rate,
        }
    }

    /// Mix `other` onto this buffer, aligned at time zero
    ///
    /// The result keeps this buffer's length. `other` contributes silence past
    /// its end and is cut where this buffer ends.
    pub fn overlay(&self, other: &AudioBuffer) -> Self {
        let mut samples = self.samples.clone();
        for (dst, &src) in samples.iter_mut().zip(other.samples.iter()) {
            *dst = dst.saturating_add(src);
        }
        Self {
            samples,
            sample_rate: self.sample_rate,
        }
    }

    /// Scale so the peak reaches full scale
    ///
    /// Silent buffers are already normalized and come back unchanged.
    pub fn normalize(&self) -> Self {
        let peak = self.peak();
        if peak == 0 {
            return self.clone();
        }
        self.scaled(MAX_AMPLITUDE / peak as f64)
    }

    /// Reinterpret the same samples at a different sample rate
    ///
    /// The data is untouched, so playback speed and pitch change together.
    pub fn with_sample_rate(&self, sample_rate: u32) -> Result<Self> {
        Self::new(self.samples.clone(), sample_rate)
    }

    /// Convert to `target_rate` by linear interpolation
    ///
    /// Output length is `len * target_rate / sample_rate`, rounded down.
    pub fn resample(&self, target_rate: u32) -> Result<Self> {
        if target_rate == 0 {
            return Err(MoodwaveError::InvalidSampleRate { rate: target_rate });
        }
        if target_rate == self.sample_rate || self.samples.is_empty() {
            return Ok(Self {
                samples: self.samples.clone(),
                sample_rate: target_rate,
            });
        }

        let len = self.samples.len();
        let out_len = len as u128 * target_rate as u128 / self.sample_rate as u128;
        if out_len > MAX_BUFFER_SAMPLES as u128 {
            return Err(MoodwaveError::InvalidParameter {
                param: "sample_rate".to_string(),
                value: target_rate.to_string(),
                expected: format!("a rate producing at most {} samples", MAX_BUFFER_SAMPLES),
            });
        }
        let out_len = out_len as usize;
        let step = self.sample_rate as f64 / target_rate as f64;
        let last = len - 1;

        let samples = (0..out_len)
            .map(|i| {
                let pos = i as f64 * step;
                let i0 = (pos.floor() as usize).min(last);
                let i1 = (i0 + 1).min(last);
                let frac = pos - i0 as f64;
                let a = self.samples[i0] as f64;
                let b = self.samples[i1] as f64;
                to_sample(a + (b - a) * frac)
            })
            .collect();

        Ok(Self {
            samples,
            sample_rate: target_rate,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn ramp(len: usize) -> AudioBuffer {
        AudioBuffer::new((0..len).map(|i| (i as i16) * 10).collect(), 1000).unwrap()
    }

    #[test]
    fn test_db_to_linear() {
        assert_relative_eq!(db_to_linear(0.0), 1.0);
        assert_relative_eq!(db_to_linear(-20.0), 0.1, epsilon = 1e-12);
        assert!((db_to_linear(-6.0) - 0.501187).abs() < 1e-5);
    }

    #[test]
    fn test_linear_to_db() {
        assert_relative_eq!(linear_to_db(1.0), 0.0);
        assert_eq!(linear_to_db(0.0), f64::NEG_INFINITY);
    }

    #[test]
    fn test_zero_sample_rate_rejected() {
        let result = AudioBuffer::new(vec![0; 10], 0);
        assert!(matches!(
            result,
            Err(MoodwaveError::InvalidSampleRate { rate: 0 })
        ));
    }

    #[test]
    fn test_duration() {
        let buf = AudioBuffer::silent(22050, 44100);
        assert_relative_eq!(buf.duration_secs(), 0.5);
        assert_eq!(buf.channels(), 1);
    }

    #[test]
    fn test_silent_ms() {
        let buf = AudioBuffer::silent_ms(100.0, 44100);
        assert_eq!(buf.len(), 4410);
        assert!(buf.is_silent());
    }

    #[test]
    fn test_gain_saturates() {
        let buf = AudioBuffer::new(vec![20000, -20000, 100], 44100).unwrap();
        let boosted = buf.gain_db(12.0);
        assert_eq!(boosted.samples()[0], i16::MAX);
        assert_eq!(boosted.samples()[1], i16::MIN);
        assert_eq!(boosted.samples()[2], 398);
        // Input untouched
        assert_eq!(buf.samples()[0], 20000);
    }

    #[test]
    fn test_overlay_keeps_base_length() {
        let base = AudioBuffer::new(vec![1, 2, 3, 4], 44100).unwrap();
        let short = AudioBuffer::new(vec![10, 10], 44100).unwrap();
        let long = AudioBuffer::new(vec![1; 10], 44100).unwrap();

        assert_eq!(base.overlay(&short).samples(), &[11, 12, 3, 4]);
        assert_eq!(base.overlay(&long).samples(), &[2, 3, 4, 5]);
    }

    #[test]
    fn test_overlay_with_silence_is_identity() {
        let base = ramp(100);
        let silence = AudioBuffer::silent(base.len(), base.sample_rate());
        assert_eq!(base.overlay(&silence), base);
    }

    #[test]
    fn test_overlay_saturates() {
        let a = AudioBuffer::new(vec![30000, -30000], 44100).unwrap();
        let mixed = a.overlay(&a);
        assert_eq!(mixed.samples(), &[i16::MAX, i16::MIN]);
    }

    #[test]
    fn test_delayed_prepends_silence() {
        let buf = AudioBuffer::new(vec![5, 6], 1000).unwrap();
        let delayed = buf.delayed(3.0);
        assert_eq!(delayed.samples(), &[0, 0, 0, 5, 6]);
    }

    #[test]
    fn test_fades() {
        let buf = AudioBuffer::new(vec![1000; 10], 1000).unwrap();
        let faded = buf.fade_in(4.0).fade_out(4.0);
        let s = faded.samples();
        assert_eq!(s[0], 0);
        assert_eq!(s[2], 500);
        assert_eq!(s[5], 1000);
        assert_eq!(s[9], 0);
    }

    #[test]
    fn test_fade_longer_than_buffer() {
        let buf = AudioBuffer::new(vec![1000; 4], 1000).unwrap();
        let faded = buf.fade_in(50.0);
        assert_eq!(faded.len(), 4);
        assert_eq!(faded.samples()[0], 0);
    }

    #[test]
    fn test_normalize_reaches_full_scale() {
        let buf = AudioBuffer::new(vec![100, -200, 50], 44100).unwrap();
        let norm = buf.normalize();
        assert_eq!(norm.peak(), i16::MAX as u16);
        assert_eq!(norm.samples()[1], -i16::MAX);
    }

    #[test]
    fn test_normalize_silence_is_noop() {
        let buf = AudioBuffer::silent(100, 44100);
        assert_eq!(buf.normalize(), buf);
    }

    #[test]
    fn test_resample_lengths() {
        let buf = ramp(1000);
        assert_eq!(buf.resample(500).unwrap().len(), 500);
        assert_eq!(buf.resample(2000).unwrap().len(), 2000);
        assert_eq!(buf.resample(1000).unwrap(), buf);
    }

    #[test]
    fn test_resample_rejects_oversized_output() {
        let buf = AudioBuffer::new(vec![1, 2, 3, 4], 1).unwrap();
        assert!(matches!(
            buf.resample(u32::MAX),
            Err(MoodwaveError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_resample_interpolates() {
        let buf = AudioBuffer::new(vec![0, 100, 200, 300], 1000).unwrap();
        let up = buf.resample(2000).unwrap();
        assert_eq!(&up.samples()[..6], &[0, 50, 100, 150, 200, 250]);
        assert_eq!(up.sample_rate(), 2000);
    }

    #[test]
    fn test_with_sample_rate_keeps_data() {
        let buf = ramp(10);
        let fast = buf.with_sample_rate(2000).unwrap();
        assert_eq!(fast.samples(), buf.samples());
        assert_relative_eq!(fast.duration_secs(), buf.duration_secs() / 2.0);
    }

    #[test]
    fn test_truncated() {
        let buf = ramp(10);
        assert_eq!(buf.truncated(4).len(), 4);
        assert_eq!(buf.truncated(40).len(), 10);
    }
}
