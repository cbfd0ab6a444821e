//! Bass composer
//!
//! A sustained root note under the melody.

use super::{beat_secs, note_to_frequency, render_len, validate_tempo};
use crate::dsp::generate_tone_samples;
use crate::engine::{ms_to_samples, seconds_to_samples, AudioBuffer};
use crate::error::{MoodwaveError, Result};
use crate::presets::{MoodPreset, Waveform};
use log::debug;

pub const BASS_OCTAVE: i32 = 2;

/// Bass note length in beats
pub const BASS_NOTE_BEATS: f64 = 2.0;

const BASS_GAIN_DB: f64 = -10.0;
const BASS_FADE_MS: f64 = 100.0;

/// Compose a root-note bass line exactly `length` samples long
///
/// One sine note on the mood's root in octave 2, two beats long, repeated
/// until it covers `length` and then cut.
pub fn compose_bass(
    length: usize,
    mood: &MoodPreset,
    tempo_bpm: f64,
    sample_rate: u32,
) -> Result<AudioBuffer> {
    validate_tempo(tempo_bpm)?;
    if sample_rate == 0 {
        return Err(MoodwaveError::InvalidSampleRate { rate: sample_rate });
    }

    let frequency = note_to_frequency(mood.root(), BASS_OCTAVE);
    let note_len = seconds_to_samples(beat_secs(tempo_bpm) * BASS_NOTE_BEATS, sample_rate);
    let fade_len = ms_to_samples(BASS_FADE_MS, sample_rate);
    let note = generate_tone_samples(
        frequency,
        render_len(note_len, length, fade_len),
        Waveform::Sine,
        sample_rate,
    )
    .gain_db(BASS_GAIN_DB)
    .fade_in(BASS_FADE_MS)
    .fade_out(BASS_FADE_MS);

    if note.is_empty() {
        debug!("Bass note shorter than one sample at {} BPM", tempo_bpm);
        return Ok(AudioBuffer::silent(length, sample_rate));
    }

    let mut bass = AudioBuffer::empty(sample_rate);
    while bass.len() < length {
        bass.extend_from(&note);
    }

    debug!(
        "Bass line: {:.2} Hz root, {} repeats",
        frequency,
        bass.len() / note.len()
    );
    Ok(bass.truncated(length))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presets::PresetRegistry;

    #[test]
    fn test_matches_requested_length() {
        let registry = PresetRegistry::new();
        let mood = registry.mood("dark").unwrap();

        for length in [0, 1, 12345, 441000] {
            let bass = compose_bass(length, mood, 90.0, 44100).unwrap();
            assert_eq!(bass.len(), length);
        }
    }

    #[test]
    fn test_notes_repeat_every_two_beats() {
        let registry = PresetRegistry::new();
        let mood = registry.mood("happy").unwrap();
        // 120 BPM: two beats is one second
        let bass = compose_bass(3000, mood, 120.0, 1000).unwrap();
        assert_eq!(&bass.samples()[..1000], &bass.samples()[1000..2000]);
        // Fades start each repeat at zero
        assert_eq!(bass.samples()[1000], 0);
    }

    #[test]
    fn test_cut_note_matches_full_note() {
        let registry = PresetRegistry::new();
        let mood = registry.mood("happy").unwrap();
        // 60 BPM: one two-beat note is 88200 samples
        let frequency = note_to_frequency(mood.root(), BASS_OCTAVE);
        let full = crate::dsp::generate_tone(frequency, 2.0, Waveform::Sine, 44100)
            .gain_db(BASS_GAIN_DB)
            .fade_in(BASS_FADE_MS)
            .fade_out(BASS_FADE_MS);

        let bass = compose_bass(10000, mood, 60.0, 44100).unwrap();
        assert_eq!(bass, full.truncated(10000));
    }

    #[test]
    fn test_very_slow_tempo() {
        let registry = PresetRegistry::new();
        let mood = registry.mood("happy").unwrap();
        let bass = compose_bass(44100, mood, 0.01, 44100).unwrap();
        assert_eq!(bass.len(), 44100);
        assert!(!bass.is_silent());
    }

    #[test]
    fn test_level() {
        let registry = PresetRegistry::new();
        let mood = registry.mood("calm").unwrap();
        let bass = compose_bass(44100, mood, 80.0, 44100).unwrap();
        assert!(bass.peak_db() <= -9.9);
        assert!(bass.peak_db() > -11.0);
    }

    #[test]
    fn test_invalid_tempo() {
        let registry = PresetRegistry::new();
        let mood = registry.mood("sad").unwrap();
        assert!(compose_bass(100, mood, 0.0, 44100).is_err());
    }
}
