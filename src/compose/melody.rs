//! Melody composer
//!
//! Random scale-degree melodies laid over a genre's rhythm pattern.

use super::{beat_secs, render_len, validate_duration, validate_tempo, NoteEvent};
use crate::dsp::generate_tone_samples;
use crate::engine::buffer::{ms_to_samples, seconds_to_samples, AudioBuffer};
use crate::error::{MoodwaveError, Result};
use crate::presets::{GenrePreset, MoodPreset};
use log::debug;
use rand::Rng;

/// Octaves a melody note may land in
pub const MELODY_OCTAVES: [i32; 3] = [3, 4, 5];

/// Note lengths as fractions of a beat
pub const MELODY_LENGTHS: [f64; 3] = [0.25, 0.5, 1.0];

const NOTE_FADE_MS: f64 = 50.0;

/// Level of a melody note for a mood's energy
fn note_gain_db(energy: f64) -> f64 {
    -20.0 + energy * 15.0
}

fn pick_note<R: Rng + ?Sized>(scale: &[u8], rng: &mut R) -> NoteEvent {
    NoteEvent {
        degree: scale[rng.gen_range(0..scale.len())],
        octave: MELODY_OCTAVES[rng.gen_range(0..MELODY_OCTAVES.len())],
        beats: MELODY_LENGTHS[rng.gen_range(0..MELODY_LENGTHS.len())],
    }
}

/// Compose a melody exactly `duration_secs` long
///
/// Walks the genre's rhythm cyclically: a note beat plays a random scale
/// degree in a random octave for a random fraction of the beat, a rest beat
/// is one full beat of silence. Notes are shaped with 50 ms fades and
/// leveled by the mood's energy. The walk stops once the duration is
/// covered and the tail is cut.
pub fn compose_melody<R: Rng + ?Sized>(
    mood: &MoodPreset,
    genre: &GenrePreset,
    duration_secs: f64,
    tempo_bpm: f64,
    sample_rate: u32,
    rng: &mut R,
) -> Result<AudioBuffer> {
    validate_duration(duration_secs)?;
    validate_tempo(tempo_bpm)?;
    if sample_rate == 0 {
        return Err(MoodwaveError::InvalidSampleRate { rate: sample_rate });
    }
    if mood.scale.is_empty() {
        return Err(MoodwaveError::InvalidParameter {
            param: "scale".to_string(),
            value: mood.name.clone(),
            expected: "at least one scale degree".to_string(),
        });
    }
    if genre.rhythm.is_empty() {
        return Err(MoodwaveError::InvalidParameter {
            param: "rhythm".to_string(),
            value: genre.name.clone(),
            expected: "at least one beat".to_string(),
        });
    }

    let target_len = seconds_to_samples(duration_secs, sample_rate);
    let beat = beat_secs(tempo_bpm);
    let rest_len = seconds_to_samples(beat, sample_rate).max(1);
    let fade_len = ms_to_samples(NOTE_FADE_MS, sample_rate);
    let gain_db = note_gain_db(mood.energy);

    let mut melody = AudioBuffer::empty(sample_rate);
    let mut notes = 0usize;

    for &is_note in genre.rhythm.iter().cycle() {
        if melody.len() >= target_len {
            break;
        }
        let needed = target_len - melody.len();

        if !is_note {
            melody.extend_silence(rest_len.min(needed));
            continue;
        }

        let event = pick_note(&mood.scale, rng);
        let note_len = seconds_to_samples(event.duration_secs(tempo_bpm), sample_rate);
        if note_len == 0 {
            // Too short to render; keep the walk moving
            melody.extend_silence(1);
            continue;
        }

        let tone = generate_tone_samples(
            event.frequency(),
            render_len(note_len, needed, fade_len),
            genre.waveform,
            sample_rate,
        );
        let shaped = tone
            .fade_in(NOTE_FADE_MS)
            .fade_out(NOTE_FADE_MS)
            .gain_db(gain_db);
        melody.extend_from(&shaped);
        notes += 1;
    }

    debug!(
        "Composed {} notes ({} mood, {} genre, {} BPM)",
        notes, mood.name, genre.name, tempo_bpm
    );
    Ok(melody.truncated(target_len))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presets::PresetRegistry;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_exact_length() {
        let registry = PresetRegistry::new();
        let mood = registry.mood("happy").unwrap();
        let genre = registry.genre("electronic").unwrap();
        let mut rng = StdRng::seed_from_u64(7);

        let melody = compose_melody(mood, genre, 2.5, 130.0, 44100, &mut rng).unwrap();
        assert_eq!(melody.len(), 110250);
        assert_eq!(melody.sample_rate(), 44100);
        assert!(!melody.is_silent());
    }

    #[test]
    fn test_same_seed_same_melody() {
        let registry = PresetRegistry::new();
        let mood = registry.mood("sad").unwrap();
        let genre = registry.genre("jazz").unwrap();

        let a = compose_melody(mood, genre, 1.0, 70.0, 22050, &mut StdRng::seed_from_u64(3)).unwrap();
        let b = compose_melody(mood, genre, 1.0, 70.0, 22050, &mut StdRng::seed_from_u64(3)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_very_slow_tempo_renders_only_what_is_kept() {
        // At 0.01 BPM the first note lasts at least 1500 s
        let registry = PresetRegistry::new();
        let mood = registry.mood("happy").unwrap();
        let genre = registry.genre("ambient").unwrap();

        let long = compose_melody(mood, genre, 1.0, 0.01, 44100, &mut StdRng::seed_from_u64(4)).unwrap();
        let short = compose_melody(mood, genre, 0.5, 0.01, 44100, &mut StdRng::seed_from_u64(4)).unwrap();
        assert_eq!(long.len(), 44100);
        assert!(!long.is_silent());
        assert_eq!(short, long.truncated(22050));
    }

    #[test]
    fn test_level_follows_energy() {
        // Energy 1.0 puts notes at -5 dB, so nothing reaches full scale
        let registry = PresetRegistry::new();
        let mood = registry.mood("energetic").unwrap();
        let genre = registry.genre("rock").unwrap();
        let mut rng = StdRng::seed_from_u64(11);

        let melody = compose_melody(mood, genre, 1.0, 160.0, 44100, &mut rng).unwrap();
        assert!(melody.peak_db() <= -4.9);
    }

    #[test]
    fn test_invalid_requests() {
        let registry = PresetRegistry::new();
        let mood = registry.mood("calm").unwrap();
        let genre = registry.genre("ambient").unwrap();
        let mut rng = StdRng::seed_from_u64(0);

        assert!(matches!(
            compose_melody(mood, genre, 0.0, 80.0, 44100, &mut rng),
            Err(MoodwaveError::InvalidDuration { .. })
        ));
        assert!(matches!(
            compose_melody(mood, genre, 1.0, -80.0, 44100, &mut rng),
            Err(MoodwaveError::InvalidTempo { .. })
        ));
    }
}
