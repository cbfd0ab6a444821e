//! Composition
//!
//! Turns mood and genre presets into note sequences and renders them:
//! a randomized melody over the genre's rhythm and a root-note bass line
//! under it.

mod bass;
mod melody;

pub use bass::{compose_bass, BASS_NOTE_BEATS, BASS_OCTAVE};
pub use melody::{compose_melody, MELODY_LENGTHS, MELODY_OCTAVES};

use crate::error::{MoodwaveError, Result};
use serde::{Deserialize, Serialize};

/// MIDI number of middle C, the tonic in octave 4
const MIDDLE_C: i32 = 60;

/// MIDI number of A4 (440 Hz)
const A4: i32 = 69;

/// Frequency of a scale degree in an octave
///
/// Octave 4 holds middle C: `440 * 2^((60 + degree + (octave - 4) * 12 - 69) / 12)`.
pub fn note_to_frequency(degree: u8, octave: i32) -> f64 {
    let midi = MIDDLE_C + degree as i32 + (octave - 4) * 12;
    440.0 * 2.0_f64.powf((midi - A4) as f64 / 12.0)
}

/// One note of a composed line
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NoteEvent {
    pub degree: u8,
    pub octave: i32,
    /// Length as a multiple of one beat
    pub beats: f64,
}

impl NoteEvent {
    pub fn frequency(&self) -> f64 {
        note_to_frequency(self.degree, self.octave)
    }

    pub fn duration_secs(&self, tempo_bpm: f64) -> f64 {
        beat_secs(tempo_bpm) * self.beats
    }
}

/// Seconds per beat
pub fn beat_secs(tempo_bpm: f64) -> f64 {
    60.0 / tempo_bpm
}

pub(crate) fn validate_tempo(tempo_bpm: f64) -> Result<()> {
    if tempo_bpm > 0.0 && tempo_bpm.is_finite() {
        Ok(())
    } else {
        Err(MoodwaveError::InvalidTempo { value: tempo_bpm })
    }
}

pub(crate) fn validate_duration(duration_secs: f64) -> Result<()> {
    if duration_secs > 0.0 && duration_secs.is_finite() {
        Ok(())
    } else {
        Err(MoodwaveError::InvalidDuration {
            value: duration_secs,
        })
    }
}

/// Samples to render of a `note_len` note when only the first `needed` are kept
///
/// Rendering `fade_len` past `needed` leaves the fade-in intact and pushes the
/// fade-out beyond the cut, so the kept samples match the full note.
pub(crate) fn render_len(note_len: usize, needed: usize, fade_len: usize) -> usize {
    note_len.min(needed.saturating_add(fade_len))
}
