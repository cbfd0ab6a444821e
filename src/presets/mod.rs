//! Preset Registry
//!
//! Mood and genre presets are built once and shared read-only by every
//! request. Lookups by name are strict: an unknown identifier is an error.

use crate::error::{MoodwaveError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Informational key mode of a mood
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyMode {
    Major,
    Minor,
}

/// Oscillator shape used for melody notes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Waveform {
    #[default]
    Sine,
    Square,
    Sawtooth,
    Triangle,
}

impl Waveform {
    /// Resolve a waveform name; unknown names fall back to sine
    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "square" => Waveform::Square,
            "sawtooth" | "saw" => Waveform::Sawtooth,
            "triangle" => Waveform::Triangle,
            _ => Waveform::Sine,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Waveform::Sine => "sine",
            Waveform::Square => "square",
            Waveform::Sawtooth => "sawtooth",
            Waveform::Triangle => "triangle",
        }
    }
}

/// Effects a genre may declare
///
/// Variant order is the canonical processing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EffectKind {
    Reverb = 0,
    Delay = 1,
    Filter = 2,
    Distortion = 3,
}

impl EffectKind {
    pub const ALL: [EffectKind; 4] = [
        EffectKind::Reverb,
        EffectKind::Delay,
        EffectKind::Filter,
        EffectKind::Distortion,
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "reverb" => Some(EffectKind::Reverb),
            "delay" | "echo" => Some(EffectKind::Delay),
            "filter" => Some(EffectKind::Filter),
            "distortion" => Some(EffectKind::Distortion),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            EffectKind::Reverb => "reverb",
            EffectKind::Delay => "delay",
            EffectKind::Filter => "filter",
            EffectKind::Distortion => "distortion",
        }
    }
}

/// Parameter bundle describing an emotional affect
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodPreset {
    pub name: String,
    /// Inclusive tempo range in BPM
    pub tempo_range: (u32, u32),
    pub key: KeyMode,
    /// 0.0 (dark) to 1.0 (bright)
    pub brightness: f64,
    /// 0.0 (quiet) to 1.0 (loud)
    pub energy: f64,
    /// Semitone offsets from the tonic, first entry is the root
    pub scale: Vec<u8>,
}

impl MoodPreset {
    /// Midpoint of the tempo range
    pub fn mean_tempo(&self) -> f64 {
        (self.tempo_range.0 + self.tempo_range.1) as f64 / 2.0
    }

    /// Root scale degree
    pub fn root(&self) -> u8 {
        self.scale.first().copied().unwrap_or(0)
    }
}

/// Parameter bundle describing a stylistic affect
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenrePreset {
    pub name: String,
    pub waveform: Waveform,
    /// Declared effects, in whatever order the genre lists them
    pub effects: Vec<EffectKind>,
    /// Cyclic note (true) / rest (false) pattern, one entry per beat
    pub rhythm: Vec<bool>,
}

impl GenrePreset {
    pub fn has_effect(&self, kind: EffectKind) -> bool {
        self.effects.contains(&kind)
    }
}

fn mood(
    name: &str,
    tempo_range: (u32, u32),
    key: KeyMode,
    brightness: f64,
    energy: f64,
    scale: &[u8],
) -> MoodPreset {
    MoodPreset {
        name: name.to_string(),
        tempo_range,
        key,
        brightness,
        energy,
        scale: scale.to_vec(),
    }
}

fn genre(name: &str, waveform: Waveform, effects: &[EffectKind], rhythm: [u8; 8]) -> GenrePreset {
    GenrePreset {
        name: name.to_string(),
        waveform,
        effects: effects.to_vec(),
        rhythm: rhythm.iter().map(|&b| b == 1).collect(),
    }
}

const MAJOR: [u8; 7] = [0, 2, 4, 5, 7, 9, 11];
const NATURAL_MINOR: [u8; 7] = [0, 2, 3, 5, 7, 8, 10];
const HARMONIC_MINOR: [u8; 7] = [0, 2, 3, 5, 7, 8, 11];
const MAJOR_PENTATONIC: [u8; 5] = [0, 2, 4, 7, 9];

/// Read-only table of all recognized presets
#[derive(Debug, Clone)]
pub struct PresetRegistry {
    moods: BTreeMap<String, MoodPreset>,
    genres: BTreeMap<String, GenrePreset>,
}

impl PresetRegistry {
    /// Build the built-in preset tables
    pub fn new() -> Self {
        use EffectKind::*;

        let moods = [
            mood("happy", (120, 140), KeyMode::Major, 0.8, 0.9, &MAJOR),
            mood("sad", (60, 80), KeyMode::Minor, 0.3, 0.4, &NATURAL_MINOR),
            mood("energetic", (140, 180), KeyMode::Major, 0.9, 1.0, &MAJOR),
            mood("calm", (70, 90), KeyMode::Major, 0.6, 0.5, &MAJOR_PENTATONIC),
            mood("dark", (80, 100), KeyMode::Minor, 0.2, 0.6, &HARMONIC_MINOR),
            mood("uplifting", (110, 130), KeyMode::Major, 0.85, 0.8, &MAJOR),
        ];

        let genres = [
            genre("electronic", Waveform::Square, &[Reverb, Filter], [1, 0, 1, 0, 1, 0, 1, 0]),
            genre("ambient", Waveform::Sine, &[Reverb, Delay], [1, 0, 0, 0, 1, 0, 0, 0]),
            genre("rock", Waveform::Sawtooth, &[Distortion], [1, 0, 1, 1, 1, 0, 1, 1]),
            genre("classical", Waveform::Sine, &[Reverb], [1, 0, 0, 1, 0, 0, 1, 0]),
            genre("jazz", Waveform::Triangle, &[Reverb], [1, 0, 1, 1, 0, 1, 1, 0]),
        ];

        Self {
            moods: moods.into_iter().map(|m| (m.name.clone(), m)).collect(),
            genres: genres.into_iter().map(|g| (g.name.clone(), g)).collect(),
        }
    }

    /// Look up a mood by name
    pub fn mood(&self, name: &str) -> Result<&MoodPreset> {
        self.moods
            .get(name)
            .ok_or_else(|| MoodwaveError::UnknownMood {
                name: name.to_string(),
            })
    }

    /// Look up a genre by name
    pub fn genre(&self, name: &str) -> Result<&GenrePreset> {
        self.genres
            .get(name)
            .ok_or_else(|| MoodwaveError::UnknownGenre {
                name: name.to_string(),
            })
    }

    pub fn mood_names(&self) -> Vec<&str> {
        self.moods.keys().map(String::as_str).collect()
    }

    pub fn genre_names(&self) -> Vec<&str> {
        self.genres.keys().map(String::as_str).collect()
    }
}

impl Default for PresetRegistry {
    fn default() -> Self {
        Self::new()
    }
}
