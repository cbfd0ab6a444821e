//! Clip generation
//!
//! Melody plus bass, run through the genre's effects and normalized.

use crate::compose::{compose_bass, compose_melody, validate_duration, validate_tempo};
use crate::config::EngineConfig;
use crate::dsp::apply_genre_effects;
use crate::engine::AudioBuffer;
use crate::error::Result;
use crate::presets::PresetRegistry;
use log::info;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Parameters of a generation request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub mood: String,
    pub genre: String,
    /// Requested length in seconds, capped by the engine config
    #[serde(rename = "duration")]
    pub duration_secs: f64,
    /// Tempo in BPM; drawn from the mood's range when absent
    #[serde(default)]
    pub tempo: Option<f64>,
}

impl GenerateRequest {
    pub fn new(mood: impl Into<String>, genre: impl Into<String>, duration_secs: f64) -> Self {
        Self {
            mood: mood.into(),
            genre: genre.into(),
            duration_secs,
            tempo: None,
        }
    }

    pub fn with_tempo(mut self, tempo: f64) -> Self {
        self.tempo = Some(tempo);
        self
    }
}

/// What a generated clip was built from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationMetadata {
    pub mood: String,
    pub genre: String,
    pub tempo: f64,
    /// Rendered length in seconds, after capping
    pub duration: f64,
}

/// A generated clip and its metadata
#[derive(Debug, Clone)]
pub struct GeneratedClip {
    pub buffer: AudioBuffer,
    pub metadata: GenerationMetadata,
}

/// Compose, mix, process and normalize a new clip
pub fn generate<R: Rng + ?Sized>(
    registry: &PresetRegistry,
    config: &EngineConfig,
    request: &GenerateRequest,
    rng: &mut R,
) -> Result<GeneratedClip> {
    let mood = registry.mood(&request.mood)?;
    let genre = registry.genre(&request.genre)?;
    validate_duration(request.duration_secs)?;
    if let Some(tempo) = request.tempo {
        validate_tempo(tempo)?;
    }

    let duration = if request.duration_secs > config.max_duration_secs {
        info!(
            "Capping duration {}s to {}s",
            request.duration_secs, config.max_duration_secs
        );
        config.max_duration_secs
    } else {
        request.duration_secs
    };

    let tempo = match request.tempo {
        Some(tempo) => tempo,
        None => {
            let (lo, hi) = mood.tempo_range;
            rng.gen_range(lo..=hi) as f64
        }
    };

    let sample_rate = config.sample_rate;
    let melody = compose_melody(mood, genre, duration, tempo, sample_rate, rng)?;
    let bass = compose_bass(melody.len(), mood, tempo, sample_rate)?;
    let mix = melody.overlay(&bass);
    let buffer = apply_genre_effects(&mix, genre, mood).normalize();

    info!(
        "Generated {:.2}s of {}/{} at {} BPM",
        buffer.duration_secs(),
        mood.name,
        genre.name,
        tempo
    );

    Ok(GeneratedClip {
        buffer,
        metadata: GenerationMetadata {
            mood: mood.name.clone(),
            genre: genre.name.clone(),
            tempo,
            duration,
        },
    })
}
