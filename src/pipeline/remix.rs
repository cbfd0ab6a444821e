//! Remix pipeline
//!
//! Runs a user clip through the optional remix stages in a fixed order.

use crate::analysis::{analyze, AudioFeatures, SuggestionParams};
use crate::config::EngineConfig;
use crate::dsp::{
    apply_genre_effects, change_speed, high_pass_filter, low_pass_filter, pitch_shift,
    time_stretch,
};
use crate::engine::AudioBuffer;
use crate::error::{MoodwaveError, Result};
use crate::presets::PresetRegistry;
use crate::transform::{add_harmony, mood_transform};
use log::{debug, info};
use serde::{Deserialize, Serialize};

/// Final shaping for moods darker than 0.5 brightness
pub const REMIX_DARK_LOW_PASS_HZ: f64 = 4000.0;

/// Final shaping for moods brighter than 0.7
pub const REMIX_BRIGHT_HIGH_PASS_HZ: f64 = 150.0;

fn default_tempo_change() -> f64 {
    1.0
}

/// Parameters of a remix request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemixRequest {
    /// Target mood
    pub mood: String,
    pub genre: String,
    /// Playback speed ratio, 1.0 leaves the clip alone
    #[serde(default = "default_tempo_change")]
    pub tempo_change: f64,
    /// Semitones, 0 leaves the clip alone
    #[serde(default)]
    pub pitch_shift: i32,
    /// Time-stretch rate
    #[serde(default)]
    pub stretch: Option<f64>,
    /// Harmony interval name
    #[serde(default)]
    pub harmony: Option<String>,
    /// Mood the clip currently has; enables the mood transform toward `mood`
    #[serde(default)]
    pub source_mood: Option<String>,
}

impl RemixRequest {
    pub fn new(mood: impl Into<String>, genre: impl Into<String>) -> Self {
        Self {
            mood: mood.into(),
            genre: genre.into(),
            tempo_change: 1.0,
            pitch_shift: 0,
            stretch: None,
            harmony: None,
            source_mood: None,
        }
    }

    /// Overwrite the fields a creative suggestion sets
    pub fn apply_suggestion(&mut self, params: &SuggestionParams) {
        if let Some(tempo_change) = params.tempo_change {
            self.tempo_change = tempo_change;
        }
        if let Some(pitch_shift) = params.pitch_shift {
            self.pitch_shift = pitch_shift;
        }
        if let Some(mood) = &params.mood {
            self.mood = mood.clone();
        }
        if let Some(genre) = &params.genre {
            self.genre = genre.clone();
        }
        if let Some(harmony) = &params.harmony_type {
            self.harmony = Some(harmony.clone());
        }
    }

    fn validate(&self, registry: &PresetRegistry) -> Result<()> {
        registry.mood(&self.mood)?;
        registry.genre(&self.genre)?;
        if let Some(source) = &self.source_mood {
            registry.mood(source)?;
        }
        if !(self.tempo_change > 0.0) || !self.tempo_change.is_finite() {
            return Err(MoodwaveError::InvalidParameter {
                param: "tempo_change".to_string(),
                value: self.tempo_change.to_string(),
                expected: "greater than 0".to_string(),
            });
        }
        if let Some(rate) = self.stretch {
            if !(rate > 0.0) || !rate.is_finite() {
                return Err(MoodwaveError::InvalidParameter {
                    param: "stretch".to_string(),
                    value: rate.to_string(),
                    expected: "greater than 0".to_string(),
                });
            }
        }
        Ok(())
    }
}

/// Which optional stages a remix ran
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppliedEffects {
    pub pitch_shift: i32,
    pub tempo_change: f64,
    pub stretch: Option<f64>,
    pub harmony: Option<String>,
    pub intelligent_transform: bool,
}

/// What a remix was built from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemixMetadata {
    pub mood: String,
    pub genre: String,
    /// Features of the input, before any processing
    pub audio_features: AudioFeatures,
    pub applied_effects: AppliedEffects,
    /// Rendered length in seconds
    pub duration: f64,
}

/// A remixed clip and its metadata
#[derive(Debug, Clone)]
pub struct RemixedClip {
    pub buffer: AudioBuffer,
    pub metadata: RemixMetadata,
}

/// Remix `input` toward a mood and genre
///
/// Stages run in a fixed order: mood transform, pitch shift, speed change,
/// time stretch, genre effects, harmony, brightness filter, normalization.
/// Stages the request leaves at their neutral value are skipped.
pub fn remix(
    registry: &PresetRegistry,
    config: &EngineConfig,
    request: &RemixRequest,
    input: &AudioBuffer,
) -> Result<RemixedClip> {
    request.validate(registry)?;
    if input.is_empty() {
        return Err(MoodwaveError::InvalidDuration { value: 0.0 });
    }

    let mood = registry.mood(&request.mood)?;
    let genre = registry.genre(&request.genre)?;
    let features = analyze(input);
    debug!("Input features: {:?}", features);

    let mut audio = input.clone();

    if let Some(source_name) = &request.source_mood {
        let source = registry.mood(source_name)?;
        audio = mood_transform(&audio, source, mood, config.sample_rate)?;
    }

    if request.pitch_shift != 0 {
        audio = pitch_shift(&audio, request.pitch_shift as f64)?;
    }

    if request.tempo_change != 1.0 {
        audio = change_speed(&audio, request.tempo_change, config.sample_rate)?;
    }

    if let Some(rate) = request.stretch {
        audio = time_stretch(&audio, rate)?;
    }

    audio = apply_genre_effects(&audio, genre, mood);

    if let Some(interval) = &request.harmony {
        audio = add_harmony(&audio, interval)?;
    }

    if mood.brightness < 0.5 {
        audio = low_pass_filter(&audio, REMIX_DARK_LOW_PASS_HZ);
    } else if mood.brightness > 0.7 {
        audio = high_pass_filter(&audio, REMIX_BRIGHT_HIGH_PASS_HZ);
    }

    let buffer = audio.normalize();
    info!(
        "Remixed {:.2}s clip to {}/{} ({:.2}s)",
        input.duration_secs(),
        mood.name,
        genre.name,
        buffer.duration_secs()
    );

    Ok(RemixedClip {
        metadata: RemixMetadata {
            mood: mood.name.clone(),
            genre: genre.name.clone(),
            audio_features: features,
            applied_effects: AppliedEffects {
                pitch_shift: request.pitch_shift,
                tempo_change: request.tempo_change,
                stretch: request.stretch,
                harmony: request.harmony.clone(),
                intelligent_transform: request.source_mood.is_some(),
            },
            duration: buffer.duration_secs(),
        },
        buffer,
    })
}
