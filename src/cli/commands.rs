//! CLI Command Implementations
//!
//! Implements the actual logic for each CLI command.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use log::{info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

use crate::analysis::{analyze, suggest, AudioFeatures, Suggestions};
use crate::config::EngineConfig;
use crate::engine::{export_audio, import_audio};
use crate::error::{MoodwaveError, Result};
use crate::pipeline::{generate, remix, GenerateRequest, RemixRequest};
use crate::presets::PresetRegistry;
use crate::transform::{create_layered_mix, LayerSpec};

/// Options of the `generate` command
#[derive(Debug, Clone, Default)]
pub struct GenerateArgs {
    pub mood: Option<String>,
    pub genre: Option<String>,
    pub duration: Option<f64>,
    pub tempo: Option<f64>,
    pub seed: Option<u64>,
    pub output: Option<PathBuf>,
}

/// Options of the `remix` command
#[derive(Debug, Clone)]
pub struct RemixArgs {
    pub input: PathBuf,
    pub mood: Option<String>,
    pub genre: Option<String>,
    pub tempo_change: f64,
    pub pitch_shift: i32,
    pub stretch: Option<f64>,
    pub harmony: Option<String>,
    pub source_mood: Option<String>,
    pub suggestion: Option<String>,
    pub output: Option<PathBuf>,
}

/// JSON printed after a file is written
#[derive(Debug, Serialize)]
struct OutputReport<T: Serialize> {
    filename: String,
    created_at: DateTime<Local>,
    #[serde(flatten)]
    details: T,
}

/// JSON printed by `analyze`
#[derive(Debug, Serialize)]
struct AnalysisReport {
    features: AudioFeatures,
    #[serde(flatten)]
    suggestions: Suggestions,
    duration: f64,
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// `<prefix>_<mood>_<genre>_<YYYYmmdd_HHMMSS>.wav`
pub fn default_output_name(prefix: &str, mood: &str, genre: &str, at: &DateTime<Local>) -> String {
    format!("{}_{}_{}_{}.wav", prefix, mood, genre, at.format("%Y%m%d_%H%M%S"))
}

fn write_report<T: Serialize>(path: &Path, created_at: DateTime<Local>, details: T) -> Result<()> {
    print_json(&OutputReport {
        filename: path.display().to_string(),
        created_at,
        details,
    })
}

/// Generate a new clip and write it as WAV.
pub fn generate_clip(config: &EngineConfig, args: GenerateArgs) -> Result<()> {
    let registry = PresetRegistry::new();
    let mood = args.mood.unwrap_or_else(|| config.default_mood.clone());
    let genre = args.genre.unwrap_or_else(|| config.default_genre.clone());
    let duration = args.duration.unwrap_or(config.default_duration_secs);

    let mut request = GenerateRequest::new(mood, genre, duration);
    request.tempo = args.tempo;

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    info!("Generating {}/{} for {}s", request.mood, request.genre, duration);
    let clip = generate(&registry, config, &request, &mut rng)?;

    let now = Local::now();
    let path = args.output.unwrap_or_else(|| {
        PathBuf::from(default_output_name(
            "generated",
            &clip.metadata.mood,
            &clip.metadata.genre,
            &now,
        ))
    });
    export_audio(&clip.buffer, &path)?;

    write_report(&path, now, clip.metadata)
}

/// Remix a WAV file and write the result.
pub fn remix_clip(config: &EngineConfig, args: RemixArgs) -> Result<()> {
    let registry = PresetRegistry::new();
    let input = import_audio(&args.input)?;

    let mut request = RemixRequest::new(
        args.mood.unwrap_or_else(|| config.default_mood.clone()),
        args.genre.unwrap_or_else(|| config.default_genre.clone()),
    );
    request.tempo_change = args.tempo_change;
    request.pitch_shift = args.pitch_shift;
    request.stretch = args.stretch;
    request.harmony = args.harmony;
    request.source_mood = args.source_mood;

    if let Some(name) = &args.suggestion {
        let suggestions = suggest(&analyze(&input));
        let idea = suggestions
            .find(name)
            .ok_or_else(|| MoodwaveError::InvalidParameter {
                param: "suggestion".to_string(),
                value: name.clone(),
                expected: "Energize, Chill Out, Add Harmony or Dark Remix".to_string(),
            })?;
        info!("Applying suggestion '{}': {}", idea.name, idea.description);
        request.apply_suggestion(&idea.params);
    }

    let clip = remix(&registry, config, &request, &input)?;

    let now = Local::now();
    let path = args.output.unwrap_or_else(|| {
        PathBuf::from(default_output_name(
            "remix",
            &clip.metadata.mood,
            &clip.metadata.genre,
            &now,
        ))
    });
    export_audio(&clip.buffer, &path)?;

    write_report(&path, now, clip.metadata)
}

/// Print features and suggestions for a WAV file.
pub fn analyze_clip(input: &Path) -> Result<()> {
    let audio = import_audio(input)?;
    let features = analyze(&audio);
    if audio.is_silent() {
        warn!("{} is silent, all features are zero", input.display());
    }

    print_json(&AnalysisReport {
        features,
        suggestions: suggest(&features),
        duration: audio.duration_secs(),
    })
}

/// Overlay layers described in a JSON file onto a WAV file.
pub fn layer_clip(input: &Path, layers: &Path, output: Option<&Path>) -> Result<()> {
    let audio = import_audio(input)?;
    let text = std::fs::read_to_string(layers)?;
    let specs: Vec<LayerSpec> = serde_json::from_str(&text)?;
    info!("Mixing {} layers onto {}", specs.len(), input.display());

    let mixed = create_layered_mix(&audio, &specs)?;

    let now = Local::now();
    let path = match output {
        Some(p) => p.to_path_buf(),
        None => PathBuf::from(format!("layered_{}.wav", now.format("%Y%m%d_%H%M%S"))),
    };
    export_audio(&mixed, &path)?;

    write_report(
        &path,
        now,
        serde_json::json!({ "layers": specs.len(), "duration": mixed.duration_secs() }),
    )
}

/// List available moods.
pub fn list_moods() -> Result<()> {
    let registry = PresetRegistry::new();
    print_json(&serde_json::json!({ "moods": registry.mood_names() }))
}

/// List available genres.
pub fn list_genres() -> Result<()> {
    let registry = PresetRegistry::new();
    print_json(&serde_json::json!({ "genres": registry.genre_names() }))
}
