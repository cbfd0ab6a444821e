//! CLI Module
//!
//! Command-line interface for the Moodwave engine.

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Moodwave - mood and genre driven clip generator and remixer
#[derive(Parser, Debug)]
#[command(name = "moodwave")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Engine configuration file (JSON)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a new clip from a mood and genre
    #[command(name = "generate")]
    Generate {
        /// Mood preset (defaults to the configured mood)
        #[arg(short, long)]
        mood: Option<String>,

        /// Genre preset (defaults to the configured genre)
        #[arg(short, long)]
        genre: Option<String>,

        /// Length in seconds
        #[arg(short, long)]
        duration: Option<f64>,

        /// Tempo in BPM (random within the mood's range if omitted)
        #[arg(short, long)]
        tempo: Option<f64>,

        /// Seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,

        /// Output WAV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Remix an existing WAV file toward a mood and genre
    #[command(name = "remix")]
    Remix {
        /// Input WAV file
        input: PathBuf,

        /// Target mood preset
        #[arg(short, long)]
        mood: Option<String>,

        /// Genre preset whose effects are applied
        #[arg(short, long)]
        genre: Option<String>,

        /// Playback speed ratio
        #[arg(long, default_value_t = 1.0)]
        tempo_change: f64,

        /// Pitch shift in semitones
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        pitch_shift: i32,

        /// Time-stretch rate
        #[arg(long)]
        stretch: Option<f64>,

        /// Harmony interval (third, fifth, octave)
        #[arg(long)]
        harmony: Option<String>,

        /// Current mood of the input; enables the mood transform
        #[arg(long)]
        source_mood: Option<String>,

        /// Apply a named creative suggestion (e.g. "Energize")
        #[arg(long)]
        suggestion: Option<String>,

        /// Output WAV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Analyze a WAV file and suggest remixes
    #[command(name = "analyze")]
    Analyze {
        /// Input WAV file
        input: PathBuf,
    },

    /// Overlay transformed copies of a WAV file
    #[command(name = "layer")]
    Layer {
        /// Input WAV file
        input: PathBuf,

        /// JSON file with an array of layer specs
        #[arg(short, long)]
        layers: PathBuf,

        /// Output WAV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List available moods
    #[command(name = "moods")]
    Moods,

    /// List available genres
    #[command(name = "genres")]
    Genres,
}
