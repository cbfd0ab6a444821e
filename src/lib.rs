//! Moodwave - mood and genre driven clip synthesis
//!
//! Moodwave provides two pipelines over mono 16-bit audio:
//! 1. Generation - compose a melody and bass line from mood and genre presets
//! 2. Remix - reshape an existing clip toward a mood with resampling, filters
//!    and harmony
//!
//! # Architecture
//!
//! - `presets`: read-only mood and genre tables
//! - `dsp`: tone synthesis, genre effects, pitch and time transforms
//! - `compose`: melody and bass composers
//! - `analysis`: clip features and remix suggestions
//! - `transform`: mood transform, harmony and layered mixes
//! - `pipeline`: the `generate` and `remix` drivers

pub mod analysis;
pub mod cli;
pub mod compose;
pub mod config;
pub mod dsp;
pub mod engine;
pub mod error;
pub mod pipeline;
pub mod presets;
pub mod transform;

pub use config::EngineConfig;
pub use engine::AudioBuffer;
pub use error::{MoodwaveError, Result};
pub use pipeline::{generate, remix, GenerateRequest, RemixRequest};
pub use presets::PresetRegistry;
