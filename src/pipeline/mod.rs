//! Request pipelines
//!
//! `generate` composes a new clip from presets; `remix` reshapes an existing
//! one. Both validate the whole request before touching audio.

mod generate;
mod remix;

pub use generate::{generate, GenerateRequest, GeneratedClip, GenerationMetadata};
pub use remix::{
    remix, AppliedEffects, RemixMetadata, RemixRequest, RemixedClip, REMIX_DARK_LOW_PASS_HZ,
    REMIX_BRIGHT_HIGH_PASS_HZ,
};
