//! DSP Library
//!
//! Tone synthesis, the genre effects and the resampling transforms.
//! All genre effects implement the `Effect` trait for uniform processing.

mod chain;
mod compressor;
mod delay;
mod distortion;
mod effect;
mod filter;
pub mod pitch;
mod reverb;
pub mod tone;

pub use chain::{apply_genre_effects, effect_for_kind, EffectChain};
pub use compressor::{Compressor, CompressorParams};
pub use delay::Delay;
pub use distortion::Distortion;
pub use effect::Effect;
pub use filter::{
    high_pass_filter, low_pass_filter, FilterType, OnePoleFilter, BRIGHT_HIGH_PASS_HZ,
    DARK_LOW_PASS_HZ,
};
pub use pitch::{change_speed, pitch_shift, semitone_ratio, time_stretch};
pub use reverb::{Reverb, ReverbTap};
pub use tone::{generate_tone, generate_tone_samples};
