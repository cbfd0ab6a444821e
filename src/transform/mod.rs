//! Whole-clip transforms built on the DSP primitives
//!
//! - `mood`: reshape a clip from one mood preset toward another
//! - `harmony`: overlay a pitch-shifted copy at a fixed interval
//! - `layers`: overlay independently transformed copies of a clip

mod harmony;
mod layers;
mod mood;

pub use harmony::{add_harmony, add_harmony_interval, HarmonyInterval, HARMONY_ATTENUATION_DB};
pub use layers::{create_layered_mix, LayerSpec};
pub use mood::{mood_transform, BRIGHTEN_HIGH_PASS_HZ, DARKEN_LOW_PASS_HZ};
