//! Effect Chain management
//!
//! Effects are processed in chain order (index 0 first). Insertion always
//! lands on the canonical slot for the effect's kind:
//! 1. Reverb
//! 2. Delay
//! 3. Filter
//! 4. Distortion
//!
//! so the order a genre declares its effects in never changes the result.

use super::{Delay, Distortion, Effect, OnePoleFilter, Reverb};
use crate::engine::AudioBuffer;
use crate::presets::{EffectKind, GenrePreset, MoodPreset};
use log::{debug, warn};

/// Chain of effects for processing
#[derive(Debug, Clone, Default)]
pub struct EffectChain {
    effects: Vec<Box<dyn Effect>>,
}

impl EffectChain {
    /// Create a new empty effect chain
    pub fn new() -> Self {
        Self {
            effects: Vec::new(),
        }
    }

    /// Build the chain a genre declares, with the filter tuned to the mood
    pub fn for_genre(genre: &GenrePreset, mood: &MoodPreset) -> Self {
        let mut chain = Self::new();
        for kind in EffectKind::ALL.into_iter().filter(|&k| genre.has_effect(k)) {
            chain.add(effect_for_kind(kind, mood));
        }
        debug!(
            "Effect chain for {}/{}: {:?}",
            genre.name,
            mood.name,
            chain.effect_types()
        );
        chain
    }

    /// Build a chain from effect names, skipping names that are not effects
    pub fn from_names<S: AsRef<str>>(names: &[S], mood: &MoodPreset) -> Self {
        let mut chain = Self::new();
        for name in names {
            match EffectKind::from_name(name.as_ref()) {
                Some(kind) => chain.add(effect_for_kind(kind, mood)),
                None => warn!("Skipping unknown effect '{}'", name.as_ref()),
            }
        }
        chain
    }

    /// Add an effect at its canonical position
    ///
    /// Effects of the same kind keep their insertion order.
    pub fn add(&mut self, effect: Box<dyn Effect>) {
        let position = self.get_recommended_position(effect.kind());
        self.effects.insert(position, effect);
    }

    /// Run every effect in order over a copy of `buffer`
    pub fn apply(&self, buffer: &AudioBuffer) -> AudioBuffer {
        self.effects
            .iter()
            .fold(buffer.clone(), |current, effect| effect.apply(&current))
    }

    /// Effect type identifiers in processing order
    pub fn effect_types(&self) -> Vec<&'static str> {
        self.effects.iter().map(|e| e.effect_type()).collect()
    }

    /// Get the number of effects in the chain
    pub fn len(&self) -> usize {
        self.effects.len()
    }

    /// Check if the chain is empty
    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    /// Index of the first effect that belongs after `kind`
    fn get_recommended_position(&self, kind: EffectKind) -> usize {
        self.effects
            .iter()
            .position(|existing| existing.kind() > kind)
            .unwrap_or(self.effects.len())
    }
}

/// Default-configured effect of `kind`
pub fn effect_for_kind(kind: EffectKind, mood: &MoodPreset) -> Box<dyn Effect> {
    match kind {
        EffectKind::Reverb => Box::new(Reverb::new()),
        EffectKind::Delay => Box::new(Delay::default()),
        EffectKind::Filter => Box::new(OnePoleFilter::for_brightness(mood.brightness)),
        EffectKind::Distortion => Box::new(Distortion::default()),
    }
}

/// Apply the effects `genre` declares to a copy of `buffer`
pub fn apply_genre_effects(
    buffer: &AudioBuffer,
    genre: &GenrePreset,
    mood: &MoodPreset,
) -> AudioBuffer {
    EffectChain::for_genre(genre, mood).apply(buffer)
}
