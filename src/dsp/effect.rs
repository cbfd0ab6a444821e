//! Effect trait definition
//!
//! Base trait for every effect the genre chain can run.

use crate::engine::AudioBuffer;
use crate::presets::EffectKind;
use serde_json::Value;

/// Base trait for all effects
///
/// Effects are stateless between calls: `apply` reads its input and returns a
/// fresh buffer, so one instance can serve concurrent requests.
pub trait Effect: Send + Sync {
    /// Render the effect onto a copy of `buffer`
    fn apply(&self, buffer: &AudioBuffer) -> AudioBuffer;

    /// Which slot of the canonical chain this effect occupies
    fn kind(&self) -> EffectKind;

    /// Get the effect type identifier
    fn effect_type(&self) -> &'static str {
        self.kind().name()
    }

    /// Get human-readable display name
    fn display_name(&self) -> &str;

    /// Get all parameters as JSON
    fn get_params(&self) -> Value;

    /// Clone the effect into a boxed trait object
    fn box_clone(&self) -> Box<dyn Effect>;
}

impl Clone for Box<dyn Effect> {
    fn clone(&self) -> Self {
        self.box_clone()
    }
}

impl std::fmt::Debug for dyn Effect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Effect")
            .field("type", &self.effect_type())
            .field("params", &self.get_params())
            .finish()
    }
}

/// Helper macro to implement the boilerplate Effect methods
#[macro_export]
macro_rules! impl_effect_common {
    ($kind:expr, $display_name:expr) => {
        fn kind(&self) -> $crate::presets::EffectKind {
            $kind
        }

        fn display_name(&self) -> &str {
            $display_name
        }

        fn box_clone(&self) -> Box<dyn $crate::dsp::Effect> {
            Box::new(self.clone())
        }
    };
}
