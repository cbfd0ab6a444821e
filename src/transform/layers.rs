//! Layer mixer
//!
//! Every layer is an independent variation of the same base clip.

use crate::dsp::pitch_shift;
use crate::engine::AudioBuffer;
use crate::error::Result;
use log::debug;
use serde::{Deserialize, Serialize};

/// One transformed copy of the base clip
///
/// Every field is optional; an empty spec overlays the clip onto itself.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LayerSpec {
    /// Pitch shift in semitones
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pitch_shift: Option<f64>,
    /// Gain offset in dB
    #[serde(default, rename = "volume", skip_serializing_if = "Option::is_none")]
    pub volume_db: Option<f64>,
    /// Leading silence in milliseconds
    #[serde(default, rename = "delay", skip_serializing_if = "Option::is_none")]
    pub delay_ms: Option<f64>,
}

impl LayerSpec {
    /// Render this layer from the base clip: pitch, then volume, then delay
    pub fn render(&self, base: &AudioBuffer) -> Result<AudioBuffer> {
        let mut layer = match self.pitch_shift {
            Some(semitones) => pitch_shift(base, semitones)?,
            None => base.clone(),
        };
        if let Some(db) = self.volume_db {
            layer = layer.gain_db(db);
        }
        if let Some(ms) = self.delay_ms {
            layer = layer.delayed(ms);
        }
        Ok(layer)
    }
}

/// Overlay every layer onto `audio`
///
/// Each layer is rendered from the untouched input, never from the running
/// mix, so layer order only matters where the sum saturates.
pub fn create_layered_mix(audio: &AudioBuffer, layers: &[LayerSpec]) -> Result<AudioBuffer> {
    let mut result = audio.clone();
    for (i, spec) in layers.iter().enumerate() {
        let layer = spec.render(audio)?;
        debug!("Layer {}: {:?}", i, spec);
        result = result.overlay(&layer);
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn impulse() -> AudioBuffer {
        let mut samples = vec![0i16; 1000];
        samples[0] = 1000;
        AudioBuffer::new(samples, 1000).unwrap()
    }

    #[test]
    fn test_no_layers_is_identity() {
        let input = impulse();
        assert_eq!(create_layered_mix(&input, &[]).unwrap(), input);
    }

    #[test]
    fn test_layers_render_from_base() {
        let input = impulse();
        let layers = vec![
            LayerSpec {
                delay_ms: Some(100.0),
                ..Default::default()
            },
            LayerSpec {
                delay_ms: Some(250.0),
                volume_db: Some(-6.0),
                ..Default::default()
            },
        ];

        let out = create_layered_mix(&input, &layers).unwrap();
        assert_eq!(out.len(), 1000);
        assert_eq!(out.samples()[0], 1000);
        assert_eq!(out.samples()[100], 1000);
        assert_eq!(out.samples()[250], 501);
        // A layer built from the mix would echo the first layer too
        assert_eq!(out.samples()[350], 0);
    }

    #[test]
    fn test_json_field_names() {
        let spec: LayerSpec =
            serde_json::from_str(r#"{"pitch_shift": 7, "volume": -3.5, "delay": 120}"#).unwrap();
        assert_eq!(spec.pitch_shift, Some(7.0));
        assert_eq!(spec.volume_db, Some(-3.5));
        assert_eq!(spec.delay_ms, Some(120.0));

        let empty: LayerSpec = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, LayerSpec::default());
    }
}
