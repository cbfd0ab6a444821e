//! Integration Tests
//!
//! End-to-end tests for the Moodwave generation and remix pipelines.

use moodwave::analysis::{analyze, AudioFeatures};
use moodwave::compose::{compose_bass, compose_melody};
use moodwave::dsp::{generate_tone, pitch_shift, time_stretch, EffectChain};
use moodwave::engine::{export_audio, import_audio};
use moodwave::presets::Waveform;
use moodwave::transform::{add_harmony, create_layered_mix, LayerSpec};
use moodwave::{generate, remix, AudioBuffer, EngineConfig, GenerateRequest, PresetRegistry, RemixRequest};
use pretty_assertions::assert_eq;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Helper to create a test sine wave buffer at a level in dBFS
fn create_sine_buffer(frequency: f64, duration_secs: f64, level_db: f64) -> AudioBuffer {
    generate_tone(frequency, duration_secs, Waveform::Sine, 44100).gain_db(level_db)
}

/// Magnitude of a Hann-windowed DFT evaluated at one frequency
fn windowed_magnitude(samples: &[i16], sample_rate: u32, frequency: f64) -> f64 {
    let n = samples.len() as f64;
    let (mut re, mut im) = (0.0, 0.0);
    for (i, &s) in samples.iter().enumerate() {
        let window = 0.5 - 0.5 * (2.0 * std::f64::consts::PI * i as f64 / (n - 1.0)).cos();
        let phase = 2.0 * std::f64::consts::PI * frequency * i as f64 / sample_rate as f64;
        re += s as f64 * window * phase.cos();
        im -= s as f64 * window * phase.sin();
    }
    (re * re + im * im).sqrt()
}

// === Generation Tests ===

#[test]
fn test_generation_scenario() {
    let registry = PresetRegistry::new();
    let config = EngineConfig::default();
    let request = GenerateRequest::new("happy", "electronic", 10.0).with_tempo(120.0);

    let clip = generate(&registry, &config, &request, &mut StdRng::seed_from_u64(2024)).unwrap();

    assert_eq!(clip.buffer.sample_rate(), 44100);
    assert_eq!(clip.buffer.len(), 441000);
    assert_eq!(clip.metadata.mood, "happy");
    assert_eq!(clip.metadata.genre, "electronic");
    assert_eq!(clip.metadata.tempo, 120.0);
    assert_eq!(clip.metadata.duration, 10.0);
    assert!(analyze(&clip.buffer).energy > 0.0);
}

#[test]
fn test_melody_length_for_every_preset() {
    let registry = PresetRegistry::new();
    let mut rng = StdRng::seed_from_u64(99);

    for mood_name in registry.mood_names() {
        let mood = registry.mood(mood_name).unwrap();
        for genre_name in registry.genre_names() {
            let genre = registry.genre(genre_name).unwrap();
            let melody =
                compose_melody(mood, genre, 1.3, mood.mean_tempo(), 44100, &mut rng).unwrap();
            assert_eq!(melody.len(), 57330, "{}/{}", mood_name, genre_name);
        }
    }
}

#[test]
fn test_bass_length_matches_melody() {
    let registry = PresetRegistry::new();
    let genre = registry.genre("jazz").unwrap();
    let mut rng = StdRng::seed_from_u64(5);

    for mood_name in registry.mood_names() {
        let mood = registry.mood(mood_name).unwrap();
        let tempo = mood.tempo_range.0 as f64;
        let melody = compose_melody(mood, genre, 3.7, tempo, 44100, &mut rng).unwrap();
        let bass = compose_bass(melody.len(), mood, tempo, 44100).unwrap();
        assert_eq!(bass.len(), melody.len(), "{}", mood_name);
    }
}

#[test]
fn test_generated_clip_survives_wav_round_trip() {
    let registry = PresetRegistry::new();
    let config = EngineConfig::default();
    let request = GenerateRequest::new("dark", "rock", 0.5);
    let clip = generate(&registry, &config, &request, &mut StdRng::seed_from_u64(8)).unwrap();

    let file = tempfile::NamedTempFile::new().unwrap();
    export_audio(&clip.buffer, file.path()).unwrap();
    let loaded = import_audio(file.path()).unwrap();
    assert_eq!(loaded, clip.buffer);
}

// === Effects and Transforms ===

#[test]
fn test_effect_order_is_canonical() {
    let registry = PresetRegistry::new();
    let mood = registry.mood("sad").unwrap();
    let input = create_sine_buffer(220.0, 1.0, -6.0);

    let forward = EffectChain::from_names(&["reverb", "delay", "filter", "distortion"], mood);
    let backward = EffectChain::from_names(&["distortion", "filter", "delay", "reverb"], mood);

    assert_eq!(forward.effect_types(), backward.effect_types());
    assert_eq!(forward.apply(&input), backward.apply(&input));
}

#[test]
fn test_pitch_shift_identity_and_octave_round_trip() {
    let input = create_sine_buffer(100.0, 1.0, -6.0);
    assert_eq!(pitch_shift(&input, 0.0).unwrap(), input);

    let up = pitch_shift(&input, 12.0).unwrap();
    assert_eq!(up.len(), input.len() / 2);
    let back = pitch_shift(&up, -12.0).unwrap();
    assert_eq!(back.len(), input.len());

    let err_sq: f64 = input
        .samples()
        .iter()
        .zip(back.samples())
        .map(|(&a, &b)| (a as f64 - b as f64).powi(2))
        .sum();
    let err_rms = (err_sq / input.len() as f64).sqrt();
    assert!(err_rms < input.rms() * 0.01, "error rms {:.1}", err_rms);
}

#[test]
fn test_time_stretch_identity() {
    let input = create_sine_buffer(330.0, 0.3, -3.0);
    assert_eq!(time_stretch(&input, 1.0).unwrap(), input);
}

#[test]
fn test_silent_analysis() {
    let silence = AudioBuffer::silent(44100, 44100);
    assert_eq!(analyze(&silence), AudioFeatures::default());
}

#[test]
fn test_overlay_identity() {
    let input = create_sine_buffer(440.0, 0.2, -6.0);
    assert_eq!(input.overlay(&AudioBuffer::silent(input.len(), 44100)), input);
    assert_eq!(input.overlay(&AudioBuffer::empty(44100)), input);
}

#[test]
fn test_harmony_fifth_energy() {
    let input = create_sine_buffer(440.0, 1.0, -12.0);
    let out = add_harmony(&input, "fifth").unwrap();

    // Half a second, inside the shortened harmony voice
    let window = &out.samples()[..22050];
    let fifth = 440.0 * (44100.0 * 2.0_f64.powf(7.0 / 12.0)).floor() / 44100.0;
    let root_mag = windowed_magnitude(window, 44100, 440.0);
    let fifth_mag = windowed_magnitude(window, 44100, fifth);

    let relative_db = 20.0 * (fifth_mag / root_mag).log10();
    assert!(
        (relative_db + 8.0).abs() < 1.5,
        "fifth at {:.2} dB relative to root",
        relative_db
    );
}

#[test]
fn test_layers_are_independent() {
    let input = create_sine_buffer(261.63, 0.5, -20.0);
    let a = LayerSpec {
        pitch_shift: Some(7.0),
        volume_db: Some(-6.0),
        ..Default::default()
    };
    let b = LayerSpec {
        delay_ms: Some(50.0),
        ..Default::default()
    };

    // Without saturation the mix does not depend on layer order
    let ab = create_layered_mix(&input, &[a.clone(), b.clone()]).unwrap();
    let ba = create_layered_mix(&input, &[b, a]).unwrap();
    assert_eq!(ab, ba);
    assert_eq!(ab.len(), input.len());
}

// === Remix Pipeline ===

#[test]
fn test_remix_pipeline() {
    let registry = PresetRegistry::new();
    let config = EngineConfig::default();
    let input = create_sine_buffer(440.0, 2.0, -18.0);

    let mut request = RemixRequest::new("dark", "ambient");
    request.source_mood = Some("happy".to_string());
    request.pitch_shift = -2;
    request.harmony = Some("third".to_string());

    let clip = remix(&registry, &config, &request, &input).unwrap();

    assert_eq!(clip.buffer.sample_rate(), 44100);
    assert_eq!(clip.buffer.peak(), i16::MAX as u16);
    assert_eq!(clip.metadata.audio_features, analyze(&input));
    assert!(clip.metadata.applied_effects.intelligent_transform);
    assert_eq!(clip.metadata.applied_effects.harmony.as_deref(), Some("third"));
    // happy (130 BPM) to dark (90 BPM) slows the clip down
    assert!(clip.buffer.len() > input.len());
}
