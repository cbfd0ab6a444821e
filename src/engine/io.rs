//! Audio file I/O for Moodwave
//!
//! WAV only. Container decoding for other formats belongs to whatever front
//! end feeds the engine. Imported audio is converted to mono 16-bit at its
//! native sample rate; exports are mono 16-bit PCM.

use std::path::Path;

use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use log::debug;

use crate::engine::buffer::{to_sample, AudioBuffer, MAX_AMPLITUDE};
use crate::error::{MoodwaveError, Result};

/// Import a WAV file as a mono 16-bit buffer
///
/// Multi-channel files are averaged down to one channel.
pub fn import_audio(path: &Path) -> Result<AudioBuffer> {
    let read_err = |e: hound::Error| MoodwaveError::AudioReadError {
        path: path.display().to_string(),
        source: e,
    };

    let reader = WavReader::open(path).map_err(read_err)?;
    let spec = reader.spec();
    let channels = spec.channels as usize;
    if channels == 0 {
        return Err(MoodwaveError::UnsupportedFormat {
            details: "WAV file declares zero channels".to_string(),
        });
    }

    // Interleaved samples in 16-bit units
    let interleaved: Vec<f64> = match spec.sample_format {
        SampleFormat::Float => reader
            .into_samples::<f32>()
            .map(|s| s.map(|v| v as f64 * MAX_AMPLITUDE).map_err(read_err))
            .collect::<Result<Vec<f64>>>()?,
        SampleFormat::Int => {
            if spec.bits_per_sample == 0 || spec.bits_per_sample > 32 {
                return Err(MoodwaveError::UnsupportedFormat {
                    details: format!("{}-bit integer PCM", spec.bits_per_sample),
                });
            }
            let scale = 32768.0 / (1u64 << (spec.bits_per_sample - 1)) as f64;
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| v as f64 * scale).map_err(read_err))
                .collect::<Result<Vec<f64>>>()?
        }
    };

    let samples: Vec<i16> = interleaved
        .chunks(channels)
        .map(|frame| {
            let mean = frame.iter().sum::<f64>() / frame.len() as f64;
            to_sample(mean)
        })
        .collect();

    debug!(
        "Imported {}: {} samples at {} Hz ({} channel(s) in file)",
        path.display(),
        samples.len(),
        spec.sample_rate,
        channels
    );

    AudioBuffer::new(samples, spec.sample_rate)
}

/// Export a buffer as mono 16-bit PCM WAV
pub fn export_audio(buffer: &AudioBuffer, path: &Path) -> Result<()> {
    let write_err = |e: hound::Error| MoodwaveError::AudioWriteError {
        path: path.display().to_string(),
        source: e,
    };

    let spec = WavSpec {
        channels: buffer.channels(),
        sample_rate: buffer.sample_rate(),
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };

    let mut writer = WavWriter::create(path, spec).map_err(write_err)?;
    for &sample in buffer.samples() {
        writer.write_sample(sample).map_err(write_err)?;
    }
    writer.finalize().map_err(write_err)?;

    debug!(
        "Exported {}: {:.3}s at {} Hz",
        path.display(),
        buffer.duration_secs(),
        buffer.sample_rate()
    );
    Ok(())
}
