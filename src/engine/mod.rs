//! Audio Engine Module
//!
//! Core buffer type and WAV file I/O.

pub mod buffer;
pub mod io;

pub use buffer::{
    db_to_linear, linear_to_db, ms_to_samples, seconds_to_samples, AudioBuffer,
    DEFAULT_SAMPLE_RATE, MAX_AMPLITUDE, MAX_BUFFER_SAMPLES,
};
pub use io::{export_audio, import_audio};
