//! Error handling for Moodwave
//!
//! Validation failures are reported before any synthesis starts. Each error
//! carries a stable code and a recovery hint for front ends.

use thiserror::Error;

/// Result type alias for Moodwave operations
pub type Result<T> = std::result::Result<T, MoodwaveError>;

/// Main error type for Moodwave operations
#[derive(Error, Debug)]
pub enum MoodwaveError {
    // Preset Errors
    #[error("Unknown mood: {name}")]
    UnknownMood { name: String },

    #[error("Unknown genre: {name}")]
    UnknownGenre { name: String },

    // Request Validation Errors
    #[error("Invalid duration: {value}s (must be positive)")]
    InvalidDuration { value: f64 },

    #[error("Invalid tempo: {value} BPM (must be positive)")]
    InvalidTempo { value: f64 },

    #[error("Invalid parameter: {param} = {value} (expected {expected})")]
    InvalidParameter {
        param: String,
        value: String,
        expected: String,
    },

    #[error("Invalid sample rate: {rate} Hz")]
    InvalidSampleRate { rate: u32 },

    // Audio I/O Errors
    #[error("Failed to read audio file: {path}")]
    AudioReadError {
        path: String,
        #[source]
        source: hound::Error,
    },

    #[error("Failed to write audio file: {path}")]
    AudioWriteError {
        path: String,
        #[source]
        source: hound::Error,
    },

    #[error("Unsupported audio format: {details}")]
    UnsupportedFormat { details: String },

    // Configuration Errors
    #[error("Configuration error: {details}")]
    ConfigError { details: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl MoodwaveError {
    /// Get the error code for this error type
    pub fn error_code(&self) -> &'static str {
        match self {
            MoodwaveError::UnknownMood { .. } => "UNKNOWN_MOOD",
            MoodwaveError::UnknownGenre { .. } => "UNKNOWN_GENRE",
            MoodwaveError::InvalidDuration { .. } => "INVALID_DURATION",
            MoodwaveError::InvalidTempo { .. } => "INVALID_TEMPO",
            MoodwaveError::InvalidParameter { .. } => "INVALID_PARAMETER",
            MoodwaveError::InvalidSampleRate { .. } => "INVALID_SAMPLE_RATE",
            MoodwaveError::AudioReadError { .. } => "AUDIO_READ_ERROR",
            MoodwaveError::AudioWriteError { .. } => "AUDIO_WRITE_ERROR",
            MoodwaveError::UnsupportedFormat { .. } => "UNSUPPORTED_FORMAT",
            MoodwaveError::ConfigError { .. } => "CONFIG_ERROR",
            MoodwaveError::Io(_) => "IO_ERROR",
            MoodwaveError::Serialization(_) => "SERIALIZATION_ERROR",
        }
    }

    /// Whether the error was caused by the request rather than the environment
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            MoodwaveError::UnknownMood { .. }
                | MoodwaveError::UnknownGenre { .. }
                | MoodwaveError::InvalidDuration { .. }
                | MoodwaveError::InvalidTempo { .. }
                | MoodwaveError::InvalidParameter { .. }
                | MoodwaveError::InvalidSampleRate { .. }
        )
    }

    /// Returns a suggested recovery action for this error
    pub fn recovery_hint(&self) -> &'static str {
        match self {
            Self::UnknownMood { .. } => {
                "Use one of: happy, sad, energetic, calm, dark, uplifting"
            }
            Self::UnknownGenre { .. } => "Use one of: electronic, ambient, rock, classical, jazz",
            Self::InvalidDuration { .. } => "Request a duration greater than zero seconds",
            Self::InvalidTempo { .. } => "Request a tempo greater than zero BPM",
            Self::InvalidParameter { .. } => "Adjust the parameter to be within valid range",
            Self::AudioReadError { .. } => "Check that the file exists and is a valid WAV file",
            Self::UnsupportedFormat { .. } => "Convert to 8/16/24/32-bit PCM or float WAV",
            Self::ConfigError { .. } => "Fix the configuration file or remove it to use defaults",
            _ => "Check the error details and try again",
        }
    }
}
