//! Error types for vadcut.

/// Result type alias for vadcut operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for vadcut.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration directory could not be determined.
    #[error("could not determine configuration directory for this platform")]
    ConfigDirNotFound,

    /// Failed to read configuration file.
    #[error("failed to read config file '{path}'")]
    ConfigRead {
        /// Path to the config file.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse configuration file.
    #[error("failed to parse config file '{path}'")]
    ConfigParse {
        /// Path to the config file.
        path: std::path::PathBuf,
        /// Underlying parse error.
        #[source]
        source: toml::de::Error,
    },

    /// Configuration validation failed.
    #[error("configuration validation failed: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    /// Failed to write configuration file.
    #[error("failed to write config file '{path}'")]
    ConfigWrite {
        /// Path to the config file.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to serialize configuration.
    #[error("failed to serialize config")]
    ConfigSerialize {
        /// Underlying serialization error.
        #[source]
        source: toml::ser::Error,
    },

    /// No valid media files found.
    #[error("no valid media files found in the provided paths")]
    NoValidInputFiles,

    /// Failed to open media file.
    #[error("failed to open media file '{path}'")]
    AudioOpen {
        /// Path to the media file.
        path: std::path::PathBuf,
        /// Underlying error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Failed to decode audio.
    #[error("failed to decode audio from '{path}'")]
    AudioDecode {
        /// Path to the media file.
        path: std::path::PathBuf,
        /// Underlying error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// No audio tracks found.
    #[error("no audio tracks found in '{path}'")]
    NoAudioTracks {
        /// Path to the media file.
        path: std::path::PathBuf,
    },

    /// Failed to resample audio.
    #[error("failed to resample audio: {reason}")]
    Resample {
        /// Description of the resampling failure.
        reason: String,
    },

    /// Decoding produced no samples.
    #[error("no audio samples decoded from '{path}'")]
    NoAudioSamples {
        /// Path to the media file.
        path: std::path::PathBuf,
    },

    /// The signal handed to the profiler contains no samples.
    #[error("cannot profile an empty signal")]
    EmptySignal,

    /// The signal is pure silence, so energy normalization is undefined.
    #[error("signal is silent: energy profile maximum is zero, nothing to detect")]
    DegenerateSignal,

    /// Failed to read segment list file.
    #[error("failed to read segment list '{path}'")]
    SegmentsRead {
        /// Path to the segment list file.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse segment list file.
    #[error("failed to parse segment list '{path}'")]
    SegmentsParse {
        /// Path to the segment list file.
        path: std::path::PathBuf,
        /// Underlying parse error.
        #[source]
        source: serde_json::Error,
    },

    /// Failed to write segment list file.
    #[error("failed to write segment list '{path}'")]
    SegmentsWrite {
        /// Path to the segment list file.
        path: std::path::PathBuf,
        /// Underlying serialization error.
        #[source]
        source: serde_json::Error,
    },

    /// Segment list contains an invalid record.
    #[error("invalid segment at index {index}: {message}")]
    InvalidSegment {
        /// Zero-based index of the offending record.
        index: usize,
        /// Description of the invariant violation.
        message: String,
    },

    /// Failed to write WAV clip.
    #[error("failed to write WAV clip '{path}'")]
    ClipWrite {
        /// Path to the WAV file.
        path: std::path::PathBuf,
        /// Underlying error.
        #[source]
        source: hound::Error,
    },

    /// Failed to create output directory.
    #[error("failed to create output directory '{path}'")]
    OutputDirCreate {
        /// Path to the output directory.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Output directory already contains exported clips.
    #[error("output directory '{path}' already contains clips (use --overwrite to replace them)")]
    OutputDirNotEmpty {
        /// Path to the output directory.
        path: std::path::PathBuf,
    },

    /// Internal error (for unexpected failures).
    #[error("internal error: {message}")]
    Internal {
        /// Error message.
        message: String,
    },
}
