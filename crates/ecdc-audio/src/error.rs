//! Error types for the audio I/O adapter.

use thiserror::Error;

/// Errors that can occur while loading, converting, or saving audio.
#[derive(Error, Debug)]
pub enum AudioError {
    #[error("No audio track found in input")]
    NoTrack,

    #[error("Input declares no sample rate")]
    UnknownSampleRate,

    #[error("No audio samples decoded from input")]
    EmptyInput,

    #[error("Cannot convert {from} channel(s) to {to}")]
    ChannelLayout { from: u16, to: u16 },

    #[error("Resampler error: {0}")]
    Resample(String),

    #[error("Format error: {0}")]
    Format(#[from] symphonia::core::errors::Error),

    #[error("WAV error: {0}")]
    Wav(#[from] hound::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, AudioError>;
