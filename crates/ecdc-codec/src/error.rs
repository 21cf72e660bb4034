//! Error types for the ecdc codec crate.

use thiserror::Error;

/// Errors that can occur while configuring a model or coding a payload.
#[derive(Error, Debug)]
pub enum CodecError {
    #[error("Bandwidth {bandwidth} is not supported by the model {model}")]
    UnsupportedBandwidth {
        bandwidth: &'static str,
        model: &'static str,
    },

    #[error("Waveform is {got_rate} Hz / {got_channels}ch, model {model} expects {want_rate} Hz / {want_channels}ch")]
    WaveformLayout {
        model: &'static str,
        got_rate: u32,
        got_channels: u16,
        want_rate: u32,
        want_channels: u16,
    },

    #[error("Invalid magic bytes: expected ECDC")]
    InvalidMagic,

    #[error("Unsupported bitstream version: {0}")]
    UnsupportedVersion(u8),

    #[error("Unknown model id in bitstream: {0}")]
    UnknownModelId(u8),

    #[error("Unknown bandwidth code in bitstream: {0}")]
    UnknownBandwidthCode(u8),

    #[error("Payload truncated: expected {expected} coded bytes, got {got}")]
    Truncated { expected: usize, got: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CodecError>;
