//! # ecdc-codec
//!
//! The codec capability behind the `ecdc` driver: a registry of model
//! variants, the self-describing `.ecdc` payload container, the embedding
//! container, and compute-device selection.
//!
//! The driver interacts with the codec only through [`CodecModel`] (encode,
//! embedding-only encode) and [`decode`]; what implements those operations —
//! today the deterministic baseline engine, eventually a learned one — is
//! this crate's private business.

pub mod bitstream;
pub mod device;
pub mod embedding;
mod engine;
pub mod error;
pub mod model;

pub use bitstream::PayloadHeader;
pub use device::ComputeDevice;
pub use embedding::Embedding;
pub use error::CodecError;
pub use model::{decode, Bandwidth, CodecModel, ModelKind, ModelSpec};

/// File extension of the bitstream container.
pub const BITSTREAM_EXTENSION: &str = bitstream::EXTENSION;

/// File extension of the embedding container.
pub const EMBEDDING_EXTENSION: &str = embedding::EXTENSION;
