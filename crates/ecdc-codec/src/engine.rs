//! Baseline coding engine behind the capability seam.
//!
//! The neural encoder/quantizer/entropy coder lives outside this crate; the
//! driver only depends on the operations exposed by [`crate::CodecModel`].
//! This engine provides the deterministic baseline behind those operations:
//! samples are coded as 16-bit little-endian scalars, and the embedding
//! stage windows the raw signal at the engine's hop size. That keeps the
//! whole driver — framing, model registry, device plumbing, every pipeline —
//! exercisable end-to-end, and a learned engine slots in behind the same
//! functions.

use crate::embedding::Embedding;
use crate::error::{CodecError, Result};

/// Hop size of the embedding stage, in samples.
pub(crate) const FRAME_SIZE: usize = 320;

/// Code a sample buffer to bytes. Deterministic for a given input.
pub(crate) fn encode_samples(samples: &[f32]) -> Vec<u8> {
    let mut coded = Vec::with_capacity(samples.len() * 2);
    for &s in samples {
        let q = (s.clamp(-1.0, 1.0) * i16::MAX as f32) as i16;
        coded.extend_from_slice(&q.to_le_bytes());
    }
    coded
}

/// Decode bytes back to a sample buffer of exactly `expected` samples.
pub(crate) fn decode_samples(data: &[u8], expected: usize) -> Result<Vec<f32>> {
    if data.len() != expected * 2 {
        return Err(CodecError::Truncated {
            expected: expected * 2,
            got: data.len(),
        });
    }
    Ok(data
        .chunks_exact(2)
        .map(|chunk| {
            let q = i16::from_le_bytes([chunk[0], chunk[1]]);
            q as f32 / i16::MAX as f32
        })
        .collect())
}

/// Window the signal into the intermediate representation: one row per hop,
/// the final row zero-padded.
pub(crate) fn embed(samples: &[f32]) -> Embedding {
    let frames = samples.len().div_ceil(FRAME_SIZE).max(1);
    let mut data = vec![0.0f32; frames * FRAME_SIZE];
    data[..samples.len()].copy_from_slice(samples);
    Embedding {
        frames,
        dim: FRAME_SIZE,
        data,
    }
}
