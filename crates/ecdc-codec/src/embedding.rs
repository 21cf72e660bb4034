//! The embedding container — persists the encoder's intermediate
//! representation, skipping quantization and entropy coding.
//!
//! Layout (little-endian): magic `ECEM`, version u8, reserved 3 bytes,
//! frame count u64, frame dimension u32, then frame-major f32 data.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

use crate::error::{CodecError, Result};

/// File extension of the embedding container (without the leading dot).
pub const EXTENSION: &str = "pt";

const MAGIC: [u8; 4] = *b"ECEM";
const VERSION: u8 = 1;

/// Intermediate representation produced by the encoder stage: a frame-major
/// matrix of `frames` rows by `dim` columns.
#[derive(Debug, Clone, PartialEq)]
pub struct Embedding {
    /// Number of frames (rows).
    pub frames: usize,
    /// Values per frame (columns).
    pub dim: usize,
    /// Frame-major values, `frames * dim` long.
    pub data: Vec<f32>,
}

impl Embedding {
    /// Persist the representation to disk.
    pub fn save(&self, path: &Path) -> Result<()> {
        let mut w = BufWriter::new(File::create(path)?);
        w.write_all(&MAGIC)?;
        w.write_u8(VERSION)?;
        w.write_all(&[0u8; 3])?;
        w.write_u64::<LittleEndian>(self.frames as u64)?;
        w.write_u32::<LittleEndian>(self.dim as u32)?;
        for &v in &self.data {
            w.write_f32::<LittleEndian>(v)?;
        }
        w.flush()?;
        tracing::debug!(
            path = %path.display(),
            frames = self.frames,
            dim = self.dim,
            "Wrote embedding"
        );
        Ok(())
    }

    /// Read a representation back from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let mut r = BufReader::new(File::open(path)?);

        let mut magic = [0u8; 4];
        r.read_exact(&mut magic)?;
        if magic != MAGIC {
            return Err(CodecError::InvalidMagic);
        }
        let version = r.read_u8()?;
        if version != VERSION {
            return Err(CodecError::UnsupportedVersion(version));
        }
        let mut reserved = [0u8; 3];
        r.read_exact(&mut reserved)?;

        let frames = r.read_u64::<LittleEndian>()? as usize;
        let dim = r.read_u32::<LittleEndian>()? as usize;

        let mut data = vec![0.0f32; frames * dim];
        for v in &mut data {
            *v = r.read_f32::<LittleEndian>()?;
        }

        Ok(Self { frames, dim, data })
    }
}
