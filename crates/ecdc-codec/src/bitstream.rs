//! The `.ecdc` payload container — a fixed header followed by opaque coded
//! data.
//!
//! The header names the model variant that produced the payload, so a
//! decoder needs no out-of-band configuration.
//!
//! Layout (24 bytes, little-endian):
//! - `[0..4]`   magic: `ECDC`
//! - `[4]`      version: u8
//! - `[5]`      model wire id: u8
//! - `[6]`      bandwidth code: u8
//! - `[7]`      flags: u8 (bit 0 = language-model-assisted coding)
//! - `[8..16]`  frames: u64 (samples per channel)
//! - `[16..24]` reserved (zero-filled)

use std::io::{Read, Write};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

use crate::error::{CodecError, Result};
use crate::model::{Bandwidth, ModelKind};

/// File extension of the bitstream container (without the leading dot).
pub const EXTENSION: &str = "ecdc";

/// Magic bytes identifying an ecdc payload.
pub const MAGIC: [u8; 4] = *b"ECDC";

/// Current payload format version.
pub const VERSION: u8 = 1;

/// Size of the fixed header in bytes.
pub const HEADER_SIZE: usize = 24;

const FLAG_LM: u8 = 1 << 0;

/// The fixed header at the front of every payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PayloadHeader {
    /// Model variant that produced (and must decode) the payload.
    pub model: ModelKind,
    /// Target bandwidth the payload was coded at.
    pub bandwidth: Bandwidth,
    /// Whether language-model-assisted entropy coding was requested.
    pub lm: bool,
    /// Frame count (samples per channel) of the coded waveform.
    pub frames: u64,
}

impl PayloadHeader {
    /// Serialize the header.
    pub fn write_to<W: Write>(&self, w: &mut W) -> std::io::Result<()> {
        w.write_all(&MAGIC)?;
        w.write_u8(VERSION)?;
        w.write_u8(self.model.wire_id())?;
        w.write_u8(self.bandwidth.code())?;
        w.write_u8(if self.lm { FLAG_LM } else { 0 })?;
        w.write_u64::<LittleEndian>(self.frames)?;
        w.write_all(&[0u8; 8])?;
        Ok(())
    }

    /// Parse a header from the front of a payload.
    pub fn read_from<R: Read>(r: &mut R) -> Result<Self> {
        let mut magic = [0u8; 4];
        r.read_exact(&mut magic)?;
        if magic != MAGIC {
            return Err(CodecError::InvalidMagic);
        }

        let version = r.read_u8()?;
        if version != VERSION {
            return Err(CodecError::UnsupportedVersion(version));
        }

        let model_id = r.read_u8()?;
        let model = ModelKind::from_wire_id(model_id)
            .ok_or(CodecError::UnknownModelId(model_id))?;

        let bw_code = r.read_u8()?;
        let bandwidth = Bandwidth::from_code(bw_code)
            .ok_or(CodecError::UnknownBandwidthCode(bw_code))?;

        let flags = r.read_u8()?;
        let frames = r.read_u64::<LittleEndian>()?;

        let mut reserved = [0u8; 8];
        r.read_exact(&mut reserved)?;

        Ok(Self {
            model,
            bandwidth,
            lm: flags & FLAG_LM != 0,
            frames,
        })
    }
}
