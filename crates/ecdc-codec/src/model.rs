//! Model variants and their coding configuration.
//!
//! Two model variants exist: a 24 kHz mono model and a 48 kHz stereo model
//! for high-quality use. Each carries a fixed sample rate, channel count,
//! and set of supported target bandwidths; the active bandwidth is the one
//! knob that changes between invocations.

use std::fmt;
use std::str::FromStr;

use ecdc_audio::Waveform;

use crate::bitstream::{self, PayloadHeader};
use crate::device::ComputeDevice;
use crate::embedding::Embedding;
use crate::engine;
use crate::error::{CodecError, Result};

// ───────────────────────────── bandwidth ─────────────────────────────

/// Target bandwidth in kbit/s — the codec's quality/size control.
///
/// The set is closed: these five rates are the only ones any model variant
/// can be asked to code at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bandwidth {
    Kbps1_5,
    Kbps3,
    Kbps6,
    Kbps12,
    Kbps24,
}

impl Bandwidth {
    /// All bandwidths, in ascending order.
    pub const ALL: [Bandwidth; 5] = [
        Bandwidth::Kbps1_5,
        Bandwidth::Kbps3,
        Bandwidth::Kbps6,
        Bandwidth::Kbps12,
        Bandwidth::Kbps24,
    ];

    /// Numeric rate in kbit/s.
    pub fn kbps(self) -> f32 {
        match self {
            Bandwidth::Kbps1_5 => 1.5,
            Bandwidth::Kbps3 => 3.0,
            Bandwidth::Kbps6 => 6.0,
            Bandwidth::Kbps12 => 12.0,
            Bandwidth::Kbps24 => 24.0,
        }
    }

    /// Canonical label as it appears on the CLI and in diagnostics.
    pub fn label(self) -> &'static str {
        match self {
            Bandwidth::Kbps1_5 => "1.5",
            Bandwidth::Kbps3 => "3",
            Bandwidth::Kbps6 => "6",
            Bandwidth::Kbps12 => "12",
            Bandwidth::Kbps24 => "24",
        }
    }

    /// Stable wire code used in the payload header.
    pub(crate) fn code(self) -> u8 {
        match self {
            Bandwidth::Kbps1_5 => 0,
            Bandwidth::Kbps3 => 1,
            Bandwidth::Kbps6 => 2,
            Bandwidth::Kbps12 => 3,
            Bandwidth::Kbps24 => 4,
        }
    }

    pub(crate) fn from_code(code: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|bw| bw.code() == code)
    }
}

impl Default for Bandwidth {
    /// The mid-range rate, supported by every model variant.
    fn default() -> Self {
        Bandwidth::Kbps6
    }
}

impl fmt::Display for Bandwidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Bandwidth {
    type Err = String;

    /// Accepts the same spellings a float argument would (`3`, `3.0`, …).
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let value: f32 = s
            .parse()
            .map_err(|_| format!("invalid bandwidth '{s}'"))?;
        Bandwidth::ALL
            .into_iter()
            .find(|bw| (bw.kbps() - value).abs() < f32::EPSILON)
            .ok_or_else(|| format!("bandwidth must be one of 1.5, 3, 6, 12, 24 (got '{s}')"))
    }
}

// ─────────────────────────── model registry ───────────────────────────

/// The named model variants the driver can select.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelKind {
    /// 24 kHz mono model — the default tier.
    Khz24,
    /// 48 kHz stereo model — the high-quality tier.
    Khz48,
}

/// Fixed per-variant configuration.
#[derive(Debug)]
pub struct ModelSpec {
    /// Registry name of the variant.
    pub name: &'static str,
    /// Native sample rate in Hz.
    pub sample_rate: u32,
    /// Native channel count.
    pub channels: u16,
    /// Target bandwidths this variant supports.
    pub bandwidths: &'static [Bandwidth],
}

impl ModelSpec {
    pub fn supports(&self, bandwidth: Bandwidth) -> bool {
        self.bandwidths.contains(&bandwidth)
    }
}

static SPEC_24KHZ: ModelSpec = ModelSpec {
    name: "ecdc_24khz",
    sample_rate: 24_000,
    channels: 1,
    bandwidths: &Bandwidth::ALL,
};

static SPEC_48KHZ: ModelSpec = ModelSpec {
    name: "ecdc_48khz",
    sample_rate: 48_000,
    channels: 2,
    bandwidths: &[
        Bandwidth::Kbps3,
        Bandwidth::Kbps6,
        Bandwidth::Kbps12,
        Bandwidth::Kbps24,
    ],
};

impl ModelKind {
    /// Variant selected by the high-quality flag.
    pub fn from_hq(hq: bool) -> Self {
        if hq {
            ModelKind::Khz48
        } else {
            ModelKind::Khz24
        }
    }

    /// Registry name of the variant.
    pub fn name(self) -> &'static str {
        self.spec().name
    }

    /// Fixed configuration of the variant.
    pub fn spec(self) -> &'static ModelSpec {
        match self {
            ModelKind::Khz24 => &SPEC_24KHZ,
            ModelKind::Khz48 => &SPEC_48KHZ,
        }
    }

    /// Stable wire id used in the payload header.
    pub(crate) fn wire_id(self) -> u8 {
        match self {
            ModelKind::Khz24 => 0,
            ModelKind::Khz48 => 1,
        }
    }

    pub(crate) fn from_wire_id(id: u8) -> Option<Self> {
        match id {
            0 => Some(ModelKind::Khz24),
            1 => Some(ModelKind::Khz48),
            _ => None,
        }
    }
}

// ───────────────────────────── codec model ─────────────────────────────

/// A loaded model variant with its active target bandwidth.
///
/// The active bandwidth starts at the default and changes only through
/// [`CodecModel::set_target_bandwidth`], which keeps it inside the
/// variant's supported set.
pub struct CodecModel {
    kind: ModelKind,
    bandwidth: Bandwidth,
    device: ComputeDevice,
}

impl CodecModel {
    /// Instantiate a model variant on the given device.
    pub fn load(kind: ModelKind, device: ComputeDevice) -> Self {
        tracing::debug!(model = kind.name(), device = %device, "Loaded codec model");
        Self {
            kind,
            bandwidth: Bandwidth::default(),
            device,
        }
    }

    pub fn kind(&self) -> ModelKind {
        self.kind
    }

    pub fn spec(&self) -> &'static ModelSpec {
        self.kind.spec()
    }

    /// The active target bandwidth.
    pub fn target_bandwidth(&self) -> Bandwidth {
        self.bandwidth
    }

    /// Set the active target bandwidth.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::UnsupportedBandwidth`] if this variant does not
    /// support the requested rate.
    pub fn set_target_bandwidth(&mut self, bandwidth: Bandwidth) -> Result<()> {
        if !self.spec().supports(bandwidth) {
            return Err(CodecError::UnsupportedBandwidth {
                bandwidth: bandwidth.label(),
                model: self.kind.name(),
            });
        }
        self.bandwidth = bandwidth;
        Ok(())
    }

    /// Encode a waveform into a self-describing compressed payload.
    ///
    /// The waveform must already be at the model's native sample rate and
    /// channel layout. `use_lm` selects language-model-assisted entropy
    /// coding where the engine provides it, trading run time for a smaller
    /// payload; the flag is recorded in the payload header either way.
    pub fn encode(&self, wav: &Waveform, use_lm: bool) -> Result<Vec<u8>> {
        self.check_layout(wav)?;

        let header = PayloadHeader {
            model: self.kind,
            bandwidth: self.bandwidth,
            lm: use_lm,
            frames: wav.frames() as u64,
        };
        let coded = engine::encode_samples(&wav.samples);

        let mut payload = Vec::with_capacity(bitstream::HEADER_SIZE + coded.len());
        header.write_to(&mut payload)?;
        payload.extend_from_slice(&coded);

        tracing::debug!(
            model = self.kind.name(),
            bandwidth = self.bandwidth.label(),
            lm = use_lm,
            bytes = payload.len(),
            "Encoded waveform"
        );
        Ok(payload)
    }

    /// Run only the encoder stage and return the intermediate representation,
    /// skipping quantization and entropy coding.
    ///
    /// `use_lm` is accepted for signature parity with [`CodecModel::encode`]
    /// and has no effect here: language-model assistance applies to entropy
    /// coding, which this operation skips.
    pub fn encode_embedding(&self, wav: &Waveform, use_lm: bool) -> Result<Embedding> {
        self.check_layout(wav)?;
        let _ = use_lm;
        Ok(engine::embed(&wav.samples))
    }

    fn check_layout(&self, wav: &Waveform) -> Result<()> {
        let spec = self.spec();
        if wav.sample_rate != spec.sample_rate || wav.channels != spec.channels {
            return Err(CodecError::WaveformLayout {
                model: spec.name,
                got_rate: wav.sample_rate,
                got_channels: wav.channels,
                want_rate: spec.sample_rate,
                want_channels: spec.channels,
            });
        }
        Ok(())
    }
}

/// Decode a compressed payload back to a waveform.
///
/// The payload header names the model variant that produced it, so no model
/// selection flags are needed. The returned waveform is at the variant's
/// native sample rate and channel layout, in host memory.
pub fn decode(data: &[u8], device: ComputeDevice) -> Result<Waveform> {
    let mut cursor = data;
    let header = PayloadHeader::read_from(&mut cursor)?;
    let spec = header.model.spec();

    let samples = engine::decode_samples(cursor, header.frames as usize * spec.channels as usize)?;

    tracing::debug!(
        model = header.model.name(),
        bandwidth = header.bandwidth.label(),
        lm = header.lm,
        frames = header.frames,
        device = %device,
        "Decoded payload"
    );

    Ok(Waveform {
        samples,
        channels: spec.channels,
        sample_rate: spec.sample_rate,
    })
}
