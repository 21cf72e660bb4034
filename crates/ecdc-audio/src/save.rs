//! WAV output with peak handling.

use std::path::Path;

use crate::error::Result;
use crate::Waveform;

/// Headroom limit applied on write. Samples beyond it either clip (clamped)
/// or, with `rescale`, pull the whole waveform down to fit.
const LIMIT: f32 = 0.99;

/// Write a waveform to a 16-bit PCM `.wav` file.
///
/// With `rescale`, the waveform is scaled by `min(LIMIT / peak, 1.0)` so the
/// loudest sample lands on the limit; otherwise samples are clamped to
/// `±LIMIT` as-is.
pub fn save(path: &Path, wav: &Waveform, rescale: bool) -> Result<()> {
    let peak = wav.peak();
    let scale = if rescale && peak > LIMIT {
        LIMIT / peak
    } else {
        1.0
    };

    let spec = hound::WavSpec {
        channels: wav.channels,
        sample_rate: wav.sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut writer = hound::WavWriter::create(path, spec)?;
    for &sample in &wav.samples {
        let s = (sample * scale).clamp(-LIMIT, LIMIT);
        writer.write_sample((s * i16::MAX as f32) as i16)?;
    }
    writer.finalize()?;

    tracing::debug!(
        path = %path.display(),
        frames = wav.frames(),
        rescale,
        peak,
        "Wrote output WAV"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn read_back(path: &Path) -> (hound::WavSpec, Vec<f32>) {
        let reader = hound::WavReader::open(path).unwrap();
        let spec = reader.spec();
        let samples = reader
            .into_samples::<i16>()
            .map(|s| s.unwrap() as f32 / i16::MAX as f32)
            .collect();
        (spec, samples)
    }

    #[test]
    fn test_save_preserves_layout() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("out.wav");
        let wav = Waveform {
            samples: vec![0.5, -0.5, 0.25, -0.25],
            channels: 2,
            sample_rate: 48_000,
        };
        save(&path, &wav, false).unwrap();

        let (spec, samples) = read_back(&path);
        assert_eq!(spec.channels, 2);
        assert_eq!(spec.sample_rate, 48_000);
        assert_eq!(samples.len(), 4);
        assert!((samples[0] - 0.5).abs() < 1e-3);
    }

    #[test]
    fn test_save_without_rescale_clamps() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("loud.wav");
        let wav = Waveform {
            samples: vec![1.5, -1.5, 0.2],
            channels: 1,
            sample_rate: 24_000,
        };
        save(&path, &wav, false).unwrap();

        let (_, samples) = read_back(&path);
        assert!((samples[0] - LIMIT).abs() < 1e-3);
        assert!((samples[1] + LIMIT).abs() < 1e-3);
        // In-range samples are untouched.
        assert!((samples[2] - 0.2).abs() < 1e-3);
    }

    #[test]
    fn test_save_with_rescale_scales_everything() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("scaled.wav");
        let wav = Waveform {
            samples: vec![1.98, 0.99],
            channels: 1,
            sample_rate: 24_000,
        };
        save(&path, &wav, true).unwrap();

        let (_, samples) = read_back(&path);
        // Peak 1.98 scaled to the limit, relative levels preserved.
        assert!((samples[0] - LIMIT).abs() < 1e-3);
        assert!((samples[1] - LIMIT / 2.0).abs() < 1e-3);
    }

    #[test]
    fn test_save_rescale_noop_when_in_range() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("quiet.wav");
        let wav = Waveform {
            samples: vec![0.5, -0.5],
            channels: 1,
            sample_rate: 24_000,
        };
        save(&path, &wav, true).unwrap();

        let (_, samples) = read_back(&path);
        assert!((samples[0] - 0.5).abs() < 1e-3);
    }
}
