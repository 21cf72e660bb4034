//! Audio loading via symphonia.
//!
//! Any container/codec combination the enabled symphonia features support is
//! accepted; the decoded stream is returned as interleaved f32 samples at its
//! native sample rate and channel layout.

use std::fs::File;
use std::path::Path;

use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::DecoderOptions;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

use crate::error::{AudioError, Result};
use crate::Waveform;

/// Decode an audio file to an interleaved f32 [`Waveform`].
///
/// The container format is probed from the stream, with the file extension
/// used as a hint. Corrupt frames are skipped; an input that yields no
/// samples at all is an error.
pub fn load(path: &Path) -> Result<Waveform> {
    let file = File::open(path)?;
    let mss = MediaSourceStream::new(Box::new(file), Default::default());

    let mut hint = Hint::new();
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        hint.with_extension(ext);
    }

    let probed = symphonia::default::get_probe().format(
        &hint,
        mss,
        &FormatOptions::default(),
        &MetadataOptions::default(),
    )?;
    let mut format = probed.format;

    let track = format.default_track().ok_or(AudioError::NoTrack)?;
    let track_id = track.id;
    let codec_params = track.codec_params.clone();
    let sample_rate = codec_params
        .sample_rate
        .ok_or(AudioError::UnknownSampleRate)?;
    let channels = codec_params.channels.map(|c| c.count()).unwrap_or(1) as u16;

    let mut decoder =
        symphonia::default::get_codecs().make(&codec_params, &DecoderOptions::default())?;

    let mut samples: Vec<f32> = Vec::new();

    loop {
        let packet = match format.next_packet() {
            Ok(p) => p,
            Err(symphonia::core::errors::Error::IoError(ref e))
                if e.kind() == std::io::ErrorKind::UnexpectedEof =>
            {
                break;
            }
            Err(e) => return Err(e.into()),
        };

        if packet.track_id() != track_id {
            continue;
        }

        let decoded = match decoder.decode(&packet) {
            Ok(d) => d,
            Err(symphonia::core::errors::Error::DecodeError(e)) => {
                tracing::warn!(error = %e, "Skipping corrupt audio frame");
                continue;
            }
            Err(e) => return Err(e.into()),
        };

        let spec = *decoded.spec();
        let num_frames = decoded.frames();
        if num_frames == 0 {
            continue;
        }

        let mut sample_buf = SampleBuffer::<f32>::new(num_frames as u64, spec);
        sample_buf.copy_interleaved_ref(decoded);
        samples.extend_from_slice(sample_buf.samples());
    }

    if samples.is_empty() {
        return Err(AudioError::EmptyInput);
    }

    tracing::debug!(
        frames = samples.len() / channels as usize,
        channels,
        sample_rate,
        "Decoded input audio"
    );

    Ok(Waveform {
        samples,
        channels,
        sample_rate,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;
    use tempfile::TempDir;

    fn write_test_wav(path: &Path, channels: u16, sample_rate: u32, frames: usize) {
        let spec = hound::WavSpec {
            channels,
            sample_rate,
            bits_per_sample: 32,
            sample_format: hound::SampleFormat::Float,
        };
        let mut writer = hound::WavWriter::create(path, spec).unwrap();
        for i in 0..frames {
            let t = i as f32 / sample_rate as f32;
            let s = (2.0 * PI * 440.0 * t).sin() * 0.5;
            for _ in 0..channels {
                writer.write_sample(s).unwrap();
            }
        }
        writer.finalize().unwrap();
    }

    #[test]
    fn test_load_mono_wav() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("tone.wav");
        write_test_wav(&path, 1, 16_000, 16_000);

        let wav = load(&path).unwrap();
        assert_eq!(wav.channels, 1);
        assert_eq!(wav.sample_rate, 16_000);
        assert_eq!(wav.frames(), 16_000);
        assert!(wav.peak() <= 0.5 + 1e-4);
    }

    #[test]
    fn test_load_stereo_wav_interleaved() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("tone.wav");
        write_test_wav(&path, 2, 48_000, 4_800);

        let wav = load(&path).unwrap();
        assert_eq!(wav.channels, 2);
        assert_eq!(wav.samples.len(), 4_800 * 2);
        // Both channels carry the same signal in the fixture.
        assert_eq!(wav.samples[0], wav.samples[1]);
    }

    #[test]
    fn test_load_missing_file_fails() {
        assert!(load(Path::new("/nonexistent/missing.wav")).is_err());
    }
}
