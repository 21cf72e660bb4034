//! Channel remixing and sample-rate conversion.
//!
//! Remixing happens first (fewer channels to resample), then a sinc
//! resampler brings the waveform to the target rate.

use rubato::{
    Resampler, SincFixedIn, SincInterpolationParameters, SincInterpolationType, WindowFunction,
};

use crate::error::{AudioError, Result};
use crate::Waveform;

/// Remix and resample a waveform to the given rate and channel count.
///
/// Downmixing averages each frame; a mono source is upmixed by duplication.
/// Other layout changes are rejected.
pub fn convert(wav: Waveform, target_rate: u32, target_channels: u16) -> Result<Waveform> {
    let wav = remix(wav, target_channels)?;
    if wav.sample_rate == target_rate {
        return Ok(wav);
    }
    resample(wav, target_rate)
}

fn remix(wav: Waveform, target_channels: u16) -> Result<Waveform> {
    if wav.channels == target_channels {
        return Ok(wav);
    }

    let samples = if target_channels == 1 {
        // Downmix: per-frame mean across channels.
        let n = wav.channels as usize;
        wav.samples
            .chunks(n)
            .map(|frame| frame.iter().sum::<f32>() / n as f32)
            .collect()
    } else if wav.channels == 1 {
        // Upmix mono by duplication.
        let mut out = Vec::with_capacity(wav.samples.len() * target_channels as usize);
        for &s in &wav.samples {
            for _ in 0..target_channels {
                out.push(s);
            }
        }
        out
    } else {
        return Err(AudioError::ChannelLayout {
            from: wav.channels,
            to: target_channels,
        });
    };

    Ok(Waveform {
        samples,
        channels: target_channels,
        sample_rate: wav.sample_rate,
    })
}

fn resample(wav: Waveform, target_rate: u32) -> Result<Waveform> {
    let channels = wav.channels as usize;
    let frames = wav.frames();
    let ratio = target_rate as f64 / wav.sample_rate as f64;

    let params = SincInterpolationParameters {
        sinc_len: 256,
        f_cutoff: 0.95,
        interpolation: SincInterpolationType::Linear,
        oversampling_factor: 256,
        window: WindowFunction::BlackmanHarris2,
    };

    let chunk_size = 1024;
    let mut resampler = SincFixedIn::<f32>::new(ratio, 2.0, params, chunk_size, channels)
        .map_err(|e| AudioError::Resample(format!("init: {e}")))?;

    // Deinterleave into per-channel buffers.
    let mut planar: Vec<Vec<f32>> = vec![Vec::with_capacity(frames); channels];
    for frame in wav.samples.chunks(channels) {
        for (ch, &s) in frame.iter().enumerate() {
            planar[ch].push(s);
        }
    }

    let mut out_planar: Vec<Vec<f32>> =
        vec![Vec::with_capacity((frames as f64 * ratio) as usize + chunk_size); channels];

    let mut pos = 0;
    while pos < frames {
        let end = (pos + chunk_size).min(frames);
        let input: Vec<Vec<f32>> = planar
            .iter()
            .map(|ch| {
                let mut chunk = ch[pos..end].to_vec();
                chunk.resize(chunk_size, 0.0);
                chunk
            })
            .collect();

        let result = resampler
            .process(&input, None)
            .map_err(|e| AudioError::Resample(format!("process: {e}")))?;

        for (ch, data) in result.into_iter().enumerate() {
            out_planar[ch].extend_from_slice(&data);
        }
        pos = end;
    }

    // Trim to the expected output length, then reinterleave.
    let expected = (frames as f64 * ratio) as usize;
    for ch in &mut out_planar {
        ch.truncate(expected);
    }
    let out_frames = out_planar.iter().map(|ch| ch.len()).min().unwrap_or(0);

    let mut samples = Vec::with_capacity(out_frames * channels);
    for i in 0..out_frames {
        for ch in &out_planar {
            samples.push(ch[i]);
        }
    }

    tracing::debug!(
        from = wav.sample_rate,
        to = target_rate,
        in_frames = frames,
        out_frames,
        "Resampled waveform"
    );

    Ok(Waveform {
        samples,
        channels: wav.channels,
        sample_rate: target_rate,
    })
}
