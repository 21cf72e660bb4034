//! Pipeline orchestration — runs the validated plan to completion.
//!
//! One exhaustive match over the four modes; the compute device is chosen
//! once by the caller and applies to every codec call in the run.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use ecdc_audio::Waveform;
use ecdc_codec::{CodecModel, ComputeDevice, ModelKind};

use crate::args::Cli;
use crate::plan::{PipelineMode, ResolvedPlan};

/// Peak magnitude above which decoded audio is flagged as clipping.
const CLIPPING_LIMIT: f32 = 0.99;

/// Execute the selected pipeline.
pub fn run(args: &Cli, plan: &ResolvedPlan, device: ComputeDevice) -> Result<()> {
    match plan.mode {
        PipelineMode::Decompress => {
            let payload = fs::read(&plan.input)
                .with_context(|| format!("Failed to read payload: {}", plan.input.display()))?;
            let wav = ecdc_codec::decode(&payload, device)?;
            check_clipping(&wav, args.rescale);
            write_audio(&plan.output, &wav, args.rescale)?;
        }

        PipelineMode::CompressToBitstream => {
            let model = load_model(plan.model, args, device)?;
            let wav = load_converted(&plan.input, &model)?;
            let payload = model.encode(&wav, args.lm)?;
            fs::write(&plan.output, payload)
                .with_context(|| format!("Failed to write payload: {}", plan.output.display()))?;
        }

        PipelineMode::CompressToEmbedding => {
            let model = load_model(plan.model, args, device)?;
            let wav = load_converted(&plan.input, &model)?;
            let embedding = model.encode_embedding(&wav, args.lm)?;
            embedding.save(&plan.output).with_context(|| {
                format!("Failed to write embedding: {}", plan.output.display())
            })?;
        }

        PipelineMode::CompressRoundTrip => {
            let model = load_model(plan.model, args, device)?;
            let wav = load_converted(&plan.input, &model)?;
            let payload = model.encode(&wav, args.lm)?;
            let out = ecdc_codec::decode(&payload, device)?;
            check_clipping(&out, args.rescale);
            write_audio(&plan.output, &out, args.rescale)?;
        }
    }
    Ok(())
}

/// Instantiate the model variant with the validated target bandwidth set.
/// Setting the bandwidth here is the precondition of every encode below.
fn load_model(kind: ModelKind, args: &Cli, device: ComputeDevice) -> Result<CodecModel> {
    let mut model = CodecModel::load(kind, device);
    model.set_target_bandwidth(args.bandwidth)?;
    Ok(model)
}

/// Load the input and bring it to the model's native rate and layout.
fn load_converted(input: &Path, model: &CodecModel) -> Result<Waveform> {
    let spec = model.spec();
    let wav = ecdc_audio::load(input)
        .with_context(|| format!("Failed to load audio: {}", input.display()))?;
    let wav = ecdc_audio::convert(wav, spec.sample_rate, spec.channels)
        .context("Failed to convert audio to the model's rate and layout")?;
    Ok(wav)
}

fn write_audio(output: &Path, wav: &Waveform, rescale: bool) -> Result<()> {
    ecdc_audio::save(output, wav, rescale)
        .with_context(|| format!("Failed to write audio: {}", output.display()))
}

/// Warn (never fail) when decoded audio would clip on playback. Skipped when
/// the output is being rescaled anyway.
fn check_clipping(wav: &Waveform, rescale: bool) {
    if rescale {
        return;
    }
    let peak = wav.peak();
    if peak > CLIPPING_LIMIT {
        tracing::warn!(
            "Clipping!! max scale {peak}, limit is {CLIPPING_LIMIT}. \
             To avoid clipping, use the `-r` option to rescale the output."
        );
    }
}
