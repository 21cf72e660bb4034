//! Pre-flight validation.
//!
//! Every check runs before any audio is read or any model is touched, so a
//! doomed invocation costs nothing and never leaves a half-written output.
//! Failures are returned as values; the top-level handler owns the
//! print-and-exit.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::args::Cli;
use crate::plan::{self, PipelineMode, ResolvedPlan};

/// A fatal precondition failure. One diagnostic line, non-zero exit, nothing
/// written.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Input file {} does not exist.", .0.display())]
    InputMissing(PathBuf),

    #[error("Output folder for {} does not exist.", .0.display())]
    OutputDirMissing(PathBuf),

    #[error("Output file {} exists. Use -f / --force to overwrite.", .0.display())]
    OutputExists(PathBuf),

    #[error("Output extension must be .wav")]
    DecompressOutputExtension,

    #[error("Output extension must be .wav, .pt or .ecdc")]
    CompressOutputExtension,

    #[error("Bandwidth {bandwidth} is not supported by the model {model}")]
    UnsupportedBandwidth {
        bandwidth: &'static str,
        model: &'static str,
    },
}

/// Validate an invocation and produce its [`ResolvedPlan`].
///
/// Checks, in order: input existence, output-extension classification,
/// output directory existence, overwrite policy, and (compression modes)
/// bandwidth support — the bandwidth check consults registry metadata only,
/// no model is loaded.
pub fn validate(args: &Cli) -> Result<ResolvedPlan, ValidationError> {
    if !args.input.exists() {
        return Err(ValidationError::InputMissing(args.input.clone()));
    }

    let plan = plan::resolve(
        &args.input,
        args.output.as_deref(),
        args.hq,
        &args.decompress_suffix,
    )?;

    let parent = plan.output.parent().unwrap_or_else(|| Path::new("."));
    if !parent.as_os_str().is_empty() && !parent.exists() {
        return Err(ValidationError::OutputDirMissing(plan.output.clone()));
    }

    if plan.output.exists() && !args.force {
        return Err(ValidationError::OutputExists(plan.output.clone()));
    }

    if plan.mode != PipelineMode::Decompress && !plan.model.spec().supports(args.bandwidth) {
        return Err(ValidationError::UnsupportedBandwidth {
            bandwidth: args.bandwidth.label(),
            model: plan.model.name(),
        });
    }

    Ok(plan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tempfile::TempDir;

    fn cli(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("ecdc").chain(args.iter().copied()))
    }

    fn touch(path: &Path) {
        std::fs::write(path, b"").unwrap();
    }

    #[test]
    fn test_missing_input_rejected_first() {
        let tmp = TempDir::new().unwrap();
        let input = tmp.path().join("missing.wav");
        // Even with an illegal output extension, the input check wins.
        let args = cli(&[
            input.to_str().unwrap(),
            tmp.path().join("out.mp3").to_str().unwrap(),
        ]);
        assert!(matches!(
            validate(&args),
            Err(ValidationError::InputMissing(_))
        ));
    }

    #[test]
    fn test_missing_output_dir_rejected() {
        let tmp = TempDir::new().unwrap();
        let input = tmp.path().join("sample.wav");
        touch(&input);
        let output = tmp.path().join("no_such_dir").join("out.ecdc");
        let args = cli(&[input.to_str().unwrap(), output.to_str().unwrap()]);
        assert!(matches!(
            validate(&args),
            Err(ValidationError::OutputDirMissing(_))
        ));
    }

    #[test]
    fn test_existing_output_needs_force() {
        let tmp = TempDir::new().unwrap();
        let input = tmp.path().join("sample.wav");
        let output = tmp.path().join("out.ecdc");
        touch(&input);
        touch(&output);

        let args = cli(&[input.to_str().unwrap(), output.to_str().unwrap()]);
        assert!(matches!(
            validate(&args),
            Err(ValidationError::OutputExists(_))
        ));

        let args = cli(&["-f", input.to_str().unwrap(), output.to_str().unwrap()]);
        assert!(validate(&args).is_ok());
    }

    #[test]
    fn test_default_output_collision_detected() {
        let tmp = TempDir::new().unwrap();
        let input = tmp.path().join("sample.wav");
        touch(&input);
        touch(&tmp.path().join("sample.ecdc"));

        let args = cli(&[input.to_str().unwrap()]);
        assert!(matches!(
            validate(&args),
            Err(ValidationError::OutputExists(_))
        ));
    }

    #[test]
    fn test_hq_rejects_lowest_bandwidth() {
        let tmp = TempDir::new().unwrap();
        let input = tmp.path().join("sample.wav");
        touch(&input);

        let args = cli(&["-q", "-b", "1.5", input.to_str().unwrap()]);
        let err = validate(&args).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Bandwidth 1.5 is not supported by the model ecdc_48khz"
        );

        // The same bandwidth is fine on the default model.
        let args = cli(&["-b", "1.5", input.to_str().unwrap()]);
        assert!(validate(&args).is_ok());
    }

    #[test]
    fn test_bandwidth_not_checked_for_decompression() {
        let tmp = TempDir::new().unwrap();
        let input = tmp.path().join("sample.ecdc");
        touch(&input);

        // 1.5 with --hq is invalid for compression, but decompression
        // ignores bandwidth entirely.
        let args = cli(&["-q", "-b", "1.5", input.to_str().unwrap()]);
        let plan = validate(&args).unwrap();
        assert_eq!(plan.mode, PipelineMode::Decompress);
    }

    #[test]
    fn test_valid_invocation_yields_plan() {
        let tmp = TempDir::new().unwrap();
        let input = tmp.path().join("sample.wav");
        touch(&input);

        let args = cli(&[input.to_str().unwrap()]);
        let plan = validate(&args).unwrap();
        assert_eq!(plan.mode, PipelineMode::CompressToBitstream);
        assert_eq!(plan.output, tmp.path().join("sample.ecdc"));
    }
}
