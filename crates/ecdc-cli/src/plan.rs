//! Mode selection — classifies an invocation into one of the four pipelines
//! and derives the effective output path.
//!
//! Pure functions of their inputs; nothing here touches the filesystem.

use std::path::{Path, PathBuf};

use ecdc_codec::{ModelKind, BITSTREAM_EXTENSION, EMBEDDING_EXTENSION};

use crate::validate::ValidationError;

/// Extension of playable audio output (without the leading dot).
pub const AUDIO_EXTENSION: &str = "wav";

/// The four pipelines the driver can run. Classification is closed: every
/// invocation that survives validation maps to exactly one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineMode {
    /// `.ecdc` input → decoded waveform written as `.wav`.
    Decompress,
    /// Audio input → compressed payload written as `.ecdc`.
    CompressToBitstream,
    /// Audio input → encoder's intermediate representation written as `.pt`.
    CompressToEmbedding,
    /// Audio input → encode, decode in memory, write `.wav`. Previews the
    /// lossy degradation without an intermediate file.
    CompressRoundTrip,
}

/// The resolved shape of one run: which pipeline, which files, which model.
#[derive(Debug, Clone)]
pub struct ResolvedPlan {
    pub mode: PipelineMode,
    pub input: PathBuf,
    pub output: PathBuf,
    pub model: ModelKind,
}

/// Lowercased extension of a path, if it has one.
fn extension_lower(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
}

/// Whether a path carries the bitstream extension (case-insensitive).
pub fn is_bitstream(path: &Path) -> bool {
    extension_lower(path).as_deref() == Some(BITSTREAM_EXTENSION)
}

/// Classify an invocation and derive its effective output path.
///
/// A bitstream input selects decompression; anything else is the
/// compression family, where the output extension picks the exact pipeline.
/// Extension checks are case-insensitive.
pub fn resolve(
    input: &Path,
    output: Option<&Path>,
    hq: bool,
    decompress_suffix: &str,
) -> Result<ResolvedPlan, ValidationError> {
    let model = ModelKind::from_hq(hq);

    if is_bitstream(input) {
        let output = match output {
            Some(p) => {
                if extension_lower(p).as_deref() != Some(AUDIO_EXTENSION) {
                    return Err(ValidationError::DecompressOutputExtension);
                }
                p.to_path_buf()
            }
            None => default_decompress_output(input, decompress_suffix),
        };
        return Ok(ResolvedPlan {
            mode: PipelineMode::Decompress,
            input: input.to_path_buf(),
            output,
            model,
        });
    }

    let output = match output {
        Some(p) => p.to_path_buf(),
        None => input.with_extension(BITSTREAM_EXTENSION),
    };
    let mode = match extension_lower(&output).as_deref() {
        Some(BITSTREAM_EXTENSION) => PipelineMode::CompressToBitstream,
        Some(EMBEDDING_EXTENSION) => PipelineMode::CompressToEmbedding,
        Some(AUDIO_EXTENSION) => PipelineMode::CompressRoundTrip,
        _ => return Err(ValidationError::CompressOutputExtension),
    };

    Ok(ResolvedPlan {
        mode,
        input: input.to_path_buf(),
        output,
        model,
    })
}

/// Default decompression output: the input stem with the decompress suffix
/// and a `.wav` extension. The suffix ends up in the name exactly once, even
/// when the stem already carries it, and a suffix containing dots survives
/// intact.
fn default_decompress_output(input: &Path, suffix: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    let name = if !suffix.is_empty() && stem.ends_with(suffix) {
        format!("{stem}.{AUDIO_EXTENSION}")
    } else {
        format!("{stem}{suffix}.{AUDIO_EXTENSION}")
    };
    input.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SUFFIX: &str = "_decompressed";

    #[test]
    fn test_bitstream_input_selects_decompress() {
        let plan = resolve(Path::new("sample.ecdc"), None, false, SUFFIX).unwrap();
        assert_eq!(plan.mode, PipelineMode::Decompress);
        assert_eq!(plan.output, PathBuf::from("sample_decompressed.wav"));
    }

    #[test]
    fn test_bitstream_extension_is_case_insensitive() {
        for name in ["sample.ECDC", "sample.Ecdc", "sample.eCdC"] {
            let plan = resolve(Path::new(name), None, false, SUFFIX).unwrap();
            assert_eq!(plan.mode, PipelineMode::Decompress, "input {name}");
        }
    }

    #[test]
    fn test_decompress_explicit_output_must_be_wav() {
        let plan = resolve(
            Path::new("sample.ecdc"),
            Some(Path::new("out.WAV")),
            false,
            SUFFIX,
        )
        .unwrap();
        assert_eq!(plan.mode, PipelineMode::Decompress);

        let err = resolve(
            Path::new("sample.ecdc"),
            Some(Path::new("out.mp3")),
            false,
            SUFFIX,
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "Output extension must be .wav");
    }

    #[test]
    fn test_default_compression_output_is_bitstream() {
        let plan = resolve(Path::new("music/sample.wav"), None, false, SUFFIX).unwrap();
        assert_eq!(plan.mode, PipelineMode::CompressToBitstream);
        assert_eq!(plan.output, PathBuf::from("music/sample.ecdc"));
    }

    #[test]
    fn test_output_extension_picks_compression_pipeline() {
        let cases = [
            ("out.ecdc", PipelineMode::CompressToBitstream),
            ("out.ECDC", PipelineMode::CompressToBitstream),
            ("out.pt", PipelineMode::CompressToEmbedding),
            ("out.wav", PipelineMode::CompressRoundTrip),
        ];
        for (output, expected) in cases {
            let plan =
                resolve(Path::new("sample.flac"), Some(Path::new(output)), false, SUFFIX).unwrap();
            assert_eq!(plan.mode, expected, "output {output}");
        }
    }

    #[test]
    fn test_unknown_compression_output_rejected() {
        let err = resolve(
            Path::new("sample.wav"),
            Some(Path::new("out.mp3")),
            false,
            SUFFIX,
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "Output extension must be .wav, .pt or .ecdc");
    }

    #[test]
    fn test_hq_selects_stereo_model() {
        let plan = resolve(Path::new("sample.wav"), None, true, SUFFIX).unwrap();
        assert_eq!(plan.model, ModelKind::Khz48);
        let plan = resolve(Path::new("sample.wav"), None, false, SUFFIX).unwrap();
        assert_eq!(plan.model, ModelKind::Khz24);
    }

    #[test]
    fn test_suffix_not_duplicated_when_stem_already_ends_with_it() {
        let plan = resolve(Path::new("take_decompressed.ecdc"), None, false, SUFFIX).unwrap();
        assert_eq!(plan.output, PathBuf::from("take_decompressed.wav"));
    }

    #[test]
    fn test_dotted_suffix_survives_defaulting() {
        let plan = resolve(Path::new("take.ecdc"), None, false, ".v2").unwrap();
        assert_eq!(plan.output, PathBuf::from("take.v2.wav"));
    }

    #[test]
    fn test_empty_suffix_defaults_cleanly() {
        let plan = resolve(Path::new("take.ecdc"), None, false, "").unwrap();
        assert_eq!(plan.output, PathBuf::from("take.wav"));
    }

    #[test]
    fn test_extensionless_input_compresses() {
        let plan = resolve(Path::new("recording"), None, false, SUFFIX).unwrap();
        assert_eq!(plan.mode, PipelineMode::CompressToBitstream);
        assert_eq!(plan.output, PathBuf::from("recording.ecdc"));
    }
}
