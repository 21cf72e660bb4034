//! CLI argument surface.
//!
//! The parsed [`Cli`] value is the whole configuration of a run: it is built
//! once at the boundary and passed by reference to the components that need
//! it.

use std::path::PathBuf;

use clap::Parser;
use ecdc_codec::Bandwidth;

/// Command-line arguments for the `ecdc` binary.
#[derive(Parser, Debug)]
#[command(
    name = "ecdc",
    version,
    about = "High fidelity neural audio codec. \
             If the input is a .ecdc file it is decompressed; any other input \
             is compressed. A .wav output runs a full compression/decompression \
             cycle."
)]
pub struct Cli {
    /// Input file: any audio container the decoder supports, or a .ecdc payload.
    pub input: PathBuf,

    /// Output file, inferred from the input when omitted.
    pub output: Option<PathBuf>,

    /// Target bandwidth in kbit/s (1.5, 3, 6, 12 or 24). 1.5 is not supported with --hq.
    #[arg(short, long, default_value = "6")]
    pub bandwidth: Bandwidth,

    /// Use the high-quality stereo model operating on 48 kHz audio.
    #[arg(short = 'q', long)]
    pub hq: bool,

    /// Use a language model over the codes to shrink the payload (roughly 5x slower).
    #[arg(short, long)]
    pub lm: bool,

    /// Overwrite the output file if it exists.
    #[arg(short, long)]
    pub force: bool,

    /// Suffix for the decompressed output file when no output path is given.
    #[arg(short = 's', long, default_value = "_decompressed")]
    pub decompress_suffix: String,

    /// Automatically rescale the output to avoid clipping.
    #[arg(short, long)]
    pub rescale: bool,

    /// Use accelerated compute if available.
    #[arg(short = 'g', long)]
    pub accel: bool,

    /// Print elapsed time information.
    #[arg(short, long)]
    pub time: bool,

    /// Enable verbose (debug-level) logging.
    #[arg(short, long)]
    pub verbose: bool,
}
