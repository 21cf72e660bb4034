//! `ecdc` — command-line driver for the ecdc audio codec.
//!
//! The input extension picks the direction: a `.ecdc` payload is
//! decompressed to `.wav`; any other input is compressed to a payload, an
//! embedding, or — with a `.wav` output — run through a full
//! compress/decompress cycle to preview the lossy degradation.

mod args;
mod pipeline;
mod plan;
mod validate;

use std::process;
use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use ecdc_codec::ComputeDevice;

use crate::args::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let start = Instant::now();

    // Logging goes to stderr so piped payload/stdout stays clean.
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    // Validation failures are the user's problem: one line, non-zero exit.
    // Everything past this point is an environment or codec fault and
    // propagates with its context chain.
    let plan = match validate::validate(&cli) {
        Ok(plan) => plan,
        Err(err) => {
            eprintln!("{err}");
            process::exit(1);
        }
    };

    let device = ComputeDevice::request(cli.accel);
    pipeline::run(&cli, &plan, device)?;

    if cli.time {
        println!(
            "Time elapsed: {:.3} seconds for b={}, hq={}, lm={}, device={}",
            start.elapsed().as_secs_f64(),
            cli.bandwidth,
            cli.hq,
            cli.lm,
            device
        );
    }

    Ok(())
}
