//! `flv-inspect` prints the tags of an FLV file or stream, one line per tag.
#![cfg_attr(all(coverage_nightly, test), feature(coverage_attribute))]

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

mod report;

#[derive(Debug, clap::Parser)]
#[command(name = "flv-inspect", about = "Print the tags of an FLV file or stream")]
struct Cli {
    /// The file to read, stdin when missing or `-`
    #[arg(env = "FLV_INSPECT_INPUT")]
    input: Option<PathBuf>,
    /// Stop at the first tag that fails to decode
    #[arg(long, env = "FLV_INSPECT_STOP_ON_ERROR")]
    stop_on_error: bool,
    /// Print script data as JSON
    #[arg(long, env = "FLV_INSPECT_JSON")]
    json: bool,
    /// Number of payload bytes to print for audio and video tags
    #[arg(long, default_value_t = 0, env = "FLV_INSPECT_HEXDUMP_BYTES")]
    hexdump_bytes: usize,
}

impl Cli {
    fn run(self) -> anyhow::Result<()> {
        let options = report::Options {
            stop_on_error: self.stop_on_error,
            json: self.json,
            hexdump_bytes: self.hexdump_bytes,
        };

        let mut out = BufWriter::new(io::stdout().lock());

        let summary = match self.input.as_deref() {
            Some(path) if path != Path::new("-") => {
                let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
                report::inspect(BufReader::new(file), &mut out, &options)
            }
            _ => report::inspect(io::stdin().lock(), &mut out, &options),
        };

        out.flush().context("failed to write output")?;
        let summary = summary?;

        tracing::info!(
            audio = summary.audio,
            video = summary.video,
            script_data = summary.script_data,
            errors = summary.errors,
            "done"
        );

        Ok(())
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = Cli::parse().run() {
        Cli::command()
            .error(ErrorKind::Io, format!("{err:#}\n\n{err:?}"))
            .exit()
    }
}
