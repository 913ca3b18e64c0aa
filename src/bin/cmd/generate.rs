// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Generate commands - write fixture containers.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::Args;

use crate::common::{print_stats, GlobalOpts, ProgressBar, Result};
use robofixture::io::writer::builder::{DEFAULT_CHUNK_SIZE, DEFAULT_MESSAGE_COUNT};
use robofixture::{run_with_progress, Codec, Compression, FixtureConfig, RunStats};

/// Options shared by every generate command.
#[derive(Args, Clone, Debug)]
pub struct WriterArgs {
    /// Number of messages per topic
    #[arg(long, value_name = "N", default_value_t = DEFAULT_MESSAGE_COUNT)]
    num_msgs: u64,

    /// Chunk compression (zstd, lz4, none)
    #[arg(long, default_value_t = Compression::Zstd)]
    compression: Compression,

    /// Chunk size in bytes
    #[arg(long, value_name = "BYTES", default_value_t = DEFAULT_CHUNK_SIZE)]
    chunk_size: u64,
}

/// Write one fixture file with a single codec.
#[derive(Args, Clone, Debug)]
pub struct GenerateCmd {
    /// Output file
    #[arg(value_name = "OUTFILE")]
    outfile: PathBuf,

    /// Topic prefix (default: /<codec>)
    #[arg(long, value_name = "PREFIX")]
    topic_prefix: Option<String>,

    #[command(flatten)]
    writer: WriterArgs,
}

impl GenerateCmd {
    pub fn run(self, codec: Codec, opts: GlobalOpts) -> Result<()> {
        let mut config = self.writer.config(self.outfile, codec);
        if let Some(prefix) = self.topic_prefix {
            config.topic_prefix = prefix;
        }
        let stats = generate(&config, opts)?;
        print_stats(&stats, opts.json)
    }
}

/// Write one fixture file per codec into a directory.
#[derive(Args, Clone, Debug)]
pub struct AllCmd {
    /// Output directory (must exist)
    #[arg(value_name = "OUTDIR")]
    outdir: PathBuf,

    #[command(flatten)]
    writer: WriterArgs,
}

impl AllCmd {
    pub fn run(self, opts: GlobalOpts) -> Result<()> {
        if !self.outdir.is_dir() {
            anyhow::bail!("output directory {} does not exist", self.outdir.display());
        }
        for codec in Codec::ALL {
            let config = self.writer.config(output_path(&self.outdir, codec), codec);
            let stats = generate(&config, opts)?;
            print_stats(&stats, opts.json)?;
        }
        Ok(())
    }
}

impl WriterArgs {
    fn config(&self, output: PathBuf, codec: Codec) -> FixtureConfig {
        let mut config = FixtureConfig::new(output, codec);
        config.message_count = self.num_msgs;
        config.compression = self.compression;
        config.chunk_size = self.chunk_size;
        config
    }
}

/// `<dir>/<codec>.mcap`
fn output_path(dir: &Path, codec: Codec) -> PathBuf {
    dir.join(format!("{}.mcap", codec.as_str()))
}

fn generate(config: &FixtureConfig, opts: GlobalOpts) -> Result<RunStats> {
    let progress = ProgressBar::new(config.message_count, config.codec.as_str(), opts.quiet)?;
    let result = run_with_progress(config, |done| progress.set_position(done));
    match &result {
        Ok(_) => progress.finish_with_message("done"),
        Err(_) => progress.abandon(),
    }
    result.with_context(|| format!("failed to write {}", config.output.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_path() {
        assert_eq!(
            output_path(Path::new("/tmp/out"), Codec::Ros2),
            PathBuf::from("/tmp/out/ros2msg.mcap")
        );
    }

    #[test]
    fn test_writer_args_config() {
        let args = WriterArgs {
            num_msgs: 7,
            compression: Compression::None,
            chunk_size: 512,
        };
        let config = args.config(PathBuf::from("x.mcap"), Codec::Protobuf);
        assert_eq!(config.message_count, 7);
        assert_eq!(config.topic_prefix, "/protobuf");
        assert_eq!(config.compression, Compression::None);
        assert_eq!(config.chunk_size, 512);
    }
}
