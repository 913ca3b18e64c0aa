// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Fixture driver.
//!
//! Writes one container: three topics under the configured prefix, and for
//! every index `i` in `0..message_count` one `Log`, one `PosesInFrame` and one
//! `LaserScan`, all stamped `i * 1_000_000` ns.
//!
//! # Example
//!
//! ```rust,no_run
//! use robofixture::{run, Codec, FixtureConfig};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut config = FixtureConfig::new("ros2msg.mcap", Codec::Ros2);
//! config.message_count = 100;
//! let stats = run(&config)?;
//! assert_eq!(stats.total_messages, 300);
//! # Ok(())
//! # }
//! ```

use std::fs::{self, File};
use std::io::{BufWriter, Seek, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{info, warn};

use crate::core::value::{generate, timestamp_at};
use crate::core::{Codec, FixtureError, MessageKind, Result};
use crate::encoding::{adapter_for, CodecAdapter};
use crate::io::{CodecSession, FixtureConfig};

/// Summary of a completed run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunStats {
    /// Codec used
    pub codec: Codec,
    /// Output file
    pub output: PathBuf,
    /// Records written to each topic
    pub messages_per_topic: u64,
    /// Records written in total
    pub total_messages: u64,
    /// Size of the finished file in bytes
    pub bytes_written: u64,
}

/// Generate the fixture described by `config`.
pub fn run(config: &FixtureConfig) -> Result<RunStats> {
    run_with_progress(config, |_| {})
}

/// Generate the fixture described by `config`, calling `progress` with the
/// number of indices completed after each one.
///
/// The configuration is validated before the output file is touched. If the
/// run fails after the file was created, the partial file is removed.
pub fn run_with_progress<F>(config: &FixtureConfig, progress: F) -> Result<RunStats>
where
    F: FnMut(u64),
{
    let adapter = adapter_for(config.codec)?;
    run_with_adapter(config, adapter, progress)
}

/// Generate the fixture described by `config` through `adapter`.
///
/// `adapter` must report the configured codec. Failure handling is the same
/// as [`run_with_progress`].
pub fn run_with_adapter<F>(
    config: &FixtureConfig,
    adapter: Box<dyn CodecAdapter>,
    progress: F,
) -> Result<RunStats>
where
    F: FnMut(u64),
{
    config.validate()?;
    if adapter.codec() != config.codec {
        return Err(FixtureError::invalid_config(
            "codec",
            format!("adapter writes {}, configuration asks for {}", adapter.codec(), config.codec),
        ));
    }

    info!(
        codec = %config.codec,
        output = %config.output.display(),
        messages = config.message_count,
        topic_prefix = %config.topic_prefix,
        "Generating fixture"
    );

    let file = File::create(&config.output)?;
    let result = write_fixture(BufWriter::new(file), adapter, config, progress)
        .and_then(|total| stats(config, total));

    match result {
        Ok(stats) => {
            info!(
                messages = stats.total_messages,
                bytes = stats.bytes_written,
                "Fixture complete"
            );
            Ok(stats)
        }
        Err(e) => {
            let fields = e.log_fields();
            warn!(error = %e, ?fields, "Fixture run failed");
            remove_partial(&config.output);
            Err(e)
        }
    }
}

fn write_fixture<W, F>(
    writer: W,
    adapter: Box<dyn CodecAdapter>,
    config: &FixtureConfig,
    mut progress: F,
) -> Result<u64>
where
    W: Write + Seek,
    F: FnMut(u64),
{
    let mut session = CodecSession::open(writer, adapter, config.container_options())?;

    let channels = MessageKind::ALL
        .iter()
        .map(|&kind| session.declare_topic(&kind.topic(&config.topic_prefix), kind))
        .collect::<Result<Vec<_>>>()?;

    for i in 0..config.message_count {
        let t = timestamp_at(i).as_nanos();
        for channel in &channels {
            session.append(channel, &generate(channel.kind(), i), t, t)?;
        }
        progress(i + 1);
    }

    session.close()
}

fn stats(config: &FixtureConfig, total_messages: u64) -> Result<RunStats> {
    Ok(RunStats {
        codec: config.codec,
        output: config.output.clone(),
        messages_per_topic: config.message_count,
        total_messages,
        bytes_written: fs::metadata(&config.output)?.len(),
    })
}

fn remove_partial(path: &Path) {
    match fs::remove_file(path) {
        Ok(()) => info!(path = %path.display(), "Removed partial output"),
        Err(e) => warn!(
            path = %path.display(),
            error = %e,
            "Failed to remove partial output"
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::FixtureMessage;
    use crate::io::Compression;
    use crate::schema::SchemaEntry;

    /// Delegates to a real codec and fails to encode from index `fail_at` on.
    struct FailingAdapter {
        inner: Box<dyn CodecAdapter>,
        fail_at: u64,
    }

    impl CodecAdapter for FailingAdapter {
        fn codec(&self) -> Codec {
            self.inner.codec()
        }

        fn schema(&self, kind: MessageKind) -> SchemaEntry {
            self.inner.schema(kind)
        }

        fn encode(&self, message: &FixtureMessage) -> Result<Vec<u8>> {
            if message.timestamp() >= timestamp_at(self.fail_at) {
                return Err(FixtureError::encode("test", "value out of range"));
            }
            self.inner.encode(message)
        }

        fn decode(&self, kind: MessageKind, data: &[u8]) -> Result<FixtureMessage> {
            self.inner.decode(kind, data)
        }
    }

    fn failing(codec: Codec, fail_at: u64) -> Box<dyn CodecAdapter> {
        Box::new(FailingAdapter {
            inner: adapter_for(codec).unwrap(),
            fail_at,
        })
    }

    #[test]
    fn test_invalid_config_creates_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.mcap");
        let mut config = FixtureConfig::new(&output, Codec::Ros1);
        config.topic_prefix = "no_slash".to_string();

        let err = run(&config).unwrap_err();
        assert!(matches!(err, FixtureError::InvalidConfig { .. }));
        assert!(!output.exists());
    }

    #[test]
    fn test_failed_run_removes_partial_output() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("partial.mcap");
        let mut config = FixtureConfig::new(&output, Codec::Ros2);
        config.message_count = 10;

        let mut seen = Vec::new();
        let err = run_with_adapter(&config, failing(Codec::Ros2, 4), |done| seen.push(done))
            .unwrap_err();
        assert!(matches!(err, FixtureError::Encode { .. }));
        assert_eq!(seen, [1, 2, 3, 4]);
        assert!(!output.exists());
    }

    #[test]
    fn test_invalid_config_leaves_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("old.mcap");
        std::fs::write(&output, b"previous").unwrap();
        let mut config = FixtureConfig::new(&output, Codec::OmgIdl);
        config.message_count = 3;

        // validation happens before the existing file is truncated
        config.topic_prefix = "/bad/".to_string();
        assert!(run_with_adapter(&config, failing(Codec::OmgIdl, 0), |_| {}).is_err());
        assert_eq!(std::fs::read(&output).unwrap(), b"previous");
    }

    #[test]
    fn test_adapter_codec_must_match() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.mcap");
        let config = FixtureConfig::new(&output, Codec::Protobuf);
        let err = run_with_adapter(&config, adapter_for(Codec::Ros1).unwrap(), |_| {}).unwrap_err();
        assert!(err.is_config());
        assert!(!output.exists());
    }

    #[test]
    fn test_write_fixture_surfaces_writer_errors() {
        /// Accepts `budget` bytes, then fails every write.
        struct FullDisk {
            inner: std::io::Cursor<Vec<u8>>,
            budget: usize,
        }

        impl Write for FullDisk {
            fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
                if self.inner.get_ref().len() + buf.len() > self.budget {
                    return Err(std::io::Error::new(std::io::ErrorKind::Other, "disk full"));
                }
                self.inner.write(buf)
            }

            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        impl Seek for FullDisk {
            fn seek(&mut self, pos: std::io::SeekFrom) -> std::io::Result<u64> {
                self.inner.seek(pos)
            }
        }

        let mut config = FixtureConfig::new("unused.mcap", Codec::Ros1);
        config.message_count = 20;
        config.chunk_size = 1024;
        config.compression = Compression::None;
        let writer = FullDisk {
            inner: std::io::Cursor::new(Vec::new()),
            budget: 4096,
        };

        let err = write_fixture(writer, adapter_for(Codec::Ros1).unwrap(), &config, |_| {})
            .unwrap_err();
        assert!(matches!(err, FixtureError::Container(_) | FixtureError::Io(_)));
    }

    #[test]
    fn test_progress_reports_every_index() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = FixtureConfig::new(dir.path().join("out.mcap"), Codec::OmgIdl);
        config.message_count = 4;

        let mut seen = Vec::new();
        let stats = run_with_progress(&config, |done| seen.push(done)).unwrap();
        assert_eq!(seen, [1, 2, 3, 4]);
        assert_eq!(stats.messages_per_topic, 4);
        assert_eq!(stats.total_messages, 12);
        assert!(stats.bytes_written > 0);
    }

    #[test]
    fn test_zero_messages_still_declares_topics() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = FixtureConfig::new(dir.path().join("empty.mcap"), Codec::Protobuf);
        config.message_count = 0;

        let stats = run(&config).unwrap();
        assert_eq!(stats.total_messages, 0);

        let bytes = std::fs::read(&config.output).unwrap();
        let topics: Vec<String> = mcap::read::ChunkFlattener::new(&bytes)
            .unwrap()
            .filter_map(|record| match record.unwrap() {
                mcap::records::Record::Channel(channel) => Some(channel.topic),
                _ => None,
            })
            .collect();
        assert_eq!(topics, ["/protobuf/log", "/protobuf/poses_in_frame", "/protobuf/scan"]);

        let summary = mcap::Summary::read(&bytes).unwrap().unwrap();
        assert_eq!(summary.stats.unwrap().channel_count, 3);
    }
}
