// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Run configuration and its builder.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::core::value::MAX_MESSAGE_COUNT;
use crate::core::{Codec, FixtureError, Result};

/// Default number of messages written to each topic.
pub const DEFAULT_MESSAGE_COUNT: u64 = 10_000;

/// Default chunk size in bytes (1 MiB).
pub const DEFAULT_CHUNK_SIZE: u64 = 1024 * 1024;

/// Chunk compression of the output container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Compression {
    #[default]
    Zstd,
    Lz4,
    None,
}

impl Compression {
    /// The `mcap` crate's compression setting.
    pub fn to_mcap(self) -> Option<mcap::Compression> {
        match self {
            Compression::Zstd => Some(mcap::Compression::Zstd),
            Compression::Lz4 => Some(mcap::Compression::Lz4),
            Compression::None => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Compression::Zstd => "zstd",
            Compression::Lz4 => "lz4",
            Compression::None => "none",
        }
    }
}

/// Error returned when parsing a `Compression` from string fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseCompressionError {
    _private: (),
}

impl std::fmt::Display for ParseCompressionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid compression, expected 'zstd', 'lz4', or 'none'")
    }
}

impl std::error::Error for ParseCompressionError {}

impl std::str::FromStr for Compression {
    type Err = ParseCompressionError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "zstd" => Ok(Compression::Zstd),
            "lz4" => Ok(Compression::Lz4),
            "none" => Ok(Compression::None),
            _ => Err(ParseCompressionError { _private: () }),
        }
    }
}

impl std::fmt::Display for Compression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Container options that do not affect the logical content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContainerOptions {
    /// Chunk compression
    pub compression: Compression,
    /// Chunk size in bytes
    pub chunk_size: u64,
}

impl Default for ContainerOptions {
    fn default() -> Self {
        Self {
            compression: Compression::default(),
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

/// Configuration for one fixture run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixtureConfig {
    /// Path to the output file
    pub output: PathBuf,
    /// Messages written to each topic
    pub message_count: u64,
    /// Prefix of the three topic names
    pub topic_prefix: String,
    /// Codec to write with
    pub codec: Codec,
    /// Chunk compression
    pub compression: Compression,
    /// Chunk size in bytes
    pub chunk_size: u64,
}

impl FixtureConfig {
    /// Configuration with defaults for `codec`.
    pub fn new(output: impl Into<PathBuf>, codec: Codec) -> Self {
        Self {
            output: output.into(),
            message_count: DEFAULT_MESSAGE_COUNT,
            topic_prefix: codec.default_topic_prefix().to_string(),
            codec,
            compression: Compression::default(),
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }

    /// Container options of this run.
    pub fn container_options(&self) -> ContainerOptions {
        ContainerOptions {
            compression: self.compression,
            chunk_size: self.chunk_size,
        }
    }

    /// Check the configuration before any file is opened.
    pub fn validate(&self) -> Result<()> {
        validate_topic_prefix(&self.topic_prefix)?;

        if self.message_count > MAX_MESSAGE_COUNT {
            return Err(FixtureError::invalid_config(
                "message_count",
                format!("must not exceed {MAX_MESSAGE_COUNT}"),
            ));
        }

        if self.chunk_size == 0 {
            return Err(FixtureError::invalid_config("chunk_size", "must be positive"));
        }

        validate_output(&self.output)
    }
}

fn validate_topic_prefix(prefix: &str) -> Result<()> {
    if prefix.is_empty() {
        return Ok(());
    }
    if !prefix.starts_with('/') {
        return Err(FixtureError::invalid_config(
            "topic_prefix",
            format!("'{prefix}' must start with '/'"),
        ));
    }
    if prefix.ends_with('/') {
        return Err(FixtureError::invalid_config(
            "topic_prefix",
            format!("'{prefix}' must not end with '/'"),
        ));
    }
    Ok(())
}

fn validate_output(output: &Path) -> Result<()> {
    if output.as_os_str().is_empty() {
        return Err(FixtureError::invalid_config("output", "path is not set"));
    }
    if output.is_dir() {
        return Err(FixtureError::invalid_config(
            "output",
            format!("{} is a directory", output.display()),
        ));
    }
    let parent = match output.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => return Ok(()),
    };
    if !parent.is_dir() {
        return Err(FixtureError::invalid_config(
            "output",
            format!("directory {} does not exist", parent.display()),
        ));
    }
    Ok(())
}

/// Builder for [`FixtureConfig`].
#[derive(Debug, Clone)]
pub struct FixtureBuilder {
    config: FixtureConfig,
}

impl FixtureBuilder {
    /// Create a new builder with default configuration for `codec`.
    pub fn new(codec: Codec) -> Self {
        Self {
            config: FixtureConfig::new(PathBuf::new(), codec),
        }
    }

    /// Set the path to the output file.
    pub fn output<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config.output = path.as_ref().to_path_buf();
        self
    }

    /// Set the number of messages per topic.
    pub fn message_count(mut self, count: u64) -> Self {
        self.config.message_count = count;
        self
    }

    /// Set the topic prefix.
    pub fn topic_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config.topic_prefix = prefix.into();
        self
    }

    /// Set the chunk compression.
    pub fn compression(mut self, compression: Compression) -> Self {
        self.config.compression = compression;
        self
    }

    /// Set the chunk size in bytes.
    pub fn chunk_size(mut self, size: u64) -> Self {
        self.config.chunk_size = size;
        self
    }

    /// Validate and return the configuration.
    pub fn build(self) -> Result<FixtureConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = FixtureConfig::new("out.mcap", Codec::Ros1);
        assert_eq!(config.message_count, 10_000);
        assert_eq!(config.topic_prefix, "/ros1msg");
        assert_eq!(config.compression, Compression::Zstd);
        assert_eq!(config.chunk_size, 1024 * 1024);
    }

    #[test]
    fn test_builder_fluent() {
        let config = FixtureBuilder::new(Codec::Protobuf)
            .output("out.mcap")
            .message_count(3)
            .topic_prefix("/t")
            .compression(Compression::Lz4)
            .chunk_size(4096)
            .build()
            .unwrap();

        assert_eq!(config.output, PathBuf::from("out.mcap"));
        assert_eq!(config.message_count, 3);
        assert_eq!(config.topic_prefix, "/t");
        assert_eq!(
            config.container_options(),
            ContainerOptions {
                compression: Compression::Lz4,
                chunk_size: 4096
            }
        );
    }

    #[test]
    fn test_builder_requires_output() {
        let err = FixtureBuilder::new(Codec::OmgIdl).build().unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn test_topic_prefix_rules() {
        assert!(validate_topic_prefix("").is_ok());
        assert!(validate_topic_prefix("/a/b").is_ok());
        assert!(validate_topic_prefix("a").is_err());
        assert!(validate_topic_prefix("/a/").is_err());
        assert!(validate_topic_prefix("/").is_err());
    }

    #[test]
    fn test_zero_chunk_size_rejected() {
        let mut config = FixtureConfig::new("out.mcap", Codec::Ros2);
        config.chunk_size = 0;
        assert!(matches!(
            config.validate(),
            Err(FixtureError::InvalidConfig { ref field, .. }) if field == "chunk_size"
        ));
    }

    #[test]
    fn test_missing_parent_directory() {
        let config = FixtureConfig::new("/definitely/not/here/out.mcap", Codec::Ros2);
        assert!(config.validate().unwrap_err().is_config());
    }

    #[test]
    fn test_message_count_limit() {
        let mut config = FixtureConfig::new("out.mcap", Codec::OmgIdl);
        config.message_count = MAX_MESSAGE_COUNT;
        assert!(config.validate().is_ok());
        config.message_count = MAX_MESSAGE_COUNT + 1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_compression_from_str() {
        assert_eq!("ZSTD".parse::<Compression>().unwrap(), Compression::Zstd);
        assert_eq!("none".parse::<Compression>().unwrap(), Compression::None);
        assert!("gzip".parse::<Compression>().is_err());
        assert_eq!(Compression::Lz4.to_string(), "lz4");
    }
}
