// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! # Robofixture
//!
//! Deterministic MCAP fixtures for robotics data readers.
//!
//! One logical sequence of messages (log lines, pose batches, laser scans) is
//! written through four codecs, producing containers that hold the same
//! values with different wire formats:
//! - **OMG IDL** schemas with CDR payloads
//! - **Protobuf** descriptor sets with protobuf payloads
//! - **ROS 1** message definitions with ROS 1 payloads
//! - **ROS 2** message definitions with CDR payloads
//!
//! ## Architecture
//!
//! - `core/` - Value model, codec identifiers, errors
//! - `schema/` - Schema catalog per (codec, message kind)
//! - `encoding/` - Codec adapters (CDR, Protobuf, ROS 1)
//! - `io/` - Run configuration and the MCAP codec session
//! - `driver` - The run loop
//!
//! ## Example
//!
//! ```rust,no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use robofixture::{FixtureBuilder, Codec};
//!
//! let config = FixtureBuilder::new(Codec::Protobuf)
//!     .output("protobuf.mcap")
//!     .message_count(1_000)
//!     .build()?;
//! let stats = robofixture::run(&config)?;
//! println!("{} messages, {} bytes", stats.total_messages, stats.bytes_written);
//! # Ok(())
//! # }
//! ```

// Core types
pub mod core;

// Re-export core types for convenience
pub use core::{Codec, FixtureError, FixtureMessage, MessageKind, Result};

// Schema catalog
pub mod schema;

// Encoding/decoding
pub mod encoding;

pub use encoding::{adapter_for, CodecAdapter};

// Container session and configuration
pub mod io;

pub use io::{ChannelHandle, CodecSession, Compression, FixtureBuilder, FixtureConfig};

// Run loop
pub mod driver;

pub use driver::{run, run_with_adapter, run_with_progress, RunStats};
