// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! I/O layer for fixture containers.
//!
//! This module provides the run configuration and the codec session that
//! writes MCAP containers.

pub mod writer;

pub use writer::{
    ChannelHandle, CodecSession, Compression, ContainerOptions, FixtureBuilder, FixtureConfig,
};
