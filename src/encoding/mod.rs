// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Message encoding implementations.
//!
//! This module provides one adapter per codec:
//! - [`cdr`] - CDR payloads for OMG IDL and ROS 2 schemas
//! - [`protobuf`] - Protobuf payloads
//! - [`ros1`] - ROS 1 payloads
//! - [`codec`] - The shared adapter interface and factory

pub mod cdr;
pub mod codec;
pub mod protobuf;
pub mod ros1;

pub use cdr::{CdrCursor, CdrEncoder};
pub use codec::{
    adapter_for, ChannelSpec, CodecAdapter, OmgIdlCdrCodec, ProtobufCodec, Ros1LegacyCodec,
    Ros2LegacyCodec,
};
