// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! ROS 1 serialization.
//!
//! ROS 1 messages are packed little-endian with no alignment. Strings and
//! variable-length arrays carry a `uint32` length prefix, strings without a
//! terminator. `time` is `uint32 secs` + `uint32 nsecs`.

pub mod codec;

pub use codec::Ros1LegacyCodec;
