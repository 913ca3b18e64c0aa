// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Protobuf codec.
//!
//! Payloads are written field by field with `prost::encoding` and read back
//! through `prost-reflect` against the catalog's descriptor sets.

pub mod codec;
pub mod encode;

pub use codec::ProtobufCodec;
