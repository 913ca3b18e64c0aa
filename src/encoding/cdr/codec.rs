// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! CDR codec adapters.

use super::messages;
use crate::core::{Codec, FixtureMessage, MessageKind, Result};
use crate::encoding::CodecAdapter;

/// OMG IDL schemas with CDR payloads.
#[derive(Debug, Clone, Copy, Default)]
pub struct OmgIdlCdrCodec;

impl OmgIdlCdrCodec {
    /// Create a new OMG IDL codec.
    pub fn new() -> Self {
        Self
    }
}

impl CodecAdapter for OmgIdlCdrCodec {
    fn codec(&self) -> Codec {
        Codec::OmgIdl
    }

    fn encode(&self, message: &FixtureMessage) -> Result<Vec<u8>> {
        messages::encode(message)
    }

    fn decode(&self, kind: MessageKind, data: &[u8]) -> Result<FixtureMessage> {
        messages::decode(kind, data)
    }
}

/// ROS 2 message definitions with CDR payloads.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ros2LegacyCodec;

impl Ros2LegacyCodec {
    /// Create a new ROS 2 codec.
    pub fn new() -> Self {
        Self
    }
}

impl CodecAdapter for Ros2LegacyCodec {
    fn codec(&self) -> Codec {
        Codec::Ros2
    }

    fn encode(&self, message: &FixtureMessage) -> Result<Vec<u8>> {
        messages::encode(message)
    }

    fn decode(&self, kind: MessageKind, data: &[u8]) -> Result<FixtureMessage> {
        messages::decode(kind, data)
    }
}
