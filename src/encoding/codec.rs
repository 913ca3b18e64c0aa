// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Codec adapter interface.
//!
//! A [`CodecAdapter`] knows three things about its codec: which schema
//! record describes each message kind, how a channel of that kind is
//! declared, and how a value from the value model is turned into payload
//! bytes. The container session drives adapters only through this trait.
//!
//! ## Example
//!
//! ```
//! use robofixture::encoding::adapter_for;
//! use robofixture::core::value::generate;
//! use robofixture::{Codec, MessageKind};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let adapter = adapter_for(Codec::Ros2)?;
//! let payload = adapter.encode(&generate(MessageKind::Log, 0))?;
//! assert_eq!(adapter.decode(MessageKind::Log, &payload)?, generate(MessageKind::Log, 0));
//! # Ok(())
//! # }
//! ```

use std::collections::BTreeMap;

use crate::core::{Codec, FixtureMessage, MessageKind, Result};
use crate::schema::{self, SchemaEntry};

pub use super::cdr::{OmgIdlCdrCodec, Ros2LegacyCodec};
pub use super::protobuf::ProtobufCodec;
pub use super::ros1::Ros1LegacyCodec;

// =============================================================================
// Channel description
// =============================================================================

/// Channel record contents for one topic, minus the topic and schema id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelSpec {
    /// Message encoding (e.g., "cdr", "ros1")
    pub message_encoding: &'static str,
    /// Channel metadata
    pub metadata: BTreeMap<String, String>,
}

// =============================================================================
// Codec Adapter Trait
// =============================================================================

/// Codec-specific half of writing a fixture.
///
/// Implementations are stateless after construction; the same adapter
/// encodes every message of a run.
pub trait CodecAdapter: Send + Sync {
    /// The codec this adapter implements.
    fn codec(&self) -> Codec;

    /// Schema record to register for `kind`.
    fn schema(&self, kind: MessageKind) -> SchemaEntry {
        schema::schema_for(self.codec(), kind)
    }

    /// Channel record to register for a topic of `kind`.
    fn channel(&self, _kind: MessageKind) -> ChannelSpec {
        ChannelSpec {
            message_encoding: self.codec().message_encoding(),
            metadata: BTreeMap::new(),
        }
    }

    /// Encode one value into the codec's wire representation.
    fn encode(&self, message: &FixtureMessage) -> Result<Vec<u8>>;

    /// Decode a payload of `kind` back into a value.
    fn decode(&self, kind: MessageKind, data: &[u8]) -> Result<FixtureMessage>;
}

// =============================================================================
// Factory
// =============================================================================

/// Create the adapter for `codec`.
///
/// Fails only if the codec's schema catalog cannot be loaded, which is a
/// build defect rather than a runtime condition.
pub fn adapter_for(codec: Codec) -> Result<Box<dyn CodecAdapter>> {
    Ok(match codec {
        Codec::OmgIdl => Box::new(OmgIdlCdrCodec::new()),
        Codec::Protobuf => Box::new(ProtobufCodec::new()?),
        Codec::Ros1 => Box::new(Ros1LegacyCodec::new()),
        Codec::Ros2 => Box::new(Ros2LegacyCodec::new()),
    })
}

// =============================================================================
// Tests
// =============================================================================
