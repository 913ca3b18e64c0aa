// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Codec session over an MCAP writer.
//!
//! A [`CodecSession`] binds one [`CodecAdapter`] to one `mcap::Writer`. It
//! registers each schema once per message kind, declares topics, appends
//! encoded records, and finalizes the container on [`CodecSession::close`].
//! A session that is dropped without `close` leaves an unfinished container
//! behind; such files are not valid fixtures.

pub mod builder;

pub use builder::{Compression, ContainerOptions, FixtureBuilder, FixtureConfig};

use std::collections::HashMap;
use std::io::{Seek, Write};

use tracing::debug;

use crate::core::{FixtureError, FixtureMessage, MessageKind, Result};
use crate::encoding::CodecAdapter;

/// A declared topic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelHandle {
    id: u16,
    kind: MessageKind,
    topic: String,
}

impl ChannelHandle {
    /// Channel id in the container.
    pub fn id(&self) -> u16 {
        self.id
    }

    /// Message kind bound to this channel.
    pub fn kind(&self) -> MessageKind {
        self.kind
    }

    /// Topic name.
    pub fn topic(&self) -> &str {
        &self.topic
    }
}

/// Writing session for one container file.
pub struct CodecSession<W: Write + Seek> {
    /// The container writer
    writer: mcap::Writer<W>,
    /// The codec in use
    adapter: Box<dyn CodecAdapter>,
    /// Schema ids indexed by kind
    schemas: HashMap<MessageKind, u16>,
    /// Declared channels indexed by topic
    channels: HashMap<String, ChannelHandle>,
    /// Next sequence number per channel id
    sequences: HashMap<u16, u32>,
    /// Records appended so far
    message_count: u64,
}

impl<W: Write + Seek> CodecSession<W> {
    /// Start a container on `writer` and bind `adapter` to it.
    ///
    /// Writes the file header with the codec's profile.
    pub fn open(
        writer: W,
        adapter: Box<dyn CodecAdapter>,
        options: ContainerOptions,
    ) -> Result<Self> {
        let codec = adapter.codec();
        let writer = mcap::WriteOptions::new()
            .profile(codec.profile())
            .compression(options.compression.to_mcap())
            .chunk_size(Some(options.chunk_size))
            // The summary copies come from hash maps with per-process ordering.
            .repeat_schemas(false)
            .repeat_channels(false)
            .create(writer)?;

        debug!(
            codec = %codec,
            profile = codec.profile(),
            compression = %options.compression,
            chunk_size = options.chunk_size,
            "Opened container"
        );

        Ok(Self {
            writer,
            adapter,
            schemas: HashMap::new(),
            channels: HashMap::new(),
            sequences: HashMap::new(),
            message_count: 0,
        })
    }

    /// The adapter bound to this session.
    pub fn adapter(&self) -> &dyn CodecAdapter {
        self.adapter.as_ref()
    }

    /// Number of records appended so far.
    pub fn message_count(&self) -> u64 {
        self.message_count
    }

    fn schema_id(&mut self, kind: MessageKind) -> Result<u16> {
        if let Some(&id) = self.schemas.get(&kind) {
            return Ok(id);
        }
        let schema = self.adapter.schema(kind);
        let id = self
            .writer
            .add_schema(&schema.name, schema.encoding, &schema.data)?;
        debug!(
            schema = %schema.name,
            encoding = schema.encoding,
            id,
            size = schema.data.len(),
            "Registered schema"
        );
        self.schemas.insert(kind, id);
        Ok(id)
    }

    /// Declare `topic` carrying messages of `kind`.
    ///
    /// Declaring the same topic again with the same kind returns the existing
    /// handle without writing anything; a different kind is an error.
    pub fn declare_topic(&mut self, topic: &str, kind: MessageKind) -> Result<ChannelHandle> {
        if let Some(existing) = self.channels.get(topic) {
            if existing.kind != kind {
                return Err(FixtureError::invalid_config(
                    "topic",
                    format!(
                        "{topic} already declared for {}, not {}",
                        existing.kind.type_name(),
                        kind.type_name()
                    ),
                ));
            }
            return Ok(existing.clone());
        }

        let schema_id = self.schema_id(kind)?;
        let spec = self.adapter.channel(kind);
        let id = self
            .writer
            .add_channel(schema_id, topic, spec.message_encoding, &spec.metadata)?;
        debug!(topic, id, schema_id, encoding = spec.message_encoding, "Declared topic");

        let handle = ChannelHandle {
            id,
            kind,
            topic: topic.to_string(),
        };
        self.channels.insert(topic.to_string(), handle.clone());
        Ok(handle)
    }

    /// Encode `value` and append it to `channel`.
    pub fn append(
        &mut self,
        channel: &ChannelHandle,
        value: &FixtureMessage,
        log_time: u64,
        publish_time: u64,
    ) -> Result<()> {
        if self.channels.get(&channel.topic) != Some(channel) {
            return Err(FixtureError::unsupported(format!(
                "channel {} was not declared in this session",
                channel.topic
            )));
        }
        if value.kind() != channel.kind {
            return Err(FixtureError::encode(
                self.adapter.codec().as_str(),
                format!(
                    "{} value on {} channel {}",
                    value.kind().type_name(),
                    channel.kind.type_name(),
                    channel.topic
                ),
            ));
        }

        let payload = self.adapter.encode(value)?;
        let sequence = self.sequences.entry(channel.id).or_insert(0);
        self.writer.write_to_known_channel(
            &mcap::records::MessageHeader {
                channel_id: channel.id,
                sequence: *sequence,
                log_time,
                publish_time,
            },
            &payload,
        )?;
        *sequence = sequence.wrapping_add(1);
        self.message_count += 1;
        Ok(())
    }

    /// Finalize the container, writing its summary and index, and flush the
    /// underlying stream.
    ///
    /// Consumes the session, so a container cannot be finalized twice.
    pub fn close(mut self) -> Result<u64> {
        self.writer.finish()?;
        self.writer.into_inner().flush()?;
        debug!(
            messages = self.message_count,
            channels = self.channels.len(),
            schemas = self.schemas.len(),
            "Closed container"
        );
        Ok(self.message_count)
    }
}
