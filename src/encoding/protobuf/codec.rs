// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Protobuf codec adapter using prost-reflect for readback.

use std::collections::HashMap;

use prost_reflect::{DescriptorPool, DynamicMessage, MessageDescriptor, ReflectMessage, Value};

use super::encode;
use crate::core::value::{LaserScan, Log, PosesInFrame};
use crate::core::{
    Codec, FixtureError, FixtureMessage, LogLevel, MessageKind, Orientation, Pose, Position,
    Result, Timestamp,
};
use crate::encoding::CodecAdapter;
use crate::schema::protobuf as catalog;

const CODEC: &str = "Protobuf";

/// Protobuf descriptor sets with protobuf payloads.
///
/// Decoding is driven by the same descriptor sets that are written as
/// schema records, loaded once at construction.
pub struct ProtobufCodec {
    /// Root message descriptors indexed by kind
    descriptors: HashMap<MessageKind, MessageDescriptor>,
}

impl ProtobufCodec {
    /// Create a new Protobuf codec, loading the descriptor catalog.
    pub fn new() -> Result<Self> {
        let mut descriptors = HashMap::new();
        for kind in MessageKind::ALL {
            let full_name = catalog::full_name(kind);
            let pool = DescriptorPool::from_file_descriptor_set(catalog::file_descriptor_set(kind))
                .map_err(|e| {
                    FixtureError::catalog(&full_name, format!("Failed to build descriptor pool: {e}"))
                })?;
            let descriptor = pool.get_message_by_name(&full_name).ok_or_else(|| {
                FixtureError::catalog(&full_name, "message not in descriptor set")
            })?;
            descriptors.insert(kind, descriptor);
        }
        Ok(Self { descriptors })
    }

    /// Root message descriptor for `kind`.
    pub fn descriptor(&self, kind: MessageKind) -> Option<&MessageDescriptor> {
        self.descriptors.get(&kind)
    }

    fn decode_dynamic(&self, kind: MessageKind, data: &[u8]) -> Result<DynamicMessage> {
        let descriptor = self
            .descriptor(kind)
            .ok_or_else(|| FixtureError::unsupported(format!("protobuf {}", kind.type_name())))?;
        DynamicMessage::decode(descriptor.clone(), data)
            .map_err(|e| FixtureError::decode(CODEC, e.to_string()))
    }
}

impl CodecAdapter for ProtobufCodec {
    fn codec(&self) -> Codec {
        Codec::Protobuf
    }

    fn encode(&self, message: &FixtureMessage) -> Result<Vec<u8>> {
        encode::encode(message)
    }

    fn decode(&self, kind: MessageKind, data: &[u8]) -> Result<FixtureMessage> {
        let msg = self.decode_dynamic(kind, data)?;
        Ok(match kind {
            MessageKind::Log => FixtureMessage::Log(log_from(&msg)?),
            MessageKind::PosesInFrame => FixtureMessage::PosesInFrame(poses_in_frame_from(&msg)?),
            MessageKind::LaserScan => FixtureMessage::LaserScan(laser_scan_from(&msg)?),
        })
    }
}

// =============================================================================
// Dynamic message accessors
// =============================================================================

fn field<T>(
    msg: &DynamicMessage,
    name: &str,
    get: impl FnOnce(&Value) -> Option<T>,
) -> Result<T> {
    msg.get_field_by_name(name)
        .and_then(|value| get(&*value))
        .ok_or_else(|| {
            FixtureError::decode(
                CODEC,
                format!("field {}.{name} missing or mistyped", msg.descriptor().name()),
            )
        })
}

fn message_field(msg: &DynamicMessage, name: &str) -> Result<DynamicMessage> {
    field(msg, name, |v| v.as_message().cloned())
}

fn f64_field(msg: &DynamicMessage, name: &str) -> Result<f64> {
    field(msg, name, Value::as_f64)
}

fn string_field(msg: &DynamicMessage, name: &str) -> Result<String> {
    field(msg, name, |v| v.as_str().map(str::to_string))
}

fn f64_list_field(msg: &DynamicMessage, name: &str) -> Result<Vec<f64>> {
    field(msg, name, |v| {
        v.as_list()?.iter().map(Value::as_f64).collect::<Option<Vec<_>>>()
    })
}

fn timestamp_from(msg: &DynamicMessage) -> Result<Timestamp> {
    let ts = message_field(msg, "timestamp")?;
    let seconds = field(&ts, "seconds", Value::as_i64)?;
    let nanos = field(&ts, "nanos", Value::as_i32)?;
    u64::try_from(seconds)
        .ok()
        .zip(u32::try_from(nanos).ok())
        .and_then(|(sec, nanosec)| Timestamp::from_parts(sec, nanosec))
        .ok_or_else(|| FixtureError::decode(CODEC, format!("invalid timestamp {seconds}s {nanos}ns")))
}

fn pose_from(msg: &DynamicMessage) -> Result<Pose> {
    let position = message_field(msg, "position")?;
    let orientation = message_field(msg, "orientation")?;
    Ok(Pose {
        position: Position {
            x: f64_field(&position, "x")?,
            y: f64_field(&position, "y")?,
            z: f64_field(&position, "z")?,
        },
        orientation: Orientation {
            x: f64_field(&orientation, "x")?,
            y: f64_field(&orientation, "y")?,
            z: f64_field(&orientation, "z")?,
            w: f64_field(&orientation, "w")?,
        },
    })
}

fn log_from(msg: &DynamicMessage) -> Result<Log> {
    let code = field(msg, "level", Value::as_enum_number)?;
    let level = u8::try_from(code)
        .ok()
        .and_then(LogLevel::from_code)
        .ok_or_else(|| FixtureError::decode(CODEC, format!("unknown log level {code}")))?;
    Ok(Log {
        timestamp: timestamp_from(msg)?,
        level,
        message: string_field(msg, "message")?,
        name: string_field(msg, "name")?,
        file: string_field(msg, "file")?,
        line: u64::from(field(msg, "line", Value::as_u32)?),
    })
}

fn poses_in_frame_from(msg: &DynamicMessage) -> Result<PosesInFrame> {
    let poses = field(msg, "poses", |v| {
        v.as_list()?
            .iter()
            .map(|p| p.as_message().cloned())
            .collect::<Option<Vec<_>>>()
    })?;
    Ok(PosesInFrame {
        timestamp: timestamp_from(msg)?,
        frame_id: string_field(msg, "frame_id")?,
        poses: poses.iter().map(pose_from).collect::<Result<Vec<_>>>()?,
    })
}

fn laser_scan_from(msg: &DynamicMessage) -> Result<LaserScan> {
    Ok(LaserScan {
        timestamp: timestamp_from(msg)?,
        frame_id: string_field(msg, "frame_id")?,
        pose: pose_from(&message_field(msg, "pose")?)?,
        start_angle: f64_field(msg, "start_angle")?,
        end_angle: f64_field(msg, "end_angle")?,
        ranges: f64_list_field(msg, "ranges")?,
        intensities: f64_list_field(msg, "intensities")?,
    })
}
