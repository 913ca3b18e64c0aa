// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Core types used throughout robofixture.
//!
//! This module provides the foundational types for the library:
//! - [`FixtureError`] - Error handling
//! - [`value`] - The canonical value model shared by every codec
//! - [`Codec`] - Supported codec identifier
//! - [`MessageKind`] - The three fixture message kinds

pub mod error;
pub mod value;

pub use error::{FixtureError, Result};
pub use value::{FixtureMessage, LaserScan, Log, LogLevel, Orientation, Pose, PosesInFrame, Position, Timestamp};

/// Codec identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Codec {
    /// OMG IDL schemas, CDR messages
    OmgIdl,
    /// Protobuf descriptor sets, protobuf messages
    Protobuf,
    /// ROS1 message definitions, ROS1 serialization
    #[serde(rename = "ros1msg")]
    Ros1,
    /// ROS2 message definitions, CDR messages
    #[serde(rename = "ros2msg")]
    Ros2,
}

/// Error returned when parsing a `Codec` from string fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseCodecError {
    _private: (),
}

impl std::fmt::Display for ParseCodecError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid codec name, expected 'omgidl', 'protobuf', 'ros1msg', or 'ros2msg'"
        )
    }
}

impl std::error::Error for ParseCodecError {}

impl std::str::FromStr for Codec {
    type Err = ParseCodecError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "omgidl" => Ok(Codec::OmgIdl),
            "protobuf" | "proto" => Ok(Codec::Protobuf),
            "ros1msg" | "ros1" => Ok(Codec::Ros1),
            "ros2msg" | "ros2" => Ok(Codec::Ros2),
            _ => Err(ParseCodecError { _private: () }),
        }
    }
}

impl std::fmt::Display for Codec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Codec {
    /// All supported codecs.
    pub const ALL: [Codec; 4] = [Codec::OmgIdl, Codec::Protobuf, Codec::Ros1, Codec::Ros2];

    /// Short name, also used for default file names.
    pub fn as_str(&self) -> &'static str {
        match self {
            Codec::OmgIdl => "omgidl",
            Codec::Protobuf => "protobuf",
            Codec::Ros1 => "ros1msg",
            Codec::Ros2 => "ros2msg",
        }
    }

    /// Topic prefix used when none is given.
    pub fn default_topic_prefix(&self) -> &'static str {
        match self {
            Codec::OmgIdl => "/omgidl",
            Codec::Protobuf => "/protobuf",
            Codec::Ros1 => "/ros1msg",
            Codec::Ros2 => "/ros2msg",
        }
    }

    /// MCAP profile written to the file header.
    pub fn profile(&self) -> &'static str {
        match self {
            Codec::OmgIdl | Codec::Protobuf => "",
            Codec::Ros1 => "ros1",
            Codec::Ros2 => "ros2",
        }
    }

    /// MCAP schema encoding.
    pub fn schema_encoding(&self) -> &'static str {
        match self {
            Codec::OmgIdl => "omgidl",
            Codec::Protobuf => "protobuf",
            Codec::Ros1 => "ros1msg",
            Codec::Ros2 => "ros2msg",
        }
    }

    /// MCAP channel message encoding.
    pub fn message_encoding(&self) -> &'static str {
        match self {
            Codec::OmgIdl | Codec::Ros2 => "cdr",
            Codec::Protobuf => "protobuf",
            Codec::Ros1 => "ros1",
        }
    }
}

/// The three fixture message kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize)]
pub enum MessageKind {
    Log,
    PosesInFrame,
    LaserScan,
}

/// Structural class of a message attribute.
///
/// Schemas in every codec must declare the same classes, in the same order,
/// as [`MessageKind::attributes`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldClass {
    Timestamp,
    Integer,
    Float,
    Text,
    Pose,
    PoseSequence,
    FloatSequence,
}

impl MessageKind {
    /// All kinds, in the order the driver writes them for each index.
    pub const ALL: [MessageKind; 3] = [
        MessageKind::Log,
        MessageKind::PosesInFrame,
        MessageKind::LaserScan,
    ];

    /// Topic name below the topic prefix.
    pub fn topic_suffix(&self) -> &'static str {
        match self {
            MessageKind::Log => "log",
            MessageKind::PosesInFrame => "poses_in_frame",
            MessageKind::LaserScan => "scan",
        }
    }

    /// Unqualified message type name.
    pub fn type_name(&self) -> &'static str {
        match self {
            MessageKind::Log => "Log",
            MessageKind::PosesInFrame => "PosesInFrame",
            MessageKind::LaserScan => "LaserScan",
        }
    }

    /// Attribute names and classes of the value model, in declaration order.
    pub fn attributes(&self) -> &'static [(&'static str, FieldClass)] {
        match self {
            MessageKind::Log => &[
                ("timestamp", FieldClass::Timestamp),
                ("level", FieldClass::Integer),
                ("message", FieldClass::Text),
                ("name", FieldClass::Text),
                ("file", FieldClass::Text),
                ("line", FieldClass::Integer),
            ],
            MessageKind::PosesInFrame => &[
                ("timestamp", FieldClass::Timestamp),
                ("frame_id", FieldClass::Text),
                ("poses", FieldClass::PoseSequence),
            ],
            MessageKind::LaserScan => &[
                ("timestamp", FieldClass::Timestamp),
                ("frame_id", FieldClass::Text),
                ("pose", FieldClass::Pose),
                ("start_angle", FieldClass::Float),
                ("end_angle", FieldClass::Float),
                ("ranges", FieldClass::FloatSequence),
                ("intensities", FieldClass::FloatSequence),
            ],
        }
    }

    /// Full topic name under `prefix`.
    pub fn topic(&self, prefix: &str) -> String {
        format!("{prefix}/{}", self.topic_suffix())
    }
}
