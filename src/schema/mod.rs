// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Schema catalog for the fixture messages.
//!
//! One entry per (codec, message kind):
//! - [`omgidl`] - OMG IDL text
//! - [`msg`] - ROS1 and ROS2 concatenated message definitions
//! - [`protobuf`] - serialized `FileDescriptorSet`s
//!
//! The catalog is static data. [`declared_fields`] reads the root message's
//! fields back out of an entry so tests can check every schema against the
//! value model's attributes.

pub mod msg;
pub mod omgidl;
pub mod protobuf;

use std::borrow::Cow;

use prost_reflect::{DescriptorPool, Kind};
use regex::Regex;

use crate::core::{Codec, FieldClass, FixtureError, MessageKind, Result};

/// Schema record contents for one message kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaEntry {
    /// Schema name as written to the container
    pub name: String,
    /// Schema encoding (e.g., "omgidl", "ros2msg")
    pub encoding: &'static str,
    /// Schema body
    pub data: Cow<'static, [u8]>,
}

impl SchemaEntry {
    /// Schema body as text, for text-based encodings.
    pub fn text(&self) -> Option<&str> {
        std::str::from_utf8(&self.data).ok()
    }
}

/// Schema name of `kind` in `codec`'s naming convention.
pub fn schema_name(codec: Codec, kind: MessageKind) -> String {
    let ty = kind.type_name();
    match codec {
        Codec::OmgIdl => format!("foxglove_msgs::msg::{ty}"),
        Codec::Protobuf => protobuf::full_name(kind),
        Codec::Ros1 => format!("foxglove_msgs/{ty}"),
        Codec::Ros2 => format!("foxglove_msgs/msg/{ty}"),
    }
}

fn text_schema(codec: Codec, kind: MessageKind) -> &'static str {
    match (codec, kind) {
        (Codec::OmgIdl, MessageKind::Log) => omgidl::LOG,
        (Codec::OmgIdl, MessageKind::PosesInFrame) => omgidl::POSES_IN_FRAME,
        (Codec::OmgIdl, MessageKind::LaserScan) => omgidl::LASER_SCAN,
        (Codec::Ros1, MessageKind::Log) => msg::ros1::LOG,
        (Codec::Ros1, MessageKind::PosesInFrame) => msg::ros1::POSES_IN_FRAME,
        (Codec::Ros1, MessageKind::LaserScan) => msg::ros1::LASER_SCAN,
        (Codec::Ros2, MessageKind::Log) => msg::ros2::LOG,
        (Codec::Ros2, MessageKind::PosesInFrame) => msg::ros2::POSES_IN_FRAME,
        (Codec::Ros2, MessageKind::LaserScan) => msg::ros2::LASER_SCAN,
        (Codec::Protobuf, _) => "",
    }
}

/// Catalog entry for (`codec`, `kind`).
pub fn schema_for(codec: Codec, kind: MessageKind) -> SchemaEntry {
    let data = match codec {
        Codec::Protobuf => Cow::Owned(protobuf::encoded_descriptor_set(kind)),
        _ => Cow::Borrowed(text_schema(codec, kind).as_bytes()),
    };
    SchemaEntry {
        name: schema_name(codec, kind),
        encoding: codec.schema_encoding(),
        data,
    }
}

/// A field declared by a schema's root message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDecl {
    /// Field name
    pub name: String,
    /// Declared type, as spelled by the schema
    pub type_name: String,
    /// Structural class, `None` if the type is not one the fixtures use
    pub class: Option<FieldClass>,
}

fn schema_error(reason: impl std::fmt::Display) -> FixtureError {
    FixtureError::catalog("built-in schemas", reason.to_string())
}

fn classify_idl(type_name: &str) -> Option<FieldClass> {
    match type_name {
        "builtin_interfaces::msg::Time" => Some(FieldClass::Timestamp),
        "int8" | "uint8" | "int16" | "uint16" | "int32" | "uint32" | "int64" | "uint64" => {
            Some(FieldClass::Integer)
        }
        "float" | "double" => Some(FieldClass::Float),
        "string" => Some(FieldClass::Text),
        "geometry_msgs::msg::Pose" => Some(FieldClass::Pose),
        "sequence<geometry_msgs::msg::Pose>" => Some(FieldClass::PoseSequence),
        "sequence<double>" => Some(FieldClass::FloatSequence),
        _ => None,
    }
}

fn classify_msg(type_name: &str) -> Option<FieldClass> {
    match type_name {
        "time" | "builtin_interfaces/Time" | "builtin_interfaces/msg/Time" => {
            Some(FieldClass::Timestamp)
        }
        "int8" | "uint8" | "int16" | "uint16" | "int32" | "uint32" | "int64" | "uint64" => {
            Some(FieldClass::Integer)
        }
        "float32" | "float64" => Some(FieldClass::Float),
        "string" => Some(FieldClass::Text),
        "geometry_msgs/Pose" | "geometry_msgs/msg/Pose" => Some(FieldClass::Pose),
        "geometry_msgs/Pose[]" | "geometry_msgs/msg/Pose[]" => Some(FieldClass::PoseSequence),
        "float64[]" => Some(FieldClass::FloatSequence),
        _ => None,
    }
}

fn classify_proto(kind: &Kind, is_list: bool) -> Option<FieldClass> {
    let class = match kind {
        Kind::Message(m) if m.full_name() == "google.protobuf.Timestamp" => FieldClass::Timestamp,
        Kind::Message(m) if m.full_name() == "foxglove.Pose" => FieldClass::Pose,
        Kind::Enum(_)
        | Kind::Int32
        | Kind::Int64
        | Kind::Uint32
        | Kind::Uint64
        | Kind::Fixed32
        | Kind::Fixed64 => FieldClass::Integer,
        Kind::Double | Kind::Float => FieldClass::Float,
        Kind::String => FieldClass::Text,
        _ => return None,
    };
    match (class, is_list) {
        (class, false) => Some(class),
        (FieldClass::Pose, true) => Some(FieldClass::PoseSequence),
        (FieldClass::Float, true) => Some(FieldClass::FloatSequence),
        _ => None,
    }
}

fn idl_fields(text: &str, kind: MessageKind) -> Result<Vec<FieldDecl>> {
    let block = Regex::new(&format!(r"(?s)struct\s+{}\s*\{{(.*?)\}};", kind.type_name()))
        .map_err(schema_error)?;
    let body = block
        .captures(text)
        .and_then(|c| c.get(1))
        .ok_or_else(|| schema_error(format!("struct {} not found", kind.type_name())))?;
    let line = Regex::new(r"(?m)^\s*([A-Za-z_][\w:<>]*)\s+([A-Za-z_]\w*)\s*;").map_err(schema_error)?;
    Ok(line
        .captures_iter(body.as_str())
        .map(|c| FieldDecl {
            name: c[2].to_string(),
            type_name: c[1].to_string(),
            class: classify_idl(&c[1]),
        })
        .collect())
}

fn msg_fields(text: &str) -> Result<Vec<FieldDecl>> {
    let line = Regex::new(r"(?m)^([A-Za-z_][\w/\[\]]*)\s+([A-Za-z_]\w*)\s*$").map_err(schema_error)?;
    Ok(line
        .captures_iter(msg::root_definition(text))
        .map(|c| FieldDecl {
            name: c[2].to_string(),
            type_name: c[1].to_string(),
            class: classify_msg(&c[1]),
        })
        .collect())
}

fn proto_fields(data: &[u8], kind: MessageKind) -> Result<Vec<FieldDecl>> {
    let pool = DescriptorPool::decode(data).map_err(schema_error)?;
    let full_name = protobuf::full_name(kind);
    let descriptor = pool
        .get_message_by_name(&full_name)
        .ok_or_else(|| schema_error(format!("message {full_name} not found")))?;
    Ok(descriptor
        .fields()
        .map(|f| {
            let kind = f.kind();
            let type_name = match &kind {
                Kind::Message(m) => m.full_name().to_string(),
                Kind::Enum(e) => e.full_name().to_string(),
                other => format!("{other:?}").to_lowercase(),
            };
            FieldDecl {
                name: f.name().to_string(),
                class: classify_proto(&kind, f.is_list()),
                type_name: if f.is_list() {
                    format!("repeated {type_name}")
                } else {
                    type_name
                },
            }
        })
        .collect())
}

/// Fields declared by the root message of the (`codec`, `kind`) entry, in order.
pub fn declared_fields(codec: Codec, kind: MessageKind) -> Result<Vec<FieldDecl>> {
    match codec {
        Codec::OmgIdl => idl_fields(text_schema(codec, kind), kind),
        Codec::Ros1 | Codec::Ros2 => msg_fields(text_schema(codec, kind)),
        Codec::Protobuf => proto_fields(&schema_for(codec, kind).data, kind),
    }
}

/// Check that every catalog entry declares exactly the value model's attributes.
pub fn check_catalog() -> Result<()> {
    for codec in Codec::ALL {
        for kind in MessageKind::ALL {
            let declared: Vec<(String, Option<FieldClass>)> = declared_fields(codec, kind)?
                .into_iter()
                .map(|f| (f.name, f.class))
                .collect();
            let expected: Vec<(String, Option<FieldClass>)> = kind
                .attributes()
                .iter()
                .map(|(name, class)| (name.to_string(), Some(*class)))
                .collect();
            if declared != expected {
                return Err(FixtureError::catalog(
                    schema_name(codec, kind),
                    format!("declares {declared:?}, value model has {expected:?}"),
                ));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_names() {
        assert_eq!(
            schema_name(Codec::OmgIdl, MessageKind::Log),
            "foxglove_msgs::msg::Log"
        );
        assert_eq!(schema_name(Codec::Protobuf, MessageKind::LaserScan), "foxglove.LaserScan");
        assert_eq!(
            schema_name(Codec::Ros1, MessageKind::PosesInFrame),
            "foxglove_msgs/PosesInFrame"
        );
        assert_eq!(schema_name(Codec::Ros2, MessageKind::Log), "foxglove_msgs/msg/Log");
    }

    #[test]
    fn test_text_entries_are_utf8() {
        for codec in [Codec::OmgIdl, Codec::Ros1, Codec::Ros2] {
            for kind in MessageKind::ALL {
                let entry = schema_for(codec, kind);
                assert_eq!(entry.encoding, codec.schema_encoding());
                assert!(entry.text().is_some_and(|t| !t.is_empty()));
            }
        }
    }

    #[test]
    fn test_idl_fields_skip_constants() {
        let fields = declared_fields(Codec::OmgIdl, MessageKind::Log).unwrap();
        let names: Vec<_> = fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["timestamp", "level", "message", "name", "file", "line"]);
        assert_eq!(fields[1].type_name, "uint8");
    }

    #[test]
    fn test_msg_fields_skip_constants() {
        let fields = declared_fields(Codec::Ros1, MessageKind::Log).unwrap();
        assert_eq!(fields.len(), 6);
        assert_eq!(fields[0].type_name, "time");
        assert_eq!(fields[0].class, Some(FieldClass::Timestamp));
    }

    #[test]
    fn test_proto_fields() {
        let fields = declared_fields(Codec::Protobuf, MessageKind::LaserScan).unwrap();
        assert_eq!(fields[5].name, "ranges");
        assert_eq!(fields[5].type_name, "repeated double");
        assert_eq!(fields[5].class, Some(FieldClass::FloatSequence));
    }

    #[test]
    fn test_unreadable_descriptor_is_catalog_error() {
        let err = proto_fields(&[0xFF, 0xFF, 0xFF], MessageKind::Log).unwrap_err();
        assert!(matches!(err, FixtureError::Catalog { .. }));

        let err = idl_fields("module foxglove {};", MessageKind::Log).unwrap_err();
        assert!(matches!(err, FixtureError::Catalog { .. }));
    }

    #[test]
    fn test_catalog_matches_value_model() {
        check_catalog().unwrap();
    }
}
