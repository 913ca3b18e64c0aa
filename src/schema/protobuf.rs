// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Protobuf descriptor sets for the fixture messages.
//!
//! MCAP `protobuf` schemas carry a serialized `FileDescriptorSet` holding the
//! root message's file and every file it depends on. The descriptors are
//! assembled with `prost-types` and follow the public foxglove schemas field
//! for field.

use prost::Message;
use prost_types::field_descriptor_proto::{Label, Type};
use prost_types::{
    DescriptorProto, EnumDescriptorProto, EnumValueDescriptorProto, FieldDescriptorProto,
    FileDescriptorProto, FileDescriptorSet,
};

use crate::core::{LogLevel, MessageKind};

/// Protobuf package of the fixture messages.
pub const PACKAGE: &str = "foxglove";

const TIMESTAMP_FILE: &str = "google/protobuf/timestamp.proto";
const TIMESTAMP_TYPE: &str = ".google.protobuf.Timestamp";

/// Fully qualified protobuf name of `kind`'s root message.
pub fn full_name(kind: MessageKind) -> String {
    format!("{PACKAGE}.{}", kind.type_name())
}

/// Field numbers of the root messages.
pub mod tags {
    pub mod log {
        pub const TIMESTAMP: u32 = 1;
        pub const LEVEL: u32 = 2;
        pub const MESSAGE: u32 = 3;
        pub const NAME: u32 = 4;
        pub const FILE: u32 = 5;
        pub const LINE: u32 = 6;
    }

    pub mod poses_in_frame {
        pub const TIMESTAMP: u32 = 1;
        pub const FRAME_ID: u32 = 2;
        pub const POSES: u32 = 3;
    }

    pub mod laser_scan {
        pub const TIMESTAMP: u32 = 1;
        pub const FRAME_ID: u32 = 2;
        pub const POSE: u32 = 3;
        pub const START_ANGLE: u32 = 4;
        pub const END_ANGLE: u32 = 5;
        pub const RANGES: u32 = 6;
        pub const INTENSITIES: u32 = 7;
    }

    pub mod timestamp {
        pub const SECONDS: u32 = 1;
        pub const NANOS: u32 = 2;
    }

    pub mod pose {
        pub const POSITION: u32 = 1;
        pub const ORIENTATION: u32 = 2;
    }

    /// Shared by `Vector3` and `Quaternion`.
    pub mod xyzw {
        pub const X: u32 = 1;
        pub const Y: u32 = 2;
        pub const Z: u32 = 3;
        pub const W: u32 = 4;
    }
}

fn field(name: &str, number: u32, ty: Type) -> FieldDescriptorProto {
    FieldDescriptorProto {
        name: Some(name.to_string()),
        number: Some(number as i32),
        label: Some(Label::Optional as i32),
        r#type: Some(ty as i32),
        json_name: Some(json_name(name)),
        ..Default::default()
    }
}

fn typed_field(name: &str, number: u32, ty: Type, type_name: &str) -> FieldDescriptorProto {
    FieldDescriptorProto {
        type_name: Some(type_name.to_string()),
        ..field(name, number, ty)
    }
}

fn repeated(mut field: FieldDescriptorProto) -> FieldDescriptorProto {
    field.label = Some(Label::Repeated as i32);
    field
}

fn json_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper = false;
    for c in name.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

fn message(name: &str, fields: Vec<FieldDescriptorProto>) -> DescriptorProto {
    DescriptorProto {
        name: Some(name.to_string()),
        field: fields,
        ..Default::default()
    }
}

fn file(
    name: &str,
    package: &str,
    dependencies: &[&str],
    message_type: DescriptorProto,
) -> FileDescriptorProto {
    FileDescriptorProto {
        name: Some(name.to_string()),
        package: Some(package.to_string()),
        dependency: dependencies.iter().map(|d| d.to_string()).collect(),
        message_type: vec![message_type],
        syntax: Some("proto3".to_string()),
        ..Default::default()
    }
}

fn timestamp_file() -> FileDescriptorProto {
    file(
        TIMESTAMP_FILE,
        "google.protobuf",
        &[],
        message(
            "Timestamp",
            vec![
                field("seconds", tags::timestamp::SECONDS, Type::Int64),
                field("nanos", tags::timestamp::NANOS, Type::Int32),
            ],
        ),
    )
}

fn vector3_file() -> FileDescriptorProto {
    file(
        "foxglove/Vector3.proto",
        PACKAGE,
        &[],
        message(
            "Vector3",
            vec![
                field("x", tags::xyzw::X, Type::Double),
                field("y", tags::xyzw::Y, Type::Double),
                field("z", tags::xyzw::Z, Type::Double),
            ],
        ),
    )
}

fn quaternion_file() -> FileDescriptorProto {
    file(
        "foxglove/Quaternion.proto",
        PACKAGE,
        &[],
        message(
            "Quaternion",
            vec![
                field("x", tags::xyzw::X, Type::Double),
                field("y", tags::xyzw::Y, Type::Double),
                field("z", tags::xyzw::Z, Type::Double),
                field("w", tags::xyzw::W, Type::Double),
            ],
        ),
    )
}

fn pose_file() -> FileDescriptorProto {
    file(
        "foxglove/Pose.proto",
        PACKAGE,
        &["foxglove/Quaternion.proto", "foxglove/Vector3.proto"],
        message(
            "Pose",
            vec![
                typed_field(
                    "position",
                    tags::pose::POSITION,
                    Type::Message,
                    ".foxglove.Vector3",
                ),
                typed_field(
                    "orientation",
                    tags::pose::ORIENTATION,
                    Type::Message,
                    ".foxglove.Quaternion",
                ),
            ],
        ),
    )
}

fn log_file() -> FileDescriptorProto {
    use tags::log::*;

    let level_enum = EnumDescriptorProto {
        name: Some("Level".to_string()),
        value: LogLevel::ALL
            .iter()
            .map(|level| EnumValueDescriptorProto {
                name: Some(level.name().to_string()),
                number: Some(i32::from(level.code())),
                ..Default::default()
            })
            .collect(),
        ..Default::default()
    };

    let mut log = message(
        "Log",
        vec![
            typed_field("timestamp", TIMESTAMP, Type::Message, TIMESTAMP_TYPE),
            typed_field("level", LEVEL, Type::Enum, ".foxglove.Log.Level"),
            field("message", MESSAGE, Type::String),
            field("name", NAME, Type::String),
            field("file", FILE, Type::String),
            field("line", LINE, Type::Fixed32),
        ],
    );
    log.enum_type.push(level_enum);

    file("foxglove/Log.proto", PACKAGE, &[TIMESTAMP_FILE], log)
}

fn poses_in_frame_file() -> FileDescriptorProto {
    use tags::poses_in_frame::*;

    file(
        "foxglove/PosesInFrame.proto",
        PACKAGE,
        &["foxglove/Pose.proto", TIMESTAMP_FILE],
        message(
            "PosesInFrame",
            vec![
                typed_field("timestamp", TIMESTAMP, Type::Message, TIMESTAMP_TYPE),
                field("frame_id", FRAME_ID, Type::String),
                repeated(typed_field("poses", POSES, Type::Message, ".foxglove.Pose")),
            ],
        ),
    )
}

fn laser_scan_file() -> FileDescriptorProto {
    use tags::laser_scan::*;

    file(
        "foxglove/LaserScan.proto",
        PACKAGE,
        &["foxglove/Pose.proto", TIMESTAMP_FILE],
        message(
            "LaserScan",
            vec![
                typed_field("timestamp", TIMESTAMP, Type::Message, TIMESTAMP_TYPE),
                field("frame_id", FRAME_ID, Type::String),
                typed_field("pose", POSE, Type::Message, ".foxglove.Pose"),
                field("start_angle", START_ANGLE, Type::Double),
                field("end_angle", END_ANGLE, Type::Double),
                repeated(field("ranges", RANGES, Type::Double)),
                repeated(field("intensities", INTENSITIES, Type::Double)),
            ],
        ),
    )
}

/// Descriptor set for `kind`, dependencies first.
pub fn file_descriptor_set(kind: MessageKind) -> FileDescriptorSet {
    let file = match kind {
        MessageKind::Log => vec![timestamp_file(), log_file()],
        MessageKind::PosesInFrame => vec![
            timestamp_file(),
            quaternion_file(),
            vector3_file(),
            pose_file(),
            poses_in_frame_file(),
        ],
        MessageKind::LaserScan => vec![
            timestamp_file(),
            quaternion_file(),
            vector3_file(),
            pose_file(),
            laser_scan_file(),
        ],
    };
    FileDescriptorSet { file }
}

/// Serialized descriptor set for `kind`, as stored in the MCAP schema record.
pub fn encoded_descriptor_set(kind: MessageKind) -> Vec<u8> {
    file_descriptor_set(kind).encode_to_vec()
}
