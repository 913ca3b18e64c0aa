// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Schema catalog tests.
//!
//! The catalog must describe the value model in every codec, with the names
//! and encodings reader tooling expects.

use prost_reflect::DescriptorPool;
use robofixture::core::FieldClass;
use robofixture::schema::{check_catalog, declared_fields, schema_for, schema_name};
use robofixture::{Codec, MessageKind};

#[test]
fn test_catalog_matches_value_model() {
    check_catalog().unwrap();
}

#[test]
fn test_declared_field_order_is_uniform() {
    for kind in MessageKind::ALL {
        let expected: Vec<_> = kind.attributes().iter().map(|(name, _)| *name).collect();
        for codec in Codec::ALL {
            let fields = declared_fields(codec, kind).unwrap();
            let names: Vec<_> = fields.iter().map(|f| f.name.as_str()).collect();
            assert_eq!(names, expected, "{codec} {}", kind.type_name());
        }
    }
}

#[test]
fn test_every_entry_is_classified() {
    for codec in Codec::ALL {
        for kind in MessageKind::ALL {
            for field in declared_fields(codec, kind).unwrap() {
                assert!(
                    field.class.is_some(),
                    "{codec} {}: field {} has unclassified type {}",
                    kind.type_name(),
                    field.name,
                    field.type_name
                );
            }
        }
    }
}

#[test]
fn test_timestamp_type_per_codec() {
    let expected = [
        (Codec::OmgIdl, "builtin_interfaces::msg::Time"),
        (Codec::Protobuf, "google.protobuf.Timestamp"),
        (Codec::Ros1, "time"),
        (Codec::Ros2, "builtin_interfaces/Time"),
    ];
    for (codec, type_name) in expected {
        let fields = declared_fields(codec, MessageKind::PosesInFrame).unwrap();
        assert_eq!(fields[0].type_name, type_name, "{codec}");
        assert_eq!(fields[0].class, Some(FieldClass::Timestamp));
    }
}

#[test]
fn test_pose_sequence_declared() {
    for codec in Codec::ALL {
        let fields = declared_fields(codec, MessageKind::PosesInFrame).unwrap();
        assert_eq!(fields[2].class, Some(FieldClass::PoseSequence), "{codec}");
    }
}

#[test]
fn test_protobuf_entries_are_self_contained() {
    for kind in MessageKind::ALL {
        let entry = schema_for(Codec::Protobuf, kind);
        assert_eq!(entry.encoding, "protobuf");
        assert_eq!(entry.name, schema_name(Codec::Protobuf, kind));

        let pool = DescriptorPool::decode(entry.data.as_ref()).unwrap();
        assert!(pool.get_message_by_name(&entry.name).is_some());
        assert!(pool.get_message_by_name("google.protobuf.Timestamp").is_some());
    }
}

#[test]
fn test_ros_definitions_embed_dependencies() {
    for (codec, package) in [(Codec::Ros1, "geometry_msgs/"), (Codec::Ros2, "geometry_msgs/msg/")] {
        let entry = schema_for(codec, MessageKind::LaserScan);
        let text = entry.text().unwrap();
        for ty in ["Pose", "Point", "Quaternion"] {
            assert!(text.contains(&format!("MSG: {package}{ty}\n")), "{codec} lacks {ty}");
        }
    }
}

#[test]
fn test_idl_log_declares_level_constants() {
    let entry = schema_for(Codec::OmgIdl, MessageKind::Log);
    let text = entry.text().unwrap();
    for name in ["UNKNOWN", "DEBUG", "INFO", "WARNING", "ERROR", "FATAL"] {
        assert!(text.contains(name), "missing level constant {name}");
    }
}
