// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Cross-codec equivalence tests.
//!
//! Every codec writes the same logical values; decoding each file's payloads
//! must give back exactly the generated sequence.

mod common;

use std::collections::BTreeMap;
use std::fs;

use common::{records_by_topic, write_fixture};
use robofixture::core::value::generate;
use robofixture::{adapter_for, Codec, FixtureMessage, MessageKind};

const COUNT: u64 = 12;

/// Decoded values per message kind, in sequence order.
fn decode_file(codec: Codec, dir: &std::path::Path) -> BTreeMap<MessageKind, Vec<FixtureMessage>> {
    let adapter = adapter_for(codec).unwrap();
    let (path, _) = write_fixture(dir, codec, COUNT, "/x");
    let topics = records_by_topic(&fs::read(path).unwrap());

    MessageKind::ALL
        .into_iter()
        .map(|kind| {
            let values = topics[&kind.topic("/x")]
                .iter()
                .map(|record| adapter.decode(kind, &record.data).unwrap())
                .collect();
            (kind, values)
        })
        .collect()
}

#[test]
fn test_every_codec_decodes_to_generated_values() {
    let dir = tempfile::tempdir().unwrap();
    for codec in Codec::ALL {
        let decoded = decode_file(codec, dir.path());
        for (kind, values) in &decoded {
            assert_eq!(values.len() as u64, COUNT);
            for (i, value) in values.iter().enumerate() {
                assert_eq!(
                    value,
                    &generate(*kind, i as u64),
                    "{codec} {kind:?} #{i} does not match the generated value"
                );
            }
        }
    }
}

#[test]
fn test_codecs_agree_with_each_other() {
    let dir = tempfile::tempdir().unwrap();
    let reference = decode_file(Codec::OmgIdl, dir.path());
    for codec in [Codec::Protobuf, Codec::Ros1, Codec::Ros2] {
        assert_eq!(decode_file(codec, dir.path()), reference, "{codec} disagrees with omgidl");
    }
}

#[test]
fn test_omgidl_and_ros2_share_payload_bytes() {
    let dir = tempfile::tempdir().unwrap();
    let (omgidl, _) = write_fixture(dir.path(), Codec::OmgIdl, 4, "/same");
    let (ros2, _) = write_fixture(dir.path(), Codec::Ros2, 4, "/same");

    let omgidl = records_by_topic(&fs::read(omgidl).unwrap());
    let ros2 = records_by_topic(&fs::read(ros2).unwrap());
    for (topic, records) in &omgidl {
        let payloads: Vec<_> = records.iter().map(|r| &r.data).collect();
        let other: Vec<_> = ros2[topic].iter().map(|r| &r.data).collect();
        assert_eq!(payloads, other, "{topic}");
    }
}

#[test]
fn test_log_timestamp_matches_log_time() {
    let dir = tempfile::tempdir().unwrap();
    for codec in Codec::ALL {
        let adapter = adapter_for(codec).unwrap();
        let (path, _) = write_fixture(dir.path(), codec, 5, "/ts");
        let topics = records_by_topic(&fs::read(path).unwrap());
        for records in topics.values() {
            for record in records {
                let kind = MessageKind::ALL
                    .into_iter()
                    .find(|k| record.topic == k.topic("/ts"))
                    .unwrap();
                let value = adapter.decode(kind, &record.data).unwrap();
                assert_eq!(value.timestamp().as_nanos(), record.log_time, "{codec}");
            }
        }
    }
}

#[test]
fn test_decoding_with_wrong_kind_fails() {
    let dir = tempfile::tempdir().unwrap();
    for codec in [Codec::OmgIdl, Codec::Ros1, Codec::Ros2] {
        let adapter = adapter_for(codec).unwrap();
        let (path, _) = write_fixture(dir.path(), codec, 1, "/w");
        let topics = records_by_topic(&fs::read(path).unwrap());
        let scan = &topics["/w/scan"][0].data;
        assert!(
            adapter.decode(MessageKind::Log, scan).is_err(),
            "{codec} accepted a scan payload as a log"
        );
    }
}
