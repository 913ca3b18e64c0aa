// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Common utilities for integration tests.

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use robofixture::{run, Codec, FixtureConfig, RunStats};

// ============================================================================
// Fixture Generation
// ============================================================================

/// Write a fixture for `codec` with `count` messages per topic into `dir`.
pub fn write_fixture(dir: &Path, codec: Codec, count: u64, prefix: &str) -> (PathBuf, RunStats) {
    let output = dir.join(format!("{}.mcap", codec.as_str()));
    let mut config = FixtureConfig::new(&output, codec);
    config.message_count = count;
    config.topic_prefix = prefix.to_string();
    let stats = run(&config).expect("fixture run failed");
    (output, stats)
}

// ============================================================================
// Container Readback
// ============================================================================

/// One message record with its channel and schema context.
#[derive(Debug, Clone)]
pub struct Record {
    pub topic: String,
    pub message_encoding: String,
    pub schema_name: String,
    pub schema_encoding: String,
    pub schema_data: Vec<u8>,
    pub sequence: u32,
    pub log_time: u64,
    pub publish_time: u64,
    pub data: Vec<u8>,
}

/// All message records of an MCAP file, in file order.
pub fn read_records(bytes: &[u8]) -> Vec<Record> {
    mcap::MessageStream::new(bytes)
        .expect("failed to open MCAP stream")
        .map(|m| {
            let m = m.expect("failed to read MCAP message");
            let schema = m.channel.schema.as_ref().expect("channel without schema");
            Record {
                topic: m.channel.topic.clone(),
                message_encoding: m.channel.message_encoding.clone(),
                schema_name: schema.name.clone(),
                schema_encoding: schema.encoding.clone(),
                schema_data: schema.data.to_vec(),
                sequence: m.sequence,
                log_time: m.log_time,
                publish_time: m.publish_time,
                data: m.data.to_vec(),
            }
        })
        .collect()
}

/// Records grouped by topic, each group in file order.
pub fn records_by_topic(bytes: &[u8]) -> BTreeMap<String, Vec<Record>> {
    let mut topics: BTreeMap<String, Vec<Record>> = BTreeMap::new();
    for record in read_records(bytes) {
        topics.entry(record.topic.clone()).or_default().push(record);
    }
    topics
}

/// Profile string from the file header.
pub fn header_profile(bytes: &[u8]) -> String {
    for record in mcap::read::LinearReader::new(bytes).expect("failed to open MCAP file") {
        if let mcap::records::Record::Header(header) = record.expect("failed to read record") {
            return header.profile;
        }
    }
    panic!("MCAP file has no header record");
}
