// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Protobuf wire encoding of the fixture messages.
//!
//! Fields are written with `prost::encoding` directly instead of through
//! generated message types, so every field is emitted even when it holds its
//! default value. Field numbers come from the descriptor catalog.

use prost::encoding::{self, WireType};

use crate::core::value::{LaserScan, Log, PosesInFrame};
use crate::core::{FixtureError, FixtureMessage, Pose, Result, Timestamp};
use crate::schema::protobuf::tags;

const CODEC: &str = "Protobuf";

fn nested(tag: u32, body: &[u8], buf: &mut Vec<u8>) {
    encoding::encode_key(tag, WireType::LengthDelimited, buf);
    encoding::encode_varint(body.len() as u64, buf);
    buf.extend_from_slice(body);
}

fn string(tag: u32, value: &str, buf: &mut Vec<u8>) {
    nested(tag, value.as_bytes(), buf);
}

fn timestamp(tag: u32, ts: Timestamp, buf: &mut Vec<u8>) -> Result<()> {
    let seconds = i64::try_from(ts.sec()).map_err(|_| {
        FixtureError::encode(CODEC, format!("timestamp {}s exceeds int64 seconds", ts.sec()))
    })?;
    // nanosec() is below 1e9
    let nanos = ts.nanosec() as i32;

    let mut body = Vec::with_capacity(16);
    encoding::int64::encode(tags::timestamp::SECONDS, &seconds, &mut body);
    encoding::int32::encode(tags::timestamp::NANOS, &nanos, &mut body);
    nested(tag, &body, buf);
    Ok(())
}

fn pose_body(pose: &Pose) -> Vec<u8> {
    let mut position = Vec::with_capacity(27);
    encoding::double::encode(tags::xyzw::X, &pose.position.x, &mut position);
    encoding::double::encode(tags::xyzw::Y, &pose.position.y, &mut position);
    encoding::double::encode(tags::xyzw::Z, &pose.position.z, &mut position);

    let mut orientation = Vec::with_capacity(36);
    encoding::double::encode(tags::xyzw::X, &pose.orientation.x, &mut orientation);
    encoding::double::encode(tags::xyzw::Y, &pose.orientation.y, &mut orientation);
    encoding::double::encode(tags::xyzw::Z, &pose.orientation.z, &mut orientation);
    encoding::double::encode(tags::xyzw::W, &pose.orientation.w, &mut orientation);

    let mut body = Vec::with_capacity(position.len() + orientation.len() + 4);
    nested(tags::pose::POSITION, &position, &mut body);
    nested(tags::pose::ORIENTATION, &orientation, &mut body);
    body
}

/// Encode a `foxglove.Log`.
pub fn encode_log(log: &Log) -> Result<Vec<u8>> {
    use tags::log::*;

    let line = u32::try_from(log.line)
        .map_err(|_| FixtureError::encode(CODEC, format!("line {} exceeds fixed32", log.line)))?;

    let mut buf = Vec::with_capacity(48 + log.message.len() + log.name.len());
    timestamp(TIMESTAMP, log.timestamp, &mut buf)?;
    encoding::int32::encode(LEVEL, &i32::from(log.level.code()), &mut buf);
    string(MESSAGE, &log.message, &mut buf);
    string(NAME, &log.name, &mut buf);
    string(FILE, &log.file, &mut buf);
    encoding::fixed32::encode(LINE, &line, &mut buf);
    Ok(buf)
}

/// Encode a `foxglove.PosesInFrame`.
pub fn encode_poses_in_frame(msg: &PosesInFrame) -> Result<Vec<u8>> {
    use tags::poses_in_frame::*;

    let mut buf = Vec::with_capacity(32 + msg.poses.len() * 72);
    timestamp(TIMESTAMP, msg.timestamp, &mut buf)?;
    string(FRAME_ID, &msg.frame_id, &mut buf);
    for pose in &msg.poses {
        nested(POSES, &pose_body(pose), &mut buf);
    }
    Ok(buf)
}

/// Encode a `foxglove.LaserScan`.
pub fn encode_laser_scan(msg: &LaserScan) -> Result<Vec<u8>> {
    use tags::laser_scan::*;

    let mut buf = Vec::with_capacity(128 + (msg.ranges.len() + msg.intensities.len()) * 8);
    timestamp(TIMESTAMP, msg.timestamp, &mut buf)?;
    string(FRAME_ID, &msg.frame_id, &mut buf);
    nested(POSE, &pose_body(&msg.pose), &mut buf);
    encoding::double::encode(START_ANGLE, &msg.start_angle, &mut buf);
    encoding::double::encode(END_ANGLE, &msg.end_angle, &mut buf);
    encoding::double::encode_packed(RANGES, &msg.ranges, &mut buf);
    encoding::double::encode_packed(INTENSITIES, &msg.intensities, &mut buf);
    Ok(buf)
}

/// Encode any fixture message.
pub fn encode(message: &FixtureMessage) -> Result<Vec<u8>> {
    match message {
        FixtureMessage::Log(m) => encode_log(m),
        FixtureMessage::PosesInFrame(m) => encode_poses_in_frame(m),
        FixtureMessage::LaserScan(m) => encode_laser_scan(m),
    }
}
