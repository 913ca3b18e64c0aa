// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! CDR layouts of the fixture messages.
//!
//! OMG IDL and ROS 2 channels share one wire layout: the IDL structs and the
//! ROS 2 definitions declare the same members in the same order, and
//! `builtin_interfaces/Time` is `int32 sec` + `uint32 nanosec` in both.

use super::{CdrCursor, CdrEncoder};
use crate::core::value::{LaserScan, Log, PosesInFrame};
use crate::core::{
    FixtureError, FixtureMessage, LogLevel, MessageKind, Orientation, Pose, Position, Result,
    Timestamp,
};

const CODEC: &str = "CDR";

/// Encoded size of one `geometry_msgs/Pose`: seven doubles.
const POSE_SIZE: usize = 7 * 8;

fn time(encoder: &mut CdrEncoder, ts: Timestamp) -> Result<()> {
    let sec = i32::try_from(ts.sec()).map_err(|_| {
        FixtureError::encode(CODEC, format!("timestamp {}s exceeds int32 sec", ts.sec()))
    })?;
    encoder.int32(sec).uint32(ts.nanosec());
    Ok(())
}

fn pose(encoder: &mut CdrEncoder, pose: &Pose) {
    let Pose {
        position,
        orientation,
    } = pose;
    encoder
        .float64(position.x)
        .float64(position.y)
        .float64(position.z)
        .float64(orientation.x)
        .float64(orientation.y)
        .float64(orientation.z)
        .float64(orientation.w);
}

/// Encode a `Log`.
pub fn encode_log(log: &Log) -> Result<Vec<u8>> {
    let line = u32::try_from(log.line)
        .map_err(|_| FixtureError::encode(CODEC, format!("line {} exceeds uint32", log.line)))?;

    let mut encoder = CdrEncoder::with_capacity(64 + log.message.len() + log.name.len());
    time(&mut encoder, log.timestamp)?;
    encoder.uint8(log.level.code());
    encoder.string(&log.message)?;
    encoder.string(&log.name)?;
    encoder.string(&log.file)?;
    encoder.uint32(line);
    Ok(encoder.finish())
}

/// Encode a `PosesInFrame`.
pub fn encode_poses_in_frame(msg: &PosesInFrame) -> Result<Vec<u8>> {
    let mut encoder = CdrEncoder::with_capacity(32 + msg.frame_id.len() + msg.poses.len() * POSE_SIZE);
    time(&mut encoder, msg.timestamp)?;
    encoder.string(&msg.frame_id)?;
    encoder.sequence_length(msg.poses.len())?;
    for p in &msg.poses {
        pose(&mut encoder, p);
    }
    Ok(encoder.finish())
}

/// Encode a `LaserScan`.
pub fn encode_laser_scan(msg: &LaserScan) -> Result<Vec<u8>> {
    let mut encoder = CdrEncoder::with_capacity(
        128 + msg.frame_id.len() + (msg.ranges.len() + msg.intensities.len()) * 8,
    );
    time(&mut encoder, msg.timestamp)?;
    encoder.string(&msg.frame_id)?;
    pose(&mut encoder, &msg.pose);
    encoder.float64(msg.start_angle).float64(msg.end_angle);
    encoder.float64_sequence(&msg.ranges)?;
    encoder.float64_sequence(&msg.intensities)?;
    Ok(encoder.finish())
}

/// Encode any fixture message.
pub fn encode(message: &FixtureMessage) -> Result<Vec<u8>> {
    match message {
        FixtureMessage::Log(m) => encode_log(m),
        FixtureMessage::PosesInFrame(m) => encode_poses_in_frame(m),
        FixtureMessage::LaserScan(m) => encode_laser_scan(m),
    }
}

fn read_time(cursor: &mut CdrCursor<'_>) -> Result<Timestamp> {
    let sec = cursor.read_i32()?;
    let nanosec = cursor.read_u32()?;
    u64::try_from(sec)
        .ok()
        .and_then(|sec| Timestamp::from_parts(sec, nanosec))
        .ok_or_else(|| FixtureError::decode(CODEC, format!("invalid time {sec}s {nanosec}ns")))
}

fn read_pose(cursor: &mut CdrCursor<'_>) -> Result<Pose> {
    Ok(Pose {
        position: Position {
            x: cursor.read_f64()?,
            y: cursor.read_f64()?,
            z: cursor.read_f64()?,
        },
        orientation: Orientation {
            x: cursor.read_f64()?,
            y: cursor.read_f64()?,
            z: cursor.read_f64()?,
            w: cursor.read_f64()?,
        },
    })
}

fn decode_log(cursor: &mut CdrCursor<'_>) -> Result<Log> {
    let timestamp = read_time(cursor)?;
    let code = cursor.read_u8()?;
    let level = LogLevel::from_code(code)
        .ok_or_else(|| FixtureError::decode(CODEC, format!("unknown log level {code}")))?;
    Ok(Log {
        timestamp,
        level,
        message: cursor.read_string()?,
        name: cursor.read_string()?,
        file: cursor.read_string()?,
        line: u64::from(cursor.read_u32()?),
    })
}

fn decode_poses_in_frame(cursor: &mut CdrCursor<'_>) -> Result<PosesInFrame> {
    let timestamp = read_time(cursor)?;
    let frame_id = cursor.read_string()?;
    let count = cursor.read_sequence_length(POSE_SIZE)?;
    let poses = (0..count)
        .map(|_| read_pose(cursor))
        .collect::<Result<Vec<_>>>()?;
    Ok(PosesInFrame {
        timestamp,
        frame_id,
        poses,
    })
}

fn decode_laser_scan(cursor: &mut CdrCursor<'_>) -> Result<LaserScan> {
    Ok(LaserScan {
        timestamp: read_time(cursor)?,
        frame_id: cursor.read_string()?,
        pose: read_pose(cursor)?,
        start_angle: cursor.read_f64()?,
        end_angle: cursor.read_f64()?,
        ranges: cursor.read_f64_sequence()?,
        intensities: cursor.read_f64_sequence()?,
    })
}

/// Decode a payload of `kind`. Trailing bytes are an error.
pub fn decode(kind: MessageKind, data: &[u8]) -> Result<FixtureMessage> {
    let mut cursor = CdrCursor::new(data)?;
    let message = match kind {
        MessageKind::Log => FixtureMessage::Log(decode_log(&mut cursor)?),
        MessageKind::PosesInFrame => FixtureMessage::PosesInFrame(decode_poses_in_frame(&mut cursor)?),
        MessageKind::LaserScan => FixtureMessage::LaserScan(decode_laser_scan(&mut cursor)?),
    };
    if !cursor.is_at_end() {
        return Err(FixtureError::decode(
            CODEC,
            format!("{} trailing bytes after {}", cursor.remaining(), kind.type_name()),
        ));
    }
    Ok(message)
}
