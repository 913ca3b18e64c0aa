// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! ROS 1 codec adapter.

use std::io::{Cursor, Read, Write};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

use crate::core::value::{LaserScan, Log, PosesInFrame};
use crate::core::{
    Codec, FixtureError, FixtureMessage, LogLevel, MessageKind, Orientation, Pose, Position,
    Result, Timestamp,
};
use crate::encoding::CodecAdapter;

const CODEC: &str = "ROS1";

/// ROS 1 message definitions with ROS 1 payloads.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ros1LegacyCodec;

impl Ros1LegacyCodec {
    /// Create a new ROS 1 codec.
    pub fn new() -> Self {
        Self
    }
}

impl CodecAdapter for Ros1LegacyCodec {
    fn codec(&self) -> Codec {
        Codec::Ros1
    }

    fn encode(&self, message: &FixtureMessage) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        match message {
            FixtureMessage::Log(m) => write_log(&mut buf, m)?,
            FixtureMessage::PosesInFrame(m) => write_poses_in_frame(&mut buf, m)?,
            FixtureMessage::LaserScan(m) => write_laser_scan(&mut buf, m)?,
        }
        Ok(buf)
    }

    fn decode(&self, kind: MessageKind, data: &[u8]) -> Result<FixtureMessage> {
        let mut cursor = Cursor::new(data);
        let message = match kind {
            MessageKind::Log => FixtureMessage::Log(read_log(&mut cursor)?),
            MessageKind::PosesInFrame => FixtureMessage::PosesInFrame(read_poses_in_frame(&mut cursor)?),
            MessageKind::LaserScan => FixtureMessage::LaserScan(read_laser_scan(&mut cursor)?),
        };
        let consumed = cursor.position() as usize;
        if consumed != data.len() {
            return Err(FixtureError::decode(
                CODEC,
                format!("{} trailing bytes after {}", data.len() - consumed, kind.type_name()),
            ));
        }
        Ok(message)
    }
}

// =============================================================================
// Encoding
// =============================================================================

fn length(len: usize) -> Result<u32> {
    u32::try_from(len)
        .map_err(|_| FixtureError::encode(CODEC, format!("length {len} exceeds uint32 prefix")))
}

fn write_time<W: Write>(w: &mut W, ts: Timestamp) -> Result<()> {
    let secs = u32::try_from(ts.sec())
        .map_err(|_| FixtureError::encode(CODEC, format!("timestamp {}s exceeds uint32 secs", ts.sec())))?;
    w.write_u32::<LittleEndian>(secs)?;
    w.write_u32::<LittleEndian>(ts.nanosec())?;
    Ok(())
}

fn write_string<W: Write>(w: &mut W, s: &str) -> Result<()> {
    w.write_u32::<LittleEndian>(length(s.len())?)?;
    w.write_all(s.as_bytes())?;
    Ok(())
}

fn write_pose<W: Write>(w: &mut W, pose: &Pose) -> Result<()> {
    for v in [
        pose.position.x,
        pose.position.y,
        pose.position.z,
        pose.orientation.x,
        pose.orientation.y,
        pose.orientation.z,
        pose.orientation.w,
    ] {
        w.write_f64::<LittleEndian>(v)?;
    }
    Ok(())
}

fn write_f64_array<W: Write>(w: &mut W, values: &[f64]) -> Result<()> {
    w.write_u32::<LittleEndian>(length(values.len())?)?;
    for &v in values {
        w.write_f64::<LittleEndian>(v)?;
    }
    Ok(())
}

fn write_log<W: Write>(w: &mut W, log: &Log) -> Result<()> {
    let line = u32::try_from(log.line)
        .map_err(|_| FixtureError::encode(CODEC, format!("line {} exceeds uint32", log.line)))?;
    write_time(w, log.timestamp)?;
    w.write_u8(log.level.code())?;
    write_string(w, &log.message)?;
    write_string(w, &log.name)?;
    write_string(w, &log.file)?;
    w.write_u32::<LittleEndian>(line)?;
    Ok(())
}

fn write_poses_in_frame<W: Write>(w: &mut W, msg: &PosesInFrame) -> Result<()> {
    write_time(w, msg.timestamp)?;
    write_string(w, &msg.frame_id)?;
    w.write_u32::<LittleEndian>(length(msg.poses.len())?)?;
    for pose in &msg.poses {
        write_pose(w, pose)?;
    }
    Ok(())
}

fn write_laser_scan<W: Write>(w: &mut W, msg: &LaserScan) -> Result<()> {
    write_time(w, msg.timestamp)?;
    write_string(w, &msg.frame_id)?;
    write_pose(w, &msg.pose)?;
    w.write_f64::<LittleEndian>(msg.start_angle)?;
    w.write_f64::<LittleEndian>(msg.end_angle)?;
    write_f64_array(w, &msg.ranges)?;
    write_f64_array(w, &msg.intensities)?;
    Ok(())
}

// =============================================================================
// Decoding
// =============================================================================

fn eof(e: std::io::Error) -> FixtureError {
    FixtureError::decode(CODEC, format!("unexpected end of payload: {e}"))
}

fn remaining(r: &Cursor<&[u8]>) -> usize {
    r.get_ref().len().saturating_sub(r.position() as usize)
}

fn read_u32(r: &mut Cursor<&[u8]>) -> Result<u32> {
    r.read_u32::<LittleEndian>().map_err(eof)
}

fn read_f64(r: &mut Cursor<&[u8]>) -> Result<f64> {
    r.read_f64::<LittleEndian>().map_err(eof)
}

fn read_len(r: &mut Cursor<&[u8]>, element_size: usize) -> Result<usize> {
    let len = read_u32(r)? as usize;
    if len.saturating_mul(element_size) > remaining(r) {
        return Err(FixtureError::buffer_too_short(
            len.saturating_mul(element_size),
            remaining(r),
            r.position() as usize,
        ));
    }
    Ok(len)
}

fn read_time(r: &mut Cursor<&[u8]>) -> Result<Timestamp> {
    let secs = read_u32(r)?;
    let nsecs = read_u32(r)?;
    Timestamp::from_parts(u64::from(secs), nsecs)
        .ok_or_else(|| FixtureError::decode(CODEC, format!("invalid time {secs}s {nsecs}ns")))
}

fn read_string(r: &mut Cursor<&[u8]>) -> Result<String> {
    let len = read_len(r, 1)?;
    let mut bytes = vec![0u8; len];
    r.read_exact(&mut bytes).map_err(eof)?;
    String::from_utf8(bytes).map_err(|e| FixtureError::decode(CODEC, e.to_string()))
}

fn read_pose(r: &mut Cursor<&[u8]>) -> Result<Pose> {
    Ok(Pose {
        position: Position {
            x: read_f64(r)?,
            y: read_f64(r)?,
            z: read_f64(r)?,
        },
        orientation: Orientation {
            x: read_f64(r)?,
            y: read_f64(r)?,
            z: read_f64(r)?,
            w: read_f64(r)?,
        },
    })
}

fn read_f64_array(r: &mut Cursor<&[u8]>) -> Result<Vec<f64>> {
    let len = read_len(r, 8)?;
    (0..len).map(|_| read_f64(r)).collect()
}

fn read_log(r: &mut Cursor<&[u8]>) -> Result<Log> {
    let timestamp = read_time(r)?;
    let code = r.read_u8().map_err(eof)?;
    let level = LogLevel::from_code(code)
        .ok_or_else(|| FixtureError::decode(CODEC, format!("unknown log level {code}")))?;
    Ok(Log {
        timestamp,
        level,
        message: read_string(r)?,
        name: read_string(r)?,
        file: read_string(r)?,
        line: u64::from(read_u32(r)?),
    })
}

fn read_poses_in_frame(r: &mut Cursor<&[u8]>) -> Result<PosesInFrame> {
    let timestamp = read_time(r)?;
    let frame_id = read_string(r)?;
    let count = read_len(r, 7 * 8)?;
    let poses = (0..count).map(|_| read_pose(r)).collect::<Result<Vec<_>>>()?;
    Ok(PosesInFrame {
        timestamp,
        frame_id,
        poses,
    })
}

fn read_laser_scan(r: &mut Cursor<&[u8]>) -> Result<LaserScan> {
    Ok(LaserScan {
        timestamp: read_time(r)?,
        frame_id: read_string(r)?,
        pose: read_pose(r)?,
        start_angle: read_f64(r)?,
        end_angle: read_f64(r)?,
        ranges: read_f64_array(r)?,
        intensities: read_f64_array(r)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::value::{generate, laser_scan_at, log_at};

    #[test]
    fn test_log_layout() {
        let data = Ros1LegacyCodec::new()
            .encode(&FixtureMessage::Log(log_at(1_500)))
            .unwrap();
        assert_eq!(data[0..4], 1u32.to_le_bytes());
        assert_eq!(data[4..8], 500_000_000u32.to_le_bytes());
        assert_eq!(data[8], 0); // 1500 % 6
        // no padding, no terminator
        assert_eq!(data[9..13], 13u32.to_le_bytes());
        assert_eq!(&data[13..26], b"Message #1500");
        let tail = data.len() - 4;
        assert_eq!(data[tail..], 1_500u32.to_le_bytes());
    }

    #[test]
    fn test_laser_scan_size() {
        let data = Ros1LegacyCodec::new()
            .encode(&FixtureMessage::LaserScan(laser_scan_at(0)))
            .unwrap();
        let frame = "laser_scan_frame".len();
        assert_eq!(data.len(), 8 + 4 + frame + 56 + 16 + 2 * (4 + 1000 * 8));
    }

    #[test]
    fn test_decode_inverts_encode() {
        let codec = Ros1LegacyCodec::new();
        for kind in MessageKind::ALL {
            for i in [0, 6, 7, 4_321] {
                let value = generate(kind, i);
                let data = codec.encode(&value).unwrap();
                assert_eq!(codec.decode(kind, &data).unwrap(), value);
            }
        }
    }

    #[test]
    fn test_line_out_of_range() {
        let mut log = log_at(0);
        log.line = u64::MAX;
        assert!(matches!(
            Ros1LegacyCodec::new().encode(&FixtureMessage::Log(log)),
            Err(FixtureError::Encode { .. })
        ));
    }

    #[test]
    fn test_decode_truncated() {
        let codec = Ros1LegacyCodec::new();
        let data = codec.encode(&generate(MessageKind::Log, 3)).unwrap();
        assert!(codec.decode(MessageKind::Log, &data[..data.len() - 1]).is_err());
    }

    #[test]
    fn test_decode_wrong_kind() {
        let codec = Ros1LegacyCodec::new();
        let data = codec.encode(&generate(MessageKind::Log, 3)).unwrap();
        assert!(codec.decode(MessageKind::LaserScan, &data).is_err());
    }
}
