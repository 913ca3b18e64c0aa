// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Canonical value model for fixture messages.
//!
//! Every codec writes exactly the values produced here. The functions in this
//! module map a sequence index to the logical content of each message kind and
//! know nothing about wire formats; codecs convert these values into their own
//! field layouts.
//!
//! # Example
//!
//! ```
//! use robofixture::core::value::{generate, FixtureMessage};
//! use robofixture::MessageKind;
//!
//! match generate(MessageKind::Log, 2) {
//!     FixtureMessage::Log(log) => {
//!         assert_eq!(log.name, "PINK");
//!         assert_eq!(log.line, 2);
//!     }
//!     _ => unreachable!(),
//! }
//! ```

use serde::{Deserialize, Serialize};

use super::MessageKind;

/// Log names, cycled by sequence index.
pub const STATE_NAMES: [&str; 7] = ["PURPLE", "YELLOW", "PINK", "CYAN", "MAGENTA", "LIME", "GRAY"];

/// Spacing between consecutive messages on the shared timeline.
pub const NANOS_PER_INDEX: u64 = 1_000_000;

/// Nanoseconds per second.
pub const NANOS_PER_SEC: u64 = 1_000_000_000;

/// Number of poses carried by every `PosesInFrame` message.
pub const POSES_PER_FRAME: usize = 25;

/// Number of samples in `LaserScan.ranges` and `LaserScan.intensities`.
pub const SCAN_SAMPLES: usize = 1000;

/// Frame id of every `PosesInFrame` message.
pub const POSES_FRAME_ID: &str = "poses_frame";

/// Frame id of every `LaserScan` message.
pub const LASER_SCAN_FRAME_ID: &str = "laser_scan_frame";

/// Largest message count whose timeline fits in `u64` nanoseconds.
pub const MAX_MESSAGE_COUNT: u64 = u64::MAX / NANOS_PER_INDEX;

/// Point in time as a nanosecond count since the start of the fixture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Timestamp {
    nanos: u64,
}

impl Timestamp {
    /// Create a timestamp from a nanosecond count.
    pub const fn from_nanos(nanos: u64) -> Self {
        Self { nanos }
    }

    /// Create a timestamp from whole seconds and a nanosecond remainder.
    ///
    /// Returns `None` if `nanosec` is not below one second or the total
    /// overflows.
    pub fn from_parts(sec: u64, nanosec: u32) -> Option<Self> {
        if u64::from(nanosec) >= NANOS_PER_SEC {
            return None;
        }
        sec.checked_mul(NANOS_PER_SEC)
            .and_then(|n| n.checked_add(u64::from(nanosec)))
            .map(Self::from_nanos)
    }

    /// Total nanoseconds.
    pub const fn as_nanos(&self) -> u64 {
        self.nanos
    }

    /// Whole seconds.
    pub const fn sec(&self) -> u64 {
        self.nanos / NANOS_PER_SEC
    }

    /// Nanosecond remainder below one second.
    pub const fn nanosec(&self) -> u32 {
        (self.nanos % NANOS_PER_SEC) as u32
    }
}

/// Position in meters.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Position {
    /// Position with all three coordinates equal to `v`.
    pub const fn splat(v: f64) -> Self {
        Self { x: v, y: v, z: v }
    }
}

/// Orientation as a quaternion. Defaults to identity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Orientation {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub w: f64,
}

impl Orientation {
    pub const IDENTITY: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
        w: 1.0,
    };
}

impl Default for Orientation {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Pose {
    pub position: Position,
    pub orientation: Orientation,
}

/// Log severity.
///
/// Only the numeric code is ever encoded; the names live in schema metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum LogLevel {
    Unknown = 0,
    Debug = 1,
    Info = 2,
    Warning = 3,
    Error = 4,
    Fatal = 5,
}

impl LogLevel {
    /// All levels in code order.
    pub const ALL: [LogLevel; 6] = [
        LogLevel::Unknown,
        LogLevel::Debug,
        LogLevel::Info,
        LogLevel::Warning,
        LogLevel::Error,
        LogLevel::Fatal,
    ];

    /// Numeric severity code.
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Look up a level by its numeric code.
    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.get(usize::from(code)).copied()
    }

    /// Symbolic name as it appears in schemas.
    pub const fn name(self) -> &'static str {
        match self {
            LogLevel::Unknown => "UNKNOWN",
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warning => "WARNING",
            LogLevel::Error => "ERROR",
            LogLevel::Fatal => "FATAL",
        }
    }
}

/// A log line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Log {
    pub timestamp: Timestamp,
    pub level: LogLevel,
    pub message: String,
    pub name: String,
    /// Always empty in generated fixtures.
    pub file: String,
    pub line: u64,
}

/// A batch of poses expressed in one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PosesInFrame {
    pub timestamp: Timestamp,
    pub frame_id: String,
    pub poses: Vec<Pose>,
}

/// A single planar laser sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaserScan {
    pub timestamp: Timestamp,
    pub frame_id: String,
    pub pose: Pose,
    pub start_angle: f64,
    pub end_angle: f64,
    pub ranges: Vec<f64>,
    pub intensities: Vec<f64>,
}

/// One logical message of any kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FixtureMessage {
    Log(Log),
    PosesInFrame(PosesInFrame),
    LaserScan(LaserScan),
}

impl FixtureMessage {
    /// The kind of this message.
    pub fn kind(&self) -> MessageKind {
        match self {
            FixtureMessage::Log(_) => MessageKind::Log,
            FixtureMessage::PosesInFrame(_) => MessageKind::PosesInFrame,
            FixtureMessage::LaserScan(_) => MessageKind::LaserScan,
        }
    }

    /// The message's own timestamp.
    pub fn timestamp(&self) -> Timestamp {
        match self {
            FixtureMessage::Log(m) => m.timestamp,
            FixtureMessage::PosesInFrame(m) => m.timestamp,
            FixtureMessage::LaserScan(m) => m.timestamp,
        }
    }
}

/// Timeline position of sequence index `index`.
///
/// Callers keep `index` below [`MAX_MESSAGE_COUNT`].
pub fn timestamp_at(index: u64) -> Timestamp {
    Timestamp::from_nanos(index * NANOS_PER_INDEX)
}

/// Pose shared by every generated pose at `index`.
pub fn pose_at(index: u64) -> Pose {
    Pose {
        position: Position::splat(index as f64),
        orientation: Orientation::IDENTITY,
    }
}

/// `Log` value at `index`.
pub fn log_at(index: u64) -> Log {
    let level = LogLevel::ALL[(index % LogLevel::ALL.len() as u64) as usize];
    Log {
        timestamp: timestamp_at(index),
        level,
        message: format!("Message #{index}"),
        name: STATE_NAMES[(index % STATE_NAMES.len() as u64) as usize].to_string(),
        file: String::new(),
        line: index,
    }
}

/// `PosesInFrame` value at `index`.
pub fn poses_in_frame_at(index: u64) -> PosesInFrame {
    PosesInFrame {
        timestamp: timestamp_at(index),
        frame_id: POSES_FRAME_ID.to_string(),
        poses: vec![pose_at(index); POSES_PER_FRAME],
    }
}

/// `LaserScan` value at `index`.
pub fn laser_scan_at(index: u64) -> LaserScan {
    let samples: Vec<f64> = (0..SCAN_SAMPLES).map(|s| s as f64).collect();
    LaserScan {
        timestamp: timestamp_at(index),
        frame_id: LASER_SCAN_FRAME_ID.to_string(),
        pose: pose_at(index),
        start_angle: 0.0,
        end_angle: 0.0,
        intensities: samples.clone(),
        ranges: samples,
    }
}

/// Value of `kind` at `index`.
pub fn generate(kind: MessageKind, index: u64) -> FixtureMessage {
    match kind {
        MessageKind::Log => FixtureMessage::Log(log_at(index)),
        MessageKind::PosesInFrame => FixtureMessage::PosesInFrame(poses_in_frame_at(index)),
        MessageKind::LaserScan => FixtureMessage::LaserScan(laser_scan_at(index)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_parts() {
        let ts = timestamp_at(1_234);
        assert_eq!(ts.as_nanos(), 1_234_000_000);
        assert_eq!(ts.sec(), 1);
        assert_eq!(ts.nanosec(), 234_000_000);
        assert_eq!(Timestamp::from_parts(1, 234_000_000), Some(ts));
    }

    #[test]
    fn test_timestamp_from_parts_rejects_overflowing_nanos() {
        assert_eq!(Timestamp::from_parts(0, 1_000_000_000), None);
        assert_eq!(Timestamp::from_parts(u64::MAX, 0), None);
    }

    #[test]
    fn test_log_cycles_names_and_levels() {
        for i in 0..50u64 {
            let log = log_at(i);
            assert_eq!(log.name, STATE_NAMES[(i % 7) as usize]);
            assert_eq!(u64::from(log.level.code()), i % 6);
            assert_eq!(log.message, format!("Message #{i}"));
            assert_eq!(log.line, i);
            assert!(log.file.is_empty());
        }
    }

    #[test]
    fn test_poses_in_frame_shape() {
        let poses = poses_in_frame_at(7);
        assert_eq!(poses.frame_id, "poses_frame");
        assert_eq!(poses.poses.len(), POSES_PER_FRAME);
        for pose in &poses.poses {
            assert_eq!(pose.position, Position::splat(7.0));
            assert_eq!(pose.orientation, Orientation::IDENTITY);
        }
    }

    #[test]
    fn test_laser_scan_shape() {
        let scan = laser_scan_at(3);
        assert_eq!(scan.frame_id, "laser_scan_frame");
        assert_eq!(scan.ranges.len(), SCAN_SAMPLES);
        assert_eq!(scan.intensities, scan.ranges);
        assert_eq!(scan.ranges[0], 0.0);
        assert_eq!(scan.ranges[999], 999.0);
        assert_eq!(scan.pose.position, Position::splat(3.0));
        assert_eq!(scan.start_angle, 0.0);
        assert_eq!(scan.end_angle, 0.0);
    }

    #[test]
    fn test_generate_matches_kind() {
        for kind in MessageKind::ALL {
            let msg = generate(kind, 11);
            assert_eq!(msg.kind(), kind);
            assert_eq!(msg.timestamp(), timestamp_at(11));
        }
    }

    #[test]
    fn test_log_level_codes() {
        for level in LogLevel::ALL {
            assert_eq!(LogLevel::from_code(level.code()), Some(level));
        }
        assert_eq!(LogLevel::from_code(6), None);
        assert_eq!(LogLevel::Warning.name(), "WARNING");
    }
}
