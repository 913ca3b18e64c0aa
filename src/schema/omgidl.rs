// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! OMG IDL schema text for the fixture messages.
//!
//! Each schema is self-contained: dependent modules are repeated in every
//! root schema so a reader needs no external type registry.

macro_rules! time_idl {
    () => {
        r#"
module builtin_interfaces {
module msg {
struct Time {
  int32 sec;
  uint32 nanosec;
};
};
};
"#
    };
}

macro_rules! pose_idl {
    () => {
        r#"
module geometry_msgs {
module msg {
struct Point {
  double x;
  double y;
  double z;
};

struct Quaternion {
  @default (value=0.0)
  double x;
  @default (value=0.0)
  double y;
  @default (value=0.0)
  double z;
  @default (value=1.0)
  double w;
};

struct Pose {
  geometry_msgs::msg::Point position;
  geometry_msgs::msg::Quaternion orientation;
};
};
};
"#
    };
}

/// `foxglove_msgs::msg::Log`
pub const LOG: &str = concat!(
    time_idl!(),
    r#"
module foxglove_msgs {
module msg {
module Log_Constants {
  const uint8 UNKNOWN = 0;
  const uint8 DEBUG = 1;
  const uint8 INFO = 2;
  const uint8 WARNING = 3;
  const uint8 ERROR = 4;
  const uint8 FATAL = 5;
};

struct Log {
  builtin_interfaces::msg::Time timestamp;
  uint8 level;
  string message;
  string name;
  string file;
  uint32 line;
};
};
};
"#
);

/// `foxglove_msgs::msg::PosesInFrame`
pub const POSES_IN_FRAME: &str = concat!(
    time_idl!(),
    pose_idl!(),
    r#"
module foxglove_msgs {
module msg {
struct PosesInFrame {
  builtin_interfaces::msg::Time timestamp;
  string frame_id;
  sequence<geometry_msgs::msg::Pose> poses;
};
};
};
"#
);

/// `foxglove_msgs::msg::LaserScan`
pub const LASER_SCAN: &str = concat!(
    time_idl!(),
    pose_idl!(),
    r#"
module foxglove_msgs {
module msg {
struct LaserScan {
  builtin_interfaces::msg::Time timestamp;
  string frame_id;
  geometry_msgs::msg::Pose pose;
  double start_angle;
  double end_angle;
  sequence<double> ranges;
  sequence<double> intensities;
};
};
};
"#
);
