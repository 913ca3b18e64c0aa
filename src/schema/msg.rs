// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! ROS message definitions for the fixture messages.
//!
//! Definitions follow the concatenated format used in MCAP `ros1msg` and
//! `ros2msg` schemas: the root definition first, then each dependency under a
//! separator line and a `MSG: <type>` header.

/// Separator between concatenated definitions.
pub const SEPARATOR: &str =
    "================================================================================";

macro_rules! sep {
    () => {
        "================================================================================\n"
    };
}

macro_rules! log_body {
    ($time:literal) => {
        concat!(
            $time,
            " timestamp\n",
            "uint8 UNKNOWN=0\n",
            "uint8 DEBUG=1\n",
            "uint8 INFO=2\n",
            "uint8 WARNING=3\n",
            "uint8 ERROR=4\n",
            "uint8 FATAL=5\n",
            "uint8 level\n",
            "string message\n",
            "string name\n",
            "string file\n",
            "uint32 line\n",
        )
    };
}

macro_rules! pose_deps {
    (ros1) => {
        concat!(
            pose_deps!(@common ""),
            "float64 x\n",
            "float64 y\n",
            "float64 z\n",
            "float64 w\n",
        )
    };
    (ros2) => {
        concat!(
            pose_deps!(@common "msg/"),
            "float64 x 0\n",
            "float64 y 0\n",
            "float64 z 0\n",
            "float64 w 1\n",
        )
    };
    (@common $pkg:literal) => {
        concat!(
            sep!(),
            "MSG: geometry_msgs/", $pkg, "Pose\n",
            "geometry_msgs/Point position\n",
            "geometry_msgs/Quaternion orientation\n",
            sep!(),
            "MSG: geometry_msgs/", $pkg, "Point\n",
            "float64 x\n",
            "float64 y\n",
            "float64 z\n",
            sep!(),
            "MSG: geometry_msgs/", $pkg, "Quaternion\n",
        )
    };
}

macro_rules! ros2_time_dep {
    () => {
        concat!(
            sep!(),
            "MSG: builtin_interfaces/msg/Time\n",
            "int32 sec\n",
            "uint32 nanosec\n",
        )
    };
}

/// ROS 1 definitions (`ros1msg`).
pub mod ros1 {
    /// `foxglove_msgs/Log`
    pub const LOG: &str = log_body!("time");

    /// `foxglove_msgs/PosesInFrame`
    pub const POSES_IN_FRAME: &str = concat!(
        "time timestamp\n",
        "string frame_id\n",
        "geometry_msgs/Pose[] poses\n",
        pose_deps!(ros1),
    );

    /// `foxglove_msgs/LaserScan`
    pub const LASER_SCAN: &str = concat!(
        "time timestamp\n",
        "string frame_id\n",
        "geometry_msgs/Pose pose\n",
        "float64 start_angle\n",
        "float64 end_angle\n",
        "float64[] ranges\n",
        "float64[] intensities\n",
        pose_deps!(ros1),
    );
}

/// ROS 2 definitions (`ros2msg`).
pub mod ros2 {
    /// `foxglove_msgs/msg/Log`
    pub const LOG: &str = concat!(log_body!("builtin_interfaces/Time"), ros2_time_dep!());

    /// `foxglove_msgs/msg/PosesInFrame`
    pub const POSES_IN_FRAME: &str = concat!(
        "builtin_interfaces/Time timestamp\n",
        "string frame_id\n",
        "geometry_msgs/Pose[] poses\n",
        ros2_time_dep!(),
        pose_deps!(ros2),
    );

    /// `foxglove_msgs/msg/LaserScan`
    pub const LASER_SCAN: &str = concat!(
        "builtin_interfaces/Time timestamp\n",
        "string frame_id\n",
        "geometry_msgs/Pose pose\n",
        "float64 start_angle\n",
        "float64 end_angle\n",
        "float64[] ranges\n",
        "float64[] intensities\n",
        ros2_time_dep!(),
        pose_deps!(ros2),
    );
}

/// The root definition of a concatenated schema (text before the first separator).
pub fn root_definition(schema: &str) -> &str {
    schema.split(SEPARATOR).next().unwrap_or(schema)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_definition_stops_at_separator() {
        let root = root_definition(ros2::POSES_IN_FRAME);
        assert!(root.contains("geometry_msgs/Pose[] poses"));
        assert!(!root.contains("MSG:"));
    }

    #[test]
    fn test_dependencies_are_listed() {
        assert!(ros1::LASER_SCAN.contains("MSG: geometry_msgs/Quaternion\n"));
        assert!(ros2::LASER_SCAN.contains("MSG: geometry_msgs/msg/Quaternion\n"));
        assert!(ros2::LOG.contains("MSG: builtin_interfaces/msg/Time\n"));
        assert!(!ros1::LOG.contains(SEPARATOR));
    }
}
