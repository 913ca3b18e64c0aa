// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! CDR (Common Data Representation) module.
//!
//! Provides the classic CDR encoder and cursor, the fixture message layouts,
//! and the two CDR-based adapters (OMG IDL and ROS 2).

pub mod codec;
pub mod cursor;
pub mod encoder;
pub mod messages;

pub use codec::{OmgIdlCdrCodec, Ros2LegacyCodec};
pub use cursor::{CdrCursor, CDR_HEADER_SIZE};
pub use encoder::{CdrEncoder, EncapsulationKind};
