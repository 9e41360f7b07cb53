// SPDX-License-Identifier: MIT OR Apache-2.0

//! Standard exit codes (BSD sysexits.h compatible)

/// Internal software error
pub const SOFTWARE: i32 = 70;

/// Input/output error
pub const IOERR: i32 = 74;

/// Configuration error
pub const CONFIG: i32 = 78;
