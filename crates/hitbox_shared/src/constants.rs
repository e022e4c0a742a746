//! # Configuration Constants
//!
//! Defaults and limits for the user-facing delay setting.

/// Default assumed latency between the live state and the server, in milliseconds.
pub const DEFAULT_PING_MS: u32 = 100;

/// Lowest delay the settings layer accepts, in milliseconds.
pub const PING_MIN_MS: u32 = 0;

/// Highest delay the settings layer accepts, in milliseconds.
pub const PING_MAX_MS: u32 = 1000;
