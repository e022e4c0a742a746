//! # Hitbox Shared
//!
//! Common types used by the position smoother and the overlay.
//!
//! ## RULE
//!
//! This crate must NEVER depend on a graphics or windowing crate.
//! Projection and stroking belong to the host.

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod color;
pub mod constants;
pub mod math;
pub mod mount;

pub use color::Color;
pub use constants::{DEFAULT_PING_MS, PING_MAX_MS, PING_MIN_MS};
pub use math::{Vec2, Vec3};
pub use mount::MountType;
