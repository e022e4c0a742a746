//! # Hitbox Smoother
//!
//! Delay-compensated smoothing of a single tracked point.
//!
//! The live state reports where the avatar is *now*, but the server sees it
//! roughly one ping later. The smoother buffers one [`Sample`] per live-state
//! tick, releases each sample once `time + delay` has passed, and interpolates
//! between the last released sample and the next pending one so the marker
//! glides instead of stepping.
//!
//! ```text
//! Live ticks:     [1]  [2]  [3]  [4]  [5]
//!                  │    │    │    │    │
//! Delay:           ~~~~~~~~~~~~~~
//!                            │    │
//! Released:                 [1]  [2]   pending: [3] [4] [5]
//!                             │
//! Render time:                ▼  lerp(1 → 2)
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use std::time::Duration;
//! use hitbox_shared::Vec3;
//! use hitbox_smoother::PositionSmoother;
//!
//! let mut smoother = PositionSmoother::new(100, false);
//! smoother.ingest(1, Duration::ZERO, Vec3::ZERO, Vec3::Y);
//! smoother.ingest(2, Duration::from_millis(50), Vec3::new(10.0, 0.0, 0.0), Vec3::Y);
//!
//! // Nothing is old enough to release yet.
//! assert_eq!(smoother.compute_output(Duration::from_millis(90)).position, Vec3::ZERO);
//!
//! // Both samples have been released.
//! let pose = smoother.compute_output(Duration::from_millis(160));
//! assert_eq!(pose.position, Vec3::new(10.0, 0.0, 0.0));
//! ```
//!
//! ## Threading
//!
//! A smoother is owned by the render loop. `ingest` and `compute_output` take
//! `&mut self`, are called once per frame in that order, and never block.

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod sample;
pub mod smoother;

pub use sample::{Pose, Sample};
pub use smoother::{PositionSmoother, SMOOTHING_COMPENSATION};
