//! # Hitbox View
//!
//! Draws the avatar's hitbox where the server believes it is: one ping
//! behind the locally observed position.
//!
//! ## Architecture
//!
//! ```text
//! Live state (tick, pose, mount) ──┐
//!                                  ▼
//! Settings UI ──► SettingsChannel ──► HitboxOverlay ──► PositionSmoother
//!                                        │
//!                                        ▼
//!                               Marker (world-space polylines) ──► host renderer
//! ```
//!
//! - [`live`]: the [`LiveState`] boundary and a lock-protected shared cell
//! - [`settings`]: user settings, TOML persistence and validation
//! - [`events`]: settings changes sent from the UI thread
//! - [`marker`]: footprint circle and facing wedge in world space
//! - [`overlay`]: per-frame wiring of all of the above
//!
//! ## Example
//!
//! ```rust
//! use std::time::Duration;
//! use hitbox_shared::{MountType, Vec3};
//! use hitbox_view::{HitboxOverlay, HitboxSettings, SharedLiveState};
//!
//! let live = SharedLiveState::new();
//! let mut overlay = HitboxOverlay::new(live.clone(), &HitboxSettings::default());
//!
//! live.advance(Vec3::new(1.0, 2.0, 0.0), Vec3::Y, MountType::None);
//! overlay.update(Duration::from_millis(16));
//!
//! let marker = overlay.marker().expect("visible by default");
//! assert_eq!(marker.footprint.points.len(), 100);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod error;
pub mod events;
pub mod live;
pub mod marker;
pub mod overlay;
pub mod settings;

pub use error::{SettingsError, SettingsResult};
pub use events::{SettingsChange, SettingsChannel, SettingsPublisher};
pub use live::{LiveFrame, LiveState, SharedLiveState};
pub use marker::{Marker, MarkerGeometry, MarkerStyle, MarkerTransform, Polyline, Stroke};
pub use overlay::HitboxOverlay;
pub use settings::{parse_ping, HitboxSettings};
