//! # Hitbox Overlay
//!
//! Per-frame wiring: settings changes in, live state in, marker out.
//!
//! ## Frame order
//!
//! 1. Drain queued [`SettingsChange`]s (the smoother is only touched here)
//! 2. If visible: read one [`LiveFrame`](crate::live::LiveFrame), ingest it,
//!    compute the smoothed pose
//! 3. The host calls [`HitboxOverlay::marker`] and draws it
//!
//! Every visibility change resets the smoother, seeded with the current live
//! pose, so motion buffered before hiding never replays after showing.

use std::time::Duration;

use hitbox_shared::MountType;
use hitbox_smoother::{Pose, PositionSmoother};

use crate::events::{SettingsChange, SettingsChannel, SettingsPublisher};
use crate::live::LiveState;
use crate::marker::{Marker, MarkerGeometry, MarkerStyle};
use crate::settings::HitboxSettings;

/// The delayed hitbox marker of one avatar.
pub struct HitboxOverlay<L: LiveState> {
    /// Where the avatar is now.
    live: L,
    /// Where the server thinks it is.
    smoother: PositionSmoother,
    /// Unit shapes.
    geometry: MarkerGeometry,
    /// Stroke colors.
    style: MarkerStyle,
    /// Mount seen on the last visible frame.
    mount: MountType,
    /// Whether the marker is drawn (and the smoother fed).
    visible: bool,
    /// Settings changes from the UI thread.
    changes: SettingsChannel,
}

impl<L: LiveState> HitboxOverlay<L> {
    /// Creates an overlay reading from `live`, configured by `settings`.
    pub fn new(live: L, settings: &HitboxSettings) -> Self {
        let mut overlay = Self {
            live,
            smoother: PositionSmoother::new(settings.ping_ms, settings.smoothing),
            geometry: MarkerGeometry::new(),
            style: MarkerStyle {
                color: settings.color,
                outline_color: settings.outline_color,
            },
            mount: MountType::None,
            visible: settings.visible,
            changes: SettingsChannel::new(),
        };
        overlay.reset();
        overlay
    }

    /// Gets a publisher for the settings UI.
    #[must_use]
    pub fn publisher(&self) -> SettingsPublisher {
        self.changes.publisher()
    }

    /// Applies a full settings object immediately.
    pub fn apply_settings(&mut self, settings: &HitboxSettings) {
        self.style.color = settings.color;
        self.style.outline_color = settings.outline_color;
        self.smoother.set_smoothing(settings.smoothing);
        self.smoother.set_ping(settings.ping_ms);
        self.set_visible(settings.visible);
    }

    /// Applies a single change immediately.
    pub fn apply_change(&mut self, change: SettingsChange) {
        match change {
            SettingsChange::Color(color) => self.style.color = color,
            SettingsChange::OutlineColor(color) => self.style.outline_color = color,
            SettingsChange::Visible(visible) => self.set_visible(visible),
            SettingsChange::ToggleVisibility => self.toggle_visibility(),
            SettingsChange::Smoothing(smoothing) => self.smoother.set_smoothing(smoothing),
            SettingsChange::Ping(ping_ms) => self.smoother.set_ping(ping_ms),
        }
    }

    /// Applies every queued change. Returns how many were applied.
    pub fn drain_changes(&mut self) -> usize {
        let pending: Vec<SettingsChange> = self.changes.drain().collect();
        let count = pending.len();
        for change in pending {
            self.apply_change(change);
        }
        count
    }

    /// Shows or hides the marker. Any actual change resets the smoother.
    pub fn set_visible(&mut self, visible: bool) {
        if self.visible == visible {
            return;
        }
        self.visible = visible;
        self.reset();
        tracing::info!("hitbox {}", if visible { "shown" } else { "hidden" });
    }

    /// Flips visibility.
    pub fn toggle_visibility(&mut self) {
        self.set_visible(!self.visible);
    }

    /// Returns true if the marker is shown.
    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    /// Drops buffered motion and holds the current live pose.
    pub fn reset(&mut self) {
        let frame = self.live.frame();
        self.mount = frame.mount;
        self.smoother.reset_to(frame.position, frame.forward);
    }

    /// Runs one frame. Returns the smoothed pose, or `None` while hidden.
    pub fn update(&mut self, render_time: Duration) -> Option<Pose> {
        self.drain_changes();

        if !self.visible {
            return None;
        }

        let frame = self.live.frame();
        self.mount = frame.mount;
        Some(
            self.smoother
                .update(frame.tick, render_time, frame.position, frame.forward),
        )
    }

    /// Marker for the last computed pose, or `None` while hidden.
    #[must_use]
    pub fn marker(&self) -> Option<Marker> {
        self.visible
            .then(|| self.geometry.build(&self.smoother.output(), self.mount, self.style))
    }

    /// The smoother, for inspection.
    #[must_use]
    pub const fn smoother(&self) -> &PositionSmoother {
        &self.smoother
    }

    /// Current stroke colors.
    #[must_use]
    pub const fn style(&self) -> MarkerStyle {
        self.style
    }

    /// Mount seen on the last visible frame.
    #[must_use]
    pub const fn mount(&self) -> MountType {
        self.mount
    }

    /// The live state source.
    #[must_use]
    pub const fn live(&self) -> &L {
        &self.live
    }
}
