//! Settings changes sent from the settings UI to the render loop.
//!
//! The UI never touches the smoother. It sends a [`SettingsChange`] through
//! a [`SettingsPublisher`]; the overlay drains the channel at the start of
//! each frame.

use crossbeam_channel::{Receiver, Sender};
use hitbox_shared::Color;

use crate::error::{SettingsError, SettingsResult};
use crate::settings::{check_ping, parse_ping, HitboxSettings};

/// One user-initiated settings change.
#[derive(Clone, Debug, PartialEq)]
pub enum SettingsChange {
    /// New marker color.
    Color(Color),
    /// New outline color.
    OutlineColor(Color),
    /// Show or hide the marker.
    Visible(bool),
    /// The toggle key was pressed.
    ToggleVisibility,
    /// Turn interpolation on or off.
    Smoothing(bool),
    /// New ping in milliseconds (already validated).
    Ping(u32),
}

/// Receiving end, owned by the overlay.
#[derive(Debug)]
pub struct SettingsChannel {
    sender: Sender<SettingsChange>,
    receiver: Receiver<SettingsChange>,
}

impl SettingsChannel {
    /// Creates a new unbounded channel.
    #[must_use]
    pub fn new() -> Self {
        let (sender, receiver) = crossbeam_channel::unbounded();
        Self { sender, receiver }
    }

    /// Gets a publisher for another thread.
    #[must_use]
    pub fn publisher(&self) -> SettingsPublisher {
        SettingsPublisher {
            sender: self.sender.clone(),
        }
    }

    /// Takes every queued change without blocking.
    pub fn drain(&self) -> impl Iterator<Item = SettingsChange> + '_ {
        self.receiver.try_iter()
    }

    /// Number of queued changes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.receiver.len()
    }

    /// Returns true if no change is queued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.receiver.is_empty()
    }
}

impl Default for SettingsChannel {
    fn default() -> Self {
        Self::new()
    }
}

/// Sending end, handed to the settings UI.
#[derive(Clone, Debug)]
pub struct SettingsPublisher {
    sender: Sender<SettingsChange>,
}

impl SettingsPublisher {
    /// Sends a change.
    ///
    /// # Errors
    /// Returns [`SettingsError::ChannelClosed`] if the overlay was dropped.
    pub fn send(&self, change: SettingsChange) -> SettingsResult<()> {
        self.sender
            .send(change)
            .map_err(|_| SettingsError::ChannelClosed)
    }

    /// Sends every value of `settings`, as when a module first loads.
    ///
    /// # Errors
    /// Returns a validation error without sending anything, or
    /// [`SettingsError::ChannelClosed`].
    pub fn publish_all(&self, settings: &HitboxSettings) -> SettingsResult<()> {
        settings.validate()?;
        self.send(SettingsChange::Color(settings.color))?;
        self.send(SettingsChange::OutlineColor(settings.outline_color))?;
        self.send(SettingsChange::Smoothing(settings.smoothing))?;
        self.send(SettingsChange::Ping(settings.ping_ms))?;
        self.send(SettingsChange::Visible(settings.visible))
    }

    /// Requests a new marker color.
    ///
    /// # Errors
    /// Returns [`SettingsError::ChannelClosed`] if the overlay was dropped.
    pub fn set_color(&self, color: Color) -> SettingsResult<()> {
        self.send(SettingsChange::Color(color))
    }

    /// Requests a new outline color.
    ///
    /// # Errors
    /// Returns [`SettingsError::ChannelClosed`] if the overlay was dropped.
    pub fn set_outline_color(&self, color: Color) -> SettingsResult<()> {
        self.send(SettingsChange::OutlineColor(color))
    }

    /// Shows or hides the marker.
    ///
    /// # Errors
    /// Returns [`SettingsError::ChannelClosed`] if the overlay was dropped.
    pub fn set_visible(&self, visible: bool) -> SettingsResult<()> {
        self.send(SettingsChange::Visible(visible))
    }

    /// Flips visibility (the toggle key binding).
    ///
    /// # Errors
    /// Returns [`SettingsError::ChannelClosed`] if the overlay was dropped.
    pub fn toggle_visibility(&self) -> SettingsResult<()> {
        self.send(SettingsChange::ToggleVisibility)
    }

    /// Turns interpolation on or off.
    ///
    /// # Errors
    /// Returns [`SettingsError::ChannelClosed`] if the overlay was dropped.
    pub fn set_smoothing(&self, smoothing: bool) -> SettingsResult<()> {
        self.send(SettingsChange::Smoothing(smoothing))
    }

    /// Requests a new ping after checking the slider range.
    ///
    /// # Errors
    /// Returns [`SettingsError::PingOutOfRange`] or
    /// [`SettingsError::ChannelClosed`].
    pub fn set_ping(&self, ping_ms: u32) -> SettingsResult<()> {
        let ping_ms = check_ping(i64::from(ping_ms))?;
        self.send(SettingsChange::Ping(ping_ms))
    }

    /// Requests a new ping from the slider's text box.
    ///
    /// # Errors
    /// Returns any error of [`parse_ping`], or [`SettingsError::ChannelClosed`].
    pub fn set_ping_text(&self, text: &str) -> SettingsResult<()> {
        let ping_ms = parse_ping(text)?;
        self.send(SettingsChange::Ping(ping_ms))
    }
}
