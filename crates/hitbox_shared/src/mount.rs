//! Mount types reported by the live state and their hitbox footprints.

use serde::{Deserialize, Serialize};

use crate::math::Vec2;

/// What the avatar is currently riding.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum MountType {
    /// On foot.
    #[default]
    None = 0,
    /// Raptor.
    Raptor = 1,
    /// Springer.
    Springer = 2,
    /// Skimmer.
    Skimmer = 3,
    /// Jackal.
    Jackal = 4,
    /// Griffon.
    Griffon = 5,
    /// Roller beetle.
    RollerBeetle = 6,
    /// Warclaw.
    Warclaw = 7,
    /// Skyscale.
    Skyscale = 8,
    /// Skiff.
    Skiff = 9,
    /// Siege turtle.
    SiegeTurtle = 10,
}

impl MountType {
    /// Horizontal footprint scale of the hitbox (width, length) in world units.
    ///
    /// Skimmer and Skiff sizes are estimates.
    #[must_use]
    pub const fn footprint(self) -> Vec2 {
        match self {
            Self::None => Vec2::splat(1.0),
            Self::Raptor | Self::RollerBeetle => Vec2::splat(2.8),
            Self::Springer | Self::Jackal => Vec2::splat(2.2),
            Self::Skimmer => Vec2::splat(3.1),
            Self::Griffon | Self::Skyscale => Vec2::splat(2.7),
            Self::Warclaw => Vec2::splat(1.7),
            Self::Skiff => Vec2::new(3.1, 11.1),
            Self::SiegeTurtle => Vec2::splat(3.9),
        }
    }
}
