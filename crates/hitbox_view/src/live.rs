//! Live avatar state: the overlay's only view of the game.
//!
//! The host reads the game's shared-memory link on its own thread and
//! publishes [`LiveFrame`]s into a [`SharedLiveState`]; the render loop pulls
//! them through the [`LiveState`] trait once per frame.

use std::sync::Arc;

use hitbox_shared::{MountType, Vec3};
use parking_lot::RwLock;

/// Source of the avatar's current state.
pub trait LiveState {
    /// Tick counter of the live state. Advances whenever the game writes a
    /// new state; never decreases.
    fn tick(&self) -> u32;

    /// Avatar position.
    fn avatar_position(&self) -> Vec3;

    /// Avatar forward vector.
    fn avatar_forward(&self) -> Vec3;

    /// Current mount.
    fn current_mount(&self) -> MountType;

    /// Reads everything at once.
    ///
    /// Implementations backed by a lock should override this to read under a
    /// single guard so the tick and the pose are consistent.
    fn frame(&self) -> LiveFrame {
        LiveFrame {
            tick: self.tick(),
            position: self.avatar_position(),
            forward: self.avatar_forward(),
            mount: self.current_mount(),
        }
    }
}

/// One consistent read of the live state.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LiveFrame {
    /// Tick counter.
    pub tick: u32,
    /// Avatar position.
    pub position: Vec3,
    /// Avatar forward vector.
    pub forward: Vec3,
    /// Current mount.
    pub mount: MountType,
}

impl LiveState for LiveFrame {
    fn tick(&self) -> u32 {
        self.tick
    }

    fn avatar_position(&self) -> Vec3 {
        self.position
    }

    fn avatar_forward(&self) -> Vec3 {
        self.forward
    }

    fn current_mount(&self) -> MountType {
        self.mount
    }

    fn frame(&self) -> LiveFrame {
        *self
    }
}

/// Live state shared between a feeder thread and the render loop.
///
/// Cloning yields another handle to the same state.
#[derive(Clone, Debug, Default)]
pub struct SharedLiveState {
    inner: Arc<RwLock<LiveFrame>>,
}

impl SharedLiveState {
    /// Creates a state at tick 0, at the origin, on foot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole frame.
    pub fn publish(&self, frame: LiveFrame) {
        *self.inner.write() = frame;
    }

    /// Advances the tick counter and stores a new pose. Returns the new tick.
    pub fn advance(&self, position: Vec3, forward: Vec3, mount: MountType) -> u32 {
        let mut frame = self.inner.write();
        frame.tick = frame.tick.wrapping_add(1);
        frame.position = position;
        frame.forward = forward;
        frame.mount = mount;
        frame.tick
    }
}

impl LiveState for SharedLiveState {
    fn tick(&self) -> u32 {
        self.inner.read().tick
    }

    fn avatar_position(&self) -> Vec3 {
        self.inner.read().position
    }

    fn avatar_forward(&self) -> Vec3 {
        self.inner.read().forward
    }

    fn current_mount(&self) -> MountType {
        self.inner.read().mount
    }

    fn frame(&self) -> LiveFrame {
        *self.inner.read()
    }
}
