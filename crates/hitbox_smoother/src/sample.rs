//! Timestamped avatar samples and the interpolation between them.

use std::time::Duration;

use hitbox_shared::Vec3;

/// Position and facing of the tracked point.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Pose {
    /// World position.
    pub position: Vec3,
    /// Forward vector. Not necessarily unit length after interpolation.
    pub forward: Vec3,
}

impl Pose {
    /// Creates a new pose.
    #[must_use]
    pub const fn new(position: Vec3, forward: Vec3) -> Self {
        Self { position, forward }
    }
}

/// One observation of the live state.
///
/// `time` is the render-clock time at which the observation was taken.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Sample {
    /// Render-clock time of the observation.
    pub time: Duration,
    /// Avatar position.
    pub position: Vec3,
    /// Avatar forward vector.
    pub forward: Vec3,
}

impl Sample {
    /// Zero-time sample at the origin facing nowhere.
    pub const ZERO: Self = Self::at_start(Vec3::ZERO, Vec3::ZERO);

    /// Creates a new sample.
    #[must_use]
    pub const fn new(time: Duration, position: Vec3, forward: Vec3) -> Self {
        Self { time, position, forward }
    }

    /// Creates a zero-time sample with the given pose.
    #[must_use]
    pub const fn at_start(position: Vec3, forward: Vec3) -> Self {
        Self::new(Duration::ZERO, position, forward)
    }

    /// The sample's pose without its timestamp.
    #[must_use]
    pub const fn pose(&self) -> Pose {
        Pose::new(self.position, self.forward)
    }

    /// Two samples are equivalent when position and forward match exactly.
    /// Time is ignored.
    #[must_use]
    pub fn is_equivalent(&self, other: &Self) -> bool {
        self.position == other.position && self.forward == other.forward
    }

    /// Interpolates from `self` towards `next` at render time `now`, both
    /// samples shifted by `delay`.
    ///
    /// The factor is `(now - start) / (end - start)` with
    /// `start = self.time + delay` and `end = next.time + delay`. It is not
    /// clamped, so clock jitter past either end extrapolates linearly. When
    /// the factor is not finite (both samples share a timestamp) the result
    /// is `self` unchanged.
    #[must_use]
    pub fn interpolate(&self, next: &Self, delay: Duration, now: Duration) -> Pose {
        let start = millis(self.time.saturating_add(delay));
        let end = millis(next.time.saturating_add(delay));
        let now = millis(now);

        #[allow(clippy::cast_possible_truncation)]
        let t = ((now - start) / (end - start)) as f32;

        if !t.is_finite() {
            return self.pose();
        }

        Pose::new(
            self.position.lerp(next.position, t),
            self.forward.lerp(next.forward, t),
        )
    }
}

#[inline]
fn millis(d: Duration) -> f64 {
    d.as_secs_f64() * 1000.0
}
