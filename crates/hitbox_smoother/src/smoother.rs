//! # Position Smoother
//!
//! Buffers live-state samples and replays them one delay later.
//!
//! ## Per-frame flow
//!
//! 1. [`PositionSmoother::ingest`] takes at most one sample per live-state
//!    tick and drops it if it matches the last one queued (standing still
//!    does not grow the queue).
//! 2. [`PositionSmoother::compute_output`] releases every sample whose
//!    `time + delay` has passed, then either holds the last released sample
//!    or interpolates towards the next pending one.
//!
//! With smoothing enabled the effective delay grows by
//! [`SMOOTHING_COMPENSATION`], so the marker interpolates towards a sample it
//! already has instead of snapping when the next one is released.

use std::collections::VecDeque;
use std::time::Duration;

use hitbox_shared::Vec3;

use crate::sample::{Pose, Sample};

/// Extra delay applied while smoothing: 100/6 ms, about one 60 Hz frame.
pub const SMOOTHING_COMPENSATION: Duration = Duration::from_nanos(100_000_000 / 6);

/// Time-delayed smoother for one tracked point.
#[derive(Clone, Debug)]
pub struct PositionSmoother {
    /// Samples waiting for release, oldest first.
    pending: VecDeque<Sample>,
    /// Most recently released sample.
    last_released: Sample,
    /// Most recently queued sample, for dedup only.
    last_enqueued: Option<Sample>,
    /// Tick at which the last sample was taken.
    last_observed_tick: u32,
    /// Base delay (the configured ping).
    delay: Duration,
    /// Interpolate instead of holding.
    smoothing: bool,
    /// Output of the last `compute_output` call.
    output: Pose,
}

impl PositionSmoother {
    /// Creates a smoother with the given base delay.
    ///
    /// # Arguments
    /// * `delay_ms` - Assumed latency to lag behind by (milliseconds)
    /// * `smoothing` - Interpolate between samples instead of stepping
    #[must_use]
    pub fn new(delay_ms: u32, smoothing: bool) -> Self {
        let mut smoother = Self {
            pending: VecDeque::with_capacity(64),
            last_released: Sample::ZERO,
            last_enqueued: None,
            last_observed_tick: 0,
            delay: Duration::from_millis(u64::from(delay_ms)),
            smoothing,
            output: Pose::default(),
        };
        smoother.reset();
        smoother
    }

    /// Takes a sample if the live state advanced since the last call.
    ///
    /// Call once per render frame with the current tick counter and render
    /// time. Returns true if a sample was queued.
    pub fn ingest(&mut self, tick: u32, time: Duration, position: Vec3, forward: Vec3) -> bool {
        if tick <= self.last_observed_tick {
            return false;
        }
        self.last_observed_tick = tick;

        let candidate = Sample::new(time, position, forward);

        // Don't queue the same pose twice in a row
        if self
            .last_enqueued
            .is_some_and(|last| last.is_equivalent(&candidate))
        {
            tracing::trace!("tick {}: pose unchanged, sample dropped", tick);
            return false;
        }

        self.last_enqueued = Some(candidate);
        self.pending.push_back(candidate);
        tracing::trace!("tick {}: sample queued ({} pending)", tick, self.pending.len());
        true
    }

    /// Releases due samples and recomputes the output pose.
    ///
    /// Call once per render frame, after [`Self::ingest`].
    pub fn compute_output(&mut self, render_time: Duration) -> Pose {
        let delay = self.effective_delay();

        while let Some(front) = self.pending.front() {
            if front.time.saturating_add(delay) > render_time {
                break;
            }
            self.last_released = *front;
            self.pending.pop_front();
        }

        self.output = match self.pending.front() {
            Some(next) if self.smoothing => {
                self.last_released.interpolate(next, delay, render_time)
            }
            _ => self.last_released.pose(),
        };
        self.output
    }

    /// Ingests and computes in one call, using `now` as both the sample time
    /// and the render time.
    pub fn update(&mut self, tick: u32, now: Duration, position: Vec3, forward: Vec3) -> Pose {
        self.ingest(tick, now, position, forward);
        self.compute_output(now)
    }

    /// Drops all buffered motion and holds the zero sample.
    pub fn reset(&mut self) {
        self.reset_to(Vec3::ZERO, Vec3::ZERO);
    }

    /// Drops all buffered motion and holds a zero-time sample with the given pose.
    ///
    /// The tick counter is kept: a reset never re-admits a tick that was
    /// already observed.
    pub fn reset_to(&mut self, position: Vec3, forward: Vec3) {
        let dropped = self.pending.len();
        self.pending.clear();
        self.last_enqueued = None;
        self.last_released = Sample::at_start(position, forward);
        self.output = self.last_released.pose();
        tracing::debug!("smoother reset, {} pending samples dropped", dropped);
    }

    /// Base delay plus the smoothing compensation when smoothing is on.
    #[must_use]
    pub fn effective_delay(&self) -> Duration {
        if self.smoothing {
            self.delay + SMOOTHING_COMPENSATION
        } else {
            self.delay
        }
    }

    /// Effective delay in whole milliseconds (truncated).
    #[must_use]
    pub fn ping(&self) -> u32 {
        u32::try_from(self.effective_delay().as_millis()).unwrap_or(u32::MAX)
    }

    /// Sets the base delay. The smoothing compensation is never stored here,
    /// so `set_ping(p)` followed by `ping()` returns `p` plus the compensation
    /// while smoothing is on.
    pub fn set_ping(&mut self, ping_ms: u32) {
        self.set_delay_ms(ping_ms);
    }

    /// Base delay in whole milliseconds.
    #[must_use]
    pub fn delay_ms(&self) -> u32 {
        u32::try_from(self.delay.as_millis()).unwrap_or(u32::MAX)
    }

    /// Sets the base delay. Takes effect on the next `compute_output`.
    pub fn set_delay_ms(&mut self, delay_ms: u32) {
        self.delay = Duration::from_millis(u64::from(delay_ms));
        tracing::debug!("smoother delay set to {} ms", delay_ms);
    }

    /// Returns true if output is interpolated.
    #[must_use]
    pub const fn smoothing(&self) -> bool {
        self.smoothing
    }

    /// Enables or disables interpolation (and the smoothing compensation).
    pub fn set_smoothing(&mut self, smoothing: bool) {
        self.smoothing = smoothing;
        tracing::debug!("smoother smoothing set to {}", smoothing);
    }

    /// Output of the last `compute_output` call.
    #[must_use]
    pub const fn output(&self) -> Pose {
        self.output
    }

    /// Output position.
    #[must_use]
    pub const fn position(&self) -> Vec3 {
        self.output.position
    }

    /// Output forward vector. Not necessarily unit length.
    #[must_use]
    pub const fn forward(&self) -> Vec3 {
        self.output.forward
    }

    /// Samples waiting for release, oldest first.
    pub fn pending(&self) -> impl Iterator<Item = &Sample> + '_ {
        self.pending.iter()
    }

    /// Number of samples waiting for release.
    #[must_use]
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Most recently released sample.
    #[must_use]
    pub const fn last_released(&self) -> &Sample {
        &self.last_released
    }

    /// Most recently queued sample, if any since the last reset.
    #[must_use]
    pub const fn last_enqueued(&self) -> Option<&Sample> {
        self.last_enqueued.as_ref()
    }

    /// Tick at which the last sample was taken.
    #[must_use]
    pub const fn last_observed_tick(&self) -> u32 {
        self.last_observed_tick
    }
}

impl Default for PositionSmoother {
    fn default() -> Self {
        Self::new(0, true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn at_x(x: f32) -> Vec3 {
        Vec3::new(x, 0.0, 0.0)
    }

    #[test]
    fn test_end_to_end_hold() {
        let mut smoother = PositionSmoother::new(100, false);

        assert!(smoother.ingest(1, ms(0), at_x(0.0), Vec3::Y));
        assert!(smoother.ingest(2, ms(50), at_x(10.0), Vec3::Y));

        // 0 + 100 > 90: nothing released yet
        assert_eq!(smoother.compute_output(ms(90)).position, at_x(0.0));
        assert_eq!(smoother.pending_len(), 2);

        // 0 + 100 <= 160 and 50 + 100 <= 160: both released
        assert_eq!(smoother.compute_output(ms(160)).position, at_x(10.0));
        assert_eq!(smoother.pending_len(), 0);
        assert_eq!(smoother.last_released().time, ms(50));
    }

    #[test]
    fn test_dedup_stationary() {
        let mut smoother = PositionSmoother::new(1000, true);

        assert!(smoother.ingest(1, ms(0), at_x(1.0), Vec3::Y));
        for tick in 2..20 {
            assert!(!smoother.ingest(tick, ms(u64::from(tick) * 20), at_x(1.0), Vec3::Y));
        }
        assert_eq!(smoother.pending_len(), 1);
        assert_eq!(smoother.last_observed_tick(), 19);

        // Turning in place is a new pose
        assert!(smoother.ingest(20, ms(400), at_x(1.0), Vec3::X));
        assert_eq!(smoother.pending_len(), 2);
    }

    #[test]
    fn test_tick_gating() {
        let mut smoother = PositionSmoother::new(100, true);

        assert!(smoother.ingest(5, ms(0), at_x(1.0), Vec3::Y));
        assert!(!smoother.ingest(5, ms(16), at_x(2.0), Vec3::Y));
        assert!(!smoother.ingest(4, ms(32), at_x(3.0), Vec3::Y));
        assert_eq!(smoother.pending_len(), 1);
        assert_eq!(smoother.last_enqueued().map(|s| s.position), Some(at_x(1.0)));
    }

    #[test]
    fn test_tick_zero_is_never_sampled() {
        let mut smoother = PositionSmoother::default();
        assert!(!smoother.ingest(0, ms(0), at_x(1.0), Vec3::Y));
        assert_eq!(smoother.pending_len(), 0);
    }

    #[test]
    fn test_hold_ignores_pending() {
        let mut smoother = PositionSmoother::new(100, false);
        smoother.ingest(1, ms(0), at_x(0.0), Vec3::Y);
        smoother.ingest(2, ms(50), at_x(10.0), Vec3::X);

        // First released, second still pending: no interpolation
        for render in [100, 110, 125, 149] {
            let pose = smoother.compute_output(ms(render));
            assert_eq!(pose, Pose::new(at_x(0.0), Vec3::Y));
            assert_eq!(smoother.pending_len(), 1);
        }
    }

    #[test]
    fn test_interpolation_boundaries() {
        let mut smoother = PositionSmoother::new(100, true);
        let delay = smoother.effective_delay();

        smoother.ingest(1, ms(0), at_x(0.0), Vec3::Y);
        smoother.ingest(2, ms(50), at_x(10.0), Vec3::Y);

        // Start of the segment: exactly the released sample
        let pose = smoother.compute_output(delay);
        assert_eq!(pose.position, at_x(0.0));
        assert_eq!(smoother.pending_len(), 1);

        // Midpoint
        let pose = smoother.compute_output(delay + ms(25));
        assert!((pose.position.x - 5.0).abs() < 1e-3, "got {:?}", pose.position);

        // End of the segment: the pending sample is released
        let pose = smoother.compute_output(delay + ms(50));
        assert_eq!(pose.position, at_x(10.0));
        assert_eq!(smoother.pending_len(), 0);
    }

    #[test]
    fn test_degenerate_interval_holds() {
        let mut smoother = PositionSmoother::new(100, true);
        // Same timestamp as the zero-time reset sample
        smoother.ingest(1, Duration::ZERO, at_x(7.0), Vec3::X);

        for render in [0, 50, 116] {
            let pose = smoother.compute_output(ms(render));
            assert_eq!(pose, Pose::default());
            assert!(pose.position.is_finite());
        }
    }

    #[test]
    fn test_output_before_first_release_extrapolates_backwards() {
        // Unclamped factor: before `start` the marker sits behind the released sample.
        let mut smoother = PositionSmoother::new(0, true);
        smoother.reset_to(at_x(0.0), Vec3::Y);
        smoother.ingest(1, ms(100), at_x(10.0), Vec3::Y);

        let pose = smoother.compute_output(Duration::ZERO);
        assert!(pose.position.x < 0.0);
        assert!(pose.position.is_finite());
    }

    #[test]
    fn test_reset_clears_queue() {
        let mut smoother = PositionSmoother::new(100, true);
        smoother.ingest(1, ms(0), at_x(1.0), Vec3::Y);
        smoother.ingest(2, ms(20), at_x(2.0), Vec3::Y);
        smoother.compute_output(ms(200));

        smoother.reset();
        assert_eq!(smoother.pending_len(), 0);
        assert!(smoother.last_enqueued().is_none());
        assert_eq!(*smoother.last_released(), Sample::ZERO);
        assert_eq!(smoother.compute_output(ms(300)), Pose::default());

        // Same pose as before the reset is queued again
        assert!(smoother.ingest(3, ms(300), at_x(2.0), Vec3::Y));
    }

    #[test]
    fn test_reset_to_seeds_pose() {
        let mut smoother = PositionSmoother::new(100, false);
        smoother.reset_to(at_x(3.0), Vec3::X);

        assert_eq!(smoother.output(), Pose::new(at_x(3.0), Vec3::X));
        assert_eq!(smoother.compute_output(ms(10)).position, at_x(3.0));
        assert_eq!(smoother.last_released().time, Duration::ZERO);
    }

    #[test]
    fn test_ping_includes_compensation() {
        let mut smoother = PositionSmoother::new(100, true);
        assert_eq!(smoother.ping(), 116);
        assert_eq!(smoother.delay_ms(), 100);

        smoother.set_smoothing(false);
        assert_eq!(smoother.ping(), 100);

        // Setting ping always sets the base delay
        smoother.set_smoothing(true);
        smoother.set_ping(116);
        assert_eq!(smoother.delay_ms(), 116);
        assert_eq!(smoother.ping(), 132);
    }

    #[test]
    fn test_compensation_is_a_sixth_of_100ms() {
        assert_eq!(SMOOTHING_COMPENSATION.as_nanos(), 16_666_666);
        assert!(SMOOTHING_COMPENSATION > ms(16));

        let smoother = PositionSmoother::new(0, true);
        assert_eq!(smoother.effective_delay(), SMOOTHING_COMPENSATION);
        assert_eq!(smoother.ping(), 16);
    }

    #[test]
    fn test_delay_change_applies_next_frame() {
        let mut smoother = PositionSmoother::new(500, false);
        smoother.ingest(1, ms(0), at_x(4.0), Vec3::Y);

        assert_eq!(smoother.compute_output(ms(100)).position, Vec3::ZERO);

        smoother.set_delay_ms(50);
        assert_eq!(smoother.compute_output(ms(100)).position, at_x(4.0));
    }

    #[test]
    fn test_update_uses_same_clock() {
        let mut smoother = PositionSmoother::new(0, false);
        let pose = smoother.update(1, ms(10), at_x(1.0), Vec3::Y);
        assert_eq!(pose.position, at_x(1.0));
        assert_eq!(smoother.position(), at_x(1.0));
        assert_eq!(smoother.forward(), Vec3::Y);
    }
}
