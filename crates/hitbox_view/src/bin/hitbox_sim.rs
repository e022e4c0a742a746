//! # Hitbox Simulation
//!
//! Runs an avatar around a circle through the overlay and reports how far
//! the marker strays from where the server would see the avatar.
//!
//! - Live state ticks at 50 Hz, frames render at 60 Hz
//! - Ground truth for the marker: the avatar's path, one effective delay ago
//! - Runs once with smoothing and once without
//!
//! Usage: `hitbox_sim [settings.toml]`

use std::time::Duration;

use hitbox_shared::{MountType, Vec3};
use hitbox_view::{HitboxOverlay, HitboxSettings, LiveState, SharedLiveState};

/// Live-state tick period (50 Hz).
const TICK_PERIOD: Duration = Duration::from_millis(20);

/// Render frame period (60 Hz).
const FRAME_PERIOD: Duration = Duration::from_micros(16_667);

/// Simulated duration of each run.
const RUN_LENGTH: Duration = Duration::from_secs(20);

/// Radius of the circular path, in world units.
const PATH_RADIUS: f32 = 15.0;

/// Angular speed along the path, in radians per second.
const ANGULAR_SPEED: f32 = 0.6;

/// Avatar pose on the path at time `t`.
fn avatar_at(t: Duration) -> (Vec3, Vec3) {
    let angle = ANGULAR_SPEED * t.as_secs_f32();
    let (sin, cos) = angle.sin_cos();
    let position = Vec3::new(PATH_RADIUS * cos, PATH_RADIUS * sin, 0.0);
    let forward = Vec3::new(-sin, cos, 0.0);
    (position, forward)
}

/// Result of one run.
struct RunReport {
    smoothing: bool,
    ping_ms: u32,
    frames: u32,
    ticks: u32,
    mean_error: f32,
    max_error: f32,
    max_pending: usize,
}

fn run(settings: &HitboxSettings) -> RunReport {
    let live = SharedLiveState::new();
    let mut overlay = HitboxOverlay::new(live.clone(), settings);
    let delay = overlay.smoother().effective_delay();

    let mut now = Duration::ZERO;
    let mut next_tick = Duration::ZERO;
    let mut frames = 0u32;
    let mut error_sum = 0.0f64;
    let mut measured = 0u32;
    let mut max_error = 0.0f32;
    let mut max_pending = 0usize;

    while now < RUN_LENGTH {
        // Feeder: the game writes a new state every tick
        while next_tick <= now {
            let (position, forward) = avatar_at(next_tick);
            live.advance(position, forward, MountType::None);
            next_tick += TICK_PERIOD;
        }

        if let Some(pose) = overlay.update(now) {
            max_pending = max_pending.max(overlay.smoother().pending_len());

            // Skip the warm-up before the first sample is released
            if now > delay + TICK_PERIOD {
                let (truth, _) = avatar_at(now - delay);
                let error = pose.position.distance(truth);
                error_sum += f64::from(error);
                measured += 1;
                max_error = max_error.max(error);
            }
        }

        frames += 1;
        now += FRAME_PERIOD;
    }

    #[allow(clippy::cast_possible_truncation)]
    let mean_error = if measured == 0 {
        0.0
    } else {
        (error_sum / f64::from(measured)) as f32
    };

    RunReport {
        smoothing: settings.smoothing,
        ping_ms: overlay.smoother().ping(),
        frames,
        ticks: overlay.live().tick(),
        mean_error,
        max_error,
        max_pending,
    }
}

fn print_report(report: &RunReport) {
    println!(
        "║  smoothing={:<5}  ping={:>4} ms  frames={:>5}  ticks={:>5}           ║",
        report.smoothing, report.ping_ms, report.frames, report.ticks
    );
    println!(
        "║    error mean={:>7.4}  max={:>7.4}  pending high-water={:>4}        ║",
        report.mean_error, report.max_error, report.max_pending
    );
}

fn main() {
    let settings = match std::env::args().nth(1) {
        Some(path) => match HitboxSettings::load(&path) {
            Ok(settings) => settings,
            Err(err) => {
                eprintln!("hitbox_sim: {err}");
                std::process::exit(2);
            }
        },
        None => HitboxSettings::default(),
    };

    println!("╔══════════════════════════════════════════════════════════════════╗");
    println!("║              HITBOX VIEW - DELAYED MARKER SIMULATION             ║");
    println!("╠══════════════════════════════════════════════════════════════════╣");
    println!("║  Path: circle r={PATH_RADIUS}, {ANGULAR_SPEED} rad/s; ticks 50 Hz, frames 60 Hz        ║");
    println!("╠══════════════════════════════════════════════════════════════════╣");

    for smoothing in [true, false] {
        let report = run(&HitboxSettings {
            smoothing,
            visible: true,
            ..settings.clone()
        });
        print_report(&report);
    }

    println!("╚══════════════════════════════════════════════════════════════════╝");
}
