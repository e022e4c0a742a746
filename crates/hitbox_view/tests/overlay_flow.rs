//! # Overlay Integration Test
//!
//! Settings file → overlay → live state from another thread → marker.

use std::path::PathBuf;
use std::time::Duration;

use hitbox_shared::{Color, MountType, Vec3};
use hitbox_view::{
    HitboxOverlay, HitboxSettings, LiveState, SettingsError, SharedLiveState,
};

/// Flat scratch file name in the system temp dir, unique per process.
fn scratch_file(name: &str) -> PathBuf {
    let id = std::process::id();
    std::env::temp_dir().join(format!("test_hitbox_settings_{id}_{name}"))
}

#[test]
fn test_settings_file_round_trip() {
    let path = scratch_file("round_trip.toml");
    let settings = HitboxSettings {
        color: Color::rgb(0.2, 0.9, 1.0),
        smoothing: false,
        ping_ms: 180,
        toggle_key: Some("Ctrl+H".to_owned()),
        ..HitboxSettings::default()
    };

    settings.save(&path).unwrap();
    assert_eq!(HitboxSettings::load(&path).unwrap(), settings);

    std::fs::remove_file(&path).unwrap();

    // Nothing is left behind in the temp dir
    assert_eq!(path.parent(), Some(std::env::temp_dir().as_path()));
    assert!(!path.exists());
}

#[test]
fn test_missing_file() {
    let path = scratch_file("does_not_exist.toml");

    assert!(matches!(HitboxSettings::load(&path), Err(SettingsError::Io { .. })));
    assert_eq!(HitboxSettings::load_or_default(&path), HitboxSettings::default());
}

#[test]
fn test_invalid_file_falls_back_to_defaults() {
    let path = scratch_file("invalid.toml");
    std::fs::write(&path, "ping_ms = 99999\n").unwrap();

    assert!(matches!(
        HitboxSettings::load(&path),
        Err(SettingsError::PingOutOfRange { value: 99_999, .. })
    ));
    assert_eq!(HitboxSettings::load_or_default(&path), HitboxSettings::default());

    std::fs::remove_file(&path).unwrap();
}

#[test]
fn test_feeder_thread_and_settings_ui() {
    let live = SharedLiveState::new();
    let settings = HitboxSettings {
        smoothing: false,
        ping_ms: 100,
        ..HitboxSettings::default()
    };
    let mut overlay = HitboxOverlay::new(live.clone(), &settings);

    // The game moves the avatar to x = 1..=5 before the first frame
    let feeder = live.clone();
    std::thread::spawn(move || {
        for i in 1..=5u8 {
            feeder.advance(Vec3::new(f32::from(i), 0.0, 0.0), Vec3::Y, MountType::Jackal);
        }
    })
    .join()
    .unwrap();

    // Only the latest state is seen: one sample for tick 5
    overlay.update(Duration::from_millis(0));
    assert_eq!(overlay.smoother().pending_len(), 1);
    assert_eq!(overlay.smoother().last_observed_tick(), 5);

    // The UI lowers the ping from its own thread
    let publisher = overlay.publisher();
    std::thread::spawn(move || publisher.set_ping(0).unwrap())
        .join()
        .unwrap();

    let pose = overlay.update(Duration::from_millis(16)).unwrap();
    assert_eq!(pose.position, Vec3::new(5.0, 0.0, 0.0));

    let marker = overlay.marker().unwrap();
    assert!(marker.facing.is_some());
    // Jackal footprint is 2.2 wide
    for p in &marker.footprint.points {
        assert!((p.distance(pose.position) - 1.1).abs() < 1e-4);
    }
    assert_eq!(overlay.live().current_mount(), MountType::Jackal);
}

#[test]
fn test_toggle_key_hides_and_restarts_cleanly() {
    let live = SharedLiveState::new();
    let mut overlay = HitboxOverlay::new(live.clone(), &HitboxSettings::default());
    let publisher = overlay.publisher();

    let mut now = Duration::ZERO;
    for i in 0..30u8 {
        live.advance(Vec3::new(f32::from(i), 0.0, 0.0), Vec3::Y, MountType::None);
        overlay.update(now);
        now += Duration::from_millis(16);
    }

    publisher.toggle_visibility().unwrap();
    assert!(overlay.update(now).is_none());

    // The avatar teleports while hidden
    live.advance(Vec3::new(500.0, 0.0, 0.0), Vec3::Y, MountType::None);
    now += Duration::from_secs(5);

    publisher.toggle_visibility().unwrap();
    let pose = overlay.update(now).unwrap();

    // No stale motion: the marker starts at the live pose it was reset to
    assert_eq!(pose.position, Vec3::new(500.0, 0.0, 0.0));
}
