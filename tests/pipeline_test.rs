//! Integration tests for the pipeline building blocks: history store,
//! validator, and the simulated instruments.

use std::path::Path;

use rigstream::models::{CameraFrame, Reading, ReadingValue, SensorType, VerdictStatus};
use rigstream::simulators::{CameraSimulator, ForceSimulator, MotorSimulator};
use rigstream::store::HistoryStore;
use rigstream::validation::{Thresholds, Validator};
use rigstream::Settings;

fn force(timestamp: f64, value: f64) -> Reading {
    Reading::scalar(SensorType::Force, timestamp, value)
}

fn motor(timestamp: f64, value: f64) -> Reading {
    Reading::scalar(SensorType::Motor, timestamp, value)
}

fn camera_frame(image_id: u64) -> CameraFrame {
    CameraFrame {
        image_id,
        resolution: "640x480".to_string(),
        brightness: 200,
        exposure_ms: 12.0,
        focus: 0.95,
        quality: 92,
        file_size_bytes: 250_000,
        scene: "assembly line".to_string(),
    }
}

// ============================================================================
// HISTORY STORE
// ============================================================================

#[test]
fn store_preserves_insertion_order() {
    let store = HistoryStore::new(10, 10);
    for i in 0..5 {
        store.append(force(i as f64, i as f64 * 2.0));
    }

    let readings = store.range(SensorType::Force, 0.0, 10.0);
    assert_eq!(readings.len(), 5);
    for (i, reading) in readings.iter().enumerate() {
        assert_eq!(reading.timestamp, i as f64, "Order should match insertion");
    }
}

#[test]
fn store_evicts_oldest_at_capacity() {
    let store = HistoryStore::new(3, 10);
    for i in 0..5 {
        store.append(force(i as f64, i as f64));
    }

    let readings = store.range(SensorType::Force, 0.0, 10.0);
    assert_eq!(readings.len(), 3, "Size must never exceed capacity");
    assert_eq!(readings[0].timestamp, 2.0, "Eviction must be strict FIFO");
    assert_eq!(readings[2].timestamp, 4.0);

    match store.latest(SensorType::Force) {
        Some(reading) => assert_eq!(reading.timestamp, 4.0),
        None => panic!("latest should exist after appends"),
    }
}

#[test]
fn store_range_filters_by_window() {
    let store = HistoryStore::new(10, 10);
    for i in 0..10 {
        store.append(motor(i as f64, 1.0));
    }

    let window = store.range(SensorType::Motor, 3.0, 6.0);
    assert_eq!(window.len(), 4);
    assert_eq!(window[0].timestamp, 3.0);
    assert_eq!(window[3].timestamp, 6.0);
}

#[test]
fn store_tracks_types_independently() {
    let store = HistoryStore::new(10, 10);
    store.append(force(1.0, 5.0));

    assert!(store.latest(SensorType::Force).is_some());
    assert!(store.latest(SensorType::Motor).is_none());
    assert!(store.latest(SensorType::Camera).is_none());
}

#[test]
fn store_clear_empties_everything() {
    let store = HistoryStore::new(10, 10);
    store.append(force(1.0, 5.0));
    store.append(Reading::camera(2.0, camera_frame(1001)));

    let validator = Validator::new(Thresholds::default());
    store.push_alert(validator.evaluate(&force(3.0, 120.0)));
    assert_eq!(store.alert_count(), 1);

    store.clear();
    for sensor_type in SensorType::ALL {
        assert!(store.latest(sensor_type).is_none());
    }
    assert_eq!(store.alert_count(), 0);
}

#[test]
fn store_alert_log_is_bounded_and_newest_first() {
    let store = HistoryStore::new(10, 3);
    let validator = Validator::new(Thresholds::default());
    for i in 0..5 {
        store.push_alert(validator.evaluate(&force(i as f64, 150.0)));
    }

    assert_eq!(store.alert_count(), 3);
    let alerts = store.recent_alerts(2);
    assert_eq!(alerts.len(), 2);
    assert_eq!(alerts[0].timestamp, 4.0, "Most recent alert comes first");
    assert_eq!(alerts[1].timestamp, 3.0);
}

// ============================================================================
// VALIDATOR
// ============================================================================

#[test]
fn validator_force_thresholds() {
    let validator = Validator::new(Thresholds::default());

    let verdict = validator.evaluate(&force(1.0, 101.0));
    assert_eq!(verdict.status, VerdictStatus::Error);
    assert!(verdict.message.contains("exceeds safe limit"));
    assert_eq!(verdict.sensor_type, SensorType::Force);
    assert_eq!(verdict.timestamp, 1.0, "Verdict carries the reading timestamp");

    let verdict = validator.evaluate(&force(2.0, 75.0));
    assert_eq!(verdict.status, VerdictStatus::Warning);
    assert!(verdict.message.contains("approaching upper limit"));

    let verdict = validator.evaluate(&force(3.0, 10.0));
    assert_eq!(verdict.status, VerdictStatus::Valid);
}

#[test]
fn validator_motor_uses_absolute_value() {
    let validator = Validator::new(Thresholds::default());

    let verdict = validator.evaluate(&motor(1.0, -90.0));
    assert_eq!(verdict.status, VerdictStatus::Warning);
    assert!(verdict.message.contains("approaching limits"));

    let verdict = validator.evaluate(&motor(2.0, 40.0));
    assert_eq!(verdict.status, VerdictStatus::Valid);
}

#[test]
fn validator_camera_is_always_valid() {
    let validator = Validator::new(Thresholds::default());
    let verdict = validator.evaluate(&Reading::camera(1.0, camera_frame(1001)));
    assert_eq!(verdict.status, VerdictStatus::Valid);
    assert!(verdict.message.contains("capture successful"));
}

#[test]
fn validator_is_total_over_malformed_readings() {
    let validator = Validator::new(Thresholds::default());

    // Scalar sensor carrying a structured value, and vice versa.
    let shape_mismatch = Reading {
        timestamp: 1.0,
        sensor_type: SensorType::Force,
        value: ReadingValue::Frame(camera_frame(1001)),
    };
    assert_eq!(validator.evaluate(&shape_mismatch).status, VerdictStatus::Error);

    let scalar_camera = Reading {
        timestamp: 2.0,
        sensor_type: SensorType::Camera,
        value: ReadingValue::Scalar(1.0),
    };
    assert_eq!(validator.evaluate(&scalar_camera).status, VerdictStatus::Error);

    assert_eq!(
        validator.evaluate(&force(3.0, f64::NAN)).status,
        VerdictStatus::Error
    );
    assert_eq!(
        validator.evaluate(&motor(4.0, f64::INFINITY)).status,
        VerdictStatus::Error
    );
}

#[test]
fn validator_thresholds_are_injected() {
    let validator = Validator::new(Thresholds {
        force_error: 10.0,
        force_warn: 5.0,
        motor_warn: 20.0,
    });

    assert_eq!(validator.evaluate(&force(1.0, 11.0)).status, VerdictStatus::Error);
    assert_eq!(validator.evaluate(&force(2.0, 7.0)).status, VerdictStatus::Warning);
    assert_eq!(validator.evaluate(&motor(3.0, 25.0)).status, VerdictStatus::Warning);
}

// ============================================================================
// SIMULATORS
// ============================================================================

#[test]
fn force_simulator_never_goes_negative() {
    let mut sim = ForceSimulator::new(10.0, 1.0);
    for i in 0..500 {
        let reading = sim.tick(i as f64 * 0.1);
        let reading = reading.expect("force emits on every tick");
        match reading.value {
            ReadingValue::Scalar(value) => assert!(value >= 0.0, "Force is clamped at zero"),
            ReadingValue::Frame(_) => panic!("force readings are scalar"),
        }
    }
}

#[test]
fn force_simulator_baseline_stays_below_warning_band() {
    let mut sim = ForceSimulator::new(10.0, 0.0);
    for i in 0..500 {
        if let Some(reading) = sim.tick(i as f64 * 0.1) {
            if let ReadingValue::Scalar(value) = reading.value {
                assert!(value < 50.0, "Spike-free baseline stays in the valid band");
            }
        }
    }
}

#[test]
fn motor_simulator_oscillates_within_band() {
    let mut sim = MotorSimulator::new(5.0);
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;

    for i in 0..2000 {
        if let Some(reading) = sim.tick(i as f64 * 0.05) {
            if let ReadingValue::Scalar(value) = reading.value {
                min = min.min(value);
                max = max.max(value);
                assert!(value.abs() < 75.0, "Motor stays roughly within [-60, 60]");
            }
        }
    }

    assert!(max > 30.0, "Waveform should actually swing positive");
    assert!(min < -30.0, "Waveform should actually swing negative");
}

#[test]
fn camera_simulator_fires_once_per_second_boundary() {
    let mut sim = CameraSimulator::new(1.0);

    assert!(sim.tick(100.0).is_some());
    assert!(sim.tick(100.4).is_none(), "Same second emits nothing");
    assert!(sim.tick(100.9).is_none());
    assert!(sim.tick(101.0).is_some());
    assert!(sim.tick(102.5).is_some());
}

#[test]
fn camera_simulator_frames_are_plausible_and_ordered() {
    let mut sim = CameraSimulator::new(1.0);
    let mut last_id = 0;
    let mut scenes = Vec::new();

    for second in 0..6 {
        let reading = sim.tick(1000.0 + second as f64);
        let reading = reading.expect("one frame per second boundary");
        match reading.value {
            ReadingValue::Frame(frame) => {
                assert!(frame.image_id > last_id, "Frame ids increase monotonically");
                last_id = frame.image_id;
                assert!((180..=230).contains(&frame.brightness));
                assert!((8.0..16.0).contains(&frame.exposure_ms));
                scenes.push(frame.scene);
            }
            ReadingValue::Scalar(_) => panic!("camera readings are structured"),
        }
    }

    assert!(last_id > 1000, "Ids start above the initial counter");
    assert_ne!(scenes[0], scenes[1], "Scene label cycles between frames");
}

// ============================================================================
// CONFIGURATION
// ============================================================================

#[test]
fn settings_default_when_file_missing() {
    let settings = Settings::load(Path::new("/nonexistent/rigstream.json"))
        .expect("missing file falls back to defaults");

    assert_eq!(settings.sensors.force_hz, 10.0);
    assert_eq!(settings.sensors.motor_hz, 5.0);
    assert_eq!(settings.sensors.camera_hz, 1.0);
    assert_eq!(settings.thresholds.force_error, 100.0);
    assert_eq!(settings.buffers.history_capacity, 200);
}
