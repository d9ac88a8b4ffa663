use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum SensorType {
    Force,
    Motor,
    Camera,
}

impl SensorType {
    pub const ALL: [SensorType; 3] = [SensorType::Force, SensorType::Motor, SensorType::Camera];

    pub fn as_str(&self) -> &'static str {
        match self {
            SensorType::Force => "force",
            SensorType::Motor => "motor",
            SensorType::Camera => "camera",
        }
    }
}

/// Metadata record emitted by the camera instrument once per frame.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CameraFrame {
    pub image_id: u64,
    pub resolution: String,
    pub brightness: u32,
    pub exposure_ms: f64,
    pub focus: f64,
    pub quality: u32,
    pub file_size_bytes: u64,
    pub scene: String,
}

/// Force and motor readings carry a scalar; camera readings carry a frame record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ReadingValue {
    Scalar(f64),
    Frame(CameraFrame),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Reading {
    /// Seconds since the Unix epoch. Non-decreasing per sensor type.
    pub timestamp: f64,
    pub sensor_type: SensorType,
    pub value: ReadingValue,
}

impl Reading {
    pub fn scalar(sensor_type: SensorType, timestamp: f64, value: f64) -> Self {
        Self {
            timestamp,
            sensor_type,
            value: ReadingValue::Scalar(value),
        }
    }

    pub fn camera(timestamp: f64, frame: CameraFrame) -> Self {
        Self {
            timestamp,
            sensor_type: SensorType::Camera,
            value: ReadingValue::Frame(frame),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum VerdictStatus {
    Valid,
    Warning,
    Error,
}

/// Validation outcome for a single reading. Derived deterministically from
/// the reading and the active thresholds; carries the reading's timestamp.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Verdict {
    pub sensor_type: SensorType,
    pub status: VerdictStatus,
    pub message: String,
    pub timestamp: f64,
}

impl Verdict {
    pub fn is_alert(&self) -> bool {
        !matches!(self.status, VerdictStatus::Valid)
    }
}

/// Unit of delivery on the live stream.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase")]
pub enum StreamFrame {
    Reading(Reading),
    Verdict(Verdict),
}
