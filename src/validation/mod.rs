//! Threshold validation for incoming readings.
//!
//! `evaluate` is total: every reading shape maps to a verdict, including
//! malformed ones, so the ingestion path never has to handle a validation
//! failure as anything other than data.

use serde::{Deserialize, Serialize};

use crate::models::{Reading, ReadingValue, SensorType, Verdict, VerdictStatus};

/// Safety limits, injected at startup. Not hot-reloadable.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Thresholds {
    pub force_error: f64,
    pub force_warn: f64,
    pub motor_warn: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            force_error: 100.0,
            force_warn: 50.0,
            motor_warn: 80.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Validator {
    thresholds: Thresholds,
}

impl Validator {
    pub fn new(thresholds: Thresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    pub fn evaluate(&self, reading: &Reading) -> Verdict {
        match (reading.sensor_type, &reading.value) {
            (SensorType::Force, ReadingValue::Scalar(value)) => self.evaluate_force(reading, *value),
            (SensorType::Motor, ReadingValue::Scalar(value)) => self.evaluate_motor(reading, *value),
            (SensorType::Camera, ReadingValue::Frame(_)) => verdict(
                reading,
                VerdictStatus::Valid,
                "capture successful".to_string(),
            ),
            // Value shape does not match the claimed sensor type.
            _ => verdict(
                reading,
                VerdictStatus::Error,
                format!("unknown reading shape for {} sensor", reading.sensor_type.as_str()),
            ),
        }
    }

    fn evaluate_force(&self, reading: &Reading, value: f64) -> Verdict {
        if !value.is_finite() {
            return verdict(
                reading,
                VerdictStatus::Error,
                "force value is not a finite number".to_string(),
            );
        }

        if value > self.thresholds.force_error {
            verdict(
                reading,
                VerdictStatus::Error,
                format!(
                    "force {value:.2} N exceeds safe limit of {:.0} N",
                    self.thresholds.force_error
                ),
            )
        } else if value > self.thresholds.force_warn {
            verdict(
                reading,
                VerdictStatus::Warning,
                format!(
                    "force {value:.2} N approaching upper limit of {:.0} N",
                    self.thresholds.force_error
                ),
            )
        } else {
            verdict(reading, VerdictStatus::Valid, "force within safe range".to_string())
        }
    }

    fn evaluate_motor(&self, reading: &Reading, value: f64) -> Verdict {
        if !value.is_finite() {
            return verdict(
                reading,
                VerdictStatus::Error,
                "motor value is not a finite number".to_string(),
            );
        }

        if value.abs() > self.thresholds.motor_warn {
            verdict(
                reading,
                VerdictStatus::Warning,
                format!(
                    "motor speed {value:.2} RPM approaching limits (|v| > {:.0})",
                    self.thresholds.motor_warn
                ),
            )
        } else {
            verdict(
                reading,
                VerdictStatus::Valid,
                "motor speed within operating range".to_string(),
            )
        }
    }
}

fn verdict(reading: &Reading, status: VerdictStatus, message: String) -> Verdict {
    Verdict {
        sensor_type: reading.sensor_type,
        status,
        message,
        timestamp: reading.timestamp,
    }
}
