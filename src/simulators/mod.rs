//! Simulated instrument producers.
//!
//! Each simulator is a pure value source: `tick(now)` either emits a reading
//! or nothing, and never touches shared state. The session controller owns
//! the cadence and relays emissions into the rest of the pipeline.

mod camera;
mod force;
mod motor;

pub use camera::CameraSimulator;
pub use force::ForceSimulator;
pub use motor::MotorSimulator;

use std::time::Duration;

use crate::config::SensorSettings;
use crate::models::{Reading, SensorType};

/// Closed set of instrument variants behind the one `tick` capability.
pub enum Simulator {
    Force(ForceSimulator),
    Motor(MotorSimulator),
    Camera(CameraSimulator),
}

impl Simulator {
    /// Builds the full instrument bench configured for this process.
    pub fn bench(settings: &SensorSettings) -> Vec<Simulator> {
        vec![
            Simulator::Force(ForceSimulator::new(
                settings.force_hz,
                settings.force_spike_probability,
            )),
            Simulator::Motor(MotorSimulator::new(settings.motor_hz)),
            Simulator::Camera(CameraSimulator::new(settings.camera_hz)),
        ]
    }

    pub fn sensor_type(&self) -> SensorType {
        match self {
            Simulator::Force(_) => SensorType::Force,
            Simulator::Motor(_) => SensorType::Motor,
            Simulator::Camera(_) => SensorType::Camera,
        }
    }

    pub fn rate_hz(&self) -> f64 {
        match self {
            Simulator::Force(sim) => sim.rate_hz(),
            Simulator::Motor(sim) => sim.rate_hz(),
            Simulator::Camera(sim) => sim.rate_hz(),
        }
    }

    pub fn period(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.rate_hz())
    }

    pub fn tick(&mut self, now: f64) -> Option<Reading> {
        match self {
            Simulator::Force(sim) => sim.tick(now),
            Simulator::Motor(sim) => sim.tick(now),
            Simulator::Camera(sim) => sim.tick(now),
        }
    }
}
