use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};

use crate::models::{Reading, SensorType};

const PRIMARY_AMPLITUDE: f64 = 48.0;
const PRIMARY_RATE: f64 = 0.9;
const SECONDARY_AMPLITUDE: f64 = 12.0;
const SECONDARY_RATE: f64 = 2.6;
const SECONDARY_PHASE: f64 = 1.3;
const NOISE_SIGMA: f64 = 0.8;

/// Motor controller velocity: two superimposed sinusoids with light noise,
/// swinging roughly between -60 and 60 RPM. Unclamped.
pub struct MotorSimulator {
    rate_hz: f64,
    rng: StdRng,
    noise: Normal<f64>,
}

impl MotorSimulator {
    pub fn new(rate_hz: f64) -> Self {
        Self {
            rate_hz,
            rng: StdRng::from_entropy(),
            noise: Normal::new(0.0, NOISE_SIGMA).unwrap(),
        }
    }

    pub fn rate_hz(&self) -> f64 {
        self.rate_hz
    }

    pub fn tick(&mut self, now: f64) -> Option<Reading> {
        let primary = (now * PRIMARY_RATE).sin() * PRIMARY_AMPLITUDE;
        let secondary = (now * SECONDARY_RATE + SECONDARY_PHASE).sin() * SECONDARY_AMPLITUDE;
        let velocity = primary + secondary + self.noise.sample(&mut self.rng);

        Some(Reading::scalar(SensorType::Motor, now, velocity))
    }
}
