use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};

use crate::models::{Reading, SensorType};

const BASELINE_N: f64 = 30.0;
const DRIFT_AMPLITUDE: f64 = 8.0;
const DRIFT_RATE: f64 = 0.05;
const OSCILLATION_AMPLITUDE: f64 = 4.0;
const OSCILLATION_RATE: f64 = 1.7;
const NOISE_SIGMA: f64 = 1.2;
const SPIKE_MAX_N: f64 = 120.0;

/// Force instrument: slow drift plus a faster oscillation with Gaussian
/// noise, and rare additive spikes that mimic contact events.
pub struct ForceSimulator {
    rate_hz: f64,
    spike_probability: f64,
    rng: StdRng,
    noise: Normal<f64>,
}

impl ForceSimulator {
    pub fn new(rate_hz: f64, spike_probability: f64) -> Self {
        Self {
            rate_hz,
            spike_probability,
            rng: StdRng::from_entropy(),
            noise: Normal::new(0.0, NOISE_SIGMA).unwrap(),
        }
    }

    pub fn rate_hz(&self) -> f64 {
        self.rate_hz
    }

    pub fn tick(&mut self, now: f64) -> Option<Reading> {
        let drift = (now * DRIFT_RATE).sin() * DRIFT_AMPLITUDE;
        let oscillation = (now * OSCILLATION_RATE).sin() * OSCILLATION_AMPLITUDE;
        let mut force = BASELINE_N + drift + oscillation + self.noise.sample(&mut self.rng);

        if self.rng.gen::<f64>() < self.spike_probability {
            force += self.rng.gen_range(0.0..SPIKE_MAX_N);
        }

        Some(Reading::scalar(SensorType::Force, now, force.max(0.0)))
    }
}
