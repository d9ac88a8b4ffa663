use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::models::{CameraFrame, Reading};

const SCENES: [&str; 4] = [
    "calibration target",
    "assembly line",
    "gripper approach",
    "part inspection",
];
const RESOLUTION: &str = "640x480";
const FIRST_IMAGE_ID: u64 = 1000;

/// Camera instrument: one frame per whole-second boundary crossing.
/// Ticks that land inside a second already covered emit nothing, so jitter
/// in the driving cadence shifts phase but never the rate.
pub struct CameraSimulator {
    rate_hz: f64,
    rng: StdRng,
    image_id: u64,
    scene_index: usize,
    last_boundary: Option<i64>,
}

impl CameraSimulator {
    pub fn new(rate_hz: f64) -> Self {
        Self {
            rate_hz,
            rng: StdRng::from_entropy(),
            image_id: FIRST_IMAGE_ID,
            scene_index: 0,
            last_boundary: None,
        }
    }

    pub fn rate_hz(&self) -> f64 {
        self.rate_hz
    }

    pub fn tick(&mut self, now: f64) -> Option<Reading> {
        let boundary = now.floor() as i64;
        if self.last_boundary == Some(boundary) {
            return None;
        }
        self.last_boundary = Some(boundary);

        self.image_id += 1;
        let scene = SCENES[self.scene_index % SCENES.len()];
        self.scene_index += 1;

        let frame = CameraFrame {
            image_id: self.image_id,
            resolution: RESOLUTION.to_string(),
            brightness: self.rng.gen_range(180..=230),
            exposure_ms: self.rng.gen_range(8.0..16.0),
            focus: self.rng.gen_range(0.92..0.99),
            quality: self.rng.gen_range(88..=99),
            file_size_bytes: self.rng.gen_range(180_000..420_000),
            scene: scene.to_string(),
        };

        Some(Reading::camera(now, frame))
    }
}
