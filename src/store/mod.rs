//! Bounded in-memory history for readings and validation alerts.
//!
//! One ring buffer per sensor type plus a ring of recent alerts. Writers and
//! readers share an `RwLock`; every critical section is a short, allocation
//! light memory operation, never I/O.

use std::collections::VecDeque;
use std::sync::{Arc, RwLock};

use crate::models::{BufferCounts, Reading, SensorType, Verdict};

#[derive(Clone)]
pub struct HistoryStore {
    inner: Arc<RwLock<StoreState>>,
}

struct StoreState {
    force: HistoryBuffer,
    motor: HistoryBuffer,
    camera: HistoryBuffer,
    alerts: VecDeque<Verdict>,
    alert_capacity: usize,
}

impl StoreState {
    fn buffer(&self, sensor_type: SensorType) -> &HistoryBuffer {
        match sensor_type {
            SensorType::Force => &self.force,
            SensorType::Motor => &self.motor,
            SensorType::Camera => &self.camera,
        }
    }

    fn buffer_mut(&mut self, sensor_type: SensorType) -> &mut HistoryBuffer {
        match sensor_type {
            SensorType::Force => &mut self.force,
            SensorType::Motor => &mut self.motor,
            SensorType::Camera => &mut self.camera,
        }
    }
}

struct HistoryBuffer {
    readings: VecDeque<Reading>,
    capacity: usize,
}

impl HistoryBuffer {
    fn new(capacity: usize) -> Self {
        Self {
            readings: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    fn push(&mut self, reading: Reading) {
        if self.readings.len() == self.capacity {
            self.readings.pop_front();
        }
        self.readings.push_back(reading);
    }
}

impl HistoryStore {
    pub fn new(history_capacity: usize, alert_capacity: usize) -> Self {
        Self {
            inner: Arc::new(RwLock::new(StoreState {
                force: HistoryBuffer::new(history_capacity),
                motor: HistoryBuffer::new(history_capacity),
                camera: HistoryBuffer::new(history_capacity),
                alerts: VecDeque::with_capacity(alert_capacity),
                alert_capacity,
            })),
        }
    }

    pub fn append(&self, reading: Reading) {
        let mut state = self.inner.write().unwrap();
        state.buffer_mut(reading.sensor_type).push(reading);
    }

    pub fn latest(&self, sensor_type: SensorType) -> Option<Reading> {
        let state = self.inner.read().unwrap();
        state.buffer(sensor_type).readings.back().cloned()
    }

    /// Readings of one type whose timestamps fall in `[since, until]`, in
    /// insertion order.
    pub fn range(&self, sensor_type: SensorType, since: f64, until: f64) -> Vec<Reading> {
        let state = self.inner.read().unwrap();
        state
            .buffer(sensor_type)
            .readings
            .iter()
            .filter(|reading| reading.timestamp >= since && reading.timestamp <= until)
            .cloned()
            .collect()
    }

    pub fn push_alert(&self, alert: Verdict) {
        let mut state = self.inner.write().unwrap();
        if state.alerts.len() == state.alert_capacity {
            state.alerts.pop_front();
        }
        state.alerts.push_back(alert);
    }

    /// The most recent alerts, newest first.
    pub fn recent_alerts(&self, limit: usize) -> Vec<Verdict> {
        let state = self.inner.read().unwrap();
        state.alerts.iter().rev().take(limit).cloned().collect()
    }

    pub fn alert_count(&self) -> usize {
        self.inner.read().unwrap().alerts.len()
    }

    pub fn counts(&self) -> BufferCounts {
        let state = self.inner.read().unwrap();
        BufferCounts {
            force: state.force.readings.len(),
            motor: state.motor.readings.len(),
            camera: state.camera.readings.len(),
        }
    }

    pub fn clear(&self) {
        let mut state = self.inner.write().unwrap();
        state.force.readings.clear();
        state.motor.readings.clear();
        state.camera.readings.clear();
        state.alerts.clear();
    }
}
