use std::sync::Arc;

use anyhow::{bail, Context, Result};
use chrono::Utc;
use log::{debug, info, warn};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::config::Settings;
use crate::hub::{BroadcastHub, Subscription};
use crate::models::{Reading, SensorType, SessionReport, SessionSnapshot, StreamFrame, Verdict};
use crate::simulators::Simulator;
use crate::store::HistoryStore;
use crate::validation::Validator;

use super::state::{SessionState, SessionStatus};

/// Owns the session lifecycle and the simulator worker tasks, and relays
/// every emission into the store, the validator, and the hub.
#[derive(Clone)]
pub struct SessionController {
    state: Arc<Mutex<SessionState>>,
    workers: Arc<Mutex<Vec<JoinHandle<()>>>>,
    cancel: Arc<Mutex<Option<CancellationToken>>>,
    store: HistoryStore,
    hub: BroadcastHub,
    validator: Validator,
    settings: Settings,
}

impl SessionController {
    pub fn new(
        settings: Settings,
        store: HistoryStore,
        hub: BroadcastHub,
        validator: Validator,
    ) -> Self {
        Self {
            state: Arc::new(Mutex::new(SessionState::new())),
            workers: Arc::new(Mutex::new(Vec::new())),
            cancel: Arc::new(Mutex::new(None)),
            store,
            hub,
            validator,
            settings,
        }
    }

    /// Begins recording: valid from Idle or Stopped. Rejected while already
    /// recording, leaving the running session untouched.
    pub async fn start(&self) -> Result<SessionSnapshot> {
        let session_id = Uuid::new_v4().to_string();
        let started_at = Utc::now();

        {
            let mut state = self.state.lock().await;
            if state.status == SessionStatus::Recording {
                bail!("session already recording");
            }
            state.begin(session_id.clone(), started_at);
        }

        self.spawn_workers().await;
        info!("session {session_id} recording");

        Ok(self.snapshot().await)
    }

    /// Stops recording: valid only while Recording. Every simulator worker
    /// is joined before the transition completes, so nothing is emitted
    /// after this returns. History is retained.
    pub async fn stop(&self) -> Result<SessionReport> {
        {
            let state = self.state.lock().await;
            if state.status != SessionStatus::Recording {
                bail!("no active session to stop");
            }
        }

        self.halt_workers().await?;

        let stopped_at = Utc::now();
        let report = {
            let mut state = self.state.lock().await;
            state.stop();
            SessionReport {
                session_id: state.session_id.clone().unwrap_or_default(),
                total_readings: state.reading_count,
                alert_count: self.store.alert_count(),
                duration_seconds: state.duration_seconds(stopped_at),
            }
        };

        info!(
            "session {} stopped after {:.1}s with {} readings",
            report.session_id, report.duration_seconds, report.total_readings
        );
        Ok(report)
    }

    /// Forces the pipeline back to Idle from any state: halts workers if
    /// running, clears all history and alerts, zeroes the reading count.
    /// Always succeeds.
    pub async fn reset(&self) -> Result<()> {
        self.halt_workers().await?;

        {
            let mut state = self.state.lock().await;
            state.reset();
        }
        self.store.clear();

        info!("session reset; history cleared");
        Ok(())
    }

    /// Relay path for one reading: store it while recording, always
    /// validate, log alerts, and fan both frames out to subscribers.
    pub async fn ingest(&self, reading: Reading) {
        let recording = {
            let mut state = self.state.lock().await;
            if state.status == SessionStatus::Recording {
                state.reading_count += 1;
                true
            } else {
                false
            }
        };

        if recording {
            self.store.append(reading.clone());
        }

        let verdict = self.validator.evaluate(&reading);
        if verdict.is_alert() {
            warn!("[{}] {}", verdict.sensor_type.as_str(), verdict.message);
            self.store.push_alert(verdict.clone());
        }

        self.hub.publish(StreamFrame::Reading(reading));
        self.hub.publish(StreamFrame::Verdict(verdict));
    }

    pub async fn snapshot(&self) -> SessionSnapshot {
        let state = self.state.lock().await;
        SessionSnapshot {
            status: state.status,
            session_id: state.session_id.clone(),
            started_at: state.started_at,
            reading_count: state.reading_count,
            buffered: self.store.counts(),
            alert_count: self.store.alert_count(),
            subscriber_count: self.hub.subscriber_count(),
        }
    }

    pub fn latest(&self, sensor_type: SensorType) -> Option<Reading> {
        self.store.latest(sensor_type)
    }

    pub fn range(&self, sensor_type: SensorType, since: f64, until: f64) -> Vec<Reading> {
        self.store.range(sensor_type, since, until)
    }

    pub fn recent_alerts(&self, limit: usize) -> Vec<Verdict> {
        self.store.recent_alerts(limit)
    }

    pub fn subscribe(&self) -> Subscription {
        self.hub.subscribe()
    }

    pub fn unsubscribe(&self, id: Uuid) {
        self.hub.unsubscribe(id);
    }

    async fn spawn_workers(&self) {
        let token = CancellationToken::new();
        {
            let mut cancel = self.cancel.lock().await;
            if let Some(stale) = cancel.replace(token.clone()) {
                stale.cancel();
            }
        }

        let mut workers = self.workers.lock().await;
        for handle in workers.drain(..) {
            handle.abort();
        }

        for simulator in Simulator::bench(&self.settings.sensors) {
            let controller = self.clone();
            let cancel = token.clone();
            workers.push(tokio::spawn(simulator_loop(simulator, controller, cancel)));
        }
    }

    async fn halt_workers(&self) -> Result<()> {
        if let Some(token) = self.cancel.lock().await.take() {
            token.cancel();
        }

        let handles: Vec<JoinHandle<()>> = {
            let mut workers = self.workers.lock().await;
            workers.drain(..).collect()
        };
        for handle in handles {
            handle
                .await
                .context("simulator worker failed to join")?;
        }
        Ok(())
    }
}

/// One worker per instrument: ticks at the nominal period until cancelled.
async fn simulator_loop(
    mut simulator: Simulator,
    controller: SessionController,
    cancel: CancellationToken,
) {
    let mut ticker = time::interval(simulator.period());
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let now = epoch_seconds();
                if let Some(reading) = simulator.tick(now) {
                    controller.ingest(reading).await;
                }
            }
            _ = cancel.cancelled() => {
                debug!("{} simulator shutting down", simulator.sensor_type().as_str());
                break;
            }
        }
    }
}

fn epoch_seconds() -> f64 {
    Utc::now().timestamp_micros() as f64 / 1_000_000.0
}
