pub mod config;
pub mod hub;
pub mod models;
pub mod session;
pub mod simulators;
pub mod store;
pub mod validation;

pub use config::Settings;
pub use hub::{BroadcastHub, Subscription};
pub use models::{
    CameraFrame, Reading, ReadingValue, SensorType, SessionReport, SessionSnapshot, StreamFrame,
    Verdict, VerdictStatus,
};
pub use session::{SessionController, SessionStatus};
pub use store::HistoryStore;
pub use validation::{Thresholds, Validator};

/// Wires a pipeline from settings: store, hub, and validator are built here
/// and handed to the controller, which owns them for the process lifetime.
pub fn build_pipeline(settings: Settings) -> SessionController {
    let store = HistoryStore::new(
        settings.buffers.history_capacity,
        settings.buffers.alert_capacity,
    );
    let hub = BroadcastHub::new(settings.buffers.hub_queue_depth);
    let validator = Validator::new(settings.thresholds.clone());
    SessionController::new(settings, store, hub, validator)
}
