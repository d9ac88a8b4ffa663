use std::path::PathBuf;

use anyhow::Result;
use log::{debug, info};
use rigstream::{build_pipeline, Settings, StreamFrame};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging (reads RUST_LOG env var)
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    info!("rigstream starting up...");

    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("rigstream.json"));
    let settings = Settings::load(&config_path)?;

    let controller = build_pipeline(settings);

    // Drain the live stream the way an attached transport would.
    let mut subscription = controller.subscribe();
    let stream_task = tokio::spawn(async move {
        while let Some(frame) = subscription.recv().await {
            match frame {
                StreamFrame::Reading(reading) => {
                    debug!("reading [{}] @ {:.3}", reading.sensor_type.as_str(), reading.timestamp)
                }
                StreamFrame::Verdict(verdict) => {
                    debug!("verdict [{}] {}", verdict.sensor_type.as_str(), verdict.message)
                }
            }
        }
    });

    controller.start().await?;
    info!("recording; press Ctrl-C to stop");

    tokio::signal::ctrl_c().await?;

    let report = controller.stop().await?;
    info!(
        "session {} finished: {} readings, {} alerts, {:.1}s",
        report.session_id, report.total_readings, report.alert_count, report.duration_seconds
    );

    stream_task.abort();
    Ok(())
}
