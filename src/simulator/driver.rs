use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::info;

use crate::config::Settings;
use crate::simulator::replay::PatientReplay;
use crate::websocket::Connector;

/// Launch one replay task per configured source, numbered from 1.
///
/// Tasks share nothing but the connector; each gets its own copy of the
/// replay configuration.
pub fn spawn_replays<C: Connector>(settings: &Settings, connector: Arc<C>) -> Vec<JoinHandle<()>> {
    let config = settings.replay_config();
    settings
        .patient_files
        .iter()
        .enumerate()
        .map(|(index, path)| {
            let replay = PatientReplay::new(Arc::clone(&connector), config.clone(), path.clone(), index + 1);
            tokio::spawn(replay.run())
        })
        .collect()
}

/// Start every replay and then park forever. Tasks finishing does not end the process.
pub async fn run_forever<C: Connector>(settings: &Settings, connector: Arc<C>) {
    let handles = spawn_replays(settings, connector);
    info!(tasks = handles.len(), "simulation running");
    std::future::pending::<()>().await;
}
