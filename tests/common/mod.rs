#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use healthgo_simulator::config::ReplayConfig;
use healthgo_simulator::error::{ConnectError, TransmitError};
use healthgo_simulator::websocket::{Connector, FrameSink};
use tokio::time::Instant;
use tokio_tungstenite::tungstenite;

pub const INTERVAL: Duration = Duration::from_millis(200);

pub fn replay_config() -> ReplayConfig {
    ReplayConfig {
        endpoint: "ws://backend.test/ws".to_string(),
        client_id: "HealthGo-Desktop-Simulator".to_string(),
        send_interval: INTERVAL,
    }
}

pub fn write_source(dir: &Path, name: &str, lines: &[&str]) -> PathBuf {
    let path = dir.join(name);
    let mut body = lines.join("\n");
    body.push('\n');
    std::fs::write(&path, body).unwrap();
    path
}

/// A frame as the recording sink saw it.
#[derive(Debug, Clone)]
pub struct Sent {
    pub at: Instant,
    pub frame: serde_json::Value,
}

/// Everything the mock connections observed, across all of them.
#[derive(Debug, Default)]
pub struct Ledger {
    pub connects: AtomicUsize,
    pub closes: AtomicUsize,
    pub drops: AtomicUsize,
    pub sent: Mutex<Vec<Sent>>,
}

impl Ledger {
    pub fn frames_for(&self, patient_id: &str) -> Vec<Sent> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.frame["paciente_id"] == patient_id)
            .cloned()
            .collect()
    }

    pub fn count(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }
}

/// Hands out recording sinks. Optionally refuses the first `refuse` connects
/// and fails the `fail_frame`-th send (0-based) on every sink.
#[derive(Debug, Default)]
pub struct RecordingConnector {
    pub ledger: Arc<Ledger>,
    pub refuse: usize,
    pub fail_frame: Option<usize>,
}

pub struct RecordingSink {
    ledger: Arc<Ledger>,
    fail_frame: Option<usize>,
    attempts: usize,
}

#[async_trait]
impl Connector for RecordingConnector {
    type Sink = RecordingSink;

    async fn connect(&self, _endpoint: &str, _client_id: &str) -> Result<RecordingSink, ConnectError> {
        let attempt = self.ledger.connects.fetch_add(1, Ordering::SeqCst);
        if attempt < self.refuse {
            return Err(ConnectError::Handshake(tungstenite::Error::ConnectionClosed));
        }
        Ok(RecordingSink {
            ledger: Arc::clone(&self.ledger),
            fail_frame: self.fail_frame,
            attempts: 0,
        })
    }
}

#[async_trait]
impl FrameSink for RecordingSink {
    async fn send_text(&mut self, frame: &str) -> Result<(), TransmitError> {
        let attempt = self.attempts;
        self.attempts += 1;
        if self.fail_frame == Some(attempt) {
            return Err(TransmitError::Send(tungstenite::Error::AlreadyClosed));
        }
        self.ledger.sent.lock().unwrap().push(Sent {
            at: Instant::now(),
            frame: serde_json::from_str(frame).unwrap(),
        });
        Ok(())
    }

    async fn close(&mut self) {
        self.ledger.closes.fetch_add(1, Ordering::SeqCst);
    }
}

impl Drop for RecordingSink {
    fn drop(&mut self) {
        self.ledger.drops.fetch_add(1, Ordering::SeqCst);
    }
}
