use std::path::PathBuf;
use std::sync::Arc;

use tracing::{error, info, instrument, warn};

use crate::config::ReplayConfig;
use crate::core::data;
use crate::error::{Result, TransmitError};
use crate::models::VitalReading;
use crate::websocket::{Connector, FrameSink};

/// Outcome of a replay that got as far as streaming its source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayReport {
    pub patient: usize,
    pub total: usize,
    pub sent: usize,
    pub failed: usize,
}

/// Streams one patient's recorded history, once, over its own connection.
pub struct PatientReplay<C: Connector> {
    connector: Arc<C>,
    config: ReplayConfig,
    source: PathBuf,
    patient: usize,
}

impl<C: Connector> PatientReplay<C> {
    /// `patient` is the 1-based ordinal used in log lines.
    pub fn new(connector: Arc<C>, config: ReplayConfig, source: impl Into<PathBuf>, patient: usize) -> Self {
        Self {
            connector,
            config,
            source: source.into(),
            patient,
        }
    }

    /// Run to completion, logging any failure. This is the task boundary.
    pub async fn run(self) {
        match self.replay().await {
            Ok(report) => info!(
                patient = report.patient,
                sent = report.sent,
                failed = report.failed,
                "simulation complete"
            ),
            Err(e) => error!(patient = self.patient, source = %self.source.display(), error = %e, "simulation aborted"),
        }
    }

    #[instrument(skip(self), fields(patient = self.patient, source = %self.source.display()))]
    pub async fn replay(&self) -> Result<ReplayReport> {
        info!("starting simulation");

        let mut sink = self
            .connector
            .connect(&self.config.endpoint, &self.config.client_id)
            .await?;
        info!(endpoint = %self.config.endpoint, "connected");

        let outcome = self.stream(&mut sink).await;
        sink.close().await;
        outcome
    }

    async fn stream(&self, sink: &mut C::Sink) -> Result<ReplayReport> {
        let records = data::load_records(&self.source).await?;
        let rows = data::data_rows(&records);
        let total = rows.len();
        info!(total, "sending records");

        let mut report = ReplayReport {
            patient: self.patient,
            total,
            sent: 0,
            failed: 0,
        };

        for (index, row) in rows.iter().enumerate() {
            let reading = data::parse_record(row);
            match transmit(sink, &reading).await {
                Ok(frame) => {
                    report.sent += 1;
                    info!(
                        record = index + 1,
                        total,
                        timestamp = %reading.timestamp,
                        frame = %frame,
                        "record sent"
                    );
                }
                Err(e) => {
                    report.failed += 1;
                    warn!(record = index + 1, total, error = %e, "failed to send record");
                }
            }

            tokio::time::sleep(self.config.send_interval).await;
        }

        Ok(report)
    }
}

async fn transmit<S: FrameSink>(sink: &mut S, reading: &VitalReading) -> std::result::Result<String, TransmitError> {
    let frame = reading.to_frame()?;
    sink.send_text(&frame).await?;
    Ok(frame)
}
