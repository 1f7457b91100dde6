//! Error types for the simulator.
//!
//! Every failure is contained by the replay task that hit it. Only
//! [`ReplayError`] ever leaves a task, and only as far as its log line.

use std::path::PathBuf;

use thiserror::Error;
use tokio_tungstenite::tungstenite;
use tokio_tungstenite::tungstenite::http::header::InvalidHeaderValue;

/// Opening the outbound stream failed.
#[derive(Error, Debug)]
pub enum ConnectError {
    #[error("invalid endpoint {endpoint}: {source}")]
    InvalidEndpoint {
        endpoint: String,
        #[source]
        source: url::ParseError,
    },

    #[error("invalid client identifier: {0}")]
    InvalidClientId(#[from] InvalidHeaderValue),

    #[error("handshake failed: {0}")]
    Handshake(#[from] tungstenite::Error),
}

/// A single frame could not be delivered. Never fatal to the replay.
#[derive(Error, Debug)]
pub enum TransmitError {
    #[error("failed to encode reading: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("temperature {0} has no JSON representation")]
    NonFiniteTemperature(f64),

    #[error("failed to send frame: {0}")]
    Send(#[from] tungstenite::Error),
}

/// Reasons a replay task stops before it has streamed its whole source.
#[derive(Error, Debug)]
pub enum ReplayError {
    #[error("could not connect: {0}")]
    Connect(#[from] ConnectError),

    #[error("could not open source {}: {source}", path.display())]
    SourceOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not read source {}: {source}", path.display())]
    SourceRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed source {}: {source}", path.display())]
    SourceFormat {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

pub type Result<T> = std::result::Result<T, ReplayError>;
