//! Outbound stream to the monitoring backend.

pub mod client;

pub use client::{Connector, FrameSink, WsConnection, WsConnector};
