use async_trait::async_trait;
use futures_util::SinkExt;
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::http::header::{HeaderValue, USER_AGENT};
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use tracing::debug;
use url::Url;

use crate::error::{ConnectError, TransmitError};

/// Write side of one long-lived connection, owned by exactly one replay task.
#[async_trait]
pub trait FrameSink: Send {
    /// Send one complete text frame.
    async fn send_text(&mut self, frame: &str) -> Result<(), TransmitError>;

    /// Best-effort orderly shutdown. Called once, on every exit path after connecting.
    async fn close(&mut self);
}

/// Opens connections for replay tasks.
#[async_trait]
pub trait Connector: Send + Sync + 'static {
    type Sink: FrameSink + 'static;

    /// Connect to `endpoint`, identifying as `client_id` in the handshake.
    async fn connect(&self, endpoint: &str, client_id: &str) -> Result<Self::Sink, ConnectError>;
}

/// Plain/TLS WebSocket connector backed by tokio-tungstenite.
#[derive(Debug, Clone, Copy, Default)]
pub struct WsConnector;

pub struct WsConnection {
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

#[async_trait]
impl Connector for WsConnector {
    type Sink = WsConnection;

    async fn connect(&self, endpoint: &str, client_id: &str) -> Result<WsConnection, ConnectError> {
        let url = Url::parse(endpoint).map_err(|source| ConnectError::InvalidEndpoint {
            endpoint: endpoint.to_string(),
            source,
        })?;

        let mut request = url.as_str().into_client_request()?;
        request
            .headers_mut()
            .insert(USER_AGENT, HeaderValue::from_str(client_id)?);

        let (stream, response) = connect_async(request).await?;
        debug!(status = %response.status(), "handshake complete");
        Ok(WsConnection { stream })
    }
}

#[async_trait]
impl FrameSink for WsConnection {
    async fn send_text(&mut self, frame: &str) -> Result<(), TransmitError> {
        self.stream.send(Message::Text(frame.to_owned())).await?;
        Ok(())
    }

    async fn close(&mut self) {
        if let Err(e) = self.stream.close(None).await {
            debug!(error = %e, "close handshake failed");
        }
    }
}
