//! WebSocket connection handle and the bridge event loop.
//!
//! [`Connection`] owns the one socket opened per run. [`run_bridge`] drives
//! it: inbound frames and console events are fed through a single
//! [`UiBridge`] in arrival order, and the resulting actions are rendered or
//! transmitted before the next event is taken.

use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use tokio::io::AsyncWrite;
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};
use uuid::Uuid;

use super::endpoint::Endpoint;
use super::messages::{ClientEvent, ServerEvent};
use crate::console;
use crate::domain::{BridgeAction, BridgeEvent};
use crate::error::BridgeError;
use crate::service::UiBridge;

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// The single live connection to the console server.
pub struct Connection {
    session_id: Uuid,
    endpoint: Endpoint,
    sink: SplitSink<WsStream, Message>,
    stream: SplitStream<WsStream>,
}

impl std::fmt::Debug for Connection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Connection")
            .field("session_id", &self.session_id)
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

impl Connection {
    /// Performs the WebSocket handshake with `endpoint`.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::Transport`] if the TCP connect or the
    /// handshake fails. `wss` endpoints also fail unless the crate was
    /// built with the `tls` feature.
    pub async fn open(endpoint: &Endpoint) -> Result<Self, BridgeError> {
        let session_id = Uuid::new_v4();
        tracing::debug!(%session_id, %endpoint, "opening websocket");

        let (socket, response) = connect_async(endpoint.uri().clone()).await?;
        tracing::debug!(%session_id, status = %response.status(), "handshake complete");

        let (sink, stream) = socket.split();
        Ok(Self {
            session_id,
            endpoint: endpoint.clone(),
            sink,
            stream,
        })
    }

    /// Session id used to correlate log records for this connection.
    #[must_use]
    pub const fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// Sends one event. Fire-and-forget: there is no acknowledgment.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::Codec`] if the event cannot be encoded and
    /// [`BridgeError::Transport`] if the socket rejects the frame.
    pub async fn emit(&mut self, event: &ClientEvent) -> Result<(), BridgeError> {
        let json = event.encode()?;
        self.sink.send(Message::text(json)).await?;
        tracing::debug!(session_id = %self.session_id, event = event.event_name(), "event sent");
        Ok(())
    }

    /// Waits for the next frame. `None` means the stream ended.
    pub async fn next_frame(&mut self) -> Option<Result<Message, BridgeError>> {
        self.stream
            .next()
            .await
            .map(|frame| frame.map_err(BridgeError::from))
    }

    /// Sends a close frame. Errors are ignored; the peer may already be gone.
    pub async fn close(mut self) {
        let _ = self.sink.close().await;
    }
}

/// Runs the bridge until the server closes the connection.
///
/// Dispatches `Connected` first, then multiplexes inbound frames with the
/// console events arriving on `ui_rx`. Rendered output is written to `out`.
/// When `ui_rx` closes, output keeps streaming until the server closes.
///
/// Returns the bridge so callers can inspect the final display state.
///
/// # Errors
///
/// Returns [`BridgeError::Io`] if writing to `out` fails. Transport
/// failures end the loop without an error.
pub async fn run_bridge<W>(
    mut connection: Connection,
    viewport_height: usize,
    mut ui_rx: mpsc::Receiver<BridgeEvent>,
    out: &mut W,
) -> Result<UiBridge, BridgeError>
where
    W: AsyncWrite + Unpin,
{
    let session_id = connection.session_id();
    let mut bridge = UiBridge::new(session_id, viewport_height);
    bridge.dispatch(BridgeEvent::Connected);

    let mut ui_open = true;

    loop {
        let event = tokio::select! {
            frame = connection.next_frame() => {
                match frame {
                    Some(Ok(Message::Text(text))) => match inbound_event(text.as_str()) {
                        Some(event) => event,
                        None => continue,
                    },
                    Some(Ok(Message::Close(frame))) => {
                        tracing::debug!(%session_id, ?frame, "server closed connection");
                        break;
                    }
                    Some(Ok(_)) => continue,
                    Some(Err(err)) => {
                        tracing::warn!(%session_id, code = err.error_code(), error = %err, "websocket read failed");
                        break;
                    }
                    None => break,
                }
            }
            ui = ui_rx.recv(), if ui_open => {
                match ui {
                    Some(event) => event,
                    None => {
                        ui_open = false;
                        tracing::debug!(%session_id, "console input closed");
                        continue;
                    }
                }
            }
        };

        match bridge.dispatch(event) {
            BridgeAction::None => {}
            BridgeAction::Render {
                fragment,
                scroll_top,
            } => {
                console::render(out, &fragment).await?;
                tracing::trace!(%session_id, scroll_top, "viewport at newest output");
            }
            BridgeAction::Emit(outbound) => {
                if let Err(err) = connection.emit(&outbound).await {
                    tracing::warn!(%session_id, code = err.error_code(), error = %err, "send failed");
                    break;
                }
            }
        }
    }

    connection.close().await;
    tracing::info!(%session_id, bytes = bridge.display().len(), "websocket disconnected");
    Ok(bridge)
}

/// Maps a text frame to a bridge event, logging frames that carry none.
fn inbound_event(text: &str) -> Option<BridgeEvent> {
    match ServerEvent::decode(text) {
        Ok(Some(ServerEvent::DockerOutput(payload))) => {
            Some(BridgeEvent::OutputReceived(payload.output))
        }
        Ok(Some(ServerEvent::CommandOutput(payload))) => {
            tracing::warn!(output = %payload.output, "server reported command failure");
            None
        }
        Ok(None) => {
            tracing::debug!("ignoring unknown event");
            None
        }
        Err(err) => {
            tracing::debug!(code = err.error_code(), error = %err, "ignoring malformed frame");
            None
        }
    }
}
