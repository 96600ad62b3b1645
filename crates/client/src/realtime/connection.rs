use futures::{SinkExt, StreamExt};
use stadtwache_shared::rooms::private_pair;
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::Message as WsMessage;
use tokio_util::sync::CancellationToken;
use url::Url;

use super::events::{ClientEvent, OutgoingMessage, RealtimeEvent, ServerEvent};
use crate::config::Config;
use crate::error::ClientError;

/// Sending half of a live realtime connection.
///
/// Delivery is best-effort and at-most-once; a lost connection is reported
/// as [`RealtimeEvent::Disconnected`] and is not re-established.
#[derive(Clone)]
pub struct RealtimeHandle {
    tx: mpsc::UnboundedSender<ClientEvent>,
    cancel: CancellationToken,
}

impl RealtimeHandle {
    pub fn emit(&self, event: ClientEvent) -> Result<(), ClientError> {
        if self.cancel.is_cancelled() {
            return Err(ClientError::NotConnected);
        }
        self.tx.send(event).map_err(|_| ClientError::NotConnected)
    }

    pub fn join_user_room(&self, user_id: &str) -> Result<(), ClientError> {
        self.emit(ClientEvent::JoinUserRoom(user_id.to_string()))
    }

    pub fn join_channel(&self, channel: &str) -> Result<(), ClientError> {
        self.emit(ClientEvent::JoinChannel(channel.to_string()))
    }

    /// Join the pairwise room of `a` and `b`; the ids go out in canonical order.
    pub fn join_private_room(&self, a: &str, b: &str) -> Result<(), ClientError> {
        let (user1, user2) = private_pair(a, b);
        self.emit(ClientEvent::JoinPrivateRoom {
            user1: user1.to_string(),
            user2: user2.to_string(),
        })
    }

    pub fn send_message(&self, message: OutgoingMessage) -> Result<(), ClientError> {
        self.emit(ClientEvent::SendMessage(message))
    }

    pub fn is_open(&self) -> bool {
        !self.cancel.is_cancelled()
    }

    /// Close the connection. Queued frames are dropped.
    pub fn close(&self) {
        self.cancel.cancel();
    }
}

/// Websocket URL for the backend in `config`, authenticated with `token`.
pub fn realtime_url(config: &Config, token: &str) -> Result<Url, ClientError> {
    let mut url = Url::parse(&config.backend_url)?;
    let scheme = match url.scheme() {
        "https" => "wss",
        "http" => "ws",
        other => {
            return Err(ClientError::Realtime(format!(
                "unsupported backend scheme {}",
                other
            )))
        }
    };
    url.set_scheme(scheme)
        .map_err(|_| ClientError::Realtime(format!("cannot switch scheme to {}", scheme)))?;
    url.set_path(&config.realtime_path);
    url.query_pairs_mut().clear().append_pair("token", token);
    Ok(url)
}

/// Open the realtime connection and announce presence in the user's room.
pub async fn connect(
    config: &Config,
    token: &str,
    user_id: &str,
) -> Result<(RealtimeHandle, mpsc::UnboundedReceiver<RealtimeEvent>), ClientError> {
    let url = realtime_url(config, token)?;
    let (socket, _) = tokio_tungstenite::connect_async(url.as_str()).await?;
    let (mut ws_tx, mut ws_rx) = socket.split();

    let (out_tx, mut out_rx) = mpsc::unbounded_channel::<ClientEvent>();
    let (event_tx, event_rx) = mpsc::unbounded_channel::<RealtimeEvent>();
    let cancel = CancellationToken::new();

    let _ = event_tx.send(RealtimeEvent::Connected);

    // Task to forward outbound events to the socket
    let writer_cancel = cancel.clone();
    tokio::spawn(async move {
        loop {
            tokio::select! {
                _ = writer_cancel.cancelled() => {
                    let _ = ws_tx.send(WsMessage::Close(None)).await;
                    break;
                }
                next = out_rx.recv() => match next {
                    Some(event) => {
                        let text = match serde_json::to_string(&event) {
                            Ok(t) => t,
                            Err(e) => {
                                tracing::warn!("Dropping unserializable event: {}", e);
                                continue;
                            }
                        };
                        if ws_tx.send(WsMessage::Text(text.into())).await.is_err() {
                            break;
                        }
                    }
                    None => {
                        let _ = ws_tx.send(WsMessage::Close(None)).await;
                        break;
                    }
                }
            }
        }
    });

    // Receive loop
    let reader_cancel = cancel.clone();
    tokio::spawn(async move {
        loop {
            let frame = tokio::select! {
                _ = reader_cancel.cancelled() => break,
                frame = ws_rx.next() => frame,
            };
            match frame {
                Some(Ok(WsMessage::Text(text))) => {
                    let text_str: &str = &text;
                    match serde_json::from_str::<ServerEvent>(text_str) {
                        Ok(event) => {
                            if event_tx.send(RealtimeEvent::Server(event)).is_err() {
                                break;
                            }
                        }
                        Err(_) => tracing::trace!("Ignoring realtime frame: {}", text_str),
                    }
                }
                Some(Ok(WsMessage::Close(_))) | None => break,
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    tracing::warn!("Realtime connection error: {}", e);
                    break;
                }
            }
        }
        reader_cancel.cancel();
        let _ = event_tx.send(RealtimeEvent::Disconnected);
        tracing::info!("Realtime connection closed");
    });

    let handle = RealtimeHandle { tx: out_tx, cancel };
    handle.join_user_room(user_id)?;
    tracing::info!("Realtime connected as {}", user_id);

    Ok((handle, event_rx))
}
