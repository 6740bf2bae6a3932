//! Document-change notifications over WebSocket.
//!
//! One subscription per signed-in session, no reconnection: when the
//! socket drops, a single `Disconnected` message is delivered and the
//! reader ends. The subscriber decides whether to resubscribe.

use crate::backend::{BackendClient, ClientError};
use futures_util::StreamExt;
use serde::Deserialize;
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};

/// Wildcard event names carried in a notification's `events` array.
pub const DOCUMENT_CREATE: &str = "databases.*.collections.*.documents.*.create";
pub const DOCUMENT_UPDATE: &str = "databases.*.collections.*.documents.*.update";
pub const DOCUMENT_DELETE: &str = "databases.*.collections.*.documents.*.delete";

/// Channel covering every document of one collection.
pub fn collection_channel(database_id: &str, collection_id: &str) -> String {
    format!(
        "databases.{}.collections.{}.documents",
        database_id, collection_id
    )
}

/// Frame shape pushed by the realtime endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum RealtimeFrame {
    Connected {
        #[serde(default)]
        data: serde_json::Value,
    },
    Event {
        data: RealtimeEvent,
    },
    Error {
        #[serde(default)]
        data: serde_json::Value,
    },
}

/// One document-change notification.
#[derive(Debug, Clone, Deserialize)]
pub struct RealtimeEvent {
    #[serde(default)]
    pub events: Vec<String>,
    #[serde(default)]
    pub channels: Vec<String>,
    #[serde(default)]
    pub payload: serde_json::Value,
}

impl RealtimeEvent {
    pub fn touches_channel(&self, channel: &str) -> bool {
        self.channels.iter().any(|c| c == channel)
    }

    pub fn has_event(&self, name: &str) -> bool {
        self.events.iter().any(|e| e == name)
    }

    fn is_document_write(&self) -> bool {
        self.has_event(DOCUMENT_CREATE)
            || self.has_event(DOCUMENT_UPDATE)
            || self.has_event(DOCUMENT_DELETE)
    }
}

/// What a notification obliges the app to re-fetch. Notifications never
/// carry state the app keeps; they only invalidate it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Refresh {
    HabitsAndCompletions,
    Completions,
    Nothing,
}

/// Maps a notification to the lists it invalidates. Any write to the
/// habits collection invalidates both lists; a new completion invalidates
/// only today's completions; everything else is ignored.
pub fn classify(event: &RealtimeEvent, habits_channel: &str, completions_channel: &str) -> Refresh {
    if event.touches_channel(habits_channel) && event.is_document_write() {
        return Refresh::HabitsAndCompletions;
    }
    if event.touches_channel(completions_channel) && event.has_event(DOCUMENT_CREATE) {
        return Refresh::Completions;
    }
    Refresh::Nothing
}

/// Messages delivered to the subscriber's receiver.
#[derive(Debug, Clone)]
pub enum RealtimeMessage {
    Connected,
    Event(RealtimeEvent),
    Error { message: String },
    Disconnected { reason: String },
}

/// Live subscription handle. Dropping it aborts the reader task, so
/// teardown happens on every exit path (sign-out, screen change, process
/// end) without a dedicated unsubscribe call.
pub struct Subscription {
    handle: JoinHandle<()>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[derive(Clone)]
pub struct RealtimeClient {
    client: BackendClient,
}

impl RealtimeClient {
    pub fn new(client: BackendClient) -> Self {
        Self { client }
    }

    /// Opens the socket for the given channels and spawns a reader that
    /// forwards decoded frames into the returned receiver.
    pub async fn subscribe(
        &self,
        channels: &[String],
    ) -> Result<(Subscription, mpsc::Receiver<RealtimeMessage>), ClientError> {
        let url = self.client.realtime_url(channels);
        let (stream, _) = tokio_tungstenite::connect_async(url.as_str()).await?;
        let (sender, receiver) = mpsc::channel(64);
        let handle = tokio::spawn(read_frames(stream, sender));
        Ok((Subscription { handle }, receiver))
    }
}

async fn read_frames(
    mut stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
    sender: mpsc::Sender<RealtimeMessage>,
) {
    while let Some(message) = stream.next().await {
        match message {
            Ok(Message::Text(text)) => match serde_json::from_str::<RealtimeFrame>(&text) {
                Ok(RealtimeFrame::Connected { .. }) => {
                    let _ = sender.send(RealtimeMessage::Connected).await;
                }
                Ok(RealtimeFrame::Event { data }) => {
                    let _ = sender.send(RealtimeMessage::Event(data)).await;
                }
                Ok(RealtimeFrame::Error { data }) => {
                    let _ = sender
                        .send(RealtimeMessage::Error {
                            message: data.to_string(),
                        })
                        .await;
                }
                Err(err) => {
                    let _ = sender
                        .send(RealtimeMessage::Error {
                            message: format!("decode error: {}", err),
                        })
                        .await;
                }
            },
            Ok(Message::Binary(_)) => {}
            Ok(Message::Close(_)) => break,
            Ok(_) => {}
            Err(err) => {
                let _ = sender
                    .send(RealtimeMessage::Error {
                        message: err.to_string(),
                    })
                    .await;
                break;
            }
        }
    }
    let _ = sender
        .send(RealtimeMessage::Disconnected {
            reason: "connection closed".to_string(),
        })
        .await;
}
