use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use stadtwache_shared::rooms::user_room;
use tokio::sync::{broadcast, mpsc, RwLock};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::api::ApiClient;
use crate::config::{Config, SendMode};
use crate::error::ClientError;
use crate::models::Message;
use crate::realtime::{self, OutgoingMessage, RealtimeEvent, RealtimeHandle, ServerEvent};

use super::conversation::Conversation;
use super::history;
use super::list::{ChatMessage, Confirm};
use super::state::{ChatState, PendingSend, Routing};

const UPDATE_CAPACITY: usize = 256;
const MIN_POLL_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: String,
    pub username: String,
}

/// Change notifications for whatever renders the chat.
#[derive(Debug, Clone, PartialEq)]
pub enum ChatUpdate {
    Connected,
    Disconnected,
    HistoryLoaded {
        conversation: Conversation,
        count: usize,
    },
    MessageAppended(ChatMessage),
    /// The entry `local_id` was settled as `message`.
    MessageUpdated {
        local_id: String,
        message: ChatMessage,
    },
    MessageRemoved {
        id: String,
    },
    UnreadChanged {
        conversation: Conversation,
        count: u32,
    },
    Presence {
        user_id: String,
        online: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Loaded {
    Applied(usize),
    /// The view changed while the request was running; nothing was applied.
    Stale,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SendOutcome {
    /// Nothing to send.
    Skipped,
    Sent(ChatMessage),
}

/// One place for loading, sending and receiving chat messages, whichever
/// screen is showing them.
///
/// Cheap to clone; clones share state, connection and update channel.
#[derive(Clone)]
pub struct Messenger {
    api: ApiClient,
    config: Config,
    user: CurrentUser,
    state: Arc<RwLock<ChatState>>,
    realtime: Arc<RwLock<Option<RealtimeHandle>>>,
    joined_rooms: Arc<RwLock<HashSet<String>>>,
    updates: broadcast::Sender<ChatUpdate>,
    shutdown: CancellationToken,
}

impl Messenger {
    pub fn new(config: Config, api: ApiClient, user: CurrentUser) -> Self {
        let (updates, _) = broadcast::channel(UPDATE_CAPACITY);
        Self {
            state: Arc::new(RwLock::new(ChatState::new(&user.id, &user.username))),
            api,
            config,
            user,
            realtime: Arc::new(RwLock::new(None)),
            joined_rooms: Arc::new(RwLock::new(HashSet::new())),
            updates,
            shutdown: CancellationToken::new(),
        }
    }

    pub fn user(&self) -> &CurrentUser {
        &self.user
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ChatUpdate> {
        self.updates.subscribe()
    }

    fn publish(&self, update: ChatUpdate) {
        // No subscribers is fine.
        let _ = self.updates.send(update);
    }

    pub async fn snapshot(&self) -> Vec<ChatMessage> {
        self.state.read().await.messages().as_slice().to_vec()
    }

    pub async fn active(&self) -> Option<Conversation> {
        self.state.read().await.active().cloned()
    }

    pub async fn unread(&self, conversation: &Conversation) -> u32 {
        self.state.read().await.unread().get(conversation)
    }

    pub async fn unread_counts(&self) -> Vec<(Conversation, u32)> {
        let state = self.state.read().await;
        let mut counts: Vec<(Conversation, u32)> = state
            .unread()
            .iter()
            .map(|(c, n)| (c.clone(), n))
            .collect();
        counts.sort();
        counts
    }

    pub async fn draft(&self) -> String {
        self.state.read().await.draft().to_string()
    }

    pub async fn set_draft(&self, text: impl Into<String>) {
        self.state.write().await.set_draft(text);
    }

    pub async fn is_connected(&self) -> bool {
        self.realtime
            .read()
            .await
            .as_ref()
            .is_some_and(|h| h.is_open())
    }

    /// Open the realtime connection and start applying its events.
    ///
    /// Failure is logged and reported as `false`; REST and polling keep
    /// working without it.
    pub async fn connect(&self) -> bool {
        let Some(token) = self.api.token().map(str::to_string) else {
            tracing::warn!("No session token, realtime connection skipped");
            return false;
        };

        match realtime::connect(&self.config, &token, &self.user.id).await {
            Ok((handle, events)) => {
                if let Some(previous) = self.realtime.write().await.replace(handle) {
                    previous.close();
                }
                {
                    let mut rooms = self.joined_rooms.write().await;
                    rooms.clear();
                    rooms.insert(user_room(&self.user.id));
                }
                self.spawn_event_pump(events);
                if let Some(active) = self.active().await {
                    self.join_room(&active).await;
                }
                true
            }
            Err(e) => {
                tracing::error!("Realtime connection failed: {}", e);
                false
            }
        }
    }

    async fn join_room(&self, conversation: &Conversation) {
        let guard = self.realtime.read().await;
        let Some(handle) = guard.as_ref() else {
            return;
        };

        let room = conversation.room(&self.user.id);
        let newly_joined = self.joined_rooms.write().await.insert(room.clone());
        if !newly_joined {
            tracing::debug!("Already in room {}", room);
            return;
        }

        let result = match conversation {
            Conversation::Channel(name) => handle.join_channel(name),
            Conversation::Direct { peer } => handle.join_private_room(&self.user.id, peer),
        };
        match result {
            Ok(()) => tracing::info!("Joined room {}", room),
            Err(e) => {
                tracing::warn!("Could not join room {}: {}", room, e);
                self.joined_rooms.write().await.remove(&room);
            }
        }
    }

    /// Switch the view to `conversation` and load its history.
    pub async fn open(&self, conversation: Conversation) -> Result<Loaded, ClientError> {
        let cleared = {
            let mut state = self.state.write().await;
            let cleared = state.unread().get(&conversation);
            state.open(conversation.clone());
            cleared
        };
        if cleared > 0 {
            self.publish(ChatUpdate::UnreadChanged {
                conversation: conversation.clone(),
                count: 0,
            });
        }

        self.join_room(&conversation).await;
        self.load_history().await
    }

    /// Load the active view's history. On failure the list is emptied.
    pub async fn load_history(&self) -> Result<Loaded, ClientError> {
        self.fetch_history(true).await
    }

    /// Re-fetch the active view's history. On failure the list is kept.
    pub async fn refresh(&self) -> Result<Loaded, ClientError> {
        self.fetch_history(false).await
    }

    async fn fetch_history(&self, clear_on_error: bool) -> Result<Loaded, ClientError> {
        let (conversation, generation) = {
            let state = self.state.read().await;
            match state.active() {
                Some(c) => (c.clone(), state.generation()),
                None => return Ok(Loaded::Applied(0)),
            }
        };

        match history::load(&self.api, &self.user.id, &conversation).await {
            Ok(messages) => {
                let count = messages.len();
                if !self.state.write().await.apply_history(generation, messages) {
                    tracing::debug!("Discarding stale history for {}", conversation);
                    return Ok(Loaded::Stale);
                }
                tracing::debug!("Loaded {} messages for {}", count, conversation);
                self.publish(ChatUpdate::HistoryLoaded {
                    conversation,
                    count,
                });
                Ok(Loaded::Applied(count))
            }
            Err(e) => {
                tracing::error!("Error loading messages for {}: {}", conversation, e);
                if clear_on_error && self.state.write().await.apply_history(generation, Vec::new())
                {
                    self.publish(ChatUpdate::HistoryLoaded {
                        conversation,
                        count: 0,
                    });
                }
                Err(e)
            }
        }
    }

    /// Send the current draft to the active view.
    pub async fn send(&self) -> Result<SendOutcome, ClientError> {
        let pending = {
            let mut state = self.state.write().await;
            match state.begin_send() {
                Ok(Some(pending)) => pending,
                Ok(None) => return Ok(SendOutcome::Skipped),
                Err(reason) => return Err(ClientError::Invalid(reason)),
            }
        };
        self.publish(ChatUpdate::MessageAppended(pending.optimistic.clone()));

        let result = match self.config.send_mode {
            SendMode::Rest => self.api.post_message(&pending.request).await.map(Some),
            SendMode::Realtime => self.emit_message(&pending).await.map(|_| None),
        };

        match result {
            Ok(Some(stored)) => Ok(SendOutcome::Sent(self.settle(&pending, stored).await)),
            // Confirmed later by the realtime echo.
            Ok(None) => Ok(SendOutcome::Sent(pending.optimistic)),
            Err(e) => {
                tracing::error!("Error sending message to {}: {}", pending.conversation, e);
                let removed = self.state.write().await.fail_send(&pending);
                if removed {
                    self.publish(ChatUpdate::MessageRemoved {
                        id: pending.local_id.clone(),
                    });
                }
                Err(e)
            }
        }
    }

    async fn settle(&self, pending: &PendingSend, stored: Message) -> ChatMessage {
        let fallback = ChatMessage::from_message(stored.clone(), &self.user.id);
        let outcome = self.state.write().await.confirm_send(pending, stored);
        match outcome {
            Confirm::Replaced(message) => {
                self.publish(ChatUpdate::MessageUpdated {
                    local_id: pending.local_id.clone(),
                    message: message.clone(),
                });
                message
            }
            Confirm::AlreadyPresent(message) => {
                self.publish(ChatUpdate::MessageRemoved {
                    id: pending.local_id.clone(),
                });
                message
            }
            Confirm::Missing => fallback,
        }
    }

    async fn emit_message(&self, pending: &PendingSend) -> Result<(), ClientError> {
        let guard = self.realtime.read().await;
        let handle = guard.as_ref().ok_or(ClientError::NotConnected)?;
        handle.send_message(OutgoingMessage {
            content: pending.request.content.clone(),
            channel: pending.request.channel.clone(),
            recipient_id: pending.request.recipient_id.clone(),
            sender_id: self.user.id.clone(),
            sender_name: self.user.username.clone(),
            message_type: pending.request.message_type.clone(),
            created_at: Utc::now().to_rfc3339(),
        })
    }

    pub async fn delete(&self, message_id: &str) -> Result<(), ClientError> {
        self.api.delete_message(message_id).await?;
        if self.state.write().await.remove(message_id).is_some() {
            self.publish(ChatUpdate::MessageRemoved {
                id: message_id.to_string(),
            });
        }
        Ok(())
    }

    /// Route a message pushed by the server.
    pub async fn receive(&self, message: Message) -> Routing {
        let routing = self.state.write().await.receive(message);
        match &routing {
            Routing::Appended(message) => {
                self.publish(ChatUpdate::MessageAppended(message.clone()));
            }
            Routing::Reconciled { local_id, message } => {
                self.publish(ChatUpdate::MessageUpdated {
                    local_id: local_id.clone(),
                    message: message.clone(),
                });
            }
            Routing::Unread {
                conversation,
                count,
            } => {
                tracing::debug!("Unread {} in {}", count, conversation);
                self.publish(ChatUpdate::UnreadChanged {
                    conversation: conversation.clone(),
                    count: *count,
                });
            }
            Routing::Duplicate | Routing::Ignored => {}
        }
        routing
    }

    /// Apply one realtime event. Returns false once the connection is gone.
    pub async fn handle_realtime_event(&self, event: RealtimeEvent) -> bool {
        match event {
            RealtimeEvent::Connected => {
                tracing::info!("Realtime connected");
                self.publish(ChatUpdate::Connected);
            }
            RealtimeEvent::Disconnected => {
                let current_lost = {
                    let mut guard = self.realtime.write().await;
                    // A newer connection may already be in place.
                    let lost = guard.as_ref().is_some_and(|h| !h.is_open());
                    if lost {
                        *guard = None;
                        self.joined_rooms.write().await.clear();
                    }
                    lost
                };
                if current_lost {
                    tracing::info!("Realtime disconnected");
                    self.publish(ChatUpdate::Disconnected);
                } else {
                    tracing::debug!("Replaced realtime connection closed");
                }
                return false;
            }
            RealtimeEvent::Server(ServerEvent::NewMessage(message)) => {
                self.receive(message).await;
            }
            RealtimeEvent::Server(ServerEvent::MessageDeleted { message_id, .. }) => {
                if self.state.write().await.remove(&message_id).is_some() {
                    self.publish(ChatUpdate::MessageRemoved { id: message_id });
                }
            }
            RealtimeEvent::Server(ServerEvent::UserOnline { user_id }) => {
                self.publish(ChatUpdate::Presence {
                    user_id,
                    online: true,
                });
            }
            RealtimeEvent::Server(ServerEvent::UserOffline { user_id }) => {
                self.publish(ChatUpdate::Presence {
                    user_id,
                    online: false,
                });
            }
            RealtimeEvent::Server(ServerEvent::UserStatusUpdate(payload)) => {
                if let Some((user_id, online)) = presence_of(&payload) {
                    self.publish(ChatUpdate::Presence { user_id, online });
                }
            }
            RealtimeEvent::Server(ServerEvent::JoinedRoom { room }) => {
                tracing::debug!("Server confirmed room {}", room);
            }
        }
        true
    }

    fn spawn_event_pump(&self, mut events: mpsc::UnboundedReceiver<RealtimeEvent>) {
        let messenger = self.clone();
        tokio::spawn(async move {
            loop {
                let event = tokio::select! {
                    _ = messenger.shutdown.cancelled() => break,
                    event = events.recv() => event,
                };
                let Some(event) = event else { break };
                if !messenger.handle_realtime_event(event).await {
                    break;
                }
            }
        });
    }

    /// Re-fetch the active view every `every` until shutdown. Complements
    /// realtime delivery and covers for it when the socket is down.
    pub fn spawn_poller(&self, every: Duration) -> JoinHandle<()> {
        let messenger = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every.max(MIN_POLL_INTERVAL));
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first tick completes immediately.
            ticker.tick().await;
            loop {
                tokio::select! {
                    _ = messenger.shutdown.cancelled() => break,
                    _ = ticker.tick() => {
                        if let Err(e) = messenger.refresh().await {
                            tracing::debug!("Poll failed: {}", e);
                        }
                    }
                }
            }
        })
    }

    /// Stop the poller and event pump and close the realtime connection.
    pub async fn shutdown(&self) {
        self.shutdown.cancel();
        if let Some(handle) = self.realtime.write().await.take() {
            handle.close();
        }
        self.joined_rooms.write().await.clear();
    }
}

/// `(user_id, online)` from a `user_status_update` payload.
fn presence_of(payload: &serde_json::Value) -> Option<(String, bool)> {
    let user_id = payload
        .get("user_id")
        .or_else(|| payload.get("id"))?
        .as_str()?
        .to_string();
    let online = payload.get("is_online")?.as_bool()?;
    Some((user_id, online))
}
