#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::extract::ws::{Message as WsMessage, WebSocket, WebSocketUpgrade};
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use futures::{SinkExt, StreamExt};
use serde_json::{json, Value};
use stadtwache_client::{ApiClient, Config, CurrentUser, Messenger, SendMode};
use tokio::sync::{broadcast, mpsc, RwLock};

pub type ClientId = u64;

struct ConnectedClient {
    user_id: String,
    tx: mpsc::UnboundedSender<String>,
}

/// Room fan-out of the mock realtime gateway.
#[derive(Default)]
pub struct Gateway {
    next_id: AtomicU64,
    clients: RwLock<HashMap<ClientId, ConnectedClient>>,
    rooms: RwLock<HashMap<String, HashSet<ClientId>>>,
    /// Every frame received from a client, tagged with its user id.
    frames: RwLock<Vec<(String, Value)>>,
}

impl Gateway {
    async fn register(&self, user_id: &str, tx: mpsc::UnboundedSender<String>) -> ClientId {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        self.clients.write().await.insert(
            id,
            ConnectedClient {
                user_id: user_id.to_string(),
                tx,
            },
        );
        id
    }

    async fn unregister(&self, client_id: ClientId) {
        self.clients.write().await.remove(&client_id);
        let mut rooms = self.rooms.write().await;
        for members in rooms.values_mut() {
            members.remove(&client_id);
        }
        rooms.retain(|_, members| !members.is_empty());
    }

    async fn join(&self, client_id: ClientId, room: &str) {
        self.rooms
            .write()
            .await
            .entry(room.to_string())
            .or_default()
            .insert(client_id);
    }

    async fn send_to(&self, client_id: ClientId, frame: &Value) {
        if let Some(client) = self.clients.read().await.get(&client_id) {
            let _ = client.tx.send(frame.to_string());
        }
    }

    pub async fn broadcast_room(&self, room: &str, frame: &Value) {
        let members: Vec<ClientId> = match self.rooms.read().await.get(room) {
            Some(members) => members.iter().copied().collect(),
            None => return,
        };
        let text = frame.to_string();
        let clients = self.clients.read().await;
        for id in members {
            if let Some(client) = clients.get(&id) {
                let _ = client.tx.send(text.clone());
            }
        }
    }

    async fn broadcast_all(&self, frame: &Value, except: Option<ClientId>) {
        let text = frame.to_string();
        for (id, client) in self.clients.read().await.iter() {
            if Some(*id) != except {
                let _ = client.tx.send(text.clone());
            }
        }
    }

    pub async fn is_online(&self, user_id: &str) -> bool {
        self.clients
            .read()
            .await
            .values()
            .any(|c| c.user_id == user_id)
    }

    /// Rooms that currently contain a connection of `user_id`.
    pub async fn rooms_of(&self, user_id: &str) -> Vec<String> {
        let clients = self.clients.read().await;
        let mut rooms: Vec<String> = self
            .rooms
            .read()
            .await
            .iter()
            .filter(|(_, members)| {
                members
                    .iter()
                    .any(|id| clients.get(id).is_some_and(|c| c.user_id == user_id))
            })
            .map(|(room, _)| room.clone())
            .collect();
        rooms.sort();
        rooms
    }

    pub async fn frames_from(&self, user_id: &str) -> Vec<Value> {
        self.frames
            .read()
            .await
            .iter()
            .filter(|(from, _)| from == user_id)
            .map(|(_, frame)| frame.clone())
            .collect()
    }

    /// Push a frame to everyone in `room`, bypassing the REST layer.
    pub async fn push(&self, room: &str, event: &str, data: Value) {
        self.broadcast_room(room, &json!({"event": event, "data": data}))
            .await;
    }
}

/// In-memory stand-in for the Stadtwache backend.
pub struct Backend {
    pub gateway: Gateway,
    users: RwLock<Vec<Value>>,
    pub messages: RwLock<Vec<Value>>,
    pub teams: RwLock<Vec<Value>>,
    pub checkins: RwLock<Vec<Value>>,
    pub vacations: RwLock<Vec<Value>>,
    /// "METHOD path?query" of every REST request, in arrival order.
    pub requests: RwLock<Vec<String>>,
    pub post_delay: RwLock<Duration>,
    /// Artificial latency of history requests, by channel name or peer id.
    pub history_delay: RwLock<HashMap<String, Duration>>,
    pub fail_posts: AtomicBool,
    pub fail_history: AtomicBool,
    next_id: AtomicU64,
}

pub fn token_for(user_id: &str) -> String {
    format!("tok-{}", user_id)
}

fn room_of_user(user_id: &str) -> String {
    format!("user_{}", user_id)
}

fn private_room(a: &str, b: &str) -> String {
    if a <= b {
        format!("private_{}_{}", a, b)
    } else {
        format!("private_{}_{}", b, a)
    }
}

fn error(status: StatusCode, detail: &str) -> Response {
    (status, Json(json!({ "detail": detail }))).into_response()
}

impl Backend {
    fn new() -> Self {
        let users = vec![
            json!({"id": "u1", "username": "anna berger", "email": "anna@stadtwache.de",
                   "role": "officer", "rank": "Kommissarin", "status": "Im Dienst",
                   "badge_number": "4711"}),
            json!({"id": "u2", "username": "ben vogel", "email": "ben@stadtwache.de",
                   "role": "officer", "status": "Im Dienst"}),
            json!({"id": "u3", "username": "carla stein", "email": "carla@stadtwache.de",
                   "role": "admin", "status": "Pause"}),
        ];
        Self {
            gateway: Gateway::default(),
            users: RwLock::new(users),
            messages: RwLock::new(Vec::new()),
            teams: RwLock::new(Vec::new()),
            checkins: RwLock::new(Vec::new()),
            vacations: RwLock::new(Vec::new()),
            requests: RwLock::new(Vec::new()),
            post_delay: RwLock::new(Duration::ZERO),
            history_delay: RwLock::new(HashMap::new()),
            fail_posts: AtomicBool::new(false),
            fail_history: AtomicBool::new(false),
            next_id: AtomicU64::new(0),
        }
    }

    fn next_id(&self) -> u64 {
        self.next_id.fetch_add(1, Ordering::SeqCst) + 1
    }

    async fn user(&self, user_id: &str) -> Option<Value> {
        self.users
            .read()
            .await
            .iter()
            .find(|u| u["id"] == user_id)
            .cloned()
    }

    async fn user_by_token(&self, token: &str) -> Option<Value> {
        let user_id = token.strip_prefix("tok-")?;
        self.user(user_id).await
    }

    async fn caller(&self, headers: &HeaderMap) -> Option<Value> {
        let token = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))?;
        self.user_by_token(token).await
    }

    async fn log(&self, line: String) {
        self.requests.write().await.push(line);
    }

    /// Store a message directly, as if sent earlier. Returns its id.
    pub async fn seed_message(&self, mut message: Value) -> String {
        let n = self.next_id();
        let id = format!("m{}", n);
        message["id"] = json!(id);
        if message.get("created_at").is_none() {
            message["created_at"] = json!(timestamp(n));
        }
        self.messages.write().await.push(message);
        id
    }

    /// Store an incoming message and fan it out to the rooms that should see it.
    async fn store_and_fan_out(&self, sender: &Value, body: &Value) -> Value {
        let n = self.next_id();
        let recipient = body.get("recipient_id").cloned().unwrap_or(Value::Null);
        let stored = json!({
            "id": format!("m{}", n),
            "content": body["content"],
            "sender_id": sender["id"],
            "sender_name": sender["username"],
            "recipient_id": recipient,
            "channel": body.get("channel").cloned().unwrap_or(json!("general")),
            "created_at": timestamp(n),
            "message_type": body.get("message_type").cloned().unwrap_or(json!("text")),
        });
        self.messages.write().await.push(stored.clone());

        let frame = json!({"event": "new_message", "data": stored});
        match stored["recipient_id"].as_str() {
            Some(recipient) => {
                let sender_id = stored["sender_id"].as_str().unwrap_or_default();
                self.gateway
                    .broadcast_room(&private_room(sender_id, recipient), &frame)
                    .await;
                self.gateway
                    .broadcast_room(&room_of_user(recipient), &frame)
                    .await;
            }
            None => {
                let channel = stored["channel"].as_str().unwrap_or("general");
                self.gateway
                    .broadcast_room(&format!("channel_{}", channel), &frame)
                    .await;
            }
        }
        stored
    }

    pub async fn set_history_delay(&self, key: &str, delay: Duration) {
        self.history_delay
            .write()
            .await
            .insert(key.to_string(), delay);
    }

    pub async fn message_count(&self) -> usize {
        self.messages.read().await.len()
    }

    pub async fn requests_matching(&self, prefix: &str) -> Vec<String> {
        self.requests
            .read()
            .await
            .iter()
            .filter(|r| r.starts_with(prefix))
            .cloned()
            .collect()
    }
}

fn timestamp(n: u64) -> String {
    format!("2026-10-19T08:{:02}:{:02}", (n / 60) % 60, n % 60)
}

type Shared = State<Arc<Backend>>;

async fn channel_messages(
    State(backend): Shared,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    let channel = query.get("channel").cloned().unwrap_or_default();
    backend
        .log(format!("GET /api/messages?channel={}", channel))
        .await;
    if backend.caller(&headers).await.is_none() {
        return error(StatusCode::UNAUTHORIZED, "Not authenticated");
    }
    let delay = backend.history_delay.read().await.get(&channel).copied();
    if let Some(delay) = delay {
        tokio::time::sleep(delay).await;
    }
    if backend.fail_history.load(Ordering::SeqCst) {
        return error(StatusCode::INTERNAL_SERVER_ERROR, "Datenbankfehler");
    }
    let messages: Vec<Value> = backend
        .messages
        .read()
        .await
        .iter()
        .filter(|m| m["recipient_id"].is_null() && m["channel"] == channel.as_str())
        .cloned()
        .collect();
    Json(messages).into_response()
}

/// Every private message of the caller, newest first, whatever `with` says.
async fn private_messages(
    State(backend): Shared,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    let peer = query.get("with").cloned().unwrap_or_default();
    backend
        .log(format!("GET /api/messages/private?with={}", peer))
        .await;
    let Some(me) = backend.caller(&headers).await else {
        return error(StatusCode::UNAUTHORIZED, "Not authenticated");
    };
    let delay = backend.history_delay.read().await.get(&peer).copied();
    if let Some(delay) = delay {
        tokio::time::sleep(delay).await;
    }
    if backend.fail_history.load(Ordering::SeqCst) {
        return error(StatusCode::INTERNAL_SERVER_ERROR, "Datenbankfehler");
    }
    let mut messages: Vec<Value> = backend
        .messages
        .read()
        .await
        .iter()
        .filter(|m| {
            !m["recipient_id"].is_null()
                && (m["sender_id"] == me["id"] || m["recipient_id"] == me["id"])
        })
        .cloned()
        .collect();
    messages.reverse();
    Json(messages).into_response()
}

async fn post_message(
    State(backend): Shared,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    backend.log("POST /api/messages".to_string()).await;
    let Some(me) = backend.caller(&headers).await else {
        return error(StatusCode::UNAUTHORIZED, "Not authenticated");
    };
    let delay = *backend.post_delay.read().await;
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
    if backend.fail_posts.load(Ordering::SeqCst) {
        return error(StatusCode::INTERNAL_SERVER_ERROR, "Datenbankfehler");
    }
    Json(backend.store_and_fan_out(&me, &body).await).into_response()
}

async fn delete_message(
    State(backend): Shared,
    headers: HeaderMap,
    Path(message_id): Path<String>,
) -> Response {
    backend
        .log(format!("DELETE /api/messages/{}", message_id))
        .await;
    if backend.caller(&headers).await.is_none() {
        return error(StatusCode::UNAUTHORIZED, "Not authenticated");
    }
    let removed = {
        let mut messages = backend.messages.write().await;
        let pos = messages.iter().position(|m| m["id"] == message_id.as_str());
        pos.map(|pos| messages.remove(pos))
    };
    let Some(removed) = removed else {
        return error(StatusCode::NOT_FOUND, "Nachricht nicht gefunden");
    };
    let channel = removed["channel"].as_str().unwrap_or("general").to_string();
    backend
        .gateway
        .push(
            &format!("channel_{}", channel),
            "message_deleted",
            json!({"message_id": message_id, "channel": channel}),
        )
        .await;
    Json(json!({"message": "Nachricht gelöscht"})).into_response()
}

async fn register(State(backend): Shared, Json(body): Json<Value>) -> Response {
    backend.log("POST /api/auth/register".to_string()).await;
    let mut users = backend.users.write().await;
    if users.iter().any(|u| u["email"] == body["email"]) {
        return error(StatusCode::BAD_REQUEST, "Email already registered");
    }
    if !body["badge_number"].is_null() && users.iter().any(|u| u["badge_number"] == body["badge_number"]) {
        return error(StatusCode::BAD_REQUEST, "badge_number already exists");
    }
    let user = json!({
        "id": format!("u{}", users.len() + 1),
        "email": body["email"],
        "username": body["username"],
        "role": body["role"],
        "rank": body["rank"],
        "badge_number": body["badge_number"],
        "department": body["department"],
        "phone": body["phone"],
        "status": "Im Dienst",
    });
    users.push(user.clone());
    Json(user).into_response()
}

async fn profile(State(backend): Shared, headers: HeaderMap) -> Response {
    backend.log("GET /api/user/profile".to_string()).await;
    match backend.caller(&headers).await {
        Some(me) => Json(me).into_response(),
        None => error(StatusCode::UNAUTHORIZED, "Not authenticated"),
    }
}

async fn users_by_status(State(backend): Shared, headers: HeaderMap) -> Response {
    backend.log("GET /api/users/by-status".to_string()).await;
    if backend.caller(&headers).await.is_none() {
        return error(StatusCode::UNAUTHORIZED, "Not authenticated");
    }
    let users = backend.users.read().await.clone();
    let mut groups: HashMap<String, Vec<Value>> = HashMap::new();
    for mut user in users {
        let online = backend
            .gateway
            .is_online(user["id"].as_str().unwrap_or_default())
            .await;
        user["is_online"] = json!(online);
        let status = user["status"].as_str().unwrap_or("Im Dienst").to_string();
        groups.entry(status).or_default().push(user);
    }
    Json(groups).into_response()
}

async fn list_teams(State(backend): Shared, headers: HeaderMap) -> Response {
    backend.log("GET /api/admin/teams".to_string()).await;
    if backend.caller(&headers).await.is_none() {
        return error(StatusCode::UNAUTHORIZED, "Not authenticated");
    }
    Json(backend.teams.read().await.clone()).into_response()
}

async fn create_team(
    State(backend): Shared,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    backend.log("POST /api/admin/teams".to_string()).await;
    if backend.caller(&headers).await.is_none() {
        return error(StatusCode::UNAUTHORIZED, "Not authenticated");
    }
    let mut teams = backend.teams.write().await;
    if teams.iter().any(|t| t["name"] == body["name"]) {
        return error(StatusCode::BAD_REQUEST, "Team existiert bereits");
    }
    let mut team = body.clone();
    team["id"] = json!(format!("t{}", teams.len() + 1));
    teams.push(team.clone());
    Json(team).into_response()
}

async fn check_in(
    State(backend): Shared,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    backend.log("POST /api/checkin".to_string()).await;
    let Some(me) = backend.caller(&headers).await else {
        return error(StatusCode::UNAUTHORIZED, "Not authenticated");
    };
    let checkin = json!({
        "id": format!("c{}", backend.next_id()),
        "user_id": me["id"],
        "user_name": me["username"],
        "timestamp": body["timestamp"],
        "status": body["status"],
        "message": body["message"],
    });
    backend.checkins.write().await.push(checkin.clone());
    Json(checkin).into_response()
}

async fn list_checkins(State(backend): Shared, headers: HeaderMap) -> Response {
    backend.log("GET /api/checkins".to_string()).await;
    let Some(me) = backend.caller(&headers).await else {
        return error(StatusCode::UNAUTHORIZED, "Not authenticated");
    };
    let mine: Vec<Value> = backend
        .checkins
        .read()
        .await
        .iter()
        .filter(|c| c["user_id"] == me["id"])
        .cloned()
        .collect();
    Json(mine).into_response()
}

async fn request_vacation(
    State(backend): Shared,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    backend.log("POST /api/vacations".to_string()).await;
    let Some(me) = backend.caller(&headers).await else {
        return error(StatusCode::UNAUTHORIZED, "Not authenticated");
    };
    let vacation = json!({
        "id": format!("v{}", backend.next_id()),
        "user_id": me["id"],
        "user_name": me["username"],
        "start_date": body["start_date"],
        "end_date": body["end_date"],
        "reason": body["reason"],
        "status": "pending",
    });
    backend.vacations.write().await.push(vacation.clone());
    Json(vacation).into_response()
}

async fn list_vacations(State(backend): Shared, headers: HeaderMap) -> Response {
    backend.log("GET /api/vacations".to_string()).await;
    let Some(me) = backend.caller(&headers).await else {
        return error(StatusCode::UNAUTHORIZED, "Not authenticated");
    };
    let mine: Vec<Value> = backend
        .vacations
        .read()
        .await
        .iter()
        .filter(|v| v["user_id"] == me["id"])
        .cloned()
        .collect();
    Json(mine).into_response()
}

async fn delete_vacation(
    State(backend): Shared,
    headers: HeaderMap,
    Path(vacation_id): Path<String>,
) -> Response {
    backend
        .log(format!("DELETE /api/vacations/{}", vacation_id))
        .await;
    if backend.caller(&headers).await.is_none() {
        return error(StatusCode::UNAUTHORIZED, "Not authenticated");
    }
    let mut vacations = backend.vacations.write().await;
    match vacations.iter().position(|v| v["id"] == vacation_id.as_str()) {
        Some(pos) => {
            vacations.remove(pos);
            Json(json!({"message": "Urlaubsantrag gelöscht"})).into_response()
        }
        None => error(StatusCode::NOT_FOUND, "Urlaubsantrag nicht gefunden"),
    }
}

async fn ws_handler(
    ws: WebSocketUpgrade,
    State(backend): Shared,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    let token = query.get("token").cloned().unwrap_or_default();
    let Some(user) = backend.user_by_token(&token).await else {
        return StatusCode::UNAUTHORIZED.into_response();
    };
    let user_id = user["id"].as_str().unwrap_or_default().to_string();
    ws.on_upgrade(move |socket| handle_socket(socket, backend, user_id))
}

async fn handle_socket(socket: WebSocket, backend: Arc<Backend>, user_id: String) {
    let (mut ws_tx, mut ws_rx) = socket.split();
    let (tx, mut rx) = mpsc::unbounded_channel::<String>();
    let client_id = backend.gateway.register(&user_id, tx).await;

    backend
        .gateway
        .broadcast_all(
            &json!({"event": "user_online", "data": {"user_id": user_id}}),
            Some(client_id),
        )
        .await;

    let send_task = tokio::spawn(async move {
        while let Some(text) = rx.recv().await {
            if ws_tx.send(WsMessage::Text(text.into())).await.is_err() {
                break;
            }
        }
    });

    while let Some(Ok(frame)) = ws_rx.next().await {
        match frame {
            WsMessage::Text(text) => {
                let text_str: &str = &text;
                if let Ok(frame) = serde_json::from_str::<Value>(text_str) {
                    handle_frame(&backend, client_id, &user_id, frame).await;
                }
            }
            WsMessage::Close(_) => break,
            _ => {}
        }
    }

    backend.gateway.unregister(client_id).await;
    backend
        .gateway
        .broadcast_all(
            &json!({"event": "user_offline", "data": {"user_id": user_id}}),
            None,
        )
        .await;
    send_task.abort();
}

async fn handle_frame(backend: &Backend, client_id: ClientId, user_id: &str, frame: Value) {
    backend
        .gateway
        .frames
        .write()
        .await
        .push((user_id.to_string(), frame.clone()));

    let data = &frame["data"];
    let room = match frame["event"].as_str() {
        Some("join_user_room") => data.as_str().map(room_of_user),
        Some("join_channel") => data.as_str().map(|c| format!("channel_{}", c)),
        Some("join_private_room") => match (data["user1"].as_str(), data["user2"].as_str()) {
            (Some(a), Some(b)) => Some(private_room(a, b)),
            _ => None,
        },
        Some("send_message") => {
            if let Some(sender) = backend.user(user_id).await {
                backend.store_and_fan_out(&sender, data).await;
            }
            None
        }
        _ => None,
    };
    if let Some(room) = room {
        backend.gateway.join(client_id, &room).await;
        backend
            .gateway
            .send_to(client_id, &json!({"event": "joined_room", "data": {"room": room}}))
            .await;
    }
}

fn build_router(backend: Arc<Backend>) -> Router {
    Router::new()
        .route("/api/messages", get(channel_messages).post(post_message))
        .route("/api/messages/private", get(private_messages))
        .route("/api/messages/{id}", delete(delete_message))
        .route("/api/auth/register", post(register))
        .route("/api/user/profile", get(profile))
        .route("/api/users/by-status", get(users_by_status))
        .route("/api/admin/teams", get(list_teams).post(create_team))
        .route("/api/checkin", post(check_in))
        .route("/api/checkins", get(list_checkins))
        .route("/api/vacations", get(list_vacations).post(request_vacation))
        .route("/api/vacations/{id}", delete(delete_vacation))
        .route("/ws", get(ws_handler))
        .with_state(backend)
}

pub struct TestServer {
    pub base: String,
    pub backend: Arc<Backend>,
}

impl TestServer {
    pub fn config(&self) -> Config {
        Config::for_backend(&self.base)
    }

    pub fn api_for(&self, user_id: &str) -> ApiClient {
        ApiClient::new(&self.config())
            .unwrap()
            .with_token(token_for(user_id))
    }

    pub fn messenger_for(&self, user_id: &str, send_mode: SendMode) -> Messenger {
        let config = Config {
            send_mode,
            ..self.config()
        };
        Messenger::new(
            config,
            self.api_for(user_id),
            CurrentUser {
                id: user_id.to_string(),
                username: format!("user {}", user_id),
            },
        )
    }
}

/// Start the mock backend on a random TCP port.
pub async fn start_server() -> TestServer {
    let backend = Arc::new(Backend::new());
    let app = build_router(backend.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let base = format!("http://127.0.0.1:{}", addr.port());

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    // Give the server a moment to start
    tokio::time::sleep(Duration::from_millis(50)).await;

    TestServer { base, backend }
}

/// Wait for the first update matching `pred`, up to three seconds.
pub async fn wait_for<T: Clone, F: Fn(&T) -> bool>(
    rx: &mut broadcast::Receiver<T>,
    pred: F,
) -> Option<T> {
    let deadline = tokio::time::Instant::now() + Duration::from_secs(3);
    loop {
        let remaining = deadline.saturating_duration_since(tokio::time::Instant::now());
        match tokio::time::timeout(remaining, rx.recv()).await {
            Ok(Ok(update)) if pred(&update) => return Some(update),
            Ok(Ok(_)) | Ok(Err(broadcast::error::RecvError::Lagged(_))) => continue,
            _ => return None,
        }
    }
}

/// Poll `check` until it holds, up to three seconds.
pub async fn eventually<F, Fut>(check: F) -> bool
where
    F: Fn() -> Fut,
    Fut: std::future::Future<Output = bool>,
{
    for _ in 0..60 {
        if check().await {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    false
}
