use std::collections::HashSet;

use chrono::{DateTime, Local, NaiveDateTime};
use stadtwache_client::messaging::{ChannelDirectory, ChatMessage};
use stadtwache_client::roster::Roster;
use stadtwache_client::{
    ApiClient, ChatUpdate, ClientError, Config, Conversation, CurrentUser, Messenger, Notice,
};
use stadtwache_shared::constants::{APP_NAME, DEFAULT_CHANNEL};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::error::RecvError;

const HELP: &str = "Befehle: /channel <id>, /dm <user-id>, /new <name>, /remove <id>, /users, /unread, /quit";

/// What the terminal has already printed for the open view.
#[derive(Default)]
struct Screen {
    printed: HashSet<String>,
}

impl Screen {
    fn reset(&mut self) {
        self.printed.clear();
    }

    fn show(&mut self, message: &ChatMessage) {
        if self.printed.insert(message.id().to_string()) {
            println!("{}", format_line(message));
        }
    }
}

fn clock(sent_at: Option<&str>) -> String {
    let Some(raw) = sent_at else {
        return "--:--".to_string();
    };
    if let Ok(at) = DateTime::parse_from_rfc3339(raw) {
        return at.with_timezone(&Local).format("%H:%M").to_string();
    }
    match NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        Ok(at) => at.format("%H:%M").to_string(),
        Err(_) => raw.to_string(),
    }
}

fn format_line(message: &ChatMessage) -> String {
    let name = if message.is_own {
        "Ich"
    } else {
        message.message.sender_name.as_str()
    };
    format!(
        "[{}] {}: {}",
        clock(message.message.sent_at()),
        name,
        message.message.content
    )
}

async fn show_view(messenger: &Messenger, screen: &mut Screen) {
    if let Some(active) = messenger.active().await {
        println!("── {} ──", active);
    }
    for message in messenger.snapshot().await {
        screen.show(&message);
    }
}

async fn open(messenger: &Messenger, screen: &mut Screen, conversation: Conversation) {
    screen.reset();
    if let Err(e) = messenger.open(conversation).await {
        println!("{}", Notice::from_error(&e, "Nachrichten konnten nicht geladen werden"));
    }
    show_view(messenger, screen).await;
}

async fn render(update: ChatUpdate, messenger: &Messenger, screen: &mut Screen, roster: &mut Roster) {
    match update {
        ChatUpdate::MessageAppended(message) => screen.show(&message),
        ChatUpdate::MessageUpdated { message, .. } => {
            screen.printed.insert(message.id().to_string());
        }
        ChatUpdate::HistoryLoaded { .. } => {
            for message in messenger.snapshot().await {
                screen.show(&message);
            }
        }
        ChatUpdate::UnreadChanged {
            conversation,
            count,
        } if count > 0 => println!("({} neue in {})", count, conversation),
        ChatUpdate::Presence { user_id, online } => {
            if roster.apply_presence(&user_id, online) {
                tracing::debug!("{} is now {}", user_id, if online { "online" } else { "offline" });
            }
        }
        ChatUpdate::Connected => println!("Echtzeitverbindung hergestellt"),
        ChatUpdate::Disconnected => println!("Echtzeitverbindung getrennt, es wird weiter abgefragt"),
        ChatUpdate::UnreadChanged { .. } | ChatUpdate::MessageRemoved { .. } => {}
    }
}

/// Returns false when the user asked to quit.
async fn handle_line(
    line: &str,
    messenger: &Messenger,
    screen: &mut Screen,
    channels: &mut ChannelDirectory,
    roster: &Roster,
) -> bool {
    let (command, arg) = match line.trim().split_once(' ') {
        Some((command, arg)) => (command, arg.trim()),
        None => (line.trim(), ""),
    };

    match command {
        "/quit" => return false,
        "/help" => println!("{}", HELP),
        "/channel" => {
            if channels.contains(arg) {
                open(messenger, screen, Conversation::channel(arg)).await;
            } else {
                println!("{}", Notice::invalid("Kanal nicht gefunden"));
            }
        }
        "/dm" if !arg.is_empty() => {
            open(messenger, screen, Conversation::direct(arg)).await;
        }
        "/new" => match channels.create(arg) {
            Ok(channel) => {
                let id = channel.id.clone();
                println!("Kanal \"{}\" wurde erstellt", channel.label);
                open(messenger, screen, Conversation::channel(id)).await;
            }
            Err(reason) => println!("{}", Notice::invalid(reason)),
        },
        "/remove" => {
            let active = match messenger.active().await {
                Some(Conversation::Channel(name)) => name,
                _ => String::new(),
            };
            match channels.remove(arg, &active) {
                Ok(next) if next != active => {
                    open(messenger, screen, Conversation::channel(next)).await;
                }
                Ok(_) => println!("Kanal wurde gelöscht"),
                Err(reason) => println!("{}", Notice::invalid(reason)),
            }
        }
        "/users" => {
            for (status, entries) in roster.by_status() {
                println!("{}:", status);
                for entry in entries {
                    let dot = if entry.online { "●" } else { "○" };
                    println!("  {} [{}] {} ({}) {}", dot, entry.initials, entry.username, entry.role, entry.id);
                }
            }
        }
        "/unread" => {
            let counts = messenger.unread_counts().await;
            if counts.is_empty() {
                println!("Keine ungelesenen Nachrichten");
            }
            for (conversation, count) in counts {
                println!("{}: {}", conversation, count);
            }
        }
        _ if command.starts_with('/') => println!("{}", HELP),
        _ => {
            messenger.set_draft(line).await;
            match messenger.send().await {
                Ok(_) => {}
                Err(ClientError::Invalid(reason)) => println!("{}", Notice::invalid(reason)),
                Err(e) => println!(
                    "{}",
                    Notice::from_error(&e, "Nachricht konnte nicht gesendet werden")
                ),
            }
        }
    }
    true
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "stadtwache=info,stadtwache_client=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env();
    let Some(session) = config.session.clone() else {
        tracing::error!("STADTWACHE_TOKEN and STADTWACHE_USER_ID must be set");
        std::process::exit(2);
    };
    let api = match ApiClient::new(&config) {
        Ok(api) => api.with_token(&session.token),
        Err(e) => {
            tracing::error!("Invalid configuration: {}", e);
            std::process::exit(2);
        }
    };

    tracing::info!(
        "{} client for {} running against {}",
        APP_NAME,
        session.username,
        config.backend_url
    );

    let messenger = Messenger::new(
        config.clone(),
        api.clone(),
        CurrentUser {
            id: session.user_id.clone(),
            username: session.username.clone(),
        },
    );
    let mut updates = messenger.subscribe();
    let mut screen = Screen::default();
    let mut channels = ChannelDirectory::default();
    let mut roster = Roster::load(&api, &session.user_id)
        .await
        .unwrap_or_else(|e| {
            tracing::warn!("Error loading users: {}", e);
            Roster::default()
        });

    messenger.connect().await;
    open(&messenger, &mut screen, Conversation::channel(DEFAULT_CHANNEL)).await;
    let poller = messenger.spawn_poller(config.poll_interval);
    println!("{}", HELP);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            update = updates.recv() => match update {
                Ok(update) => render(update, &messenger, &mut screen, &mut roster).await,
                Err(RecvError::Lagged(skipped)) => tracing::warn!("Skipped {} updates", skipped),
                Err(RecvError::Closed) => break,
            },
            line = lines.next_line() => match line {
                Ok(Some(line)) => {
                    if !handle_line(&line, &messenger, &mut screen, &mut channels, &roster).await {
                        break;
                    }
                }
                Ok(None) => break,
                Err(e) => {
                    tracing::error!("Error reading input: {}", e);
                    break;
                }
            },
        }
    }

    messenger.shutdown().await;
    let _ = poller.await;
}
