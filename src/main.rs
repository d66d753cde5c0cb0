//! Salon Chat Widget — terminal front-end
//!
//! Drives the widget controller from a line-oriented REPL against a running
//! booking backend. Plain lines are chat messages; slash commands cover the
//! remaining widget actions.

use mimalloc::MiMalloc;

/// Global allocator for improved performance (M-MIMALLOC-APPS).
#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

use std::time::Duration;

use dotenvy::dotenv;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use salon_chat_widget::api::{BookingForm, HttpApiClient};
use salon_chat_widget::config::WidgetConfig;
use salon_chat_widget::session::{FileSessionStorage, SessionId};
use salon_chat_widget::widget::{ChatWidget, Message, Sender, WidgetView};

/// View that renders widget events as terminal lines.
#[derive(Debug, Default)]
struct TerminalView;

impl WidgetView for TerminalView {
    fn message_appended(&mut self, message: &Message) {
        let tag = match message.sender {
            Sender::User => "you",
            Sender::Bot => "bot",
        };
        println!("{tag}> {}", message.text);
    }

    fn panel_visibility_changed(&mut self, visible: bool) {
        if visible {
            println!("[chat opened]");
        } else {
            println!("[chat closed]");
        }
    }

    fn input_cleared(&mut self) {
        // Terminal input is consumed by reading the line; nothing to clear.
    }

    fn booking_status_changed(&mut self, status: &str) {
        println!("[booking] {status}");
    }
}

const HELP: &str = "commands: /toggle /close /book key=value ... /quit; anything else is sent as a chat message";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing (M-LOG-STRUCTURED)
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(EnvFilter::from_default_env())
        .init();

    // Load .env (if present)
    let _ = dotenv();

    let config = match WidgetConfig::load() {
        Ok(c) => c,
        Err(msg) => {
            eprintln!("Configuration error: {msg}");
            std::process::exit(1);
        }
    };

    info!(
        name: "widget.config.loaded",
        base_url = %config.api.base_url,
        session_file = %config.session.storage_path,
        "Widget configuration loaded"
    );

    let api = HttpApiClient::new(&config.api.base_url)?;
    let storage = FileSessionStorage::new(&config.session.storage_path);
    let session_id = SessionId::load_or_generate(&storage)?;

    info!(
        name: "widget.session.ready",
        session_id = %session_id,
        "Session ready"
    );

    let mut widget = ChatWidget::with_welcome_delay(
        api,
        TerminalView,
        session_id,
        Duration::from_millis(config.ui.welcome_delay_ms),
    );

    println!("{HELP}");
    widget.toggle().await;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        match line {
            "/quit" => break,
            "/toggle" => widget.toggle().await,
            "/close" => widget.close(),
            "/help" => println!("{HELP}"),
            _ if line.starts_with("/book") => match parse_booking(line) {
                Some(form) => widget.submit_booking(&form).await,
                None => {
                    println!("usage: /book service=Haircut name=Rahul date=2025-12-20 time=15:00 [phone=... gender=... age=...]");
                }
            },
            _ => widget.send_message(line).await,
        }
    }

    info!(name: "widget.shutdown", "Exiting");
    Ok(())
}

/// Parse `/book key=value ...` into a booking form.
fn parse_booking(line: &str) -> Option<BookingForm> {
    let rest = line.strip_prefix("/book")?.trim();
    if rest.is_empty() {
        return None;
    }
    let mut fields = Vec::new();
    for token in rest.split_whitespace() {
        let (key, value) = token.split_once('=')?;
        fields.push((key.to_string(), value.to_string()));
    }
    Some(BookingForm::from_fields(fields))
}
