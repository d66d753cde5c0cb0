//! Layered runtime configuration for the widget binary.
//!
//! Precedence: CLI flag > CLI env var > `WIDGET_`-prefixed env var > config
//! file > built-in defaults.

use clap::Parser;
use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Command-line interface for the widget binary.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file path
    #[arg(short, long, env = "CONFIG_FILE")]
    pub config: Option<String>,

    /// Base URL of the booking backend
    #[arg(long, env = "API_BASE_URL")]
    pub base_url: Option<String>,

    /// Path of the session storage file
    #[arg(long, env = "SESSION_FILE")]
    pub session_file: Option<String>,

    /// Milliseconds to wait before the welcome message on first open
    #[arg(long, env = "WELCOME_DELAY_MS")]
    pub welcome_delay_ms: Option<u64>,
}

/// Resolved widget configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct WidgetConfig {
    pub api: ApiConfig,
    pub session: SessionConfig,
    pub ui: UiConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    /// Base URL the two endpoints are joined onto.
    pub base_url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SessionConfig {
    /// File holding the persisted `chat_session_id`.
    pub storage_path: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct UiConfig {
    /// Delay before the one-shot welcome message.
    pub welcome_delay_ms: u64,
}

impl WidgetConfig {
    /// Load from process arguments and environment.
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from_args(std::env::args())
    }

    /// Load from explicit arguments; tests drive this directly.
    pub fn load_from_args<I, T>(args: I) -> Result<Self, config::ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let cli =
            Cli::try_parse_from(args).map_err(|e| config::ConfigError::Message(e.to_string()))?;

        let mut builder = Config::builder()
            .set_default("api.base_url", "http://127.0.0.1:5000")?
            .set_default("session.storage_path", ".salon-chat/session.json")?
            .set_default("ui.welcome_delay_ms", 200)?;

        // Config file: explicit path wins, otherwise ./widget.yaml if present.
        if let Some(path) = &cli.config {
            builder = builder.add_source(File::with_name(path));
        } else if Path::new("widget.yaml").exists() {
            builder = builder.add_source(File::with_name("widget"));
        }

        // Environment variables, e.g. WIDGET_API__BASE_URL.
        builder = builder.add_source(
            Environment::with_prefix("WIDGET")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        // CLI overrides (clap already folded its own env fallbacks in).
        if let Some(base_url) = cli.base_url {
            builder = builder.set_override("api.base_url", base_url)?;
        }
        if let Some(session_file) = cli.session_file {
            builder = builder.set_override("session.storage_path", session_file)?;
        }
        if let Some(delay) = cli.welcome_delay_ms {
            builder = builder.set_override("ui.welcome_delay_ms", delay)?;
        }

        let cfg = builder.build()?;
        cfg.try_deserialize()
    }
}
