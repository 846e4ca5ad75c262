//! Handles settings for the application.
//!
//! Sources, later ones winning: built-in defaults, `settings.toml` (or the
//! file passed with `--config`), `TRACKER__*` environment variables, then the
//! command line.
use clap::Parser;
use config::{Config, Environment, File};
use engine::ValidationPolicy;
use serde::Deserialize;
use thiserror::Error;

const DEFAULT_CONFIG_PATH: &str = "settings";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("config error: {0}")]
    Config(#[from] config::ConfigError),
}

#[derive(Debug, Deserialize)]
pub struct App {
    pub level: String,
}

#[derive(Debug, Deserialize)]
pub struct Server {
    pub bind: String,
    pub port: u16,
}

#[derive(Debug, Deserialize)]
pub struct Store {
    pub path: String,
    pub create_missing: bool,
    pub track_type: bool,
    pub validation: ValidationPolicy,
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub app: App,
    pub server: Server,
    pub store: Store,
}

#[derive(Debug, Parser)]
#[command(name = "tracker", about = "Expense tracker HTTP API")]
struct Args {
    /// Optional config file path (TOML).
    #[arg(long)]
    config: Option<String>,
    /// Override listening port.
    #[arg(long)]
    port: Option<u16>,
    /// Override the path of the JSON document.
    #[arg(long)]
    data: Option<String>,
}

impl Settings {
    pub fn new() -> Result<Self, SettingsError> {
        let args = Args::parse();
        let config_path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);

        let mut builder = Config::builder()
            .set_default("app.level", "info")?
            .set_default("server.bind", "127.0.0.1")?
            .set_default("server.port", 8000)?
            .set_default("store.path", "data/expenses.json")?
            .set_default("store.create_missing", true)?
            .set_default("store.track_type", false)?
            .set_default("store.validation", "strict")?
            .add_source(File::with_name(config_path).required(args.config.is_some()))
            .add_source(
                Environment::with_prefix("TRACKER")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            );

        if let Some(port) = args.port {
            builder = builder.set_override("server.port", i64::from(port))?;
        }
        if let Some(data) = args.data {
            builder = builder.set_override("store.path", data)?;
        }

        Ok(builder.build()?.try_deserialize()?)
    }
}
