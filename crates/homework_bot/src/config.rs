use std::fmt;

use clap::Parser;
use url::Url;

use crate::logging::LogDestination;

pub const DEFAULT_ENDPOINT: &str = "https://practicum.yandex.ru/api/user_api/homework_statuses/";
pub const DEFAULT_TELEGRAM_API: &str = "https://api.telegram.org";

/// Command-line arguments; every flag can also come from the environment.
#[derive(Parser, Debug)]
#[command(name = "homework_bot")]
#[command(about = "Relays homework review status changes to a Telegram chat")]
#[command(version)]
pub struct Args {
    /// OAuth token for the homework status API
    #[arg(long, env = "PRACTICUM_TOKEN", hide_env_values = true)]
    practicum_token: Option<String>,

    /// Telegram bot token
    #[arg(long, env = "TELEGRAM_TOKEN", hide_env_values = true)]
    telegram_token: Option<String>,

    /// Chat that receives notifications
    #[arg(long, env = "TELEGRAM_CHAT_ID")]
    telegram_chat_id: Option<String>,

    /// Homework status endpoint
    #[arg(long, env = "HOMEWORK_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Telegram Bot API base URL
    #[arg(long, env = "TELEGRAM_API_URL", default_value = DEFAULT_TELEGRAM_API)]
    telegram_api_url: String,

    /// Unix timestamp for the first poll (defaults to now)
    #[arg(long, env = "HOMEWORK_FROM_DATE")]
    from_date: Option<i64>,

    /// Where log lines go
    #[arg(long, env = "HOMEWORK_BOT_LOG", value_enum, default_value_t = LogDestination::Both)]
    pub log: LogDestination,
}

/// Reads `.env` from the working directory, then parses the command line.
/// Variables already set in the environment take precedence over the file.
pub fn load_args() -> Result<Args, clap::Error> {
    dotenvy::dotenv().ok();
    Args::try_parse()
}

/// Splits clap's result: help and version output come back as `Err` so the
/// caller can print them, anything else is a configuration failure.
pub fn args_error(err: clap::Error) -> Result<ConfigError, clap::Error> {
    use clap::error::ErrorKind;

    match err.kind() {
        ErrorKind::DisplayHelp
        | ErrorKind::DisplayVersion
        | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => Err(err),
        _ => {
            let rendered = err.to_string();
            let first = rendered.lines().next().unwrap_or_default();
            Ok(ConfigError::InvalidArgument(
                first.trim_start_matches("error:").trim().to_string(),
            ))
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("required token <{0}> is missing")]
    Missing(&'static str),
    #[error("<{name}> is not a valid url: {reason}")]
    InvalidUrl { name: &'static str, reason: String },
    #[error("invalid arguments: {0}")]
    InvalidArgument(String),
}

/// Validated settings, built once at startup.
pub struct BotConfig {
    pub practicum_token: String,
    pub telegram_token: String,
    pub chat_id: String,
    pub endpoint: Url,
    pub telegram_api: Url,
    pub from_date: i64,
}

impl BotConfig {
    pub fn from_args(args: Args) -> Result<Self, ConfigError> {
        Ok(Self {
            practicum_token: required(args.practicum_token, "PRACTICUM_TOKEN")?,
            telegram_token: required(args.telegram_token, "TELEGRAM_TOKEN")?,
            chat_id: required(args.telegram_chat_id, "TELEGRAM_CHAT_ID")?,
            endpoint: parse_url(&args.endpoint, "HOMEWORK_ENDPOINT")?,
            telegram_api: parse_url(&args.telegram_api_url, "TELEGRAM_API_URL")?,
            from_date: args
                .from_date
                .unwrap_or_else(|| chrono::Utc::now().timestamp()),
        })
    }
}

impl fmt::Debug for BotConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BotConfig")
            .field("practicum_token", &"<redacted>")
            .field("telegram_token", &"<redacted>")
            .field("chat_id", &self.chat_id)
            .field("endpoint", &self.endpoint.as_str())
            .field("telegram_api", &self.telegram_api.as_str())
            .field("from_date", &self.from_date)
            .finish()
    }
}

fn required(value: Option<String>, name: &'static str) -> Result<String, ConfigError> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or(ConfigError::Missing(name))
}

fn parse_url(raw: &str, name: &'static str) -> Result<Url, ConfigError> {
    Url::parse(raw).map_err(|err| ConfigError::InvalidUrl {
        name,
        reason: err.to_string(),
    })
}
