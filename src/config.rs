use std::{fmt, path::Path, time::Duration};

use url::Url;

use crate::errors::ConfigError;

pub const DEFAULT_ENDPOINT: &str = "https://practicum.yandex.ru/api/user_api/homework_statuses/";
pub const DEFAULT_TELEGRAM_API_BASE_URL: &str = "https://api.telegram.org";
pub const DEFAULT_RETRY_PERIOD_SECS: u64 = 600;

const PRACTICUM_TOKEN: &str = "PRACTICUM_TOKEN";
const TELEGRAM_TOKEN: &str = "TELEGRAM_TOKEN";
const TELEGRAM_CHAT_ID: &str = "TELEGRAM_CHAT_ID";

/// The three secrets the bot cannot run without.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub practicum_token: String,
    pub telegram_token: String,
    pub telegram_chat_id: String,
}

// Tokens must never end up in logs.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("practicum_token", &"<redacted>")
            .field("telegram_token", &"<redacted>")
            .field("telegram_chat_id", &self.telegram_chat_id)
            .finish()
    }
}

impl Credentials {
    /// Reads all three credentials, reporting every missing one at once.
    /// Blank values count as missing.
    pub fn from_lookup<F>(lookup: &F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut missing = Vec::new();
        let mut require = |name: &'static str| -> String {
            match lookup(name).filter(|value| !value.trim().is_empty()) {
                Some(value) => value,
                None => {
                    missing.push(name);
                    String::new()
                }
            }
        };

        let practicum_token = require(PRACTICUM_TOKEN);
        let telegram_token = require(TELEGRAM_TOKEN);
        let telegram_chat_id = require(TELEGRAM_CHAT_ID);

        if !missing.is_empty() {
            return Err(ConfigError::MissingCredentials(missing));
        }

        Ok(Self {
            practicum_token,
            telegram_token,
            telegram_chat_id,
        })
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub credentials: Credentials,
    pub endpoint: Url,
    pub telegram_api_base_url: String,
    pub retry_period: Duration,
    pub request_timeout: Option<Duration>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let credentials = Credentials::from_lookup(&lookup)?;

        let endpoint = match lookup("HW_ENDPOINT") {
            Some(raw) => {
                let endpoint =
                    Url::parse(&raw).map_err(|e| ConfigError::invalid_value("HW_ENDPOINT", e))?;
                log::info!("Using homework endpoint from HW_ENDPOINT: {endpoint}");
                endpoint
            }
            None => Url::parse(DEFAULT_ENDPOINT)
                .map_err(|e| ConfigError::invalid_value("HW_ENDPOINT", e))?,
        };

        let telegram_api_base_url = match lookup("TELEGRAM_API_BASE_URL") {
            Some(raw) => {
                Url::parse(&raw)
                    .map_err(|e| ConfigError::invalid_value("TELEGRAM_API_BASE_URL", e))?;
                log::info!("Using Telegram API from TELEGRAM_API_BASE_URL: {raw}");
                raw.trim_end_matches('/').to_string()
            }
            None => DEFAULT_TELEGRAM_API_BASE_URL.to_string(),
        };

        let retry_period = match parse_secs(&lookup, "HW_RETRY_PERIOD_SECS")? {
            Some(0) => {
                return Err(ConfigError::invalid_value(
                    "HW_RETRY_PERIOD_SECS",
                    "must be greater than zero",
                ))
            }
            Some(secs) => {
                log::info!("Using retry period from HW_RETRY_PERIOD_SECS: {secs}s");
                Duration::from_secs(secs)
            }
            None => Duration::from_secs(DEFAULT_RETRY_PERIOD_SECS),
        };

        let request_timeout =
            parse_secs(&lookup, "HW_REQUEST_TIMEOUT_SECS")?.map(Duration::from_secs);

        Ok(Self {
            credentials,
            endpoint,
            telegram_api_base_url,
            retry_period,
            request_timeout,
        })
    }
}

fn parse_secs<F>(lookup: &F, name: &'static str) -> Result<Option<u64>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name)
        .map(|raw| {
            raw.trim()
                .parse::<u64>()
                .map_err(|e| ConfigError::invalid_value(name, e))
        })
        .transpose()
}

/// Loads `path` into the process environment. Variables already set win.
pub fn load_env_file(path: &Path) -> Result<(), ConfigError> {
    dotenvy::from_path(path)
        .map(|_| ())
        .map_err(|e| ConfigError::EnvFile(format!("{}: {e}", path.display())))
}
