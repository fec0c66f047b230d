use std::fmt;

use reqwest::StatusCode;
use thiserror::Error;

/// Everything that can go wrong during a single poll cycle.
///
/// The set is closed: the monitor matches on [`BotError::kind`] to decide how a
/// failure is reported, so adding a variant forces a decision there too.
#[derive(Debug, Error)]
pub enum BotError {
    // Fetch
    #[error("homework API is unreachable: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("homework API answered with status {0}")]
    UnexpectedStatus(StatusCode),
    #[error("homework API returned a body that is not JSON: {0}")]
    Decode(#[from] serde_json::Error),

    // Validation
    #[error("unexpected response shape: {0}")]
    Shape(String),
    #[error("response has no `{0}` key")]
    MissingKey(&'static str),

    // Review status
    #[error("unknown homework status `{0}`")]
    UnknownStatus(String),
}

/// Coarse classification used for logging and reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Server unreachable or malfunctioning.
    Fetch,
    /// Response did not have the documented structure.
    Validation,
    /// A homework record carried a status we have no verdict for.
    UnknownStatus,
}

impl BotError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            BotError::Transport(_) | BotError::UnexpectedStatus(_) | BotError::Decode(_) => {
                ErrorKind::Fetch
            }
            BotError::Shape(_) | BotError::MissingKey(_) => ErrorKind::Validation,
            BotError::UnknownStatus(_) => ErrorKind::UnknownStatus,
        }
    }

    pub fn shape(message: impl Into<String>) -> Self {
        BotError::Shape(message.into())
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Fetch => write!(f, "fetch"),
            ErrorKind::Validation => write!(f, "validation"),
            ErrorKind::UnknownStatus => write!(f, "unknown-status"),
        }
    }
}

/// Failures delivering a message to Telegram. These are only ever logged.
#[derive(Debug, Error)]
pub enum TelegramError {
    #[error("request to Telegram failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Telegram API error ({status}): {body}")]
    Api { status: StatusCode, body: String },
    #[error("Telegram rejected the message: {0}")]
    Rejected(String),
}

/// Startup configuration problems. All of them are fatal.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required environment variables: {}", .0.join(", "))]
    MissingCredentials(Vec<&'static str>),
    #[error("invalid {name}: {message}")]
    InvalidValue { name: &'static str, message: String },
    #[error("could not load env file: {0}")]
    EnvFile(String),
}

impl ConfigError {
    pub fn invalid_value(name: &'static str, message: impl fmt::Display) -> Self {
        ConfigError::InvalidValue {
            name,
            message: message.to_string(),
        }
    }
}

/// Render an error together with its `source()` chain on one line.
pub fn error_chain(err: &dyn std::error::Error) -> String {
    let mut rendered = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        rendered.push_str(": ");
        rendered.push_str(&cause.to_string());
        source = cause.source();
    }
    rendered
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_failures_share_a_kind() {
        let status = BotError::UnexpectedStatus(StatusCode::SERVICE_UNAVAILABLE);
        let decode = BotError::from(serde_json::from_str::<serde_json::Value>("<html>").unwrap_err());
        assert_eq!(status.kind(), ErrorKind::Fetch);
        assert_eq!(decode.kind(), ErrorKind::Fetch);
    }

    #[test]
    fn test_validation_and_status_kinds() {
        assert_eq!(BotError::MissingKey("homeworks").kind(), ErrorKind::Validation);
        assert_eq!(BotError::shape("not an object").kind(), ErrorKind::Validation);
        assert_eq!(
            BotError::UnknownStatus("lost".into()).kind(),
            ErrorKind::UnknownStatus
        );
    }

    #[test]
    fn test_display_includes_status_code() {
        let err = BotError::UnexpectedStatus(StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(
            err.to_string(),
            "homework API answered with status 503 Service Unavailable"
        );
    }

    #[test]
    fn test_missing_credentials_lists_every_name() {
        let err = ConfigError::MissingCredentials(vec!["PRACTICUM_TOKEN", "TELEGRAM_CHAT_ID"]);
        assert_eq!(
            err.to_string(),
            "missing required environment variables: PRACTICUM_TOKEN, TELEGRAM_CHAT_ID"
        );
    }

    #[test]
    fn test_error_chain_without_source() {
        let err = BotError::MissingKey("current_date");
        assert_eq!(error_chain(&err), "response has no `current_date` key");
    }
}
