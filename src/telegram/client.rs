use super::types::{TelegramConfig, TelegramMessage, TelegramResponse};
use crate::{config::AppConfig, errors::TelegramError};
use reqwest::Client;

/// Anything that can deliver a text message to a chat.
#[allow(async_fn_in_trait)]
pub trait ChatSender {
    async fn send_message(&self, chat_id: &str, text: &str) -> Result<(), TelegramError>;
}

pub struct TelegramClient {
    client: Client,
    config: TelegramConfig,
}

impl TelegramClient {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: Client::new(),
            config: TelegramConfig::from_app_config(config),
        }
    }
}

impl ChatSender for TelegramClient {
    async fn send_message(&self, chat_id: &str, text: &str) -> Result<(), TelegramError> {
        // Plain text: homework names are not escaped for any parse mode.
        let message = TelegramMessage {
            chat_id: chat_id.to_string(),
            text: text.to_string(),
            parse_mode: None,
            disable_web_page_preview: Some(true),
        };

        let response = self
            .client
            .post(self.config.send_message_url())
            .json(&message)
            .send()
            .await
            // The request URL embeds the bot token.
            .map_err(|e| TelegramError::Http(e.without_url()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .map_err(|e| TelegramError::Http(e.without_url()))?;
            return Err(TelegramError::Api { status, body });
        }

        let telegram_response: TelegramResponse<serde_json::Value> = response
            .json()
            .await
            .map_err(|e| TelegramError::Http(e.without_url()))?;

        if !telegram_response.ok {
            let error_msg = telegram_response
                .description
                .unwrap_or_else(|| "Unknown Telegram API error".to_string());
            return Err(TelegramError::Rejected(error_msg));
        }

        if telegram_response.result.is_some() {
            Ok(())
        } else {
            Err(TelegramError::Rejected(
                "No result in Telegram response".to_string(),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_transport_error_does_not_leak_token() {
        let config = AppConfig::from_lookup(|key| match key {
            "PRACTICUM_TOKEN" | "TELEGRAM_CHAT_ID" => Some("x".to_string()),
            "TELEGRAM_TOKEN" => Some("super-secret-token".to_string()),
            "TELEGRAM_API_BASE_URL" => Some("http://127.0.0.1:9".to_string()),
            _ => None,
        })
        .unwrap();
        let client = TelegramClient::new(&config);

        let err = client.send_message("1", "hi").await.unwrap_err();
        assert!(matches!(err, TelegramError::Http(_)));
        assert!(!err.to_string().contains("super-secret-token"));
    }
}
