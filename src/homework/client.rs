use reqwest::{header::AUTHORIZATION, Client, RequestBuilder, StatusCode};
use serde_json::Value;
use url::Url;

use crate::{config::AppConfig, errors::BotError};

/// Source of homework status responses.
#[allow(async_fn_in_trait)]
pub trait HomeworkApi {
    /// Fetches statuses changed since `from_date` and returns the decoded body.
    async fn fetch_statuses(&self, from_date: i64) -> Result<Value, BotError>;
}

pub struct PracticumClient {
    client: Client,
    endpoint: Url,
    token: String,
}

impl PracticumClient {
    pub fn new(config: &AppConfig) -> Result<Self, BotError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            endpoint: config.endpoint.clone(),
            token: config.credentials.practicum_token.clone(),
        })
    }

    fn request(&self, from_date: i64) -> RequestBuilder {
        self.client
            .get(self.endpoint.clone())
            .header(AUTHORIZATION, format!("OAuth {}", self.token))
            .query(&[("from_date", from_date)])
    }
}

impl HomeworkApi for PracticumClient {
    async fn fetch_statuses(&self, from_date: i64) -> Result<Value, BotError> {
        log::debug!("Requesting homework statuses from_date={from_date}");
        let response = self.request(from_date).send().await?;

        let status = response.status();
        if status != StatusCode::OK {
            log::warn!("Got non-success response from homework API: {status}");
            return Err(BotError::UnexpectedStatus(status));
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}
