//! Telegram digest delivery.
//!
//! The notifier is an explicit optional dependency: callers construct it
//! from credentials (or `from_env`) and inject `Option<TelegramNotifier>`
//! into the pipeline. There is no lazily-initialized global client.

use serde::Deserialize;
use serde_json::json;

use reitwatch_core::{DigestNotifier, FeedError, FeedId};

use crate::http::{build_client, status_error, transport_error};

const DEFAULT_API_BASE: &str = "https://api.telegram.org";

pub const TOKEN_ENV: &str = "TELEGRAM_BOT_TOKEN";
pub const CHAT_ID_ENV: &str = "TELEGRAM_CHAT_ID";

#[derive(Debug, Clone)]
pub struct TelegramNotifier {
    client: reqwest::blocking::Client,
    api_base: String,
    token: String,
    chat_id: String,
}

impl TelegramNotifier {
    pub fn new(token: impl Into<String>, chat_id: impl Into<String>) -> Result<Self, FeedError> {
        let token = token.into();
        let chat_id = chat_id.into();
        if token.trim().is_empty() || chat_id.trim().is_empty() {
            return Err(FeedError::not_configured(
                "telegram token and chat id must be non-empty",
            ));
        }

        Ok(Self {
            client: build_client()?,
            api_base: String::from(DEFAULT_API_BASE),
            token,
            chat_id,
        })
    }

    /// Builds the notifier from the conventional environment variables;
    /// `Ok(None)` when either is unset (notification simply disabled).
    pub fn from_env() -> Result<Option<Self>, FeedError> {
        match (std::env::var(TOKEN_ENV), std::env::var(CHAT_ID_ENV)) {
            (Ok(token), Ok(chat_id)) => Self::new(token, chat_id).map(Some),
            _ => Ok(None),
        }
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }
}

impl DigestNotifier for TelegramNotifier {
    fn id(&self) -> FeedId {
        FeedId::Telegram
    }

    fn send(&self, text: &str) -> Result<(), FeedError> {
        let url = format!("{}/bot{}/sendMessage", self.api_base, self.token);
        let body = json!({
            "chat_id": self.chat_id,
            "text": text,
            "parse_mode": "Markdown",
            "disable_web_page_preview": true,
        });

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .map_err(transport_error)?;
        if !response.status().is_success() {
            return Err(status_error(response.status()));
        }

        let reply: SendMessageReply = response.json().map_err(transport_error)?;
        if !reply.ok {
            return Err(FeedError::internal(format!(
                "telegram rejected message: {}",
                reply.description.unwrap_or_else(|| String::from("unknown"))
            )));
        }

        tracing::info!("telegram digest sent");
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct SendMessageReply {
    ok: bool,
    description: Option<String>,
}
