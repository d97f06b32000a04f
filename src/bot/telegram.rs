use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Duration;
use tracing::debug;

use crate::constants::TELEGRAM_API_URL;
use crate::error::{Result, StockError};

#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    pub update_id: i64,
    pub message: Option<Message>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    pub message_id: i64,
    pub chat: Chat,
    pub text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Chat {
    pub id: i64,
}

#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    ok: bool,
    result: Option<T>,
    description: Option<String>,
}

#[derive(Debug, Serialize)]
struct SendMessage<'a> {
    chat_id: i64,
    text: &'a str,
}

/// The two Bot API calls the poll loop needs
#[async_trait]
pub trait BotTransport: Send + Sync {
    async fn get_updates(&self, offset: i64, timeout: Duration) -> Result<Vec<Update>>;
    async fn send_message(&self, chat_id: i64, text: &str) -> Result<()>;
}

/// Telegram Bot API over HTTPS long polling
pub struct TelegramApi {
    client: Client,
    base_url: String,
}

impl TelegramApi {
    pub fn new(token: &str, poll_timeout: Duration) -> Result<Self> {
        Self::with_base_url(TELEGRAM_API_URL, token, poll_timeout)
    }

    pub fn with_base_url(api_url: &str, token: &str, poll_timeout: Duration) -> Result<Self> {
        // The HTTP timeout has to outlast the long poll itself
        let client = Client::builder()
            .timeout(poll_timeout + Duration::from_secs(10))
            .build()?;
        Ok(Self {
            client,
            base_url: format!("{}/bot{}", api_url.trim_end_matches('/'), token),
        })
    }

    async fn call<T: DeserializeOwned>(&self, method: &str, body: serde_json::Value) -> Result<T> {
        let url = format!("{}/{}", self.base_url, method);
        let response: ApiResponse<T> = self.client.post(&url).json(&body).send().await?.json().await?;
        unwrap_response(method, response)
    }
}

fn unwrap_response<T>(method: &str, response: ApiResponse<T>) -> Result<T> {
    match response {
        ApiResponse {
            ok: true,
            result: Some(result),
            ..
        } => Ok(result),
        ApiResponse { description, .. } => Err(StockError::Bot {
            message: format!(
                "{method} failed: {}",
                description.unwrap_or_else(|| "no description".to_string())
            ),
        }),
    }
}

#[async_trait]
impl BotTransport for TelegramApi {
    async fn get_updates(&self, offset: i64, timeout: Duration) -> Result<Vec<Update>> {
        let updates: Vec<Update> = self
            .call(
                "getUpdates",
                json!({
                    "offset": offset,
                    "timeout": timeout.as_secs(),
                    "allowed_updates": ["message"]
                }),
            )
            .await?;
        debug!(count = updates.len(), offset, "Received updates");
        Ok(updates)
    }

    async fn send_message(&self, chat_id: i64, text: &str) -> Result<()> {
        let body = serde_json::to_value(SendMessage { chat_id, text })?;
        let _sent: serde_json::Value = self.call("sendMessage", body).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_update_batch() {
        let raw = r#"{"ok":true,"result":[
            {"update_id":7,"message":{"message_id":1,"chat":{"id":42,"type":"private"},"text":"/start"}},
            {"update_id":8,"edited_message":{"message_id":1,"chat":{"id":42},"text":"x"}}
        ]}"#;
        let response: ApiResponse<Vec<Update>> = serde_json::from_str(raw).unwrap();
        let updates = unwrap_response("getUpdates", response).unwrap();

        assert_eq!(updates.len(), 2);
        let message = updates[0].message.as_ref().unwrap();
        assert_eq!(message.chat.id, 42);
        assert_eq!(message.text.as_deref(), Some("/start"));
        assert!(updates[1].message.is_none());
    }

    #[test]
    fn api_errors_carry_description() {
        let raw = r#"{"ok":false,"error_code":401,"description":"Unauthorized"}"#;
        let response: ApiResponse<Vec<Update>> = serde_json::from_str(raw).unwrap();
        let err = unwrap_response("getUpdates", response).unwrap_err();
        assert_eq!(err.to_string(), "Bot API error: getUpdates failed: Unauthorized");
    }
}
