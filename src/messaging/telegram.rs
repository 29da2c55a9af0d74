use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info};

use crate::error::MessagingError;
use crate::messaging::types::{
    ApiResponse, DeleteMessageRequest, ReplyMarkup, SendMessageRequest, SentMessage,
    SetWebhookRequest,
};
use crate::messaging::{ChatId, Keyboard, MessageId, Messenger};

const BASE_URL: &str = "https://api.telegram.org";
const PARSE_MODE: &str = "Markdown";

pub struct TelegramClient {
    client: Client,
    token: String,
    base_url: String,
}

impl TelegramClient {
    pub fn new(token: &str) -> Self {
        Self::with_base_url(token, BASE_URL)
    }

    pub fn with_base_url(token: &str, base_url: &str) -> Self {
        Self {
            client: Client::new(),
            token: token.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.base_url, self.token, method)
    }

    async fn call<B, T>(&self, method: &str, body: &B) -> Result<T, MessagingError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let resp = self
            .client
            .post(self.method_url(method))
            .json(body)
            .send()
            .await?;

        let status = resp.status();
        let data: ApiResponse<T> = resp.json().await?;
        if !data.ok {
            return Err(MessagingError::Api {
                code: data.error_code.unwrap_or(status.as_u16() as i64),
                description: data.description.unwrap_or_default(),
            });
        }

        data.result.ok_or(MessagingError::EmptyResult)
    }

    pub async fn delete_webhook(&self) -> Result<(), MessagingError> {
        let _: bool = self.call("deleteWebhook", &serde_json::json!({})).await?;
        Ok(())
    }

    pub async fn set_webhook(&self, url: &str) -> Result<(), MessagingError> {
        let _: bool = self.call("setWebhook", &SetWebhookRequest { url }).await?;
        info!("Webhook set: {}", url);
        Ok(())
    }
}

#[async_trait]
impl Messenger for TelegramClient {
    async fn send_message(
        &self,
        chat: ChatId,
        text: &str,
        keyboard: &Keyboard,
    ) -> Result<MessageId, MessagingError> {
        let req = SendMessageRequest {
            chat_id: chat,
            text,
            parse_mode: PARSE_MODE,
            reply_markup: ReplyMarkup::from(keyboard),
        };
        let sent: SentMessage = self.call("sendMessage", &req).await?;
        debug!("Sent message {} to chat {}", sent.message_id, chat);
        Ok(sent.message_id)
    }

    async fn delete_message(&self, chat: ChatId, message: MessageId) -> Result<(), MessagingError> {
        let req = DeleteMessageRequest {
            chat_id: chat,
            message_id: message,
        };
        let _: bool = self.call("deleteMessage", &req).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_method_urls() {
        let client = TelegramClient::with_base_url("123:abc", "http://localhost:8081/");
        assert_eq!(
            client.method_url("sendMessage"),
            "http://localhost:8081/bot123:abc/sendMessage"
        );
        let client = TelegramClient::new("t");
        assert_eq!(client.method_url("getMe"), "https://api.telegram.org/bott/getMe");
    }
}
