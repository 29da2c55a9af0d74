//! Wire types for the subset of the Telegram Bot API this service speaks.

use serde::{Deserialize, Serialize};

use super::{ChatId, Keyboard, MessageId, UserId};

#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    pub update_id: i64,
    #[serde(default)]
    pub message: Option<Message>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    pub message_id: MessageId,
    #[serde(default)]
    pub from: Option<User>,
    pub chat: Chat,
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub id: UserId,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Chat {
    pub id: ChatId,
}

/// A text message reduced to what the conversation needs.
#[derive(Debug, Clone, PartialEq)]
pub struct IncomingText {
    pub user: UserId,
    pub chat: ChatId,
    pub message_id: MessageId,
    pub text: String,
}

impl Update {
    /// `None` for anything that is not a text message from a user.
    pub fn into_text(self) -> Option<IncomingText> {
        let msg = self.message?;
        let user = msg.from.as_ref()?.id;
        Some(IncomingText {
            user,
            chat: msg.chat.id,
            message_id: msg.message_id,
            text: msg.text?,
        })
    }
}

/// Envelope wrapped around every Bot API response.
#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
    pub ok: bool,
    pub result: Option<T>,
    #[serde(default)]
    pub error_code: Option<i64>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SentMessage {
    pub message_id: MessageId,
}

#[derive(Debug, Serialize)]
pub struct KeyboardButton {
    pub text: String,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ReplyMarkup {
    Keyboard {
        keyboard: Vec<Vec<KeyboardButton>>,
        resize_keyboard: bool,
        one_time_keyboard: bool,
    },
    Remove {
        remove_keyboard: bool,
    },
}

impl From<&Keyboard> for ReplyMarkup {
    fn from(kb: &Keyboard) -> Self {
        match kb {
            Keyboard::Reply { rows, one_time } => ReplyMarkup::Keyboard {
                keyboard: rows
                    .iter()
                    .map(|row| {
                        row.iter()
                            .map(|text| KeyboardButton { text: text.clone() })
                            .collect()
                    })
                    .collect(),
                resize_keyboard: true,
                one_time_keyboard: *one_time,
            },
            Keyboard::Remove => ReplyMarkup::Remove {
                remove_keyboard: true,
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SendMessageRequest<'a> {
    pub chat_id: ChatId,
    pub text: &'a str,
    pub parse_mode: &'static str,
    pub reply_markup: ReplyMarkup,
}

#[derive(Debug, Serialize)]
pub struct DeleteMessageRequest {
    pub chat_id: ChatId,
    pub message_id: MessageId,
}

#[derive(Debug, Serialize)]
pub struct SetWebhookRequest<'a> {
    pub url: &'a str,
}
