pub mod outbox;
pub mod telegram;
pub mod types;

pub use outbox::{CleanupReport, Outbox};
pub use telegram::TelegramClient;

use async_trait::async_trait;

use crate::error::MessagingError;

pub type ChatId = i64;
pub type UserId = i64;
pub type MessageId = i64;

/// Keyboard attached to an outbound message.
#[derive(Debug, Clone, PartialEq)]
pub enum Keyboard {
    /// Reply keyboard, one inner vec per row of buttons.
    Reply { rows: Vec<Vec<String>>, one_time: bool },
    /// Hide whatever reply keyboard the client is showing.
    Remove,
}

impl Keyboard {
    /// Lays `labels` out `per_row` buttons to a row.
    pub fn grid<S: AsRef<str>>(labels: &[S], per_row: usize, one_time: bool) -> Self {
        let rows = labels
            .chunks(per_row.max(1))
            .map(|chunk| chunk.iter().map(|s| s.as_ref().to_string()).collect())
            .collect();
        Keyboard::Reply { rows, one_time }
    }
}

#[async_trait]
pub trait Messenger: Send + Sync {
    async fn send_message(
        &self,
        chat: ChatId,
        text: &str,
        keyboard: &Keyboard,
    ) -> Result<MessageId, MessagingError>;

    async fn delete_message(&self, chat: ChatId, message: MessageId) -> Result<(), MessagingError>;
}
