use tracing::{debug, error};

use crate::messaging::{ChatId, Keyboard, MessageId, Messenger};

/// Sends into one chat and remembers the id of everything it sent.
pub struct Outbox<'a> {
    messenger: &'a dyn Messenger,
    chat: ChatId,
    sent: &'a mut Vec<MessageId>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanupReport {
    pub deleted: usize,
    pub failed: usize,
}

impl<'a> Outbox<'a> {
    pub fn new(messenger: &'a dyn Messenger, chat: ChatId, sent: &'a mut Vec<MessageId>) -> Self {
        Self {
            messenger,
            chat,
            sent,
        }
    }

    /// Send failures are logged and swallowed; the caller carries on.
    pub async fn send(&mut self, text: &str, keyboard: Keyboard) -> Option<MessageId> {
        match self.messenger.send_message(self.chat, text, &keyboard).await {
            Ok(id) => {
                self.sent.push(id);
                Some(id)
            }
            Err(e) => {
                error!("Failed to send message to chat {}: {}", self.chat, e);
                None
            }
        }
    }

    /// Deletes every recorded message, best effort, and forgets them.
    pub async fn delete_sent(&mut self) -> CleanupReport {
        let ids: Vec<MessageId> = self.sent.drain(..).collect();
        let mut report = CleanupReport::default();
        for id in ids {
            self.delete_one(id, &mut report).await;
        }
        report
    }

    pub async fn delete_one(&self, id: MessageId, report: &mut CleanupReport) {
        match self.messenger.delete_message(self.chat, id).await {
            Ok(()) => report.deleted += 1,
            Err(e) => {
                debug!("Could not delete message {} in chat {}: {}", id, self.chat, e);
                report.failed += 1;
            }
        }
    }
}
