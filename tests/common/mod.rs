use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

use trade_setup_bot::conversation::{Dispatcher, InMemorySessionStore};
use trade_setup_bot::core::SetupGenerator;
use trade_setup_bot::error::{MessagingError, StorageError};
use trade_setup_bot::messaging::types::IncomingText;
use trade_setup_bot::messaging::{ChatId, Keyboard, MessageId, Messenger};
use trade_setup_bot::storage::{SetupRow, SetupStorage};

pub const USER: i64 = 42;
pub const CHAT: i64 = 4200;

#[derive(Debug, Clone)]
pub struct Sent {
    pub id: MessageId,
    pub chat: ChatId,
    pub text: String,
    pub keyboard: Keyboard,
}

/// Records every call. Ids count up from 1000.
#[derive(Default)]
pub struct MockMessenger {
    next_id: AtomicI64,
    pub sent: Mutex<Vec<Sent>>,
    pub deleted: Mutex<Vec<MessageId>>,
    pub undeletable: Mutex<HashSet<MessageId>>,
}

impl MockMessenger {
    pub fn texts(&self) -> Vec<String> {
        self.sent.lock().unwrap().iter().map(|s| s.text.clone()).collect()
    }

    pub fn last_text(&self) -> String {
        self.texts().last().cloned().unwrap_or_default()
    }

    pub fn sent_ids(&self) -> Vec<MessageId> {
        self.sent.lock().unwrap().iter().map(|s| s.id).collect()
    }
}

#[async_trait]
impl Messenger for MockMessenger {
    async fn send_message(
        &self,
        chat: ChatId,
        text: &str,
        keyboard: &Keyboard,
    ) -> Result<MessageId, MessagingError> {
        let id = 1000 + self.next_id.fetch_add(1, Ordering::SeqCst);
        self.sent.lock().unwrap().push(Sent {
            id,
            chat,
            text: text.to_string(),
            keyboard: keyboard.clone(),
        });
        Ok(id)
    }

    async fn delete_message(&self, _chat: ChatId, message: MessageId) -> Result<(), MessagingError> {
        if self.undeletable.lock().unwrap().contains(&message) {
            return Err(MessagingError::Api {
                code: 400,
                description: "Bad Request: message can't be deleted".to_string(),
            });
        }
        self.deleted.lock().unwrap().push(message);
        Ok(())
    }
}

#[derive(Default)]
pub struct MockStorage {
    pub rows: Mutex<Vec<SetupRow>>,
    pub attempts: AtomicI64,
    pub fail: bool,
}

impl MockStorage {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }
}

#[async_trait]
impl SetupStorage for MockStorage {
    async fn append_row(&self, row: &SetupRow) -> Result<(), StorageError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(StorageError::Api {
                status: 403,
                body: "The caller does not have permission".to_string(),
            });
        }
        self.rows.lock().unwrap().push(row.clone());
        Ok(())
    }

    fn location_url(&self) -> Option<String> {
        Some("https://docs.google.com/spreadsheets/d/test/edit".to_string())
    }
}

pub struct Harness {
    pub messenger: Arc<MockMessenger>,
    pub storage: Arc<MockStorage>,
    pub sessions: Arc<InMemorySessionStore>,
    pub dispatcher: Dispatcher,
    next_message: AtomicI64,
}

impl Harness {
    pub fn new(storage: MockStorage) -> Self {
        let messenger = Arc::new(MockMessenger::default());
        let storage = Arc::new(storage);
        let sessions = Arc::new(InMemorySessionStore::new());
        let dispatcher = Dispatcher::new(
            messenger.clone(),
            sessions.clone(),
            SetupGenerator::with_seed(storage.clone(), 1234),
        );
        Self {
            messenger,
            storage,
            sessions,
            dispatcher,
            next_message: AtomicI64::new(1),
        }
    }

    pub fn text(&self, text: &str) -> IncomingText {
        IncomingText {
            user: USER,
            chat: CHAT,
            message_id: self.next_message.fetch_add(1, Ordering::SeqCst),
            text: text.to_string(),
        }
    }
}
