use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::conversation::Session;
use crate::messaging::UserId;

/// Per-user session storage. Writes are last-write-wins.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn get(&self, user: UserId) -> Option<Session>;
    async fn set(&self, user: UserId, session: Session);
    async fn delete(&self, user: UserId) -> Option<Session>;
}

/// Process-resident store. Sessions never expire.
#[derive(Default)]
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<UserId, Session>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get(&self, user: UserId) -> Option<Session> {
        self.sessions.read().await.get(&user).cloned()
    }

    async fn set(&self, user: UserId, session: Session) {
        self.sessions.write().await.insert(user, session);
    }

    async fn delete(&self, user: UserId) -> Option<Session> {
        self.sessions.write().await.remove(&user)
    }
}
