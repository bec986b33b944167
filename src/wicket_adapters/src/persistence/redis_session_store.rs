use std::sync::Arc;

use redis::{Commands, Connection};
use tokio::sync::RwLock;
use wicket_core::{Session, SessionStore, SessionStoreError, SessionToken};

#[derive(Clone)]
pub struct RedisSessionStore {
    conn: Arc<RwLock<Connection>>,
    ttl_seconds: u64,
}

impl RedisSessionStore {
    pub fn new(conn: Arc<RwLock<Connection>>, ttl_seconds: u64) -> Self {
        Self { conn, ttl_seconds }
    }
}

#[async_trait::async_trait]
impl SessionStore for RedisSessionStore {
    #[tracing::instrument(name = "RedisSessionStore::load", skip_all)]
    async fn load(&self, token: &SessionToken) -> Result<Option<Session>, SessionStoreError> {
        let key = get_key(token);
        let payload: Option<String> = {
            let mut conn = self.conn.write().await;
            conn.get(&key)
                .map_err(|e| SessionStoreError::DatabaseError(e.to_string()))?
        };

        payload
            .map(|json| {
                serde_json::from_str(&json)
                    .map_err(|e| SessionStoreError::CorruptSession(e.to_string()))
            })
            .transpose()
    }

    #[tracing::instrument(name = "RedisSessionStore::save", skip_all)]
    async fn save(&self, token: &SessionToken, session: &Session) -> Result<(), SessionStoreError> {
        let key = get_key(token);
        let payload = serde_json::to_string(session)
            .map_err(|e| SessionStoreError::CorruptSession(e.to_string()))?;

        let mut conn = self.conn.write().await;
        conn.set_ex::<_, _, ()>(key, payload, self.ttl_seconds)
            .map_err(|e| SessionStoreError::DatabaseError(e.to_string()))
    }

    #[tracing::instrument(name = "RedisSessionStore::remove", skip_all)]
    async fn remove(&self, token: &SessionToken) -> Result<(), SessionStoreError> {
        let key = get_key(token);
        let mut conn = self.conn.write().await;
        conn.del::<_, ()>(key)
            .map_err(|e| SessionStoreError::DatabaseError(e.to_string()))
    }
}

const SESSION_KEY_PREFIX: &str = "session:";

fn get_key(token: &SessionToken) -> String {
    format!("{}{}", SESSION_KEY_PREFIX, token)
}
