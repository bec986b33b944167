use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use wicket_core::{Session, SessionStore, SessionStoreError, SessionToken};

#[derive(Debug, Clone)]
struct Entry {
    session: Session,
    expires_at: DateTime<Utc>,
}

/// In-process sessions. An entry lives for `ttl` after its last save.
#[derive(Clone)]
pub struct HashMapSessionStore {
    sessions: Arc<DashMap<SessionToken, Entry>>,
    ttl: Duration,
}

impl HashMapSessionStore {
    pub fn new(ttl_seconds: u64) -> Self {
        Self {
            sessions: Arc::new(DashMap::new()),
            ttl: Duration::seconds(
                i64::try_from(ttl_seconds)
                    .unwrap_or(i64::MAX)
                    .min(i64::MAX / 1000),
            ),
        }
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    fn purge_expired(&self, now: DateTime<Utc>) {
        self.sessions.retain(|_, entry| entry.expires_at > now);
    }
}

#[async_trait::async_trait]
impl SessionStore for HashMapSessionStore {
    async fn load(&self, token: &SessionToken) -> Result<Option<Session>, SessionStoreError> {
        let now = Utc::now();
        if let Some(entry) = self.sessions.get(token) {
            if entry.expires_at > now {
                return Ok(Some(entry.session.clone()));
            }
        }
        self.sessions.remove_if(token, |_, entry| entry.expires_at <= now);
        Ok(None)
    }

    async fn save(&self, token: &SessionToken, session: &Session) -> Result<(), SessionStoreError> {
        let now = Utc::now();
        self.purge_expired(now);
        self.sessions.insert(
            *token,
            Entry {
                session: session.clone(),
                expires_at: now
                    .checked_add_signed(self.ttl)
                    .unwrap_or(DateTime::<Utc>::MAX_UTC),
            },
        );
        Ok(())
    }

    async fn remove(&self, token: &SessionToken) -> Result<(), SessionStoreError> {
        self.sessions.remove(token);
        Ok(())
    }
}
