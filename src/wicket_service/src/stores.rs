//! Runtime-selected store backends.

use wicket_adapters::{
    HashMapCredentialStore, HashMapSessionStore, JsonFileCredentialStore,
    PostgresCredentialStore, RedisSessionStore,
};
use wicket_core::{
    CredentialStore, CredentialStoreError, Password, Session, SessionStore, SessionStoreError,
    SessionToken, User, UserId, Username,
};

#[derive(Clone)]
pub enum AnyCredentialStore {
    Memory(HashMapCredentialStore),
    Json(JsonFileCredentialStore),
    Postgres(PostgresCredentialStore),
}

macro_rules! delegate {
    ($store:expr, $inner:ident => $call:expr) => {
        match $store {
            AnyCredentialStore::Memory($inner) => $call,
            AnyCredentialStore::Json($inner) => $call,
            AnyCredentialStore::Postgres($inner) => $call,
        }
    };
}

#[async_trait::async_trait]
impl CredentialStore for AnyCredentialStore {
    async fn find(&self, username: &Username) -> Result<Option<User>, CredentialStoreError> {
        delegate!(self, store => store.find(username).await)
    }

    async fn get(&self, id: &UserId) -> Result<Option<User>, CredentialStoreError> {
        delegate!(self, store => store.get(id).await)
    }

    async fn exists(&self, username: &Username) -> Result<bool, CredentialStoreError> {
        delegate!(self, store => store.exists(username).await)
    }

    async fn create(
        &self,
        username: Username,
        password: Password,
    ) -> Result<User, CredentialStoreError> {
        delegate!(self, store => store.create(username, password).await)
    }

    async fn verify(
        &self,
        username: &Username,
        password: &Password,
    ) -> Result<bool, CredentialStoreError> {
        delegate!(self, store => store.verify(username, password).await)
    }
}

#[derive(Clone)]
pub enum AnySessionStore {
    Memory(HashMapSessionStore),
    Redis(RedisSessionStore),
}

#[async_trait::async_trait]
impl SessionStore for AnySessionStore {
    async fn load(&self, token: &SessionToken) -> Result<Option<Session>, SessionStoreError> {
        match self {
            AnySessionStore::Memory(store) => store.load(token).await,
            AnySessionStore::Redis(store) => store.load(token).await,
        }
    }

    async fn save(&self, token: &SessionToken, session: &Session) -> Result<(), SessionStoreError> {
        match self {
            AnySessionStore::Memory(store) => store.save(token, session).await,
            AnySessionStore::Redis(store) => store.save(token, session).await,
        }
    }

    async fn remove(&self, token: &SessionToken) -> Result<(), SessionStoreError> {
        match self {
            AnySessionStore::Memory(store) => store.remove(token).await,
            AnySessionStore::Redis(store) => store.remove(token).await,
        }
    }
}
