use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{
    password::Password,
    session::{Session, SessionToken},
    todo::{NewTodo, TodoItem},
    user::{User, UserId},
    username::Username,
};

// CredentialStore port trait and errors
#[derive(Debug, Error)]
pub enum CredentialStoreError {
    #[error("User already exists")]
    UserAlreadyExists,
    #[error("Credential store unavailable: {0}")]
    Unavailable(String),
    #[error("Unexpected error {0}")]
    UnexpectedError(String),
}

impl PartialEq for CredentialStoreError {
    fn eq(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::UserAlreadyExists, Self::UserAlreadyExists)
                | (Self::Unavailable(_), Self::Unavailable(_))
                | (Self::UnexpectedError(_), Self::UnexpectedError(_))
        )
    }
}

#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn find(&self, username: &Username) -> Result<Option<User>, CredentialStoreError>;
    async fn get(&self, id: &UserId) -> Result<Option<User>, CredentialStoreError>;
    async fn exists(&self, username: &Username) -> Result<bool, CredentialStoreError>;
    /// Persists a new record before returning it. Fails without mutation when
    /// the username is taken.
    async fn create(
        &self,
        username: Username,
        password: Password,
    ) -> Result<User, CredentialStoreError>;
    async fn verify(
        &self,
        username: &Username,
        password: &Password,
    ) -> Result<bool, CredentialStoreError>;
}

// TodoStore port trait and errors
#[derive(Debug, Error)]
pub enum TodoStoreError {
    #[error("To-do list unavailable: {0}")]
    Unavailable(String),
    #[error("Failed to persist to-do list: {0}")]
    PersistError(String),
    #[error("Unexpected error {0}")]
    UnexpectedError(String),
}

#[async_trait]
pub trait TodoStore: Send + Sync {
    async fn list(&self) -> Result<Vec<TodoItem>, TodoStoreError>;
    /// Appends with id `count + 1` and flushes before returning.
    async fn append(&self, todo: NewTodo) -> Result<TodoItem, TodoStoreError>;
}

// SessionStore port trait and errors
#[derive(Debug, Error)]
pub enum SessionStoreError {
    #[error("Session store error: {0}")]
    DatabaseError(String),
    #[error("Corrupt session payload: {0}")]
    CorruptSession(String),
}

#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn load(&self, token: &SessionToken) -> Result<Option<Session>, SessionStoreError>;
    async fn save(&self, token: &SessionToken, session: &Session) -> Result<(), SessionStoreError>;
    async fn remove(&self, token: &SessionToken) -> Result<(), SessionStoreError>;
}
