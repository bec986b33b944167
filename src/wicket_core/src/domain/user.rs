use std::fmt;

use secrecy::Secret;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::username::{MAX_USERNAME_LENGTH, Username};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserError {
    #[error("Username must not be empty")]
    EmptyUsername,
    #[error("Username must be at most {MAX_USERNAME_LENGTH} characters")]
    UsernameTooLong,
    #[error("Username must not start or end with whitespace or contain control characters")]
    InvalidUsername,
    #[error("Password must not be empty")]
    EmptyPassword,
}

/// Store-scoped key of an identity record.
///
/// Relational stores use the row id, keyed stores use the username itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&Username> for UserId {
    fn from(username: &Username) -> Self {
        Self(username.as_str().to_owned())
    }
}

impl From<i64> for UserId {
    fn from(row_id: i64) -> Self {
        Self(row_id.to_string())
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An identity record as held by a credential store.
///
/// `password` is the stored form: a PHC hash or the verbatim password,
/// depending on the store's policy.
#[derive(Debug, Clone)]
pub struct User {
    id: UserId,
    username: Username,
    password: Secret<String>,
    score: Option<i64>,
}

impl User {
    pub fn new(id: UserId, username: Username, password: Secret<String>) -> Self {
        Self {
            id,
            username,
            password,
            score: None,
        }
    }

    pub fn with_score(mut self, score: i64) -> Self {
        self.score = Some(score);
        self
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn username(&self) -> &Username {
        &self.username
    }

    pub fn stored_password(&self) -> &Secret<String> {
        &self.password
    }

    pub fn score(&self) -> Option<i64> {
        self.score
    }
}
