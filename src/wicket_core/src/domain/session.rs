//! Server-held session state.
//!
//! A `Session` is owned by the server and addressed by the opaque
//! `SessionToken` the caller presents. Handlers only change it through the
//! narrow API below, so no undeclared keys can creep in.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use super::{flash::Flash, user::UserId};

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Invalid session token")]
pub struct InvalidSessionToken;

/// Opaque identifier handed to the caller in a cookie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionToken(Uuid);

impl SessionToken {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn parse(value: &str) -> Result<Self, InvalidSessionToken> {
        Uuid::parse_str(value)
            .map(Self)
            .map_err(|_| InvalidSessionToken)
    }
}

impl Default for SessionToken {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    Anonymous,
    Authenticated,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    authenticated: bool,
    user_id: Option<UserId>,
    #[serde(default)]
    flashes: Vec<Flash>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> AuthState {
        if self.is_authenticated() {
            AuthState::Authenticated
        } else {
            AuthState::Anonymous
        }
    }

    /// Both facts must agree: a flag without an id does not count.
    pub fn is_authenticated(&self) -> bool {
        self.authenticated && self.user_id.is_some()
    }

    pub fn user_id(&self) -> Option<&UserId> {
        self.user_id.as_ref()
    }

    pub fn authenticate(&mut self, user_id: UserId) {
        self.authenticated = true;
        self.user_id = Some(user_id);
    }

    /// Drops every fact held by the session, pending flashes included.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn push_flash(&mut self, flash: Flash) {
        self.flashes.push(flash);
    }

    pub fn take_flashes(&mut self) -> Vec<Flash> {
        std::mem::take(&mut self.flashes)
    }

    pub fn has_flashes(&self) -> bool {
        !self.flashes.is_empty()
    }

    /// True when there is nothing worth persisting.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
