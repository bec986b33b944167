//! Cookie-addressed server-side sessions.
//!
//! `load_session` resolves the caller's token to a `Session`, hands handlers a
//! `SessionHandle` through request extensions, and persists the session once
//! the handler is done, but only if the handler changed it.

use std::sync::Arc;

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use tokio::sync::Mutex;
use wicket_core::{Flash, Session, SessionStore, SessionStoreError, SessionToken};

use super::error::AppError;

#[derive(Debug, Clone)]
pub struct SessionCookie {
    name: String,
    secure: bool,
}

impl SessionCookie {
    pub fn new(name: impl Into<String>, secure: bool) -> Self {
        Self {
            name: name.into(),
            secure,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn issue(&self, token: SessionToken) -> Cookie<'static> {
        Cookie::build((self.name.clone(), token.to_string()))
            .http_only(true)
            .same_site(SameSite::Lax)
            .path("/")
            .secure(self.secure)
            .build()
    }

    fn expire(&self) -> Cookie<'static> {
        Cookie::build((self.name.clone(), "")).path("/").build()
    }
}

/// State for the `load_session` middleware.
#[derive(Clone)]
pub struct SessionLayer<S> {
    store: S,
    cookie: SessionCookie,
}

impl<S> SessionLayer<S>
where
    S: SessionStore + Clone,
{
    pub fn new(store: S, cookie: SessionCookie) -> Self {
        Self { store, cookie }
    }
}

struct Slot {
    session: Session,
    modified: bool,
}

/// Per-request access to the caller's session.
#[derive(Clone)]
pub struct SessionHandle {
    slot: Arc<Mutex<Slot>>,
}

impl SessionHandle {
    pub fn new(session: Session) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Slot {
                session,
                modified: false,
            })),
        }
    }

    pub async fn snapshot(&self) -> Session {
        self.slot.lock().await.session.clone()
    }

    /// Replaces the session with a copy the caller has worked on.
    pub async fn commit(&self, session: Session) {
        let mut slot = self.slot.lock().await;
        if slot.session != session {
            slot.session = session;
            slot.modified = true;
        }
    }

    pub async fn update<T>(&self, f: impl FnOnce(&mut Session) -> T) -> T {
        let mut slot = self.slot.lock().await;
        let before = slot.session.clone();
        let result = f(&mut slot.session);
        if slot.session != before {
            slot.modified = true;
        }
        result
    }

    pub async fn take_flashes(&self) -> Vec<Flash> {
        self.update(Session::take_flashes).await
    }

    async fn modified(&self) -> Option<Session> {
        let slot = self.slot.lock().await;
        slot.modified.then(|| slot.session.clone())
    }
}

impl<S> FromRequestParts<S> for SessionHandle
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<SessionHandle>()
            .cloned()
            .ok_or(AppError::MissingSession)
    }
}

#[tracing::instrument(name = "Session", skip_all)]
pub async fn load_session<S>(
    State(layer): State<SessionLayer<S>>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError>
where
    S: SessionStore + Clone + 'static,
{
    let presented = jar
        .get(layer.cookie.name())
        .and_then(|cookie| SessionToken::parse(cookie.value()).ok());

    let existing = match presented {
        Some(token) => load_existing(&layer.store, token).await?,
        None => None,
    };
    let is_new = existing.is_none();
    let (token, session) = existing.unwrap_or_else(|| (SessionToken::new(), Session::new()));
    let was_authenticated = session.is_authenticated();

    let handle = SessionHandle::new(session);
    request.extensions_mut().insert(handle.clone());

    let response = next.run(request).await;

    let Some(session) = handle.modified().await else {
        return Ok(response);
    };

    if session.is_empty() {
        if is_new {
            return Ok(response);
        }
        layer.store.remove(&token).await?;
        tracing::debug!("Session cleared");
        return Ok((jar.remove(layer.cookie.expire()), response).into_response());
    }

    // Signing in always moves the session to a token the caller never held before.
    if !is_new && !was_authenticated && session.is_authenticated() {
        layer.store.remove(&token).await?;
        let rotated = SessionToken::new();
        layer.store.save(&rotated, &session).await?;
        tracing::debug!("Session token rotated");
        return Ok((jar.add(layer.cookie.issue(rotated)), response).into_response());
    }

    layer.store.save(&token, &session).await?;
    if is_new {
        return Ok((jar.add(layer.cookie.issue(token)), response).into_response());
    }
    Ok(response)
}

/// A payload that no longer deserializes is dropped and treated as unknown.
async fn load_existing<S>(
    store: &S,
    token: SessionToken,
) -> Result<Option<(SessionToken, Session)>, SessionStoreError>
where
    S: SessionStore,
{
    match store.load(&token).await {
        Ok(session) => Ok(session.map(|session| (token, session))),
        Err(SessionStoreError::CorruptSession(reason)) => {
            tracing::warn!(%reason, "Discarding corrupt session");
            store.remove(&token).await?;
            Ok(None)
        }
        Err(e) => Err(e),
    }
}
