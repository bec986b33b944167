//! The single enforcement point for protected operations.

use std::future::Future;

use wicket_core::{AuthError, Route, Session, UserId};

/// Proof that the current caller is authenticated. Only the gate mints one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    user_id: UserId,
}

impl Principal {
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SessionGate {
    login_route: Route,
}

impl Default for SessionGate {
    fn default() -> Self {
        Self::new(Route::Login)
    }
}

impl SessionGate {
    pub fn new(login_route: Route) -> Self {
        Self { login_route }
    }

    pub fn login_route(&self) -> Route {
        self.login_route
    }

    /// Admits an authenticated session, or names the route to send the caller to.
    pub fn check(&self, session: &Session) -> Result<Principal, Route> {
        match session.user_id() {
            Some(user_id) if session.is_authenticated() => Ok(Principal {
                user_id: user_id.clone(),
            }),
            _ => {
                tracing::debug!(
                    reason = %AuthError::UnauthenticatedAccess,
                    redirect = self.login_route.path(),
                    "Session gate rejected request"
                );
                Err(self.login_route)
            }
        }
    }

    /// Runs `op` only when the session is authenticated and returns its result
    /// unchanged. Otherwise `op` is dropped without being polled.
    pub async fn guard<F, Fut, T>(&self, session: &Session, op: F) -> Result<T, Route>
    where
        F: FnOnce(Principal) -> Fut,
        Fut: Future<Output = T>,
    {
        let principal = self.check(session)?;
        Ok(op(principal).await)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    use super::*;

    #[tokio::test]
    async fn anonymous_session_is_redirected_without_running_op() {
        let gate = SessionGate::default();
        let calls = Arc::new(AtomicUsize::new(0));

        let counter = calls.clone();
        let result = gate
            .guard(&Session::new(), |_| async move {
                counter.fetch_add(1, Ordering::SeqCst);
            })
            .await;

        assert_eq!(result, Err(Route::Login));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn authenticated_session_runs_op_and_returns_its_result() {
        let gate = SessionGate::default();
        let mut session = Session::new();
        session.authenticate(UserId::new("42"));

        let result = gate
            .guard(&session, |principal| async move {
                format!("hello {}", principal.user_id())
            })
            .await;

        assert_eq!(result, Ok("hello 42".to_owned()));
    }

    #[tokio::test]
    async fn cleared_session_is_rejected_again() {
        let gate = SessionGate::new(Route::Login);
        let mut session = Session::new();
        session.authenticate(UserId::new("alice"));
        assert!(gate.check(&session).is_ok());

        session.clear();
        assert_eq!(gate.check(&session), Err(Route::Login));
    }
}
