use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use wicket_application::SessionGate;

use super::session::SessionHandle;

/// Route layer for protected routes. Unauthenticated callers are redirected
/// and the inner handler never runs; otherwise the `Principal` is placed in
/// request extensions.
pub async fn require_session(
    State(gate): State<SessionGate>,
    session: SessionHandle,
    mut request: Request,
    next: Next,
) -> Response {
    match gate.check(&session.snapshot().await) {
        Ok(principal) => {
            request.extensions_mut().insert(principal);
            next.run(request).await
        }
        Err(route) => Redirect::to(route.path()).into_response(),
    }
}
