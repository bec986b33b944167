use axum::{extract::State, response::Response};
use wicket_core::{CredentialStore, View, ViewRenderer};

use super::auth::AuthRouteState;
use crate::http::{error::AppError, session::SessionHandle, views::respond};

pub async fn welcome<C, R>(
    State(state): State<AuthRouteState<C, R>>,
    session: SessionHandle,
) -> Result<Response, AppError>
where
    C: CredentialStore + Clone + 'static,
    R: ViewRenderer + Clone + 'static,
{
    let flashes = session.take_flashes().await;
    respond(&state.renderer, View::Welcome { flashes }.into())
}

/// Landing page after login. Only reachable through the session gate.
pub async fn success<C, R>(
    State(state): State<AuthRouteState<C, R>>,
    session: SessionHandle,
) -> Result<Response, AppError>
where
    C: CredentialStore + Clone + 'static,
    R: ViewRenderer + Clone + 'static,
{
    let flashes = session.take_flashes().await;
    respond(&state.renderer, View::Success { flashes }.into())
}
