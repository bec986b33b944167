use axum::{
    Extension,
    extract::{FromRef, State},
    response::Response,
};
use wicket_application::{LoadProfileUseCase, LogoutUseCase, Principal, ProfileError};
use wicket_core::{CredentialStore, Page, Route, User, View, ViewRenderer};

use super::auth::AuthRouteState;
use crate::{
    config::BoardSettings,
    http::{error::AppError, session::SessionHandle, views::respond},
};

#[derive(Clone)]
pub struct GameState<C, R> {
    pub auth: AuthRouteState<C, R>,
    pub board: BoardSettings,
}

impl<C, R> FromRef<GameState<C, R>> for AuthRouteState<C, R>
where
    C: Clone,
    R: Clone,
{
    fn from_ref(state: &GameState<C, R>) -> Self {
        state.auth.clone()
    }
}

/// Loads the caller's record, or forgets a session whose user has vanished.
async fn load_user<C>(
    credentials: &C,
    principal: &Principal,
    session: &SessionHandle,
) -> Result<Result<User, Page>, AppError>
where
    C: CredentialStore + Clone,
{
    match LoadProfileUseCase::new(credentials.clone())
        .execute(principal)
        .await
    {
        Ok(user) => Ok(Ok(user)),
        Err(ProfileError::UnknownUser) => {
            tracing::warn!(user_id = %principal.user_id(), "Session refers to a missing user");
            session.update(|s| LogoutUseCase::new().execute(s)).await;
            Ok(Err(Page::Redirect(Route::Login)))
        }
        Err(ProfileError::CredentialStoreError(e)) => Err(e.into()),
    }
}

#[tracing::instrument(name = "Game", skip_all)]
pub async fn game<C, R>(
    State(state): State<GameState<C, R>>,
    Extension(principal): Extension<Principal>,
    session: SessionHandle,
) -> Result<Response, AppError>
where
    C: CredentialStore + Clone + 'static,
    R: ViewRenderer + Clone + 'static,
{
    let page = match load_user(&state.auth.credentials, &principal, &session).await? {
        Ok(user) => View::Game {
            rows: state.board.rows,
            cols: state.board.cols,
            mines: state.board.mines,
            score: user.score().unwrap_or_default(),
        }
        .into(),
        Err(redirect) => redirect,
    };
    respond(&state.auth.renderer, page)
}

#[tracing::instrument(name = "Profile", skip_all)]
pub async fn profile<C, R>(
    State(state): State<GameState<C, R>>,
    Extension(principal): Extension<Principal>,
    session: SessionHandle,
) -> Result<Response, AppError>
where
    C: CredentialStore + Clone + 'static,
    R: ViewRenderer + Clone + 'static,
{
    let page = match load_user(&state.auth.credentials, &principal, &session).await? {
        Ok(user) => View::Profile {
            score: user.score().unwrap_or_default(),
            username: user.username().clone(),
        }
        .into(),
        Err(redirect) => redirect,
    };
    respond(&state.auth.renderer, page)
}
