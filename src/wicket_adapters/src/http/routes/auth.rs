//! Login, registration and logout, shared by the minesweeper and user-system
//! apps. The apps differ only in where they land and how they report
//! feedback, which `AuthFlow` captures.

use axum::{Form, extract::State, response::Response};
use secrecy::Secret;
use serde::Deserialize;
use wicket_application::{
    LoginError, LoginUseCase, LogoutUseCase, RegisterError, RegisterUseCase,
};
use wicket_core::{
    AuthError, CredentialStore, Flash, Page, Password, Route, Session, UserError, Username, View,
    ViewRenderer,
};

use crate::http::{error::AppError, session::SessionHandle, views::respond};

pub const LOGIN_SUCCESS: &str = "Login successful!";
pub const REGISTER_SUCCESS: &str = "Registration successful! Please log in.";
pub const LOGGED_OUT: &str = "You have been logged out.";

/// How form outcomes are reported to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feedback {
    /// Errors appear next to the form, successes are silent.
    Inline,
    /// Every outcome is queued as a flash message.
    Flash,
}

#[derive(Debug, Clone, Copy)]
pub struct AuthFlow {
    pub after_login: Route,
    pub after_logout: Route,
    pub feedback: Feedback,
}

impl AuthFlow {
    pub fn minesweeper() -> Self {
        Self {
            after_login: Route::Home,
            after_logout: Route::Login,
            feedback: Feedback::Inline,
        }
    }

    pub fn user_system() -> Self {
        Self {
            after_login: Route::Success,
            after_logout: Route::Home,
            feedback: Feedback::Flash,
        }
    }

    /// Error and flashes for a form that is re-rendered after a rejection.
    fn rejection(&self, session: &mut Session, message: String) -> (Option<String>, Vec<Flash>) {
        let mut flashes = session.take_flashes();
        match self.feedback {
            Feedback::Inline => (Some(message), flashes),
            Feedback::Flash => {
                flashes.push(Flash::error(message));
                (None, flashes)
            }
        }
    }

    fn celebrate(&self, session: &mut Session, message: &str) {
        if self.feedback == Feedback::Flash {
            session.push_flash(Flash::success(message));
        }
    }
}

#[derive(Clone)]
pub struct AuthRouteState<C, R> {
    pub credentials: C,
    pub renderer: R,
    pub flow: AuthFlow,
}

impl<C, R> AuthRouteState<C, R> {
    pub fn new(credentials: C, renderer: R, flow: AuthFlow) -> Self {
        Self {
            credentials,
            renderer,
            flow,
        }
    }
}

#[derive(Deserialize)]
pub struct CredentialsForm {
    pub username: String,
    pub password: Secret<String>,
}

impl CredentialsForm {
    fn parse(self) -> Result<(Username, Password), UserError> {
        let username = Username::try_from(self.username)?;
        let password = Password::try_from(self.password)?;
        Ok((username, password))
    }
}

pub async fn login_form<C, R>(
    State(state): State<AuthRouteState<C, R>>,
    session: SessionHandle,
) -> Result<Response, AppError>
where
    C: CredentialStore + Clone + 'static,
    R: ViewRenderer + Clone + 'static,
{
    let flashes = session.take_flashes().await;
    respond(&state.renderer, View::Login { error: None, flashes }.into())
}

#[tracing::instrument(name = "Login", skip_all)]
pub async fn login<C, R>(
    State(state): State<AuthRouteState<C, R>>,
    session: SessionHandle,
    Form(form): Form<CredentialsForm>,
) -> Result<Response, AppError>
where
    C: CredentialStore + Clone + 'static,
    R: ViewRenderer + Clone + 'static,
{
    let mut current = session.snapshot().await;

    let outcome = match form.parse() {
        Ok((username, password)) => LoginUseCase::new(state.credentials.clone())
            .execute(&mut current, username, password)
            .await
            .map(drop),
        // Input that fails validation can never match a stored record.
        Err(_) => Err(LoginError::Auth(AuthError::InvalidCredentials)),
    };

    let page = match outcome {
        Ok(()) => {
            state.flow.celebrate(&mut current, LOGIN_SUCCESS);
            Page::Redirect(state.flow.after_login)
        }
        Err(LoginError::Auth(error)) => {
            let (error, flashes) = state.flow.rejection(&mut current, error.to_string());
            View::Login { error, flashes }.into()
        }
        Err(LoginError::CredentialStoreError(e)) => return Err(e.into()),
    };

    session.commit(current).await;
    respond(&state.renderer, page)
}

pub async fn register_form<C, R>(
    State(state): State<AuthRouteState<C, R>>,
    session: SessionHandle,
) -> Result<Response, AppError>
where
    C: CredentialStore + Clone + 'static,
    R: ViewRenderer + Clone + 'static,
{
    let flashes = session.take_flashes().await;
    respond(&state.renderer, View::Register { error: None, flashes }.into())
}

#[tracing::instrument(name = "Register", skip_all)]
pub async fn register<C, R>(
    State(state): State<AuthRouteState<C, R>>,
    session: SessionHandle,
    Form(form): Form<CredentialsForm>,
) -> Result<Response, AppError>
where
    C: CredentialStore + Clone + 'static,
    R: ViewRenderer + Clone + 'static,
{
    let mut current = session.snapshot().await;

    let rejection = match form.parse() {
        Err(invalid) => Some(invalid.to_string()),
        Ok((username, password)) => {
            match RegisterUseCase::new(state.credentials.clone())
                .execute(username, password)
                .await
            {
                Ok(_) => None,
                Err(RegisterError::Auth(error)) => Some(error.to_string()),
                Err(RegisterError::CredentialStoreError(e)) => return Err(e.into()),
            }
        }
    };

    let page = match rejection {
        None => {
            state.flow.celebrate(&mut current, REGISTER_SUCCESS);
            Page::Redirect(Route::Login)
        }
        Some(message) => {
            let (error, flashes) = state.flow.rejection(&mut current, message);
            View::Register { error, flashes }.into()
        }
    };

    session.commit(current).await;
    respond(&state.renderer, page)
}

#[tracing::instrument(name = "Logout", skip_all)]
pub async fn logout<C, R>(
    State(state): State<AuthRouteState<C, R>>,
    session: SessionHandle,
) -> Result<Response, AppError>
where
    C: CredentialStore + Clone + 'static,
    R: ViewRenderer + Clone + 'static,
{
    let flow = state.flow;
    session
        .update(|session| {
            let previous = LogoutUseCase::new().execute(session);
            tracing::debug!(?previous, "Session cleared by logout");
            if flow.feedback == Feedback::Flash {
                session.push_flash(Flash::info(LOGGED_OUT));
            }
        })
        .await;

    respond(&state.renderer, Page::Redirect(flow.after_logout))
}
