use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;
use wicket_core::{CredentialStoreError, RenderError, SessionStoreError, TodoStoreError};

/// Infrastructure failures. Every variant becomes a generic 500 page.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Credential store failure: {0}")]
    CredentialStore(#[from] CredentialStoreError),
    #[error("To-do store failure: {0}")]
    TodoStore(#[from] TodoStoreError),
    #[error("Session store failure: {0}")]
    SessionStore(#[from] SessionStoreError),
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error("Session layer is not installed on this route")]
    MissingSession,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "Request failed");

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Html("<h1>Internal Server Error</h1><p>Please try again later.</p>"),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_failures_render_as_500() {
        let error = AppError::from(CredentialStoreError::Unavailable("disk gone".to_owned()));

        let response = error.into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
