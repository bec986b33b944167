use thiserror::Error;

/// Recoverable outcomes of the auth flow. None of these reach an error page:
/// the first two re-render a form, the last two are absorbed by the store and
/// the session gate respectively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("Invalid username or password")]
    InvalidCredentials,
    #[error("Username already exists")]
    DuplicateUsername,
    #[error("Backing store file is missing")]
    MissingStoreFile,
    #[error("Authentication required")]
    UnauthenticatedAccess,
}
