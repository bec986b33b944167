use wicket_core::{
    AuthError, CredentialStore, CredentialStoreError, Password, Session, UserId, Username,
};

/// Error types specific to login use case
#[derive(Debug, thiserror::Error)]
pub enum LoginError {
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error("Credential store error: {0}")]
    CredentialStoreError(#[from] CredentialStoreError),
}

/// Login use case - checks credentials and authenticates the session
pub struct LoginUseCase<C>
where
    C: CredentialStore,
{
    credential_store: C,
}

impl<C> LoginUseCase<C>
where
    C: CredentialStore,
{
    pub fn new(credential_store: C) -> Self {
        Self { credential_store }
    }

    /// On success the session carries the user's id. On any failure the
    /// session is left exactly as it was.
    #[tracing::instrument(name = "LoginUseCase::execute", skip(self, session, password))]
    pub async fn execute(
        &self,
        session: &mut Session,
        username: Username,
        password: Password,
    ) -> Result<UserId, LoginError> {
        if !self.credential_store.verify(&username, &password).await? {
            return Err(AuthError::InvalidCredentials.into());
        }

        // A record deleted between verify and find is treated as a bad login.
        let user = self
            .credential_store
            .find(&username)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        session.authenticate(user.id().clone());
        Ok(user.id().clone())
    }
}
