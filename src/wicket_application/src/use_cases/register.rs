use wicket_core::{AuthError, CredentialStore, CredentialStoreError, Password, User, Username};

#[derive(Debug, thiserror::Error)]
pub enum RegisterError {
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error("Credential store error: {0}")]
    CredentialStoreError(CredentialStoreError),
}

impl From<CredentialStoreError> for RegisterError {
    fn from(error: CredentialStoreError) -> Self {
        match error {
            // Lost a race against a concurrent registration of the same name.
            CredentialStoreError::UserAlreadyExists => Self::Auth(AuthError::DuplicateUsername),
            other => Self::CredentialStoreError(other),
        }
    }
}

/// Register use case - creates a new identity record. Never authenticates.
pub struct RegisterUseCase<C>
where
    C: CredentialStore,
{
    credential_store: C,
}

impl<C> RegisterUseCase<C>
where
    C: CredentialStore,
{
    pub fn new(credential_store: C) -> Self {
        Self { credential_store }
    }

    #[tracing::instrument(name = "RegisterUseCase::execute", skip(self, password))]
    pub async fn execute(
        &self,
        username: Username,
        password: Password,
    ) -> Result<User, RegisterError> {
        if self.credential_store.exists(&username).await? {
            return Err(AuthError::DuplicateUsername.into());
        }

        let user = self.credential_store.create(username, password).await?;
        tracing::info!(user_id = %user.id(), "Registered new user");
        Ok(user)
    }
}
