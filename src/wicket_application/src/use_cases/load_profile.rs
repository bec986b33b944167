use wicket_core::{CredentialStore, CredentialStoreError, User};

use crate::session_gate::Principal;

#[derive(Debug, thiserror::Error)]
pub enum ProfileError {
    #[error("Authenticated user no longer exists")]
    UnknownUser,
    #[error("Credential store error: {0}")]
    CredentialStoreError(#[from] CredentialStoreError),
}

/// Looks up the record of the authenticated caller.
pub struct LoadProfileUseCase<C>
where
    C: CredentialStore,
{
    credential_store: C,
}

impl<C> LoadProfileUseCase<C>
where
    C: CredentialStore,
{
    pub fn new(credential_store: C) -> Self {
        Self { credential_store }
    }

    #[tracing::instrument(name = "LoadProfileUseCase::execute", skip(self))]
    pub async fn execute(&self, principal: &Principal) -> Result<User, ProfileError> {
        self.credential_store
            .get(principal.user_id())
            .await?
            .ok_or(ProfileError::UnknownUser)
    }
}
