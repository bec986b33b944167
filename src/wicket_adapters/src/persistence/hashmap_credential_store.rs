use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use secrecy::Secret;
use wicket_core::{CredentialStore, CredentialStoreError, Password, User, UserId, Username};

use crate::password::PasswordPolicy;

#[derive(Default, Clone)]
pub struct HashMapCredentialStore {
    users: Arc<RwLock<HashMap<Username, Secret<String>>>>,
    policy: PasswordPolicy,
}

impl HashMapCredentialStore {
    pub fn new(policy: PasswordPolicy) -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
            policy,
        }
    }
}

fn to_user(username: &Username, password: &Secret<String>) -> User {
    User::new(UserId::from(username), username.clone(), password.clone())
}

#[async_trait::async_trait]
impl CredentialStore for HashMapCredentialStore {
    async fn find(&self, username: &Username) -> Result<Option<User>, CredentialStoreError> {
        let users = self.users.read().await;
        Ok(users.get(username).map(|password| to_user(username, password)))
    }

    async fn get(&self, id: &UserId) -> Result<Option<User>, CredentialStoreError> {
        match Username::try_from(id.as_str()) {
            Ok(username) => self.find(&username).await,
            Err(_) => Ok(None),
        }
    }

    async fn exists(&self, username: &Username) -> Result<bool, CredentialStoreError> {
        Ok(self.users.read().await.contains_key(username))
    }

    #[tracing::instrument(name = "HashMapCredentialStore::create", skip(self, password))]
    async fn create(
        &self,
        username: Username,
        password: Password,
    ) -> Result<User, CredentialStoreError> {
        let stored = self
            .policy
            .protect(&password)
            .await
            .map_err(|e| CredentialStoreError::UnexpectedError(e.to_string()))?;

        let mut users = self.users.write().await;
        if users.contains_key(&username) {
            return Err(CredentialStoreError::UserAlreadyExists);
        }
        let user = to_user(&username, &stored);
        users.insert(username, stored);
        Ok(user)
    }

    #[tracing::instrument(name = "HashMapCredentialStore::verify", skip(self, password))]
    async fn verify(
        &self,
        username: &Username,
        password: &Password,
    ) -> Result<bool, CredentialStoreError> {
        let Some(stored) = self.users.read().await.get(username).cloned() else {
            return Ok(false);
        };

        self.policy
            .matches(&stored, password)
            .await
            .map_err(|e| CredentialStoreError::UnexpectedError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn username(value: &str) -> Username {
        Username::try_from(value).unwrap()
    }

    fn password(value: &str) -> Password {
        Password::try_from(Secret::from(value.to_owned())).unwrap()
    }

    #[tokio::test]
    async fn concurrent_creates_of_same_name_leave_one_record() {
        let store = HashMapCredentialStore::new(PasswordPolicy::Plaintext);

        let (a, b) = tokio::join!(
            store.create(username("alice"), password("pw1")),
            store.create(username("alice"), password("pw2")),
        );

        assert_eq!(
            [a.is_ok(), b.is_ok()].iter().filter(|ok| **ok).count(),
            1,
            "exactly one registration wins"
        );
        assert!(store.exists(&username("alice")).await.unwrap());
    }

    #[tokio::test]
    async fn get_resolves_username_keyed_id() {
        let store = HashMapCredentialStore::default();
        let user = store
            .create(username("bob"), password("secret"))
            .await
            .unwrap();

        let found = store.get(user.id()).await.unwrap().unwrap();
        assert_eq!(found.username(), &username("bob"));
        assert!(store.get(&UserId::new(" ")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn verify_uses_the_configured_policy() {
        let store = HashMapCredentialStore::new(PasswordPolicy::Argon2);
        store
            .create(username("carol"), password("pw"))
            .await
            .unwrap();

        assert!(store.verify(&username("carol"), &password("pw")).await.unwrap());
        assert!(!store.verify(&username("carol"), &password("px")).await.unwrap());
        assert!(!store.verify(&username("dave"), &password("pw")).await.unwrap());
    }
}
