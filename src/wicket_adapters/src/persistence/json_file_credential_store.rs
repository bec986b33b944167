use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
    sync::Arc,
};

use secrecy::{ExposeSecret, Secret};
use tokio::sync::Mutex;
use wicket_core::{
    AuthError, CredentialStore, CredentialStoreError, Password, User, UserId, Username,
};

use super::json_file::{self, JsonFileError};
use crate::password::PasswordPolicy;

/// Credentials kept as a JSON object `username -> stored password`.
///
/// Every read-modify-write runs under one mutex and re-reads the file inside
/// it, so concurrent registrations in this process never overwrite each other.
#[derive(Clone)]
pub struct JsonFileCredentialStore {
    path: Arc<PathBuf>,
    write_lock: Arc<Mutex<()>>,
    policy: PasswordPolicy,
}

type UserFile = BTreeMap<String, String>;

impl From<JsonFileError> for CredentialStoreError {
    fn from(error: JsonFileError) -> Self {
        CredentialStoreError::Unavailable(error.to_string())
    }
}

impl JsonFileCredentialStore {
    pub fn new(path: impl Into<PathBuf>, policy: PasswordPolicy) -> Self {
        Self {
            path: Arc::new(path.into()),
            write_lock: Arc::new(Mutex::new(())),
            policy,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_users(&self) -> Result<UserFile, CredentialStoreError> {
        match json_file::read_json(&self.path).await? {
            Some(users) => Ok(users),
            None => {
                tracing::debug!(
                    path = %self.path.display(),
                    "{}, treating as empty",
                    AuthError::MissingStoreFile
                );
                Ok(UserFile::new())
            }
        }
    }
}

#[async_trait::async_trait]
impl CredentialStore for JsonFileCredentialStore {
    #[tracing::instrument(name = "JsonFileCredentialStore::find", skip(self))]
    async fn find(&self, username: &Username) -> Result<Option<User>, CredentialStoreError> {
        let users = self.read_users().await?;
        Ok(users.get(username.as_str()).map(|stored| {
            User::new(
                UserId::from(username),
                username.clone(),
                Secret::from(stored.clone()),
            )
        }))
    }

    async fn get(&self, id: &UserId) -> Result<Option<User>, CredentialStoreError> {
        match Username::try_from(id.as_str()) {
            Ok(username) => self.find(&username).await,
            Err(_) => Ok(None),
        }
    }

    async fn exists(&self, username: &Username) -> Result<bool, CredentialStoreError> {
        Ok(self.read_users().await?.contains_key(username.as_str()))
    }

    #[tracing::instrument(name = "JsonFileCredentialStore::create", skip(self, password))]
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

        let _guard = self.write_lock.lock().await;
        let mut users = self.read_users().await?;
        if users.contains_key(username.as_str()) {
            return Err(CredentialStoreError::UserAlreadyExists);
        }
        users.insert(username.as_str().to_owned(), stored.expose_secret().clone());
        json_file::write_json(&self.path, &users).await?;

        Ok(User::new(UserId::from(&username), username, stored))
    }

    #[tracing::instrument(name = "JsonFileCredentialStore::verify", skip(self, password))]
    async fn verify(
        &self,
        username: &Username,
        password: &Password,
    ) -> Result<bool, CredentialStoreError> {
        let Some(user) = self.find(username).await? else {
            return Ok(false);
        };

        self.policy
            .matches(user.stored_password(), password)
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
    async fn missing_file_is_an_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let store =
            JsonFileCredentialStore::new(dir.path().join("users.json"), PasswordPolicy::Argon2);

        assert!(!store.exists(&username("alice")).await.unwrap());
        assert!(store.find(&username("alice")).await.unwrap().is_none());
        assert!(!store.verify(&username("alice"), &password("pw")).await.unwrap());
    }

    #[tokio::test]
    async fn legacy_plaintext_file_is_readable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("users.json");
        tokio::fs::write(&path, r#"{"alice": "pw1"}"#).await.unwrap();
        let store = JsonFileCredentialStore::new(&path, PasswordPolicy::Plaintext);

        assert!(store.verify(&username("alice"), &password("pw1")).await.unwrap());
        assert!(!store.verify(&username("alice"), &password("pw2")).await.unwrap());
    }

    #[tokio::test]
    async fn duplicate_create_keeps_first_password() {
        let dir = tempfile::tempdir().unwrap();
        let store =
            JsonFileCredentialStore::new(dir.path().join("users.json"), PasswordPolicy::Plaintext);

        store
            .create(username("alice"), password("pw1"))
            .await
            .unwrap();
        let second = store.create(username("alice"), password("pw2")).await;

        assert_eq!(second.unwrap_err(), CredentialStoreError::UserAlreadyExists);
        let raw = tokio::fs::read_to_string(store.path()).await.unwrap();
        let users: UserFile = serde_json::from_str(&raw).unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users["alice"], "pw1");
    }

    #[tokio::test]
    async fn concurrent_registrations_all_land() {
        let dir = tempfile::tempdir().unwrap();
        let store =
            JsonFileCredentialStore::new(dir.path().join("users.json"), PasswordPolicy::Plaintext);

        let handles: Vec<_> = (0..16)
            .map(|i| {
                let store = store.clone();
                tokio::spawn(async move {
                    store
                        .create(username(&format!("user{i}")), password("pw"))
                        .await
                })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        for i in 0..16 {
            assert!(store.exists(&username(&format!("user{i}"))).await.unwrap());
        }
    }

    #[tokio::test]
    async fn corrupt_file_is_unavailable_not_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("users.json");
        tokio::fs::write(&path, "[1, 2").await.unwrap();
        let store = JsonFileCredentialStore::new(&path, PasswordPolicy::Argon2);

        let result = store.create(username("alice"), password("pw")).await;

        assert!(matches!(result, Err(CredentialStoreError::Unavailable(_))));
        assert_eq!(tokio::fs::read_to_string(&path).await.unwrap(), "[1, 2");
    }

    #[tokio::test]
    async fn argon2_file_does_not_contain_the_password() {
        let dir = tempfile::tempdir().unwrap();
        let store =
            JsonFileCredentialStore::new(dir.path().join("users.json"), PasswordPolicy::Argon2);

        store
            .create(username("alice"), password("hunter2"))
            .await
            .unwrap();

        let raw = tokio::fs::read_to_string(store.path()).await.unwrap();
        assert!(!raw.contains("hunter2"));
        assert!(store.verify(&username("alice"), &password("hunter2")).await.unwrap());
    }
}
