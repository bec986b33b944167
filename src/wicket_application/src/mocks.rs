use std::{collections::HashMap, sync::Arc};

use secrecy::{ExposeSecret, Secret};
use tokio::sync::RwLock;
use wicket_core::{
    CredentialStore, CredentialStoreError, NewTodo, Password, TodoItem, TodoStore, TodoStoreError,
    User, UserId, Username,
};

// Plaintext mock: the application layer does not care how passwords are kept.
#[derive(Clone, Default)]
pub struct MockCredentialStore {
    pub users: Arc<RwLock<HashMap<Username, User>>>,
}

impl MockCredentialStore {
    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn stored_password(&self, username: &str) -> Option<String> {
        let username = Username::try_from(username).ok()?;
        self.users
            .read()
            .await
            .get(&username)
            .map(|user| user.stored_password().expose_secret().clone())
    }
}

#[async_trait::async_trait]
impl CredentialStore for MockCredentialStore {
    async fn find(&self, username: &Username) -> Result<Option<User>, CredentialStoreError> {
        Ok(self.users.read().await.get(username).cloned())
    }

    async fn get(&self, id: &UserId) -> Result<Option<User>, CredentialStoreError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|user| user.id() == id)
            .cloned())
    }

    async fn exists(&self, username: &Username) -> Result<bool, CredentialStoreError> {
        Ok(self.users.read().await.contains_key(username))
    }

    async fn create(
        &self,
        username: Username,
        password: Password,
    ) -> Result<User, CredentialStoreError> {
        let mut users = self.users.write().await;
        if users.contains_key(&username) {
            return Err(CredentialStoreError::UserAlreadyExists);
        }
        let user = User::new(
            UserId::from(&username),
            username.clone(),
            Secret::from(password.as_ref().expose_secret().clone()),
        )
        .with_score(0);
        users.insert(username, user.clone());
        Ok(user)
    }

    async fn verify(
        &self,
        username: &Username,
        password: &Password,
    ) -> Result<bool, CredentialStoreError> {
        Ok(self.users.read().await.get(username).is_some_and(|user| {
            user.stored_password().expose_secret() == password.as_ref().expose_secret()
        }))
    }
}

#[derive(Clone)]
pub struct UnavailableCredentialStore;

#[async_trait::async_trait]
impl CredentialStore for UnavailableCredentialStore {
    async fn find(&self, _username: &Username) -> Result<Option<User>, CredentialStoreError> {
        Err(CredentialStoreError::Unavailable("down".to_owned()))
    }

    async fn get(&self, _id: &UserId) -> Result<Option<User>, CredentialStoreError> {
        Err(CredentialStoreError::Unavailable("down".to_owned()))
    }

    async fn exists(&self, _username: &Username) -> Result<bool, CredentialStoreError> {
        Err(CredentialStoreError::Unavailable("down".to_owned()))
    }

    async fn create(
        &self,
        _username: Username,
        _password: Password,
    ) -> Result<User, CredentialStoreError> {
        Err(CredentialStoreError::Unavailable("down".to_owned()))
    }

    async fn verify(
        &self,
        _username: &Username,
        _password: &Password,
    ) -> Result<bool, CredentialStoreError> {
        Err(CredentialStoreError::Unavailable("down".to_owned()))
    }
}

#[derive(Clone, Default)]
pub struct MockTodoStore {
    pub todos: Arc<RwLock<Vec<TodoItem>>>,
}

#[async_trait::async_trait]
impl TodoStore for MockTodoStore {
    async fn list(&self) -> Result<Vec<TodoItem>, TodoStoreError> {
        Ok(self.todos.read().await.clone())
    }

    async fn append(&self, todo: NewTodo) -> Result<TodoItem, TodoStoreError> {
        let mut todos = self.todos.write().await;
        let item = todo.into_item(todos.len() as u64 + 1);
        todos.push(item.clone());
        Ok(item)
    }
}

pub fn username(value: &str) -> Username {
    Username::try_from(value).unwrap()
}

pub fn password(value: &str) -> Password {
    Password::try_from(Secret::from(value.to_owned())).unwrap()
}
