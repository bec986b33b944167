pub mod config;
pub mod http;
pub mod password;
pub mod persistence;

pub use password::{PasswordHashError, PasswordPolicy};
pub use persistence::{
    HashMapCredentialStore, HashMapSessionStore, JsonFileCredentialStore, JsonFileTodoStore,
    PostgresCredentialStore, RedisSessionStore,
};
