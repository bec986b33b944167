mod hashmap_credential_store;
mod hashmap_session_store;
mod json_file;
mod json_file_credential_store;
mod json_file_todo_store;
mod postgres_credential_store;
mod redis_session_store;

pub use hashmap_credential_store::HashMapCredentialStore;
pub use hashmap_session_store::HashMapSessionStore;
pub use json_file_credential_store::JsonFileCredentialStore;
pub use json_file_todo_store::JsonFileTodoStore;
pub use postgres_credential_store::PostgresCredentialStore;
pub use redis_session_store::RedisSessionStore;
