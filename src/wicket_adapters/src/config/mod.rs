pub mod constants;
pub mod settings;

pub use constants::*;
pub use settings::{
    AppSettings, AppVariant, BoardSettings, CredentialBackend, CredentialSettings,
    PostgresSettings, RedisSettings, SessionBackend, SessionSettings, TodoSettings,
    WicketSettings,
};
