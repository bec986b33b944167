use std::sync::Arc;

use tokio::sync::RwLock;
use wicket_adapters::{
    HashMapCredentialStore, HashMapSessionStore, JsonFileCredentialStore, JsonFileTodoStore,
    PasswordPolicy, PostgresCredentialStore, RedisSessionStore,
    config::{AppVariant, CredentialBackend, SessionBackend, WicketSettings},
    http::{AskamaRenderer, SessionCookie, SessionLayer},
};

use crate::{
    app::WicketApp,
    helpers::{configure_postgresql, configure_redis},
    stores::{AnyCredentialStore, AnySessionStore},
};

#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("Failed to connect to PostgreSQL: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Failed to run migrations: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
    #[error("Failed to connect to Redis: {0}")]
    Redis(#[from] redis::RedisError),
}

/// Wires the stores named by `settings` into the configured application.
#[tracing::instrument(name = "Build app", skip_all, fields(variant = ?settings.app.variant))]
pub async fn build_app(settings: &WicketSettings) -> Result<WicketApp, StartupError> {
    let assets_dir = settings.app.assets_dir.as_str();

    match settings.app.variant {
        AppVariant::Todo => {
            let todos = JsonFileTodoStore::open(&settings.todo.file).await;
            Ok(WicketApp::todo(todos, AskamaRenderer, assets_dir))
        }
        AppVariant::Minesweeper => Ok(WicketApp::minesweeper(
            credential_store(settings).await?,
            session_layer(settings)?,
            AskamaRenderer,
            settings.board,
            assets_dir,
        )),
        AppVariant::UserSystem => Ok(WicketApp::user_system(
            credential_store(settings).await?,
            session_layer(settings)?,
            AskamaRenderer,
            assets_dir,
        )),
    }
}

async fn credential_store(settings: &WicketSettings) -> Result<AnyCredentialStore, StartupError> {
    let policy = settings.credentials.password_policy;
    let backend = settings.credential_backend();

    if policy == PasswordPolicy::Plaintext && backend != CredentialBackend::Postgres {
        tracing::warn!("Passwords are stored in plaintext; use this only with legacy user files");
    }

    Ok(match backend {
        CredentialBackend::Memory => {
            AnyCredentialStore::Memory(HashMapCredentialStore::new(policy))
        }
        CredentialBackend::Json => AnyCredentialStore::Json(JsonFileCredentialStore::new(
            &settings.credentials.users_file,
            policy,
        )),
        CredentialBackend::Postgres => {
            let pool = configure_postgresql(&settings.postgres).await?;
            AnyCredentialStore::Postgres(PostgresCredentialStore::new(pool))
        }
    })
}

fn session_layer(settings: &WicketSettings) -> Result<SessionLayer<AnySessionStore>, StartupError> {
    let ttl = settings.session.ttl_seconds;
    let store = match settings.session.backend {
        SessionBackend::Memory => AnySessionStore::Memory(HashMapSessionStore::new(ttl)),
        SessionBackend::Redis => {
            let conn = configure_redis(&settings.redis)?;
            AnySessionStore::Redis(RedisSessionStore::new(Arc::new(RwLock::new(conn)), ttl))
        }
    };

    Ok(SessionLayer::new(
        store,
        SessionCookie::new(settings.session.cookie_name.clone(), settings.session.secure),
    ))
}
