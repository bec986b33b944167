use redis::{Client, RedisResult};
use secrecy::ExposeSecret;
use sqlx::{PgPool, postgres::PgPoolOptions};
use wicket_adapters::{
    PostgresCredentialStore,
    config::{PostgresSettings, RedisSettings},
};

use crate::bootstrap::StartupError;

/// Connects to PostgreSQL and applies pending migrations.
pub async fn configure_postgresql(settings: &PostgresSettings) -> Result<PgPool, StartupError> {
    let pg_pool = get_postgres_pool(settings.url.expose_secret(), settings.max_connections).await?;

    PostgresCredentialStore::migrate(&pg_pool).await?;

    Ok(pg_pool)
}

pub fn configure_redis(settings: &RedisSettings) -> RedisResult<redis::Connection> {
    get_redis_client(&settings.host_name)?.get_connection()
}

pub async fn get_postgres_pool(url: &str, max_connections: u32) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(url)
        .await
}

pub fn get_redis_client(redis_hostname: &str) -> RedisResult<Client> {
    let redis_url = format!("redis://{}/", redis_hostname);
    redis::Client::open(redis_url)
}
