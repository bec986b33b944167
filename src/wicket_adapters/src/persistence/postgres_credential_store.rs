use secrecy::{ExposeSecret, Secret};
use sqlx::{FromRow, PgPool, migrate::MigrateError};
use wicket_core::{CredentialStore, CredentialStoreError, Password, User, UserId, Username};

use crate::password::PasswordPolicy;

/// Relational credential store. Passwords are always Argon2id hashes.
#[derive(Clone)]
pub struct PostgresCredentialStore {
    pool: PgPool,
}

#[derive(FromRow)]
struct UserRow {
    id: i64,
    username: String,
    password: String,
    score: i64,
}

impl TryFrom<UserRow> for User {
    type Error = CredentialStoreError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let username = Username::try_from(row.username)
            .map_err(|e| CredentialStoreError::UnexpectedError(e.to_string()))?;
        Ok(
            User::new(UserId::from(row.id), username, Secret::from(row.password))
                .with_score(row.score),
        )
    }
}

fn map_sqlx_error(e: sqlx::Error) -> CredentialStoreError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return CredentialStoreError::UserAlreadyExists;
        }
        return CredentialStoreError::UnexpectedError(e.to_string());
    }
    CredentialStoreError::Unavailable(e.to_string())
}

impl PostgresCredentialStore {
    pub fn new(pool: PgPool) -> Self {
        PostgresCredentialStore { pool }
    }

    /// Creates the `users` table if it does not exist yet.
    pub async fn migrate(pool: &PgPool) -> Result<(), MigrateError> {
        sqlx::migrate!("./migrations").run(pool).await
    }

    async fn fetch_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, CredentialStoreError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
                SELECT id, username, password, score
                FROM users
                WHERE username = $1
            "#,
        )
        .bind(username.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        row.map(User::try_from).transpose()
    }
}

#[async_trait::async_trait]
impl CredentialStore for PostgresCredentialStore {
    #[tracing::instrument(name = "Retrieving user from PostgreSQL", skip_all)]
    async fn find(&self, username: &Username) -> Result<Option<User>, CredentialStoreError> {
        self.fetch_by_username(username).await
    }

    #[tracing::instrument(name = "Retrieving user by id from PostgreSQL", skip_all)]
    async fn get(&self, id: &UserId) -> Result<Option<User>, CredentialStoreError> {
        let Ok(row_id) = id.as_str().parse::<i64>() else {
            return Ok(None);
        };

        let row = sqlx::query_as::<_, UserRow>(
            r#"
                SELECT id, username, password, score
                FROM users
                WHERE id = $1
            "#,
        )
        .bind(row_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        row.map(User::try_from).transpose()
    }

    async fn exists(&self, username: &Username) -> Result<bool, CredentialStoreError> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE username = $1)")
            .bind(username.as_str())
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx_error)
    }

    #[tracing::instrument(name = "Adding user to PostgreSQL", skip_all)]
    async fn create(
        &self,
        username: Username,
        password: Password,
    ) -> Result<User, CredentialStoreError> {
        let password_hash = PasswordPolicy::Argon2
            .protect(&password)
            .await
            .map_err(|e| CredentialStoreError::UnexpectedError(e.to_string()))?;

        let row = sqlx::query_as::<_, UserRow>(
            r#"
                INSERT INTO users (username, password)
                VALUES ($1, $2)
                RETURNING id, username, password, score
            "#,
        )
        .bind(username.as_str())
        .bind(password_hash.expose_secret())
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        User::try_from(row)
    }

    #[tracing::instrument(name = "Validating user credentials in PostgreSQL", skip_all)]
    async fn verify(
        &self,
        username: &Username,
        password: &Password,
    ) -> Result<bool, CredentialStoreError> {
        let Some(user) = self.fetch_by_username(username).await? else {
            return Ok(false);
        };

        PasswordPolicy::Argon2
            .matches(user.stored_password(), password)
            .await
            .map_err(|e| CredentialStoreError::UnexpectedError(e.to_string()))
    }
}
