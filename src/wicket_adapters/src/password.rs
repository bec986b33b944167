use argon2::{
    Algorithm, Argon2, Params, PasswordHash, PasswordVerifier, Version,
    password_hash::{self, PasswordHasher, SaltString, rand_core},
};
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use thiserror::Error;
use wicket_core::Password;

#[derive(Debug, Error)]
#[error("Password hashing failed: {0}")]
pub struct PasswordHashError(String);

/// How a store keeps passwords at rest.
///
/// `Plaintext` exists only to read and write legacy `users.json` files that
/// hold passwords verbatim.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PasswordPolicy {
    #[default]
    Argon2,
    Plaintext,
}

impl PasswordPolicy {
    /// Produces the stored form of `password`.
    pub async fn protect(&self, password: &Password) -> Result<Secret<String>, PasswordHashError> {
        match self {
            PasswordPolicy::Argon2 => compute_password_hash(password.clone()).await,
            PasswordPolicy::Plaintext => Ok(password.as_ref().clone()),
        }
    }

    /// Compares a presented password against its stored form.
    pub async fn matches(
        &self,
        stored: &Secret<String>,
        candidate: &Password,
    ) -> Result<bool, PasswordHashError> {
        match self {
            PasswordPolicy::Argon2 => verify_password_hash(stored.clone(), candidate.clone()).await,
            PasswordPolicy::Plaintext => {
                Ok(stored.expose_secret() == candidate.as_ref().expose_secret())
            }
        }
    }
}

fn hasher() -> Result<Argon2<'static>, PasswordHashError> {
    Ok(Argon2::new(
        Algorithm::Argon2id,
        Version::V0x13,
        Params::new(15000, 2, 1, None).map_err(|e| PasswordHashError(e.to_string()))?,
    ))
}

#[tracing::instrument(name = "Verify password hash", skip_all)]
async fn verify_password_hash(
    expected_password_hash: Secret<String>,
    password_candidate: Password,
) -> Result<bool, PasswordHashError> {
    let current_span: tracing::Span = tracing::Span::current();
    tokio::task::spawn_blocking(move || {
        current_span.in_scope(|| {
            let Ok(expected_password_hash) =
                PasswordHash::new(expected_password_hash.expose_secret())
            else {
                // A record written under the plaintext policy can never match.
                tracing::warn!("Stored password is not a valid PHC string");
                return Ok(false);
            };

            match hasher()?.verify_password(
                password_candidate.as_ref().expose_secret().as_bytes(),
                &expected_password_hash,
            ) {
                Ok(()) => Ok(true),
                Err(password_hash::Error::Password) => Ok(false),
                Err(e) => Err(PasswordHashError(e.to_string())),
            }
        })
    })
    .await
    .map_err(|e| PasswordHashError(e.to_string()))?
}

#[tracing::instrument(name = "Computing password hash", skip_all)]
async fn compute_password_hash(password: Password) -> Result<Secret<String>, PasswordHashError> {
    let current_span: tracing::Span = tracing::Span::current();
    tokio::task::spawn_blocking(move || {
        current_span.in_scope(move || {
            let salt: SaltString = SaltString::generate(rand_core::OsRng);
            hasher()?
                .hash_password(password.as_ref().expose_secret().as_bytes(), &salt)
                .map(|h| Secret::from(h.to_string()))
                .map_err(|e| PasswordHashError(e.to_string()))
        })
    })
    .await
    .map_err(|e| PasswordHashError(e.to_string()))?
}
