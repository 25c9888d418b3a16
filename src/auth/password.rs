use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use lazy_static::lazy_static;
use rand::rngs::OsRng;
use tracing::error;

lazy_static! {
    /// Verified against when the account is unknown so both login failures
    /// pay for one Argon2 run.
    static ref DUMMY_HASH: Option<String> = hash_password("no-such-account").ok();
}

pub fn hash_password(plain: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| {
            error!(error = %e, "password hashing failed");
            anyhow::anyhow!("hash password: {e}")
        })
}

/// Checks `plain` against the stored hash of an account. With no account
/// the work is still done, against a throwaway hash, and the answer is `false`.
pub fn verify_password(plain: &str, stored: Option<&str>) -> anyhow::Result<bool> {
    match stored {
        Some(hash) => check_hash(plain, hash),
        None => {
            if let Some(dummy) = DUMMY_HASH.as_deref() {
                let _ = check_hash(plain, dummy);
            }
            Ok(false)
        }
    }
}

fn check_hash(plain: &str, hash: &str) -> anyhow::Result<bool> {
    let parsed = PasswordHash::new(hash).map_err(|e| {
        error!(error = %e, "stored password hash is malformed");
        anyhow::anyhow!("parse password hash: {e}")
    })?;
    Ok(Argon2::default()
        .verify_password(plain.as_bytes(), &parsed)
        .is_ok())
}
