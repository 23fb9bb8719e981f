use std::time::Duration;

use chrono::Utc;
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::models::session::Session;
use crate::store::KeyValueStore;

/// Key prefix for session liveness markers.
const SESSION_PREFIX: &str = "session:";

fn session_key(token: &str) -> String {
    format!("{}{}", SESSION_PREFIX, token)
}

/// Issues a new admin session.
///
/// The token is a random 128-bit value; the liveness marker is written with
/// the given TTL and expiry is enforced by the store's own eviction.
///
/// # Arguments
///
/// * `store` - The key-value store.
/// * `ttl` - The session time-to-live.
///
/// # Returns
///
/// A `Result` containing the opaque token for cookie embedding.
pub async fn issue(store: &dyn KeyValueStore, ttl: Duration) -> Result<String> {
    let token = Uuid::new_v4().simple().to_string();

    let session = Session {
        issued_at: Utc::now(),
    };
    let bytes = sonic_rs::to_vec(&session)
        .map_err(|e| AppError::Internal(format!("Session serialization failed: {}", e)))?;

    store.put(&session_key(&token), &bytes, Some(ttl)).await?;
    Ok(token)
}

/// Checks whether a token names a live session.
///
/// An absent or empty token is `false` with no store access. Otherwise the
/// liveness marker is looked up; expiry is the store's business, not
/// computed here.
///
/// # Arguments
///
/// * `store` - The key-value store.
/// * `token` - The session token, if any.
///
/// # Returns
///
/// A `Result` containing `true` iff the session is live.
pub async fn validate(store: &dyn KeyValueStore, token: Option<&str>) -> Result<bool> {
    let Some(token) = token else {
        return Ok(false);
    };
    if token.is_empty() {
        return Ok(false);
    }

    Ok(store.get(&session_key(token)).await?.is_some())
}

/// Revokes a session. Revoking an absent token is a no-op, never an error.
///
/// # Arguments
///
/// * `store` - The key-value store.
/// * `token` - The session token.
///
/// # Returns
///
/// A `Result<()>`.
pub async fn revoke(store: &dyn KeyValueStore, token: &str) -> Result<()> {
    store.delete(&session_key(token)).await?;
    Ok(())
}

/// Authorizes an admin request.
///
/// # Arguments
///
/// * `store` - The key-value store.
/// * `token` - The session token from the request, if any.
///
/// # Returns
///
/// `Ok(())` when the session is live; `Err(AppError::Unauthorized)`
/// otherwise, which the routing layer turns into a redirect to login.
pub async fn authorize(store: &dyn KeyValueStore, token: Option<&str>) -> Result<()> {
    if validate(store, token).await? {
        Ok(())
    } else {
        Err(AppError::Unauthorized)
    }
}

/// Constant-time comparison of the provided credential against the expected
/// one.
///
/// Both inputs are hashed and the fixed-length digests compared with
/// `subtle`, so the work performed depends on neither the position of the
/// first differing byte nor the input lengths. The timing property is
/// established by this structure rather than measured; tests cover the
/// equality contract only. Returns `true` only on exact byte-for-byte
/// equality.
///
/// # Arguments
///
/// * `provided` - The credential from the request.
/// * `expected` - The configured credential.
///
/// # Returns
///
/// Whether the two are equal.
pub fn compare_secret(provided: &str, expected: &str) -> bool {
    let provided_digest = Sha256::digest(provided.as_bytes());
    let expected_digest = Sha256::digest(expected.as_bytes());
    provided_digest.as_slice().ct_eq(expected_digest.as_slice()).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compare_secret_accepts_exact_match_only() {
        assert!(compare_secret("hunter2hunter2", "hunter2hunter2"));
        assert!(!compare_secret("hunter2hunter2", "hunter2hunter2x"));
        assert!(!compare_secret("hunter2hunter2x", "hunter2hunter2"));
        assert!(!compare_secret("", "hunter2hunter2"));
        assert!(compare_secret("", ""));
    }

    #[test]
    fn compare_secret_is_byte_exact() {
        assert!(!compare_secret("pässword", "password"));
        assert!(compare_secret("pässword", "pässword"));
    }
}
