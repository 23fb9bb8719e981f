use std::time::Duration;

use inkpost::error::AppError;
use inkpost::services::session;
use inkpost::store::MemoryStore;

const TTL: Duration = Duration::from_secs(24 * 3600);

#[tokio::test]
async fn issued_tokens_validate_immediately() {
    let store = MemoryStore::new();
    let token = session::issue(&store, TTL).await.unwrap();

    assert_eq!(token.len(), 32);
    assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
    assert!(session::validate(&store, Some(&token)).await.unwrap());
}

#[tokio::test]
async fn issued_tokens_are_unique() {
    let store = MemoryStore::new();
    let a = session::issue(&store, TTL).await.unwrap();
    let b = session::issue(&store, TTL).await.unwrap();
    assert_ne!(a, b);
}

#[tokio::test]
async fn missing_or_empty_tokens_are_invalid() {
    let store = MemoryStore::new();
    assert!(!session::validate(&store, None).await.unwrap());
    assert!(!session::validate(&store, Some("")).await.unwrap());
    assert!(!session::validate(&store, Some("unknowntoken")).await.unwrap());
}

#[tokio::test]
async fn revoked_tokens_stop_validating() {
    let store = MemoryStore::new();
    let token = session::issue(&store, TTL).await.unwrap();

    session::revoke(&store, &token).await.unwrap();
    assert!(!session::validate(&store, Some(&token)).await.unwrap());

    // Revoking again is a no-op, never an error.
    session::revoke(&store, &token).await.unwrap();
}

#[tokio::test]
async fn sessions_expire_by_store_ttl() {
    let store = MemoryStore::new();
    let token = session::issue(&store, Duration::from_millis(30)).await.unwrap();

    assert!(session::validate(&store, Some(&token)).await.unwrap());
    tokio::time::sleep(Duration::from_millis(80)).await;
    assert!(!session::validate(&store, Some(&token)).await.unwrap());
}

#[tokio::test]
async fn authorize_denies_without_a_live_session() {
    let store = MemoryStore::new();

    assert!(matches!(
        session::authorize(&store, None).await,
        Err(AppError::Unauthorized)
    ));
    assert!(matches!(
        session::authorize(&store, Some("stale")).await,
        Err(AppError::Unauthorized)
    ));

    let token = session::issue(&store, TTL).await.unwrap();
    assert!(session::authorize(&store, Some(&token)).await.is_ok());
}
