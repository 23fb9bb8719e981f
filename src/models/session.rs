use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The liveness marker stored under `session:{token}`.
///
/// Expiry is enforced by the store's TTL eviction; this record carries no
/// expiry of its own and validation never inspects `issued_at`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// The timestamp when the session was issued.
    pub issued_at: DateTime<Utc>,
}
