use std::env;
use anyhow::{Context, Result};
use zeroize::Zeroizing;

/// The longest accepted session TTL: one year. Keeps the seconds/cookie
/// arithmetic well inside `u64`/`i64` range.
const MAX_SESSION_TTL_HOURS: u64 = 24 * 365;

fn check_session_ttl_hours(hours: u64) -> Result<u64> {
    if hours == 0 || hours > MAX_SESSION_TTL_HOURS {
        anyhow::bail!(
            "SESSION_TTL_HOURS must be between 1 and {}",
            MAX_SESSION_TTL_HOURS
        );
    }
    Ok(hours)
}

/// The application's configuration.
#[derive(Clone)]
pub struct Config {
    /// The URL of the Redis server backing the key-value store.
    pub redis_url: String,
    /// The single admin credential, compared in constant time at login.
    pub admin_secret: Zeroizing<String>,
    /// The session time-to-live in hours.
    pub session_ttl_hours: u64,
    /// Whether the app runs in production (controls the `Secure` cookie flag).
    pub production: bool,
}

impl Config {
    /// Creates a new `Config` from environment variables.
    ///
    /// # Returns
    ///
    /// A `Result` containing the `Config`.
    pub fn from_env() -> Result<Self> {
        let admin_secret = env::var("ADMIN_SECRET")
            .context("ADMIN_SECRET must be set (generate with: openssl rand -hex 32)")?;

        if admin_secret.len() < 16 {
            anyhow::bail!("ADMIN_SECRET must be at least 16 characters");
        }

        let session_ttl_hours = env::var("SESSION_TTL_HOURS")
            .unwrap_or_else(|_| "24".to_string())
            .parse()
            .context("Invalid SESSION_TTL_HOURS")?;

        Ok(Self {
            redis_url: env::var("REDIS_URL")
                .unwrap_or_else(|_| "redis://127.0.0.1:6379".to_string()),
            admin_secret: Zeroizing::new(admin_secret),
            session_ttl_hours: check_session_ttl_hours(session_ttl_hours)?,
            production: env::var("APP_ENV")
                .map(|v| v == "production")
                .unwrap_or(false),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_ttl_is_bounded() {
        assert!(check_session_ttl_hours(0).is_err());
        assert!(check_session_ttl_hours(u64::MAX).is_err());
        assert!(check_session_ttl_hours(MAX_SESSION_TTL_HOURS + 1).is_err());
        assert_eq!(check_session_ttl_hours(24).unwrap(), 24);
        assert_eq!(
            check_session_ttl_hours(MAX_SESSION_TTL_HOURS).unwrap(),
            MAX_SESSION_TTL_HOURS
        );
    }
}
