use std::collections::{BTreeSet, HashMap};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use redis::{AsyncCommands, aio::ConnectionManager};

use crate::error::Result;

/// The key-value store the application persists into.
///
/// The store is the sole source of truth: notes, note metadata, and session
/// liveness markers are all entries under prefixed keys. Availability
/// failures surface as `AppError::StoreUnavailable`; a missing key is a
/// normal `None` / `false`, never an error.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Point lookup. `None` means the key does not exist (or has expired).
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Writes a value, optionally with a time-to-live after which the store
    /// itself evicts the entry.
    async fn put(&self, key: &str, value: &[u8], ttl: Option<Duration>) -> Result<()>;

    /// Deletes a key. Returns whether an entry existed and was removed.
    async fn delete(&self, key: &str) -> Result<bool>;

    /// Returns the values of every live entry whose key starts with `prefix`.
    async fn list(&self, prefix: &str) -> Result<Vec<Vec<u8>>>;
}

/// Redis-backed production store.
#[derive(Clone)]
pub struct RedisStore {
    conn: ConnectionManager,
}

impl RedisStore {
    /// Connects to Redis and returns a store handle.
    ///
    /// # Arguments
    ///
    /// * `redis_url` - The URL of the Redis server.
    ///
    /// # Returns
    ///
    /// A `Result` containing the `RedisStore`.
    pub async fn connect(redis_url: &str) -> Result<Self> {
        let client = redis::Client::open(redis_url)?;
        let conn = ConnectionManager::new(client).await?;
        Ok(Self { conn })
    }
}

#[async_trait]
impl KeyValueStore for RedisStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let mut conn = self.conn.clone();
        let value: Option<Vec<u8>> = conn.get(key).await?;
        Ok(value)
    }

    async fn put(&self, key: &str, value: &[u8], ttl: Option<Duration>) -> Result<()> {
        let mut conn = self.conn.clone();
        match ttl {
            Some(ttl) => {
                let () = conn.set_ex(key, value, ttl.as_secs().max(1)).await?;
            }
            None => {
                let () = conn.set(key, value).await?;
            }
        }
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<bool> {
        let mut conn = self.conn.clone();
        let removed: i64 = conn.del(key).await?;
        Ok(removed > 0)
    }

    async fn list(&self, prefix: &str) -> Result<Vec<Vec<u8>>> {
        let mut conn = self.conn.clone();
        let pattern = format!("{}*", prefix);

        // SCAN, not KEYS: KEYS blocks the server on large keyspaces. SCAN
        // is at-least-once, so a key can show up in more than one batch
        // while the keyspace rehashes; the set drops the repeats.
        let mut keys: BTreeSet<String> = BTreeSet::new();
        let mut cursor: u64 = 0;
        loop {
            let (next, batch): (u64, Vec<String>) = redis::cmd("SCAN")
                .arg(cursor)
                .arg("MATCH")
                .arg(&pattern)
                .arg("COUNT")
                .arg(100)
                .query_async(&mut conn)
                .await?;
            keys.extend(batch);
            cursor = next;
            if cursor == 0 {
                break;
            }
        }

        let mut values = Vec::with_capacity(keys.len());
        for key in keys {
            // A key may expire between SCAN and GET; skip it.
            let value: Option<Vec<u8>> = conn.get(&key).await?;
            if let Some(value) = value {
                values.push(value);
            }
        }

        Ok(values)
    }
}

/// In-memory store for tests and local runs. Honors TTLs at read time.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, (Vec<u8>, Option<Instant>)>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn is_expired(deadline: &Option<Instant>) -> bool {
        deadline.map(|d| Instant::now() >= d).unwrap_or(false)
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let mut entries = self.entries.lock().expect("memory store lock poisoned");
        match entries.get(key) {
            Some((_, deadline)) if Self::is_expired(deadline) => {
                entries.remove(key);
                Ok(None)
            }
            Some((value, _)) => Ok(Some(value.clone())),
            None => Ok(None),
        }
    }

    async fn put(&self, key: &str, value: &[u8], ttl: Option<Duration>) -> Result<()> {
        let deadline = ttl.map(|ttl| Instant::now() + ttl);
        self.entries
            .lock()
            .expect("memory store lock poisoned")
            .insert(key.to_string(), (value.to_vec(), deadline));
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<bool> {
        let mut entries = self.entries.lock().expect("memory store lock poisoned");
        match entries.remove(key) {
            Some((_, deadline)) if Self::is_expired(&deadline) => Ok(false),
            Some(_) => Ok(true),
            None => Ok(false),
        }
    }

    async fn list(&self, prefix: &str) -> Result<Vec<Vec<u8>>> {
        let mut entries = self.entries.lock().expect("memory store lock poisoned");
        entries.retain(|_, (_, deadline)| !Self::is_expired(deadline));
        Ok(entries
            .iter()
            .filter(|(key, _)| key.starts_with(prefix))
            .map(|(_, (value, _))| value.clone())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn memory_store_round_trip() {
        let store = MemoryStore::new();
        store.put("note:a", b"hello", None).await.unwrap();
        assert_eq!(store.get("note:a").await.unwrap(), Some(b"hello".to_vec()));
        assert_eq!(store.get("note:b").await.unwrap(), None);
    }

    #[tokio::test]
    async fn memory_store_delete_reports_existence() {
        let store = MemoryStore::new();
        store.put("k", b"v", None).await.unwrap();
        assert!(store.delete("k").await.unwrap());
        assert!(!store.delete("k").await.unwrap());
    }

    #[tokio::test]
    async fn memory_store_list_filters_by_prefix() {
        let store = MemoryStore::new();
        store.put("notemeta:a", b"1", None).await.unwrap();
        store.put("notemeta:b", b"2", None).await.unwrap();
        store.put("session:x", b"3", None).await.unwrap();
        let mut values = store.list("notemeta:").await.unwrap();
        values.sort();
        assert_eq!(values, vec![b"1".to_vec(), b"2".to_vec()]);
    }

    #[tokio::test]
    async fn memory_store_honors_ttl() {
        let store = MemoryStore::new();
        store
            .put("k", b"v", Some(Duration::from_millis(20)))
            .await
            .unwrap();
        assert!(store.get("k").await.unwrap().is_some());
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(store.get("k").await.unwrap().is_none());
    }
}
