use std::sync::Mutex;

use redis::{Commands, Connection};

use super::{KeyValueStore, StorageError};

/// Redis-backed key-value store over a single synchronous connection.
///
/// The whole notification collection lives under one key, so plain
/// GET/SET/DEL is the entire protocol.
pub struct RedisStore {
    conn: Mutex<Connection>,
}

impl RedisStore {
    pub fn connect(url: &str) -> Result<Self, StorageError> {
        let client = redis::Client::open(url)?;
        let conn = client.get_connection()?;
        tracing::info!(url = %url, "connected to Redis");
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn with_conn<T>(
        &self,
        f: impl FnOnce(&mut Connection) -> Result<T, redis::RedisError>,
    ) -> Result<T, StorageError> {
        let mut conn = self
            .conn
            .lock()
            .map_err(|_| StorageError::Unavailable("redis connection lock poisoned".into()))?;
        f(&mut conn).map_err(StorageError::from)
    }
}

impl KeyValueStore for RedisStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.with_conn(|conn| conn.get(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.with_conn(|conn| conn.set(key, value))
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.with_conn(|conn| conn.del(key))
    }
}
