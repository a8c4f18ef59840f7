pub mod memory;
pub mod redis;

pub use memory::MemoryStore;
pub use redis::RedisStore;

/// Errors surfaced by a key-value backend.
///
/// Storage failures are explicit values, not swallowed logs: callers decide
/// whether a missing write is acceptable for their feature.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),

    #[error("redis error: {0}")]
    Redis(#[from] ::redis::RedisError),
}

/// Generic key-value persistence: string keys, string values, no schema,
/// no transactions. Callers serialize whole collections under one key.
///
/// Injected rather than ambient so tests can supply [`MemoryStore`].
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}
