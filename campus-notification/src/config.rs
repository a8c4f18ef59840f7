use serde::Deserialize;

/// Service configuration, read from `CAMPUS_NOTIFICATION__*` environment
/// variables. The embedder wires it to a storage backend:
///
/// ```no_run
/// use campus_notification::{AppConfig, NotificationStore};
/// use campus_shared::storage::RedisStore;
///
/// # fn main() -> anyhow::Result<()> {
/// let config = AppConfig::load()?;
/// let kv = RedisStore::connect(&config.redis_url)?;
/// let store = NotificationStore::new(kv, config.storage_key);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    #[serde(default = "default_redis")]
    pub redis_url: String,
    #[serde(default = "default_storage_key")]
    pub storage_key: String,
}

fn default_redis() -> String { "redis://localhost:6379".into() }
fn default_storage_key() -> String { "campus:notifications".into() }

impl AppConfig {
    pub fn load() -> anyhow::Result<Self> {
        let config = config::Config::builder()
            .add_source(config::Environment::with_prefix("CAMPUS_NOTIFICATION").separator("__"))
            .build()?;
        Ok(config.try_deserialize().unwrap_or_else(|_| Self {
            redis_url: default_redis(),
            storage_key: default_storage_key(),
        }))
    }
}
