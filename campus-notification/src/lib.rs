pub mod config;
pub mod models;
pub mod services;
pub mod store;

pub use config::AppConfig;
pub use models::*;
pub use store::NotificationStore;
