pub mod errors;
pub mod storage;
pub mod telemetry;
pub mod types;

pub use errors::{AppError, AppResult, ErrorCode};
pub use types::*;
