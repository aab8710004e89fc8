// src/utils/mod.rs

pub mod error;
pub mod formatter;
pub mod helpers;
pub mod logger;
pub mod time;

// Re-export commonly used items
pub use error::{ConfigError, RelayError, RelayResult};
pub use helpers::*;
pub use logger::*;
pub use time::*;
