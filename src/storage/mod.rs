// src/storage/mod.rs

pub mod memory;
pub mod records;
#[cfg(feature = "redis")]
pub mod redis;
pub mod traits;

pub use memory::InMemoryStore;
pub use records::{CheckRecord, Site};
#[cfg(feature = "redis")]
pub use redis::RedisStore;
pub use traits::{HistoryStore, SiteStore};
