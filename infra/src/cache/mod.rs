//! Cache module for code storage
//!
//! This module provides the `CodeStore` implementations: a Redis-backed
//! store for deployments and an in-memory store for development and tests.

pub mod code_store;
pub mod memory_store;
pub mod redis_client;


pub use code_store::RedisCodeStore;
pub use memory_store::InMemoryCodeStore;
pub use redis_client::RedisClient;

// Re-export commonly used types
pub use msg_shared::config::cache::CacheConfig;
