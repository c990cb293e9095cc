//! Core types and shared state for the storefront client.
//!
//! This crate provides:
//! - Session store with a durable key-value substrate (SQLite or memory)
//! - Time-boxed in-memory response cache
//! - Layered configuration
//! - Unified error types

pub mod cache;
pub mod config;
pub mod error;
pub mod session;
pub mod storage;

pub use cache::{DEFAULT_TTL, ResponseCache};
pub use config::{AppConfig, ConfigError};
pub use error::Error;
pub use session::{Session, SessionStore, User};
pub use storage::{MemoryStorage, SessionStorage, SqliteStorage};
