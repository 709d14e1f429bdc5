//! miauw-db – Repository-Abstraktion fuer Konten und Sessions
//!
//! Dieses Crate stellt das Repository-Pattern bereit, das die
//! Geschaeftslogik von der konkreten Speicherung entkoppelt. Es gibt zwei
//! Backends: einen In-Memory-Store (Tests, Einbettung) und SQLite.

pub mod error;
pub mod memory;
pub mod models;
pub mod repository;
pub mod sqlite;

pub use error::{DbError, DbResult};
pub use memory::MemoryStore;
pub use models::{Account, Session};
pub use repository::{AccountRepository, DatabaseBackend, DatabaseConfig, SessionRepository};
pub use sqlite::SqliteDb;
