//! SQLite-Backend-Implementierungen fuer alle Repository-Traits

pub mod accounts;
pub mod pool;
pub mod sessions;

pub use pool::SqliteDb;
