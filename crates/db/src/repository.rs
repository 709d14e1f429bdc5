//! Repository-Trait-Definitionen
//!
//! Das Repository-Pattern entkoppelt die Geschaeftslogik von der konkreten
//! Speicherung. Der Store garantiert Atomaritaet einzelner Operationen
//! (insbesondere eindeutige Konto-IDs); Transaktionen ueber mehrere
//! Operationen hinweg gibt es nicht.

use async_trait::async_trait;
use miauw_core::AccountId;
use serde::{Deserialize, Serialize};

use crate::error::DbResult;
use crate::models::{Account, Session};

/// Unterstuetzte Speicher-Backends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseBackend {
    /// SQLite – Standard fuer den Betrieb
    Sqlite,
    /// Fluechtiger In-Memory-Store
    Memory,
}

impl std::fmt::Display for DatabaseBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite => write!(f, "SQLite"),
            Self::Memory => write!(f, "In-Memory"),
        }
    }
}

/// Konfiguration fuer die Datenbankverbindung
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Verbindungs-URL (z.B. "sqlite://miauw-auth.db")
    pub url: String,
    /// Maximale Anzahl gleichzeitiger Verbindungen im Pool
    pub max_verbindungen: u32,
    /// Ob WAL-Modus bei SQLite aktiviert werden soll
    pub sqlite_wal: bool,
}

/// Repository fuer Konto-Datenzugriffe
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Legt ein neues Konto an
    ///
    /// Gibt `DbError::Konflikt` zurueck wenn die ID bereits existiert;
    /// das bestehende Konto bleibt dabei unveraendert.
    async fn create(&self, account: &Account) -> DbResult<()>;

    /// Laedt ein Konto anhand seiner ID (`None` wenn nicht vorhanden)
    async fn find_by_id(&self, id: AccountId) -> DbResult<Option<Account>>;
}

/// Repository fuer Session-Datenzugriffe
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Speichert eine neue Session
    async fn create(&self, session: &Session) -> DbResult<()>;
}
