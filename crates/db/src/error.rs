//! Fehlertypen fuer das Datenbank-Crate

use thiserror::Error;

/// Datenbank-Fehlertypen
#[derive(Debug, Error)]
pub enum DbError {
    #[error("Datensatz existiert bereits: {0}")]
    Konflikt(String),

    #[error("Datensatz nicht gefunden: {0}")]
    NichtGefunden(String),

    #[error("SQLx-Fehler: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("Migration-Fehler: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Interner DB-Fehler: {0}")]
    Intern(String),
}

/// Result-Alias fuer das Datenbank-Crate
pub type DbResult<T> = Result<T, DbError>;

impl DbError {
    pub fn nicht_gefunden(msg: impl Into<String>) -> Self {
        Self::NichtGefunden(msg.into())
    }

    pub fn intern(msg: impl Into<String>) -> Self {
        Self::Intern(msg.into())
    }

    /// Gibt true zurueck wenn ein Eindeutigkeitsfehler vorliegt
    pub fn ist_konflikt(&self) -> bool {
        match self {
            Self::Konflikt(_) => true,
            Self::Sqlx(e) => ist_eindeutigkeitsverletzung(e),
            _ => false,
        }
    }
}

/// Erkennt UNIQUE-/PRIMARY-KEY-Verletzungen in SQLx-Fehlern
pub(crate) fn ist_eindeutigkeitsverletzung(e: &sqlx::Error) -> bool {
    match e.as_database_error() {
        Some(db) => db.is_unique_violation() || db.message().contains("UNIQUE"),
        None => false,
    }
}
