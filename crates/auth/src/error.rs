//! Fehlertypen fuer den Auth-Service

use thiserror::Error;

/// Fehler des Passwort-Hashers
#[derive(Debug, Error)]
pub enum PasswordError {
    /// Interner Kryptografie-Fehler beim Hashen (selten, nicht wiederholen)
    #[error("Passwort-Hashing fehlgeschlagen: {0}")]
    Hashing(String),

    /// Gespeicherter Hash ist nicht lesbar; ein falsches Passwort ist kein Fehler
    #[error("Passwort-Verifikation fehlgeschlagen: {0}")]
    Verification(String),
}

/// Alle moeglichen Ergebnisse ausser Erfolg im Auth-Service
///
/// Fehler aus tieferen Schichten (Store, Hasher) werden immer in eine
/// dieser Varianten uebersetzt. Der Text von `Internal` ist nur fuer Logs
/// bestimmt.
#[derive(Debug, Error)]
pub enum AuthError {
    // --- Eingabe ---
    #[error("Ungueltige Eingabe: {0}")]
    Validation(String),

    // --- Kontoverwaltung ---
    #[error("Konto existiert bereits: {0}")]
    Conflict(String),

    // --- Authentifizierung ---
    #[error("Konto nicht verifiziert")]
    NotVerified,

    #[error("Falsches Passwort")]
    WrongPassword,

    // --- Intern ---
    #[error("Interner Fehler: {0}")]
    Internal(String),
}

impl AuthError {
    pub fn validierung(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn intern(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

impl From<PasswordError> for AuthError {
    fn from(e: PasswordError) -> Self {
        Self::Internal(e.to_string())
    }
}

impl From<miauw_db::DbError> for AuthError {
    fn from(e: miauw_db::DbError) -> Self {
        Self::Internal(e.to_string())
    }
}

impl From<miauw_core::CoreError> for AuthError {
    fn from(e: miauw_core::CoreError) -> Self {
        Self::Validation(e.to_string())
    }
}

/// Result-Alias fuer den Auth-Service
pub type AuthResult<T> = Result<T, AuthError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn db_fehler_wird_intern() {
        let e: AuthError = miauw_db::DbError::intern("kaputt").into();
        assert!(matches!(e, AuthError::Internal(_)));
    }

    #[test]
    fn kennungsfehler_wird_validierung() {
        let e: AuthError = miauw_core::CoreError::LeereKennung.into();
        assert!(matches!(e, AuthError::Validation(_)));
    }
}
