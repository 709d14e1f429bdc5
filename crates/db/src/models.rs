//! Datenbankmodelle fuer miauw-auth
//!
//! Diese Typen repraesentieren Datensaetze aus dem Store. Konten und
//! Sessions werden nach dem Anlegen von diesem Crate nie veraendert;
//! einzig `verified` wird von einem externen Prozess gesetzt.

use chrono::{DateTime, Utc};
use miauw_core::{AccountId, SessionId};

// ---------------------------------------------------------------------------
// Konten
// ---------------------------------------------------------------------------

/// Konto-Datensatz
#[derive(Clone, PartialEq, Eq)]
pub struct Account {
    pub id: AccountId,
    /// PHC-String des Passwort-Hashers, nie im Klartext ableitbar
    pub password_hash: String,
    pub verified: bool,
    pub created_at: DateTime<Utc>,
}

impl Account {
    /// Erstellt ein neues, noch nicht verifiziertes Konto
    pub fn neu(id: AccountId, password_hash: String) -> Self {
        Self {
            id,
            password_hash,
            verified: false,
            created_at: Utc::now(),
        }
    }
}

// Hash taucht weder in Logs noch in Debug-Ausgaben auf
impl std::fmt::Debug for Account {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Account")
            .field("id", &self.id)
            .field("password_hash", &"<redacted>")
            .field("verified", &self.verified)
            .field("created_at", &self.created_at)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Sessions
// ---------------------------------------------------------------------------

/// Session-Datensatz
///
/// Verweist auf das Konto, dem die Session gehoert. Die Lebensdauer des
/// Kontos ist unabhaengig von der Session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub id: SessionId,
    pub account_id: AccountId,
    pub created_at: DateTime<Utc>,
}

impl Session {
    /// Erstellt eine neue Session fuer das angegebene Konto
    pub fn neu(id: SessionId, account_id: AccountId) -> Self {
        Self {
            id,
            account_id,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn neues_konto_ist_unverifiziert() {
        let konto = Account::neu(AccountId(Uuid::new_v4()), "$argon2id$x".into());
        assert!(!konto.verified);
    }

    #[test]
    fn debug_ausgabe_verbirgt_hash() {
        let konto = Account::neu(AccountId(Uuid::new_v4()), "$argon2id$geheim".into());
        let ausgabe = format!("{konto:?}");
        assert!(!ausgabe.contains("geheim"));
        assert!(ausgabe.contains("<redacted>"));
    }
}
