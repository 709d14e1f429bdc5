//! Gemeinsame Identifikationstypen fuer miauw-auth
//!
//! Alle IDs verwenden das Newtype-Pattern um Verwechslungen zwischen
//! Konto- und Session-Kennungen zur Compilezeit auszuschliessen.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};

/// Eindeutige Konto-ID (wird vom Aufrufer vorgegeben)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccountId(pub Uuid);

impl AccountId {
    /// Prueft und parst eine Konto-Kennung aus untrusted Input
    ///
    /// Akzeptiert ausschliesslich UUID-Strings. Umgebende Leerzeichen
    /// werden nicht toleriert.
    pub fn parse(roh: &str) -> CoreResult<Self> {
        kennung_parsen(roh).map(Self)
    }
}

impl FromStr for AccountId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<Uuid> for AccountId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for AccountId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Eindeutige Session-ID (wird serverseitig erzeugt)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub Uuid);

impl SessionId {
    /// Erstellt eine neue zufaellige SessionId
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for SessionId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn kennung_parsen(roh: &str) -> CoreResult<Uuid> {
    if roh.is_empty() {
        return Err(CoreError::LeereKennung);
    }
    Uuid::parse_str(roh).map_err(|_| CoreError::UngueltigeKennung(roh.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gueltige_uuid_wird_akzeptiert() {
        let id = AccountId::parse("11111111-1111-1111-1111-111111111111").unwrap();
        assert_eq!(id.to_string(), "11111111-1111-1111-1111-111111111111");
    }

    #[test]
    fn leere_kennung_wird_abgelehnt() {
        assert_eq!(AccountId::parse(""), Err(CoreError::LeereKennung));
    }

    #[test]
    fn ungueltige_kennungen_werden_abgelehnt() {
        for roh in ["kein-uuid", "11111111-1111-1111-1111", " 11111111-1111-1111-1111-111111111111"] {
            assert!(
                matches!(AccountId::parse(roh), Err(CoreError::UngueltigeKennung(_))),
                "'{roh}' darf nicht akzeptiert werden"
            );
        }
    }

    #[test]
    fn from_str_entspricht_parse() {
        let a: AccountId = "11111111-1111-1111-1111-111111111111".parse().unwrap();
        let b = AccountId::parse("11111111-1111-1111-1111-111111111111").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn session_ids_sind_eindeutig() {
        assert_ne!(SessionId::new(), SessionId::new());
    }
}
