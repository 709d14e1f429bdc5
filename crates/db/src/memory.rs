//! In-Memory-Implementierung beider Repository-Traits
//!
//! Haelt Konten und Sessions in `RwLock<HashMap>`s. Gedacht fuer Tests und
//! fuer Einbettungen ohne persistenten Speicher.

use std::collections::HashMap;

use async_trait::async_trait;
use miauw_core::{AccountId, SessionId};
use tokio::sync::RwLock;

use crate::error::{DbError, DbResult};
use crate::models::{Account, Session};
use crate::repository::{AccountRepository, SessionRepository};

/// Fluechtiger Store fuer Konten und Sessions
#[derive(Debug, Default)]
pub struct MemoryStore {
    konten: RwLock<HashMap<AccountId, Account>>,
    sessions: RwLock<HashMap<SessionId, Session>>,
}

impl MemoryStore {
    /// Erstellt einen leeren Store
    pub fn neu() -> Self {
        Self::default()
    }

    /// Setzt das `verified`-Flag eines Kontos
    ///
    /// Steht fuer den externen Verifikationsprozess; die Geschaeftslogik
    /// ruft diese Methode nie auf. Gibt `false` zurueck wenn das Konto
    /// nicht existiert.
    pub async fn mark_verified(&self, id: AccountId) -> bool {
        match self.konten.write().await.get_mut(&id) {
            Some(konto) => {
                konto.verified = true;
                tracing::debug!(account_id = %id, "Konto als verifiziert markiert");
                true
            }
            None => false,
        }
    }

    /// Anzahl der gespeicherten Konten
    pub async fn account_count(&self) -> usize {
        self.konten.read().await.len()
    }

    /// Anzahl der gespeicherten Sessions
    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Alle Sessions eines Kontos
    pub async fn sessions_for(&self, account_id: AccountId) -> Vec<Session> {
        self.sessions
            .read()
            .await
            .values()
            .filter(|s| s.account_id == account_id)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl AccountRepository for MemoryStore {
    async fn create(&self, account: &Account) -> DbResult<()> {
        let mut konten = self.konten.write().await;
        if konten.contains_key(&account.id) {
            return Err(DbError::Konflikt(format!("Konto {}", account.id)));
        }
        konten.insert(account.id, account.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: AccountId) -> DbResult<Option<Account>> {
        Ok(self.konten.read().await.get(&id).cloned())
    }
}

#[async_trait]
impl SessionRepository for MemoryStore {
    async fn create(&self, session: &Session) -> DbResult<()> {
        // Entspricht dem Fremdschluessel im SQLite-Schema
        if !self.konten.read().await.contains_key(&session.account_id) {
            return Err(DbError::nicht_gefunden(format!(
                "Konto {}",
                session.account_id
            )));
        }

        let mut sessions = self.sessions.write().await;
        if sessions.contains_key(&session.id) {
            return Err(DbError::Konflikt(format!("Session {}", session.id)));
        }
        sessions.insert(session.id, session.clone());
        Ok(())
    }
}
