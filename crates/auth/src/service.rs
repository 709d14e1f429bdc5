//! CredentialService – Konto anlegen und Login pruefen
//!
//! Zentraler Service der Konto-Erstellung und Login orchestriert. Nutzt die
//! injizierten Repositories, den Passwort-Hasher und den Session-ID-Generator;
//! haelt selbst keinen veraenderlichen Zustand.
//!
//! ## Login-Ablauf
//! 1. Konto laden
//! 2. Verifikations-Gate: unverifizierte Konten erreichen die
//!    Passwortpruefung nie
//! 3. Passwort pruefen
//! 4. Session ausstellen

use std::sync::Arc;

use miauw_core::{AccountId, SessionId};
use miauw_db::{Account, AccountRepository, Session, SessionRepository};

use crate::{
    error::{AuthError, AuthResult},
    ids::SessionIdGenerator,
    password::PasswordHasher,
};

/// Vergleichswert fuer Logins auf unbekannte Konten
const DUMMY_PASSWORT: &str = "miauw-auth-dummy-passwort";

/// Bestaetigung einer Konto-Erstellung (ohne Hash)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccountCreated {
    pub id: AccountId,
}

/// Konto- und Login-Service
pub struct CredentialService<A: AccountRepository, S: SessionRepository> {
    accounts: Arc<A>,
    sessions: Arc<S>,
    hasher: Arc<dyn PasswordHasher>,
    session_ids: Arc<dyn SessionIdGenerator>,
    /// Hash von `DUMMY_PASSWORT`, gleicht die Laufzeit bei unbekannten Konten an
    dummy_hash: String,
}

impl<A: AccountRepository, S: SessionRepository> CredentialService<A, S> {
    /// Erstellt einen neuen CredentialService
    ///
    /// Berechnet einmalig einen Vergleichs-Hash mit dem uebergebenen Hasher.
    pub fn neu(
        accounts: Arc<A>,
        sessions: Arc<S>,
        hasher: Arc<dyn PasswordHasher>,
        session_ids: Arc<dyn SessionIdGenerator>,
    ) -> AuthResult<Self> {
        let dummy_hash = hasher.hash(DUMMY_PASSWORT)?;

        Ok(Self {
            accounts,
            sessions,
            hasher,
            session_ids,
            dummy_hash,
        })
    }

    /// Legt ein neues, unverifiziertes Konto an
    ///
    /// Die ID wird vom Aufrufer vorgegeben und muss eine UUID sein. Eine
    /// bereits vergebene ID ergibt `AuthError::Conflict`, das bestehende
    /// Konto bleibt unveraendert.
    pub async fn create_account(&self, id: &str, passwort: &str) -> AuthResult<AccountCreated> {
        let id = AccountId::parse(id)?;
        if passwort.is_empty() {
            return Err(AuthError::validierung("Passwort darf nicht leer sein"));
        }

        let passwort_hash = self.hash_blockierend(passwort).await?;

        // Verifikation erfolgt extern, neue Konten koennen sich nicht anmelden
        let konto = Account::neu(id, passwort_hash);

        match self.accounts.create(&konto).await {
            Ok(()) => {}
            Err(e) if e.ist_konflikt() => {
                tracing::info!(account_id = %id, "Konto-ID bereits vergeben");
                return Err(AuthError::Conflict(e.to_string()));
            }
            Err(e) => {
                tracing::error!(account_id = %id, fehler = %e, "Konto konnte nicht gespeichert werden");
                return Err(e.into());
            }
        }

        tracing::info!(account_id = %id, "Neues Konto angelegt");
        Ok(AccountCreated { id })
    }

    /// Prueft einen Login-Versuch und stellt bei Erfolg eine Session aus
    ///
    /// Jeder Aufruf ist ein einzelner Versuch ohne automatische Wiederholung.
    /// Ein unbekanntes Konto ist nach aussen nicht von einem falschen
    /// Passwort unterscheidbar.
    pub async fn login(&self, id: &str, passwort: &str) -> AuthResult<SessionId> {
        let id = AccountId::parse(id)?;

        // Konto laden
        let konto = match self.accounts.find_by_id(id).await {
            Ok(Some(konto)) => konto,
            Ok(None) => {
                tracing::info!(account_id = %id, "Login fuer unbekanntes Konto");
                // Ergebnis egal, nur die Laufzeit zaehlt
                let _ = self.verify_blockierend(self.dummy_hash.clone(), passwort).await;
                return Err(AuthError::WrongPassword);
            }
            Err(e) => {
                tracing::error!(account_id = %id, fehler = %e, "Konto konnte nicht geladen werden");
                return Err(e.into());
            }
        };

        // Verifikations-Gate vor jeder Passwortpruefung
        if !konto.verified {
            tracing::info!(account_id = %id, "Login fuer unverifiziertes Konto abgelehnt");
            return Err(AuthError::NotVerified);
        }

        // Passwort pruefen
        let korrekt = self
            .verify_blockierend(konto.password_hash, passwort)
            .await
            .inspect_err(|e| {
                tracing::error!(account_id = %id, fehler = %e, "Gespeicherter Hash nicht pruefbar");
            })?;
        if !korrekt {
            tracing::warn!(account_id = %id, "Fehlgeschlagener Login-Versuch");
            return Err(AuthError::WrongPassword);
        }

        // Session erstellen
        let session = Session::neu(self.session_ids.generate(), konto.id);
        self.sessions.create(&session).await.map_err(|e| {
            tracing::error!(account_id = %id, fehler = %e, "Session konnte nicht gespeichert werden");
            AuthError::from(e)
        })?;

        tracing::info!(account_id = %id, "Konto angemeldet");
        Ok(session.id)
    }

    /// Hasht auf dem Blocking-Pool, Argon2 ist CPU-gebunden
    async fn hash_blockierend(&self, passwort: &str) -> AuthResult<String> {
        let hasher = Arc::clone(&self.hasher);
        let passwort = passwort.to_owned();

        tokio::task::spawn_blocking(move || hasher.hash(&passwort))
            .await
            .map_err(|e| AuthError::intern(format!("Hash-Task abgebrochen: {e}")))?
            .map_err(|e| {
                tracing::error!(fehler = %e, "Passwort-Hashing fehlgeschlagen");
                AuthError::from(e)
            })
    }

    async fn verify_blockierend(&self, hash: String, passwort: &str) -> AuthResult<bool> {
        let hasher = Arc::clone(&self.hasher);
        let passwort = passwort.to_owned();

        tokio::task::spawn_blocking(move || hasher.verify(&hash, &passwort))
            .await
            .map_err(|e| AuthError::intern(format!("Verifikations-Task abgebrochen: {e}")))?
            .map_err(AuthError::from)
    }
}
