//! miauw-auth-server – Bibliotheks-Root
//!
//! Verdrahtet Konfiguration, Store, Hasher, CredentialService und
//! Dispatcher und stellt die Job-Schleife fuer Integrationstests bereit.

pub mod config;

use std::sync::Arc;

use anyhow::Result;
use config::ServerConfig;
use miauw_auth::{Argon2Hasher, CredentialService, UuidSessionIds};
use miauw_db::{AccountRepository, DatabaseBackend, MemoryStore, SessionRepository, SqliteDb};
use miauw_worker::{JobDispatcher, RequestHandler};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

/// Haelt den laufenden Worker-Zustand zusammen
pub struct Server {
    pub config: ServerConfig,
}

impl Server {
    /// Erstellt einen neuen Server aus der gegebenen Konfiguration
    pub fn neu(config: ServerConfig) -> Self {
        Self { config }
    }

    /// Startet den Worker und laeuft bis stdin endet oder Ctrl-C eintrifft
    ///
    /// Reihenfolge:
    /// 1. Store oeffnen (SQLite inkl. Migrationen oder In-Memory)
    /// 2. Hasher und CredentialService aufbauen
    /// 3. Jobs zeilenweise von stdin lesen, Antworten nach stdout schreiben
    pub async fn starten(self) -> Result<()> {
        tracing::info!(
            backend = %self.config.datenbank.typ,
            url = %self.config.datenbank.url,
            "Store wird geoeffnet"
        );

        match self.config.datenbank.typ {
            DatabaseBackend::Sqlite => {
                let db = SqliteDb::open(&self.config.datenbank.als_database_config()).await?;
                let db = Arc::new(db);
                self.laufen(Arc::clone(&db), db).await
            }
            DatabaseBackend::Memory => {
                tracing::warn!("In-Memory-Store aktiv, Daten gehen beim Beenden verloren");
                let store = Arc::new(MemoryStore::neu());
                self.laufen(Arc::clone(&store), store).await
            }
        }
    }

    async fn laufen<A, S>(&self, accounts: Arc<A>, sessions: Arc<S>) -> Result<()>
    where
        A: AccountRepository + 'static,
        S: SessionRepository + 'static,
    {
        let dispatcher = dispatcher_bauen(&self.config, accounts, sessions).await?;

        let stdin = tokio::io::BufReader::new(tokio::io::stdin());
        let stdout = tokio::io::stdout();

        tracing::info!("Worker laeuft. Erwarte Jobs auf stdin...");
        tokio::select! {
            ergebnis = jobs_verarbeiten(&dispatcher, stdin, stdout) => {
                let anzahl = ergebnis?;
                tracing::info!(anzahl, "Eingabe beendet, Worker wird beendet");
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Shutdown-Signal empfangen, Worker wird beendet");
            }
        }

        Ok(())
    }
}

/// Baut Hasher, Service, Handler und Dispatcher aus der Konfiguration
///
/// Der Service berechnet beim Aufbau einen Vergleichs-Hash, daher laeuft
/// die Konstruktion auf dem Blocking-Pool.
pub async fn dispatcher_bauen<A, S>(
    config: &ServerConfig,
    accounts: Arc<A>,
    sessions: Arc<S>,
) -> Result<JobDispatcher<A, S>>
where
    A: AccountRepository + 'static,
    S: SessionRepository + 'static,
{
    let hasher = Argon2Hasher::new(&config.hashing)?;
    tracing::debug!(?hasher, "Passwort-Hasher konfiguriert");

    let service = tokio::task::spawn_blocking(move || {
        CredentialService::neu(accounts, sessions, Arc::new(hasher), Arc::new(UuidSessionIds))
    })
    .await??;
    let handler = RequestHandler::neu(Arc::new(service), config.worker.operation_timeout());
    Ok(JobDispatcher::neu(Arc::new(handler)))
}

/// Liest Jobs zeilenweise und schreibt je Job eine Antwortzeile
///
/// Zeilen werden als rohe Bytes gelesen; ungueltiges UTF-8 ergibt wie jeder
/// andere unlesbare Umschlag eine 422-Antwort. Leere Zeilen werden
/// uebersprungen. Gibt die Anzahl verarbeiteter Jobs zurueck.
pub async fn jobs_verarbeiten<A, S, R, W>(
    dispatcher: &JobDispatcher<A, S>,
    mut reader: R,
    mut writer: W,
) -> Result<usize>
where
    A: AccountRepository,
    S: SessionRepository,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut zeile = Vec::new();
    let mut anzahl = 0;

    loop {
        zeile.clear();
        if reader.read_until(b'\n', &mut zeile).await? == 0 {
            break;
        }
        if zeile.iter().all(u8::is_ascii_whitespace) {
            continue;
        }

        let antwort = dispatcher.dispatch(&zeile).await;
        tracing::debug!(code = antwort.code(), "Job verarbeitet");

        let mut bytes = antwort.to_bytes()?;
        bytes.push(b'\n');
        writer.write_all(&bytes).await?;
        writer.flush().await?;
        anzahl += 1;
    }

    Ok(anzahl)
}
