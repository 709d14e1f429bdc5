//! Worker-Konfiguration
//!
//! Wird beim Start aus einer TOML-Datei geladen. Alle Felder haben
//! sinnvolle Standardwerte, sodass der Worker ohne Konfigurationsdatei
//! lauffaehig ist.

use std::time::Duration;

use miauw_auth::HashingParams;
use miauw_db::{DatabaseBackend, DatabaseConfig};
use serde::{Deserialize, Serialize};

/// Vollstaendige Worker-Konfiguration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Datenbank-Einstellungen
    pub datenbank: DatenbankEinstellungen,
    /// Argon2-Parameter
    pub hashing: HashingParams,
    /// Einstellungen fuer die Job-Verarbeitung
    pub worker: WorkerEinstellungen,
    /// Logging-Einstellungen
    pub logging: LoggingEinstellungen,
}

/// Datenbank-Einstellungen
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatenbankEinstellungen {
    /// Backend: "sqlite" oder "memory"
    pub typ: DatabaseBackend,
    /// Verbindungs-URL (nur SQLite)
    pub url: String,
    /// Maximale Verbindungspool-Groesse
    pub max_verbindungen: u32,
    /// WAL-Modus fuer SQLite
    pub sqlite_wal: bool,
}

impl Default for DatenbankEinstellungen {
    fn default() -> Self {
        Self {
            typ: DatabaseBackend::Sqlite,
            url: "sqlite://miauw-auth.db".into(),
            max_verbindungen: 5,
            sqlite_wal: true,
        }
    }
}

impl DatenbankEinstellungen {
    /// Verbindungsparameter fuer das SQLite-Backend
    pub fn als_database_config(&self) -> DatabaseConfig {
        DatabaseConfig {
            url: self.url.clone(),
            max_verbindungen: self.max_verbindungen,
            sqlite_wal: self.sqlite_wal,
        }
    }
}

/// Einstellungen fuer die Job-Verarbeitung
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkerEinstellungen {
    /// Zeitlimit pro Operation in Millisekunden
    pub operation_timeout_ms: u64,
}

impl Default for WorkerEinstellungen {
    fn default() -> Self {
        Self {
            operation_timeout_ms: 5_000,
        }
    }
}

impl WorkerEinstellungen {
    pub fn operation_timeout(&self) -> Duration {
        Duration::from_millis(self.operation_timeout_ms)
    }
}

/// Logging-Einstellungen
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingEinstellungen {
    /// Log-Level: "trace", "debug", "info", "warn", "error"
    pub level: String,
    /// Format: "json" oder "text"
    pub format: String,
}

impl Default for LoggingEinstellungen {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: "text".into(),
        }
    }
}

impl ServerConfig {
    /// Laedt die Konfiguration aus einer TOML-Datei.
    /// Gibt die Standardkonfiguration zurueck wenn die Datei nicht existiert.
    pub fn laden(pfad: &str) -> anyhow::Result<Self> {
        match std::fs::read_to_string(pfad) {
            Ok(inhalt) => {
                let config: Self = toml::from_str(&inhalt)
                    .map_err(|e| anyhow::anyhow!("Konfigurationsfehler in '{pfad}': {e}"))?;
                Ok(config)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!(
                    pfad = pfad,
                    "Konfigurationsdatei nicht gefunden, verwende Standardwerte"
                );
                Ok(Self::default())
            }
            Err(e) => Err(anyhow::anyhow!(
                "Konfigurationsdatei '{pfad}' nicht lesbar: {e}"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_config_ist_valide() {
        let cfg = ServerConfig::default();
        assert_eq!(cfg.datenbank.typ, DatabaseBackend::Sqlite);
        assert_eq!(cfg.hashing, HashingParams::default());
        assert_eq!(cfg.worker.operation_timeout(), Duration::from_secs(5));
        assert_eq!(cfg.logging.level, "info");
    }

    #[test]
    fn config_aus_toml_string() {
        let toml = r#"
            [datenbank]
            typ = "memory"

            [hashing]
            memory_kib = 19456
            iterations = 2

            [worker]
            operation_timeout_ms = 250
        "#;
        let cfg: ServerConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.datenbank.typ, DatabaseBackend::Memory);
        assert_eq!(cfg.hashing.memory_kib, 19456);
        assert_eq!(cfg.hashing.iterations, 2);
        assert_eq!(cfg.worker.operation_timeout(), Duration::from_millis(250));
        // Nicht angegebene Felder behalten Standardwerte
        assert_eq!(cfg.hashing.parallelism, 1);
        assert_eq!(cfg.datenbank.max_verbindungen, 5);
        assert_eq!(cfg.logging.format, "text");
    }

    #[test]
    fn unbekanntes_backend_ist_fehler() {
        let ergebnis: Result<ServerConfig, _> = toml::from_str("[datenbank]\ntyp = \"postgres\"\n");
        assert!(ergebnis.is_err());
    }

    #[test]
    fn fehlende_datei_gibt_standardwerte() {
        let cfg = ServerConfig::laden("/nicht/vorhanden/miauw-auth.toml").unwrap();
        assert_eq!(cfg.datenbank.url, "sqlite://miauw-auth.db");
    }

    #[test]
    fn sqlite_verbindungsparameter() {
        let cfg = DatenbankEinstellungen::default().als_database_config();
        assert_eq!(cfg.url, "sqlite://miauw-auth.db");
        assert!(cfg.sqlite_wal);
    }
}
