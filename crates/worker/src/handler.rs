//! RequestHandler – untrusted Payload rein, strukturierte Antwort raus
//!
//! Dekodierungsfehler brechen ab bevor ein Repository beruehrt wird.
//! Interne Fehlertexte werden nur geloggt, nie in die Antwort uebernommen.

use std::sync::Arc;
use std::time::Duration;

use miauw_auth::{AuthError, CredentialService};
use miauw_db::{AccountRepository, SessionRepository};
use serde::{Deserialize, Serialize};

use crate::response::{Problem, Response};

/// Payload fuer die Konto-Erstellung
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UserCreateData {
    #[serde(rename = "ID", alias = "Id", alias = "id")]
    pub id: String,
    #[serde(rename = "Password", alias = "password")]
    pub password: String,
}

/// Payload fuer den Login
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UserLoginData {
    #[serde(rename = "ID", alias = "Id", alias = "id")]
    pub id: String,
    #[serde(rename = "Password", alias = "password")]
    pub password: String,
}

/// Inhalt einer erfolgreichen Login-Antwort
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSessionResponse {
    #[serde(rename = "SID")]
    pub sid: String,
}

/// Handler fuer Konto-Erstellung und Login
pub struct RequestHandler<A: AccountRepository, S: SessionRepository> {
    service: Arc<CredentialService<A, S>>,
    /// Obergrenze pro Operation; bei Ablauf wird die Operation abgebrochen
    timeout: Duration,
}

impl<A: AccountRepository, S: SessionRepository> RequestHandler<A, S> {
    /// Erstellt einen neuen Handler
    pub fn neu(service: Arc<CredentialService<A, S>>, timeout: Duration) -> Self {
        Self { service, timeout }
    }

    /// Dekodiert und verarbeitet eine Konto-Erstellung
    ///
    /// Erfolg: Status 201 ohne Inhalt.
    pub async fn user_create(&self, raw: &[u8]) -> Response {
        match serde_json::from_slice::<UserCreateData>(raw) {
            Ok(data) => self.create(data).await,
            Err(e) => nicht_verarbeitbar("UserCreate", &e),
        }
    }

    /// Dekodiert und verarbeitet einen Login
    ///
    /// Erfolg: Status 200 mit `{"SID": ...}`.
    pub async fn user_login(&self, raw: &[u8]) -> Response {
        match serde_json::from_slice::<UserLoginData>(raw) {
            Ok(data) => self.login(data).await,
            Err(e) => nicht_verarbeitbar("UserLogin", &e),
        }
    }

    /// Verarbeitet eine bereits dekodierte Konto-Erstellung
    pub async fn create(&self, data: UserCreateData) -> Response {
        let operation = self.service.create_account(&data.id, &data.password);
        match tokio::time::timeout(self.timeout, operation).await {
            Ok(Ok(_)) => Response::leer(201),
            Ok(Err(e)) => fehler_antwort("UserCreate", e),
            Err(_) => zeitlimit("UserCreate", self.timeout),
        }
    }

    /// Verarbeitet einen bereits dekodierten Login
    pub async fn login(&self, data: UserLoginData) -> Response {
        let operation = self.service.login(&data.id, &data.password);
        match tokio::time::timeout(self.timeout, operation).await {
            Ok(Ok(sid)) => Response::mit_inhalt(
                200,
                &UserSessionResponse {
                    sid: sid.to_string(),
                },
            ),
            Ok(Err(e)) => fehler_antwort("UserLogin", e),
            Err(_) => zeitlimit("UserLogin", self.timeout),
        }
    }
}

fn nicht_verarbeitbar(operation: &str, e: &serde_json::Error) -> Response {
    tracing::debug!(operation, fehler = %e, "Payload nicht dekodierbar");
    Problem::NotProcessable.into()
}

fn zeitlimit(operation: &str, timeout: Duration) -> Response {
    tracing::warn!(
        operation,
        timeout_ms = timeout.as_millis() as u64,
        "Operation nach Zeitlimit abgebrochen"
    );
    Problem::Internal.into()
}

/// Bildet einen Service-Fehler auf die Wire-Antwort ab
fn fehler_antwort(operation: &str, e: AuthError) -> Response {
    let problem = match e {
        AuthError::Validation(_) => Problem::InvalidInput,
        AuthError::Conflict(_) => Problem::Conflict,
        AuthError::NotVerified => Problem::NotVerified,
        AuthError::WrongPassword => Problem::WrongPassword,
        AuthError::Internal(ref grund) => {
            tracing::error!(operation, grund = %grund, "Interner Fehler");
            Problem::Internal
        }
    };
    problem.into()
}
