//! Antwortstruktur und Problem-Katalog
//!
//! Die Form `{Code, Title, Detail, Type}` ist der stabile Wire-Vertrag mit
//! bestehenden Clients und darf sich nicht aendern. Jede Fehlerart hat eine
//! eigene `Type`-URI.

use serde::{Deserialize, Serialize};

/// Basis aller Problem-URIs
pub const PROBLEM_BASIS: &str = "https://auth.miauw.social/login";

/// Status-Teil einer Antwort
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ResponseStatus {
    pub code: u16,
    pub title: String,
    pub detail: String,
    #[serde(rename = "Type")]
    pub problem_type: String,
}

impl ResponseStatus {
    /// Erfolgsstatus ohne Problem-Angaben
    pub fn erfolg(code: u16) -> Self {
        Self {
            code,
            ..Default::default()
        }
    }
}

/// Vollstaendige Antwort eines Handlers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Response {
    pub content: Option<serde_json::Value>,
    pub status: ResponseStatus,
}

impl Response {
    /// Erfolg ohne Inhalt
    pub fn leer(code: u16) -> Self {
        Self {
            content: None,
            status: ResponseStatus::erfolg(code),
        }
    }

    /// Erfolg mit serialisiertem Inhalt
    pub fn mit_inhalt<T: Serialize>(code: u16, inhalt: &T) -> Self {
        match serde_json::to_value(inhalt) {
            Ok(wert) => Self {
                content: Some(wert),
                status: ResponseStatus::erfolg(code),
            },
            Err(e) => {
                tracing::error!(fehler = %e, "Antwortinhalt nicht serialisierbar");
                Problem::Internal.into()
            }
        }
    }

    /// Statuscode der Antwort
    pub fn code(&self) -> u16 {
        self.status.code
    }

    /// Serialisiert die Antwort als JSON-Bytes
    pub fn to_bytes(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec(self)
    }
}

/// Alle Fehlerarten die ein Client sehen kann
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Problem {
    /// Payload nicht dekodierbar
    NotProcessable,
    /// Payload dekodierbar, aber Kennung oder Passwort unzulaessig
    InvalidInput,
    /// Konto-ID bereits vergeben
    Conflict,
    /// Konto noch nicht verifiziert
    NotVerified,
    /// Passwort falsch oder Konto unbekannt
    WrongPassword,
    /// Store- oder Hashing-Fehler, ohne interne Details
    Internal,
}

impl Problem {
    pub fn code(&self) -> u16 {
        match self {
            Self::NotProcessable | Self::InvalidInput => 422,
            Self::Conflict => 409,
            Self::NotVerified => 403,
            Self::WrongPassword => 401,
            Self::Internal => 500,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::NotProcessable => "Not processable!",
            Self::InvalidInput => "Invalid input",
            Self::Conflict => "Account already exists",
            Self::NotVerified => "Account not verified",
            Self::WrongPassword => "Wrong password",
            Self::Internal => "Internal error",
        }
    }

    pub fn detail(&self) -> &'static str {
        match self {
            Self::NotProcessable => "The data send to the worker was not processable.",
            Self::InvalidInput => "The submitted ID must be a UUID and the password must not be empty.",
            Self::Conflict => "An account with this ID already exists.",
            Self::NotVerified => "Your account is not verified. Please verify it first.",
            Self::WrongPassword => "The submitted password does not match the password in the database.",
            Self::Internal => "The request could not be completed. Please try again later.",
        }
    }

    /// Letztes Segment der `Type`-URI
    pub fn slug(&self) -> &'static str {
        match self {
            Self::NotProcessable => "not-processable",
            Self::InvalidInput => "invalid-input",
            Self::Conflict => "conflict",
            Self::NotVerified => "not-verified",
            Self::WrongPassword => "wrong-password",
            Self::Internal => "internal",
        }
    }

    pub fn type_uri(&self) -> String {
        format!("{PROBLEM_BASIS}/{}", self.slug())
    }
}

impl From<Problem> for ResponseStatus {
    fn from(p: Problem) -> Self {
        Self {
            code: p.code(),
            title: p.title().to_string(),
            detail: p.detail().to_string(),
            problem_type: p.type_uri(),
        }
    }
}

impl From<Problem> for Response {
    fn from(p: Problem) -> Self {
        Self {
            content: None,
            status: p.into(),
        }
    }
}
