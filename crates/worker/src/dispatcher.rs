//! Job-Dispatcher – routet Job-Umschlaege an den RequestHandler
//!
//! Ein Job ist ein JSON-Objekt `{"Operation": ..., "Data": {...}}`.
//! Unbekannte Operationen und unlesbare Umschlaege ergeben dieselbe
//! 422-Antwort wie ein unlesbarer Payload.

use std::sync::Arc;

use miauw_db::{AccountRepository, SessionRepository};
use serde::Deserialize;

use crate::handler::{RequestHandler, UserCreateData, UserLoginData};
use crate::response::{Problem, Response};

/// Unterstuetzte Operationen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum Operation {
    UserCreate,
    UserLogin,
}

/// Job-Umschlag wie er aus der Warteschlange kommt
#[derive(Debug, Deserialize)]
pub struct Job {
    #[serde(rename = "Operation")]
    pub operation: Operation,
    #[serde(rename = "Data", default)]
    pub data: serde_json::Value,
}

/// Zentraler Dispatcher
pub struct JobDispatcher<A: AccountRepository, S: SessionRepository> {
    handler: Arc<RequestHandler<A, S>>,
}

impl<A: AccountRepository, S: SessionRepository> JobDispatcher<A, S> {
    /// Erstellt einen neuen Dispatcher
    pub fn neu(handler: Arc<RequestHandler<A, S>>) -> Self {
        Self { handler }
    }

    /// Verarbeitet einen rohen Job-Umschlag und gibt die Antwort zurueck
    pub async fn dispatch(&self, raw: &[u8]) -> Response {
        let job: Job = match serde_json::from_slice(raw) {
            Ok(job) => job,
            Err(e) => {
                tracing::debug!(fehler = %e, "Job-Umschlag nicht dekodierbar");
                return Problem::NotProcessable.into();
            }
        };

        tracing::debug!(operation = ?job.operation, "Job empfangen");

        match job.operation {
            Operation::UserCreate => match serde_json::from_value::<UserCreateData>(job.data) {
                Ok(data) => self.handler.create(data).await,
                Err(e) => {
                    tracing::debug!(fehler = %e, "UserCreate-Payload nicht dekodierbar");
                    Problem::NotProcessable.into()
                }
            },
            Operation::UserLogin => match serde_json::from_value::<UserLoginData>(job.data) {
                Ok(data) => self.handler.login(data).await,
                Err(e) => {
                    tracing::debug!(fehler = %e, "UserLogin-Payload nicht dekodierbar");
                    Problem::NotProcessable.into()
                }
            },
        }
    }
}
