//! miauw-worker – Request-Handler fuer miauw-auth
//!
//! Dekodiert untrusted JSON-Payloads, ruft den CredentialService auf und
//! bildet Ergebnisse und Fehler auf die stabile Antwortstruktur
//! (`Content` + `Status { Code, Title, Detail, Type }`) ab.

pub mod dispatcher;
pub mod handler;
pub mod response;

pub use dispatcher::{Job, JobDispatcher, Operation};
pub use handler::{RequestHandler, UserCreateData, UserLoginData, UserSessionResponse};
pub use response::{Problem, Response, ResponseStatus};
