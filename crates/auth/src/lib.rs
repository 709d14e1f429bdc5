//! miauw-auth – Konto- und Login-Service
//!
//! Dieses Crate implementiert:
//! - Passwort-Hashing mit Argon2id hinter dem `PasswordHasher`-Trait
//! - Austauschbare Erzeugung von Session-IDs
//! - CredentialService (Konto anlegen, Login mit Verifikations-Gate)

pub mod error;
pub mod ids;
pub mod password;
pub mod service;

// Bequeme Re-Exporte
pub use error::{AuthError, AuthResult, PasswordError};
pub use ids::{SessionIdGenerator, UuidSessionIds};
pub use password::{Argon2Hasher, HashingParams, PasswordHasher};
pub use service::{AccountCreated, CredentialService};
