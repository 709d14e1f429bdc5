//! Erzeugung von Session-IDs
//!
//! Als Trait injiziert, damit Tests deterministische IDs verwenden koennen.

use miauw_core::SessionId;

/// Quelle fuer eindeutige Session-IDs
pub trait SessionIdGenerator: Send + Sync {
    fn generate(&self) -> SessionId;
}

/// Standard-Generator: zufaellige UUIDv4
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidSessionIds;

impl SessionIdGenerator for UuidSessionIds {
    fn generate(&self) -> SessionId {
        SessionId::new()
    }
}
