//! Fehlertypen fuer miauw-core

use thiserror::Error;

/// Result-Alias fuer miauw-core
pub type CoreResult<T> = std::result::Result<T, CoreError>;

/// Fehler beim Einlesen von Identifikatoren
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("Kennung ist leer")]
    LeereKennung,

    #[error("Kennung ist keine gueltige UUID: {0}")]
    UngueltigeKennung(String),
}
