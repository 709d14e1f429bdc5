//! Passwort-Hashing mit Argon2id
//!
//! Der `PasswordHasher`-Trait entkoppelt den CredentialService vom
//! konkreten Algorithmus. `Argon2Hasher` erzeugt PHC-Strings (inkl.
//! Algorithmus, Parameter und Salt); der Vergleich beim Verifizieren
//! laeuft in konstanter Zeit.

use argon2::{
    password_hash::{
        rand_core::OsRng, PasswordHash, PasswordHasher as _, PasswordVerifier as _, SaltString,
    },
    Algorithm, Argon2, Params, Version,
};
use serde::{Deserialize, Serialize};

use crate::error::PasswordError;

/// Einweg-Hashing und Verifikation von Passwoertern
pub trait PasswordHasher: Send + Sync {
    /// Hasht ein Passwort mit frischem Salt
    fn hash(&self, plaintext: &str) -> Result<String, PasswordError>;

    /// Prueft ein Passwort gegen einen gespeicherten Hash
    ///
    /// Falsches Passwort ergibt `Ok(false)`; nur ein unlesbarer Hash ist
    /// ein Fehler.
    fn verify(&self, hash: &str, plaintext: &str) -> Result<bool, PasswordError>;
}

/// Argon2id-Parameter
///
/// Standardwerte gemaess OWASP-Empfehlungen:
/// - Speicher: 64 MiB
/// - Iterationen: 3
/// - Parallelismus: 1
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HashingParams {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl Default for HashingParams {
    fn default() -> Self {
        Self {
            memory_kib: 64 * 1024,
            iterations: 3,
            parallelism: 1,
        }
    }
}

impl HashingParams {
    /// Kleinstmoegliche Parameter, nur fuer Tests gedacht
    pub fn minimal() -> Self {
        Self {
            memory_kib: Params::MIN_M_COST,
            iterations: Params::MIN_T_COST,
            parallelism: Params::MIN_P_COST,
        }
    }
}

/// Argon2id-Implementierung des `PasswordHasher`
#[derive(Clone)]
pub struct Argon2Hasher {
    params: Params,
}

impl Argon2Hasher {
    /// Erstellt einen Hasher; ungueltige Parameter ergeben einen Fehler
    pub fn new(params: &HashingParams) -> Result<Self, PasswordError> {
        let params = Params::new(
            params.memory_kib,
            params.iterations,
            params.parallelism,
            None, // output_len: Standard (32 Bytes)
        )
        .map_err(|e| PasswordError::Hashing(format!("Ungueltige Argon2-Parameter: {e}")))?;

        Ok(Self { params })
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }
}

impl std::fmt::Debug for Argon2Hasher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Argon2Hasher")
            .field("m_cost", &self.params.m_cost())
            .field("t_cost", &self.params.t_cost())
            .field("p_cost", &self.params.p_cost())
            .finish()
    }
}

impl PasswordHasher for Argon2Hasher {
    fn hash(&self, plaintext: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);

        self.argon2()
            .hash_password(plaintext.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PasswordError::Hashing(e.to_string()))
    }

    fn verify(&self, hash: &str, plaintext: &str) -> Result<bool, PasswordError> {
        let parsed_hash = PasswordHash::new(hash)
            .map_err(|e| PasswordError::Verification(format!("Ungueltiges Hash-Format: {e}")))?;

        // Parameter stammen aus dem PHC-String, nicht aus `self.params`
        match self.argon2().verify_password(plaintext.as_bytes(), &parsed_hash) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(PasswordError::Verification(e.to_string())),
        }
    }
}
