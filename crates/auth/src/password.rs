//! Passwort-Hashing mit Argon2id
//!
//! Der Hash wird als PHC-String gespeichert (Algorithmus, Parameter und
//! Salt eingebettet). Fehler geben keine Interna preis: Details landen im
//! Log, nach aussen geht nur `AuthError::PasswortHashing`.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};
use serde::Deserialize;

use crate::error::{AuthError, AuthResult};

/// Kostenparameter fuer Argon2id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Argon2Kosten {
    /// Speicherbedarf in KiB
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl Default for Argon2Kosten {
    fn default() -> Self {
        // OWASP-Minimum fuer Argon2id: 19 MiB, 2 Iterationen, 1 Lane
        Self {
            memory_kib: 19 * 1024,
            iterations: 2,
            parallelism: 1,
        }
    }
}

/// Einweg-Hasher mit konfigurierbaren Kosten
#[derive(Debug, Clone)]
pub struct PasswortHasher {
    params: Params,
}

impl PasswortHasher {
    /// Erstellt einen Hasher; ungueltige Kosten ergeben einen Fehler
    pub fn neu(kosten: Argon2Kosten) -> AuthResult<Self> {
        let params = Params::new(
            kosten.memory_kib,
            kosten.iterations,
            kosten.parallelism,
            None,
        )
        .map_err(|e| {
            tracing::error!(fehler = %e, ?kosten, "Ungueltige Argon2-Parameter");
            AuthError::PasswortHashing
        })?;
        Ok(Self { params })
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    /// Hasht ein Passwort mit zufaelligem Salt, gibt den PHC-String zurueck
    pub fn hashen(&self, passwort: &str) -> AuthResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        self.argon2()
            .hash_password(passwort.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| {
                tracing::error!(fehler = %e, "Passwort-Hashing fehlgeschlagen");
                AuthError::PasswortHashing
            })
    }

    /// Prueft ein Passwort gegen einen gespeicherten PHC-Hash
    ///
    /// Falsches Passwort ergibt `Ok(false)`, kein Fehler. Die Parameter im
    /// Hash haben Vorrang, aeltere Hashes bleiben also pruefbar.
    pub fn verifizieren(&self, hash: &str, passwort: &str) -> AuthResult<bool> {
        let parsed = PasswordHash::new(hash).map_err(|e| {
            tracing::error!(fehler = %e, "Gespeicherter Passwort-Hash nicht lesbar");
            AuthError::PasswortHashing
        })?;

        match self.argon2().verify_password(passwort.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => {
                tracing::error!(fehler = %e, "Passwort-Verifikation fehlgeschlagen");
                Err(AuthError::PasswortHashing)
            }
        }
    }
}

/// Hasher mit minimalen Kosten fuer Tests
#[cfg(test)]
pub(crate) fn test_hasher() -> PasswortHasher {
    PasswortHasher::neu(Argon2Kosten {
        memory_kib: 1024,
        iterations: 1,
        parallelism: 1,
    })
    .unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passwort_hashen_und_verifizieren() {
        let hasher = test_hasher();
        let hash = hasher.hashen("sicheres_passwort_123!").unwrap();

        assert!(
            hash.starts_with("$argon2id$"),
            "Hash muss mit $argon2id$ beginnen"
        );
        assert!(hasher.verifizieren(&hash, "sicheres_passwort_123!").unwrap());
    }

    #[test]
    fn falsches_passwort_ist_kein_fehler() {
        let hasher = test_hasher();
        let hash = hasher.hashen("richtiges_passwort").unwrap();

        assert!(!hasher.verifizieren(&hash, "falsches_passwort").unwrap());
    }

    #[test]
    fn gleiche_passwoerter_unterschiedliche_hashes() {
        let hasher = test_hasher();
        let hash1 = hasher.hashen("gleiches_passwort").unwrap();
        let hash2 = hasher.hashen("gleiches_passwort").unwrap();

        assert_ne!(hash1, hash2, "Salt muss pro Hash neu erzeugt werden");
    }

    #[test]
    fn ungueltiger_hash_ergibt_generischen_fehler() {
        let err = test_hasher()
            .verifizieren("kein_gueltiger_hash", "passwort")
            .unwrap_err();
        assert!(matches!(err, AuthError::PasswortHashing));
        assert_eq!(err.to_string(), "Passwort-Hashing fehlgeschlagen");
    }

    #[test]
    fn ungueltige_kosten_abgelehnt() {
        let err = PasswortHasher::neu(Argon2Kosten {
            memory_kib: 1,
            iterations: 0,
            parallelism: 1,
        })
        .unwrap_err();
        assert!(matches!(err, AuthError::PasswortHashing));
    }

    #[test]
    fn standardkosten_sind_gueltig() {
        assert!(PasswortHasher::neu(Argon2Kosten::default()).is_ok());
    }
}
