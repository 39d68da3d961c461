//! Datenbankmodelle fuer nexablog
//!
//! Diese Typen repraesentieren Datensaetze aus der Datenbank.
//! Sie dienen als reine Datenuebertragungsobjekte zwischen Repository
//! und Service-Schicht.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use nexablog_core::{PostId, UserId};

// ---------------------------------------------------------------------------
// Benutzer
// ---------------------------------------------------------------------------

/// Benutzer-Datensatz aus der Datenbank
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BenutzerRecord {
    pub id: UserId,
    pub username: String,
    pub email: String,
    /// Argon2id-PHC-String, verlaesst den Server nie
    #[serde(skip_serializing)]
    pub password_hash: String,
    #[serde(skip_serializing)]
    pub version: i64,
    pub created_at: DateTime<Utc>,
}

/// Daten zum Erstellen eines neuen Benutzers
#[derive(Debug, Clone)]
pub struct NeuerBenutzer<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
}

// ---------------------------------------------------------------------------
// Tokens
// ---------------------------------------------------------------------------

/// Verwendungszweck eines Tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenScope {
    Authentication,
}

impl TokenScope {
    pub fn als_str(&self) -> &'static str {
        match self {
            Self::Authentication => "authentication",
        }
    }
}

impl std::str::FromStr for TokenScope {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "authentication" => Ok(Self::Authentication),
            other => Err(format!("Unbekannter Token-Scope: {other}")),
        }
    }
}

impl std::fmt::Display for TokenScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.als_str())
    }
}

/// Daten zum Persistieren eines Tokens (nur der Digest, nie der Klartext)
#[derive(Debug, Clone)]
pub struct NeuerToken<'a> {
    pub hash: &'a [u8],
    pub user_id: UserId,
    pub expires_at: DateTime<Utc>,
    pub scope: TokenScope,
}

// ---------------------------------------------------------------------------
// Beitraege
// ---------------------------------------------------------------------------

/// Beitrags-Datensatz aus der Datenbank
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BeitragRecord {
    pub id: PostId,
    pub title: String,
    pub body: String,
    pub author_id: UserId,
    /// Zaehler fuer optimistische Nebenlaeufigkeit, startet bei 1
    pub version: i64,
    pub created_at: DateTime<Utc>,
}

/// Daten zum Erstellen eines neuen Beitrags
#[derive(Debug, Clone)]
pub struct NeuerBeitrag<'a> {
    pub title: &'a str,
    pub body: &'a str,
    pub author_id: UserId,
}

/// Neue Inhalte fuer ein bedingtes Beitrags-Update
#[derive(Debug, Clone)]
pub struct BeitragAenderung<'a> {
    pub title: &'a str,
    pub body: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_scope_roundtrip() {
        let scope: TokenScope = "authentication".parse().unwrap();
        assert_eq!(scope, TokenScope::Authentication);
        assert_eq!(scope.to_string(), "authentication");
        assert!("admin".parse::<TokenScope>().is_err());
    }

    #[test]
    fn benutzer_json_ohne_hash() {
        let benutzer = BenutzerRecord {
            id: UserId(1),
            username: "u1".into(),
            email: "e1@example.com".into(),
            password_hash: "$argon2id$geheim".into(),
            version: 1,
            created_at: Utc::now(),
        };
        let json = serde_json::to_string(&benutzer).unwrap();
        assert!(!json.contains("argon2id"));
        assert!(!json.contains("password_hash"));
        assert!(!json.contains("version"));
        assert!(json.contains("\"email\":\"e1@example.com\""));
    }
}
