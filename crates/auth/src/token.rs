//! Bearer-Token-Ausgabe und -Aufloesung
//!
//! Tokens sind 32 zufaellige Bytes, URL-sicher Base64-kodiert. In der
//! Datenbank liegt nur der SHA-256-Digest; der Klartext wird genau einmal
//! an den Aufrufer zurueckgegeben.

use std::sync::Arc;
use std::time::Duration;

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::{DateTime, SubsecRound, Utc};
use rand::RngCore;
use serde::Serialize;
use sha2::{Digest, Sha256};

use nexablog_core::UserId;
use nexablog_db::{
    mit_frist,
    models::{BenutzerRecord, NeuerToken, TokenScope},
    TokenRepository,
};

use crate::error::{AuthError, AuthResult};

/// Anzahl Zufallsbytes pro Token
const TOKEN_BYTES: usize = 32;

/// Ergebnis der Token-Ausgabe (Klartext nur hier sichtbar)
#[derive(Debug, Clone, Serialize)]
pub struct AusgestellterToken {
    #[serde(rename = "token")]
    pub klartext: String,
    #[serde(rename = "expires_at")]
    pub laeuft_ab_am: DateTime<Utc>,
}

/// Stellt Tokens aus und loest sie wieder auf
#[derive(Clone)]
pub struct TokenAussteller {
    repo: Arc<dyn TokenRepository>,
    frist: Duration,
}

impl TokenAussteller {
    pub fn neu(repo: Arc<dyn TokenRepository>, frist: Duration) -> Self {
        Self { repo, frist }
    }

    /// Erzeugt einen Token fuer `user_id`, gueltig fuer `ttl`
    pub async fn ausstellen(
        &self,
        user_id: UserId,
        scope: TokenScope,
        ttl: chrono::Duration,
    ) -> AuthResult<AusgestellterToken> {
        let klartext = token_generieren();
        let digest = token_digest(&klartext);
        let laeuft_ab_am = (Utc::now() + ttl).trunc_subsecs(6);

        mit_frist(
            self.frist,
            self.repo.create(NeuerToken {
                hash: &digest,
                user_id,
                expires_at: laeuft_ab_am,
                scope,
            }),
        )
        .await?;

        tracing::debug!(user_id = %user_id, %scope, ablauf = %laeuft_ab_am, "Token ausgestellt");

        Ok(AusgestellterToken {
            klartext,
            laeuft_ab_am,
        })
    }

    /// Loest einen Klartext-Token zum Besitzer auf
    ///
    /// Falscher, abgelaufener und falsch gescopter Token ergeben denselben
    /// Fehler `AuthError::TokenUngueltig`.
    pub async fn aufloesen(&self, klartext: &str, scope: TokenScope) -> AuthResult<BenutzerRecord> {
        let digest = token_digest(klartext);
        mit_frist(
            self.frist,
            self.repo.get_user_by_token(&digest, scope, Utc::now()),
        )
        .await?
        .ok_or(AuthError::TokenUngueltig)
    }

    /// Entfernt abgelaufene Tokens aus der Datenbank
    pub async fn abgelaufene_bereinigen(&self) -> AuthResult<u64> {
        let anzahl = mit_frist(self.frist, self.repo.delete_expired(Utc::now())).await?;
        if anzahl > 0 {
            tracing::info!(anzahl, "Abgelaufene Tokens bereinigt");
        }
        Ok(anzahl)
    }
}

/// Generiert einen kryptografisch sicheren Token (256 Bit Entropie)
fn token_generieren() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

/// SHA-256-Digest des Klartext-Tokens
pub fn token_digest(klartext: &str) -> [u8; 32] {
    let mut digest = [0u8; 32];
    digest.copy_from_slice(&Sha256::digest(klartext.as_bytes()));
    digest
}
