//! BeitragService – Beitraege anlegen, lesen, aktualisieren, loeschen
//!
//! Aenderungen nutzen optimistische Nebenlaeufigkeit: das Update greift nur,
//! wenn die gespeicherte Version der erwarteten entspricht. Es gibt keine
//! Sperren im Prozess; die Datenbank entscheidet.

use std::sync::Arc;
use std::time::Duration;

use nexablog_auth::{codes, Identitaet, PermissionService};
use nexablog_core::{PostId, UserId};
use nexablog_db::{
    mit_frist,
    models::{BeitragAenderung, BeitragRecord, NeuerBeitrag},
    DbError, PostRepository,
};

use crate::{
    error::{BeitragError, BeitragResult},
    types::BeitragEingabe,
};

/// BeitragService verwaltet Blog-Beitraege
#[derive(Clone)]
pub struct BeitragService {
    repo: Arc<dyn PostRepository>,
    berechtigungen: PermissionService,
    frist: Duration,
}

impl BeitragService {
    pub fn neu(
        repo: Arc<dyn PostRepository>,
        berechtigungen: PermissionService,
        frist: Duration,
    ) -> Self {
        Self {
            repo,
            berechtigungen,
            frist,
        }
    }

    /// Legt einen Beitrag an (erfordert `posts:write`), Version startet bei 1
    pub async fn erstellen(
        &self,
        identitaet: &Identitaet,
        eingabe: &BeitragEingabe,
    ) -> BeitragResult<BeitragRecord> {
        self.berechtigungen
            .erfordern(identitaet, codes::POSTS_WRITE)
            .await?;
        let autor = identitaet.benutzer()?;
        eingabe.validieren()?;

        let beitrag = mit_frist(
            self.frist,
            self.repo.create(NeuerBeitrag {
                title: &eingabe.title,
                body: &eingabe.body,
                author_id: autor.id,
            }),
        )
        .await?;

        tracing::info!(post_id = %beitrag.id, author_id = %autor.id, "Beitrag erstellt");
        Ok(beitrag)
    }

    /// Alle Beitraege
    pub async fn liste(&self) -> BeitragResult<Vec<BeitragRecord>> {
        Ok(mit_frist(self.frist, self.repo.list()).await?)
    }

    /// Einzelner Beitrag oder `NichtGefunden`
    pub async fn laden(&self, id: PostId) -> BeitragResult<BeitragRecord> {
        mit_frist(self.frist, self.repo.get_by_id(id))
            .await?
            .ok_or(BeitragError::NichtGefunden(id))
    }

    /// Beitraege eines Autors
    pub async fn nach_autor(&self, author_id: UserId) -> BeitragResult<Vec<BeitragRecord>> {
        Ok(mit_frist(self.frist, self.repo.list_by_author(author_id)).await?)
    }

    /// Aktualisiert Titel und Inhalt eines eigenen Beitrags
    ///
    /// Ohne `erwartete_version` gilt die beim Laden gelesene Version. Hat
    /// zwischenzeitlich jemand anderes geschrieben, ergibt das `Konflikt`.
    pub async fn aktualisieren(
        &self,
        identitaet: &Identitaet,
        id: PostId,
        erwartete_version: Option<i64>,
        eingabe: &BeitragEingabe,
    ) -> BeitragResult<BeitragRecord> {
        self.berechtigungen
            .erfordern(identitaet, codes::POSTS_WRITE)
            .await?;

        let bestehend = self.laden(id).await?;
        if !identitaet.ist_besitzer(bestehend.author_id) {
            return Err(BeitragError::KeinBesitzer(id));
        }
        eingabe.validieren()?;

        let version = erwartete_version.unwrap_or(bestehend.version);
        let beitrag = mit_frist(
            self.frist,
            self.repo.update(
                id,
                version,
                BeitragAenderung {
                    title: &eingabe.title,
                    body: &eingabe.body,
                },
            ),
        )
        .await
        .map_err(|e| match e {
            DbError::Konflikt(_) => {
                tracing::debug!(post_id = %id, version, "Versionskonflikt beim Update");
                BeitragError::Konflikt(id)
            }
            DbError::NichtGefunden(_) => BeitragError::NichtGefunden(id),
            other => BeitragError::Datenbank(other),
        })?;

        tracing::info!(post_id = %id, version = beitrag.version, "Beitrag aktualisiert");
        Ok(beitrag)
    }

    /// Loescht einen eigenen Beitrag
    pub async fn loeschen(&self, identitaet: &Identitaet, id: PostId) -> BeitragResult<()> {
        identitaet.benutzer()?;

        let bestehend = self.laden(id).await?;
        if !identitaet.ist_besitzer(bestehend.author_id) {
            return Err(BeitragError::KeinBesitzer(id));
        }

        mit_frist(self.frist, self.repo.delete(id))
            .await
            .map_err(|e| match e {
                DbError::NichtGefunden(_) => BeitragError::NichtGefunden(id),
                other => BeitragError::Datenbank(other),
            })?;

        tracing::info!(post_id = %id, "Beitrag geloescht");
        Ok(())
    }
}
